//! Generation option validation.

use crate::generation::{GenerationOptions, MAX_LENGTH, MIN_LENGTH};
use serde::Serialize;

/// Per-rule breakdown of an options check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionChecks {
    /// Length within `MIN_LENGTH..=MAX_LENGTH`.
    pub valid_length: bool,
    /// At least one category selected.
    pub has_character_types: bool,
}

/// Result of [`validate_generation_options`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionsValidation {
    /// True when every rule passed.
    pub valid: bool,
    /// Every violated rule, in check order.
    pub errors: Vec<String>,
    /// Individual rule outcomes.
    pub checks: OptionChecks,
}

/// Checks length bounds and category selection, aggregating all violations.
pub fn validate_generation_options(options: &GenerationOptions) -> OptionsValidation {
    let mut errors = Vec::new();

    let valid_length = (MIN_LENGTH..=MAX_LENGTH).contains(&options.length);
    if !valid_length {
        errors.push(format!(
            "password length must be between {} and {} characters",
            MIN_LENGTH, MAX_LENGTH
        ));
    }

    let has_character_types = !options.flags().is_empty();
    if !has_character_types {
        errors.push("at least one character type must be selected".to_string());
    }

    tracing::trace!(
        length = options.length,
        valid_length,
        has_character_types,
        "Validated generation options"
    );

    OptionsValidation {
        valid: errors.is_empty(),
        errors,
        checks: OptionChecks {
            valid_length,
            has_character_types,
        },
    }
}
