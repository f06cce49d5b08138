//! Input validation.
//!
//! Every validator here is a pure predicate that reports violations
//! as data instead of failing. Callers decide whether a violation is
//! fatal; the generator turns option violations into a
//! [`GenerationError`](crate::generation::GenerationError).

mod entry;
mod fields;
mod import;
mod options;
mod password;

pub use entry::{EntryDraft, SavedPasswordEntry};
pub use fields::{
    sanitize_input, validate_category_name, validate_notes, validate_number_range,
    validate_password_name, validate_search_query, RangeError, SearchQuery, CATEGORY_NAME_MAX,
    CATEGORY_NAME_MIN, FORBIDDEN_NAME_CHARS, NOTES_MAX, PASSWORD_NAME_MAX, PASSWORD_NAME_MIN,
};
pub use import::{
    validate_import_data, validate_settings, ImportData, ImportValidation, SanitizedSettings,
    SettingsValidation, Theme,
};
pub use options::{validate_generation_options, OptionChecks, OptionsValidation};
pub use password::{validate_password, PasswordChecks, PasswordRequirements, PasswordValidation};

use serde::Serialize;

/// Outcome of a validator that only reports messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// True when no rule was violated.
    pub valid: bool,
    /// Human-readable violation messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result carrying a single message.
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![error.into()],
        }
    }

    /// Builds a result from collected messages; empty means valid.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// First violation message, if any.
    pub fn error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}
