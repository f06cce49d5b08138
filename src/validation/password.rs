//! Password acceptance rules.
//!
//! Shares its predicates with the strength analyzer so that a
//! password flagged here is flagged there for the same reason.

use crate::analysis::patterns::{has_repeated_run, has_sequence, is_common, CharClasses};
use crate::generation::{MAX_LENGTH, MIN_LENGTH};
use serde::{Deserialize, Serialize};

/// Optional per-category requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordRequirements {
    /// Require at least one `A`-`Z`.
    pub require_uppercase: bool,
    /// Require at least one `a`-`z`.
    pub require_lowercase: bool,
    /// Require at least one digit.
    pub require_numbers: bool,
    /// Require at least one non-alphanumeric character.
    pub require_symbols: bool,
}

/// Per-rule breakdown of a password check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordChecks {
    /// Length within `MIN_LENGTH..=MAX_LENGTH`.
    pub length: bool,
    /// Contains `a`-`z`.
    pub has_lowercase: bool,
    /// Contains `A`-`Z`.
    pub has_uppercase: bool,
    /// Contains `0`-`9`.
    pub has_numbers: bool,
    /// Contains a non-alphanumeric character.
    pub has_symbols: bool,
    /// Not an exact common-password match.
    pub not_common: bool,
    /// No ascending run or keyboard walk.
    pub no_pattern: bool,
    /// No character repeated three or more times in a row.
    pub no_repeats: bool,
}

/// Result of [`validate_password`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordValidation {
    /// True when every rule passed.
    pub valid: bool,
    /// Every violated rule, in check order.
    pub errors: Vec<String>,
    /// Individual rule outcomes.
    pub checks: PasswordChecks,
}

/// Checks a password against length bounds, category requirements,
/// the common-password list, sequences and repeats.
pub fn validate_password(password: &str, requirements: &PasswordRequirements) -> PasswordValidation {
    let length = password.chars().count();
    let classes = CharClasses::of(password);
    let common = is_common(password);
    let sequence = has_sequence(password);
    let repeats = has_repeated_run(password);

    let checks = PasswordChecks {
        length: (MIN_LENGTH..=MAX_LENGTH).contains(&length),
        has_lowercase: classes.lowercase,
        has_uppercase: classes.uppercase,
        has_numbers: classes.digit,
        has_symbols: classes.symbol,
        not_common: !common,
        no_pattern: !sequence,
        no_repeats: !repeats,
    };

    if password.is_empty() {
        return PasswordValidation {
            valid: false,
            errors: vec!["password is required".to_string()],
            checks,
        };
    }

    let mut errors = Vec::new();

    if length < MIN_LENGTH {
        errors.push(format!("password must be at least {} characters", MIN_LENGTH));
    }
    if length > MAX_LENGTH {
        errors.push(format!("password must be at most {} characters", MAX_LENGTH));
    }

    let required = [
        (requirements.require_uppercase, classes.uppercase, "an uppercase letter"),
        (requirements.require_lowercase, classes.lowercase, "a lowercase letter"),
        (requirements.require_numbers, classes.digit, "a digit"),
        (requirements.require_symbols, classes.symbol, "a special character"),
    ];
    for (wanted, present, what) in required {
        if wanted && !present {
            errors.push(format!("password must contain at least {}", what));
        }
    }

    if common {
        errors.push("password is too common".to_string());
    }
    if sequence {
        errors.push("password contains sequential characters (123, abc, ...)".to_string());
    }
    if repeats {
        errors.push("password contains too many repeated characters".to_string());
    }

    tracing::trace!(length, violations = errors.len(), "Validated password");

    PasswordValidation {
        valid: errors.is_empty(),
        errors,
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password_valid() {
        let result = validate_password("Tr0ub4dor&Zq", &PasswordRequirements::default());
        assert!(result.valid, "{:?}", result.errors);
        assert!(result.checks.length);
        assert!(result.checks.has_symbols);
    }

    #[test]
    fn test_empty_password_required() {
        let result = validate_password("", &PasswordRequirements::default());
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["password is required".to_string()]);
    }

    #[test]
    fn test_length_bounds() {
        let short = validate_password("Zq!", &PasswordRequirements::default());
        assert!(!short.checks.length);
        assert!(short.errors[0].contains("at least 4"));

        let long = validate_password(&"aZ".repeat(40), &PasswordRequirements::default());
        assert!(!long.checks.length);
    }

    #[test]
    fn test_requirements_enforced() {
        let requirements = PasswordRequirements {
            require_uppercase: true,
            require_symbols: true,
            ..Default::default()
        };
        let result = validate_password("lowercase9", &requirements);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_common_is_exact_match() {
        let result = validate_password("Password", &PasswordRequirements::default());
        assert!(!result.checks.not_common);

        // Substring matches are scored by the analyzer, not rejected here.
        let result = validate_password("mypassword", &PasswordRequirements::default());
        assert!(result.checks.not_common);
    }

    #[test]
    fn test_sequence_and_repeats_reported_separately() {
        let result = validate_password("Zaaa7xq!", &PasswordRequirements::default());
        assert!(result.checks.no_pattern);
        assert!(!result.checks.no_repeats);
        assert_eq!(result.errors.len(), 1);

        let result = validate_password("Zabc7xq!", &PasswordRequirements::default());
        assert!(!result.checks.no_pattern);
        assert!(result.checks.no_repeats);
    }
}
