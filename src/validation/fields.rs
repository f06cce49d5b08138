//! Free-text field validators for names, notes and search input.

use super::ValidationResult;
use thiserror::Error;

/// Minimum saved-password name length.
pub const PASSWORD_NAME_MIN: usize = 2;
/// Maximum saved-password name length.
pub const PASSWORD_NAME_MAX: usize = 50;
/// Minimum category name length.
pub const CATEGORY_NAME_MIN: usize = 2;
/// Maximum category name length.
pub const CATEGORY_NAME_MAX: usize = 30;
/// Maximum notes length.
pub const NOTES_MAX: usize = 200;
/// Characters rejected in names and stripped from free text.
pub const FORBIDDEN_NAME_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

const SEARCH_QUERY_MAX: usize = 100;
const SANITIZED_INPUT_MAX: usize = 1000;

/// Numeric range violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The value lies outside `min..=max`.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Name of the checked field.
        field: String,
        /// The rejected value.
        value: i64,
        /// Smallest accepted value.
        min: i64,
        /// Largest accepted value.
        max: i64,
    },

    /// The input does not parse as an integer.
    #[error("{field} must be a valid number, got {value:?}")]
    NotANumber {
        /// Name of the checked field.
        field: String,
        /// The raw input.
        value: String,
    },
}

impl RangeError {
    /// Checks `value` against an inclusive range.
    pub fn check(field: &str, value: i64, min: i64, max: i64) -> Result<i64, RangeError> {
        if value < min || value > max {
            return Err(RangeError::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            });
        }
        Ok(value)
    }
}

/// Validates the display name of a saved password.
pub fn validate_password_name(name: &str) -> ValidationResult {
    validate_name("password name", name, PASSWORD_NAME_MIN, PASSWORD_NAME_MAX)
}

/// Validates a category name.
pub fn validate_category_name(name: &str) -> ValidationResult {
    validate_name("category name", name, CATEGORY_NAME_MIN, CATEGORY_NAME_MAX)
}

fn validate_name(label: &str, name: &str, min: usize, max: usize) -> ValidationResult {
    let trimmed = name.trim();
    let length = trimmed.chars().count();

    // Whitespace-only counts as missing, not as too short.
    if length == 0 {
        return ValidationResult::fail(format!("{} is required", label));
    }

    if length < min {
        return ValidationResult::fail(format!(
            "{} must be at least {} characters",
            label, min
        ));
    }

    if length > max {
        return ValidationResult::fail(format!("{} must be at most {} characters", label, max));
    }

    if trimmed.contains(FORBIDDEN_NAME_CHARS) {
        return ValidationResult::fail(format!(
            "{} must not contain special characters (< > \" ' &)",
            label
        ));
    }

    ValidationResult::ok()
}

/// Validates optional notes attached to a saved password.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult {
    let Some(notes) = notes else {
        return ValidationResult::ok();
    };

    if notes.trim().chars().count() > NOTES_MAX {
        return ValidationResult::fail(format!("notes must be at most {} characters", NOTES_MAX));
    }

    ValidationResult::ok()
}

/// A cleaned search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed query with forbidden characters removed.
    pub sanitized: String,
    /// Trimmed query as typed.
    pub original: String,
}

/// Validates and cleans a search query.
///
/// An empty or missing query is valid and yields an empty query.
pub fn validate_search_query(query: Option<&str>) -> Result<SearchQuery, ValidationResult> {
    let trimmed = query.unwrap_or_default().trim();

    if trimmed.chars().count() > SEARCH_QUERY_MAX {
        return Err(ValidationResult::fail("search query is too long"));
    }

    Ok(SearchQuery {
        sanitized: strip_forbidden(trimmed),
        original: trimmed.to_string(),
    })
}

/// Trims, strips forbidden characters and caps free-text input.
pub fn sanitize_input(input: &str) -> String {
    strip_forbidden(input.trim())
        .chars()
        .take(SANITIZED_INPUT_MAX)
        .collect()
}

fn strip_forbidden(text: &str) -> String {
    text.chars()
        .filter(|c| !FORBIDDEN_NAME_CHARS.contains(c))
        .collect()
}

/// Parses an integer and checks it against an inclusive range.
pub fn validate_number_range(
    value: &str,
    min: i64,
    max: i64,
    field: &str,
) -> Result<i64, RangeError> {
    let parsed = value
        .trim()
        .parse::<i64>()
        .map_err(|_| RangeError::NotANumber {
            field: field.to_string(),
            value: value.to_string(),
        })?;

    RangeError::check(field, parsed, min, max)
}
