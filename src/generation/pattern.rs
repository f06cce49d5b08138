//! Pattern grammar: one or more `<count><category>` tokens.
//!
//! Category letters are `u`, `l`, `n` and `s`, case-insensitive.
//! `2u3l2n1s` means two uppercase, three lowercase, two digits and one
//! symbol.

use super::generator::GenerationError;
use super::options::MAX_LENGTH;
use crate::charset::Category;
use crate::validation::RangeError;

/// One parsed `<count><category>` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternToken {
    /// How many characters to draw.
    pub count: usize,
    /// Which alphabet to draw from.
    pub category: Category,
}

/// Parses a pattern into tokens.
///
/// The total length across tokens is capped at [`MAX_LENGTH`]. Zero
/// counts are accepted and contribute nothing.
pub fn parse_pattern(pattern: &str) -> Result<Vec<PatternToken>, GenerationError> {
    let malformed = || GenerationError::MalformedPattern {
        pattern: pattern.to_string(),
    };

    let mut tokens = Vec::new();
    let mut chars = pattern.chars().peekable();
    let mut total: usize = 0;

    while chars.peek().is_some() {
        let mut count: usize = 0;
        let mut digits = 0;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            count = count
                .checked_mul(10)
                .and_then(|n| n.checked_add(d as usize))
                .ok_or_else(malformed)?;
            digits += 1;
            chars.next();
        }
        if digits == 0 {
            return Err(malformed());
        }

        let category = chars
            .next()
            .and_then(Category::from_code)
            .ok_or_else(malformed)?;

        total = total.checked_add(count).ok_or_else(malformed)?;
        tokens.push(PatternToken { count, category });
    }

    if tokens.is_empty() {
        return Err(malformed());
    }

    let total = i64::try_from(total).unwrap_or(i64::MAX);
    RangeError::check("pattern length", total, 0, MAX_LENGTH as i64)?;

    Ok(tokens)
}
