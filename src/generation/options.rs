//! Typed generation options and length limits.

use crate::charset::CategoryFlags;
use serde::{Deserialize, Serialize};

/// Shortest password the generator will produce.
pub const MIN_LENGTH: usize = 4;
/// Longest password the generator will produce.
pub const MAX_LENGTH: usize = 64;
/// Length used when none is given.
pub const DEFAULT_LENGTH: usize = 12;
/// Length of the "strong" suggestion.
pub const STRONG_LENGTH: usize = 16;
/// Most passwords a single batch request may produce.
pub const MAX_COUNT: usize = 100;
/// Shortest PIN.
pub const PIN_MIN_LENGTH: usize = 4;
/// Longest PIN.
pub const PIN_MAX_LENGTH: usize = 12;

/// Options for a single generation call.
///
/// Defaults are applied here, once, rather than at each call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Exact output length.
    pub length: usize,
    /// Draw from `A`-`Z`.
    pub include_uppercase: bool,
    /// Draw from `a`-`z`.
    pub include_lowercase: bool,
    /// Draw from `0`-`9`.
    pub include_numbers: bool,
    /// Draw from the symbol set.
    pub include_symbols: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
        }
    }
}

impl GenerationOptions {
    /// Builds options from a length and category flags.
    pub fn new(length: usize, flags: CategoryFlags) -> Self {
        Self {
            length,
            include_uppercase: flags.uppercase,
            include_lowercase: flags.lowercase,
            include_numbers: flags.numbers,
            include_symbols: flags.symbols,
        }
    }

    /// Returns a copy with a different length.
    pub fn with_length(self, length: usize) -> Self {
        Self { length, ..self }
    }

    /// Selected categories.
    pub fn flags(&self) -> CategoryFlags {
        CategoryFlags {
            uppercase: self.include_uppercase,
            lowercase: self.include_lowercase,
            numbers: self.include_numbers,
            symbols: self.include_symbols,
        }
    }
}
