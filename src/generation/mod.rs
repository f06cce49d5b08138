//! Password generation.
//!
//! Every generated password is drawn from a CSPRNG. Options are
//! validated before any randomness is consumed, and the characters
//! guaranteed for each selected category are shuffled into random
//! positions.

mod generator;
mod memorable;
mod options;
mod pattern;

pub use generator::{generate, GenerationError, Generator, Suggestion};
pub use options::{
    GenerationOptions, DEFAULT_LENGTH, MAX_COUNT, MAX_LENGTH, MIN_LENGTH, PIN_MAX_LENGTH,
    PIN_MIN_LENGTH, STRONG_LENGTH,
};
pub use pattern::{parse_pattern, PatternToken};
