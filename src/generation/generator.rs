//! Pool sampling with guaranteed category coverage.

use super::options::{
    GenerationOptions, MAX_COUNT, MAX_LENGTH, PIN_MAX_LENGTH, PIN_MIN_LENGTH, STRONG_LENGTH,
};
use super::pattern::parse_pattern;
use crate::charset::{build_pool, Category};
use crate::rng::PasswordRng;
use crate::validation::{validate_generation_options, RangeError};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_core::{CryptoRng, RngCore};
use serde::Serialize;
use thiserror::Error;
use zeroize::Zeroize;

const SEPARATOR_GROUP: usize = 4;

/// Errors that can occur during generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// One or more option rules were violated.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// Length is valid but no category was selected.
    #[error("at least one character type must be selected")]
    NoCharacterTypes,

    /// Pattern does not match `(<count><u|l|n|s>)+`.
    #[error("malformed pattern {pattern:?}: expected <count><u|l|n|s> tokens such as 2u3l2n1s")]
    MalformedPattern {
        /// The rejected input.
        pattern: String,
    },

    /// A numeric length was outside its bounds.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// The custom alphabet had no characters.
    #[error("custom character set must not be empty")]
    EmptyCharacterSet,
}

/// A named alternative offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Short identifier (`standard`, `strong`, `memorable`).
    pub name: &'static str,
    /// The generated password.
    pub password: String,
    /// Human-readable description.
    pub description: &'static str,
}

/// Password generator over a cryptographically secure RNG.
///
/// The generator owns its RNG, so each thread should hold its own
/// instance. Use [`generate`] for one-off calls.
pub struct Generator<R = PasswordRng> {
    rng: R,
}

impl Generator<PasswordRng> {
    /// Creates a generator seeded from the OS entropy source.
    pub fn from_os_entropy() -> Self {
        Self::new(PasswordRng::from_os_entropy())
    }
}

impl Default for Generator<PasswordRng> {
    fn default() -> Self {
        Self::from_os_entropy()
    }
}

impl<R: RngCore + CryptoRng> Generator<R> {
    /// Creates a generator over the given RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the underlying RNG.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Returns the underlying RNG mutably (e.g. to reseed it).
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Generates one password satisfying `options`.
    ///
    /// Draws one character from every selected category, fills the
    /// rest from the combined pool, then shuffles.
    pub fn generate(&mut self, options: &GenerationOptions) -> Result<String, GenerationError> {
        let validation = validate_generation_options(options);
        if !validation.valid {
            if validation.checks.valid_length && !validation.checks.has_character_types {
                return Err(GenerationError::NoCharacterTypes);
            }
            return Err(GenerationError::Validation(validation.errors));
        }

        let flags = options.flags();
        let pool: Vec<char> = build_pool(&flags).chars().collect();
        if pool.is_empty() {
            return Err(GenerationError::NoCharacterTypes);
        }

        let required: Vec<Category> = flags.selected().collect();
        let mut chars = Vec::with_capacity(options.length.max(required.len()));

        for category in &required {
            let c = self.pick(&category.chars());
            chars.push(c);
        }

        let remaining = options.length.saturating_sub(required.len());
        for _ in 0..remaining {
            let c = self.pick(&pool);
            chars.push(c);
        }

        chars.shuffle(&mut self.rng);
        chars.truncate(options.length);

        tracing::debug!(
            length = options.length,
            categories = required.len(),
            pool_size = pool.len(),
            "Generated password"
        );

        Ok(collect_and_wipe(&mut chars))
    }

    /// Generates `count` independent passwords, at most [`MAX_COUNT`].
    ///
    /// Outputs are not deduplicated.
    pub fn generate_multiple(
        &mut self,
        count: usize,
        options: &GenerationOptions,
    ) -> Result<Vec<String>, GenerationError> {
        check_bounds("count", count, 1, MAX_COUNT)?;
        (0..count).map(|_| self.generate(options)).collect()
    }

    /// Samples `length` characters uniformly from a custom alphabet.
    ///
    /// Repeated characters in `alphabet` are proportionally more likely.
    /// `length` must lie within `1..=MAX_LENGTH`.
    pub fn generate_with_custom_set(
        &mut self,
        length: usize,
        alphabet: &str,
    ) -> Result<String, GenerationError> {
        check_bounds("length", length, 1, MAX_LENGTH)?;
        let set: Vec<char> = alphabet.chars().collect();
        if set.is_empty() {
            return Err(GenerationError::EmptyCharacterSet);
        }

        let mut chars: Vec<char> = (0..length).map(|_| self.pick(&set)).collect();

        tracing::debug!(length, alphabet_size = set.len(), "Generated password from custom set");
        Ok(collect_and_wipe(&mut chars))
    }

    /// Generates from a pattern such as `2u3l2n1s`, then shuffles.
    pub fn generate_pattern(&mut self, pattern: &str) -> Result<String, GenerationError> {
        let tokens = parse_pattern(pattern)?;

        let mut chars = Vec::new();
        for token in &tokens {
            let alphabet = token.category.chars();
            for _ in 0..token.count {
                let c = self.pick(&alphabet);
                chars.push(c);
            }
        }
        chars.shuffle(&mut self.rng);

        tracing::debug!(length = chars.len(), tokens = tokens.len(), "Generated password from pattern");
        Ok(collect_and_wipe(&mut chars))
    }

    /// Generates a numeric PIN of 4 to 12 digits.
    pub fn generate_pin(&mut self, length: usize) -> Result<String, GenerationError> {
        check_bounds("PIN length", length, PIN_MIN_LENGTH, PIN_MAX_LENGTH)?;

        let digits = Category::Numbers.chars();
        let mut chars: Vec<char> = (0..length).map(|_| self.pick(&digits)).collect();

        tracing::debug!(length, "Generated PIN");
        Ok(collect_and_wipe(&mut chars))
    }

    /// Generates a password and splits it into groups of four.
    pub fn generate_with_separators(
        &mut self,
        options: &GenerationOptions,
        separator: &str,
    ) -> Result<String, GenerationError> {
        let mut password = self.generate(options)?;
        let mut chars: Vec<char> = password.chars().collect();

        let grouped = chars
            .chunks(SEPARATOR_GROUP)
            .map(|group| group.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(separator);

        chars.zeroize();
        password.zeroize();
        Ok(grouped)
    }

    /// Standard, strong and memorable suggestions for `options`.
    pub fn suggestions(
        &mut self,
        options: &GenerationOptions,
    ) -> Result<Vec<Suggestion>, GenerationError> {
        Ok(vec![
            Suggestion {
                name: "standard",
                password: self.generate(options)?,
                description: "balanced password",
            },
            Suggestion {
                name: "strong",
                password: self.generate(&options.with_length(STRONG_LENGTH))?,
                description: "longer and stronger",
            },
            Suggestion {
                name: "memorable",
                password: self.generate_memorable(options.length)?,
                description: "easy to remember",
            },
        ])
    }

    /// Uniform draw from a non-empty slice.
    pub(super) fn pick(&mut self, chars: &[char]) -> char {
        chars[self.rng.gen_range(0..chars.len())]
    }

    pub(super) fn coin(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }
}

/// Generates one password with a fresh OS-seeded generator.
pub fn generate(options: &GenerationOptions) -> Result<String, GenerationError> {
    Generator::from_os_entropy().generate(options)
}

/// Range check for `usize` inputs that saturates instead of wrapping.
pub(super) fn check_bounds(
    field: &str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<(), RangeError> {
    let widen = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
    RangeError::check(field, widen(value), widen(min), widen(max))?;
    Ok(())
}

/// Builds the output string and wipes the working buffer.
pub(super) fn collect_and_wipe(chars: &mut Vec<char>) -> String {
    let password = chars.iter().collect();
    chars.zeroize();
    password
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CategoryFlags;
    use crate::generation::{MAX_LENGTH, MIN_LENGTH};

    fn seeded() -> Generator {
        Generator::new(PasswordRng::from_seed([7u8; 32]))
    }

    fn only(category: Category, length: usize) -> GenerationOptions {
        let flags = CategoryFlags {
            uppercase: category == Category::Uppercase,
            lowercase: category == Category::Lowercase,
            numbers: category == Category::Numbers,
            symbols: category == Category::Symbols,
        };
        GenerationOptions::new(length, flags)
    }

    #[test]
    fn test_exact_length() {
        let mut generator = seeded();
        for length in [MIN_LENGTH, 12, 33, MAX_LENGTH] {
            let options = GenerationOptions::default().with_length(length);
            let password = generator.generate(&options).unwrap();
            assert_eq!(password.chars().count(), length);
        }
    }

    #[test]
    fn test_every_category_present_at_min_length() {
        let mut generator = seeded();
        let options = GenerationOptions::default().with_length(MIN_LENGTH);
        for _ in 0..200 {
            let password = generator.generate(&options).unwrap();
            for category in Category::ALL {
                assert!(
                    password.chars().any(|c| category.alphabet().contains(c)),
                    "{:?} missing",
                    category
                );
            }
        }
    }

    #[test]
    fn test_single_category_pool() {
        let mut generator = seeded();
        let password = generator.generate(&only(Category::Uppercase, 20)).unwrap();
        assert!(password.chars().all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn test_no_categories_rejected() {
        let options = GenerationOptions::new(10, CategoryFlags::default());
        assert_eq!(
            seeded().generate(&options),
            Err(GenerationError::NoCharacterTypes)
        );
    }

    #[test]
    fn test_invalid_options_aggregated() {
        let options = GenerationOptions::new(2, CategoryFlags::default());
        match seeded().generate(&options) {
            Err(GenerationError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected {:?}", other),
        }

        let err = seeded()
            .generate(&GenerationOptions::default().with_length(65))
            .unwrap_err();
        assert!(err.to_string().contains("between 4 and 64"));
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let options = GenerationOptions::default();
        assert_eq!(
            seeded().generate(&options).unwrap(),
            seeded().generate(&options).unwrap()
        );
    }

    #[test]
    fn test_guaranteed_characters_shuffled() {
        // Uppercase is drawn first, so an unshuffled result would
        // always start with it.
        let mut generator = seeded();
        let options = GenerationOptions::new(
            4,
            CategoryFlags {
                uppercase: true,
                lowercase: true,
                numbers: false,
                symbols: false,
            },
        );
        let starts_lower = (0..100)
            .filter(|_| {
                generator
                    .generate(&options)
                    .unwrap()
                    .starts_with(|c: char| c.is_ascii_lowercase())
            })
            .count();
        assert!(starts_lower > 0);
    }

    #[test]
    fn test_generate_multiple() {
        let passwords = seeded()
            .generate_multiple(5, &GenerationOptions::default())
            .unwrap();
        assert_eq!(passwords.len(), 5);
        assert!(passwords.iter().all(|p| p.len() == 12));
    }

    #[test]
    fn test_custom_set() {
        let password = seeded().generate_with_custom_set(30, "xyz").unwrap();
        assert_eq!(password.len(), 30);
        assert!(password.chars().all(|c| "xyz".contains(c)));

        assert_eq!(
            seeded().generate_with_custom_set(10, ""),
            Err(GenerationError::EmptyCharacterSet)
        );
    }

    #[test]
    fn test_custom_set_length_bounded() {
        for length in [0, MAX_LENGTH + 1, usize::MAX] {
            assert!(matches!(
                seeded().generate_with_custom_set(length, "abc"),
                Err(GenerationError::Range(RangeError::OutOfRange { .. }))
            ));
        }
        assert_eq!(
            seeded().generate_with_custom_set(MAX_LENGTH, "abc").unwrap().len(),
            MAX_LENGTH
        );
    }

    #[test]
    fn test_out_of_range_reports_saturated_value() {
        match seeded().generate_with_custom_set(usize::MAX, "abc") {
            Err(GenerationError::Range(RangeError::OutOfRange { value, .. })) => {
                assert_eq!(value, i64::MAX)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_multiple_count_bounded() {
        let options = GenerationOptions::default();
        for count in [0, MAX_COUNT + 1, usize::MAX] {
            assert!(matches!(
                seeded().generate_multiple(count, &options),
                Err(GenerationError::Range(_))
            ));
        }
        assert_eq!(
            seeded().generate_multiple(MAX_COUNT, &options).unwrap().len(),
            MAX_COUNT
        );
    }

    #[test]
    fn test_custom_set_unicode() {
        let password = seeded().generate_with_custom_set(8, "äöü").unwrap();
        assert_eq!(password.chars().count(), 8);
    }

    #[test]
    fn test_pattern_counts() {
        let password = seeded().generate_pattern("2u3l2n1s").unwrap();
        assert_eq!(password.len(), 8);
        assert_eq!(password.chars().filter(|c| c.is_ascii_uppercase()).count(), 2);
        assert_eq!(password.chars().filter(|c| c.is_ascii_lowercase()).count(), 3);
        assert_eq!(password.chars().filter(|c| c.is_ascii_digit()).count(), 2);
        assert_eq!(
            password
                .chars()
                .filter(|c| Category::Symbols.alphabet().contains(*c))
                .count(),
            1
        );
    }

    #[test]
    fn test_malformed_pattern() {
        assert!(matches!(
            seeded().generate_pattern("2x"),
            Err(GenerationError::MalformedPattern { .. })
        ));
    }

    #[test]
    fn test_pin() {
        let pin = seeded().generate_pin(6).unwrap();
        assert_eq!(pin.len(), 6);
        assert!(pin.chars().all(|c| c.is_ascii_digit()));

        for length in [3, 13] {
            assert!(matches!(
                seeded().generate_pin(length),
                Err(GenerationError::Range(RangeError::OutOfRange { .. }))
            ));
        }
    }

    #[test]
    fn test_separators() {
        let options = GenerationOptions::default().with_length(10);
        let grouped = seeded().generate_with_separators(&options, " ").unwrap();
        let groups: Vec<&str> = grouped.split(' ').collect();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 4);
        assert_eq!(groups[1].len(), 4);
        assert_eq!(groups[2].len(), 2);
    }

    #[test]
    fn test_separators_exact_multiple() {
        let options = GenerationOptions::default().with_length(MAX_LENGTH);
        let grouped = seeded().generate_with_separators(&options, "--").unwrap();

        assert_eq!(grouped.len(), MAX_LENGTH + 2 * (MAX_LENGTH / 4 - 1));
        assert!(grouped
            .char_indices()
            .filter(|(i, _)| i % 6 == 4 || i % 6 == 5)
            .all(|(_, c)| c == '-'));
    }

    #[test]
    fn test_suggestions() {
        let suggestions = seeded().suggestions(&GenerationOptions::default()).unwrap();
        let names: Vec<_> = suggestions.iter().map(|s| s.name).collect();
        assert_eq!(names, ["standard", "strong", "memorable"]);
        assert_eq!(suggestions[1].password.len(), STRONG_LENGTH);
        assert_eq!(suggestions[2].password.len(), 12);
    }

    #[test]
    fn test_free_function() {
        let password = generate(&GenerationOptions::default()).unwrap();
        assert_eq!(password.chars().count(), 12);
    }
}
