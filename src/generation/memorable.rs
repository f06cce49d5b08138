//! Pronounceable passwords built from alternating vowels and consonants.

use super::generator::{check_bounds, collect_and_wipe, GenerationError, Generator};
use super::options::{MAX_LENGTH, MIN_LENGTH};
use rand_core::{CryptoRng, RngCore};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];
const CONSONANTS: &[char] = &[
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w',
    'x', 'y', 'z',
];
const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const MEMORABLE_SYMBOLS: &[char] = &['!', '@', '#', '$'];

/// Chance of inserting a digit or symbol after each letter.
const EXTRA_PROBABILITY: f64 = 0.1;

impl<R: RngCore + CryptoRng> Generator<R> {
    /// Generates a pronounceable password of exactly `length` characters.
    ///
    /// Letters alternate between vowels and consonants from a random
    /// start. After each letter there is a small chance of inserting a
    /// digit or one of `!@#$`. The result is not shuffled.
    pub fn generate_memorable(&mut self, length: usize) -> Result<String, GenerationError> {
        check_bounds("memorable length", length, MIN_LENGTH, MAX_LENGTH)?;

        let mut chars = Vec::with_capacity(length + 1);
        let mut vowel = self.coin(0.5);

        while chars.len() < length {
            let letter = self.pick(if vowel { VOWELS } else { CONSONANTS });
            chars.push(letter);

            if chars.len() + 1 < length && self.coin(EXTRA_PROBABILITY) {
                let extra = if self.coin(0.5) {
                    self.pick(DIGITS)
                } else {
                    self.pick(MEMORABLE_SYMBOLS)
                };
                chars.push(extra);
            }
            vowel = !vowel;
        }
        chars.truncate(length);

        tracing::debug!(length, "Generated memorable password");
        Ok(collect_and_wipe(&mut chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PasswordRng;

    fn seeded() -> Generator {
        Generator::new(PasswordRng::from_seed([3u8; 32]))
    }

    #[test]
    fn test_exact_length() {
        let mut generator = seeded();
        for length in [MIN_LENGTH, 9, 12, MAX_LENGTH] {
            for _ in 0..20 {
                assert_eq!(generator.generate_memorable(length).unwrap().len(), length);
            }
        }
    }

    #[test]
    fn test_letters_alternate() {
        let mut generator = seeded();
        for _ in 0..50 {
            let password = generator.generate_memorable(16).unwrap();
            let letters: Vec<char> = password.chars().filter(|c| c.is_ascii_lowercase()).collect();
            for pair in letters.windows(2) {
                assert_ne!(VOWELS.contains(&pair[0]), VOWELS.contains(&pair[1]), "{}", password);
            }
        }
    }

    #[test]
    fn test_alphabet() {
        let mut generator = seeded();
        let password = generator.generate_memorable(64).unwrap();
        assert!(password
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "!@#$".contains(c)));
    }

    #[test]
    fn test_length_bounds() {
        assert!(matches!(
            seeded().generate_memorable(3),
            Err(GenerationError::Range(_))
        ));
        assert!(matches!(
            seeded().generate_memorable(65),
            Err(GenerationError::Range(_))
        ));
        assert!(matches!(
            seeded().generate_memorable(usize::MAX),
            Err(GenerationError::Range(_))
        ));
    }
}
