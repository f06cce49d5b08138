//! Entropy estimation and crack-time projection.
//!
//! Entropy is estimated from the character classes actually present
//! in a password, not from the options that produced it. This is an
//! upper bound under a brute-force model, not a measure of how the
//! password was chosen.

use super::patterns::CharClasses;
use serde::{Serialize, Serializer};

/// Assumed attacker throughput for crack-time projection.
pub const GUESSES_PER_SECOND: f64 = 1e12;

const LOWERCASE_CLASS_SIZE: usize = 26;
const UPPERCASE_CLASS_SIZE: usize = 26;
const DIGIT_CLASS_SIZE: usize = 10;
const SYMBOL_CLASS_SIZE: usize = 32;

const MINUTE: f64 = 60.0;
const HOUR: f64 = 3_600.0;
const DAY: f64 = 86_400.0;
const MONTH: f64 = 2_592_000.0;
const YEAR: f64 = 31_536_000.0;
const CENTURY: f64 = 3_153_600_000.0;

/// Sums the class sizes for every class present, floored at 1.
pub fn char_set_size(password: &str) -> usize {
    let classes = CharClasses::of(password);
    let size = [
        (classes.lowercase, LOWERCASE_CLASS_SIZE),
        (classes.uppercase, UPPERCASE_CLASS_SIZE),
        (classes.digit, DIGIT_CLASS_SIZE),
        (classes.symbol, SYMBOL_CLASS_SIZE),
    ]
    .into_iter()
    .filter_map(|(present, size)| present.then_some(size))
    .sum::<usize>();

    size.max(1)
}

/// Estimated entropy in bits: `log2(size^length)`.
///
/// Computed as `length * log2(size)` so long inputs cannot overflow.
pub fn entropy_bits(password: &str) -> f64 {
    let length = password.chars().count();
    if length == 0 {
        return 0.0;
    }
    length as f64 * (char_set_size(password) as f64).log2()
}

/// Bucketed time to exhaust the search space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrackTime {
    /// Under one second.
    Instant,
    /// Under a minute.
    Seconds(u64),
    /// Under an hour.
    Minutes(u64),
    /// Under a day.
    Hours(u64),
    /// Under 30 days.
    Days(u64),
    /// Under a year.
    Months(u64),
    /// Under a century.
    Years(u64),
    /// A century or more.
    BillionsOfYears,
}

impl CrackTime {
    /// Projects crack time for `bits` of entropy at [`GUESSES_PER_SECOND`].
    pub fn from_bits(bits: f64) -> Self {
        Self::from_seconds(bits.exp2() / GUESSES_PER_SECOND)
    }

    /// Buckets a duration in seconds.
    pub fn from_seconds(seconds: f64) -> Self {
        let round = |unit: f64| (seconds / unit).round() as u64;

        if seconds < 1.0 {
            CrackTime::Instant
        } else if seconds < MINUTE {
            CrackTime::Seconds(round(1.0))
        } else if seconds < HOUR {
            CrackTime::Minutes(round(MINUTE))
        } else if seconds < DAY {
            CrackTime::Hours(round(HOUR))
        } else if seconds < MONTH {
            CrackTime::Days(round(DAY))
        } else if seconds < YEAR {
            CrackTime::Months(round(MONTH))
        } else if seconds < CENTURY {
            CrackTime::Years(round(YEAR))
        } else {
            CrackTime::BillionsOfYears
        }
    }
}

impl std::fmt::Display for CrackTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (count, unit) = match *self {
            CrackTime::Instant => return f.write_str("instant"),
            CrackTime::BillionsOfYears => return f.write_str("billions of years"),
            CrackTime::Seconds(n) => (n, "second"),
            CrackTime::Minutes(n) => (n, "minute"),
            CrackTime::Hours(n) => (n, "hour"),
            CrackTime::Days(n) => (n, "day"),
            CrackTime::Months(n) => (n, "month"),
            CrackTime::Years(n) => (n, "year"),
        };
        let plural = if count == 1 { "" } else { "s" };
        write!(f, "{} {}{}", count, unit, plural)
    }
}

impl Serialize for CrackTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
