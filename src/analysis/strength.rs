//! Password scoring.
//!
//! # Score Model
//!
//! Contributions are summed, clamped to 0-100 and rounded:
//!
//! | Contribution | Value |
//! |---|---|
//! | Length (only at 8+ chars) | `min(2 * length, 25)` |
//! | Variety | `6` per character class present |
//! | Uniqueness | `min(20 * distinct / length, 20)` |
//! | Contains a common password | `-15` |
//! | Sequence or repeated run | `-15` |
//! | 12+ chars and 3+ classes | `+10` |
//! | 16+ chars and 4 classes | `+15` |

use super::entropy::{entropy_bits, CrackTime};
use super::patterns::{contains_common, has_pattern, CharClasses};
use super::threshold::{RiskLevel, StrengthTier, TierThresholds};
use serde::{Serialize, Serializer};
use std::collections::HashSet;

const LENGTH_SCORE_MIN_LENGTH: usize = 8;
const LENGTH_SCORE_CAP: f64 = 25.0;
const VARIETY_WEIGHT: f64 = 6.0;
const UNIQUENESS_CAP: f64 = 20.0;
const COMMON_PENALTY: f64 = 15.0;
const PATTERN_PENALTY: f64 = 15.0;
const LONG_MIXED_BONUS: f64 = 10.0;
const VERY_LONG_FULL_BONUS: f64 = 15.0;

/// Individual facts the score was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StrengthChecks {
    /// Length in characters.
    pub length: usize,
    /// Distinct characters.
    pub distinct_characters: usize,
    /// Character classes present, 0 to 4.
    pub variety_count: u8,
    /// Distinct characters as a rounded percentage of length.
    pub uniqueness_percent: u8,
    /// Contains `a`-`z`.
    pub has_lowercase: bool,
    /// Contains `A`-`Z`.
    pub has_uppercase: bool,
    /// Contains `0`-`9`.
    pub has_numbers: bool,
    /// Contains anything outside `[A-Za-z0-9]`.
    pub has_symbols: bool,
    /// Contains an entry of the common-password list.
    pub is_common: bool,
    /// Contains a sequence, keyboard walk or repeated run.
    pub has_pattern: bool,
}

/// A suggested improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Shorter than 8 characters.
    UseAtLeastEightCharacters,
    /// Shorter than 12 characters.
    UseLongerPassword,
    /// Fewer than three character classes.
    MixCharacterTypes,
    /// Under 80% distinct characters.
    AvoidRepeatedCharacters,
    /// Contains a sequence or repeated run.
    AvoidSequences,
    /// Contains a common password.
    AvoidCommonPasswords,
    /// No uppercase letter.
    AddUppercase,
    /// No lowercase letter.
    AddLowercase,
    /// No digit.
    AddDigit,
    /// No symbol.
    AddSymbol,
}

impl Recommendation {
    /// Display text.
    pub fn message(self) -> &'static str {
        match self {
            Recommendation::UseAtLeastEightCharacters => "use at least 8 characters",
            Recommendation::UseLongerPassword => "longer passwords are more secure",
            Recommendation::MixCharacterTypes => {
                "mix uppercase, lowercase, digits and symbols"
            }
            Recommendation::AvoidRepeatedCharacters => "avoid repeated characters",
            Recommendation::AvoidSequences => "avoid sequences such as 123 or abc",
            Recommendation::AvoidCommonPasswords => {
                "avoid common passwords such as 123456 or password"
            }
            Recommendation::AddUppercase => "add at least one uppercase letter",
            Recommendation::AddLowercase => "add at least one lowercase letter",
            Recommendation::AddDigit => "add at least one digit",
            Recommendation::AddSymbol => "add at least one special character",
        }
    }

    /// Every recommendation that applies, in display order.
    pub fn for_checks(checks: &StrengthChecks) -> Vec<Recommendation> {
        let rules = [
            (checks.length < 8, Recommendation::UseAtLeastEightCharacters),
            (checks.length < 12, Recommendation::UseLongerPassword),
            (checks.variety_count < 3, Recommendation::MixCharacterTypes),
            (
                checks.length > 0 && checks.uniqueness_percent < 80,
                Recommendation::AvoidRepeatedCharacters,
            ),
            (checks.has_pattern, Recommendation::AvoidSequences),
            (checks.is_common, Recommendation::AvoidCommonPasswords),
            (!checks.has_uppercase, Recommendation::AddUppercase),
            (!checks.has_lowercase, Recommendation::AddLowercase),
            (!checks.has_numbers, Recommendation::AddDigit),
            (!checks.has_symbols, Recommendation::AddSymbol),
        ];

        rules
            .into_iter()
            .filter_map(|(applies, recommendation)| applies.then_some(recommendation))
            .collect()
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Full analysis of one password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrengthAnalysis {
    /// Overall score, 0 to 100.
    pub score: u8,
    /// Tier for the score.
    pub tier: StrengthTier,
    /// Brute-force entropy estimate.
    pub entropy_bits: f64,
    /// Projected time to exhaust the search space.
    pub crack_time: CrackTime,
    /// Facts the score was built from.
    pub checks: StrengthChecks,
    /// Suggested improvements, in display order.
    pub recommendations: Vec<Recommendation>,
}

/// Compact view for live strength meters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrengthMeter {
    /// Overall score, 0 to 100.
    pub score: u8,
    /// Tier for the score.
    pub tier: StrengthTier,
    /// Below the weak threshold.
    pub is_weak: bool,
    /// At or above the strong threshold.
    pub is_strong: bool,
    /// Colour token for the tier.
    pub color: &'static str,
    /// Meter fill, equal to the score.
    pub width_percent: u8,
}

/// Scores passwords against a set of tier thresholds.
///
/// Analysis is a pure function of the input: no randomness and no
/// state, so one analyzer can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct StrengthAnalyzer {
    thresholds: TierThresholds,
}

impl StrengthAnalyzer {
    /// Creates an analyzer with custom thresholds.
    pub fn new(thresholds: TierThresholds) -> Self {
        Self { thresholds }
    }

    /// Returns the thresholds in use.
    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    /// Analyzes a password. Never fails; the empty string scores 0.
    pub fn analyze(&self, password: &str) -> StrengthAnalysis {
        let checks = Self::checks(password);
        let score = Self::score(&checks);
        let tier = self.thresholds.tier(score);
        let bits = entropy_bits(password);

        tracing::debug!(
            length = checks.length,
            score,
            tier = %tier,
            entropy_bits = bits,
            "Analyzed password"
        );

        StrengthAnalysis {
            score,
            tier,
            entropy_bits: bits,
            crack_time: CrackTime::from_bits(bits),
            checks,
            recommendations: Recommendation::for_checks(&checks),
        }
    }

    /// Analyzes a possibly absent password, treating `None` as empty.
    pub fn analyze_optional(&self, password: Option<&str>) -> StrengthAnalysis {
        self.analyze(password.unwrap_or_default())
    }

    /// Meter view of a password, or `None` when it is empty.
    pub fn meter(&self, password: &str) -> Option<StrengthMeter> {
        if password.is_empty() {
            return None;
        }

        let analysis = self.analyze(password);
        Some(StrengthMeter {
            score: analysis.score,
            tier: analysis.tier,
            is_weak: analysis.score < self.thresholds.weak,
            is_strong: analysis.score >= self.thresholds.strong,
            color: analysis.tier.color(),
            width_percent: analysis.score,
        })
    }

    /// Colour token for a score.
    pub fn color(&self, score: u8) -> &'static str {
        self.thresholds.tier(score).color()
    }

    /// Risk level for a score.
    pub fn risk_level(&self, score: u8) -> RiskLevel {
        self.thresholds.tier(score).risk()
    }

    fn checks(password: &str) -> StrengthChecks {
        let length = password.chars().count();
        let classes = CharClasses::of(password);
        let distinct = password.chars().collect::<HashSet<_>>().len();
        let uniqueness_percent = if length == 0 {
            0
        } else {
            (distinct as f64 * 100.0 / length as f64).round() as u8
        };

        StrengthChecks {
            length,
            distinct_characters: distinct,
            variety_count: classes.count(),
            uniqueness_percent,
            has_lowercase: classes.lowercase,
            has_uppercase: classes.uppercase,
            has_numbers: classes.digit,
            has_symbols: classes.symbol,
            is_common: contains_common(password),
            has_pattern: has_pattern(password),
        }
    }

    fn score(checks: &StrengthChecks) -> u8 {
        if checks.length == 0 {
            return 0;
        }

        let length = checks.length as f64;
        let variety = checks.variety_count;
        let mut score = 0.0;

        if checks.length >= LENGTH_SCORE_MIN_LENGTH {
            score += (length * 2.0).min(LENGTH_SCORE_CAP);
        }

        score += f64::from(variety) * VARIETY_WEIGHT;
        score += (checks.distinct_characters as f64 * UNIQUENESS_CAP / length).min(UNIQUENESS_CAP);

        if checks.is_common {
            score -= COMMON_PENALTY;
        }
        if checks.has_pattern {
            score -= PATTERN_PENALTY;
        }

        if checks.length >= 12 && variety >= 3 {
            score += LONG_MIXED_BONUS;
        }
        if checks.length >= 16 && variety >= 4 {
            score += VERY_LONG_FULL_BONUS;
        }

        score.clamp(0.0, 100.0).round() as u8
    }
}

/// Analyzes with the default thresholds.
pub fn analyze(password: &str) -> StrengthAnalysis {
    StrengthAnalyzer::default().analyze(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_weakest() {
        let analysis = analyze("");
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.tier, StrengthTier::VeryWeak);
        assert_eq!(analysis.entropy_bits, 0.0);
        assert_eq!(analysis.crack_time, CrackTime::Instant);
        assert_eq!(analysis.checks.length, 0);
    }

    #[test]
    fn test_none_treated_as_empty() {
        let analyzer = StrengthAnalyzer::default();
        assert_eq!(analyzer.analyze_optional(None), analyzer.analyze(""));
    }

    #[test]
    fn test_short_repeated_scores_below_mixed() {
        let weak = analyze("aaaa");
        let mixed = analyze("aB3!xY9#");
        assert_eq!(weak.score, 0);
        assert_eq!(mixed.score, 60);
        assert!(weak.score < mixed.score);
    }

    #[test]
    fn test_common_password_penalized() {
        let analysis = analyze("password123");
        assert!(analysis.checks.is_common);
        assert!(analysis.checks.has_pattern);
        assert_eq!(analysis.score, 22);
        assert!(analysis.tier <= StrengthTier::Weak);
    }

    #[test]
    fn test_sequences_detected() {
        assert!(analyze("abc12345").checks.has_pattern);
    }

    #[test]
    fn test_tier_boundary_fixtures() {
        let cases = [
            ("a1a1a", 20, StrengthTier::Weak),
            ("a1b2a1b2a1", 40, StrengthTier::Medium),
            ("aB3!xY9#aB", 60, StrengthTier::Strong),
            ("aB3!xYaB3!xYaB3!xYaB", 80, StrengthTier::VeryStrong),
        ];
        for (password, score, tier) in cases {
            let analysis = analyze(password);
            assert_eq!(analysis.score, score, "{password}");
            assert_eq!(analysis.tier, tier, "{password}");
        }
    }

    #[test]
    fn test_bonuses_stack() {
        // 16 distinct chars, 4 classes: 25 + 24 + 20 + 10 + 15.
        let analysis = analyze("Gk7#Rw2!Tz9@Mq4$");
        assert!(!analysis.checks.has_pattern);
        assert_eq!(analysis.score, 94);
        assert_eq!(analysis.tier, StrengthTier::VeryStrong);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let analyzer = StrengthAnalyzer::default();
        assert_eq!(analyzer.analyze("Tr0ub4dor&3"), analyzer.analyze("Tr0ub4dor&3"));
    }

    #[test]
    fn test_recommendations_follow_checks() {
        let analysis = analyze("password123");
        assert_eq!(
            analysis.recommendations,
            vec![
                Recommendation::UseLongerPassword,
                Recommendation::MixCharacterTypes,
                Recommendation::AvoidSequences,
                Recommendation::AvoidCommonPasswords,
                Recommendation::AddUppercase,
                Recommendation::AddSymbol,
            ]
        );
    }

    #[test]
    fn test_uniqueness_percent() {
        assert_eq!(analyze("abab").checks.uniqueness_percent, 50);
        assert_eq!(analyze("Zq9!").checks.uniqueness_percent, 100);
    }

    #[test]
    fn test_meter() {
        let analyzer = StrengthAnalyzer::default();
        assert!(analyzer.meter("").is_none());

        let meter = analyzer.meter("aB3!xY9#").unwrap();
        assert_eq!(meter.tier, StrengthTier::Strong);
        assert!(meter.is_strong);
        assert!(!meter.is_weak);
        assert_eq!(meter.color, "#28a745");
        assert_eq!(meter.width_percent, 60);
    }

    #[test]
    fn test_custom_thresholds() {
        let analyzer = StrengthAnalyzer::new(TierThresholds {
            weak: 10,
            medium: 30,
            strong: 50,
            very_strong: 70,
        });
        assert_eq!(analyzer.analyze("aB3!xY9#").tier, StrengthTier::Strong);
        assert_eq!(analyzer.risk_level(75), RiskLevel::VeryLow);
    }
}
