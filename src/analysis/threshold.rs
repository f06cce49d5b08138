//! Score thresholds and the strength tiers they define.
//!
//! Each threshold is the inclusive lower bound of the next tier up.

use serde::{Deserialize, Serialize};

/// Five ordered strength labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StrengthTier {
    /// Score below `weak`.
    VeryWeak,
    /// Score in `weak..medium`.
    Weak,
    /// Score in `medium..strong`.
    Medium,
    /// Score in `strong..very_strong`.
    Strong,
    /// Score at or above `very_strong`.
    VeryStrong,
}

impl StrengthTier {
    /// Display colour token for meters.
    pub fn color(self) -> &'static str {
        match self {
            StrengthTier::VeryWeak => "#dc3545",
            StrengthTier::Weak => "#fd7e14",
            StrengthTier::Medium => "#ffc107",
            StrengthTier::Strong => "#28a745",
            StrengthTier::VeryStrong => "#20c997",
        }
    }

    /// Risk carried by a password in this tier.
    pub fn risk(self) -> RiskLevel {
        match self {
            StrengthTier::VeryWeak => RiskLevel::High,
            StrengthTier::Weak => RiskLevel::MediumHigh,
            StrengthTier::Medium => RiskLevel::Medium,
            StrengthTier::Strong => RiskLevel::Low,
            StrengthTier::VeryStrong => RiskLevel::VeryLow,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            StrengthTier::VeryWeak => "very weak",
            StrengthTier::Weak => "weak",
            StrengthTier::Medium => "medium",
            StrengthTier::Strong => "strong",
            StrengthTier::VeryStrong => "very strong",
        }
    }
}

impl std::fmt::Display for StrengthTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk label, inversely ordered to [`StrengthTier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Very weak password.
    High,
    /// Weak password.
    MediumHigh,
    /// Medium password.
    Medium,
    /// Strong password.
    Low,
    /// Very strong password.
    VeryLow,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RiskLevel::High => "high",
            RiskLevel::MediumHigh => "medium-high",
            RiskLevel::Medium => "medium",
            RiskLevel::Low => "low",
            RiskLevel::VeryLow => "very low",
        })
    }
}

/// Tier boundaries on the 0-100 score scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    /// Lowest score rated [`StrengthTier::Weak`].
    pub weak: u8,
    /// Lowest score rated [`StrengthTier::Medium`].
    pub medium: u8,
    /// Lowest score rated [`StrengthTier::Strong`].
    pub strong: u8,
    /// Lowest score rated [`StrengthTier::VeryStrong`].
    pub very_strong: u8,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            weak: 20,
            medium: 40,
            strong: 60,
            very_strong: 80,
        }
    }
}

impl TierThresholds {
    /// Checks that thresholds are strictly increasing and within 1-100.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let ordered = [self.weak, self.medium, self.strong, self.very_strong];

        if self.weak == 0 || self.very_strong > 100 {
            return Err(ThresholdError::OutOfScale {
                weak: self.weak,
                very_strong: self.very_strong,
            });
        }

        if ordered.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ThresholdError::NotIncreasing {
                weak: self.weak,
                medium: self.medium,
                strong: self.strong,
                very_strong: self.very_strong,
            });
        }

        Ok(())
    }

    /// Maps a score onto its tier.
    pub fn tier(&self, score: u8) -> StrengthTier {
        if score < self.weak {
            StrengthTier::VeryWeak
        } else if score < self.medium {
            StrengthTier::Weak
        } else if score < self.strong {
            StrengthTier::Medium
        } else if score < self.very_strong {
            StrengthTier::Strong
        } else {
            StrengthTier::VeryStrong
        }
    }
}

/// Threshold configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    /// Some threshold is not above the one before it.
    #[error("thresholds must be strictly increasing, got {weak} < {medium} < {strong} < {very_strong}")]
    NotIncreasing {
        /// Configured weak threshold.
        weak: u8,
        /// Configured medium threshold.
        medium: u8,
        /// Configured strong threshold.
        strong: u8,
        /// Configured very strong threshold.
        very_strong: u8,
    },

    /// `weak` is zero or `very_strong` exceeds 100.
    #[error("thresholds must lie within 1..=100, got weak={weak} very_strong={very_strong}")]
    OutOfScale {
        /// Configured weak threshold.
        weak: u8,
        /// Configured very strong threshold.
        very_strong: u8,
    },
}
