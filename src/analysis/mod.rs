//! Password strength analysis.
//!
//! Scores passwords on a 0-100 scale, estimates brute-force entropy,
//! detects sequences and common passwords, and projects crack time.
//! Every function here is total: any string, including the empty
//! string, produces a result.

mod breach;
mod entropy;
pub mod patterns;
mod report;
mod strength;
mod threshold;

pub use breach::{BreachSource, CompromiseCheck, LocalBreachList};
pub use entropy::{char_set_size, entropy_bits, CrackTime, GUESSES_PER_SECOND};
pub use patterns::{has_pattern, COMMON_PASSWORDS};
pub use report::{mask, BatchEntry, SecurityReport, GENERAL_ADVICE};
pub use strength::{
    analyze, Recommendation, StrengthAnalysis, StrengthAnalyzer, StrengthChecks, StrengthMeter,
};
pub use threshold::{RiskLevel, StrengthTier, ThresholdError, TierThresholds};
