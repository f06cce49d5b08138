//! Security reports and batch analysis.

use super::breach::{BreachSource, CompromiseCheck, LocalBreachList};
use super::strength::{StrengthAnalysis, StrengthAnalyzer};
use super::threshold::RiskLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;

const MASK_VISIBLE_CHARS: usize = 3;

/// General advice appended to every report.
pub const GENERAL_ADVICE: [&str; 4] = [
    "change your passwords regularly",
    "use a different password for every account",
    "enable two-factor authentication",
    "use a password manager",
];

/// A point-in-time security report for one password.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityReport {
    /// When the report was built.
    pub timestamp: DateTime<Utc>,
    /// First characters of the password followed by `***`.
    pub masked_password: String,
    /// Full strength analysis.
    #[serde(flatten)]
    pub analysis: StrengthAnalysis,
    /// Found in the breach source.
    pub compromised: bool,
    /// Risk derived from the score.
    pub risk_level: RiskLevel,
    /// Fixed general advice.
    pub advice: Vec<&'static str>,
}

/// One element of a batch analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    /// Position in the input sequence.
    pub index: usize,
    /// First characters of the password followed by `***`.
    pub masked_password: String,
    /// Full strength analysis.
    #[serde(flatten)]
    pub analysis: StrengthAnalysis,
}

/// Keeps the first three characters and hides the rest.
pub fn mask(password: &str) -> String {
    let visible: String = password.chars().take(MASK_VISIBLE_CHARS).collect();
    format!("{}***", visible)
}

impl StrengthAnalyzer {
    /// Checks the password against the local common-password list.
    pub fn check_compromised(&self, password: &str) -> CompromiseCheck {
        LocalBreachList::default().check(password)
    }

    /// Builds a report using the local breach list.
    pub fn report(&self, password: &str) -> SecurityReport {
        self.report_with(password, &LocalBreachList::default())
    }

    /// Builds a report using a caller-supplied breach source.
    pub fn report_with<B: BreachSource + ?Sized>(&self, password: &str, source: &B) -> SecurityReport {
        let analysis = self.analyze(password);
        let compromised = source.check(password).compromised;
        let risk_level = self.risk_level(analysis.score);

        if compromised {
            tracing::debug!(score = analysis.score, "Report flagged compromised password");
        }

        SecurityReport {
            timestamp: Utc::now(),
            masked_password: mask(password),
            analysis,
            compromised,
            risk_level,
            advice: GENERAL_ADVICE.to_vec(),
        }
    }

    /// Analyzes every password, tagging each result with its index.
    pub fn analyze_batch<S: AsRef<str>>(&self, passwords: &[S]) -> Vec<BatchEntry> {
        passwords
            .iter()
            .enumerate()
            .map(|(index, password)| BatchEntry {
                index,
                masked_password: mask(password.as_ref()),
                analysis: self.analyze(password.as_ref()),
            })
            .collect()
    }
}
