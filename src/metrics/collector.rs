//! Metrics collection and registry.

use crate::analysis::{StrengthAnalysis, StrengthTier};
use crate::rng::PasswordRng;
use prometheus::{Encoder, Gauge, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or encoding failed.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Cumulative counts for a bulk update.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    /// Passwords generated so far.
    pub passwords_generated: u64,
    /// Generation requests rejected so far.
    pub generation_errors: u64,
    /// Score of the latest analysis.
    pub last_score: Option<u8>,
    /// Entropy of the latest analysis.
    pub last_entropy_bits: Option<f64>,
    /// Total CSPRNG reseeds performed.
    pub reseed_count: u64,
    /// Bytes drawn since last reseed.
    pub bytes_since_reseed: u64,
}

impl MetricsSnapshot {
    /// Creates a snapshot carrying the RNG's counters.
    pub fn from_rng(rng: &PasswordRng) -> Self {
        Self {
            reseed_count: rng.reseed_count(),
            bytes_since_reseed: rng.bytes_since_reseed(),
            ..Default::default()
        }
    }
}

/// Prometheus registry for password activity.
pub struct MetricsRegistry {
    registry: Registry,

    // Generation
    passwords_generated: IntCounter,
    generation_errors: IntCounter,

    // Analysis
    analyses: IntCounterVec,
    last_score: IntGauge,
    last_entropy_bits: Gauge,

    // CSPRNG
    reseed_total: IntCounter,
    bytes_since_reseed: IntGauge,
}

impl MetricsRegistry {
    /// Creates a registry with every metric registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let passwords_generated = IntCounter::new(
            "strongpass_passwords_generated_total",
            "Total number of passwords generated",
        )?;
        let generation_errors = IntCounter::new(
            "strongpass_generation_errors_total",
            "Total number of rejected generation requests",
        )?;

        let analyses = IntCounterVec::new(
            Opts::new("strongpass_analyses_total", "Total passwords analyzed by tier"),
            &["tier"],
        )?;
        let last_score = IntGauge::new(
            "strongpass_last_score",
            "Score of the most recent analysis (0-100)",
        )?;
        let last_entropy_bits = Gauge::new(
            "strongpass_last_entropy_bits",
            "Entropy estimate of the most recent analysis in bits",
        )?;

        let reseed_total = IntCounter::new(
            "strongpass_csprng_reseed_total",
            "Total number of CSPRNG reseeds performed",
        )?;
        let bytes_since_reseed = IntGauge::new(
            "strongpass_csprng_bytes_since_reseed",
            "Bytes drawn since last CSPRNG reseed",
        )?;

        registry.register(Box::new(passwords_generated.clone()))?;
        registry.register(Box::new(generation_errors.clone()))?;
        registry.register(Box::new(analyses.clone()))?;
        registry.register(Box::new(last_score.clone()))?;
        registry.register(Box::new(last_entropy_bits.clone()))?;
        registry.register(Box::new(reseed_total.clone()))?;
        registry.register(Box::new(bytes_since_reseed.clone()))?;

        Ok(Self {
            registry,
            passwords_generated,
            generation_errors,
            analyses,
            last_score,
            last_entropy_bits,
            reseed_total,
            bytes_since_reseed,
        })
    }

    /// Counts `count` generated passwords.
    pub fn record_generated(&self, count: usize) {
        self.passwords_generated.inc_by(count as u64);
    }

    /// Counts one rejected generation request.
    pub fn record_generation_error(&self) {
        self.generation_errors.inc();
    }

    /// Records one analysis outcome.
    pub fn record_analysis(&self, analysis: &StrengthAnalysis) {
        self.analyses.with_label_values(&[tier_label(analysis.tier)]).inc();
        self.last_score.set(i64::from(analysis.score));
        self.last_entropy_bits.set(analysis.entropy_bits);
    }

    /// Brings counters up to a cumulative snapshot.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        // Counters only move forward, so add the difference.
        let current = self.passwords_generated.get();
        if snapshot.passwords_generated > current {
            self.passwords_generated.inc_by(snapshot.passwords_generated - current);
        }
        let current = self.generation_errors.get();
        if snapshot.generation_errors > current {
            self.generation_errors.inc_by(snapshot.generation_errors - current);
        }

        if let Some(score) = snapshot.last_score {
            self.last_score.set(i64::from(score));
        }
        if let Some(bits) = snapshot.last_entropy_bits {
            self.last_entropy_bits.set(bits);
        }

        let current = self.reseed_total.get();
        if snapshot.reseed_count > current {
            self.reseed_total.inc_by(snapshot.reseed_count - current);
        }
        self.bytes_since_reseed.set(snapshot.bytes_since_reseed as i64);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

fn tier_label(tier: StrengthTier) -> &'static str {
    match tier {
        StrengthTier::VeryWeak => "very_weak",
        StrengthTier::Weak => "weak",
        StrengthTier::Medium => "medium",
        StrengthTier::Strong => "strong",
        StrengthTier::VeryStrong => "very_strong",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;

    #[test]
    fn test_registry_creation() {
        assert!(MetricsRegistry::new().is_ok());
    }

    #[test]
    fn test_record_activity() {
        let registry = MetricsRegistry::new().unwrap();
        registry.record_generated(4);
        registry.record_generation_error();
        registry.record_analysis(&analyze("aaaa"));

        let output = registry.encode().unwrap();
        assert!(output.contains("strongpass_passwords_generated_total 4"));
        assert!(output.contains("strongpass_generation_errors_total 1"));
        assert!(output.contains("strongpass_analyses_total{tier=\"very_weak\"} 1"));
        assert!(output.contains("strongpass_last_score 0"));
    }

    #[test]
    fn test_snapshot_update() {
        let registry = MetricsRegistry::new().unwrap();
        registry.record_generated(2);

        let snapshot = MetricsSnapshot {
            passwords_generated: 5,
            reseed_count: 2,
            bytes_since_reseed: 1024,
            last_score: Some(60),
            ..Default::default()
        };
        registry.update(&snapshot);

        let output = registry.encode().unwrap();
        assert!(output.contains("strongpass_passwords_generated_total 5"));
        assert!(output.contains("strongpass_csprng_reseed_total 2"));
        assert!(output.contains("strongpass_csprng_bytes_since_reseed 1024"));
        assert!(output.contains("strongpass_last_score 60"));
    }

    #[test]
    fn test_snapshot_from_rng() {
        let mut rng = PasswordRng::from_seed([1u8; 32]);
        let mut buf = [0u8; 16];
        rand_core::RngCore::fill_bytes(&mut rng, &mut buf);

        let snapshot = MetricsSnapshot::from_rng(&rng);
        assert_eq!(snapshot.bytes_since_reseed, 16);
        assert_eq!(snapshot.reseed_count, 0);
    }
}
