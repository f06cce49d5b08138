//! Prometheus metrics for generation and analysis activity.
//!
//! # Metrics Exposed
//!
//! ## Generation
//! - `strongpass_passwords_generated_total` - Passwords produced
//! - `strongpass_generation_errors_total` - Rejected generation requests
//!
//! ## Analysis
//! - `strongpass_analyses_total{tier}` - Passwords analyzed, by tier
//! - `strongpass_last_score` - Score of the most recent analysis
//! - `strongpass_last_entropy_bits` - Entropy of the most recent analysis
//!
//! ## CSPRNG
//! - `strongpass_csprng_reseed_total` - Reseeds performed
//! - `strongpass_csprng_bytes_since_reseed` - Bytes drawn since last reseed
//!
//! # Example
//!
//! ```
//! use strongpass::analysis::analyze;
//! use strongpass::metrics::MetricsRegistry;
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! registry.record_generated(3);
//! registry.record_analysis(&analyze("correct horse"));
//!
//! let text = registry.encode().unwrap();
//! assert!(text.contains("strongpass_passwords_generated_total 3"));
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry, MetricsSnapshot};
