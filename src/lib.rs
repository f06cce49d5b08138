//! Strongpass Library
//!
//! Cryptographically secure password generation, heuristic strength
//! analysis and input validation for a password-manager style
//! application.
//!
//! # Architecture
//!
//! ```text
//! charset ─→ generation ←─ rng
//!               ↓
//!           validation ←→ analysis
//!               ↓            ↓
//!            config       metrics
//! ```
//!
//! # Design Principles
//!
//! - **CSPRNG only**: every random choice comes from ChaCha20 seeded by the OS
//! - **Unbiased sampling**: rejection-sampled indices and Fisher-Yates shuffles
//! - **Total analysis**: any string, including the empty string, is scored
//! - **Validation as data**: validators report violations rather than fail
//! - **No global state**: options and thresholds are passed explicitly
//!
//! # Example
//!
//! ```
//! use strongpass::{analyze, GenerationOptions, Generator, StrengthTier};
//!
//! let mut generator = Generator::from_os_entropy();
//! let options = GenerationOptions::default().with_length(16);
//!
//! let password = generator.generate(&options).unwrap();
//! assert_eq!(password.chars().count(), 16);
//!
//! let analysis = analyze(&password);
//! assert!(analysis.tier >= StrengthTier::Medium);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod charset;
pub mod config;
pub mod generation;
pub mod metrics;
pub mod rng;
pub mod validation;

// Re-export commonly used types at crate root
pub use analysis::{analyze, StrengthAnalysis, StrengthAnalyzer, StrengthTier, TierThresholds};
pub use charset::{Category, CategoryFlags};
pub use config::{ConfigError, FileConfig};
pub use generation::{generate, GenerationError, GenerationOptions, Generator};
pub use rng::PasswordRng;
pub use validation::{validate_generation_options, validate_password, ValidationResult};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
