//! Configuration file loading.
//!
//! Every section is optional and falls back to its defaults. The file
//! is validated as a whole on load, and the result is converted into
//! the explicit values the library functions take.

use crate::analysis::{StrengthAnalyzer, ThresholdError, TierThresholds};
use crate::charset::CategoryFlags;
use crate::generation::{GenerationOptions, DEFAULT_LENGTH, MAX_COUNT};
use crate::validation::validate_generation_options;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The file is not valid TOML for this format.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
    /// The `[generation]` section fails option validation.
    #[error("invalid generation settings: {}", .0.join(", "))]
    InvalidOptions(Vec<String>),
    /// `count` is outside `1..=MAX_COUNT`.
    #[error("count must be between 1 and {max}, got {count}")]
    InvalidCount {
        /// The configured count.
        count: usize,
        /// Largest accepted count.
        max: usize,
    },
    /// The `[analysis]` thresholds are misordered or off scale.
    #[error(transparent)]
    Thresholds(#[from] ThresholdError),
}

/// Full configuration file format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    /// `[generation]` defaults.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// `[analysis]` tier thresholds.
    #[serde(default)]
    pub analysis: TierThresholds,
    /// `[output]` settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Default generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Password length.
    pub length: usize,
    /// Include `A`-`Z`.
    pub uppercase: bool,
    /// Include `a`-`z`.
    pub lowercase: bool,
    /// Include `0`-`9`.
    pub numbers: bool,
    /// Include punctuation.
    pub symbols: bool,
    /// Passwords per `generate` invocation, `1..=MAX_COUNT`.
    pub count: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
            count: 1,
        }
    }
}

impl GenerationConfig {
    /// Converts to generation options.
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions::new(
            self.length,
            CategoryFlags {
                uppercase: self.uppercase,
                lowercase: self.lowercase,
                numbers: self.numbers,
                symbols: self.symbols,
            },
        )
    }

    /// Validates the settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let validation = validate_generation_options(&self.options());
        if !validation.valid {
            return Err(ConfigError::InvalidOptions(validation.errors));
        }
        if !(1..=MAX_COUNT).contains(&self.count) {
            return Err(ConfigError::InvalidCount {
                count: self.count,
                max: MAX_COUNT,
            });
        }
        Ok(())
    }
}

/// Output configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Print results as JSON.
    pub json: bool,
    /// Print Prometheus metrics after each command.
    pub metrics: bool,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config = Self::from_toml(&content)?;
        tracing::info!(path = %path.as_ref().display(), "Loaded configuration");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()?;
        self.analysis.validate()?;
        Ok(())
    }

    /// Generation options from the `[generation]` section.
    pub fn generation_options(&self) -> GenerationOptions {
        self.generation.options()
    }

    /// Analyzer configured with the `[analysis]` thresholds.
    pub fn analyzer(&self) -> StrengthAnalyzer {
        StrengthAnalyzer::new(self.analysis)
    }
}
