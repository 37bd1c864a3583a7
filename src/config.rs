//! Engine configuration parameters
//!
//! Tunables for presentation thresholds and persistence naming.  The
//! accounting arithmetic itself has no knobs.  Hosts may supply a JSON
//! document; every field is optional and falls back to the default.

use serde::{Deserialize, Serialize};

/// Core engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // --- Persistence ---
    /// File name of the status snapshot inside the data directory
    pub status_file_name: String,

    // --- Gauge tiers (fraction of a full cylinder) ---
    /// Above this the gauge is green
    pub gauge_high_threshold: f64,
    /// Above this the gauge is yellow-green
    pub gauge_good_threshold: f64,
    /// Above this the gauge is orange-red
    pub gauge_low_threshold: f64,
    /// Above this the gauge is red; at or below, dark red
    pub gauge_critical_threshold: f64,

    // --- Fuel fraction ---
    /// Reported when the fraction is undefined (zero capacity or not in Run)
    pub empty_fraction: f64,

    // --- Mode slider ---
    /// Slider position (0–100) that must be exceeded on release
    pub slider_engage_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            status_file_name: String::from("StatusFile.txt"),

            gauge_high_threshold: 0.45,
            gauge_good_threshold: 0.25,
            gauge_low_threshold: 0.15,
            gauge_critical_threshold: 0.10,

            empty_fraction: 0.0,

            slider_engage_threshold: 95.0,
        }
    }
}

/// Errors from loading or validating an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The JSON document did not parse.  Carries the parser message.
    Parse(String),
    /// A field failed range validation.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Parse(_) => Self::Config("config document did not parse"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = self.status_file_name.as_str();
        if name.is_empty() || name == "." || name == ".." {
            return Err(ConfigError::ValidationFailed(
                "status_file_name must be a plain file name",
            ));
        }
        if name.contains(['/', '\\']) {
            return Err(ConfigError::ValidationFailed(
                "status_file_name must not contain path separators",
            ));
        }

        let tiers = [
            self.gauge_high_threshold,
            self.gauge_good_threshold,
            self.gauge_low_threshold,
            self.gauge_critical_threshold,
        ];
        if tiers.iter().any(|t| !(*t > 0.0 && *t < 1.0)) {
            return Err(ConfigError::ValidationFailed(
                "gauge thresholds must be within (0.0, 1.0)",
            ));
        }
        if tiers.windows(2).any(|w| w[0] <= w[1]) {
            return Err(ConfigError::ValidationFailed(
                "gauge thresholds must be strictly descending",
            ));
        }

        if !(0.0..=1.0).contains(&self.empty_fraction) {
            return Err(ConfigError::ValidationFailed(
                "empty_fraction must be 0.0–1.0",
            ));
        }
        if !(self.slider_engage_threshold > 0.0 && self.slider_engage_threshold <= 100.0) {
            return Err(ConfigError::ValidationFailed(
                "slider_engage_threshold must be within (0, 100]",
            ));
        }
        Ok(())
    }
}
