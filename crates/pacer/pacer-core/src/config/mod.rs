//! Configuration for every pacer subsystem, loadable from TOML.

pub mod defaults;
mod intake_config;
mod observability_config;
mod registry_config;
mod safety_config;

pub use intake_config::IntakeConfig;
pub use observability_config::ObservabilityConfig;
pub use registry_config::{default_patterns, PatternConfig, RegistryConfig};
pub use safety_config::SafetyConfig;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PacerConfig {
    pub intake: IntakeConfig,
    pub safety: SafetyConfig,
    pub registry: RegistryConfig,
    pub observability: ObservabilityConfig,
}

impl PacerConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: PacerConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: PacerConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.intake.backlog_capacity == 0 {
            return Err(invalid("intake.backlog_capacity", "must be greater than 0"));
        }
        let max_settle = self
            .intake
            .cooldown_ms
            .saturating_mul(defaults::MAX_SETTLE_TO_COOLDOWN_RATIO);
        if self.intake.settle_ms > max_settle {
            return Err(invalid(
                "intake.settle_ms",
                "must not exceed ten times intake.cooldown_ms",
            ));
        }
        if self.safety.window_secs == 0 {
            return Err(invalid("safety.window_secs", "must be greater than 0"));
        }
        if self.safety.max_admissions_per_window == 0 {
            return Err(invalid(
                "safety.max_admissions_per_window",
                "must be greater than 0",
            ));
        }
        if let Some(pattern) = self.registry.patterns.iter().find(|p| p.name.trim().is_empty()) {
            return Err(invalid(
                "registry.patterns.name",
                &format!("pattern bound to {} has an empty name", pattern.signal),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
