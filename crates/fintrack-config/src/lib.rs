//! Configuration management for fintrack
//!
//! This module handles loading, validation, and management of
//! fintrack configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Policy applied when a transaction references a category id that is
/// absent from the user's category list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategoryPolicy {
    /// Exclude the transaction from aggregation and log a warning
    Skip,
    /// Fail the whole report request
    Fail,
}

impl Default for UnknownCategoryPolicy {
    fn default() -> Self {
        UnknownCategoryPolicy::Skip
    }
}

impl std::str::FromStr for UnknownCategoryPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(UnknownCategoryPolicy::Skip),
            "fail" => Ok(UnknownCategoryPolicy::Fail),
            _ => Err(format!("Invalid unknown-category policy: {}", s)),
        }
    }
}

impl std::fmt::Display for UnknownCategoryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnknownCategoryPolicy::Skip => write!(f, "skip"),
            UnknownCategoryPolicy::Fail => write!(f, "fail"),
        }
    }
}

/// Reporting engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// How to handle transactions whose category cannot be resolved
    #[serde(default)]
    pub unknown_category_policy: UnknownCategoryPolicy,
    /// Re-check record status even though stores pre-filter deleted rows
    #[serde(default = "default_true")]
    pub defensive_status_check: bool,
    /// Largest accepted client UTC offset, in whole hours
    #[serde(default = "default_max_offset_hours")]
    pub max_client_offset_hours: i64,
}

fn default_true() -> bool {
    true
}

fn default_max_offset_hours() -> i64 {
    18
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            unknown_category_policy: UnknownCategoryPolicy::default(),
            defensive_status_check: true,
            max_client_offset_hours: default_max_offset_hours(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Reporting engine settings
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_string_lossy().to_string(),
        })?;

        let config: Config =
            serde_yaml::from_str(&content).map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Real-world offsets stay within UTC-12..UTC+14
        if self.reporting.max_client_offset_hours < 14
            || self.reporting.max_client_offset_hours > 24
        {
            return Err(ConfigError::InvalidValue {
                field: "reporting.max_client_offset_hours".to_string(),
                reason: "Max client offset must be between 14 and 24 hours".to_string(),
            });
        }

        match self.logging.level.as_str() {
            "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "logging.level".to_string(),
                    reason: format!("Unknown log level: {}", other),
                });
            }
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }
}

// ==================== Tests ====================
