//! Configuration schema types
//!
//! This module defines the configuration structure for ermask.

use crate::masking::config::{AuditConfig, PolicyConfig};
use serde::{Deserialize, Serialize};

/// Main ermask configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErmaskConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Field classification policy
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Output formatting
    #[serde(default)]
    pub output: OutputConfig,

    /// Audit logging
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ErmaskConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.policy.validate().map_err(|e| e.to_string())?;
        self.audit.validate().map_err(|e| e.to_string())?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Output formatting for masked documents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print masked JSON with two-space indentation
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must be set when local logging is enabled".to_string());
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ErmaskConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert!(config.output.pretty);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ErmaskConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.policy.masked_keys.len(), 12);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ErmaskConfig::default();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = ErmaskConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_errors_surface() {
        let mut config = ErmaskConfig::default();
        config.policy.extra_known_keys = vec!["EMAIL".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.contains("EMAIL"));
    }
}
