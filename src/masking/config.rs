//! Masking configuration

use crate::domain::{MaskError, Result};
use crate::masking::policy::{FieldPolicy, DEFAULT_KNOWN_KEYS, DEFAULT_MASKED_KEYS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Field policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Keys whose values are tokenized
    #[serde(default = "default_masked_keys")]
    pub masked_keys: Vec<String>,

    /// Keys whose values pass through unchanged
    #[serde(default = "default_known_keys")]
    pub known_keys: Vec<String>,

    /// Added to `masked_keys`, for extending the defaults
    #[serde(default)]
    pub extra_masked_keys: Vec<String>,

    /// Added to `known_keys`, for extending the defaults
    #[serde(default)]
    pub extra_known_keys: Vec<String>,
}

fn default_masked_keys() -> Vec<String> {
    DEFAULT_MASKED_KEYS.iter().map(|k| k.to_string()).collect()
}

fn default_known_keys() -> Vec<String> {
    DEFAULT_KNOWN_KEYS.iter().map(|k| k.to_string()).collect()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            masked_keys: default_masked_keys(),
            known_keys: default_known_keys(),
            extra_masked_keys: Vec::new(),
            extra_known_keys: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// Build the immutable field policy
    pub fn to_policy(&self) -> Result<FieldPolicy> {
        FieldPolicy::new(
            self.masked_keys.iter().chain(&self.extra_masked_keys).cloned(),
            self.known_keys.iter().chain(&self.extra_known_keys).cloned(),
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.masked_keys.is_empty() && self.extra_masked_keys.is_empty() {
            return Err(MaskError::Validation(
                "policy must mask at least one key".to_string(),
            ));
        }
        self.to_policy().map(|_| ())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ERMASK_POLICY_EXTRA_MASKED_KEYS") {
            self.extra_masked_keys = split_key_list(&val);
        }
        if let Ok(val) = std::env::var("ERMASK_POLICY_EXTRA_KNOWN_KEYS") {
            self.extra_known_keys = split_key_list(&val);
        }
    }
}

fn split_key_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/ermask.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err(MaskError::Validation(
                "audit.log_path must be set when audit is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("ERMASK_AUDIT_ENABLED") {
            self.enabled = val.parse().map_err(|_| {
                MaskError::Configuration(format!("Invalid ERMASK_AUDIT_ENABLED value: {val}"))
            })?;
        }

        if let Ok(val) = std::env::var("ERMASK_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_config() {
        let config = PolicyConfig::default();
        assert_eq!(config.masked_keys.len(), DEFAULT_MASKED_KEYS.len());
        assert_eq!(config.known_keys.len(), DEFAULT_KNOWN_KEYS.len());
        assert!(config.validate().is_ok());
        assert_eq!(config.to_policy().unwrap(), FieldPolicy::default());
    }

    #[test]
    fn test_extra_keys_extend_defaults() {
        let config = PolicyConfig {
            extra_masked_keys: vec!["SSN_LAST".to_string()],
            extra_known_keys: vec!["MATCH_SCORE".to_string()],
            ..PolicyConfig::default()
        };
        let policy = config.to_policy().unwrap();
        assert!(policy.is_masked("SSN_LAST"));
        assert!(policy.is_masked("ENTITY_NAME"));
        assert!(policy.is_known("MATCH_SCORE"));
    }

    #[test]
    fn test_extra_key_conflicting_with_known_rejected() {
        let config = PolicyConfig {
            extra_masked_keys: vec!["STATUS".to_string()],
            ..PolicyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_masked_keys_rejected() {
        let config = PolicyConfig {
            masked_keys: Vec::new(),
            ..PolicyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_split_key_list() {
        assert_eq!(
            split_key_list(" SSN , PASSPORT,,"),
            vec!["SSN".to_string(), "PASSPORT".to_string()]
        );
    }

    #[test]
    fn test_default_audit_config() {
        let config = AuditConfig::default();
        assert!(!config.enabled);
        assert!(config.json_format);
        assert!(config.validate().is_ok());
    }
}
