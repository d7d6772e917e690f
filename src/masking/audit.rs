//! Audit logger for masking sessions
//!
//! Records which tokens a session issued for a source, with SHA-256 hashes in
//! place of the original values.

use crate::domain::{MaskError, Result};
use crate::masking::config::AuditConfig;
use crate::masking::engine::MaskingEngine;
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    session_id: String,
    source: String,
    tokens_issued: usize,
    unknown_fields: usize,
    tokens: Vec<AuditToken>,
}

/// Audit token entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditToken {
    token: String,
    key: String,
    /// SHA-256 hash of the original value's JSON form (never log plaintext PII)
    value_hash: String,
}

/// Audit logger for masking sessions
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory if needed
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MaskError::Io(format!(
                    "Failed to create audit log directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        Ok(Self {
            log_path,
            json_format,
        })
    }

    /// Create a logger from configuration; `None` when auditing is disabled
    pub fn from_config(config: &AuditConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        Self::new(config.log_path.clone(), config.json_format).map(Some)
    }

    /// Log the tokens a session holds after masking `source`
    pub fn log_session(&self, source: &str, engine: &MaskingEngine) -> Result<()> {
        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            session_id: engine.session_id().to_string(),
            source: source.to_string(),
            tokens_issued: engine.tokens().len(),
            unknown_fields: engine.stats().total_unknown(),
            tokens: engine
                .tokens()
                .iter()
                .map(|entry| AuditToken {
                    token: entry.token.clone(),
                    key: entry.key.clone(),
                    value_hash: hash_value(&entry.value.to_string()),
                })
                .collect(),
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                MaskError::Io(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        if self.json_format {
            let json_line = serde_json::to_string(entry)?;
            writeln!(file, "{json_line}")?;
        } else {
            writeln!(
                file,
                "[{}] Session: {} | Source: {} | Tokens: {} | Unknown fields: {}",
                entry.timestamp,
                entry.session_id,
                entry.source,
                entry.tokens_issued,
                entry.unknown_fields
            )?;
        }

        Ok(())
    }
}

/// Hash a PII value using SHA-256
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_hash_value() {
        let hash1 = hash_value("test@example.com");
        let hash2 = hash_value("test@example.com");
        let hash3 = hash_value("different@example.com");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_from_config_disabled() {
        let config = AuditConfig::default();
        assert!(AuditLogger::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_log_session_json() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("nested").join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();

        let mut engine = MaskingEngine::default();
        engine
            .mask(&json!({"ENTITY_NAME": "John Smith", "EMAIL": "js@example.com"}))
            .unwrap();
        logger.log_session("entity-1.json", &engine).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let entry: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(entry["source"], "entity-1.json");
        assert_eq!(entry["tokens_issued"], 2);
        assert_eq!(entry["tokens"][0]["token"], "ENTITY_NAME_1");
        assert!(!content.contains("John Smith"));
        assert!(!content.contains("js@example.com"));
    }

    #[test]
    fn test_hash_keeps_value_type() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), true).unwrap();

        let mut engine = MaskingEngine::default();
        engine
            .mask(&json!([{"RECORD_ID": 1001}, {"RECORD_ID": "1001"}]))
            .unwrap();
        assert_eq!(engine.tokens().len(), 2);
        logger.log_session("ids.json", &engine).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let entry: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        let tokens = entry["tokens"].as_array().unwrap();
        assert_eq!(tokens[0]["value_hash"], hash_value("1001"));
        assert_eq!(tokens[1]["value_hash"], hash_value("\"1001\""));
        assert_ne!(tokens[0]["value_hash"], tokens[1]["value_hash"]);
    }

    #[test]
    fn test_log_session_plain_text_appends() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit.log");
        let logger = AuditLogger::new(log_path.clone(), false).unwrap();

        let engine = MaskingEngine::default();
        logger.log_session("a.json", &engine).unwrap();
        logger.log_session("b.json", &engine).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("Source: b.json"));
    }
}
