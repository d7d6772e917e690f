//! Domain error types
//!
//! This module defines the error hierarchy for ermask. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main ermask error type
///
/// This is the primary error type used throughout the library. The CLI maps
/// variants onto process exit codes.
#[derive(Debug, Error)]
pub enum MaskError {
    /// A scalar the masking policy has no rule for (null, boolean, float)
    #[error("Unsupported value type '{value_type}' at '{path}'")]
    UnsupportedType {
        /// Kind of the offending value
        value_type: &'static str,
        /// Key-path of the offending value
        path: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl MaskError {
    /// Whether the error is a masking policy violation rather than an
    /// environmental failure
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, MaskError::UnsupportedType { .. })
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for MaskError {
    fn from(err: std::io::Error) -> Self {
        MaskError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MaskError {
    fn from(err: serde_json::Error) -> Self {
        MaskError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MaskError {
    fn from(err: toml::de::Error) -> Self {
        MaskError::Configuration(format!("TOML parse error: {err}"))
    }
}
