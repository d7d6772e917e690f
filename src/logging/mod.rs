//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr
//! - Local JSON file logging with rotation
//!
//! Log events carry keys, paths, tokens and counts. Original field values
//! are never logged.
//!
//! # Example
//!
//! ```no_run
//! use ermask::logging::init_logging;
//! use ermask::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the completion of a masking session
///
/// # Example
///
/// ```no_run
/// use ermask::log_session_complete;
/// use std::time::Duration;
///
/// log_session_complete!("entity.json", 3, 12, Duration::from_millis(4));
/// ```
#[macro_export]
macro_rules! log_session_complete {
    ($source:expr, $documents:expr, $tokens:expr, $duration:expr) => {
        tracing::info!(
            source = %$source,
            documents = $documents,
            tokens = $tokens,
            duration_ms = $duration.as_millis(),
            "Masking completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ermask::log_error_with_context;
/// use ermask::domain::MaskError;
///
/// let error = MaskError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
