//! Configuration management for ermask.
//!
//! # Overview
//!
//! ermask reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `ERMASK_*` environment overrides
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`PolicyConfig`] - Masked and known field keys
//! - [`OutputConfig`] - Masked JSON formatting
//! - [`AuditConfig`] - Hashed audit trail
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [policy]
//! extra_masked_keys = ["PASSPORT"]
//! extra_known_keys = ["MATCH_SCORE"]
//!
//! [audit]
//! enabled = true
//! log_path = "${ERMASK_AUDIT_DIR}/ermask.log"
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use ermask::config::load_config;
//!
//! match load_config("ermask.toml") {
//!     Ok(_) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::masking::config::{AuditConfig, PolicyConfig};
pub use loader::{load_config, load_config_or_default};
pub use schema::{ApplicationConfig, ErmaskConfig, LoggingConfig, OutputConfig};
