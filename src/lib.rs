//! # ermask - Reversible PII Masking
//!
//! ermask prepares entity-resolution JSON for a text generator that must not
//! see personal data. Sensitive field values are replaced by stable tokens
//! such as `ENTITY_NAME_1`, and any text the generator produces that mentions
//! those tokens can be translated back to the real values.
//!
//! ## Architecture
//!
//! - [`masking`] - Policy, tree walker, token store, unmasking, audit, reports
//! - [`domain`] - Error type, result alias, JSON value classification
//! - [`config`] - TOML configuration with environment overrides
//! - [`logging`] - Structured logging
//! - [`cli`] - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust
//! use ermask::masking::MaskingEngine;
//! use serde_json::json;
//!
//! # fn main() -> ermask::domain::Result<()> {
//! let mut engine = MaskingEngine::default();
//!
//! let masked = engine.mask(&json!({
//!     "RESOLVED_ENTITY": {
//!         "ENTITY_ID": 42,
//!         "ENTITY_NAME": "Robert Smith",
//!         "FEATURES": ["DOB: 1980-01-01", "ADDRESS: 123 Main St"]
//!     }
//! }))?;
//!
//! assert_eq!(masked["RESOLVED_ENTITY"]["ENTITY_ID"], 42);
//! assert_eq!(masked["RESOLVED_ENTITY"]["ENTITY_NAME"], "ENTITY_NAME_1");
//! assert_eq!(masked["RESOLVED_ENTITY"]["FEATURES"][0], "DOB: DOB_1");
//!
//! let answer = engine.unmask_text("ENTITY_NAME_1 was born on DOB_1.");
//! assert_eq!(answer, "Robert Smith was born on 1980-01-01.");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`]. A scalar the policy has no
//! rule for aborts the document with
//! [`MaskError::UnsupportedType`](domain::MaskError::UnsupportedType):
//!
//! ```rust
//! use ermask::masking::MaskingEngine;
//! use serde_json::json;
//!
//! let mut engine = MaskingEngine::default();
//! let err = engine.mask(&json!({"SCORE": 0.93})).unwrap_err();
//! assert!(err.is_policy_violation());
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod masking;
