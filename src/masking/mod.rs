//! Reversible PII masking
//!
//! Replaces personally-identifying field values in entity-resolution JSON with
//! stable typed tokens (`ENTITY_NAME_1`, `DOB_2`, ...) and restores the
//! original values wherever those tokens reappear in generated text.
//!
//! # Architecture
//!
//! - **Policy**: classifies scalar fields by key into mask / pass-through /
//!   unknown ([`policy`])
//! - **Walker**: schema-free recursive descent producing a masked copy
//!   ([`walker`])
//! - **Tokens**: deduplicated, reversible token issuance ([`tokens`])
//! - **Unmask**: reverse substitution in text and structured values
//!   ([`unmask`])
//! - **Audit / Report**: hashed audit trail and session summaries
//!
//! # Usage
//!
//! ```
//! use ermask::masking::MaskingEngine;
//! use serde_json::json;
//!
//! let mut engine = MaskingEngine::default();
//! let masked = engine.mask(&json!([
//!     {"ENTITY_NAME": "John Smith"},
//!     {"ENTITY_NAME": "John Smith"},
//!     {"ENTITY_NAME": "Jane Doe"}
//! ])).unwrap();
//!
//! assert_eq!(masked[1]["ENTITY_NAME"], "ENTITY_NAME_1");
//! assert_eq!(masked[2]["ENTITY_NAME"], "ENTITY_NAME_2");
//! assert_eq!(engine.unmask_text("ENTITY_NAME_2 and ENTITY_NAME_1"), "Jane Doe and John Smith");
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod patterns;
pub mod policy;
pub mod report;
pub mod stats;
pub mod tokens;
pub mod unmask;
pub mod walker;

// Re-export main types
pub use config::{AuditConfig, PolicyConfig};
pub use engine::MaskingEngine;
pub use policy::{FieldClass, FieldPolicy};
pub use report::MaskingReport;
pub use stats::MaskingStats;
pub use tokens::{TokenEntry, TokenStore};
