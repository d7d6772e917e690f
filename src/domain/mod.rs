//! Domain types for ermask.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Error types** ([`MaskError`])
//! - **Result type alias** ([`Result`])
//! - **Value classification** ([`ValueKind`]) shared by the policy and the
//!   tree walker
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, MaskError>`]:
//!
//! ```rust
//! use ermask::domain::{MaskError, Result};
//! use ermask::masking::MaskingEngine;
//! use serde_json::json;
//!
//! fn example() -> Result<()> {
//!     let mut engine = MaskingEngine::default();
//!     let masked = engine.mask(&json!({"ENTITY_NAME": "John Smith"}))?;
//!     assert_eq!(masked["ENTITY_NAME"], "ENTITY_NAME_1");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod errors;
pub mod result;
pub mod value;

pub use errors::MaskError;
pub use result::Result;
pub use value::{render_scalar, serialize_json, ValueKind};
