//! Main masking engine
//!
//! This module provides the [`MaskingEngine`], which owns one masking session:
//! the field policy, the token store and the session counters.
//!
//! # Architecture
//!
//! The engine coordinates three components:
//! - **Policy**: classifies each scalar field as mask / pass-through / unknown
//! - **Tree walker**: recursive descent producing a masked copy of the input
//! - **Token store**: issues deduplicated tokens and resolves them again
//!
//! # Examples
//!
//! ```
//! use ermask::masking::MaskingEngine;
//! use serde_json::json;
//!
//! # fn example() -> ermask::domain::Result<()> {
//! let mut engine = MaskingEngine::default();
//!
//! let masked = engine.mask(&json!({
//!     "ENTITY_NAME": "John Smith",
//!     "MATCH_LEVEL": "RESOLVED"
//! }))?;
//! assert_eq!(masked, json!({"ENTITY_NAME": "ENTITY_NAME_1", "MATCH_LEVEL": "RESOLVED"}));
//!
//! let summary = "ENTITY_NAME_1 was resolved.";
//! assert_eq!(engine.unmask_text(summary), "John Smith was resolved.");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::domain::Result;
use crate::masking::{
    policy::FieldPolicy, stats::MaskingStats, tokens::TokenStore, unmask, walker::TreeWalker,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// One masking session
///
/// # Thread Safety
///
/// The engine mutates its token store during traversal and performs no
/// internal locking. Use one engine per caller, or serialize whole
/// `mask`/`unmask` calls externally. Independent engines share nothing but the
/// immutable policy and can run in parallel.
///
/// # Examples
///
/// ```
/// use ermask::masking::{FieldPolicy, MaskingEngine};
/// use std::sync::Arc;
///
/// # fn example() -> ermask::domain::Result<()> {
/// let policy = FieldPolicy::new(["PATIENT_NAME"], ["WARD"])?;
/// let engine = MaskingEngine::new(Arc::new(policy));
/// assert_eq!(engine.tokens().counter("PATIENT_NAME"), 0);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug)]
pub struct MaskingEngine {
    policy: Arc<FieldPolicy>,
    store: TokenStore,
    stats: MaskingStats,
    session_id: Uuid,
}

impl MaskingEngine {
    /// Create a new session for `policy`
    ///
    /// Counters are seeded at zero for every masked key.
    pub fn new(policy: Arc<FieldPolicy>) -> Self {
        let store = TokenStore::with_keys(policy.masked_keys());
        Self {
            policy,
            store,
            stats: MaskingStats::default(),
            session_id: Uuid::new_v4(),
        }
    }

    /// Mask one JSON document
    ///
    /// Returns a value of identical shape with masked fields replaced by
    /// tokens. Tokens accumulate across calls, so a value seen in an earlier
    /// document keeps its token.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::UnsupportedType`](crate::domain::MaskError::UnsupportedType)
    /// if the document contains a scalar the policy has no rule for. Tokens
    /// issued before the failure stay registered.
    pub fn mask(&mut self, document: &Value) -> Result<Value> {
        let start = Instant::now();
        self.stats.record_document();

        let issued_before = self.store.len();
        let walked = TreeWalker::new(&self.policy, &mut self.store, &mut self.stats).walk("", document);
        let masked = match walked {
            Ok(masked) => masked,
            Err(e) => {
                tracing::error!(session_id = %self.session_id, error = %e, "Masking failed");
                return Err(e);
            }
        };

        tracing::debug!(
            session_id = %self.session_id,
            new_tokens = self.store.len() - issued_before,
            total_tokens = self.store.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Document masked"
        );

        Ok(masked)
    }

    /// Parse a JSON document and mask it
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::Serialization`](crate::domain::MaskError::Serialization)
    /// for malformed JSON, otherwise as [`mask`](Self::mask).
    pub fn mask_json_str(&mut self, json: &str) -> Result<Value> {
        let document: Value = serde_json::from_str(json)?;
        self.mask(&document)
    }

    /// Tokenize a single value under `key`, bypassing the policy
    pub fn tokenize(&mut self, key: &str, value: &Value) -> String {
        self.store.tokenize(key, value)
    }

    /// Restore original values for every issued token found in `text`
    pub fn unmask_text(&self, text: &str) -> String {
        unmask::unmask_text(&self.store, text)
    }

    /// Restore original values inside a structured value
    pub fn unmask_value(&self, value: &Value) -> Value {
        unmask::unmask_value(&self.store, value)
    }

    /// Original value for a bare token
    pub fn resolve(&self, token: &str) -> Option<&Value> {
        self.store.resolve(token)
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.store
    }

    pub fn stats(&self) -> &MaskingStats {
        &self.stats
    }

    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}

impl Default for MaskingEngine {
    fn default() -> Self {
        Self::new(Arc::new(FieldPolicy::default()))
    }
}
