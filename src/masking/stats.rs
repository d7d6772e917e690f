//! Per-session masking counters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts accumulated while masking; never holds original values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingStats {
    /// Documents passed to `mask`, including failed ones
    pub documents: usize,
    /// Scalar fields replaced by a token
    pub fields_masked: usize,
    /// Scalar fields kept as-is by policy
    pub fields_passed_through: usize,
    /// Unknown string fields by key; these are policy gaps
    pub unknown_fields: BTreeMap<String, usize>,
}

impl MaskingStats {
    pub fn record_document(&mut self) {
        self.documents += 1;
    }

    pub fn record_masked(&mut self) {
        self.fields_masked += 1;
    }

    pub fn record_passed(&mut self) {
        self.fields_passed_through += 1;
    }

    pub fn record_unknown(&mut self, key: &str) {
        *self.unknown_fields.entry(key.to_string()).or_insert(0) += 1;
    }

    /// Total unknown fields across all keys
    pub fn total_unknown(&self) -> usize {
        self.unknown_fields.values().sum()
    }
}
