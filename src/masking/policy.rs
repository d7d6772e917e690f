//! Field classification policy
//!
//! Decides, from the field key and the kind of its value alone, whether a
//! scalar is tokenized, passed through, or flagged as a policy gap.

use crate::domain::{MaskError, Result, ValueKind};
use crate::masking::patterns::is_token_shaped;
use std::collections::BTreeSet;

/// Keys whose values are PII and must be tokenized
pub const DEFAULT_MASKED_KEYS: &[&str] = &[
    "DATA_SOURCE",
    "DOB",
    "DRLIC",
    "EMAIL",
    "ENTITY_DESC",
    "ENTITY_KEY",
    "ENTITY_NAME",
    "HOME",
    "MAILING",
    "MOBILE",
    "PRIMARY",
    "RECORD_ID",
];

/// Keys whose values are safe to pass through unchanged
pub const DEFAULT_KNOWN_KEYS: &[&str] = &[
    "AMOUNT",
    "CATEGORY",
    "DATE",
    "ENTITY_ID",
    "ENTITY_TYPE",
    "ERRULE_CODE",
    "FIRST_SEEN_DT",
    "IS_AMBIGUOUS",
    "IS_DISCLOSED",
    "LAST_SEEN_DT",
    "MATCH_KEY",
    "MATCH_LEVEL",
    "MATCH_LEVEL_CODE",
    "RECORD_TYPE",
    "STATUS",
];

/// Outcome of classifying a scalar field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// Replace the value with a token
    Mask,
    /// Keep the value unchanged
    PassThrough,
    /// Key is in neither set
    Unknown,
}

/// Immutable pair of disjoint key sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPolicy {
    masked_keys: BTreeSet<String>,
    known_keys: BTreeSet<String>,
}

impl FieldPolicy {
    /// Build a policy from masked and known key sets
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::Validation`] if a key appears in both sets, or if
    /// a masked key would produce tokens outside the token lexical contract.
    pub fn new<M, K, S, T>(masked_keys: M, known_keys: K) -> Result<Self>
    where
        M: IntoIterator<Item = S>,
        K: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        let masked_keys: BTreeSet<String> = masked_keys.into_iter().map(Into::into).collect();
        let known_keys: BTreeSet<String> = known_keys.into_iter().map(Into::into).collect();

        let overlap: Vec<&str> = masked_keys
            .intersection(&known_keys)
            .map(String::as_str)
            .collect();
        if !overlap.is_empty() {
            return Err(MaskError::Validation(format!(
                "Keys cannot be both masked and known: {}",
                overlap.join(", ")
            )));
        }

        for key in &masked_keys {
            let sample = format!("{}_1", key.to_uppercase());
            if !is_token_shaped(&sample) {
                return Err(MaskError::Validation(format!(
                    "Masked key '{key}' cannot form a token; use letters and underscores only"
                )));
            }
        }

        Ok(Self {
            masked_keys,
            known_keys,
        })
    }

    /// Classify a scalar field
    ///
    /// Nested values never reach this point; the walker recurses into them
    /// first. A masked key wins over the value kind, and an integer passes
    /// through under any non-masked key.
    pub fn classify(&self, key: &str, kind: ValueKind) -> FieldClass {
        if self.masked_keys.contains(key) {
            FieldClass::Mask
        } else if kind == ValueKind::Integer || self.known_keys.contains(key) {
            FieldClass::PassThrough
        } else {
            FieldClass::Unknown
        }
    }

    pub fn is_masked(&self, key: &str) -> bool {
        self.masked_keys.contains(key)
    }

    pub fn is_known(&self, key: &str) -> bool {
        self.known_keys.contains(key)
    }

    pub fn masked_keys(&self) -> impl Iterator<Item = &str> {
        self.masked_keys.iter().map(String::as_str)
    }

    pub fn known_keys(&self) -> impl Iterator<Item = &str> {
        self.known_keys.iter().map(String::as_str)
    }
}

impl Default for FieldPolicy {
    fn default() -> Self {
        Self {
            masked_keys: DEFAULT_MASKED_KEYS.iter().map(|k| k.to_string()).collect(),
            known_keys: DEFAULT_KNOWN_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}
