//! Recursive descent over JSON trees
//!
//! Produces a structurally identical copy of the input with masking decisions
//! applied at every reachable scalar. Key-paths are carried for diagnostics
//! only; decisions depend on the immediate field key and value kind.

use crate::domain::{render_scalar, MaskError, Result, ValueKind};
use crate::masking::patterns::split_key_pair;
use crate::masking::policy::{FieldClass, FieldPolicy};
use crate::masking::stats::MaskingStats;
use crate::masking::tokens::TokenStore;
use serde_json::{Map, Value};

/// One traversal over borrowed session state
pub struct TreeWalker<'a> {
    policy: &'a FieldPolicy,
    store: &'a mut TokenStore,
    stats: &'a mut MaskingStats,
}

impl<'a> TreeWalker<'a> {
    pub fn new(
        policy: &'a FieldPolicy,
        store: &'a mut TokenStore,
        stats: &'a mut MaskingStats,
    ) -> Self {
        Self {
            policy,
            store,
            stats,
        }
    }

    /// Transform `value`, located at `path`
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::UnsupportedType`] when a null, boolean, or float
    /// is reached without a policy rule covering it.
    pub fn walk(&mut self, path: &str, value: &Value) -> Result<Value> {
        match value {
            Value::Array(items) => {
                let mut masked = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    masked.push(self.walk(&format!("{path}[{idx}]"), item)?);
                }
                Ok(Value::Array(masked))
            }
            Value::Object(map) => {
                let mut masked = Map::with_capacity(map.len());
                for (key, item) in map {
                    let child = child_path(path, key);
                    masked.insert(key.clone(), self.dispatch_field(&child, key, item)?);
                }
                Ok(Value::Object(masked))
            }
            Value::String(text) => self.walk_literal(path, text),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
            other => Err(MaskError::UnsupportedType {
                value_type: ValueKind::of(other).name(),
                path: display_path(path),
            }),
        }
    }

    /// Apply the field dispatch rule to one key/value pair
    fn dispatch_field(&mut self, path: &str, key: &str, value: &Value) -> Result<Value> {
        let kind = ValueKind::of(value);
        if kind.is_nested() {
            return self.walk(path, value);
        }

        match self.policy.classify(key, kind) {
            FieldClass::Mask => {
                let token = self.store.tokenize(key, value);
                tracing::trace!(path = %path, token = %token, "Masked field");
                self.stats.record_masked();
                Ok(Value::String(token))
            }
            FieldClass::PassThrough => {
                self.stats.record_passed();
                Ok(value.clone())
            }
            FieldClass::Unknown if kind == ValueKind::String => {
                tracing::warn!(key = %key, path = %path, "Unknown field passed through unmasked");
                self.stats.record_unknown(key);
                Ok(value.clone())
            }
            FieldClass::Unknown => self.walk(path, value),
        }
    }

    /// Handle a bare string: either a `key: value` literal or opaque text
    fn walk_literal(&mut self, path: &str, text: &str) -> Result<Value> {
        let Some((key, rest)) = split_key_pair(text) else {
            tracing::trace!(path = %display_path(path), "Plain string passed through");
            return Ok(Value::String(text.to_string()));
        };

        let child = child_path(path, key);
        let masked = self.dispatch_field(&child, key, &Value::String(rest.to_string()))?;
        Ok(Value::String(format!("{key}: {}", render_scalar(&masked))))
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() || path.starts_with('[') {
        format!("${path}")
    } else {
        path.to_string()
    }
}
