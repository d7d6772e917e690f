//! Reverse substitution
//!
//! Restores original values wherever issued tokens appear in generated text.
//! Token-shaped substrings that were never issued are left exactly as they
//! are; unmasking never fails.

use crate::domain::render_scalar;
use crate::masking::patterns::token_regex;
use crate::masking::tokens::TokenStore;
use serde_json::Value;

/// Replace every issued token in `text` with its original value
pub fn unmask_text(store: &TokenStore, text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;

    for hit in token_regex().find_iter(text) {
        if let Some(original) = store.resolve(hit.as_str()) {
            output.push_str(&text[last_end..hit.start()]);
            output.push_str(&render_scalar(original));
            last_end = hit.end();
        }
    }

    output.push_str(&text[last_end..]);
    output
}

/// Unmask a structured value produced from masked input
///
/// A string that is exactly an issued token becomes the original value,
/// keeping its JSON type. Other strings are unmasked as text. Shape is
/// preserved.
pub fn unmask_value(store: &TokenStore, value: &Value) -> Value {
    match value {
        Value::String(s) => match store.resolve(s) {
            Some(original) => original.clone(),
            None => Value::String(unmask_text(store, s)),
        },
        Value::Array(items) => Value::Array(items.iter().map(|v| unmask_value(store, v)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), unmask_value(store, v)))
                .collect(),
        ),
        other => other.clone(),
    }
}
