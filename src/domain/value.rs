//! Closed classification of JSON values
//!
//! Traversal dispatches on [`ValueKind`] so every variant of
//! [`serde_json::Value`] has an explicit rule.

use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Kind of a JSON value as seen by the masking policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    /// Number representable as `i64` or `u64`
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Lower-case name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Sequences and mappings
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Render a scalar for splicing into text
///
/// Strings are used verbatim; every other value uses its compact JSON form.
pub fn render_scalar(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

/// Serialize a JSON tree for output
///
/// Pretty output uses two-space indentation. Both forms end with a newline.
pub fn serialize_json(value: &Value, pretty: bool) -> crate::domain::Result<String> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    Ok(text)
}
