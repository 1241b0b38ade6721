//! Value kinds reported in transform and format errors.

use serde_json::Value;
use std::fmt;

/// The kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int64,
    /// Unsigned integer too large for `i64`.
    Uint64,
    Float64,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() => Self::Int64,
            Value::Number(n) if n.is_u64() => Self::Uint64,
            Value::Number(_) => Self::Float64,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of() {
        assert_eq!(ValueKind::of(&json!(null)), ValueKind::Null);
        assert_eq!(ValueKind::of(&json!(true)), ValueKind::Bool);
        assert_eq!(ValueKind::of(&json!(5)), ValueKind::Int64);
        assert_eq!(ValueKind::of(&json!(u64::MAX)), ValueKind::Uint64);
        assert_eq!(ValueKind::of(&json!(1.5)), ValueKind::Float64);
        assert_eq!(ValueKind::of(&json!("s")), ValueKind::String);
        assert_eq!(ValueKind::of(&json!([64])), ValueKind::Array);
        assert_eq!(ValueKind::of(&json!({})), ValueKind::Object);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ValueKind::Int64.to_string(), "int64");
        assert_eq!(ValueKind::Array.to_string(), "array");
    }
}
