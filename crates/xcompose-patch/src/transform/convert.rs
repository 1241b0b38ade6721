//! Convert transform: change the primitive kind of a value.
//!
//! Conversion table (rows are the input kind):
//!
//! | from \ to | string | bool      | int64     | float64 |
//! |-----------|--------|-----------|-----------|---------|
//! | string    | -      | parse     | parse     | parse   |
//! | bool      | yes    | -         | 1 / 0     | 1 / 0   |
//! | int64     | yes    | `== 1`    | -         | yes     |
//! | float64   | yes    | `== 1`    | truncate  | -       |
//!
//! `int` is accepted as an alias of `int64`.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::PatchError;
use crate::kind::ValueKind;

pub const CONVERT_TYPE_STRING: &str = "string";
pub const CONVERT_TYPE_BOOL: &str = "bool";
pub const CONVERT_TYPE_INT: &str = "int";
pub const CONVERT_TYPE_INT64: &str = "int64";
pub const CONVERT_TYPE_FLOAT64: &str = "float64";

/// Accepted spellings for string to bool parsing.
const TRUE_STRINGS: &[&str] = &["1", "t", "T", "TRUE", "true", "True"];
const FALSE_STRINGS: &[&str] = &["0", "f", "F", "FALSE", "false", "False"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertTransform {
    pub to_type: String,
}

impl ConvertTransform {
    pub fn new(to_type: impl Into<String>) -> Self {
        Self {
            to_type: to_type.into(),
        }
    }

    pub fn resolve(&self, input: &Value) -> Result<Value, PatchError> {
        let from = ValueKind::of(input);
        if !matches!(
            from,
            ValueKind::String | ValueKind::Bool | ValueKind::Int64 | ValueKind::Float64
        ) {
            return Err(PatchError::ConvertInputTypeNotSupported(from));
        }

        let to = match self.to_type.as_str() {
            CONVERT_TYPE_STRING => ValueKind::String,
            CONVERT_TYPE_BOOL => ValueKind::Bool,
            CONVERT_TYPE_INT | CONVERT_TYPE_INT64 => ValueKind::Int64,
            CONVERT_TYPE_FLOAT64 => ValueKind::Float64,
            _ => {
                return Err(PatchError::ConversionPairNotSupported {
                    from,
                    to: self.to_type.clone(),
                })
            }
        };

        if from == to {
            return Ok(input.clone());
        }

        match (input, to) {
            (Value::String(s), ValueKind::Bool) => {
                if TRUE_STRINGS.contains(&s.as_str()) {
                    Ok(Value::Bool(true))
                } else if FALSE_STRINGS.contains(&s.as_str()) {
                    Ok(Value::Bool(false))
                } else {
                    Err(self.invalid(s))
                }
            }
            (Value::String(s), ValueKind::Int64) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| self.invalid(s)),
            (Value::String(s), ValueKind::Float64) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| self.invalid(s)),

            (Value::Bool(b), ValueKind::String) => Ok(Value::String(b.to_string())),
            (Value::Bool(b), ValueKind::Int64) => Ok(Value::from(i64::from(*b))),
            (Value::Bool(b), ValueKind::Float64) => Ok(Value::from(if *b { 1.0 } else { 0.0 })),

            (Value::Number(n), ValueKind::String) => Ok(Value::String(n.to_string())),
            (Value::Number(n), ValueKind::Bool) if from == ValueKind::Int64 => {
                Ok(Value::Bool(n.as_i64() == Some(1)))
            }
            (Value::Number(n), ValueKind::Bool) => Ok(Value::Bool(n.as_f64() == Some(1.0))),
            (Value::Number(n), ValueKind::Float64) => n
                .as_i64()
                .map(|i| Value::from(i as f64))
                .ok_or_else(|| self.invalid(&n.to_string())),
            (Value::Number(n), ValueKind::Int64) => n
                .as_f64()
                .map(f64::trunc)
                .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| Value::from(f as i64))
                .ok_or_else(|| self.invalid(&n.to_string())),

            _ => Err(PatchError::ConversionPairNotSupported {
                from,
                to: self.to_type.clone(),
            }),
        }
    }

    fn invalid(&self, value: &str) -> PatchError {
        PatchError::InvalidConversionInput {
            value: value.to_string(),
            to: self.to_type.clone(),
        }
    }
}
