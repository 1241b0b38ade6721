//! Combination of staged values into a single output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PatchError;
use crate::format::sprintf;

/// How staged values are merged.
///
/// On the wire: `{"type": "string", "string": {"fmt": "%s-%s"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Combine {
    String { string: StringCombine },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringCombine {
    #[serde(rename = "fmt")]
    pub format: String,
}

impl Combine {
    /// String combine with the given template.
    pub fn string(format: impl Into<String>) -> Self {
        Combine::String {
            string: StringCombine {
                format: format.into(),
            },
        }
    }

    /// Merge `values`, in order, into one value.
    pub fn combine(&self, values: &[Value]) -> Result<Value, PatchError> {
        match self {
            Combine::String { string } => combine_string(values, &string.format).map(Value::String),
        }
    }

    /// The wire discriminator of this combine.
    pub fn combine_type(&self) -> &'static str {
        match self {
            Combine::String { .. } => "string",
        }
    }
}

/// Substitute `values` positionally into `format`.
///
/// Arity is enforced by the template engine: a missing or unused operand is
/// a [`PatchError::Format`].
pub fn combine_string(values: &[Value], format: &str) -> Result<String, PatchError> {
    Ok(sprintf(format, values)?)
}
