//! String transform: single-placeholder formatting.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PatchError;
use crate::format::sprintf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringTransform {
    #[serde(rename = "fmt")]
    pub format: String,
}

impl StringTransform {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    pub fn resolve(&self, input: &Value) -> Result<Value, PatchError> {
        let out = sprintf(&self.format, std::slice::from_ref(input))?;
        Ok(Value::String(out))
    }
}
