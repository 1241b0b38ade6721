//! Map transform: look a string up in a fixed table.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::PatchError;
use crate::kind::ValueKind;

/// Maps string inputs to string outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapTransform {
    pub pairs: BTreeMap<String, String>,
}

impl MapTransform {
    pub fn new<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn resolve(&self, input: &Value) -> Result<Value, PatchError> {
        let key = match input {
            Value::String(s) => s,
            other => return Err(PatchError::MapTypeNotSupported(ValueKind::of(other))),
        };
        self.pairs
            .get(key)
            .map(|v| Value::String(v.clone()))
            .ok_or_else(|| PatchError::MapKeyNotFound(key.clone()))
    }
}
