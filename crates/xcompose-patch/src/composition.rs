//! Composition wire types: patch sets and composed templates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::patch::Patch;

/// The patch-related part of a composition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionSpec {
    /// Named, reusable groups of patches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patch_sets: Vec<PatchSet>,

    /// Templates for the composed resources.
    #[serde(default)]
    pub resources: Vec<ComposedTemplate>,
}

/// A named group of patches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchSet {
    pub name: String,

    #[serde(default)]
    pub patches: Vec<Patch>,
}

/// Template for one composed resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposedTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Starting document the patches are applied to.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub base: Value,

    #[serde(default)]
    pub patches: Vec<Patch>,
}

impl PatchSet {
    pub fn new(name: impl Into<String>, patches: Vec<Patch>) -> Self {
        Self {
            name: name.into(),
            patches,
        }
    }
}

impl ComposedTemplate {
    pub fn with_patches(patches: Vec<Patch>) -> Self {
        Self {
            patches,
            ..Default::default()
        }
    }
}
