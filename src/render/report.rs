//! Render report types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use xcompose_patch::PatchError;

/// A patch that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchFailure {
    /// Position of the patch in the inlined patch list.
    pub index: usize,
    pub patch_type: String,
    /// Machine-readable error code.
    pub code: String,
    pub message: String,
}

impl PatchFailure {
    pub fn new(index: usize, patch_type: &str, error: &PatchError) -> Self {
        Self {
            index,
            patch_type: patch_type.to_string(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// One rendered composed resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub resource: Value,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<PatchFailure>,
}

/// The result of rendering a whole composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReport {
    pub resources: Vec<RenderedResource>,
}

impl RenderReport {
    pub fn failure_count(&self) -> usize {
        self.resources.iter().map(|r| r.failures.len()).sum()
    }

    /// Rendered documents only, in template order.
    pub fn documents(&self) -> Vec<&Value> {
        self.resources.iter().map(|r| &r.resource).collect()
    }

    /// Human-readable summary of skipped patches.
    pub fn to_human(&self) -> String {
        let mut out = format!(
            "Rendered {} resource(s), {} patch failure(s)\n",
            self.resources.len(),
            self.failure_count()
        );
        for (i, rendered) in self.resources.iter().enumerate() {
            for failure in &rendered.failures {
                let label = rendered
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("resources[{}]", i));
                out.push_str(&format!(
                    "  {} patch {} ({}): {} [{}]\n",
                    label, failure.index, failure.patch_type, failure.message, failure.code
                ));
            }
        }
        out
    }
}
