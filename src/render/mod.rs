//! Rendering of composed resources
//!
//! Rendering inlines a composition's patch sets, then, for each composed
//! template, copies its base document and applies every patch in order
//! against a fresh temporary buffer.

mod report;

pub use report::{PatchFailure, RenderReport, RenderedResource};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::{debug, info, warn};
use xcompose_patch::{ComposedTemplate, CompositionSpec, PatchError};

/// What to do when a patch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop rendering at the first failed patch.
    #[default]
    Abort,
    /// Record the failure and continue with the next patch.
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown policy {:?} (expected abort or skip)", other)),
        }
    }
}

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("inlining patch sets: {0}")]
    Inline(#[source] PatchError),

    #[error("resource {resource}: patch {index} ({patch_type}): {source}")]
    Patch {
        resource: String,
        index: usize,
        patch_type: String,
        #[source]
        source: PatchError,
    },
}

impl RenderError {
    /// The engine error underneath.
    pub fn patch_error(&self) -> &PatchError {
        match self {
            RenderError::Inline(e) => e,
            RenderError::Patch { source, .. } => source,
        }
    }
}

/// Render one composed resource from an already-inlined template.
pub fn render_resource(
    template: &ComposedTemplate,
    label: &str,
    composite: &Value,
    policy: ErrorPolicy,
) -> Result<RenderedResource, RenderError> {
    let mut resource = match &template.base {
        Value::Null => Value::Object(Map::new()),
        base => base.clone(),
    };
    let mut tmp = Vec::new();
    let mut failures = Vec::new();

    for (index, patch) in template.patches.iter().enumerate() {
        let Err(source) = patch.apply(composite, &mut resource, &mut tmp) else {
            continue;
        };

        match policy {
            ErrorPolicy::Abort => {
                return Err(RenderError::Patch {
                    resource: label.to_string(),
                    index,
                    patch_type: patch.patch_type().to_string(),
                    source,
                })
            }
            ErrorPolicy::Skip => {
                warn!(
                    resource = label,
                    index,
                    patch_type = patch.patch_type(),
                    code = source.code(),
                    "patch failed, skipping: {}",
                    source
                );
                failures.push(PatchFailure::new(index, patch.patch_type(), &source));
            }
        }
    }

    debug!(
        resource = label,
        patches = template.patches.len(),
        staged = tmp.len(),
        "rendered resource"
    );
    Ok(RenderedResource {
        name: template.name.clone(),
        resource,
        failures,
    })
}

/// Inline patch sets, then render every composed template.
///
/// `spec` is normalized in place; on an inlining error it is left as it was.
pub fn render_composition(
    spec: &mut CompositionSpec,
    composite: &Value,
    policy: ErrorPolicy,
) -> Result<RenderReport, RenderError> {
    spec.inline_patch_sets().map_err(RenderError::Inline)?;
    render_inlined(spec, composite, policy)
}

/// Render every composed template of a spec whose patch sets were already
/// inlined, such as the output of `xcompose inline`.
///
/// Inlining is not idempotent: a combine marker left by a previous pass
/// would expand its patch set again and stage every value twice.
pub fn render_inlined(
    spec: &CompositionSpec,
    composite: &Value,
    policy: ErrorPolicy,
) -> Result<RenderReport, RenderError> {
    let resources = spec
        .resources
        .iter()
        .enumerate()
        .map(|(i, template)| {
            let label = template
                .name
                .clone()
                .unwrap_or_else(|| format!("resources[{}]", i));
            render_resource(template, &label, composite, policy)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let report = RenderReport { resources };
    info!(
        resources = report.resources.len(),
        failures = report.failure_count(),
        "rendered composition"
    );
    Ok(report)
}
