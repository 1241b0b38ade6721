//! Patch application.
//!
//! A patch reads from the composite resource and writes to the composed
//! resource. Patches applied in one sequence share a temporary buffer:
//! field path patches with a [`Destination::Temporary`] destination push
//! onto it, and a combining patch set reference consumes all of it.

use serde_json::Value;
use tracing::trace;
use xcompose_fieldpath::{write, FieldPath};

use crate::error::PatchError;
use crate::patch::{
    Destination, FieldPathPatch, Patch, PatchSetPatch, PATCH_TYPE_FROM_COMPOSITE_FIELD_PATH,
    PATCH_TYPE_PATCH_SET,
};

impl Patch {
    /// Apply this patch.
    ///
    /// `composite` is only read. `composed` and `tmp` are the only things
    /// mutated.
    pub fn apply(
        &self,
        composite: &Value,
        composed: &mut Value,
        tmp: &mut Vec<Value>,
    ) -> Result<(), PatchError> {
        match self {
            Patch::FromCompositeFieldPath(p) => p.apply(composite, composed, tmp),
            Patch::PatchSet(p) => p.apply(composed, tmp),
            Patch::Unknown(u) => Err(PatchError::InvalidPatchType(u.patch_type.clone())),
        }
    }
}

impl FieldPathPatch {
    fn apply(
        &self,
        composite: &Value,
        composed: &mut Value,
        tmp: &mut Vec<Value>,
    ) -> Result<(), PatchError> {
        let from = self
            .from_field_path
            .as_deref()
            .ok_or_else(|| PatchError::RequiredField {
                field: "FromFieldPath",
                patch_type: PATCH_TYPE_FROM_COMPOSITE_FIELD_PATH.to_string(),
            })?;

        // An absent source field is not an error; the patch has nothing to do.
        let input = match FieldPath::parse(from)?.get(composite) {
            Ok(v) => v,
            Err(e) if e.is_not_found() => {
                trace!(from, "source field not found, skipping patch");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let mut value = input.clone();
        for transform in &self.transforms {
            value = transform.resolve(&value)?;
        }

        match &self.to_field_path {
            Destination::Temporary => {
                trace!(from, "staging value for combine");
                tmp.push(value);
            }
            Destination::Unset => write(composed, from, value)?,
            Destination::Explicit(to) => write(composed, to, value)?,
        }
        Ok(())
    }
}

impl PatchSetPatch {
    fn apply(&self, composed: &mut Value, tmp: &mut Vec<Value>) -> Result<(), PatchError> {
        // Plain references are expanded by inlining; one without a combine does nothing.
        let Some(combine) = &self.combine else {
            return Ok(());
        };

        let Destination::Explicit(to) = &self.to_field_path else {
            return Err(PatchError::RequiredField {
                field: "ToFieldPath",
                patch_type: PATCH_TYPE_PATCH_SET.to_string(),
            });
        };

        let out = combine.combine(tmp)?;
        trace!(
            patch_set = %self.patch_set_name,
            combine = combine.combine_type(),
            to = %to,
            staged = tmp.len(),
            "writing combined value"
        );
        write(composed, to, out)?;
        Ok(())
    }
}

/// Apply `patches` in order against a fresh temporary buffer.
///
/// Stops at the first error.
pub fn apply_all(
    patches: &[Patch],
    composite: &Value,
    composed: &mut Value,
) -> Result<(), PatchError> {
    let mut tmp = Vec::new();
    for patch in patches {
        patch.apply(composite, composed, &mut tmp)?;
    }
    Ok(())
}
