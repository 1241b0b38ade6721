//! Patch set inlining.
//!
//! Rewrites every patch set reference in the composed templates into the
//! patches it names, so patch application never looks a set up by name.
//! A reference with a combine becomes the set's patches retargeted to the
//! temporary buffer, followed by the reference itself as the combine marker.

use std::collections::HashMap;
use tracing::debug;

use crate::composition::{CompositionSpec, PatchSet};
use crate::error::PatchError;
use crate::patch::{Destination, Patch};

impl CompositionSpec {
    /// Replace patch set references with the patches they name.
    ///
    /// All-or-nothing: if any reference is undefined the templates are left
    /// exactly as they were.
    pub fn inline_patch_sets(&mut self) -> Result<(), PatchError> {
        let mut index: HashMap<&str, &PatchSet> = HashMap::with_capacity(self.patch_sets.len());
        for set in &self.patch_sets {
            // First declaration wins on duplicate names
            index.entry(set.name.as_str()).or_insert(set);
        }

        let mut inlined = Vec::with_capacity(self.resources.len());
        for template in &self.resources {
            inlined.push(inline_patches(&template.patches, &index)?);
        }

        let mut expanded = 0;
        for (template, patches) in self.resources.iter_mut().zip(inlined) {
            expanded += patches.len().saturating_sub(template.patches.len());
            template.patches = patches;
        }
        debug!(
            templates = self.resources.len(),
            expanded, "inlined patch sets"
        );
        Ok(())
    }
}

fn inline_patches(
    patches: &[Patch],
    index: &HashMap<&str, &PatchSet>,
) -> Result<Vec<Patch>, PatchError> {
    let mut out = Vec::with_capacity(patches.len());
    for patch in patches {
        let Patch::PatchSet(reference) = patch else {
            out.push(patch.clone());
            continue;
        };

        let set = index
            .get(reference.patch_set_name.as_str())
            .ok_or_else(|| PatchError::UndefinedPatchSet(reference.patch_set_name.clone()))?;

        if reference.combine.is_none() {
            out.extend(set.patches.iter().cloned());
        } else {
            out.extend(
                set.patches
                    .iter()
                    .map(|p| p.clone().with_destination(Destination::Temporary)),
            );
            out.push(patch.clone());
        }
    }
    Ok(out)
}
