//! Patch, transform and combine resolution for composed resources.
//!
//! Two entry points drive the engine:
//! - [`CompositionSpec::inline_patch_sets`] runs once per composition and
//!   expands named patch set references in place.
//! - [`Patch::apply`] runs once per patch per pass, reading from the
//!   composite document and writing to the composed document. Patches of one
//!   composed resource share a temporary buffer so combines can see the
//!   values staged before them.

mod apply;
mod combine;
mod composition;
mod error;
pub mod format;
mod inline;
mod kind;
mod patch;
pub mod transform;

pub use apply::apply_all;
pub use combine::{combine_string, Combine, StringCombine};
pub use composition::{ComposedTemplate, CompositionSpec, PatchSet};
pub use error::PatchError;
pub use format::FormatError;
pub use kind::ValueKind;
pub use patch::{
    Destination, FieldPathPatch, Patch, PatchSetPatch, UnknownPatch,
    PATCH_TYPE_FROM_COMPOSITE_FIELD_PATH, PATCH_TYPE_PATCH_SET,
};
pub use transform::Transform;
