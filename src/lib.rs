//! xcompose - patch, transform and combine engine for composed resources
//!
//! This crate ties the field-path accessor and the patch engine together
//! into a renderer that turns a composition and a composite resource into
//! concrete composed resources, plus the layered configuration and
//! manifest loading used by the `xcompose` CLI.

pub mod config;
pub mod manifest;
pub mod render;

pub use xcompose_fieldpath as fieldpath;
pub use xcompose_patch as patch;

pub use config::{ConfigError, EffectiveConfig};
pub use manifest::{load_composition, load_document, ManifestError, OutputFormat};
pub use render::{
    render_composition, render_inlined, render_resource, ErrorPolicy, RenderError, RenderReport,
};
