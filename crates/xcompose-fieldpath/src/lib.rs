//! Field path access for structured documents.
//!
//! A field path addresses a location inside a JSON document using dotted
//! segments with optional bracketed accessors, e.g.
//! `spec.containers[0].env['API_HOST']`.

mod access;
mod error;
mod path;

pub use access::{read, write};
pub use error::FieldPathError;
pub use path::{FieldPath, Segment};
