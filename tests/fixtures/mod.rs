//! Shared fixtures for integration tests
//!
//! Manifests live under `tests/fixtures/manifests/`.

#![allow(dead_code)]

use serde_json::Value;
use std::path::{Path, PathBuf};
use xcompose::patch::CompositionSpec;

/// Path to a manifest fixture
pub fn manifest_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/manifests")
        .join(name)
}

/// The database composition
pub fn database_composition() -> CompositionSpec {
    xcompose::load_composition(&manifest_path("database-composition.yaml"))
        .expect("database composition fixture should load")
}

/// The composite resource rendered by the database composition
pub fn database_composite() -> Value {
    xcompose::load_document(&manifest_path("database-composite.json"))
        .expect("database composite fixture should load")
}
