//! Manifest loading and output serialization.
//!
//! Compositions and composite resources are read from JSON or YAML files,
//! chosen by extension. A composition file may hold either a full
//! `Composition` object (its `spec` key is used) or a bare
//! composition spec.

use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use xcompose_patch::CompositionSpec;

/// Kind of a full composition manifest.
const COMPOSITION_KIND: &str = "Composition";

/// Serialization used for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(format!("unknown output format {:?} (expected json or yaml)", other)),
        }
    }
}

/// Errors loading or serializing manifests.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported manifest extension: {0} (expected .json, .yaml or .yml)")]
    UnsupportedExtension(String),

    #[error("serialization error: {0}")]
    Serialize(String),
}

/// Load a JSON or YAML document.
pub fn load_document(path: &Path) -> Result<Value, ManifestError> {
    let display = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: display.clone(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&contents).map_err(|source| ManifestError::Json {
            path: display,
            source,
        }),
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&contents).map_err(|source| ManifestError::Yaml {
                path: display,
                source,
            })
        }
        _ => Err(ManifestError::UnsupportedExtension(display)),
    }
}

/// Load a composition spec from a manifest file.
pub fn load_composition(path: &Path) -> Result<CompositionSpec, ManifestError> {
    let document = load_document(path)?;
    composition_from_value(document).map_err(|source| ManifestError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Extract a composition spec from a full `Composition` or a bare spec.
pub fn composition_from_value(mut document: Value) -> Result<CompositionSpec, serde_json::Error> {
    let is_composition = document.get("kind").and_then(Value::as_str) == Some(COMPOSITION_KIND);
    if is_composition {
        document = document.get_mut("spec").map(Value::take).unwrap_or(Value::Null);
    }
    if document.is_null() {
        return Ok(CompositionSpec::default());
    }
    serde_json::from_value(document)
}

/// Serialize `value` for output.
pub fn to_output<T: Serialize>(
    value: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<String, ManifestError> {
    let out = match format {
        OutputFormat::Json if pretty => {
            serde_json::to_string_pretty(value).map_err(|e| e.to_string())
        }
        OutputFormat::Json => serde_json::to_string(value).map_err(|e| e.to_string()),
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
    };
    out.map_err(ManifestError::Serialize)
}
