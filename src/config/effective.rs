//! Effective configuration with provenance
//!
//! The effective config is the merge of every contributing layer plus a
//! record of where each layer came from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use xcompose_fieldpath::FieldPath;

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;
use crate::manifest::OutputFormat;
use crate::render::ErrorPolicy;

/// Schema identifier
pub const SCHEMA_ID: &str = "xcompose/effective_config@1";

/// Recognised log levels
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Origin of a configuration layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing config layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 of the raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Effective configuration with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub schema_id: String,

    /// When this config was computed
    pub created_at: DateTime<Utc>,

    /// The merged configuration object
    pub config: Value,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build the effective config from builtin defaults, an optional TOML
    /// file and optional CLI overrides.
    pub fn build(
        config_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![BuiltinDefaults::default().to_value()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        if let Some(path) = config_path {
            let (value, digest) = Self::load_toml_file(path)?;
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        let config = Self {
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            config: merged,
            sources,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and parse a TOML file, returning the value and digest
    fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        let digest = hex::encode(Sha256::digest(&bytes));

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;
        let table: toml::Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        Ok((Self::toml_to_json(table), digest))
    }

    fn toml_to_json(toml: toml::Value) -> Value {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::from(i),
            toml::Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => {
                Value::Array(items.into_iter().map(Self::toml_to_json).collect())
            }
            toml::Value::Table(table) => Value::Object(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::toml_to_json(v)))
                    .collect(),
            ),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.get_str("log.level") {
            Some(level) if LOG_LEVELS.contains(&level) => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "log.level must be one of {:?}, got {:?}",
                    LOG_LEVELS, other
                )))
            }
        }

        self.error_policy()?;
        self.output_format()?;

        if self.get_bool("output.pretty").is_none() {
            return Err(ConfigError::ValidationError(
                "output.pretty must be a boolean".to_string(),
            ));
        }

        Ok(())
    }

    /// Get a config value by field path, e.g. `output.format`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        FieldPath::parse(path).ok()?.get(&self.config).ok()
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(|v| v.as_str())
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(|v| v.as_bool())
    }

    /// Log filter directive from `log.level`.
    pub fn log_level(&self) -> &str {
        self.get_str("log.level").unwrap_or("info")
    }

    /// Patch failure handling from `render.on_error`.
    pub fn error_policy(&self) -> Result<ErrorPolicy, ConfigError> {
        let raw = self.get_str("render.on_error").unwrap_or_default();
        raw.parse()
            .map_err(|e: String| ConfigError::ValidationError(format!("render.on_error: {}", e)))
    }

    /// Output serialization from `output.format`.
    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        let raw = self.get_str("output.format").unwrap_or_default();
        raw.parse()
            .map_err(|e: String| ConfigError::ValidationError(format!("output.format: {}", e)))
    }

    pub fn pretty(&self) -> bool {
        self.get_bool("output.pretty").unwrap_or(true)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
