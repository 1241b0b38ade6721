//! Built-in defaults (layer 1)
//!
//! Hardcoded defaults for every configuration key.

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Log filter directive (default: "info")
    pub log_level: String,

    /// What rendering does on a failed patch (default: "abort")
    pub render_on_error: String,

    /// Output serialization (default: "json")
    pub output_format: String,

    /// Pretty-print output (default: true)
    pub output_pretty: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            render_on_error: "abort".to_string(),
            output_format: "json".to_string(),
            output_pretty: true,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "log": {
                "level": self.log_level
            },
            "render": {
                "on_error": self.render_on_error
            },
            "output": {
                "format": self.output_format,
                "pretty": self.output_pretty
            }
        })
    }
}
