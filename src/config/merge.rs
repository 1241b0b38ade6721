//! Configuration layer merge
//!
//! - Objects: deep-merge by key
//! - Arrays: replace
//! - Scalars: last layer wins

use serde_json::Value;

/// Deep merge `overlay` onto `base`.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut merged), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let value = match merged.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                merged.insert(key, value);
            }
            Value::Object(merged)
        }
        (_, overlay) => overlay,
    }
}

/// Merge layers in order; later layers take precedence.
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_key_override_keeps_siblings() {
        let base = json!({"output": {"format": "json", "pretty": true}});
        let overlay = json!({"output": {"pretty": false}});
        let result = deep_merge(base, overlay);

        assert_eq!(result, json!({"output": {"format": "json", "pretty": false}}));
    }

    #[test]
    fn test_array_is_replaced() {
        let base = json!({"filters": ["a", "b"]});
        let overlay = json!({"filters": ["c"]});
        assert_eq!(deep_merge(base, overlay), json!({"filters": ["c"]}));
    }

    #[test]
    fn test_scalar_replaces_object() {
        let base = json!({"log": {"level": "info"}});
        let overlay = json!({"log": "off"});
        assert_eq!(deep_merge(base, overlay), json!({"log": "off"}));
    }

    #[test]
    fn test_merge_layers_precedence() {
        let builtin = json!({"log": {"level": "info"}, "render": {"on_error": "abort"}});
        let file = json!({"log": {"level": "debug"}, "render": {"on_error": "skip"}});
        let cli = json!({"log": {"level": "warn"}});

        let result = merge_layers(vec![builtin, file, cli]);

        assert_eq!(result["log"]["level"], "warn");
        assert_eq!(result["render"]["on_error"], "skip");
    }

    #[test]
    fn test_merge_no_layers_is_null() {
        assert!(merge_layers(Vec::new()).is_null());
    }
}
