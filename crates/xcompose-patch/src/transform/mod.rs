//! Value transforms applied by field path patches.
//!
//! Each transform is a stateless function from one JSON value to another.
//! On the wire a transform is tagged by `type`, with the settings held under
//! a key of the same name:
//!
//! ```json
//! {"type": "math", "math": {"multiply": 2}}
//! ```

mod convert;
mod map;
mod math;
mod string;

pub use convert::{
    ConvertTransform, CONVERT_TYPE_BOOL, CONVERT_TYPE_FLOAT64, CONVERT_TYPE_INT,
    CONVERT_TYPE_INT64, CONVERT_TYPE_STRING,
};
pub use map::MapTransform;
pub use math::MathTransform;
pub use string::StringTransform;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PatchError;

/// A single transform step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Transform {
    Map { map: MapTransform },
    Math { math: MathTransform },
    String { string: StringTransform },
    Convert { convert: ConvertTransform },
}

impl Transform {
    /// Run the transform over `input`.
    pub fn resolve(&self, input: &Value) -> Result<Value, PatchError> {
        match self {
            Transform::Map { map } => map.resolve(input),
            Transform::Math { math } => math.resolve(input),
            Transform::String { string } => string.resolve(input),
            Transform::Convert { convert } => convert.resolve(input),
        }
    }

    /// The wire discriminator of this transform.
    pub fn transform_type(&self) -> &'static str {
        match self {
            Transform::Map { .. } => "map",
            Transform::Math { .. } => "math",
            Transform::String { .. } => "string",
            Transform::Convert { .. } => "convert",
        }
    }
}

impl From<MapTransform> for Transform {
    fn from(map: MapTransform) -> Self {
        Transform::Map { map }
    }
}

impl From<MathTransform> for Transform {
    fn from(math: MathTransform) -> Self {
        Transform::Math { math }
    }
}

impl From<StringTransform> for Transform {
    fn from(string: StringTransform) -> Self {
        Transform::String { string }
    }
}

impl From<ConvertTransform> for Transform {
    fn from(convert: ConvertTransform) -> Self {
        Transform::Convert { convert }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let transforms: Vec<Transform> = serde_json::from_value(json!([
            {"type": "map", "map": {"k-1": "v-1"}},
            {"type": "math", "math": {"multiply": 2}},
            {"type": "string", "string": {"fmt": "%s-x"}},
            {"type": "convert", "convert": {"toType": "bool"}}
        ]))
        .unwrap();

        assert_eq!(
            transforms,
            vec![
                MapTransform::new([("k-1", "v-1")]).into(),
                MathTransform::multiply(2).into(),
                StringTransform::new("%s-x").into(),
                ConvertTransform::new(CONVERT_TYPE_BOOL).into(),
            ]
        );

        let back = serde_json::to_value(&transforms[1]).unwrap();
        assert_eq!(back, json!({"type": "math", "math": {"multiply": 2}}));
    }

    #[test]
    fn test_unknown_transform_type_is_rejected() {
        let result: Result<Transform, _> =
            serde_json::from_value(json!({"type": "regex", "regex": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_transform_type() {
        let t: Transform = MathTransform::multiply(3).into();
        assert_eq!(t.transform_type(), "math");
        assert_eq!(t.resolve(&json!(2)).unwrap(), json!(6));
    }
}
