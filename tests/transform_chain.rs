//! Transform chains applied through field path patches

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use xcompose::patch::transform::{ConvertTransform, MapTransform, MathTransform, StringTransform};
use xcompose::patch::{Patch, PatchError, ValueKind};

fn apply(patch: &Patch, composite: &Value) -> Result<Value, PatchError> {
    let mut composed = json!({});
    let mut tmp = Vec::new();
    patch.apply(composite, &mut composed, &mut tmp)?;
    Ok(composed)
}

#[test]
fn test_map_then_convert() {
    let patch = Patch::from_composite("spec.size")
        .with_destination("spec.nodes".into())
        .with_transform(MapTransform::new([("small", "1"), ("large", "8")]))
        .with_transform(ConvertTransform::new("int"));

    let composed = apply(&patch, &json!({"spec": {"size": "large"}})).unwrap();
    assert_eq!(composed, json!({"spec": {"nodes": 8}}));
}

#[test]
fn test_math_then_string() {
    let patch = Patch::from_composite("spec.gb")
        .with_destination("spec.size".into())
        .with_transform(MathTransform::multiply(1024))
        .with_transform(StringTransform::new("%dMi"));

    let composed = apply(&patch, &json!({"spec": {"gb": 4}})).unwrap();
    assert_eq!(composed, json!({"spec": {"size": "4096Mi"}}));
}

#[test]
fn test_convert_then_math() {
    let patch = Patch::from_composite("spec.replicas")
        .with_destination("spec.total".into())
        .with_transform(ConvertTransform::new("int64"))
        .with_transform(MathTransform::multiply(3));

    let composed = apply(&patch, &json!({"spec": {"replicas": "2"}})).unwrap();
    assert_eq!(composed, json!({"spec": {"total": 6}}));
}

#[test]
fn test_chain_stops_at_first_failure() {
    let patch = Patch::from_composite("spec.replicas")
        .with_destination("spec.total".into())
        .with_transform(MathTransform::multiply(3))
        .with_transform(StringTransform::new("%d"));

    let err = apply(&patch, &json!({"spec": {"replicas": "2"}})).unwrap_err();
    assert_eq!(err, PatchError::MathInputNonNumber);
}

#[test]
fn test_map_rejects_non_string_input() {
    let patch = Patch::from_composite("spec.size")
        .with_transform(MapTransform::new([("small", "1")]));

    let err = apply(&patch, &json!({"spec": {"size": 3}})).unwrap_err();
    assert_eq!(err, PatchError::MapTypeNotSupported(ValueKind::Int64));
    assert_eq!(err.code(), "TYPE_NOT_SUPPORTED");
}

#[test]
fn test_convert_errors() {
    let composite = json!({"spec": {"list": [1, 2], "flag": "true"}});

    let unsupported_input = Patch::from_composite("spec.list")
        .with_transform(ConvertTransform::new("string"));
    assert_eq!(
        apply(&unsupported_input, &composite).unwrap_err().code(),
        "INPUT_KIND_NOT_SUPPORTED"
    );

    let unknown_target = Patch::from_composite("spec.flag")
        .with_transform(ConvertTransform::new("duration"));
    assert_eq!(
        apply(&unknown_target, &composite).unwrap_err(),
        PatchError::ConversionPairNotSupported {
            from: ValueKind::String,
            to: "duration".to_string(),
        }
    );

    let to_bool = Patch::from_composite("spec.flag").with_transform(ConvertTransform::new("bool"));
    assert_eq!(
        apply(&to_bool, &composite).unwrap(),
        json!({"spec": {"flag": true}})
    );
}

#[test]
fn test_transforms_from_wire() {
    let patch: Patch = serde_json::from_value(json!({
        "type": "FromCompositeFieldPath",
        "fromFieldPath": "spec.tier",
        "toFieldPath": "spec.forProvider.instanceClass",
        "transforms": [
            {"type": "map", "map": {"gold": "db.r5.large", "silver": "db.t3.medium"}},
            {"type": "string", "string": {"fmt": "class=%s"}}
        ]
    }))
    .unwrap();

    let composed = apply(&patch, &json!({"spec": {"tier": "silver"}})).unwrap();
    assert_eq!(
        composed,
        json!({"spec": {"forProvider": {"instanceClass": "class=db.t3.medium"}}})
    );
}
