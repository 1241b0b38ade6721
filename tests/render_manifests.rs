//! Rendering compositions loaded from manifest fixtures

mod fixtures;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use xcompose::patch::{Patch, PatchError};
use xcompose::{render_composition, ErrorPolicy, RenderError};

#[test]
fn test_render_database_composition() {
    let mut spec = fixtures::database_composition();
    let report =
        render_composition(&mut spec, &fixtures::database_composite(), ErrorPolicy::Abort).unwrap();

    assert_eq!(report.resources.len(), 2);
    assert_eq!(report.failure_count(), 0);

    let instance = &report.resources[0];
    assert_eq!(instance.name.as_deref(), Some("instance"));
    assert_eq!(
        instance.resource,
        json!({
            "apiVersion": "database.example.org/v1beta1",
            "kind": "Instance",
            "metadata": {
                "labels": {"team": "payments", "tier": "gold"},
                "annotations": {"example.org/owner": "orders-db"}
            },
            "spec": {
                "forProvider": {
                    "storageEncrypted": true,
                    "region": "eu-west-1",
                    "allocatedStorageMiB": 20480,
                    "engineVersion": "postgres-15"
                }
            }
        })
    );

    let replica = &report.resources[1];
    assert_eq!(replica.resource["spec"]["forProvider"]["count"], json!(3));
    assert_eq!(replica.resource["spec"]["forProvider"]["backupsEnabled"], json!(true));
    // Missing source fields are skipped
    assert_eq!(replica.resource["spec"]["forProvider"].get("ignored"), None);
}

#[test]
fn test_render_normalizes_spec_in_place() {
    let mut spec = fixtures::database_composition();
    render_composition(&mut spec, &fixtures::database_composite(), ErrorPolicy::Abort).unwrap();

    let has_reference = spec
        .resources
        .iter()
        .flat_map(|r| r.patches.iter())
        .any(|p| matches!(p, Patch::PatchSet(set) if set.combine.is_none()));
    assert!(!has_reference);
}

fn composite_with_region(region: &str) -> Value {
    let mut composite = fixtures::database_composite();
    composite["spec"]["region"] = json!(region);
    composite
}

#[test]
fn test_abort_on_unmapped_region() {
    let mut spec = fixtures::database_composition();
    let err = render_composition(&mut spec, &composite_with_region("ap"), ErrorPolicy::Abort)
        .unwrap_err();

    match err {
        RenderError::Patch {
            resource,
            index,
            source,
            ..
        } => {
            assert_eq!(resource, "instance");
            assert_eq!(index, 2);
            assert_eq!(source, PatchError::MapKeyNotFound("ap".to_string()));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_skip_on_unmapped_region() {
    let mut spec = fixtures::database_composition();
    let report =
        render_composition(&mut spec, &composite_with_region("ap"), ErrorPolicy::Skip).unwrap();

    assert_eq!(report.failure_count(), 1);
    let instance = &report.resources[0];
    assert_eq!(instance.failures[0].code, "KEY_NOT_FOUND");
    assert_eq!(instance.resource["spec"]["forProvider"].get("region"), None);
    assert_eq!(
        instance.resource["spec"]["forProvider"]["engineVersion"],
        json!("postgres-15")
    );
}

#[test]
fn test_undefined_patch_set_leaves_composition_unchanged() {
    let mut spec = fixtures::database_composition();
    spec.resources[1].patches.push(Patch::patch_set("networking"));
    let before = spec.clone();

    let err = render_composition(&mut spec, &fixtures::database_composite(), ErrorPolicy::Skip)
        .unwrap_err();

    assert_eq!(
        err.patch_error(),
        &PatchError::UndefinedPatchSet("networking".to_string())
    );
    assert_eq!(spec, before);
}

#[test]
fn test_inlined_composition_round_trips_through_yaml() {
    let mut spec = fixtures::database_composition();
    spec.inline_patch_sets().unwrap();

    let yaml = xcompose::manifest::to_output(&spec, xcompose::OutputFormat::Yaml, true).unwrap();
    let reloaded: Value = serde_yaml::from_str(&yaml).unwrap();
    let reloaded = xcompose::manifest::composition_from_value(reloaded).unwrap();

    assert_eq!(reloaded, spec);
}
