//! Patch definitions.
//!
//! A patch is tagged by `type` on the wire. Known types deserialize into
//! their own variant; any other discriminator is kept verbatim as
//! [`Patch::Unknown`] so it round-trips and is rejected only when applied.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::combine::Combine;
use crate::transform::Transform;

/// Discriminator for patches that copy a composite field to the composed resource.
pub const PATCH_TYPE_FROM_COMPOSITE_FIELD_PATH: &str = "FromCompositeFieldPath";

/// Discriminator for patch set references.
pub const PATCH_TYPE_PATCH_SET: &str = "PatchSet";

/// Where a resolved value goes.
///
/// On the wire this is the optional `toFieldPath` string: absent is
/// [`Destination::Unset`], empty is [`Destination::Temporary`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Write back to the path the value was read from.
    #[default]
    Unset,

    /// Stage the value in the temporary buffer for a later combine.
    Temporary,

    /// Write to an explicit path.
    Explicit(String),
}

impl Destination {
    pub fn is_unset(&self) -> bool {
        matches!(self, Destination::Unset)
    }

    /// Build from the optional wire string.
    pub fn from_wire(path: Option<String>) -> Self {
        match path {
            None => Destination::Unset,
            Some(p) if p.is_empty() => Destination::Temporary,
            Some(p) => Destination::Explicit(p),
        }
    }
}

impl From<&str> for Destination {
    fn from(path: &str) -> Self {
        Destination::from_wire(Some(path.to_string()))
    }
}

impl Serialize for Destination {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Destination::Unset => serializer.serialize_none(),
            Destination::Temporary => serializer.serialize_str(""),
            Destination::Explicit(path) => serializer.serialize_str(path),
        }
    }
}

impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(Destination::from_wire)
    }
}

/// Copies a field from the composite resource to the composed resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPathPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_field_path: Option<String>,

    #[serde(default, skip_serializing_if = "Destination::is_unset")]
    pub to_field_path: Destination,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<Transform>,
}

/// References a named patch set, optionally combining its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchSetPatch {
    pub patch_set_name: String,

    #[serde(default, skip_serializing_if = "Destination::is_unset")]
    pub to_field_path: Destination,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combine: Option<Combine>,
}

/// A patch whose type is not recognised, kept as written.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownPatch {
    pub patch_type: String,
    pub fields: Map<String, Value>,
}

/// A single patch.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    FromCompositeFieldPath(FieldPathPatch),
    PatchSet(PatchSetPatch),
    Unknown(UnknownPatch),
}

impl Patch {
    /// Field path patch reading from `from`, with default destination.
    pub fn from_composite(from: impl Into<String>) -> Self {
        Patch::FromCompositeFieldPath(FieldPathPatch {
            from_field_path: Some(from.into()),
            ..Default::default()
        })
    }

    /// Reference to a patch set by name.
    pub fn patch_set(name: impl Into<String>) -> Self {
        Patch::PatchSet(PatchSetPatch {
            patch_set_name: name.into(),
            to_field_path: Destination::Unset,
            combine: None,
        })
    }

    /// The wire discriminator of this patch.
    pub fn patch_type(&self) -> &str {
        match self {
            Patch::FromCompositeFieldPath(_) => PATCH_TYPE_FROM_COMPOSITE_FIELD_PATH,
            Patch::PatchSet(_) => PATCH_TYPE_PATCH_SET,
            Patch::Unknown(u) => &u.patch_type,
        }
    }

    /// Replace the destination of this patch.
    pub fn with_destination(mut self, destination: Destination) -> Self {
        match &mut self {
            Patch::FromCompositeFieldPath(p) => p.to_field_path = destination,
            Patch::PatchSet(p) => p.to_field_path = destination,
            Patch::Unknown(u) => match destination {
                Destination::Unset => {
                    u.fields.remove("toFieldPath");
                }
                Destination::Temporary => {
                    u.fields
                        .insert("toFieldPath".to_string(), Value::String(String::new()));
                }
                Destination::Explicit(path) => {
                    u.fields.insert("toFieldPath".to_string(), Value::String(path));
                }
            },
        }
        self
    }

    /// Append a transform. Only field path patches carry transforms.
    pub fn with_transform(mut self, transform: impl Into<Transform>) -> Self {
        if let Patch::FromCompositeFieldPath(p) = &mut self {
            p.transforms.push(transform.into());
        }
        self
    }

    /// Set a combine. Only patch set references carry a combine.
    pub fn with_combine(mut self, combine: Combine) -> Self {
        if let Patch::PatchSet(p) = &mut self {
            p.combine = Some(combine);
        }
        self
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "type")]
    patch_type: &'a str,
    #[serde(flatten)]
    body: &'a T,
}

impl Serialize for Patch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let patch_type = self.patch_type();
        match self {
            Patch::FromCompositeFieldPath(body) => {
                Tagged { patch_type, body }.serialize(serializer)
            }
            Patch::PatchSet(body) => Tagged { patch_type, body }.serialize(serializer),
            Patch::Unknown(u) => Tagged {
                patch_type,
                body: &u.fields,
            }
            .serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
struct RawPatch {
    #[serde(rename = "type")]
    patch_type: String,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Patch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPatch::deserialize(deserializer)?;
        if raw.patch_type == PATCH_TYPE_FROM_COMPOSITE_FIELD_PATH {
            serde_json::from_value(Value::Object(raw.fields))
                .map(Patch::FromCompositeFieldPath)
                .map_err(D::Error::custom)
        } else if raw.patch_type == PATCH_TYPE_PATCH_SET {
            serde_json::from_value(Value::Object(raw.fields))
                .map(Patch::PatchSet)
                .map_err(D::Error::custom)
        } else {
            Ok(Patch::Unknown(UnknownPatch {
                patch_type: raw.patch_type,
                fields: raw.fields,
            }))
        }
    }
}
