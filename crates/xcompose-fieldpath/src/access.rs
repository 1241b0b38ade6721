//! Read and write values at a field path.
//!
//! Reads fail when any step is absent or the wrong kind. Writes create
//! intermediate maps (replacing `null`) but never create or extend
//! sequences. A failed write leaves the document untouched.

use serde_json::{Map, Value};

use crate::error::FieldPathError;
use crate::path::{FieldPath, Segment};

/// Read a copy of the value at `path`.
pub fn read(doc: &Value, path: &str) -> Result<Value, FieldPathError> {
    FieldPath::parse(path)?.get(doc).cloned()
}

/// Write `value` at `path`, creating intermediate maps as needed.
pub fn write(doc: &mut Value, path: &str, value: Value) -> Result<(), FieldPathError> {
    FieldPath::parse(path)?.set(doc, value)
}

impl FieldPath {
    /// Borrow the value at this path.
    pub fn get<'a>(&self, doc: &'a Value) -> Result<&'a Value, FieldPathError> {
        let mut cur = doc;
        for segment in self.segments() {
            cur = match (segment, cur) {
                (Segment::Field(key), Value::Object(map)) => map.get(key),
                (Segment::Index(index), Value::Array(items)) => items.get(*index),
                _ => None,
            }
            .ok_or_else(|| self.not_found())?;
        }
        Ok(cur)
    }

    /// Set the value at this path.
    pub fn set(&self, doc: &mut Value, value: Value) -> Result<(), FieldPathError> {
        self.check_writable(doc)?;

        let (last, parents) = self
            .segments()
            .split_last()
            .ok_or_else(|| self.not_found())?;

        let mut cur = doc;
        for segment in parents {
            cur = self.child_mut(cur, segment)?;
        }

        match last {
            Segment::Field(key) => {
                if cur.is_null() {
                    *cur = Value::Object(Map::new());
                }
                match cur {
                    Value::Object(map) => {
                        map.insert(key.clone(), value);
                        Ok(())
                    }
                    _ => Err(self.not_found()),
                }
            }
            Segment::Index(index) => match cur {
                Value::Array(items) if *index < items.len() => {
                    items[*index] = value;
                    Ok(())
                }
                _ => Err(self.not_found()),
            },
        }
    }

    /// Walk the document without mutating it and confirm a write can succeed.
    ///
    /// Missing or null nodes may only be followed by field segments, since
    /// those are the only containers a write creates.
    fn check_writable(&self, doc: &Value) -> Result<(), FieldPathError> {
        let mut cur = Some(doc);
        for segment in self.segments() {
            cur = match (cur, segment) {
                (None | Some(Value::Null), Segment::Field(_)) => None,
                (Some(Value::Object(map)), Segment::Field(key)) => map.get(key),
                (Some(Value::Array(items)), Segment::Index(index)) if *index < items.len() => {
                    items.get(*index)
                }
                _ => return Err(self.not_found()),
            };
        }
        Ok(())
    }

    fn child_mut<'a>(
        &self,
        cur: &'a mut Value,
        segment: &Segment,
    ) -> Result<&'a mut Value, FieldPathError> {
        match segment {
            Segment::Field(key) => {
                if cur.is_null() {
                    *cur = Value::Object(Map::new());
                }
                match cur {
                    Value::Object(map) => Ok(map.entry(key.clone()).or_insert(Value::Null)),
                    _ => Err(self.not_found()),
                }
            }
            Segment::Index(index) => match cur {
                Value::Array(items) => items.get_mut(*index).ok_or_else(|| self.not_found()),
                _ => Err(self.not_found()),
            },
        }
    }

    fn not_found(&self) -> FieldPathError {
        FieldPathError::NotFound(self.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_read_nested() {
        let doc = json!({"metadata": {"labels": {"Test": "blah"}}});
        assert_eq!(read(&doc, "metadata.labels").unwrap(), json!({"Test": "blah"}));
        assert_eq!(read(&doc, "metadata.labels['Test']").unwrap(), json!("blah"));
    }

    #[test]
    fn test_read_index() {
        let doc = json!({"spec": {"ports": [80, 443]}});
        assert_eq!(read(&doc, "spec.ports[1]").unwrap(), json!(443));
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let doc = json!({"metadata": {"name": "cp"}});
        let err = read(&doc, "metadata.namespace").unwrap_err();
        assert_eq!(err, FieldPathError::NotFound("metadata.namespace".to_string()));
    }

    #[test]
    fn test_read_through_scalar_is_not_found() {
        let doc = json!({"metadata": {"name": "cp"}});
        assert!(read(&doc, "metadata.name.first").unwrap_err().is_not_found());
        assert!(read(&doc, "metadata[0]").unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_index_out_of_range() {
        let doc = json!({"items": [1]});
        assert!(read(&doc, "items[1]").unwrap_err().is_not_found());
    }

    #[test]
    fn test_write_creates_intermediate_maps() {
        let mut doc = json!({"metadata": {"name": "cd"}});
        write(&mut doc, "spec.forProvider.region", json!("us-east-1")).unwrap();
        assert_eq!(
            doc,
            json!({
                "metadata": {"name": "cd"},
                "spec": {"forProvider": {"region": "us-east-1"}}
            })
        );
    }

    #[test]
    fn test_write_into_null_document() {
        let mut doc = Value::Null;
        write(&mut doc, "a.b", json!(1)).unwrap();
        assert_eq!(doc, json!({"a": {"b": 1}}));
    }

    #[test]
    fn test_write_replaces_existing() {
        let mut doc = json!({"metadata": {"labels": {"Test": "old", "keep": "me"}}});
        write(&mut doc, "metadata.labels['Test']", json!("new")).unwrap();
        assert_eq!(doc, json!({"metadata": {"labels": {"Test": "new", "keep": "me"}}}));
    }

    #[test]
    fn test_write_existing_index() {
        let mut doc = json!({"spec": {"containers": [{"name": "a"}]}});
        write(&mut doc, "spec.containers[0].image", json!("nginx")).unwrap();
        assert_eq!(doc, json!({"spec": {"containers": [{"name": "a", "image": "nginx"}]}}));
    }

    #[test]
    fn test_write_does_not_extend_sequences() {
        let mut doc = json!({"spec": {"containers": []}});
        let before = doc.clone();
        let err = write(&mut doc, "spec.containers[0].name", json!("a")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_write_does_not_create_sequences() {
        let mut doc = json!({});
        let err = write(&mut doc, "spec.items[0]", json!("a")).unwrap_err();
        assert!(err.is_not_found());
        // No partial containers left behind
        assert_eq!(doc, json!({}));
    }

    #[test]
    fn test_write_through_scalar_fails() {
        let mut doc = json!({"spec": "scalar"});
        let err = write(&mut doc, "spec.field", json!(1)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(doc, json!({"spec": "scalar"}));
    }

    #[test]
    fn test_write_invalid_path() {
        let mut doc = json!({});
        let err = write(&mut doc, "a..b", json!(1)).unwrap_err();
        assert_eq!(err.code(), "INVALID_FIELD_PATH");
    }
}
