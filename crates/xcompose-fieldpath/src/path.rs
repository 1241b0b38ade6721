//! Field path parser.
//!
//! Parses dotted paths with bracketed accessors into segments:
//! - `metadata.name` - two field segments
//! - `spec.items[2]` - a field followed by a sequence index
//! - `metadata.labels['app.io/name']` - a quoted map key, may contain dots
//! - `metadata.labels[app]` - an unquoted map key

use std::fmt;

use crate::error::FieldPathError;

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Map key or named field.
    Field(String),

    /// Sequence index.
    Index(usize),
}

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a field path string.
    pub fn parse(path: &str) -> Result<Self, FieldPathError> {
        if path.is_empty() {
            return Err(FieldPathError::invalid(path, "path is empty"));
        }

        let bytes = path.as_bytes();
        let mut segments = Vec::new();
        let mut i = 0;
        // True at the start of the path and right after a '.'
        let mut want_field = true;

        while i < bytes.len() {
            match bytes[i] {
                b'.' => {
                    if want_field {
                        return Err(FieldPathError::invalid(
                            path,
                            format!("empty segment at {}", i),
                        ));
                    }
                    want_field = true;
                    i += 1;
                }
                b'[' => {
                    if want_field && i != 0 {
                        return Err(FieldPathError::invalid(
                            path,
                            format!("bracket at {} must follow a field", i),
                        ));
                    }
                    let (segment, next) = parse_bracket(path, i)?;
                    segments.push(segment);
                    i = next;
                    want_field = false;

                    if i < bytes.len() && bytes[i] != b'.' && bytes[i] != b'[' {
                        return Err(FieldPathError::invalid(
                            path,
                            format!("unexpected character after ']' at {}", i),
                        ));
                    }
                }
                b']' => {
                    return Err(FieldPathError::invalid(path, format!("unmatched ']' at {}", i)));
                }
                _ => {
                    let end = path[i..]
                        .find(|c: char| matches!(c, '.' | '[' | ']'))
                        .map(|offset| i + offset)
                        .unwrap_or(bytes.len());
                    segments.push(Segment::Field(path[i..end].to_string()));
                    i = end;
                    want_field = false;
                }
            }
        }

        if want_field {
            return Err(FieldPathError::invalid(path, "path ends with '.'"));
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    /// The path string as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Parse a bracketed accessor starting at `open`.
///
/// Returns the segment and the index just past the closing bracket.
fn parse_bracket(path: &str, open: usize) -> Result<(Segment, usize), FieldPathError> {
    let start = open + 1;
    let rest = &path[start..];

    if let Some(quoted) = rest.strip_prefix('\'') {
        let close = quoted
            .find("']")
            .ok_or_else(|| FieldPathError::invalid(path, format!("unterminated key at {}", open)))?;
        let key = &quoted[..close];
        // quote + key + quote + bracket
        return Ok((Segment::Field(key.to_string()), start + 1 + close + 2));
    }

    let close = rest
        .find(']')
        .ok_or_else(|| FieldPathError::invalid(path, format!("unterminated bracket at {}", open)))?;
    let content = &rest[..close];
    if content.is_empty() {
        return Err(FieldPathError::invalid(path, format!("empty brackets at {}", open)));
    }
    if content.contains(|c: char| matches!(c, '[' | '\'')) {
        return Err(FieldPathError::invalid(
            path,
            format!("unexpected character in brackets at {}", open),
        ));
    }

    let segment = if content.bytes().all(|b| b.is_ascii_digit()) {
        let index = content
            .parse::<usize>()
            .map_err(|e| FieldPathError::invalid(path, format!("bad index {}: {}", content, e)))?;
        Segment::Index(index)
    } else {
        Segment::Field(content.to_string())
    };

    Ok((segment, start + close + 1))
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
