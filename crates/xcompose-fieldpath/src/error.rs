//! Field path error types.

/// Errors raised while parsing or resolving a field path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldPathError {
    /// The path string is malformed.
    #[error("invalid field path {path:?}: {reason}")]
    Invalid { path: String, reason: String },

    /// The path cannot be resolved against the document.
    #[error("{0}: no such field")]
    NotFound(String),
}

impl FieldPathError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Get a machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invalid { .. } => "INVALID_FIELD_PATH",
            Self::NotFound(_) => "PATH_NOT_FOUND",
        }
    }

    /// Whether this error means the path does not resolve.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
