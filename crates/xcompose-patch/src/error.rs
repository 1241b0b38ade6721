//! Error types for patch resolution.

use xcompose_fieldpath::FieldPathError;

use crate::format::FormatError;
use crate::kind::ValueKind;

/// Errors raised while inlining patch sets or applying patches.
///
/// Every variant names the offending identifier so the caller can surface
/// it verbatim.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatchError {
    /// A patch references a patch set that is not declared.
    #[error("cannot find PatchSet by name {0}")]
    UndefinedPatchSet(String),

    /// A field required by the patch type is absent.
    #[error("{field} is required by type {patch_type}")]
    RequiredField {
        field: &'static str,
        patch_type: String,
    },

    /// The patch type discriminator is not recognised.
    #[error("patch type {0} is unsupported")]
    InvalidPatchType(String),

    /// A field path failed to parse or resolve.
    #[error(transparent)]
    FieldPath(#[from] FieldPathError),

    /// Map transform input is not a string.
    #[error("only input of type string is supported by the map transform, got {0}")]
    MapTypeNotSupported(ValueKind),

    /// Map transform key is absent from the pairs.
    #[error("key {0} is not found in map")]
    MapKeyNotFound(String),

    /// Math transform has no multiplier configured.
    #[error("no multiplier is set for the math transform")]
    MathNoMultiplier,

    /// Math transform input is not an integer.
    #[error("input is required to be a number for the math transform")]
    MathInputNonNumber,

    /// Math transform product does not fit in 64 bits.
    #[error("math transform result overflows int64")]
    MathOverflow,

    /// Convert transform input kind is never convertible.
    #[error("input type {0} is not supported by the convert transform")]
    ConvertInputTypeNotSupported(ValueKind),

    /// No conversion is implemented for the pair.
    #[error("conversion from {from} to {to} is not supported")]
    ConversionPairNotSupported { from: ValueKind, to: String },

    /// The input could not be parsed as the target type.
    #[error("cannot convert {value:?} to {to}")]
    InvalidConversionInput { value: String, to: String },

    /// A string transform or combine template failed.
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl PatchError {
    /// Get a stable, machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UndefinedPatchSet(_) => "UNDEFINED_PATCH_SET",
            Self::RequiredField { .. } => "REQUIRED_FIELD_MISSING",
            Self::InvalidPatchType(_) => "INVALID_PATCH_TYPE",
            Self::FieldPath(e) => e.code(),
            Self::MapTypeNotSupported(_) => "TYPE_NOT_SUPPORTED",
            Self::MapKeyNotFound(_) => "KEY_NOT_FOUND",
            Self::MathNoMultiplier => "MISSING_MULTIPLIER",
            Self::MathInputNonNumber => "NON_NUMERIC_INPUT",
            Self::MathOverflow => "MATH_OVERFLOW",
            Self::ConvertInputTypeNotSupported(_) => "INPUT_KIND_NOT_SUPPORTED",
            Self::ConversionPairNotSupported { .. } => "CONVERSION_PAIR_NOT_SUPPORTED",
            Self::InvalidConversionInput { .. } => "INVALID_CONVERSION_INPUT",
            Self::Format(_) => "FORMAT_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_identifier() {
        assert_eq!(
            PatchError::UndefinedPatchSet("patch-set-1".to_string()).to_string(),
            "cannot find PatchSet by name patch-set-1"
        );
        assert_eq!(
            PatchError::RequiredField {
                field: "FromFieldPath",
                patch_type: "FromCompositeFieldPath".to_string(),
            }
            .to_string(),
            "FromFieldPath is required by type FromCompositeFieldPath"
        );
        assert_eq!(
            PatchError::ConversionPairNotSupported {
                from: ValueKind::String,
                to: "[]int".to_string(),
            }
            .to_string(),
            "conversion from string to []int is not supported"
        );
    }

    #[test]
    fn test_field_path_code_passes_through() {
        let err = PatchError::from(FieldPathError::NotFound("a.b".to_string()));
        assert_eq!(err.code(), "PATH_NOT_FOUND");
        assert_eq!(err.to_string(), "a.b: no such field");
    }
}
