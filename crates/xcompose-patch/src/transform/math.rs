//! Math transform: integer multiplication.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PatchError;

/// Multiplies integer inputs by a fixed factor.
///
/// Only integers are accepted. Floats, and unsigned values that do not fit
/// in `i64`, fail with [`PatchError::MathInputNonNumber`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiply: Option<i64>,
}

impl MathTransform {
    pub fn multiply(factor: i64) -> Self {
        Self {
            multiply: Some(factor),
        }
    }

    pub fn resolve(&self, input: &Value) -> Result<Value, PatchError> {
        let factor = self.multiply.ok_or(PatchError::MathNoMultiplier)?;
        let n = match input {
            Value::Number(n) => n.as_i64().ok_or(PatchError::MathInputNonNumber)?,
            _ => return Err(PatchError::MathInputNonNumber),
        };
        n.checked_mul(factor)
            .map(Value::from)
            .ok_or(PatchError::MathOverflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_multiplier() {
        let err = MathTransform::default().resolve(&json!(25)).unwrap_err();
        assert_eq!(err, PatchError::MathNoMultiplier);
    }

    #[test]
    fn test_non_number_input() {
        let err = MathTransform::multiply(2).resolve(&json!("ola")).unwrap_err();
        assert_eq!(err, PatchError::MathInputNonNumber);
    }

    #[test]
    fn test_success() {
        assert_eq!(MathTransform::multiply(2).resolve(&json!(3)).unwrap(), json!(6));
    }

    #[test]
    fn test_success_int64() {
        let input = Value::from(3_i64);
        assert_eq!(MathTransform::multiply(2).resolve(&input).unwrap(), json!(6_i64));
    }

    #[test]
    fn test_float_fails_closed() {
        let err = MathTransform::multiply(2).resolve(&json!(1.5)).unwrap_err();
        assert_eq!(err, PatchError::MathInputNonNumber);
    }

    #[test]
    fn test_negative_and_overflow() {
        assert_eq!(MathTransform::multiply(-3).resolve(&json!(4)).unwrap(), json!(-12));
        let err = MathTransform::multiply(2)
            .resolve(&json!(i64::MAX))
            .unwrap_err();
        assert_eq!(err, PatchError::MathOverflow);
    }
}
