//! Conversion of raw cell values to target semantic types.
//!
//! The `_or_none` variants treat absence as `None`. Every variant fails
//! when a value is present but cannot be converted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::{RawValue, is_null_value};

/// Target type of a coercion, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Float,
    Integer,
    String,
}

impl TargetType {
    /// Lowercase name of the type.
    pub fn name(&self) -> &'static str {
        match self {
            TargetType::Float => "float",
            TargetType::Integer => "integer",
            TargetType::String => "string",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a raw value could not be coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercionError {
    /// The value is absent and the coercion requires one.
    Absent,
    /// The value is present but not convertible.
    Invalid { value: String, target: TargetType },
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionError::Absent => f.write_str("value is absent"),
            CoercionError::Invalid { value, target } => {
                write!(f, "cannot convert '{}' to {}", value, target)
            }
        }
    }
}

impl std::error::Error for CoercionError {}

/// How a fractional value is rounded to an integer count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Ties go to the even neighbour (2.5 -> 2, 3.5 -> 4).
    #[default]
    HalfEven,
    /// Ties go away from zero (2.5 -> 3, -2.5 -> -3).
    HalfUp,
}

impl RoundingPolicy {
    /// Round `value` to an integral float under this policy.
    pub fn round(self, value: f64) -> f64 {
        match self {
            RoundingPolicy::HalfEven => value.round_ties_even(),
            RoundingPolicy::HalfUp => value.round(),
        }
    }
}

/// The raw value if it carries data. Null-token text counts as absent.
pub(crate) fn present(raw: &RawValue) -> Option<&RawValue> {
    match raw {
        RawValue::Absent => None,
        RawValue::Text(s) if is_null_value(s) => None,
        other => Some(other),
    }
}

fn invalid(raw: &RawValue, target: TargetType) -> CoercionError {
    CoercionError::Invalid {
        value: raw.to_string(),
        target,
    }
}

/// Convert a present value to a finite float.
pub fn as_float(raw: &RawValue) -> Result<f64, CoercionError> {
    as_float_or_none(raw)?.ok_or(CoercionError::Absent)
}

/// Like [`as_float`], but absence yields `None`.
pub fn as_float_or_none(raw: &RawValue) -> Result<Option<f64>, CoercionError> {
    let Some(value) = present(raw) else {
        return Ok(None);
    };

    let parsed = match value {
        RawValue::Number(n) => Some(*n),
        RawValue::Text(s) => s.trim().parse::<f64>().ok(),
        RawValue::Absent => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(invalid(value, TargetType::Float)),
    }
}

/// Convert a present value to a string. Text is trimmed.
pub fn as_string(raw: &RawValue) -> Result<String, CoercionError> {
    as_string_or_none(raw)?.ok_or(CoercionError::Absent)
}

/// Like [`as_string`], but absence yields `None`.
pub fn as_string_or_none(raw: &RawValue) -> Result<Option<String>, CoercionError> {
    Ok(present(raw).map(|value| match value {
        RawValue::Text(s) => s.trim().to_string(),
        other => other.to_string(),
    }))
}

/// Convert to a float, then round to an integer under `policy`.
pub fn as_rounded_int_or_none(
    raw: &RawValue,
    policy: RoundingPolicy,
) -> Result<Option<i64>, CoercionError> {
    let Some(value) = as_float_or_none(raw)? else {
        return Ok(None);
    };

    let rounded = policy.round(value);
    if (i64::MIN as f64..i64::MAX as f64).contains(&rounded) {
        Ok(Some(rounded as i64))
    } else {
        Err(invalid(raw, TargetType::Integer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_string())
    }

    #[test]
    fn test_as_float() {
        assert_eq!(as_float(&text("75.0")), Ok(75.0));
        assert_eq!(as_float(&text(" 1.5e3 ")), Ok(1500.0));
        assert_eq!(as_float(&RawValue::Number(2.5)), Ok(2.5));
        assert_eq!(as_float(&RawValue::Absent), Err(CoercionError::Absent));
        assert_eq!(
            as_float(&text("abc")),
            Err(CoercionError::Invalid {
                value: "abc".to_string(),
                target: TargetType::Float
            })
        );
    }

    #[test]
    fn test_as_float_rejects_non_finite() {
        assert!(matches!(
            as_float(&text("inf")),
            Err(CoercionError::Invalid { .. })
        ));
        assert!(matches!(
            as_float(&RawValue::Number(f64::NAN)),
            Err(CoercionError::Invalid { .. })
        ));
    }

    #[test]
    fn test_as_float_or_none() {
        assert_eq!(as_float_or_none(&RawValue::Absent), Ok(None));
        assert_eq!(as_float_or_none(&text("NA")), Ok(None));
        assert_eq!(as_float_or_none(&text("")), Ok(None));
        assert_eq!(as_float_or_none(&text("0.5")), Ok(Some(0.5)));
        assert!(as_float_or_none(&text("12 cells")).is_err());
    }

    #[test]
    fn test_as_string() {
        assert_eq!(as_string(&text(" CHO ")), Ok("CHO".to_string()));
        assert_eq!(as_string(&RawValue::Number(5.0)), Ok("5".to_string()));
        assert_eq!(as_string(&RawValue::Absent), Err(CoercionError::Absent));
        assert_eq!(as_string_or_none(&RawValue::Absent), Ok(None));
        assert_eq!(as_string_or_none(&text("")), Ok(None));
        assert_eq!(as_string_or_none(&text("x")), Ok(Some("x".to_string())));
    }

    #[test]
    fn test_as_rounded_int_or_none() {
        let policy = RoundingPolicy::default();
        assert_eq!(as_rounded_int_or_none(&RawValue::Absent, policy), Ok(None));
        assert_eq!(as_rounded_int_or_none(&text("5"), policy), Ok(Some(5)));
        assert_eq!(as_rounded_int_or_none(&text("5.6"), policy), Ok(Some(6)));
        assert_eq!(as_rounded_int_or_none(&text("5.4"), policy), Ok(Some(5)));
        assert_eq!(as_rounded_int_or_none(&RawValue::Number(120.0), policy), Ok(Some(120)));
        assert!(as_rounded_int_or_none(&text("many"), policy).is_err());
        assert!(as_rounded_int_or_none(&text("1e30"), policy).is_err());
    }

    #[test]
    fn test_rounding_policies_differ_on_ties() {
        assert_eq!(RoundingPolicy::HalfEven.round(2.5), 2.0);
        assert_eq!(RoundingPolicy::HalfEven.round(3.5), 4.0);
        assert_eq!(RoundingPolicy::HalfEven.round(-2.5), -2.0);
        assert_eq!(RoundingPolicy::HalfUp.round(2.5), 3.0);
        assert_eq!(RoundingPolicy::HalfUp.round(-2.5), -3.0);
        assert_eq!(RoundingPolicy::HalfUp.round(2.4), 2.0);
    }
}
