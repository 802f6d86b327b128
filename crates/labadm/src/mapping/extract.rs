//! Field lookup by column name, with row and field context on failure.

use crate::error::{AdmError, Result};
use crate::input::{RawValue, Row};

use super::coerce::{self, CoercionError, RoundingPolicy};

/// Get a field that must be present and non-empty.
pub fn get_required<'r>(row: &'r Row, field: &str) -> Result<&'r RawValue> {
    get_optional(row, field).ok_or_else(|| AdmError::MissingField {
        row: row.index(),
        field: field.to_string(),
    })
}

/// Get a field, returning `None` for a missing column, an absent cell, or
/// text that is empty or a null token.
pub fn get_optional<'r>(row: &'r Row, field: &str) -> Option<&'r RawValue> {
    row.get(field).and_then(coerce::present)
}

/// A named field of one row, ready to be coerced.
#[derive(Debug, Clone, Copy)]
pub struct Field<'r> {
    row: usize,
    name: &'r str,
    raw: &'r RawValue,
}

static ABSENT: RawValue = RawValue::Absent;

impl Row {
    /// Access a field by column name. A missing column reads as absent.
    pub fn field<'r>(&'r self, name: &'r str) -> Field<'r> {
        Field {
            row: self.index(),
            name,
            raw: self.get(name).unwrap_or(&ABSENT),
        }
    }
}

impl<'r> Field<'r> {
    /// Column name.
    pub fn name(&self) -> &'r str {
        self.name
    }

    /// Raw cell value (`Absent` for a missing column).
    pub fn raw(&self) -> &'r RawValue {
        self.raw
    }

    /// Required float.
    pub fn float(&self) -> Result<f64> {
        coerce::as_float(self.raw).map_err(|e| self.contextualize(e))
    }

    /// Optional float.
    pub fn float_or_none(&self) -> Result<Option<f64>> {
        coerce::as_float_or_none(self.raw).map_err(|e| self.contextualize(e))
    }

    /// Required string.
    pub fn string(&self) -> Result<String> {
        coerce::as_string(self.raw).map_err(|e| self.contextualize(e))
    }

    /// Optional string.
    pub fn string_or_none(&self) -> Result<Option<String>> {
        coerce::as_string_or_none(self.raw).map_err(|e| self.contextualize(e))
    }

    /// Optional count, rounded to the nearest integer.
    pub fn rounded_int_or_none(&self, policy: RoundingPolicy) -> Result<Option<i64>> {
        coerce::as_rounded_int_or_none(self.raw, policy).map_err(|e| self.contextualize(e))
    }

    fn contextualize(&self, error: CoercionError) -> AdmError {
        match error {
            CoercionError::Absent => AdmError::MissingField {
                row: self.row,
                field: self.name.to_string(),
            },
            CoercionError::Invalid { value, target } => AdmError::TypeCoercion {
                row: self.row,
                field: self.name.to_string(),
                value,
                target: target.name(),
            },
        }
    }
}
