//! Raw cell values as read from a source table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell from an instrument export, before coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Textual cell content, kept verbatim.
    Text(String),
    /// Numeric cell content (JSON sources).
    Number(f64),
    /// Empty cell or a recognized null token.
    Absent,
}

impl RawValue {
    /// Build a value from a text cell, mapping null tokens to `Absent`.
    pub fn from_cell(cell: &str) -> Self {
        if is_null_value(cell) {
            RawValue::Absent
        } else {
            RawValue::Text(cell.to_string())
        }
    }

    /// Build a value from a JSON scalar.
    ///
    /// Arrays and objects have no tabular meaning and are kept as their JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Absent,
            serde_json::Value::Number(n) => n.as_f64().map_or(RawValue::Absent, RawValue::Number),
            serde_json::Value::String(s) => RawValue::from_cell(s),
            serde_json::Value::Bool(b) => RawValue::Text(b.to_string()),
            other => RawValue::Text(other.to_string()),
        }
    }

    /// Returns true for `Absent`.
    pub fn is_absent(&self) -> bool {
        matches!(self, RawValue::Absent)
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Absent
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => f.write_str(s),
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Absent => Ok(()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(cell: &str) -> Self {
        RawValue::from_cell(cell)
    }
}

impl From<String> for RawValue {
    fn from(cell: String) -> Self {
        RawValue::from_cell(&cell)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Absent, Into::into)
    }
}

/// Check if a cell represents a missing/null value.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
        || trimmed == "-"
}
