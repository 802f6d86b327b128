//! Field mapping: lookup, coercion, defaults and batch assembly.
//!
//! Adapters read fields through [`Field`] (via `Row::field`), which
//! wraps the plain coercers in [`coerce`] and attributes failures to a
//! row and column.

mod assemble;
pub mod coerce;
mod defaults;
mod extract;

pub use assemble::{BatchAssembler, BatchReport, RowPolicy, SkippedRow};
pub use coerce::{
    CoercionError, RoundingPolicy, TargetType, as_float, as_float_or_none,
    as_rounded_int_or_none, as_string, as_string_or_none,
};
pub use defaults::{Fallback, first_not_none, first_present};
pub use extract::{Field, get_optional, get_required};
