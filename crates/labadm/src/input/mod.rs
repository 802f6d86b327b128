//! Input parsing and data source handling.

mod parser;
mod source;
mod value;

pub use parser::{Parser, ParserConfig};
pub use source::{Row, SourceMetadata, Table};
pub use value::{RawValue, is_null_value};
