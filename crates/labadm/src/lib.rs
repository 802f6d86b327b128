//! labadm: convert laboratory instrument exports into the Allotrope data model.
//!
//! An export is read into a [`Table`] of named columns. A per-instrument
//! [`InstrumentAdapter`] maps each row to one measurement group, looking
//! fields up by column name and coercing them with explicit absence
//! handling. The [`BatchAssembler`] collects the groups, in row order, with
//! the instrument metadata into a [`Data`] batch.
//!
//! # Example
//!
//! ```no_run
//! use labadm::{Converter, Instrument};
//!
//! let converter = Converter::new();
//! let result = converter
//!     .convert_file("vi_cell_blu_export.csv", Instrument::ViCellBlu)
//!     .unwrap();
//!
//! println!("Measurements: {}", result.data.measurement_count());
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod input;
pub mod mapping;
pub mod schema;

mod converter;

pub use crate::converter::{ConversionResult, Converter};
pub use adapters::{Instrument, InstrumentAdapter, ViCellBluAdapter, ViCellXrAdapter};
pub use config::{ConvertConfig, MappingConfig};
pub use error::{AdmError, Result};
pub use input::{Parser, ParserConfig, RawValue, Row, SourceMetadata, Table};
pub use mapping::{BatchAssembler, BatchReport, RoundingPolicy, RowPolicy};
pub use schema::{Data, Measurement, MeasurementGroup, Metadata};
