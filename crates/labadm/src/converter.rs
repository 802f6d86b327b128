//! Main Converter struct and public API.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::adapters::{Instrument, InstrumentAdapter};
use crate::config::ConvertConfig;
use crate::error::{AdmError, Result};
use crate::input::{Parser, SourceMetadata, Table};
use crate::mapping::{BatchAssembler, BatchReport};
use crate::schema::Data;

/// Result of converting one export file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Instrument the file was read as.
    pub instrument: Instrument,
    /// Converted measurements.
    pub data: Data,
    /// Row outcome counts.
    pub report: BatchReport,
}

impl ConversionResult {
    /// Save the result as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_err = |source| AdmError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let writer = BufWriter::new(File::create(path).map_err(io_err)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// The main conversion engine.
pub struct Converter {
    config: ConvertConfig,
    parser: Parser,
}

impl Converter {
    /// Create a converter with default configuration.
    pub fn new() -> Self {
        Self::with_config(ConvertConfig::default())
    }

    /// Create a converter with custom configuration.
    pub fn with_config(config: ConvertConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Build the adapter for `instrument` with this converter's mapping settings.
    pub fn adapter(&self, instrument: Instrument) -> Box<dyn InstrumentAdapter> {
        instrument.adapter(self.config.mapping.clone())
    }

    /// Read an export file and convert it.
    pub fn convert_file(
        &self,
        path: impl AsRef<Path>,
        instrument: Instrument,
    ) -> Result<ConversionResult> {
        let path = path.as_ref();
        info!("Converting {} as {}", path.display(), instrument.label());

        let (table, source) = self.parser.parse_file(path)?;
        let (data, report) = self.convert_table(&table, instrument)?;

        Ok(ConversionResult {
            source,
            instrument,
            data,
            report,
        })
    }

    /// Convert an in-memory table.
    pub fn convert_table(
        &self,
        table: &Table,
        instrument: Instrument,
    ) -> Result<(Data, BatchReport)> {
        let adapter = self.adapter(instrument);

        let missing = adapter.missing_columns(table);
        if !missing.is_empty() {
            warn!(
                "{}: required columns not in header: {}",
                adapter.name(),
                missing.join(", ")
            );
        }

        let metadata = Arc::new(adapter.metadata());
        BatchAssembler::new(adapter.as_ref()).build_with_report(table, metadata)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}
