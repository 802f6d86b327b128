//! Beckman Coulter Vi-CELL XR export adapter.
//!
//! XR exports carry no analyst column, and the timestamp header changed
//! between software releases, so the first populated candidate is used.

use crate::config::MappingConfig;
use crate::error::{AdmError, Result};
use crate::input::{Row, Table};
use crate::mapping::{RowPolicy, first_not_none, get_optional};
use crate::schema::{Measurement, MeasurementGroup, Metadata, new_measurement_id};

use super::{BRIGHTFIELD_DETECTION, CELL_COUNTER_DEVICE_TYPE, InstrumentAdapter};

pub const SOFTWARE_NAME: &str = "Vi-Cell XR";
pub const DEFAULT_MODEL_NUMBER: &str = "Vi-Cell XR";
pub const DEFAULT_ANALYST: &str = "Vi-Cell XR User";

/// Export column names.
pub mod columns {
    /// Timestamp headers, newest release first.
    pub const TIMESTAMPS: &[&str] = &["Sample date", "Sample date/time", "RunDate"];
    pub const SAMPLE_ID: &str = "Sample ID";
    pub const CELL_TYPE: &str = "Cell type";
    pub const MIN_DIAMETER: &str = "Minimum Diameter (microns)";
    pub const MAX_DIAMETER: &str = "Maximum Diameter (microns)";
    pub const DILUTION: &str = "Dilution factor";
    pub const VIABILITY: &str = "Viability (%)";
    pub const VIABLE_DENSITY: &str = "Viable cells/ml (x10^6)";
    pub const TOTAL_DENSITY: &str = "Total cells/ml (x10^6)";
    pub const AVERAGE_DIAMETER: &str = "Avg. diam. (microns)";
    pub const AVERAGE_CIRCULARITY: &str = "Avg. circ.";
    pub const TOTAL_COUNT: &str = "Total cells";
    pub const VIABLE_COUNT: &str = "Viable cells";
}

const REQUIRED: &[&str] = &[
    columns::SAMPLE_ID,
    columns::VIABILITY,
    columns::VIABLE_DENSITY,
];

/// Maps Vi-CELL XR result exports, one measurement per row.
#[derive(Debug, Clone, Default)]
pub struct ViCellXrAdapter {
    config: MappingConfig,
}

impl ViCellXrAdapter {
    /// Create an adapter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter with custom mapping settings.
    pub fn with_config(config: MappingConfig) -> Self {
        Self { config }
    }

    fn timestamp(&self, row: &Row) -> Result<String> {
        let column = first_not_none(columns::TIMESTAMPS.iter().copied(), |c| {
            get_optional(row, c).map(|_| c)
        })
        .ok_or_else(|| AdmError::MissingField {
            row: row.index(),
            field: columns::TIMESTAMPS[0].to_string(),
        })?;

        row.field(column).string()
    }

    fn measurement(&self, row: &Row) -> Result<Measurement> {
        let rounding = self.config.rounding;

        Ok(Measurement {
            measurement_identifier: new_measurement_id(),
            timestamp: self.timestamp(row)?,
            sample_identifier: row.field(columns::SAMPLE_ID).string()?,
            cell_type_processing_method: row.field(columns::CELL_TYPE).string_or_none()?,
            minimum_cell_diameter_setting: row.field(columns::MIN_DIAMETER).float_or_none()?,
            maximum_cell_diameter_setting: row.field(columns::MAX_DIAMETER).float_or_none()?,
            cell_density_dilution_factor: row.field(columns::DILUTION).float_or_none()?,
            viability: row.field(columns::VIABILITY).float()?,
            viable_cell_density: row.field(columns::VIABLE_DENSITY).float()?,
            total_cell_count: row.field(columns::TOTAL_COUNT).rounded_int_or_none(rounding)?,
            total_cell_density: row.field(columns::TOTAL_DENSITY).float_or_none()?,
            average_total_cell_diameter: row.field(columns::AVERAGE_DIAMETER).float_or_none()?,
            average_live_cell_diameter: None,
            viable_cell_count: row.field(columns::VIABLE_COUNT).rounded_int_or_none(rounding)?,
            average_total_cell_circularity: row
                .field(columns::AVERAGE_CIRCULARITY)
                .float_or_none()?,
            average_viable_cell_circularity: None,
            analyst: self
                .config
                .default_analyst
                .clone()
                .unwrap_or_else(|| DEFAULT_ANALYST.to_string()),
        })
    }
}

impl InstrumentAdapter for ViCellXrAdapter {
    fn name(&self) -> &'static str {
        "vi-cell-xr"
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            device_type: CELL_COUNTER_DEVICE_TYPE.to_string(),
            detection_type: BRIGHTFIELD_DETECTION.to_string(),
            model_number: DEFAULT_MODEL_NUMBER.to_string(),
            software_name: SOFTWARE_NAME.to_string(),
        }
    }

    fn required_columns(&self) -> &'static [&'static str] {
        REQUIRED
    }

    fn column_requirements(&self) -> Vec<String> {
        std::iter::once(columns::TIMESTAMPS.join(" | "))
            .chain(REQUIRED.iter().map(|c| c.to_string()))
            .collect()
    }

    fn build_group(&self, row: &Row) -> Result<MeasurementGroup> {
        self.measurement(row).map(MeasurementGroup::single)
    }

    fn row_policy(&self) -> RowPolicy {
        self.config.row_policy.unwrap_or_default()
    }

    fn missing_columns(&self, table: &Table) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = REQUIRED
            .iter()
            .copied()
            .filter(|c| !table.has_column(c))
            .collect();
        if !columns::TIMESTAMPS.iter().any(|c| table.has_column(c)) {
            missing.push(columns::TIMESTAMPS[0]);
        }
        missing
    }
}
