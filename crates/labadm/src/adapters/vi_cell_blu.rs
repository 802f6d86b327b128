//! Beckman Coulter Vi-CELL BLU export adapter.

use crate::config::MappingConfig;
use crate::error::Result;
use crate::input::Row;
use crate::mapping::{Fallback, RowPolicy, first_present};
use crate::schema::{Measurement, MeasurementGroup, Metadata, new_measurement_id};

use super::{BRIGHTFIELD_DETECTION, CELL_COUNTER_DEVICE_TYPE, InstrumentAdapter};

pub const SOFTWARE_NAME: &str = "Vi-Cell BLU";
pub const DEFAULT_MODEL_NUMBER: &str = "Vi-Cell BLU";
pub const DEFAULT_ANALYST: &str = "Vi-Cell BLU User";

/// Export column names.
pub mod columns {
    pub const TIMESTAMP: &str = "Analysis date/time";
    pub const SAMPLE_ID: &str = "Sample ID";
    pub const CELL_TYPE: &str = "Cell type";
    pub const MIN_DIAMETER: &str = "Minimum Diameter (μm)";
    pub const MAX_DIAMETER: &str = "Maximum Diameter (μm)";
    pub const DILUTION: &str = "Dilution";
    pub const VIABILITY: &str = "Viability (%)";
    pub const VIABLE_DENSITY: &str = "Viable (x10^6) cells/mL";
    pub const TOTAL_COUNT: &str = "Cell count";
    pub const TOTAL_DENSITY: &str = "Total (x10^6) cells/mL";
    pub const AVERAGE_DIAMETER: &str = "Average diameter (μm)";
    pub const AVERAGE_VIABLE_DIAMETER: &str = "Average viable diameter (μm)";
    pub const VIABLE_COUNT: &str = "Viable cells";
    pub const AVERAGE_CIRCULARITY: &str = "Average circularity";
    pub const AVERAGE_VIABLE_CIRCULARITY: &str = "Average viable circularity";
    pub const ANALYST: &str = "Analysis by";
}

const REQUIRED: &[&str] = &[
    columns::TIMESTAMP,
    columns::SAMPLE_ID,
    columns::VIABILITY,
    columns::VIABLE_DENSITY,
];

/// Maps Vi-CELL BLU result exports, one measurement per row.
#[derive(Debug, Clone, Default)]
pub struct ViCellBluAdapter {
    config: MappingConfig,
}

impl ViCellBluAdapter {
    /// Create an adapter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an adapter with custom mapping settings.
    pub fn with_config(config: MappingConfig) -> Self {
        Self { config }
    }

    fn measurement(&self, row: &Row) -> Result<Measurement> {
        let rounding = self.config.rounding;

        let analyst_from_file = row.field(columns::ANALYST).string_or_none()?;
        let candidates: [Fallback<'_, String>; 2] = [
            Box::new(|| analyst_from_file),
            Box::new(|| self.config.default_analyst.clone()),
        ];
        let analyst = first_present(candidates).unwrap_or_else(|| DEFAULT_ANALYST.to_string());

        Ok(Measurement {
            measurement_identifier: new_measurement_id(),
            timestamp: row.field(columns::TIMESTAMP).string()?,
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
            average_live_cell_diameter: row
                .field(columns::AVERAGE_VIABLE_DIAMETER)
                .float_or_none()?,
            viable_cell_count: row.field(columns::VIABLE_COUNT).rounded_int_or_none(rounding)?,
            average_total_cell_circularity: row
                .field(columns::AVERAGE_CIRCULARITY)
                .float_or_none()?,
            average_viable_cell_circularity: row
                .field(columns::AVERAGE_VIABLE_CIRCULARITY)
                .float_or_none()?,
            analyst,
        })
    }
}

impl InstrumentAdapter for ViCellBluAdapter {
    fn name(&self) -> &'static str {
        "vi-cell-blu"
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

    fn build_group(&self, row: &Row) -> Result<MeasurementGroup> {
        self.measurement(row).map(MeasurementGroup::single)
    }

    fn row_policy(&self) -> RowPolicy {
        self.config.row_policy.unwrap_or_default()
    }
}
