//! Target data model for converted instrument exports.

mod cell_counting;

use uuid::Uuid;

pub use cell_counting::{Data, Measurement, MeasurementGroup, Metadata};

/// Generate a fresh measurement identifier (random UUID v4).
pub fn new_measurement_id() -> String {
    Uuid::new_v4().to_string()
}
