//! Cell-counting target model: one measurement document per reading.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One normalized cell-counter reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Fresh identifier, unique per constructed measurement.
    pub measurement_identifier: String,
    /// Acquisition timestamp as exported by the instrument.
    pub timestamp: String,
    pub sample_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_type_processing_method: Option<String>,
    /// Minimum cell diameter setting (µm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_cell_diameter_setting: Option<f64>,
    /// Maximum cell diameter setting (µm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_cell_diameter_setting: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_density_dilution_factor: Option<f64>,
    /// Viability (%).
    pub viability: f64,
    /// Viable cell density (10^6 cells/mL).
    pub viable_cell_density: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cell_count: Option<i64>,
    /// Total cell density (10^6 cells/mL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cell_density: Option<f64>,
    /// Average diameter of all cells (µm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_total_cell_diameter: Option<f64>,
    /// Average diameter of viable cells (µm).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_live_cell_diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viable_cell_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_total_cell_circularity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_viable_cell_circularity: Option<f64>,
    pub analyst: String,
}

impl Measurement {
    /// True if both measurements agree on every field except the identifier.
    pub fn same_reading(&self, other: &Measurement) -> bool {
        let Measurement {
            measurement_identifier: _,
            timestamp,
            sample_identifier,
            cell_type_processing_method,
            minimum_cell_diameter_setting,
            maximum_cell_diameter_setting,
            cell_density_dilution_factor,
            viability,
            viable_cell_density,
            total_cell_count,
            total_cell_density,
            average_total_cell_diameter,
            average_live_cell_diameter,
            viable_cell_count,
            average_total_cell_circularity,
            average_viable_cell_circularity,
            analyst,
        } = self;

        *timestamp == other.timestamp
            && *sample_identifier == other.sample_identifier
            && *cell_type_processing_method == other.cell_type_processing_method
            && *minimum_cell_diameter_setting == other.minimum_cell_diameter_setting
            && *maximum_cell_diameter_setting == other.maximum_cell_diameter_setting
            && *cell_density_dilution_factor == other.cell_density_dilution_factor
            && *viability == other.viability
            && *viable_cell_density == other.viable_cell_density
            && *total_cell_count == other.total_cell_count
            && *total_cell_density == other.total_cell_density
            && *average_total_cell_diameter == other.average_total_cell_diameter
            && *average_live_cell_diameter == other.average_live_cell_diameter
            && *viable_cell_count == other.viable_cell_count
            && *average_total_cell_circularity == other.average_total_cell_circularity
            && *average_viable_cell_circularity == other.average_viable_cell_circularity
            && *analyst == other.analyst
    }
}

/// Measurements sharing one acquisition context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementGroup {
    pub measurements: Vec<Measurement>,
}

impl MeasurementGroup {
    /// A group holding a single measurement.
    pub fn single(measurement: Measurement) -> Self {
        Self {
            measurements: vec![measurement],
        }
    }
}

/// Device-level attributes, constant across one import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub device_type: String,
    pub detection_type: String,
    pub model_number: String,
    pub software_name: String,
}

/// A converted batch: shared metadata plus measurement groups in row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub metadata: Arc<Metadata>,
    pub measurement_groups: Vec<MeasurementGroup>,
}

impl Data {
    /// Create a batch from metadata and groups.
    pub fn new(metadata: Arc<Metadata>, measurement_groups: Vec<MeasurementGroup>) -> Self {
        Self {
            metadata,
            measurement_groups,
        }
    }

    /// All measurements across all groups, in order.
    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.measurement_groups
            .iter()
            .flat_map(|g| g.measurements.iter())
    }

    /// Total number of measurements.
    pub fn measurement_count(&self) -> usize {
        self.measurement_groups
            .iter()
            .map(|g| g.measurements.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurement(id: &str) -> Measurement {
        Measurement {
            measurement_identifier: id.to_string(),
            timestamp: "2022-03-21 13:33:52".to_string(),
            sample_identifier: "S-01".to_string(),
            cell_type_processing_method: None,
            minimum_cell_diameter_setting: Some(6.0),
            maximum_cell_diameter_setting: Some(50.0),
            cell_density_dilution_factor: Some(1.0),
            viability: 75.0,
            viable_cell_density: 1.25,
            total_cell_count: Some(120),
            total_cell_density: None,
            average_total_cell_diameter: None,
            average_live_cell_diameter: None,
            viable_cell_count: Some(90),
            average_total_cell_circularity: None,
            average_viable_cell_circularity: None,
            analyst: "unknown".to_string(),
        }
    }

    #[test]
    fn test_same_reading_ignores_identifier() {
        let a = measurement("a");
        let b = measurement("b");
        assert_ne!(a, b);
        assert!(a.same_reading(&b));

        let mut c = measurement("c");
        c.viability = 80.0;
        assert!(!a.same_reading(&c));
    }

    #[test]
    fn test_data_counts() {
        let metadata = Arc::new(Metadata {
            device_type: "brightfield imager (cell counter)".to_string(),
            detection_type: "brightfield".to_string(),
            model_number: "Vi-CELL BLU".to_string(),
            software_name: "Vi-CELL BLU".to_string(),
        });
        let data = Data::new(
            metadata,
            vec![
                MeasurementGroup::single(measurement("a")),
                MeasurementGroup {
                    measurements: vec![measurement("b"), measurement("c")],
                },
            ],
        );

        assert_eq!(data.measurement_count(), 3);
        let ids: Vec<&str> = data
            .measurements()
            .map(|m| m.measurement_identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_serialization_omits_absent_optionals() {
        let json = serde_json::to_value(measurement("a")).unwrap();
        assert_eq!(json["total_cell_count"], 120);
        assert!(json.get("total_cell_density").is_none());
        assert_eq!(json["analyst"], "unknown");
    }
}
