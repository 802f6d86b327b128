//! Integration tests for labadm.

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use labadm::adapters::vi_cell_blu::columns;
use labadm::{
    AdmError, BatchAssembler, ConvertConfig, Converter, Instrument, InstrumentAdapter,
    MappingConfig, Row, RowPolicy, Table, ViCellBluAdapter,
};

/// Helper to create a temporary file with given content and extension.
fn create_test_file(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

const BLU_HEADER: &str = "Sample ID\tAnalysis date/time\tAnalysis by\tCell type\tDilution\t\
                          Viability (%)\tViable (x10^6) cells/mL\tTotal (x10^6) cells/mL\t\
                          Cell count\tViable cells\tAverage diameter (μm)";

fn blu_export(rows: &[&str]) -> String {
    let mut content = String::from(BLU_HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

// =============================================================================
// End-to-End Conversion
// =============================================================================

#[test]
fn test_convert_vi_cell_blu_tsv() {
    let content = blu_export(&[
        "CHO-1\t2022-03-21 13:33:52\tjdoe\tCHO\t1\t91.8\t4.12\t4.49\t2561\t2351\t15.3",
        "CHO-2\t2022-03-21 13:40:10\t\tCHO\t2\t88.0\t3.90\t4.43\t2430.6\t2139.4\tNA",
        "CHO-3\t2022-03-21 13:47:31\tjdoe\t\t1\t95.1\t5.02\t5.28\t\t\t14.9",
    ]);
    let file = create_test_file(&content, ".tsv");

    let result = Converter::new()
        .convert_file(file.path(), Instrument::ViCellBlu)
        .expect("Conversion failed");

    assert_eq!(result.source.format, "tsv");
    assert_eq!(result.source.row_count, 3);
    assert_eq!(result.data.measurement_groups.len(), 3);

    let measurements: Vec<_> = result.data.measurements().collect();
    let samples: Vec<&str> = measurements
        .iter()
        .map(|m| m.sample_identifier.as_str())
        .collect();
    assert_eq!(samples, vec!["CHO-1", "CHO-2", "CHO-3"]);

    assert_eq!(measurements[1].total_cell_count, Some(2431));
    assert_eq!(measurements[1].viable_cell_count, Some(2139));
    assert_eq!(measurements[1].analyst, "Vi-Cell BLU User");
    assert_eq!(measurements[1].average_total_cell_diameter, None);
    assert_eq!(measurements[2].cell_type_processing_method, None);
    assert_eq!(measurements[2].total_cell_count, None);
}

#[test]
fn test_end_to_end_default_analyst() {
    let row = Row::from_pairs(
        0,
        [
            ("Sample ID", "S-01"),
            ("Analysis date/time", "2022-03-21 13:33:52"),
            ("Viable (x10^6) cells/mL", "1.2"),
            ("Cell count", "120"),
            ("Viable cells", "90"),
            ("Viability (%)", "75.0"),
            ("Analysis by", ""),
        ],
    );
    let config = MappingConfig::new().with_default_analyst("unknown");
    let adapter = ViCellBluAdapter::with_config(config);

    let group = adapter.build_group(&row).expect("Row should convert");
    let m = &group.measurements[0];

    assert_eq!(m.total_cell_count, Some(120));
    assert_eq!(m.viable_cell_count, Some(90));
    assert_eq!(m.viability, 75.0);
    assert_eq!(m.analyst, "unknown");
}

#[test]
fn test_convert_json_records() {
    let content = r#"[
        {"Sample ID": "J-1", "Sample date": "14 Jul 2021 10:07:59", "Viability (%)": 88.2,
         "Viable cells/ml (x10^6)": 1.74, "Total cells": 1051.4, "Viable cells": null},
        {"Sample ID": "J-2", "RunDate": "14 Jul 2021 10:12:03", "Viability (%)": "90.1",
         "Viable cells/ml (x10^6)": "1.80"}
    ]"#;
    let file = create_test_file(content, ".json");

    let result = Converter::new()
        .convert_file(file.path(), Instrument::ViCellXr)
        .expect("Conversion failed");

    assert_eq!(result.source.format, "json");
    let measurements: Vec<_> = result.data.measurements().collect();
    assert_eq!(measurements.len(), 2);
    assert_eq!(measurements[0].total_cell_count, Some(1051));
    assert_eq!(measurements[0].viable_cell_count, None);
    assert_eq!(measurements[1].timestamp, "14 Jul 2021 10:12:03");
    assert_eq!(measurements[1].viability, 90.1);
}

// =============================================================================
// Error Propagation
// =============================================================================

#[test]
fn test_missing_required_field_aborts_batch() {
    let content = blu_export(&[
        "CHO-1\t2022-03-21 13:33:52\tjdoe\tCHO\t1\t91.8\t4.12\t4.49\t2561\t2351\t15.3",
        "CHO-2\t2022-03-21 13:40:10\tjdoe\tCHO\t1\t\t3.90\t4.43\t2430\t2139\t15.0",
    ]);
    let file = create_test_file(&content, ".tsv");

    let err = Converter::new()
        .convert_file(file.path(), Instrument::ViCellBlu)
        .expect_err("Missing viability should fail");

    assert!(matches!(
        err,
        AdmError::MissingField { row: 1, ref field } if field == columns::VIABILITY
    ));
}

#[test]
fn test_uncoercible_value_names_row_and_field() {
    let content = blu_export(&[
        "CHO-1\t2022-03-21 13:33:52\tjdoe\tCHO\t1\t91.8\t4.12\t4.49\tlots\t2351\t15.3",
    ]);
    let file = create_test_file(&content, ".tsv");

    let err = Converter::new()
        .convert_file(file.path(), Instrument::ViCellBlu)
        .expect_err("Non-numeric count should fail");

    assert_eq!(err.row(), Some(0));
    assert_eq!(err.field(), Some(columns::TOTAL_COUNT));
    assert!(err.to_string().contains("lots"));
}

#[test]
fn test_skip_malformed_from_config_file() {
    let config_file = create_test_file(
        "[mapping]\nrow_policy = \"skip_malformed\"\ndefault_analyst = \"unknown\"\n",
        ".toml",
    );
    let config = ConvertConfig::from_file(config_file.path()).expect("Config should load");

    let content = blu_export(&[
        "CHO-1\t2022-03-21 13:33:52\t\tCHO\t1\t91.8\t4.12\t4.49\t2561\t2351\t15.3",
        "CHO-2\t\tjdoe\tCHO\t1\t90.0\t3.90\t4.43\t2430\t2139\t15.0",
        "CHO-3\t2022-03-21 13:47:31\tjdoe\tCHO\t1\t95.1\t5.02\t5.28\t2600\t2473\t14.9",
    ]);
    let file = create_test_file(&content, ".tsv");

    let result = Converter::with_config(config)
        .convert_file(file.path(), Instrument::ViCellBlu)
        .expect("Skipping policy should not fail the batch");

    assert_eq!(result.report.rows_seen, 3);
    assert_eq!(result.report.rows_converted, 2);
    assert_eq!(result.report.skipped[0].row, 1);
    assert_eq!(
        result.report.skipped[0].field.as_deref(),
        Some("Analysis date/time")
    );
    let first = result.data.measurements().next().unwrap();
    assert_eq!(first.analyst, "unknown");
}

#[test]
fn test_repeated_header_columns_convert_correctly() {
    let content = "Sample ID,Analysis date/time,Note,Viability (%),Note,Viable (x10^6) cells/mL\n\
                   S1,2022-03-21 13:33:52,x,75.0,y,1.2\n";
    let file = create_test_file(content, ".csv");

    let result = Converter::new()
        .convert_file(file.path(), Instrument::ViCellBlu)
        .expect("Repeated headers should not shift values");

    assert_eq!(result.source.column_count, 6);
    let m = result.data.measurements().next().unwrap();
    assert_eq!(m.viability, 75.0);
    assert_eq!(m.viable_cell_density, 1.2);
}

#[test]
fn test_missing_file() {
    let err = Converter::new()
        .convert_file("/nonexistent/export.csv", Instrument::ViCellBlu)
        .expect_err("Missing file should fail");
    assert!(matches!(err, AdmError::Io { .. }));
}

// =============================================================================
// Batch Semantics
// =============================================================================

fn blu_table(rows: usize) -> Table {
    let headers = vec![
        "Sample ID".to_string(),
        "Analysis date/time".to_string(),
        "Viability (%)".to_string(),
        "Viable (x10^6) cells/mL".to_string(),
        "Cell count".to_string(),
    ];
    let records: Vec<Vec<String>> = (0..rows)
        .map(|i| {
            vec![
                format!("S{:03}", i),
                "2022-03-21 13:33:52".to_string(),
                format!("{}", 50 + i % 50),
                "1.5".to_string(),
                format!("{}.5", i),
            ]
        })
        .collect();
    Table::from_records(headers, records)
}

#[test]
fn test_one_group_per_row_in_order() {
    let table = blu_table(25);
    let adapter = ViCellBluAdapter::new();
    let data = adapter.create_data(&table).expect("Batch should convert");

    assert_eq!(data.measurement_groups.len(), 25);
    for (i, group) in data.measurement_groups.iter().enumerate() {
        assert_eq!(group.measurements.len(), 1);
        assert_eq!(group.measurements[0].sample_identifier, format!("S{:03}", i));
    }
}

#[test]
fn test_identifiers_are_unique() {
    let table = blu_table(50);
    let data = ViCellBluAdapter::new().create_data(&table).unwrap();

    let mut ids: Vec<&str> = data
        .measurements()
        .map(|m| m.measurement_identifier.as_str())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_mapping_is_idempotent_except_identifier() {
    let table = blu_table(3);
    let adapter = ViCellBluAdapter::new();
    let row = table.row(2).unwrap();

    let first = adapter.build_group(row).unwrap();
    let second = adapter.build_group(row).unwrap();

    let (a, b) = (&first.measurements[0], &second.measurements[0]);
    assert_ne!(a.measurement_identifier, b.measurement_identifier);
    assert!(a.same_reading(b));
}

#[test]
fn test_metadata_shared_across_batch() {
    let table = blu_table(4);
    let adapter = ViCellBluAdapter::new();
    let metadata = Arc::new(adapter.metadata());

    let data = BatchAssembler::new(&adapter)
        .with_policy(RowPolicy::Strict)
        .build(&table, Arc::clone(&metadata))
        .unwrap();

    assert!(Arc::ptr_eq(&data.metadata, &metadata));
    assert_eq!(data.metadata.model_number, "Vi-Cell BLU");
}
