//! Convert command - map an export file to Allotrope JSON.

use std::path::PathBuf;

use colored::Colorize;
use labadm::{Converter, Instrument, RowPolicy};

use super::load_config;

pub fn run(
    file: PathBuf,
    instrument: Instrument,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    skip_malformed: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut config = load_config(config.as_deref())?;
    if skip_malformed {
        config.mapping.row_policy = Some(RowPolicy::SkipMalformed);
    }

    println!(
        "{} {} as {}",
        "Converting".cyan().bold(),
        file.display().to_string().white(),
        instrument.label()
    );

    let result = Converter::with_config(config).convert_file(&file, instrument)?;

    let report = &result.report;
    println!(
        "Converted {} of {} rows",
        report.rows_converted.to_string().white().bold(),
        report.rows_seen
    );
    for skipped in &report.skipped {
        println!(
            "  {} row {}: {}",
            "skipped".yellow(),
            skipped.row,
            skipped.reason
        );
    }

    let output_path = output.unwrap_or_else(|| {
        let mut p = file.clone();
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        p.set_file_name(format!("{}.adm.json", stem));
        p
    });

    result.save(&output_path)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}
