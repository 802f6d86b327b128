//! Check command - dry run that reports the outcome of every row.

use std::path::PathBuf;

use colored::Colorize;
use labadm::{Instrument, Parser};

use super::load_config;

pub fn run(
    file: PathBuf,
    instrument: Instrument,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = load_config(config.as_deref())?;
    let (table, source) = Parser::with_config(config.parser.clone()).parse_file(&file)?;
    let adapter = instrument.adapter(config.mapping);

    println!(
        "{} {} ({}, {} rows, {} columns)",
        "Checking".cyan().bold(),
        source.file.white(),
        source.format,
        source.row_count,
        source.column_count
    );

    let missing = adapter.missing_columns(&table);
    if !missing.is_empty() {
        println!(
            "{} required columns not found: {}",
            "Warning:".yellow().bold(),
            missing.join(", ")
        );
    }
    println!();

    let mut failed = 0;
    for row in &table.rows {
        match adapter.build_group(row) {
            Ok(_) => println!("  row {:>5}  {}", row.index(), "ok".green()),
            Err(e) => {
                failed += 1;
                println!("  row {:>5}  {} {}", row.index(), "error".red(), e);
            }
        }
    }

    println!();
    let converted = table.row_count() - failed;
    if failed == 0 {
        println!(
            "{}",
            format!("All {} rows convert cleanly.", converted).green()
        );
    } else {
        println!(
            "{} rows convert, {} fail. Run {} to keep the good rows.",
            converted.to_string().white().bold(),
            failed.to_string().red().bold(),
            format!(
                "labadm convert {} --instrument {} --skip-malformed",
                file.display(),
                instrument
            )
            .cyan()
        );
    }

    Ok(())
}
