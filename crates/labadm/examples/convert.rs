//! Example: Convert an instrument export with labadm.
//!
//! Usage:
//!   cargo run --example convert -- <file_path> [instrument]
//!
//! Example:
//!   cargo run --example convert -- vi_cell_blu_export.csv vi-cell-blu

use std::env;
use std::path::Path;

use labadm::{Converter, Instrument};

fn main() -> labadm::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example convert -- <file_path> [instrument]");
        eprintln!("\nInstruments:");
        for instrument in Instrument::ALL {
            eprintln!("  {:12} {}", instrument.id(), instrument.label());
        }
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let instrument: Instrument = match args.get(2) {
        Some(id) => id.parse()?,
        None => Instrument::ViCellBlu,
    };

    let result = Converter::new().convert_file(path, instrument)?;

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("{} as {}", result.source.file, instrument.label());
    println!("{}", separator);
    println!(
        "Rows: {} seen, {} converted",
        result.report.rows_seen, result.report.rows_converted
    );
    println!();

    for m in result.data.measurements() {
        println!(
            "  {:16} {:20} viability {:5.1}%  viable {:.2}e6/mL  analyst {}",
            m.sample_identifier,
            m.timestamp,
            m.viability,
            m.viable_cell_density,
            m.analyst
        );
    }

    Ok(())
}
