//! Instruments command - list supported adapters.

use colored::Colorize;
use labadm::{Instrument, MappingConfig};

pub fn run(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json_output {
        let instruments: Vec<_> = Instrument::ALL
            .iter()
            .map(|instrument| {
                let adapter = instrument.adapter(MappingConfig::default());
                serde_json::json!({
                    "id": instrument.id(),
                    "label": instrument.label(),
                    "metadata": adapter.metadata(),
                    "required_columns": adapter.column_requirements(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&instruments)?);
        return Ok(());
    }

    for instrument in Instrument::ALL {
        let adapter = instrument.adapter(MappingConfig::default());
        println!(
            "{} {}",
            instrument.id().cyan().bold(),
            instrument.label().white()
        );
        println!("  Required columns:");
        for column in adapter.column_requirements() {
            println!("    {}", column);
        }
        println!();
    }

    Ok(())
}
