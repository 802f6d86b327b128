//! labadm CLI - convert instrument exports into the Allotrope data model.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            file,
            instrument,
            output,
            config,
            skip_malformed,
        } => commands::convert::run(file, instrument, output, config, skip_malformed),

        Commands::Check {
            file,
            instrument,
            config,
        } => commands::check::run(file, instrument, config),

        Commands::Instruments { json } => commands::instruments::run(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Default filter from `-v` count. `RUST_LOG` still wins.
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}
