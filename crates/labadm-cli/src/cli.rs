//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use labadm::Instrument;
use std::path::PathBuf;

/// labadm: convert instrument exports into the Allotrope data model
#[derive(Parser)]
#[command(name = "labadm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an export file to JSON
    Convert {
        /// Path to the export file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Instrument that produced the export (vi-cell-blu, vi-cell-xr)
        #[arg(short, long)]
        instrument: Instrument,

        /// Output path (default: <file>.adm.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Skip rows that fail to convert instead of aborting
        #[arg(long)]
        skip_malformed: bool,
    },

    /// Dry run: report which rows would convert
    Check {
        /// Path to the export file (CSV/TSV/JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Instrument that produced the export
        #[arg(short, long)]
        instrument: Instrument,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List supported instruments and their required columns
    Instruments {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
