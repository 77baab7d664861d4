//! Command-line parsing.
//!
//! Every flag is optional: a bare `roughen` processes the default input
//! directory into the default output directory.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "roughen",
    version,
    about = "Normalise tagged time-series CSV files into hourly/daily/monthly/yearly tables"
)]
pub struct Cli {
    /// Directory scanned for `T_*.csv` files (env: ROUGHEN_INPUT_DIR).
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving one table per tagged column (env: ROUGHEN_OUTPUT_DIR).
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Stop the whole batch at the first file that fails.
    #[arg(long)]
    pub fail_fast: bool,

    /// Load and roughen every file, but write no tables.
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON manifest of the batch (files, outputs, failures).
    #[arg(long, value_name = "JSON")]
    pub manifest: Option<PathBuf>,
}
