//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves the run configuration
//! - installs logging and the Ctrl-C handler
//! - runs the batch pipeline over the input directory
//! - prints the summary and writes the optional manifest

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::{load_dotenv, run_config_from_args};
use crate::error::AppError;
use crate::io::write_manifest_json;
use crate::report::format_batch_summary;

pub mod pipeline;

/// Entry point for the `roughen` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init();
    load_dotenv();

    let config = run_config_from_args(&cli, |key| std::env::var(key).ok());
    info!(?config, "resolved run configuration");

    let interrupted = install_interrupt_handler();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = pipeline::run_batch(&config, &interrupted, &mut out)?;

    writeln!(out, "{}", format_batch_summary(&report))
        .map_err(|e| AppError::output(format!("Failed to write summary: {e}")))?;

    if let Some(path) = &config.manifest {
        write_manifest_json(path, &report)?;
    }

    match report.failed() {
        0 => Ok(()),
        n => Err(AppError::batch(format!(
            "{n} of {} file(s) failed; see the summary above.",
            report.files.len()
        ))),
    }
}

/// Ctrl-C only raises a flag; the batch loop stops before the next file.
fn install_interrupt_handler() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    let installed = ctrlc::set_handler(move || {
        handler_flag.store(true, Ordering::SeqCst);
        eprintln!("Interrupt received, stopping after the current file.");
    });
    if let Err(e) = installed {
        warn!("could not install Ctrl-C handler: {e}");
    }
    flag
}
