//! Batch bookkeeping: what happened to each input file.
//!
//! The same structures feed the terminal summary (`format`) and the optional
//! JSON manifest (`io::export::write_manifest_json`).

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{Periodicity, RoughenedBundle};
use crate::error::AppError;

pub mod format;

pub use format::*;

/// Rows carrying data in each slot of one output table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotRows {
    pub hourly: usize,
    pub daily: usize,
    pub monthly: usize,
    pub yearly: usize,
}

impl SlotRows {
    pub fn of(bundle: &RoughenedBundle) -> Self {
        Self {
            hourly: bundle.hourly.filled,
            daily: bundle.daily.filled,
            monthly: bundle.monthly.filled,
            yearly: bundle.yearly.filled,
        }
    }
}

/// One output table (written, or planned in a dry run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputEntry {
    pub tag: String,
    pub unit: Option<String>,
    pub path: PathBuf,
    pub rows: usize,
    pub filled: SlotRows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Done,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub status: FileStatus,
    pub periodicity: Option<Periodicity>,
    pub rows: usize,
    pub outputs: Vec<OutputEntry>,
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn failed(file: impl Into<String>, err: &AppError) -> Self {
        Self {
            file: file.into(),
            status: FileStatus::Failed,
            periodicity: None,
            rows: 0,
            outputs: Vec::new(),
            error: Some(err.message().to_string()),
        }
    }
}

/// Result of one batch run over an input directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    /// Set when Ctrl-C stopped the batch before every file was processed.
    pub interrupted: bool,
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, dry_run: bool) -> Self {
        Self {
            input_dir,
            output_dir,
            dry_run,
            interrupted: false,
            files: Vec::new(),
        }
    }

    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.status == FileStatus::Done).count()
    }

    pub fn failed(&self) -> usize {
        self.files.iter().filter(|f| f.status == FileStatus::Failed).count()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &OutputEntry> {
        self.files.iter().flat_map(|f| f.outputs.iter())
    }
}
