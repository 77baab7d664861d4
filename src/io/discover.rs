//! Input discovery: which files in the input directory get processed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

pub const INPUT_PREFIX: &str = "T_";
pub const INPUT_SUFFIX: &str = ".csv";

/// `T_*.csv`, case-sensitive.
pub fn is_eligible(file_name: &str) -> bool {
    file_name.starts_with(INPUT_PREFIX) && file_name.ends_with(INPUT_SUFFIX)
}

/// List eligible files in `dir`, sorted by file name so runs are reproducible.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::input(format!("Failed to read input directory '{}': {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| AppError::input(format!("Failed to list input directory '{}': {e}", dir.display())))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let eligible = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_eligible);
        if eligible {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
