//! Checks run on a path before any format reads it

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{GeotabError, Result};
use crate::formats::FormatValidation;

/// Every reader loads the whole file; past this size that is worth a warning
pub const LARGE_FILE_BYTES: u64 = 256 * 1024 * 1024;

/// Existence and size checks shared by every format
pub fn pre_read_validation(path: &Path) -> FormatValidation {
    check_file(path, LARGE_FILE_BYTES)
}

fn check_file(path: &Path, large_file_bytes: u64) -> FormatValidation {
    let mut validation = FormatValidation::default();

    match fs::metadata(path) {
        Ok(metadata) if !metadata.is_file() => {
            validation.errors.push(format!("Not a regular file: {}", path.display()));
        }
        Ok(metadata) if metadata.len() > large_file_bytes => {
            validation.warnings.push(format!(
                "{} is {} MB and will be held in memory while rows are built",
                path.display(),
                metadata.len() / (1024 * 1024)
            ));
        }
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            validation.errors.push(format!("File not found: {}", path.display()));
        }
        Err(e) => {
            validation.errors.push(format!("Cannot access {}: {}", path.display(), e));
        }
    }

    validation
}

/// Turn collected errors into a `FormatValidation` error for `format_name`
pub fn ensure_valid(validation: &FormatValidation, format_name: &str) -> Result<()> {
    if validation.is_valid() {
        return Ok(());
    }
    Err(GeotabError::FormatValidation {
        format: format_name.to_string(),
        reason: validation.errors.join("; "),
    })
}
