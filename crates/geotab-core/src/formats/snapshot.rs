//! Native record set snapshots
//!
//! A snapshot is the serde form of a `RecordSet`: column order, the geometry
//! flag and every cell survive a write/read cycle unchanged, which GeoJSON and
//! CSV cannot promise.

use std::fs;
use std::path::Path;

use crate::error::{GeotabError, Result};
use crate::formats::{FormatReader, FormatWriter};
use crate::models::RecordSet;

pub const SNAPSHOT_SUFFIX: &str = ".records.json";

pub struct SnapshotFormat;

impl FormatReader for SnapshotFormat {
    fn read(&self, path: &Path) -> Result<RecordSet> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| GeotabError::FormatValidation {
            format: "Snapshot".to_string(),
            reason: format!("Failed to parse snapshot: {}", e),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["records.json"]
    }

    fn format_name(&self) -> &str {
        "Snapshot"
    }

    fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_ascii_lowercase().ends_with(SNAPSHOT_SUFFIX))
            .unwrap_or(false)
    }
}

impl FormatWriter for SnapshotFormat {
    fn write(&self, set: &RecordSet, path: &Path) -> Result<()> {
        let content = serde_json::to_string(set).map_err(|e| {
            GeotabError::Serialization(format!("Failed to serialize snapshot: {}", e))
        })?;
        fs::write(path, content)?;
        Ok(())
    }
}
