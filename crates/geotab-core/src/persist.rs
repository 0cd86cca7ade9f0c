//! Saving record sets as a GeoJSON file plus a reloadable snapshot

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GeotabError, Result};
use crate::formats::geojson::GeoJsonFormat;
use crate::formats::snapshot::{SnapshotFormat, SNAPSHOT_SUFFIX};
use crate::formats::FormatWriter;
use crate::models::RecordSet;

/// Files written by [`save_record_set`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPaths {
    pub geojson: PathBuf,
    pub snapshot: PathBuf,
}

/// Save a record set as `<name>.geojson` and `<name>.records.json` in `output_dir`
///
/// The directory is created if needed. Existing files with the same names are
/// overwritten. The GeoJSON declares EPSG:4326.
pub fn save_record_set(set: &RecordSet, output_dir: &Path, name: &str) -> Result<SavedPaths> {
    validate_name(name)?;
    fs::create_dir_all(output_dir)?;

    let paths = SavedPaths {
        geojson: output_dir.join(format!("{}.geojson", name)),
        snapshot: output_dir.join(format!("{}{}", name, SNAPSHOT_SUFFIX)),
    };

    GeoJsonFormat.write(set, &paths.geojson)?;
    SnapshotFormat.write(set, &paths.snapshot)?;

    tracing::info!(
        geojson = %paths.geojson.display(),
        snapshot = %paths.snapshot.display(),
        rows = set.len(),
        "Record set saved"
    );

    Ok(paths)
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(GeotabError::ConfigInvalid {
            key: "name".to_string(),
            reason: format!("'{}' is not a plain file name", name),
        });
    }
    Ok(())
}
