//! Format abstraction layer for reading and writing record sets
//!
//! Each format implements `FormatReader` (and `FormatWriter` where it can
//! store a record set), and the `FormatRegistry` detects the format of a
//! path and dispatches to the matching implementation.

use std::path::Path;

use crate::error::{GeotabError, Result};
use crate::models::RecordSet;

pub mod csv;
pub mod geojson;
pub mod snapshot;
pub mod validation;

/// Format reader trait that all format implementations must implement
pub trait FormatReader: Send + Sync {
    /// Read a record set from the given path
    fn read(&self, path: &Path) -> Result<RecordSet>;

    /// Get supported file extensions (e.g., ["csv"])
    fn supported_extensions(&self) -> &[&str];

    /// Get human-readable format name (e.g., "GeoJSON", "CSV")
    fn format_name(&self) -> &str;

    /// Whether this format handles the given path
    ///
    /// The default matches on the file extension, case-insensitively.
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.supported_extensions().iter().any(|s| s.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    /// Validate file structure without full read
    ///
    /// The default only checks that the file exists and is not oversized.
    fn validate(&self, path: &Path) -> Result<FormatValidation> {
        Ok(validation::pre_read_validation(path))
    }
}

/// Format writer trait for formats that can store a record set
pub trait FormatWriter: Send + Sync {
    /// Write a record set to the given path, replacing any existing file
    fn write(&self, set: &RecordSet, path: &Path) -> Result<()>;
}

/// Result of format validation
#[derive(Debug, Clone, Default)]
pub struct FormatValidation {
    /// Validation errors that prevent reading
    pub errors: Vec<String>,

    /// Warnings that don't prevent reading but indicate potential issues
    pub warnings: Vec<String>,
}

impl FormatValidation {
    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A format that can both read and write record sets
pub trait RecordFormat: FormatReader + FormatWriter {}

impl<T: FormatReader + FormatWriter> RecordFormat for T {}

/// Central registry for record set formats
///
/// Formats are consulted in registration order, so more specific formats
/// (the `.records.json` snapshot) must be registered before broader ones
/// (GeoJSON, which also claims `.json`).
pub struct FormatRegistry {
    formats: Vec<Box<dyn RecordFormat>>,
}

impl FormatRegistry {
    /// Create a new empty format registry
    pub fn new() -> Self {
        Self { formats: Vec::new() }
    }

    /// Registry with every built-in format
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(snapshot::SnapshotFormat));
        registry.register(Box::new(geojson::GeoJsonFormat));
        registry.register(Box::new(csv::CsvFormat));
        registry
    }

    /// Register a format
    pub fn register(&mut self, format: Box<dyn RecordFormat>) {
        self.formats.push(format);
    }

    /// Detect format and return the matching implementation
    pub fn detect_format(&self, path: &Path) -> Result<&dyn RecordFormat> {
        self.formats.iter().find(|f| f.accepts(path)).map(|f| f.as_ref()).ok_or_else(|| {
            GeotabError::UnsupportedFormat {
                extension: path
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("none")
                    .to_string(),
                supported: self.supported_formats(),
            }
        })
    }

    /// Get list of all supported format extensions
    pub fn supported_formats(&self) -> Vec<String> {
        self.formats
            .iter()
            .flat_map(|f| f.supported_extensions())
            .map(|s| s.to_string())
            .collect()
    }

    /// Number of registered formats
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Read a record set, picking the format from the file name
pub fn read_record_set(path: &Path) -> Result<RecordSet> {
    let registry = FormatRegistry::with_defaults();
    let format = registry.detect_format(path)?;
    tracing::debug!(path = %path.display(), format = format.format_name(), "Reading record set");

    let checks = format.validate(path)?;
    for warning in &checks.warnings {
        tracing::warn!(path = %path.display(), "{}", warning);
    }
    validation::ensure_valid(&checks, format.format_name())?;

    format.read(path)
}

/// Write a record set, picking the format from the file name
pub fn write_record_set(set: &RecordSet, path: &Path) -> Result<()> {
    let registry = FormatRegistry::with_defaults();
    let format = registry.detect_format(path)?;
    tracing::debug!(path = %path.display(), format = format.format_name(), "Writing record set");
    format.write(set, path)
}
