//! Error types for geotab

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeotabError {
    // Coordinate errors
    #[error(
        "{role} record set has neither '{lat_column}' and '{lon_column}' columns nor a geometry attribute to derive them from"
    )]
    MissingCoordinates {
        role: String,
        lat_column: String,
        lon_column: String,
    },

    #[error("Invalid coordinate at row {row}, column '{column}': {reason}")]
    InvalidCoordinate {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Invalid geometry at row {row}: {reason}")]
    InvalidGeometry { row: usize, reason: String },

    #[error("Reference record set is empty; nearest neighbors cannot be computed")]
    EmptyReference,

    // Format errors
    #[error("Unsupported file format: .{extension} (supported: {})", supported.join(", "))]
    UnsupportedFormat {
        extension: String,
        supported: Vec<String>,
    },

    #[error("Invalid {format} data: {reason}")]
    FormatValidation { format: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, GeotabError>;
