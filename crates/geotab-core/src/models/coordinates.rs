//! Coordinate column names and the per-record-set coordinate strategy

use serde::{Deserialize, Serialize};

use super::record::RecordSet;
use crate::error::{GeotabError, Result};

pub const DEFAULT_LAT_COLUMN: &str = "latitude";
pub const DEFAULT_LON_COLUMN: &str = "longitude";

/// Names of the latitude/longitude columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateColumns {
    pub lat: String,
    pub lon: String,
}

impl CoordinateColumns {
    pub fn new(lat: impl Into<String>, lon: impl Into<String>) -> Self {
        Self { lat: lat.into(), lon: lon.into() }
    }
}

impl Default for CoordinateColumns {
    fn default() -> Self {
        Self::new(DEFAULT_LAT_COLUMN, DEFAULT_LON_COLUMN)
    }
}

/// Where a record set's coordinates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateStrategy {
    /// Both coordinate columns are present
    ExplicitColumns,
    /// Coordinates are the centroid of each row's geometry (lon = x, lat = y)
    DeriveFromGeometry,
}

impl CoordinateStrategy {
    /// Pick the strategy for a record set, once, before any row is read
    ///
    /// `role` names the record set in the error ("query", "reference").
    pub fn resolve(set: &RecordSet, columns: &CoordinateColumns, role: &str) -> Result<Self> {
        if set.has_column(&columns.lat) && set.has_column(&columns.lon) {
            Ok(CoordinateStrategy::ExplicitColumns)
        } else if set.has_geometry() {
            Ok(CoordinateStrategy::DeriveFromGeometry)
        } else {
            Err(GeotabError::MissingCoordinates {
                role: role.to_string(),
                lat_column: columns.lat.clone(),
                lon_column: columns.lon.clone(),
            })
        }
    }
}
