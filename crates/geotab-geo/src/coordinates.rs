//! Resolving (latitude, longitude) pairs for every row of a record set

use geotab_core::error::{GeotabError, Result};
use geotab_core::models::{CoordinateColumns, CoordinateStrategy, RecordSet};
use serde_json::Value;

use crate::models::GeometryExt;

/// A record set together with one `[lat, lon]` pair per row
#[derive(Debug, Clone)]
pub struct ResolvedCoordinates {
    /// Copy of the input, with coordinate columns added when they were derived
    pub set: RecordSet,
    pub strategy: CoordinateStrategy,
    /// `[lat, lon]` per row, in row order
    pub points: Vec<[f64; 2]>,
}

/// Resolve the coordinate strategy once, then materialize every row's coordinates
///
/// With `DeriveFromGeometry`, `columns.lon` receives the centroid x and
/// `columns.lat` the centroid y, written to a copy of `set`. The input is
/// never modified.
pub fn with_coordinates(
    set: &RecordSet,
    columns: &CoordinateColumns,
    role: &str,
) -> Result<ResolvedCoordinates> {
    let strategy = CoordinateStrategy::resolve(set, columns, role)?;
    tracing::debug!(role, ?strategy, rows = set.len(), "Resolved coordinate strategy");

    match strategy {
        CoordinateStrategy::ExplicitColumns => {
            let points = set
                .records
                .iter()
                .enumerate()
                .map(|(row, record)| {
                    let lat = coordinate_value(record.get(&columns.lat), row, &columns.lat)?;
                    let lon = coordinate_value(record.get(&columns.lon), row, &columns.lon)?;
                    Ok([lat, lon])
                })
                .collect::<Result<Vec<_>>>()?;

            Ok(ResolvedCoordinates { set: set.clone(), strategy, points })
        }
        CoordinateStrategy::DeriveFromGeometry => {
            let points = set
                .records
                .iter()
                .enumerate()
                .map(|(row, record)| {
                    let geometry = record.geometry.as_ref().ok_or_else(|| {
                        GeotabError::InvalidGeometry {
                            row,
                            reason: "row has no geometry to derive coordinates from".to_string(),
                        }
                    })?;
                    let [x, y] = geometry.centroid_coords().ok_or_else(|| {
                        GeotabError::InvalidGeometry {
                            row,
                            reason: "empty geometry has no centroid".to_string(),
                        }
                    })?;
                    if !x.is_finite() || !y.is_finite() {
                        return Err(GeotabError::InvalidGeometry {
                            row,
                            reason: format!("centroid ({}, {}) is not finite", x, y),
                        });
                    }
                    Ok([y, x])
                })
                .collect::<Result<Vec<_>>>()?;

            let mut derived = set.clone();
            derived.set_column(&columns.lon, points.iter().map(|p| p[1]).collect::<Vec<f64>>());
            derived.set_column(&columns.lat, points.iter().map(|p| p[0]).collect::<Vec<f64>>());

            Ok(ResolvedCoordinates { set: derived, strategy, points })
        }
    }
}

/// Read one coordinate cell; numbers and numeric strings are accepted
fn coordinate_value(value: Option<&Value>, row: usize, column: &str) -> Result<f64> {
    let invalid = |reason: String| GeotabError::InvalidCoordinate {
        row,
        column: column.to_string(),
        reason,
    };

    let value = value.ok_or_else(|| invalid("value is missing".to_string()))?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid(format!("{} is not a number", value)))?;

    if !number.is_finite() {
        return Err(invalid(format!("{} is not finite", number)));
    }

    Ok(number)
}
