//! Nearest-distance join between a query and a reference record set

use geotab_core::config::DEFAULT_OUTPUT_COLUMN;
use geotab_core::error::{GeotabError, Result};
use geotab_core::models::{CoordinateColumns, DistanceMetric, RecordSet};
use serde::{Deserialize, Serialize};

use crate::coordinates::with_coordinates;
use crate::index::NearestIndex;

/// Options for [`annotate_nearest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestOptions {
    pub columns: CoordinateColumns,
    /// Column that receives the distances on the query copy
    pub output_column: String,
    pub metric: DistanceMetric,
}

impl Default for NearestOptions {
    fn default() -> Self {
        Self {
            columns: CoordinateColumns::default(),
            output_column: DEFAULT_OUTPUT_COLUMN.to_string(),
            metric: DistanceMetric::default(),
        }
    }
}

impl NearestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, lat: impl Into<String>, lon: impl Into<String>) -> Self {
        self.columns = CoordinateColumns::new(lat, lon);
        self
    }

    pub fn with_output_column(mut self, column: impl Into<String>) -> Self {
        self.output_column = column.into();
        self
    }

    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }
}

/// Result of a nearest-distance join
#[derive(Debug, Clone)]
pub struct NearestJoin {
    /// Query copy with the distance column, plus derived coordinate columns if any
    pub query: RecordSet,
    /// Reference copy, with derived coordinate columns if any
    pub reference: RecordSet,
    /// Matched reference row for each query row
    pub matches: Vec<usize>,
    /// `[lat, lon]` used for each query row, as resolved from columns or centroids
    pub query_points: Vec<[f64; 2]>,
}

impl NearestJoin {
    /// Distances in query row order
    pub fn distances(&self, output_column: &str) -> Vec<Option<f64>> {
        self.query
            .column(output_column)
            .unwrap_or_default()
            .into_iter()
            .map(|value| value.and_then(|v| v.as_f64()))
            .collect()
    }
}

/// Annotate every query row with the distance to its nearest reference row
///
/// Both sets have their coordinate strategy resolved independently: explicit
/// `options.columns` when both exist, otherwise centroids of the geometry
/// attribute (written to the returned copies as new columns). Query row order
/// and count are preserved, and `options.output_column` is appended or
/// overwritten in place. Inputs are never modified.
///
/// Self-matches are not excluded. When several reference rows are equally
/// close, the one chosen is whichever the R*-tree yields first.
///
/// With [`DistanceMetric::Euclidean`] distances are in raw coordinate units;
/// with [`DistanceMetric::Haversine`] they are meters.
pub fn annotate_nearest(
    query: &RecordSet,
    reference: &RecordSet,
    options: &NearestOptions,
) -> Result<NearestJoin> {
    let query_coords = with_coordinates(query, &options.columns, "query")?;
    let reference_coords = with_coordinates(reference, &options.columns, "reference")?;

    let index = NearestIndex::build(&reference_coords.points, options.metric)?;

    let (matches, distances): (Vec<usize>, Vec<f64>) = query_coords
        .points
        .iter()
        .map(|point| {
            index
                .nearest(*point)
                .map(|neighbor| (neighbor.row, neighbor.distance))
                .ok_or(GeotabError::EmptyReference)
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .unzip();

    let mut annotated = query_coords.set;
    annotated.set_column(&options.output_column, distances);

    tracing::info!(
        rows = annotated.len(),
        reference_rows = index.len(),
        metric = %options.metric,
        column = %options.output_column,
        "Annotated nearest distances"
    );

    Ok(NearestJoin {
        query: annotated,
        reference: reference_coords.set,
        matches,
        query_points: query_coords.points,
    })
}
