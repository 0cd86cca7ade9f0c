use geotab_core::summary::{ColumnSummary, GeometryCount};
use serde::Serialize;

/// Output for nearest command
#[derive(Debug, Serialize)]
pub struct NearestOutput {
    pub query: String,
    pub reference: String,
    pub metric: String,
    pub output_column: String,
    pub rows: usize,
    pub written_to: Option<String>,
    pub results: Vec<NearestRow>,
}

#[derive(Debug, Serialize)]
pub struct NearestRow {
    pub row: usize,
    pub id: Option<serde_json::Value>,
    pub latitude: f64,
    pub longitude: f64,
    pub distance: Option<f64>,
    pub reference_row: usize,
}

/// Output for summary command
#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub input: String,
    pub rows: usize,
    pub columns: Vec<ColumnSummary>,
    pub geometry_types: Vec<GeometryCount>,
}

/// Output for save command
#[derive(Debug, Serialize)]
pub struct SaveOutput {
    pub rows: usize,
    pub geojson: String,
    pub snapshot: String,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub lat_column: ConfigValue,
    pub lon_column: ConfigValue,
    pub output_column: ConfigValue,
    pub metric: ConfigValue,
    pub output_dir: ConfigValue,
}

#[derive(Debug, Serialize)]
pub struct ConfigValue {
    pub value: String,
    pub source: String,
}
