//! Nearest command implementation

use crate::cli::NearestArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::{NearestOutput, NearestRow};
use anyhow::{Context, Result};
use geotab_core::config::CliConfigOverrides;
use geotab_core::formats::{read_record_set, write_record_set};
use geotab_core::models::DistanceMetric;
use geotab_geo::{annotate_nearest, NearestJoin, NearestOptions};
use std::path::Path;
use tabled::Tabled;

#[derive(Tabled)]
struct NearestTableRow {
    #[tabled(rename = "Row")]
    row: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Latitude")]
    latitude: String,
    #[tabled(rename = "Longitude")]
    longitude: String,
    #[tabled(rename = "Distance")]
    distance: String,
    #[tabled(rename = "Reference Row")]
    reference_row: usize,
}

pub fn execute(args: NearestArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(
        config_path,
        CliConfigOverrides {
            lat_column: args.lat_column,
            lon_column: args.lon_column,
            output_column: args.output_column,
            metric: args.metric.map(DistanceMetric::from),
            output_dir: None,
        },
    )?;

    let options = NearestOptions::new()
        .with_columns(config.lat_column.value, config.lon_column.value)
        .with_output_column(config.output_column.value)
        .with_metric(config.metric.value);

    let query = read_record_set(&args.query)
        .with_context(|| format!("Failed to read query {}", args.query.display()))?;
    let reference = read_record_set(&args.reference)
        .with_context(|| format!("Failed to read reference {}", args.reference.display()))?;

    let join = annotate_nearest(&query, &reference, &options)?;

    if options.metric == DistanceMetric::Haversine {
        warn_on_out_of_range_latitudes(&join, &options, output);
    }

    if let Some(ref out) = args.out {
        write_record_set(&join.query, out)
            .with_context(|| format!("Failed to write {}", out.display()))?;
    }

    let rows = to_rows(&join, &options);

    if output.is_json() {
        output.result(NearestOutput {
            query: args.query.display().to_string(),
            reference: args.reference.display().to_string(),
            metric: options.metric.to_string(),
            output_column: options.output_column.clone(),
            rows: join.query.len(),
            written_to: args.out.as_ref().map(|p| p.display().to_string()),
            results: rows,
        })?;
        return Ok(());
    }

    if let Some(ref out) = args.out {
        output.success(format!(
            "Annotated {} rows with '{}' ({}), written to {}",
            join.query.len(),
            options.output_column,
            options.metric,
            out.display()
        ));
        return Ok(());
    }

    output.section("Nearest Distances");
    output.kv("Metric", options.metric);
    output.kv("Column", &options.output_column);
    output.table(
        rows.into_iter()
            .map(|r| NearestTableRow {
                row: r.row,
                id: r.id.map(|v| display_cell(&v)).unwrap_or_else(|| "-".to_string()),
                latitude: format!("{:.6}", r.latitude),
                longitude: format!("{:.6}", r.longitude),
                distance: fmt_number(r.distance),
                reference_row: r.reference_row,
            })
            .collect(),
    );

    Ok(())
}

fn to_rows(join: &NearestJoin, options: &NearestOptions) -> Vec<NearestRow> {
    let distances = join.distances(&options.output_column);

    join.query
        .records
        .iter()
        .zip(distances)
        .zip(join.matches.iter().zip(&join.query_points))
        .enumerate()
        .map(|(row, ((record, distance), (reference_row, [lat, lon])))| NearestRow {
            row,
            id: record.get("id").cloned(),
            latitude: *lat,
            longitude: *lon,
            distance,
            reference_row: *reference_row,
        })
        .collect()
}

/// Haversine expects degrees; latitudes beyond +/-90 usually mean swapped columns
fn warn_on_out_of_range_latitudes(join: &NearestJoin, options: &NearestOptions, output: &OutputWriter) {
    let out_of_range = join.query_points.iter().filter(|[lat, _]| lat.abs() > 90.0).count();

    if out_of_range > 0 {
        output.warning(format!(
            "{} rows have '{}' outside [-90, 90]; are the latitude and longitude columns swapped?",
            out_of_range, options.columns.lat
        ));
    }
}

fn display_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn fmt_number(value: Option<f64>) -> String {
    value.map(|v| format!("{:.6}", v)).unwrap_or_else(|| "-".to_string())
}
