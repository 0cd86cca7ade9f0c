//! Save command implementation

use crate::cli::SaveArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use crate::output_types::SaveOutput;
use anyhow::{Context, Result};
use geotab_core::config::CliConfigOverrides;
use geotab_core::formats::read_record_set;
use geotab_core::persist::save_record_set;
use std::path::Path;

pub fn execute(args: SaveArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(
        config_path,
        CliConfigOverrides { output_dir: args.output_dir, ..Default::default() },
    )?;

    let set = read_record_set(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let output_dir = &config.output_dir.value;
    let paths = save_record_set(&set, output_dir, &args.name)
        .with_context(|| format!("Failed to save '{}' to {}", args.name, output_dir.display()))?;

    if output.is_json() {
        output.result(SaveOutput {
            rows: set.len(),
            geojson: paths.geojson.display().to_string(),
            snapshot: paths.snapshot.display().to_string(),
        })?;
    } else {
        output.success(format!("Saved {} rows", set.len()));
        output.kv("GeoJSON", paths.geojson.display());
        output.kv("Snapshot", paths.snapshot.display());
    }

    Ok(())
}
