//! Summary command implementation

use crate::cli::SummaryArgs;
use crate::output::OutputWriter;
use crate::output_types::SummaryOutput;
use anyhow::{Context, Result};
use geotab_core::formats::read_record_set;
use geotab_core::summary::{geometry_types, summarize};
use tabled::Tabled;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Type")]
    dtype: String,
    #[tabled(rename = "Missing")]
    missing: usize,
    #[tabled(rename = "Missing %")]
    missing_percentage: String,
    #[tabled(rename = "Distinct")]
    distinct: usize,
}

pub fn execute(args: SummaryArgs, output: &OutputWriter) -> Result<()> {
    let set = read_record_set(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let columns = summarize(&set);
    let geometries = geometry_types(&set);

    if output.is_json() {
        output.result(SummaryOutput {
            input: args.input.display().to_string(),
            rows: set.len(),
            columns,
            geometry_types: geometries,
        })?;
    } else {
        output.section("Column Summary");
        output.kv("File", args.input.display());
        output.kv("Rows", set.len());
        if !geometries.is_empty() {
            let described: Vec<String> = geometries
                .iter()
                .map(|g| format!("{:?} ({})", g.geometry_type, g.rows))
                .collect();
            output.kv("Geometry", described.join(", "));
        }
        output.table(
            columns
                .into_iter()
                .map(|c| SummaryRow {
                    column: c.column,
                    dtype: c.dtype.to_string(),
                    missing: c.missing,
                    missing_percentage: format!("{:.1}%", c.missing_percentage),
                    distinct: c.distinct,
                })
                .collect(),
        );
    }

    Ok(())
}
