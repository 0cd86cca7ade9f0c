//! CSV format reader and writer
//!
//! CSV tables have no geometry attribute, so coordinates must come from
//! explicit latitude/longitude columns.

use std::path::Path;

use serde_json::Value;

use crate::error::{GeotabError, Result};
use crate::formats::{FormatReader, FormatWriter};
use crate::models::{Record, RecordSet};

pub struct CsvFormat;

impl FormatReader for CsvFormat {
    fn read(&self, path: &Path) -> Result<RecordSet> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path).map_err(csv_error)?;

        let headers: Vec<String> =
            rdr.headers().map_err(csv_error)?.iter().map(|h| h.to_string()).collect();

        let mut set = RecordSet::new(headers.clone());
        for result in rdr.records() {
            let row = result.map_err(csv_error)?;
            let mut record = Record::new();
            for (column, cell) in headers.iter().zip(row.iter()) {
                if let Some(value) = parse_cell(cell) {
                    record.properties.insert(column.clone(), value);
                }
            }
            set.push(record);
        }

        Ok(set)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["csv"]
    }

    fn format_name(&self) -> &str {
        "CSV"
    }
}

impl FormatWriter for CsvFormat {
    fn write(&self, set: &RecordSet, path: &Path) -> Result<()> {
        if set.has_geometry() {
            tracing::debug!(path = %path.display(), "Geometry attribute is not written to CSV");
        }

        let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
        wtr.write_record(&set.columns).map_err(csv_error)?;

        for record in &set.records {
            let row: Vec<String> =
                set.columns.iter().map(|c| format_cell(record.get(c))).collect();
            wtr.write_record(&row).map_err(csv_error)?;
        }
        wtr.flush()?;

        Ok(())
    }
}

/// Parse one cell: empty is missing, numbers and booleans are typed, anything else is a string
fn parse_cell(cell: &str) -> Option<Value> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Value::from(i));
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        // NaN and infinities have no JSON number form
        if f.is_finite() {
            return Some(Value::from(f));
        }
    }
    match trimmed {
        "true" | "True" | "TRUE" => Some(Value::Bool(true)),
        "false" | "False" | "FALSE" => Some(Value::Bool(false)),
        _ => Some(Value::String(cell.to_string())),
    }
}

fn format_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn csv_error(e: csv::Error) -> GeotabError {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => GeotabError::Io(io),
            other => GeotabError::FormatValidation {
                format: "CSV".to_string(),
                reason: format!("{:?}", other),
            },
        }
    } else {
        GeotabError::FormatValidation { format: "CSV".to_string(), reason: e.to_string() }
    }
}
