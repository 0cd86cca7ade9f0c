//! Per-column summary: value type, missingness and cardinality

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use crate::models::{GeometryType, RecordSet};

pub const GEOMETRY_COLUMN: &str = "geometry";

/// Value type inferred from the non-missing cells of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    String,
    /// Arrays and nested objects
    Object,
    Geometry,
    /// Cells of incompatible types
    Mixed,
    /// No non-missing cell
    Empty,
}

impl ColumnType {
    fn of(value: &Value) -> Self {
        match value {
            Value::Null => ColumnType::Empty,
            Value::Bool(_) => ColumnType::Bool,
            Value::Number(n) if n.is_f64() => ColumnType::Float,
            Value::Number(_) => ColumnType::Int,
            Value::String(_) => ColumnType::String,
            Value::Array(_) | Value::Object(_) => ColumnType::Object,
        }
    }

    /// Combine two observed types; ints widen to floats, anything else conflicting is mixed
    fn merge(self, other: Self) -> Self {
        use ColumnType::*;
        match (self, other) {
            (Empty, t) | (t, Empty) => t,
            (a, b) if a == b => a,
            (Int, Float) | (Float, Int) => Float,
            _ => Mixed,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Bool => "bool",
            ColumnType::String => "string",
            ColumnType::Object => "object",
            ColumnType::Geometry => "geometry",
            ColumnType::Mixed => "mixed",
            ColumnType::Empty => "empty",
        };
        f.write_str(name)
    }
}

/// Summary of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub dtype: ColumnType,
    pub missing: usize,
    pub missing_percentage: f64,
    pub distinct: usize,
}

/// Summarize every column in column order, followed by the geometry attribute if present
pub fn summarize(set: &RecordSet) -> Vec<ColumnSummary> {
    let rows = set.len();
    let mut summaries: Vec<ColumnSummary> = set
        .columns
        .iter()
        .map(|column| {
            let mut dtype = ColumnType::Empty;
            let mut missing = 0;
            let mut seen = HashSet::new();

            for record in &set.records {
                match record.get(column) {
                    Some(value) => {
                        dtype = dtype.merge(ColumnType::of(value));
                        seen.insert(distinct_key(value));
                    }
                    None => missing += 1,
                }
            }

            ColumnSummary {
                column: column.clone(),
                dtype,
                missing,
                missing_percentage: percentage(missing, rows),
                distinct: seen.len(),
            }
        })
        .collect();

    if set.has_geometry() {
        let mut missing = 0;
        let mut seen = HashSet::new();
        for record in &set.records {
            match &record.geometry {
                Some(geometry) => {
                    seen.insert(geometry.to_geojson().to_string());
                }
                None => missing += 1,
            }
        }

        summaries.push(ColumnSummary {
            column: GEOMETRY_COLUMN.to_string(),
            dtype: ColumnType::Geometry,
            missing,
            missing_percentage: percentage(missing, rows),
            distinct: seen.len(),
        });
    }

    summaries
}

/// Number of rows holding one geometry type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryCount {
    pub geometry_type: GeometryType,
    pub rows: usize,
}

/// Rows per geometry type, in order of first appearance
pub fn geometry_types(set: &RecordSet) -> Vec<GeometryCount> {
    let mut counts: Vec<GeometryCount> = Vec::new();
    for geometry in set.records.iter().filter_map(|r| r.geometry.as_ref()) {
        let geometry_type = geometry.geometry_type();
        match counts.iter_mut().find(|c| c.geometry_type == geometry_type) {
            Some(count) => count.rows += 1,
            None => counts.push(GeometryCount { geometry_type, rows: 1 }),
        }
    }
    counts
}

/// Key under which a cell is counted as distinct; `1` and `1.0` share one
fn distinct_key(value: &Value) -> String {
    match value.as_f64() {
        // -0.0 and 0.0 compare equal
        Some(n) if n == 0.0 => "0".to_string(),
        Some(n) => n.to_string(),
        None => value.to_string(),
    }
}

fn percentage(missing: usize, rows: usize) -> f64 {
    if rows == 0 {
        0.0
    } else {
        missing as f64 / rows as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Geometry, Record};
    use proptest::prelude::*;

    fn survey() -> RecordSet {
        RecordSet::from_records(vec![
            Record::new()
                .with("damage", "high")
                .with("floors", 3)
                .with("height", 9.5)
                .with_geometry(Geometry::point(37.0, 38.0)),
            Record::new()
                .with("damage", "high")
                .with("floors", 2)
                .with("height", 6)
                .with_geometry(Geometry::point(37.0, 38.0)),
            Record::new().with("damage", Value::Null).with("floors", "unknown"),
            Record::new().with("floors", 1),
        ])
    }

    fn find<'a>(summaries: &'a [ColumnSummary], column: &str) -> &'a ColumnSummary {
        summaries.iter().find(|s| s.column == column).unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let summaries = summarize(&survey());

        let damage = find(&summaries, "damage");
        assert_eq!(damage.dtype, ColumnType::String);
        assert_eq!(damage.missing, 2);
        assert_eq!(damage.missing_percentage, 50.0);
        assert_eq!(damage.distinct, 1);

        let floors = find(&summaries, "floors");
        assert_eq!(floors.dtype, ColumnType::Mixed);
        assert_eq!(floors.missing, 0);
        assert_eq!(floors.distinct, 4);

        let height = find(&summaries, "height");
        assert_eq!(height.dtype, ColumnType::Float);
        assert_eq!(height.missing, 2);
    }

    #[test]
    fn test_distinct_compares_numbers_by_value() {
        let set = RecordSet::from_records(vec![
            Record::new().with("floors", 1),
            Record::new().with("floors", 1.0),
            Record::new().with("floors", "1"),
            Record::new().with("floors", 2.5),
        ]);

        let floors = find(&summarize(&set), "floors").clone();
        assert_eq!(floors.distinct, 3);
        assert_eq!(floors.dtype, ColumnType::Mixed);
    }

    #[test]
    fn test_geometry_is_summarized_last() {
        let summaries = summarize(&survey());

        let last = summaries.last().unwrap();
        assert_eq!(last.column, "geometry");
        assert_eq!(last.dtype, ColumnType::Geometry);
        assert_eq!(last.missing, 2);
        assert_eq!(last.distinct, 1);
    }

    #[test]
    fn test_geometry_type_counts() {
        let mut set = survey();
        set.push(Record::new().with_geometry(Geometry::polygon(vec![vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 0.0],
        ]])));

        let counts = geometry_types(&set);
        assert_eq!(
            counts,
            vec![
                GeometryCount { geometry_type: GeometryType::Point, rows: 2 },
                GeometryCount { geometry_type: GeometryType::Polygon, rows: 1 },
            ]
        );
        assert!(geometry_types(&RecordSet::default()).is_empty());
    }

    #[test]
    fn test_empty_set() {
        let set = RecordSet::new(vec!["damage".to_string()]);
        let summaries = summarize(&set);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].dtype, ColumnType::Empty);
        assert_eq!(summaries[0].missing_percentage, 0.0);
    }

    #[test]
    fn test_dtype_display() {
        assert_eq!(ColumnType::Float.to_string(), "float");
        assert_eq!(serde_json::to_value(ColumnType::Mixed).unwrap(), serde_json::json!("mixed"));
    }

    proptest! {
        #[test]
        fn prop_missing_percentage_in_range(cells in prop::collection::vec(prop::option::of(0i64..5), 0..40)) {
            let records = cells
                .iter()
                .map(|cell| match cell {
                    Some(v) => Record::new().with("level", *v),
                    None => Record::new().with("level", Value::Null),
                })
                .collect();
            let set = RecordSet::from_records(records);

            for summary in summarize(&set) {
                prop_assert!(summary.missing_percentage >= 0.0);
                prop_assert!(summary.missing_percentage <= 100.0);
                prop_assert!(summary.missing <= set.len());
                prop_assert!(summary.distinct <= 5);
            }
        }
    }
}
