//! Tabular record sets with an optional geometry attribute.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::geometry::Geometry;

/// A single row: property cells keyed by column name plus an optional geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Property cells. An absent key or a JSON `null` is a missing value.
    pub properties: HashMap<String, Value>,

    /// Geometry of this row, if the record set has a geometry attribute
    pub geometry: Option<Geometry>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property cell
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(column.into(), value.into());
        self
    }

    /// Set the geometry
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Get a cell, treating JSON `null` as missing
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.properties.get(column).filter(|v| !v.is_null())
    }
}

/// An ordered collection of uniform rows (a table)
///
/// `columns` holds the property column names in insertion order. The geometry
/// attribute is not a property column; `geometry` records whether the set
/// carries one at all, independent of whether individual rows hold a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
    pub geometry: bool,
}

impl RecordSet {
    /// Create an empty record set with the given property columns
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, records: Vec::new(), geometry: false }
    }

    /// Create an empty record set that carries a geometry attribute
    pub fn with_geometry(columns: Vec<String>) -> Self {
        Self { columns, records: Vec::new(), geometry: true }
    }

    /// Build a record set from rows, collecting columns in order of first appearance
    ///
    /// Keys within one record have no defined order, so columns first seen in
    /// the same record are sorted by name.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut set = Self {
            columns: Vec::new(),
            geometry: records.iter().any(|r| r.geometry.is_some()),
            records: Vec::new(),
        };
        for record in records {
            set.push(record);
        }
        set
    }

    /// Append a row, registering any column it introduces
    pub fn push(&mut self, record: Record) {
        let mut new_columns: Vec<&String> =
            record.properties.keys().filter(|k| !self.has_column(k)).collect();
        new_columns.sort();
        let new_columns: Vec<String> = new_columns.into_iter().cloned().collect();
        self.columns.extend(new_columns);

        if record.geometry.is_some() {
            self.geometry = true;
        }
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Whether the set has a geometry attribute rows can derive coordinates from
    pub fn has_geometry(&self) -> bool {
        self.geometry
    }

    /// Cells of one column in row order; `None` for missing cells
    pub fn column(&self, name: &str) -> Option<Vec<Option<&Value>>> {
        if !self.has_column(name) {
            return None;
        }
        Some(self.records.iter().map(|r| r.get(name)).collect())
    }

    /// Set a column from per-row values, appending it if new or overwriting it in place
    ///
    /// Panics if `values` does not have one entry per row.
    pub fn set_column<V: Into<Value>>(&mut self, name: &str, values: Vec<V>) {
        assert_eq!(values.len(), self.records.len(), "column length must match row count");

        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
        for (record, value) in self.records.iter_mut().zip(values) {
            record.properties.insert(name.to_string(), value.into());
        }
    }
}
