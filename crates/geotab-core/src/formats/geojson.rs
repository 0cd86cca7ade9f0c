//! GeoJSON format reader and writer

use std::fs;
use std::path::Path;

use crate::error::{GeotabError, Result};
use crate::formats::{FormatReader, FormatWriter};
use crate::models::{Crs, Geometry, Record, RecordSet};

/// GeoJSON FeatureCollection format
///
/// Feature properties become columns and feature geometries the geometry
/// attribute. A record set read from GeoJSON always has a geometry attribute,
/// even when individual features carry `null` geometry.
pub struct GeoJsonFormat;

impl FormatReader for GeoJsonFormat {
    fn read(&self, path: &Path) -> Result<RecordSet> {
        let content = fs::read_to_string(path)?;

        let geojson: geojson::GeoJson =
            content.parse().map_err(|e| GeotabError::FormatValidation {
                format: "GeoJSON".to_string(),
                reason: format!("Failed to parse GeoJSON: {}", e),
            })?;

        let crs = match &geojson {
            geojson::GeoJson::FeatureCollection(fc) => fc
                .foreign_members
                .as_ref()
                .and_then(|fm| fm.get("crs"))
                .and_then(extract_epsg_from_crs),
            _ => None,
        };
        if let Some(epsg) = crs.filter(|epsg| *epsg != Crs::wgs84().epsg) {
            tracing::warn!(
                path = %path.display(),
                "GeoJSON declares EPSG:{}; coordinates are used as-is without reprojection",
                epsg
            );
        }

        self.to_record_set(geojson)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["geojson", "json"]
    }

    fn format_name(&self) -> &str {
        "GeoJSON"
    }
}

impl FormatWriter for GeoJsonFormat {
    fn write(&self, set: &RecordSet, path: &Path) -> Result<()> {
        let collection = self.to_feature_collection(set)?;

        let content = serde_json::to_string_pretty(&collection).map_err(|e| {
            GeotabError::Serialization(format!("Failed to serialize GeoJSON: {}", e))
        })?;
        fs::write(path, content)?;

        Ok(())
    }
}

impl GeoJsonFormat {
    fn to_record_set(&self, geojson: geojson::GeoJson) -> Result<RecordSet> {
        let features = match geojson {
            geojson::GeoJson::FeatureCollection(fc) => fc.features,
            geojson::GeoJson::Feature(feature) => vec![feature],
            geojson::GeoJson::Geometry(geom) => vec![geojson::Feature::from(geom)],
        };

        let mut set = RecordSet::with_geometry(Vec::new());
        for (idx, feature) in features.iter().enumerate() {
            set.push(self.convert_feature(feature, idx)?);
        }

        Ok(set)
    }

    /// Convert a GeoJSON feature to a Record
    fn convert_feature(&self, feature: &geojson::Feature, idx: usize) -> Result<Record> {
        let mut record = Record::new();

        if let Some(props) = &feature.properties {
            record.properties = props.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        }

        // Feature ids become an "id" column unless a property already uses the name
        if let Some(id) = &feature.id {
            if !record.properties.contains_key("id") {
                let value = match id {
                    geojson::feature::Id::String(s) => serde_json::Value::String(s.clone()),
                    geojson::feature::Id::Number(n) => serde_json::Value::Number(n.clone()),
                };
                record.properties.insert("id".to_string(), value);
            }
        }

        if let Some(geom) = &feature.geometry {
            let value = serde_json::to_value(geom).map_err(|e| {
                GeotabError::Serialization(format!("Failed to serialize geometry: {}", e))
            })?;
            let geometry = Geometry::from_geojson(&value).ok_or_else(|| {
                GeotabError::InvalidGeometry {
                    row: idx,
                    reason: "unsupported geometry (expected Point, LineString, Polygon or Multi* geometry)"
                        .to_string(),
                }
            })?;
            record.geometry = Some(geometry);
        }

        Ok(record)
    }

    fn to_feature_collection(&self, set: &RecordSet) -> Result<geojson::FeatureCollection> {
        let mut features = Vec::with_capacity(set.len());

        for record in &set.records {
            // Every feature carries every column so readers can infer one schema
            let properties: geojson::JsonObject = set
                .columns
                .iter()
                .map(|c| (c.clone(), record.get(c).cloned().unwrap_or(serde_json::Value::Null)))
                .collect();

            let geometry = match &record.geometry {
                Some(geom) => Some(serde_json::from_value(geom.to_geojson()).map_err(|e| {
                    GeotabError::Serialization(format!("Failed to convert geometry: {}", e))
                })?),
                None => None,
            };

            features.push(geojson::Feature {
                bbox: None,
                geometry,
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }

        let mut foreign_members = geojson::JsonObject::new();
        foreign_members.insert(
            "crs".to_string(),
            serde_json::json!({
                "type": "name",
                "properties": { "name": Crs::wgs84().urn() }
            }),
        );

        Ok(geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: Some(foreign_members),
        })
    }
}

/// Extract EPSG code from CRS object
fn extract_epsg_from_crs(crs: &serde_json::Value) -> Option<u32> {
    // "EPSG:4326" or "urn:ogc:def:crs:EPSG::4326"
    crs.get("properties")
        .and_then(|props| props.get("name"))
        .and_then(|name| name.as_str())
        .and_then(|name| name.split(':').next_back())
        .and_then(|epsg| epsg.parse().ok())
}
