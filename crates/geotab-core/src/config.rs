use crate::error::{GeotabError, Result};
use crate::models::coordinates::{DEFAULT_LAT_COLUMN, DEFAULT_LON_COLUMN};
use crate::models::geometry::DistanceMetric;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_COLUMN: &str = "nearest_distance";
pub const DEFAULT_OUTPUT_DIR: &str = "data/processed";

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for geotab
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub lat_column: ConfigValue<String>,
    pub lon_column: ConfigValue<String>,
    pub output_column: ConfigValue<String>,
    pub metric: ConfigValue<DistanceMetric>,
    pub output_dir: ConfigValue<PathBuf>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            lat_column: ConfigValue::new(DEFAULT_LAT_COLUMN.to_string(), ConfigSource::Default),
            lon_column: ConfigValue::new(DEFAULT_LON_COLUMN.to_string(), ConfigSource::Default),
            output_column: ConfigValue::new(
                DEFAULT_OUTPUT_COLUMN.to_string(),
                ConfigSource::Default,
            ),
            metric: ConfigValue::new(DistanceMetric::Euclidean, ConfigSource::Default),
            output_dir: ConfigValue::new(PathBuf::from(DEFAULT_OUTPUT_DIR), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| GeotabError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeotabError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(lat_column) = file_config.lat_column {
            self.lat_column.update(lat_column, ConfigSource::File);
        }

        if let Some(lon_column) = file_config.lon_column {
            self.lon_column.update(lon_column, ConfigSource::File);
        }

        if let Some(output_column) = file_config.output_column {
            self.output_column.update(output_column, ConfigSource::File);
        }

        if let Some(metric) = file_config.metric {
            self.metric.update(parse_metric(&metric)?, ConfigSource::File);
        }

        if let Some(output_dir) = file_config.output_dir {
            self.output_dir.update(output_dir, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(lat_column) = env::var("GEOTAB_LAT_COLUMN") {
            self.lat_column.update(lat_column, ConfigSource::Environment);
        }

        if let Ok(lon_column) = env::var("GEOTAB_LON_COLUMN") {
            self.lon_column.update(lon_column, ConfigSource::Environment);
        }

        if let Ok(output_column) = env::var("GEOTAB_OUTPUT_COLUMN") {
            self.output_column.update(output_column, ConfigSource::Environment);
        }

        // GEOTAB_METRIC
        if let Ok(metric_str) = env::var("GEOTAB_METRIC") {
            match parse_metric(&metric_str) {
                Ok(metric) => self.metric.update(metric, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOTAB_METRIC value '{}': expected euclidean or haversine",
                    metric_str
                ),
            }
        }

        if let Ok(output_dir) = env::var("GEOTAB_OUTPUT_DIR") {
            self.output_dir.update(PathBuf::from(output_dir), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(lat_column) = overrides.lat_column {
            self.lat_column.update(lat_column, ConfigSource::Cli);
        }

        if let Some(lon_column) = overrides.lon_column {
            self.lon_column.update(lon_column, ConfigSource::Cli);
        }

        if let Some(output_column) = overrides.output_column {
            self.output_column.update(output_column, ConfigSource::Cli);
        }

        if let Some(metric) = overrides.metric {
            self.metric.update(metric, ConfigSource::Cli);
        }

        if let Some(output_dir) = overrides.output_dir {
            self.output_dir.update(output_dir, ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "lat_column".to_string(),
            (self.lat_column.value.clone(), self.lat_column.source),
        );
        map.insert(
            "lon_column".to_string(),
            (self.lon_column.value.clone(), self.lon_column.source),
        );
        map.insert(
            "output_column".to_string(),
            (self.output_column.value.clone(), self.output_column.source),
        );
        map.insert("metric".to_string(), (self.metric.value.to_string(), self.metric.source));
        map.insert(
            "output_dir".to_string(),
            (self.output_dir.value.display().to_string(), self.output_dir.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    lat_column: Option<String>,
    lon_column: Option<String>,
    output_column: Option<String>,
    metric: Option<String>,
    output_dir: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub lat_column: Option<String>,
    pub lon_column: Option<String>,
    pub output_column: Option<String>,
    pub metric: Option<DistanceMetric>,
    pub output_dir: Option<PathBuf>,
}

/// Parse distance metric from string
pub fn parse_metric(s: &str) -> Result<DistanceMetric> {
    match s.to_lowercase().as_str() {
        "euclidean" | "planar" => Ok(DistanceMetric::Euclidean),
        "haversine" | "geodesic" => Ok(DistanceMetric::Haversine),
        _ => Err(GeotabError::ConfigInvalid {
            key: "metric".to_string(),
            reason: format!("Invalid distance metric: {}. Use euclidean or haversine", s),
        }),
    }
}
