//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use geotab_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use geotab_core::models::DistanceMetric;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const ENV_VARS: [&str; 5] = [
    "GEOTAB_LAT_COLUMN",
    "GEOTAB_LON_COLUMN",
    "GEOTAB_OUTPUT_COLUMN",
    "GEOTAB_METRIC",
    "GEOTAB_OUTPUT_DIR",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_env_overrides_defaults() {
    clear_env();
    env::set_var("GEOTAB_LAT_COLUMN", "lat");
    env::set_var("GEOTAB_METRIC", "haversine");
    env::set_var("GEOTAB_OUTPUT_DIR", "/tmp/processed");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.lat_column.value, "lat");
    assert_eq!(config.lat_column.source, ConfigSource::Environment);
    assert_eq!(config.metric.value, DistanceMetric::Haversine);
    assert_eq!(config.output_dir.value, PathBuf::from("/tmp/processed"));
    assert_eq!(config.lon_column.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_metric_is_ignored() {
    clear_env();
    env::set_var("GEOTAB_METRIC", "chebyshev");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.metric.value, DistanceMetric::Euclidean);
    assert_eq!(config.metric.source, ConfigSource::Default);

    clear_env();
}

#[test]
#[serial]
fn test_configuration_precedence_order() {
    clear_env();
    env::set_var("GEOTAB_OUTPUT_COLUMN", "dist_env");

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "output_column = \"dist_file\"\nlon_column = \"lng\"").unwrap();

    let mut config = LayeredConfig::with_defaults()
        .load_from_file(file.path())
        .unwrap()
        .load_from_env();

    // Environment overrides the file, the file still wins over defaults
    assert_eq!(config.output_column.value, "dist_env");
    assert_eq!(config.output_column.source, ConfigSource::Environment);
    assert_eq!(config.lon_column.value, "lng");
    assert_eq!(config.lon_column.source, ConfigSource::File);

    config.update_from_cli(CliConfigOverrides {
        output_column: Some("dist_cli".to_string()),
        ..Default::default()
    });

    assert_eq!(config.output_column.value, "dist_cli");
    assert_eq!(config.output_column.source, ConfigSource::Cli);

    assert!(ConfigSource::Cli.precedence() > ConfigSource::Environment.precedence());
    assert!(ConfigSource::Environment.precedence() > ConfigSource::File.precedence());
    assert!(ConfigSource::File.precedence() > ConfigSource::Default.precedence());

    clear_env();
}

#[test]
fn test_missing_config_file_is_an_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/geotab.toml");
    assert!(result.is_err());
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "lat_column = [unclosed").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}

#[test]
fn test_configuration_source_tracking() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "metric = \"haversine\"").unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();
    let inspection_map = config.to_inspection_map();

    let (metric, metric_source) = &inspection_map["metric"];
    assert_eq!(metric, "haversine");
    assert_eq!(*metric_source, ConfigSource::File);

    let (output_dir, output_dir_source) = &inspection_map["output_dir"];
    assert_eq!(output_dir, "data/processed");
    assert_eq!(*output_dir_source, ConfigSource::Default);
}
