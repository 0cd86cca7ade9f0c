//! Integration tests for the geotab binary
//!
//! Every command runs inside a temporary directory with GEOTAB_* variables
//! cleared so no ambient configuration leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const ENV_VARS: [&str; 5] = [
    "GEOTAB_LAT_COLUMN",
    "GEOTAB_LON_COLUMN",
    "GEOTAB_OUTPUT_COLUMN",
    "GEOTAB_METRIC",
    "GEOTAB_OUTPUT_DIR",
];

fn geotab(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_geotab"));
    command.current_dir(dir);
    for var in ENV_VARS {
        command.env_remove(var);
    }
    command
}

fn run(command: &mut Command) -> Output {
    command.output().expect("Failed to execute command")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Output should be valid JSON")
}

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("query.csv"), "id,latitude,longitude\nA,1,1\nB,9,9.5\n").unwrap();
    fs::write(dir.join("reference.csv"), "id,latitude,longitude\n1,0,0\n2,10,10\n").unwrap();
}

#[test]
fn test_nearest_json_output() {
    let temp_dir = TempDir::new().unwrap();
    write_fixtures(temp_dir.path());

    let output = run(geotab(temp_dir.path()).args(["nearest", "query.csv", "reference.csv", "--json"]));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let parsed = json_stdout(&output);
    assert_eq!(parsed["status"], "success");

    let data = &parsed["data"];
    assert_eq!(data["metric"], "euclidean");
    assert_eq!(data["output_column"], "nearest_distance");
    assert_eq!(data["rows"], 2);

    let results = data["results"].as_array().unwrap();
    assert_eq!(results[0]["id"], "A");
    assert_eq!(results[0]["reference_row"], 0);
    let distance = results[0]["distance"].as_f64().unwrap();
    assert!((distance - 2f64.sqrt()).abs() < 1e-9);
    assert_eq!(results[1]["reference_row"], 1);
}

#[test]
fn test_nearest_reports_string_coordinates() {
    let temp_dir = TempDir::new().unwrap();
    write_fixtures(temp_dir.path());
    fs::write(
        temp_dir.path().join("survey.geojson"),
        r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"id": "A", "latitude": "1.0", "longitude": "1.0"}
            }
        ]
    }"#,
    )
    .unwrap();

    let output = run(geotab(temp_dir.path()).args(["nearest", "survey.geojson", "reference.csv", "--json"]));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let row = &json_stdout(&output)["data"]["results"][0];
    assert_eq!(row["latitude"], 1.0);
    assert_eq!(row["longitude"], 1.0);
    assert!((row["distance"].as_f64().unwrap() - 2f64.sqrt()).abs() < 1e-9);
}

#[test]
fn test_nearest_writes_annotated_csv() {
    let temp_dir = TempDir::new().unwrap();
    write_fixtures(temp_dir.path());

    let output = run(geotab(temp_dir.path()).args([
        "nearest",
        "query.csv",
        "reference.csv",
        "--output-column",
        "gap",
        "--out",
        "annotated.csv",
    ]));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let written = fs::read_to_string(temp_dir.path().join("annotated.csv")).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("id,latitude,longitude,gap"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn test_nearest_metric_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    write_fixtures(temp_dir.path());
    fs::write(temp_dir.path().join("geotab.toml"), "metric = \"haversine\"\n").unwrap();

    let output = run(geotab(temp_dir.path()).args(["nearest", "query.csv", "reference.csv", "--json"]));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["metric"], "haversine");
    let distance = data["results"][0]["distance"].as_f64().unwrap();
    assert!(distance > 100_000.0, "haversine distances are meters, got {distance}");
}

#[test]
fn test_nearest_without_coordinates_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_fixtures(temp_dir.path());
    fs::write(temp_dir.path().join("plain.csv"), "id,damage\n1,high\n").unwrap();

    let output = run(geotab(temp_dir.path()).args(["nearest", "plain.csv", "reference.csv"]));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("The query record set has no coordinates"), "stderr: {stderr}");
    assert!(stderr.contains("--lat-column"));
}

#[test]
fn test_summary_json_output() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("survey.csv"), "id,damage\n1,high\n2,\n3,high\n4,\n").unwrap();

    let output = run(geotab(temp_dir.path()).args(["summary", "survey.csv", "--json"]));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["rows"], 4);

    let columns = data["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[1]["column"], "damage");
    assert_eq!(columns[1]["dtype"], "string");
    assert_eq!(columns[1]["missing"], 2);
    assert_eq!(columns[1]["missing_percentage"], 50.0);
    assert_eq!(columns[1]["distinct"], 1);
}

#[test]
fn test_save_writes_both_files() {
    let temp_dir = TempDir::new().unwrap();
    write_fixtures(temp_dir.path());

    let output = run(geotab(temp_dir.path()).args([
        "save",
        "reference.csv",
        "--name",
        "facilities",
        "--output-dir",
        "out/processed",
        "--json",
    ]));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let processed = temp_dir.path().join("out").join("processed");
    assert!(processed.join("facilities.geojson").exists());
    assert!(processed.join("facilities.records.json").exists());
    assert_eq!(json_stdout(&output)["data"]["rows"], 2);
}

#[test]
fn test_config_reports_sources() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(geotab(temp_dir.path()).args(["config", "--json"]).env("GEOTAB_METRIC", "haversine"));
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let data = &json_stdout(&output)["data"];
    assert_eq!(data["metric"]["value"], "haversine");
    assert_eq!(data["metric"]["source"], "Environment");
    assert_eq!(data["lat_column"]["value"], "latitude");
    assert_eq!(data["lat_column"]["source"], "Default");
}

#[test]
fn test_explicit_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = run(geotab(temp_dir.path()).args(["config", "--config", "absent.toml"]));
    assert!(!output.status.success());
}
