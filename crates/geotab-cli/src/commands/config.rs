//! Config command implementation

use crate::config_loader::load_config;
use crate::output::OutputWriter;
use crate::output_types::{ConfigOutput, ConfigValue};
use anyhow::Result;
use geotab_core::config::ConfigSource;
use std::collections::HashMap;
use std::path::Path;
use tabled::Tabled;

#[derive(Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = load_config(config_path)?;
    let inspection_map = config.to_inspection_map();

    if output.is_json() {
        let value_of = |key: &str| entry(&inspection_map, key);
        output.result(ConfigOutput {
            lat_column: value_of("lat_column"),
            lon_column: value_of("lon_column"),
            output_column: value_of("output_column"),
            metric: value_of("metric"),
            output_dir: value_of("output_dir"),
        })?;
    } else {
        output.section("Configuration Values");

        let mut rows: Vec<ConfigRow> = inspection_map
            .into_iter()
            .map(|(key, (value, source))| ConfigRow {
                key,
                value,
                source: format!("{:?}", source),
            })
            .collect();

        // Sort by key for consistent output
        rows.sort_by(|a, b| a.key.cmp(&b.key));

        output.table(rows);

        output.section("Configuration Precedence");
        output.info("CLI arguments > Environment variables > Config file > Defaults");
    }

    Ok(())
}

fn entry(map: &HashMap<String, (String, ConfigSource)>, key: &str) -> ConfigValue {
    map.get(key)
        .map(|(value, source)| ConfigValue { value: value.clone(), source: format!("{:?}", source) })
        .unwrap_or_else(|| ConfigValue { value: String::new(), source: "Unset".to_string() })
}
