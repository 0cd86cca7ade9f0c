use clap::{Parser, Subcommand, ValueEnum};
use geotab_core::models::DistanceMetric;
use std::path::PathBuf;

/// geotab - nearest-distance joins and summaries for geospatial record sets
#[derive(Parser, Debug)]
#[command(name = "geotab")]
#[command(about = "Nearest-distance joins and summaries for geospatial record sets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./geotab.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Distance metric selection
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetricArg {
    /// Planar distance on raw coordinate values
    Euclidean,
    /// Great-circle distance in meters
    Haversine,
}

impl From<MetricArg> for DistanceMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Euclidean => DistanceMetric::Euclidean,
            MetricArg::Haversine => DistanceMetric::Haversine,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Annotate each query row with the distance to its nearest reference row
    Nearest(NearestArgs),

    /// Summarize value types, missingness and cardinality per column
    Summary(SummaryArgs),

    /// Save a record set as GeoJSON plus a snapshot
    Save(SaveArgs),

    /// Show the effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct NearestArgs {
    /// Record set to annotate (GeoJSON, CSV or .records.json)
    pub query: PathBuf,

    /// Record set holding the candidate neighbors
    pub reference: PathBuf,

    /// Latitude column name
    #[arg(long, value_name = "NAME")]
    pub lat_column: Option<String>,

    /// Longitude column name
    #[arg(long, value_name = "NAME")]
    pub lon_column: Option<String>,

    /// Column that receives the distances
    #[arg(long, value_name = "NAME")]
    pub output_column: Option<String>,

    /// Distance metric
    #[arg(long, value_enum)]
    pub metric: Option<MetricArg>,

    /// Write the annotated query here instead of printing it (format by extension)
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct SummaryArgs {
    /// Record set to summarize
    pub input: PathBuf,
}

#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Record set to save
    pub input: PathBuf,

    /// Base name for the written files
    #[arg(long)]
    pub name: String,

    /// Directory to write into (created if missing)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}
