use console::style;
use geotab_core::GeotabError;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a record set without usable coordinates
pub fn missing_coordinates(role: &str, lat_column: &str, lon_column: &str) -> CliError {
    CliError::new(format!("The {} record set has no coordinates", role))
        .with_context(format!(
            "Looked for columns '{}' and '{}' and for a geometry attribute, found neither.",
            lat_column, lon_column
        ))
        .with_suggestion("Name the coordinate columns: --lat-column <NAME> --lon-column <NAME>")
        .with_suggestion("Or load the records from GeoJSON so centroids can be derived")
        .with_help("Run: geotab nearest --help")
}

/// Create error for an empty reference set
pub fn empty_reference() -> CliError {
    CliError::new("Reference record set is empty")
        .with_context("At least one reference row is needed to compute nearest distances.")
        .with_suggestion("Check that the reference file has rows: geotab summary <reference>")
        .with_help("Run: geotab nearest --help")
}

/// Create error for an unsupported file extension
pub fn unsupported_format(extension: &str, supported: &[String]) -> CliError {
    CliError::new(format!("Unsupported file format: .{}", extension))
        .with_context(format!("Supported extensions: {}", supported.join(", ")))
        .with_suggestion("Convert the file to GeoJSON or CSV")
}

/// Create error for invalid configuration
pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check geotab.toml (or the file passed with --config) for syntax errors")
        .with_suggestion("Check GEOTAB_* environment variables")
        .with_help("Run: geotab config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let message = format!("{:#}", error);

    match error.downcast_ref::<GeotabError>() {
        Some(GeotabError::MissingCoordinates { role, lat_column, lon_column }) => {
            return missing_coordinates(role, lat_column, lon_column);
        }
        Some(GeotabError::EmptyReference) => return empty_reference(),
        Some(GeotabError::UnsupportedFormat { extension, supported }) => {
            return unsupported_format(extension, supported);
        }
        Some(GeotabError::ConfigInvalid { key, reason }) => {
            return invalid_config(key, reason);
        }
        _ => {}
    }

    if message.contains("No such file or directory") || message.contains("File not found") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("ermission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or run with appropriate privileges")
    } else {
        CliError::new(message)
    }
}
