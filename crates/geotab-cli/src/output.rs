//! Rendering of command results, either styled for a terminal or as JSON
//!
//! In JSON mode every command prints exactly one `{"status", "data"}` document
//! on stdout; status lines become `{"status", "message"}` objects, and tables,
//! headings and key/value lines are suppressed.

use console::{style, StyledObject};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy)]
enum Level {
    Success,
    Info,
    Warning,
}

impl Level {
    fn status(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
        }
    }

    fn marker(self) -> StyledObject<&'static str> {
        match self {
            Level::Success => style("✓").green().bold(),
            Level::Info => style("ℹ").blue().bold(),
            Level::Warning => style("⚠").yellow().bold(),
        }
    }
}

pub struct OutputWriter {
    json: bool,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: impl Display) {
        self.status_line(Level::Success, message);
    }

    pub fn info(&self, message: impl Display) {
        self.status_line(Level::Info, message);
    }

    /// Goes to stderr so it never interleaves with a JSON result on stdout
    pub fn warning(&self, message: impl Display) {
        self.status_line(Level::Warning, message);
    }

    fn status_line(&self, level: Level, message: impl Display) {
        let line = if self.json {
            json!({ "status": level.status(), "message": message.to_string() }).to_string()
        } else {
            format!("{} {}", level.marker(), message)
        };

        match level {
            Level::Warning => eprintln!("{}", line),
            Level::Success | Level::Info => println!("{}", line),
        }
    }

    /// Print a command result wrapped in the success envelope
    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(&envelope(data)?)?);
        Ok(())
    }

    pub fn section(&self, title: impl Display) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        if !self.json {
            println!("{}: {}", style(key).bold(), value);
        }
    }

    pub fn table<T: Tabled>(&self, rows: Vec<T>) {
        if self.json {
            return;
        }
        if rows.is_empty() {
            println!("{}", style("(no rows)").dim());
            return;
        }
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{}", table);
    }
}

fn envelope<T: Serialize>(data: T) -> serde_json::Result<Value> {
    Ok(json!({ "status": "success", "data": serde_json::to_value(data)? }))
}
