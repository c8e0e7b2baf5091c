//! Table and JSON rendering for CLI commands.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print `rows`, or `empty` when there are none and output is a table
pub fn print_rows<T: Serialize + Tabled>(rows: &[T], format: OutputFormat, empty: &str) {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("{}", empty),
        OutputFormat::Table => {
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
        }
        OutputFormat::Json => print_json(&rows),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => print_error(&format!("Cannot render JSON: {}", e)),
    }
}

/// Print a success line
pub fn print_success(msg: &str) {
    println!("✓ {}", msg);
}

/// Print a warning line
pub fn print_warning(msg: &str) {
    println!("⚠ {}", msg);
}

/// Print an error line to stderr
pub fn print_error(msg: &str) {
    eprintln!("✗ {}", msg);
}

/// Print an aligned `label: value` line
pub fn print_field(label: &str, value: &str) {
    println!("  {:<16} {}", format!("{}:", label), value);
}
