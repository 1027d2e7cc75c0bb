//! Output formatting for catalogs, violations, and drafts.

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use reqcat_core::{CatalogEntry, CatalogSet, Violation};
use serde_json::{json, Value};

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn pretty(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Format a normalized catalog.
pub fn format_entries(entries: &[CatalogEntry], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => pretty(&entries),
        OutputFormat::Table => {
            if entries.is_empty() {
                return "No entries".to_string();
            }

            let mut table = Table::new();
            table.set_header(vec!["id", "key", "label", "color", "level"]);
            for entry in entries {
                table.add_row(vec![
                    Cell::new(&entry.id),
                    Cell::new(&entry.key),
                    Cell::new(&entry.label),
                    Cell::new(&entry.color),
                    Cell::new(entry.level.map(|l| l.to_string()).unwrap_or_default()),
                ]);
            }
            table.to_string()
        }
    }
}

/// Format every catalog of a fan-out, including failures.
pub fn format_catalog_set(set: &CatalogSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let catalogs: serde_json::Map<String, Value> = set
                .iter()
                .map(|(kind, load)| {
                    (
                        kind.to_string(),
                        json!({
                            "entries": load.entries,
                            "error": load.error.as_ref().map(ToString::to_string),
                        }),
                    )
                })
                .collect();
            pretty(&catalogs)
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["catalog", "entries", "keys", "error"]);
            for (kind, load) in set.iter() {
                let keys: Vec<&str> = load.entries.iter().map(|e| e.key.as_str()).collect();
                table.add_row(vec![
                    Cell::new(kind),
                    Cell::new(load.entries.len()),
                    Cell::new(keys.join(", ")),
                    Cell::new(load.error.as_ref().map(ToString::to_string).unwrap_or_default()),
                ]);
            }
            table.to_string()
        }
    }
}

/// Format validation violations.
pub fn format_violations(violations: &[Violation], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => pretty(&json!({ "violations": violations })),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["field", "rule", "message"]);
            for violation in violations {
                let rule = serde_json::to_value(violation.rule)
                    .ok()
                    .and_then(|v| v.as_str().map(ToString::to_string))
                    .unwrap_or_default();
                table.add_row(vec![
                    Cell::new(&violation.field),
                    Cell::new(rule),
                    Cell::new(&violation.message),
                ]);
            }
            table.to_string()
        }
    }
}

/// Format a request accepted by the backend. Always JSON; payloads are nested.
pub fn format_request(method: &str, endpoint: &str, body: &Value) -> String {
    pretty(&json!({ "method": method, "endpoint": endpoint, "body": body }))
}
