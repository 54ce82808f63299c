//! Output formatting utilities for the CLI
//!
//! JSON output is the document the API returned. Table output lays the
//! same document out as rows without dropping or renaming anything.

use anyhow::Result;
use colored::*;
use serde_json::{Map, Value};
use tabled::{builder::Builder, settings::Style};

/// Output format options
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Format an API response
pub fn format_value(value: &Value, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(format_table(value)),
    }
}

fn format_table(value: &Value) -> String {
    match value {
        Value::Array(items) => format_array(items),
        Value::Object(map) => format_object(map),
        other => cell_text(other),
    }
}

/// Objects print their scalar members as a Key/Value table, then one
/// titled table per array member.
fn format_object(map: &Map<String, Value>) -> String {
    let mut sections = Vec::new();

    let scalars: Vec<(&String, &Value)> = map.iter().filter(|(_, v)| !v.is_array()).collect();
    if !scalars.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Key".to_string(), "Value".to_string()]);
        for (key, value) in scalars {
            builder.push_record([key.clone(), cell_text(value)]);
        }
        sections.push(styled(builder));
    }

    for (key, value) in map {
        if let Value::Array(items) = value {
            sections.push(format!("{}\n{}", format!("{}:", key).bold(), format_array(items)));
        }
    }

    if sections.is_empty() {
        return "No results.".to_string();
    }
    sections.join("\n\n")
}

/// Arrays of objects become one row per element with the union of their
/// keys as columns, in first-seen order. Other arrays become a single
/// Value column.
fn format_array(items: &[Value]) -> String {
    if items.is_empty() {
        return "No results.".to_string();
    }

    let mut builder = Builder::default();

    if items.iter().all(Value::is_object) {
        let mut columns: Vec<&String> = Vec::new();
        for item in items.iter().filter_map(Value::as_object) {
            for key in item.keys() {
                if !columns.contains(&key) {
                    columns.push(key);
                }
            }
        }

        builder.push_record(columns.iter().map(|c| c.to_string()));
        for item in items.iter().filter_map(Value::as_object) {
            builder.push_record(
                columns
                    .iter()
                    .map(|c| item.get(c.as_str()).map(cell_text).unwrap_or_default()),
            );
        }
    } else {
        builder.push_record(["Value".to_string()]);
        for item in items {
            builder.push_record([cell_text(item)]);
        }
    }

    styled(builder)
}

fn styled(builder: Builder) -> String {
    builder.build().with(Style::rounded()).to_string()
}

/// Strings print bare, null prints empty, everything else as compact JSON
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
