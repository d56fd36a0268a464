//! Output formatting: plain text (human-readable) and JSON.

use serde_json::Value;
use std::fmt::Write;
use topstats_lib::format_timestamp_display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tables and key-value
    #[default]
    Plain,
    /// JSON (pretty-printed)
    Json,
}

/// Plain-text rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainOptions {
    /// Show timestamps in UTC instead of the local timezone.
    pub use_utc: bool,
}

const COLUMN_WIDTH: usize = 14;

/// Fields rendered through [`format_timestamp_display`].
fn is_timestamp_key(key: &str) -> bool {
    matches!(key, "time" | "timestamp" | "approved_at" | "date")
}

/// Format value as plain text (tables for arrays of objects, key-value for objects).
pub fn format_plain(value: &Value, opts: PlainOptions) -> String {
    let mut out = String::new();
    format_plain_impl(value, &mut out, 0, opts);
    out
}

fn format_plain_impl(v: &Value, out: &mut String, indent: usize, opts: PlainOptions) {
    let pad = "  ".repeat(indent);
    match v {
        Value::Array(arr) if arr.is_empty() => {
            let _ = writeln!(out, "{}<empty>", pad);
        }
        Value::Array(arr) if arr.len() > 1 && arr.iter().all(Value::is_object) => {
            let keys = table_keys(arr);
            let header = keys
                .iter()
                .map(|k| format!("{:>w$}", truncate(k, COLUMN_WIDTH), w = COLUMN_WIDTH))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(out, "{}{}", pad, header);
            let _ = writeln!(out, "{}{}", pad, "-".repeat(header.len().min(100)));
            for obj in arr {
                let row = keys
                    .iter()
                    .map(|k| {
                        let cell = obj
                            .get(k)
                            .and_then(|v| scalar(k, v, opts))
                            .unwrap_or_else(|| "-".to_string());
                        format!("{:>w$}", truncate(&cell, COLUMN_WIDTH), w = COLUMN_WIDTH)
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = writeln!(out, "{}{}", pad, row);
            }
        }
        Value::Array(arr) => {
            for (i, item) in arr.iter().enumerate() {
                if item.is_object() || item.is_array() {
                    let _ = writeln!(out, "{}[{}]", pad, i + 1);
                    format_plain_impl(item, out, indent + 1, opts);
                } else {
                    let s = scalar("", item, opts).unwrap_or_default();
                    let _ = writeln!(out, "{}{}", pad, s);
                }
            }
        }
        Value::Object(map) => {
            for (k, val) in map {
                match scalar(k, val, opts) {
                    Some(s) => {
                        let _ = writeln!(out, "{}{}: {}", pad, k, s);
                    }
                    None => {
                        let _ = writeln!(out, "{}{}:", pad, k);
                        format_plain_impl(val, out, indent + 1, opts);
                    }
                }
            }
        }
        scalar_value => {
            let s = scalar("", scalar_value, opts).unwrap_or_default();
            let _ = writeln!(out, "{}{}", pad, s);
        }
    }
}

/// Columns for a table: scalar-valued keys of the first row, in order.
fn table_keys(rows: &[Value]) -> Vec<String> {
    rows.first()
        .and_then(Value::as_object)
        .map(|m| {
            m.iter()
                .filter(|(_, v)| !v.is_object() && !v.is_array())
                .map(|(k, _)| k.clone())
                .collect()
        })
        .unwrap_or_default()
}

/// Display string for a scalar; `None` for objects and arrays.
fn scalar(key: &str, v: &Value, opts: PlainOptions) -> Option<String> {
    match v {
        Value::String(s) if is_timestamp_key(key) => {
            Some(format_timestamp_display(s, opts.use_utc))
        }
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Object(_) | Value::Array(_) => None,
    }
}

fn truncate(s: &str, max: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max {
        s
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

/// Format value as JSON (pretty).
pub fn format_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
