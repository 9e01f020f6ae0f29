// ABOUTME: Line-oriented parser for numbered "**Label:** value" agent output.
// ABOUTME: Single pass, no backtracking; unmatched lines are skipped.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{Record, Schema};

/// A line starting a new numbered entry, e.g. `  3.`.
static ENTRY_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\.").expect("entry start pattern"));

/// `[n.] [**]label[:][**] content`, capturing label and content.
static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:\d+\.)?\s*\*{0,2}([^:']+):?\*{0,2}\s*(.+)").expect("field line pattern")
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:https?://)?(?:www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*",
    )
    .expect("url pattern")
});

/// Parse agent output into records shaped by `schema`.
///
/// Every numbered line opens a new record. Labelled lines overwrite the field
/// their label resolves to; unlabelled lines continue the field last written,
/// until a blank line ends the continuation.
pub fn parse(text: &str, schema: &Schema) -> Vec<Record> {
    let mut results: Vec<Record> = Vec::new();
    let mut current_field: Option<String> = None;

    for line in text.lines() {
        if ENTRY_START.is_match(line) {
            results.push(schema.new_record());
        }

        let Some(record) = results.last_mut() else {
            continue;
        };

        if line.trim().is_empty() {
            current_field = None;
            continue;
        }

        let Some(caps) = FIELD_LINE.captures(line) else {
            tracing::debug!(line, "skipping unrecognised line");
            continue;
        };

        let whole = caps.get(0).map_or("", |m| m.as_str()).trim();
        let label = caps.get(1).map_or("", |m| m.as_str()).trim().to_lowercase();

        let Some(field) = schema.resolve_label(&label) else {
            if whole.is_empty() {
                current_field = None;
            } else if let Some(field) = &current_field {
                if let Some(Value::String(existing)) = record.get_mut(field) {
                    existing.push(' ');
                    existing.push_str(whole);
                }
            }
            continue;
        };

        let content = caps.get(2).map_or("", |m| m.as_str()).trim();
        let value = if schema.url_field() == Some(field) {
            Value::from(extract_url(content))
        } else if let Some(transform) = schema.transform(field) {
            transform(content)
        } else {
            Value::from(content)
        };

        record.set(field, value);
        current_field = Some(field.to_string());
    }

    results
}

/// Pull the first URL-shaped substring out of `content`.
///
/// A trailing `)` without a matching `(` inside the URL is dropped, which
/// unwraps markdown-style `(https://...)` links. Content with no URL is
/// returned trimmed.
pub fn extract_url(content: &str) -> String {
    let Some(found) = URL.find(content) else {
        return content.trim().to_string();
    };

    let url = found.as_str();
    let opens = url.matches('(').count();
    let closes = url.matches(')').count();
    match url.strip_suffix(')') {
        Some(stripped) if closes > opens => stripped.to_string(),
        _ => url.to_string(),
    }
}
