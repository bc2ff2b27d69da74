//! Report rendering over the resolved document.
//!
//! The renderers walk the typed tree rather than the JSON view so sections
//! appear in document order. This module shapes the data (classifying
//! fields, flattening values into display strings); the format modules
//! ([`markdown`], [`bbcode`]) apply markup.

pub mod bbcode;
pub mod markdown;

pub use bbcode::render_bbcode;
pub use markdown::render_markdown;

use serde_json::{Map, Value};

use crate::document::{Document, NodeId};

/// A record field prepared for display.
pub(crate) enum FieldView<'a> {
    /// A leaf value (or list of leaf values), flattened to one line.
    Item { name: &'a str, value: String },
    /// A nested single record, rendered as a subsection.
    Section { name: &'a str, node: NodeId },
    /// A repeated record field, rendered as a table.
    Table {
        name: &'a str,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl FieldView<'_> {
    pub(crate) fn name(&self) -> &str {
        match self {
            FieldView::Item { name, .. }
            | FieldView::Section { name, .. }
            | FieldView::Table { name, .. } => name,
        }
    }
}

/// Classify the present fields of a record for display, in document order.
pub(crate) fn field_views<'a>(doc: &'a Document, id: NodeId) -> Vec<FieldView<'a>> {
    let mut views = Vec::new();
    for (name, children, repeated) in doc.fields(id) {
        if repeated && children.iter().all(|&c| doc.record_kind(c).is_some()) {
            let (columns, rows) = record_table(doc, children);
            views.push(FieldView::Table {
                name,
                columns,
                rows,
            });
        } else if !repeated && children.first().is_some_and(|&c| doc.record_kind(c).is_some()) {
            views.push(FieldView::Section {
                name,
                node: children[0],
            });
        } else {
            let value = if repeated {
                children
                    .iter()
                    .map(|&c| value_summary(&doc.data(c)))
                    .collect::<Vec<_>>()
                    .join(", ")
            } else {
                children
                    .first()
                    .map(|&c| value_summary(&doc.data(c)))
                    .unwrap_or_default()
            };
            views.push(FieldView::Item { name, value });
        }
    }
    views
}

/// Build a column set and rows for a repeated record field.
///
/// Columns are the union of entry field names in first-seen order, so
/// entries with different optional fields still share one table.
fn record_table(doc: &Document, entries: &[NodeId]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut columns: Vec<String> = Vec::new();
    for &entry in entries {
        for (name, _, _) in doc.fields(entry) {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }

    let rows = entries
        .iter()
        .map(|&entry| {
            columns
                .iter()
                .map(|column| {
                    let children = doc.field_children(entry, column);
                    children
                        .iter()
                        .map(|&c| value_summary(&doc.data(c)))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .collect()
        })
        .collect();
    (columns, rows)
}

/// Flatten a resolved value into one display line.
///
/// Resolved references compact to `alias:<name>` / `interface:<name>`;
/// other mappings flatten to `key=value` pairs.
pub(crate) fn value_summary(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_summary)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => reference_label(map).unwrap_or_else(|| {
            map.iter()
                .map(|(k, v)| format!("{k}={}", value_summary(v)))
                .collect::<Vec<_>>()
                .join(", ")
        }),
    }
}

/// Compact label for a structured cross-reference object.
fn reference_label(map: &Map<String, Value>) -> Option<String> {
    if map.len() != 1 {
        return None;
    }
    for key in ["alias", "interface"] {
        if let Some(inner) = map.get(key) {
            let name = inner
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("unnamed");
            return Some(format!("{key}:{name}"));
        }
    }
    None
}
