use crate::document::{Document, NodeId};

use super::{field_views, FieldView};

/// Render the resolved document as a markdown report.
///
/// `section` restricts output to one top-level config section; `None` when
/// the requested section is not present in the document.
pub fn render_markdown(doc: &Document, section: Option<&str>) -> Option<String> {
    let config = doc.single(doc.root(), "opnsense")?;
    let mut out = String::new();
    out.push_str("# OPNsense configuration\n");

    let mut matched = section.is_none();
    for view in field_views(doc, config) {
        if section.is_some_and(|s| s != view.name()) {
            continue;
        }
        matched = true;
        match view {
            FieldView::Section { name, node } => {
                render_heading(2, name, &mut out);
                render_record(doc, node, 2, &mut out);
            }
            FieldView::Item { name, value } => {
                out.push_str(&format!("\n- {name}: {value}\n"));
            }
            FieldView::Table {
                name,
                columns,
                rows,
            } => {
                render_heading(2, name, &mut out);
                render_table(&columns, &rows, &mut out);
            }
        }
    }
    matched.then_some(out)
}

fn render_record(doc: &Document, id: NodeId, depth: usize, out: &mut String) {
    for view in field_views(doc, id) {
        match view {
            FieldView::Item { name, value } => {
                out.push_str(&format!("- {name}: {value}\n"));
            }
            FieldView::Section { name, node } => {
                render_heading(depth + 1, name, out);
                render_record(doc, node, depth + 1, out);
            }
            FieldView::Table {
                name,
                columns,
                rows,
            } => {
                render_heading(depth + 1, name, out);
                render_table(&columns, &rows, out);
            }
        }
    }
}

fn render_heading(depth: usize, name: &str, out: &mut String) {
    out.push('\n');
    out.push_str(&"#".repeat(depth));
    out.push(' ');
    out.push_str(name);
    out.push('\n');
}

fn render_table(columns: &[String], rows: &[Vec<String>], out: &mut String) {
    if columns.is_empty() {
        out.push_str("- none\n");
        return;
    }
    out.push_str(&format!("| {} |\n", columns.join(" | ")));
    out.push_str(&format!(
        "|{}\n",
        columns.iter().map(|_| " --- |").collect::<String>()
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| cell.replace('|', "\\|")).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
}
