use crate::document::{Document, NodeId};

use super::{field_views, FieldView};

/// Render the resolved document as a BBCode report, for forum posts.
///
/// Same shape as the markdown report: `section` restricts output to one
/// top-level config section; `None` when that section is not present.
pub fn render_bbcode(doc: &Document, section: Option<&str>) -> Option<String> {
    let config = doc.single(doc.root(), "opnsense")?;
    let mut out = String::new();
    out.push_str("[size=150][b]OPNsense configuration[/b][/size]\n");

    let mut matched = section.is_none();
    for view in field_views(doc, config) {
        if section.is_some_and(|s| s != view.name()) {
            continue;
        }
        matched = true;
        match view {
            FieldView::Section { name, node } => {
                render_heading(name, &mut out);
                render_record(doc, node, &mut out);
            }
            FieldView::Item { name, value } => {
                out.push_str(&format!("\n{name}: {value}\n"));
            }
            FieldView::Table {
                name,
                columns,
                rows,
            } => {
                render_heading(name, &mut out);
                render_table(&columns, &rows, &mut out);
            }
        }
    }
    matched.then_some(out)
}

fn render_record(doc: &Document, id: NodeId, out: &mut String) {
    let mut items = Vec::new();
    for view in field_views(doc, id) {
        match view {
            FieldView::Item { name, value } => items.push(format!("[*]{name}: {value}")),
            FieldView::Section { name, node } => {
                flush_items(&mut items, out);
                render_subheading(name, out);
                render_record(doc, node, out);
            }
            FieldView::Table {
                name,
                columns,
                rows,
            } => {
                flush_items(&mut items, out);
                render_subheading(name, out);
                render_table(&columns, &rows, out);
            }
        }
    }
    flush_items(&mut items, out);
}

fn flush_items(items: &mut Vec<String>, out: &mut String) {
    if items.is_empty() {
        return;
    }
    out.push_str("[list]\n");
    for item in items.drain(..) {
        out.push_str(&item);
        out.push('\n');
    }
    out.push_str("[/list]\n");
}

fn render_heading(name: &str, out: &mut String) {
    out.push_str(&format!("\n[size=120][b]{name}[/b][/size]\n"));
}

fn render_subheading(name: &str, out: &mut String) {
    out.push_str(&format!("\n[b]{name}[/b]\n"));
}

fn render_table(columns: &[String], rows: &[Vec<String>], out: &mut String) {
    if columns.is_empty() {
        out.push_str("none\n");
        return;
    }
    out.push_str("[table]\n[tr]");
    for column in columns {
        out.push_str(&format!("[th]{column}[/th]"));
    }
    out.push_str("[/tr]\n");
    for row in rows {
        out.push_str("[tr]");
        for cell in row {
            out.push_str(&format!("[td]{cell}[/td]"));
        }
        out.push_str("[/tr]\n");
    }
    out.push_str("[/table]\n");
}

#[cfg(test)]
mod tests {
    use crate::build::build_document;
    use crate::document::Document;

    use super::render_bbcode;

    fn doc_from(xml: &str) -> Document {
        let root = xml_tree_core::parse(xml.as_bytes()).expect("parse");
        build_document(&root).expect("build")
    }

    #[test]
    fn renders_sections_and_lists() {
        let doc = doc_from(
            "<opnsense><system><hostname>fw1</hostname>\
             <domain>example.lan</domain></system></opnsense>",
        );
        let report = render_bbcode(&doc, None).expect("report");
        assert!(report.contains("[size=120][b]system[/b][/size]"));
        assert!(report.contains("[*]hostname: fw1"));
        assert!(report.contains("[/list]"));
    }

    #[test]
    fn renders_repeated_records_as_tables() {
        let doc = doc_from(
            "<opnsense><aliases>\
             <alias><name>web</name><type>host</type></alias>\
             </aliases></opnsense>",
        );
        let report = render_bbcode(&doc, None).expect("report");
        assert!(report.contains("[table]"));
        assert!(report.contains("[th]name[/th][th]type[/th]"));
        assert!(report.contains("[td]web[/td][td]host[/td]"));
    }

    #[test]
    fn unknown_section_filter_yields_none() {
        let doc = doc_from("<opnsense><system><hostname>fw1</hostname></system></opnsense>");
        assert!(render_bbcode(&doc, Some("nat")).is_none());
    }
}
