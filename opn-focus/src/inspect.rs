use xml_tree_core::Element;

/// Render the raw element tree with a configurable max depth.
pub fn render_tree(element: &Element, max_depth: usize) -> String {
    let mut out = String::new();
    render_element(element, 0, max_depth, &mut out);
    out
}

fn render_element(element: &Element, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{}{}\n", indent, element.name));

    if depth >= max_depth {
        return;
    }

    for child in &element.children {
        render_element(child, depth + 1, max_depth, out);
    }
}

/// One-line summary of a parsed config backup.
pub fn render_summary(element: &Element) -> String {
    let hostname = element.text_at(&["system", "hostname"]).unwrap_or("unknown");
    let domain = element.text_at(&["system", "domain"]).unwrap_or("unknown");
    format!(
        "root={} hostname={} domain={} sections={}",
        element.name,
        hostname,
        domain,
        element.children.len()
    )
}

#[cfg(test)]
mod tests {
    use super::{render_summary, render_tree};

    #[test]
    fn tree_respects_max_depth() {
        let root =
            xml_tree_core::parse(b"<opnsense><system><hostname>fw1</hostname></system></opnsense>")
                .expect("parse");
        let shallow = render_tree(&root, 1);
        assert!(shallow.contains("system"));
        assert!(!shallow.contains("hostname"));
        let deep = render_tree(&root, 3);
        assert!(deep.contains("  hostname"));
    }

    #[test]
    fn summary_reports_identity_and_section_count() {
        let root = xml_tree_core::parse(
            b"<opnsense><system><hostname>fw1</hostname><domain>example.lan</domain></system>\
              <filter/></opnsense>",
        )
        .expect("parse");
        assert_eq!(
            render_summary(&root),
            "root=opnsense hostname=fw1 domain=example.lan sections=2"
        );
    }
}
