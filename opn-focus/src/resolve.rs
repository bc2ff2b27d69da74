//! Query-time cross-reference resolution.
//!
//! These lookups run on every read of a resolver leaf's data. Each walks the
//! parent chain to the document root and scans the relevant subtree in
//! declaration order; the first entry with a matching name wins. A reference
//! that matches nothing degrades to the raw string, so partially exported or
//! forward-referencing configs are tolerated. Resolution never errors.

use serde_json::{Map, Value};

use crate::document::{Document, NodeId};

/// Resolve a raw string against the alias definitions.
///
/// Produces `{"alias": <alias data>}` for the first alias whose name equals
/// the raw string, or the raw string itself when nothing matches.
pub(crate) fn alias_value(doc: &Document, node: NodeId, raw: &str) -> Value {
    find_alias(doc, node, raw).unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Resolve a rule target that may name an interface or an alias.
///
/// A trailing `ip` suffix is stripped to obtain the interface candidate
/// (`lanip` refers to the `lan` interface). Interfaces win over aliases;
/// an unmatched target falls back to the raw string.
pub(crate) fn rule_target_value(doc: &Document, node: NodeId, raw: &str) -> Value {
    let candidate = raw.strip_suffix("ip").unwrap_or(raw);
    if let Some(reference) = find_interface(doc, node, candidate, raw) {
        return reference;
    }
    alias_value(doc, node, raw)
}

/// Resolve a comma-separated interface list.
///
/// Each token resolves independently; unmatched tokens pass through
/// verbatim, so the result mixes reference objects and plain strings while
/// preserving the split order.
pub(crate) fn interface_list_value(doc: &Document, node: NodeId, raw: &str) -> Value {
    let items = raw
        .split(',')
        .map(|token| {
            find_interface(doc, node, token, token)
                .unwrap_or_else(|| Value::String(token.to_string()))
        })
        .collect();
    Value::Array(items)
}

/// The `opnsense` config record reached through the document root.
fn config_of(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.single(doc.root_of(node), "opnsense")
}

/// Scan alias definitions in declaration order for a name match.
fn find_alias(doc: &Document, node: NodeId, name: &str) -> Option<Value> {
    let config = config_of(doc, node)?;
    let aliases = doc.single(config, "aliases")?;
    for &entry in doc.field_children(aliases, "alias") {
        let entry_name = doc
            .single(entry, "name")
            .and_then(|n| doc.scalar_text(n));
        if entry_name == Some(name) {
            let mut reference = Map::new();
            reference.insert("alias".to_string(), doc.data(entry));
            return Some(Value::Object(reference));
        }
    }
    None
}

/// Scan the interface container in declaration order for an exact slot-name
/// match, annotating the matched interface's data with `annotate_as`.
fn find_interface(doc: &Document, node: NodeId, name: &str, annotate_as: &str) -> Option<Value> {
    let config = config_of(doc, node)?;
    let container = doc.single(config, "interfaces")?;
    for (slot, children, _) in doc.fields(container) {
        if slot != name {
            continue;
        }
        let &iface = children.first()?;
        let Value::Object(mut data) = doc.data(iface) else {
            return None;
        };
        data.insert("name".to_string(), Value::String(annotate_as.to_string()));
        let mut reference = Map::new();
        reference.insert("interface".to_string(), Value::Object(data));
        return Some(Value::Object(reference));
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::build::build_document;
    use crate::document::{Document, NodeId};

    fn doc_from(xml: &str) -> Document {
        let root = xml_tree_core::parse(xml.as_bytes()).expect("parse");
        build_document(&root).expect("build")
    }

    fn rule_source_address(doc: &Document) -> NodeId {
        let config = doc.single(doc.root(), "opnsense").expect("config");
        let filter = doc.single(config, "filter").expect("filter");
        let rule = doc.field_children(filter, "rule")[0];
        let source = doc.single(rule, "source").expect("source");
        doc.single(source, "address").expect("address")
    }

    #[test]
    fn alias_reference_substitutes_the_alias_data() {
        let doc = doc_from(
            "<opnsense>\
             <aliases><alias><name>web_servers</name><type>host</type>\
             <address>10.0.0.1</address></alias></aliases>\
             <filter><rule><source><address>web_servers</address></source></rule></filter>\
             </opnsense>",
        );
        assert_eq!(
            doc.data(rule_source_address(&doc)),
            json!({"alias": {"name": "web_servers", "type": "host", "address": "10.0.0.1"}})
        );
    }

    #[test]
    fn unresolved_alias_falls_back_to_the_raw_string() {
        let doc = doc_from(
            "<opnsense>\
             <aliases><alias><name>web_servers</name></alias></aliases>\
             <filter><rule><source><address>db_servers</address></source></rule></filter>\
             </opnsense>",
        );
        assert_eq!(doc.data(rule_source_address(&doc)), json!("db_servers"));
    }

    #[test]
    fn missing_aliases_subtree_falls_back_silently() {
        let doc = doc_from(
            "<opnsense>\
             <filter><rule><source><address>web_servers</address></source></rule></filter>\
             </opnsense>",
        );
        assert_eq!(doc.data(rule_source_address(&doc)), json!("web_servers"));
    }

    #[test]
    fn duplicate_alias_names_resolve_to_the_first_declared_entry() {
        let doc = doc_from(
            "<opnsense>\
             <aliases>\
             <alias><name>dup</name><address>10.0.0.1</address></alias>\
             <alias><name>dup</name><address>10.0.0.2</address></alias>\
             </aliases>\
             <filter><rule><source><address>dup</address></source></rule></filter>\
             </opnsense>",
        );
        assert_eq!(
            doc.data(rule_source_address(&doc)),
            json!({"alias": {"name": "dup", "address": "10.0.0.1"}})
        );
    }

    #[test]
    fn interface_suffix_target_wins_over_aliases() {
        let doc = doc_from(
            "<opnsense>\
             <interfaces><lan><if>em0</if></lan></interfaces>\
             <aliases><alias><name>lanip</name><address>10.0.0.1</address></alias></aliases>\
             <filter><rule><source><address>lanip</address></source></rule></filter>\
             </opnsense>",
        );
        // The matched interface is annotated with the reference as written,
        // suffix included.
        assert_eq!(
            doc.data(rule_source_address(&doc)),
            json!({"interface": {"if": "em0", "name": "lanip"}})
        );
    }

    #[test]
    fn interface_list_mixes_references_and_raw_tokens() {
        let doc = doc_from(
            "<opnsense>\
             <interfaces><lan><if>em0</if></lan><wan><if>em1</if></wan></interfaces>\
             <filter><rule><interface>lan,opt1</interface></rule></filter>\
             </opnsense>",
        );
        let config = doc.single(doc.root(), "opnsense").expect("config");
        let filter = doc.single(config, "filter").expect("filter");
        let rule = doc.field_children(filter, "rule")[0];
        let interface = doc.single(rule, "interface").expect("interface");
        assert_eq!(
            doc.data(interface),
            json!([{"interface": {"if": "em0", "name": "lan"}}, "opt1"])
        );
    }

    #[test]
    fn numbered_opt_slot_resolves_in_interface_list() {
        let doc = doc_from(
            "<opnsense>\
             <interfaces><lan><if>em0</if></lan><opt2><if>em3</if></opt2></interfaces>\
             <syslog><sourceip>opt2</sourceip></syslog>\
             </opnsense>",
        );
        let config = doc.single(doc.root(), "opnsense").expect("config");
        let syslog = doc.single(config, "syslog").expect("syslog");
        let sourceip = doc.single(syslog, "sourceip").expect("sourceip");
        assert_eq!(
            doc.data(sourceip),
            json!([{"interface": {"if": "em3", "name": "opt2"}}])
        );
    }

    #[test]
    fn validated_port_still_resolves_as_alias() {
        let doc = doc_from(
            "<opnsense>\
             <aliases><alias><name>HTTP</name><type>port</type>\
             <address>80</address></alias></aliases>\
             <filter><rule><destination><port>HTTP</port></destination></rule></filter>\
             </opnsense>",
        );
        let config = doc.single(doc.root(), "opnsense").expect("config");
        let filter = doc.single(config, "filter").expect("filter");
        let rule = doc.field_children(filter, "rule")[0];
        let destination = doc.single(rule, "destination").expect("destination");
        let port = doc.single(destination, "port").expect("port");
        assert_eq!(
            doc.data(port),
            json!({"alias": {"name": "HTTP", "type": "port", "address": "80"}})
        );
    }
}
