//! Unresolved-reference diagnostics.
//!
//! Reference resolution itself never fails: a name that matches no alias or
//! interface reads back as the raw string. That is the right behavior for
//! report generation, but the operator usually wants to know about it. This
//! check walks the resolved document and reports every reference field that
//! fell back to its raw value and is not a built-in keyword or an address
//! literal.

use serde::Serialize;
use serde_json::Value;

use crate::document::{Document, NodeId};
use crate::value::ScalarKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Error,
    Warning,
}

/// One unresolved reference, with the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckFinding {
    pub severity: FindingSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
}

/// Walk the resolved document and report unresolved references.
///
/// Empty when every reference resolved or is a literal.
pub fn check_document(doc: &Document) -> Vec<CheckFinding> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    walk(doc, doc.root(), &mut path, &mut out);
    out
}

/// One-line count summary for terminal output.
pub fn summarize_findings(findings: &[CheckFinding]) -> String {
    let errors = findings
        .iter()
        .filter(|f| f.severity == FindingSeverity::Error)
        .count();
    let warnings = findings.len() - errors;
    format!("{errors} error(s), {warnings} warning(s)")
}

fn walk(doc: &Document, id: NodeId, path: &mut Vec<String>, out: &mut Vec<CheckFinding>) {
    for (name, children, repeated) in doc.fields(id) {
        for (idx, &child) in children.iter().enumerate() {
            if repeated {
                path.push(format!("{name}[{idx}]"));
            } else {
                path.push(name.to_string());
            }
            if doc.record_kind(child).is_some() {
                walk(doc, child, path, out);
            } else {
                inspect_leaf(doc, child, path, out);
            }
            path.pop();
        }
    }
}

fn inspect_leaf(doc: &Document, id: NodeId, path: &[String], out: &mut Vec<CheckFinding>) {
    let Some(kind) = doc.scalar_kind(id) else {
        return;
    };
    match kind {
        ScalarKind::RuleTarget => {
            // A string result means neither an interface nor an alias matched.
            if let Value::String(raw) = doc.data(id) {
                if !raw.is_empty() && !is_builtin_or_literal(&raw) {
                    out.push(CheckFinding {
                        severity: FindingSeverity::Error,
                        code: "unresolved_reference".to_string(),
                        path: path.join("."),
                        message: format!(
                            "'{raw}' matches no alias or interface definition"
                        ),
                    });
                }
            }
        }
        ScalarKind::InterfaceList => {
            if let Value::Array(items) = doc.data(id) {
                for item in items {
                    let Value::String(token) = item else {
                        continue;
                    };
                    if !token.is_empty() && !is_builtin_or_literal(&token) {
                        out.push(CheckFinding {
                            severity: FindingSeverity::Warning,
                            code: "unresolved_interface".to_string(),
                            path: path.join("."),
                            message: format!("'{token}' matches no interface definition"),
                        });
                    }
                }
            }
        }
        ScalarKind::Port | ScalarKind::AliasRef => {
            if let Value::String(raw) = doc.data(id) {
                if !raw.is_empty() && !is_port_literal(&raw) {
                    out.push(CheckFinding {
                        severity: FindingSeverity::Warning,
                        code: "unresolved_port_alias".to_string(),
                        path: path.join("."),
                        message: format!("'{raw}' matches no alias definition"),
                    });
                }
            }
        }
        ScalarKind::Text | ScalarKind::Integer | ScalarKind::Timestamp | ScalarKind::Flag => {}
    }
}

/// Built-in keywords and address literals are always valid references.
fn is_builtin_or_literal(value: &str) -> bool {
    let v = value.trim().to_ascii_lowercase();
    if matches!(v.as_str(), "any" | "self" | "(self)") {
        return true;
    }
    if v.parse::<std::net::IpAddr>().is_ok() {
        return true;
    }
    if let Some((ip, mask)) = v.split_once('/') {
        return ip.parse::<std::net::IpAddr>().is_ok() && mask.parse::<u8>().is_ok();
    }
    false
}

/// A bare port number or a port range needs no alias definition.
fn is_port_literal(value: &str) -> bool {
    let is_decimal = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match value.split_once([':', '-']) {
        Some((lo, hi)) => is_decimal(lo) && is_decimal(hi),
        None => is_decimal(value),
    }
}

#[cfg(test)]
mod tests {
    use crate::build::build_document;
    use crate::document::Document;

    use super::{check_document, summarize_findings, FindingSeverity};

    fn doc_from(xml: &str) -> Document {
        let root = xml_tree_core::parse(xml.as_bytes()).expect("parse");
        build_document(&root).expect("build")
    }

    #[test]
    fn clean_config_yields_no_findings() {
        let doc = doc_from(
            "<opnsense>\
             <interfaces><lan><if>em1</if></lan></interfaces>\
             <aliases><alias><name>web</name><address>10.0.0.1</address></alias></aliases>\
             <filter><rule><interface>lan</interface>\
             <source><address>web</address></source>\
             <destination><address>10.0.0.0/24</address><port>443</port></destination>\
             </rule></filter></opnsense>",
        );
        assert!(check_document(&doc).is_empty());
    }

    #[test]
    fn unresolved_rule_address_is_an_error() {
        let doc = doc_from(
            "<opnsense><filter><rule>\
             <source><address>ghost_hosts</address></source>\
             </rule></filter></opnsense>",
        );
        let findings = check_document(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, FindingSeverity::Error);
        assert_eq!(findings[0].code, "unresolved_reference");
        assert_eq!(findings[0].path, "opnsense.filter.rule[0].source.address");
    }

    #[test]
    fn unresolved_interface_token_is_a_warning() {
        let doc = doc_from(
            "<opnsense>\
             <interfaces><lan><if>em1</if></lan></interfaces>\
             <syslog><sourceip>lan,opt9</sourceip></syslog></opnsense>",
        );
        let findings = check_document(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, FindingSeverity::Warning);
        assert_eq!(findings[0].code, "unresolved_interface");
        assert!(findings[0].message.contains("opt9"));
    }

    #[test]
    fn literal_addresses_and_keywords_pass() {
        let doc = doc_from(
            "<opnsense><filter><rule>\
             <source><network>192.168.1.0/24</network></source>\
             <destination><address>any</address><port>80:443</port></destination>\
             </rule></filter></opnsense>",
        );
        assert!(check_document(&doc).is_empty());
    }

    #[test]
    fn unresolved_port_alias_is_a_warning() {
        let doc = doc_from(
            "<opnsense><filter><rule>\
             <destination><port>IMAPS</port></destination>\
             </rule></filter></opnsense>",
        );
        let findings = check_document(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "unresolved_port_alias");
    }

    #[test]
    fn summary_counts_by_severity() {
        let doc = doc_from(
            "<opnsense><filter><rule>\
             <source><address>ghost</address></source>\
             <destination><port>IMAPS</port></destination>\
             </rule></filter></opnsense>",
        );
        let findings = check_document(&doc);
        assert_eq!(summarize_findings(&findings), "1 error(s), 1 warning(s)");
    }
}
