//! Build driver: walk a parsed element tree into a typed [`Document`].
//!
//! Elements are matched against the schema top-down. Recognized scalar
//! fields are populated with the element's trimmed text, recognized record
//! fields recurse, and unrecognized element names are skipped so configs
//! with unknown sections still load. Conversion failures abort the build
//! with the element path at which they occurred.

use thiserror::Error;

use xml_tree_core::Element;

use crate::document::{Document, NodeId};
use crate::schema::{ChildKind, RecordKind};
use crate::value::FormatError;

/// Errors raised while building a document from parsed XML.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The top-level element is not a known configuration root.
    #[error("unrecognized root element <{0}>")]
    UnrecognizedRoot(String),
    /// A scalar payload failed conversion.
    #[error("invalid value at {path}: {source}")]
    Format {
        path: String,
        #[source]
        source: FormatError,
    },
}

/// Build a typed document from the `<opnsense>` root element.
pub fn build_document(root: &Element) -> Result<Document, BuildError> {
    let Some(decl) = RecordKind::Document.field(&root.name) else {
        return Err(BuildError::UnrecognizedRoot(root.name.clone()));
    };
    let mut doc = Document::new();
    let node = doc.instantiate(decl.kind, doc.root());
    doc.attach(doc.root(), &root.name, node, decl.repeated);
    let mut path = vec![root.name.clone()];
    fill(&mut doc, node, decl.kind, root, &mut path)?;
    Ok(doc)
}

fn fill(
    doc: &mut Document,
    id: NodeId,
    kind: ChildKind,
    element: &Element,
    path: &mut Vec<String>,
) -> Result<(), BuildError> {
    match kind {
        ChildKind::Scalar(_) => {
            let raw = element.text.as_deref().unwrap_or("").trim();
            doc.populate(id, raw).map_err(|source| BuildError::Format {
                path: path.join("."),
                source,
            })
        }
        ChildKind::Record(record) => {
            for child in &element.children {
                let Some(decl) = record.field(&child.name) else {
                    continue;
                };
                let node = doc.instantiate(decl.kind, id);
                doc.attach(id, &child.name, node, decl.repeated);
                path.push(child.name.clone());
                fill(doc, node, decl.kind, child, path)?;
                path.pop();
            }
            Ok(())
        }
    }
}
