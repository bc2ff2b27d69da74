//! The typed document tree.
//!
//! Nodes live in an arena owned by [`Document`]; a [`NodeId`] is an index
//! into it. Each node keeps a back-reference to its parent, established once
//! at construction and never reassigned. The back-reference exists only to
//! let resolvers walk up to the document root; ownership stays strictly
//! top-down through the record fields.
//!
//! Construction is two-phase: the build driver instantiates and populates
//! nodes, then callers read [`Document::data`] as often as they like. `data`
//! is a pure function of tree state and recomputes reference resolution on
//! every read.

use serde_json::{Map, Value};

use crate::resolve;
use crate::schema::{ChildKind, RecordKind};
use crate::value::{convert, FormatError, ScalarKind, ScalarValue};

/// Index of a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Field {
    name: String,
    children: Vec<NodeId>,
    repeated: bool,
}

#[derive(Debug)]
enum NodeBody {
    Record {
        kind: RecordKind,
        /// Fields in insertion order.
        fields: Vec<Field>,
    },
    Scalar {
        kind: ScalarKind,
        value: Option<ScalarValue>,
    },
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    body: NodeBody,
}

/// An arena-backed configuration document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

const EMPTY: &[NodeId] = &[];

impl Document {
    /// Create a document holding only the unpopulated root record.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                body: NodeBody::Record {
                    kind: RecordKind::Document,
                    fields: Vec::new(),
                },
            }],
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a new unpopulated node of `kind` under `parent`.
    pub fn instantiate(&mut self, kind: ChildKind, parent: NodeId) -> NodeId {
        let body = match kind {
            ChildKind::Record(kind) => NodeBody::Record {
                kind,
                fields: Vec::new(),
            },
            ChildKind::Scalar(kind) => NodeBody::Scalar { kind, value: None },
        };
        self.nodes.push(Node {
            parent: Some(parent),
            body,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Assign `child` under `name` on a record node.
    ///
    /// Repeated fields append in input order; single fields overwrite any
    /// earlier assignment. Assigning on a scalar node is ignored.
    pub fn attach(&mut self, parent: NodeId, name: &str, child: NodeId, repeated: bool) {
        let NodeBody::Record { fields, .. } = &mut self.nodes[parent.0].body else {
            return;
        };
        if let Some(field) = fields.iter_mut().find(|f| f.name == name) {
            if field.repeated {
                field.children.push(child);
            } else {
                field.children = vec![child];
            }
            return;
        }
        fields.push(Field {
            name: name.to_string(),
            children: vec![child],
            repeated,
        });
    }

    /// Convert and store a scalar payload. Populating a record is a no-op;
    /// records have no scalar value of their own.
    pub fn populate(&mut self, id: NodeId, raw: &str) -> Result<(), FormatError> {
        match &mut self.nodes[id.0].body {
            NodeBody::Scalar { kind, value } => {
                *value = convert(*kind, raw)?;
                Ok(())
            }
            NodeBody::Record { .. } => Ok(()),
        }
    }

    /// The node's parent, `None` only for the document root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Ordered ancestor chain, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&n| self.parent(n))
    }

    /// The document root reached from any node; the root reaches itself.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// The record kind of a node, if it is a record.
    pub fn record_kind(&self, id: NodeId) -> Option<RecordKind> {
        match &self.nodes[id.0].body {
            NodeBody::Record { kind, .. } => Some(*kind),
            NodeBody::Scalar { .. } => None,
        }
    }

    /// The scalar kind of a node, if it is a leaf.
    pub fn scalar_kind(&self, id: NodeId) -> Option<ScalarKind> {
        match &self.nodes[id.0].body {
            NodeBody::Scalar { kind, .. } => Some(*kind),
            NodeBody::Record { .. } => None,
        }
    }

    /// The raw text stored on a text-carrying scalar leaf.
    pub fn scalar_text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].body {
            NodeBody::Scalar {
                value: Some(ScalarValue::Text(text)),
                ..
            } => Some(text),
            _ => None,
        }
    }

    /// Children assigned under a field name; empty when the field is absent.
    pub fn field_children(&self, id: NodeId, name: &str) -> &[NodeId] {
        match &self.nodes[id.0].body {
            NodeBody::Record { fields, .. } => fields
                .iter()
                .find(|f| f.name == name)
                .map(|f| f.children.as_slice())
                .unwrap_or(EMPTY),
            NodeBody::Scalar { .. } => EMPTY,
        }
    }

    /// The single child assigned under a field name, if present.
    pub fn single(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.field_children(id, name).first().copied()
    }

    /// Present fields of a record in insertion order.
    pub fn fields(&self, id: NodeId) -> impl Iterator<Item = (&str, &[NodeId], bool)> {
        let fields: &[Field] = match &self.nodes[id.0].body {
            NodeBody::Record { fields, .. } => fields,
            NodeBody::Scalar { .. } => &[],
        };
        fields
            .iter()
            .map(|f| (f.name.as_str(), f.children.as_slice(), f.repeated))
    }

    /// The plain-structure view of a node.
    ///
    /// Records produce a mapping of present field names to child data (with
    /// repeated fields as ordered sequences), plain leaves their converted
    /// value, and resolver leaves their cross-reference lookup result.
    pub fn data(&self, id: NodeId) -> Value {
        match &self.nodes[id.0].body {
            NodeBody::Record { fields, .. } => {
                let mut map = Map::new();
                for field in fields {
                    if field.repeated {
                        let items = field.children.iter().map(|&c| self.data(c)).collect();
                        map.insert(field.name.clone(), Value::Array(items));
                    } else if let Some(&child) = field.children.first() {
                        map.insert(field.name.clone(), self.data(child));
                    }
                }
                Value::Object(map)
            }
            NodeBody::Scalar { kind, value } => self.scalar_data(id, *kind, value.as_ref()),
        }
    }

    fn scalar_data(&self, id: NodeId, kind: ScalarKind, value: Option<&ScalarValue>) -> Value {
        match kind {
            ScalarKind::Flag => Value::Bool(true),
            ScalarKind::Text | ScalarKind::Integer | ScalarKind::Timestamp => match value {
                Some(ScalarValue::Text(text)) => Value::String(text.clone()),
                Some(ScalarValue::Integer(n)) => Value::Number((*n).into()),
                Some(ScalarValue::Timestamp(ts)) => Value::String(ts.to_rfc3339()),
                None => Value::Null,
            },
            ScalarKind::AliasRef | ScalarKind::Port => match value {
                Some(ScalarValue::Text(raw)) => resolve::alias_value(self, id, raw),
                _ => Value::Null,
            },
            ScalarKind::RuleTarget => match value {
                Some(ScalarValue::Text(raw)) => resolve::rule_target_value(self, id, raw),
                _ => Value::Null,
            },
            ScalarKind::InterfaceList => match value {
                Some(ScalarValue::Text(raw)) => resolve::interface_list_value(self, id, raw),
                _ => Value::Null,
            },
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
