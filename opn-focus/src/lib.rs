//! Generate meaningful reports from an OPNsense configuration backup.
//!
//! A `config.xml` backup is a deeply nested dump of every setting a firewall
//! carries. This library ingests one and produces a fully resolved, typed
//! in-memory document: scalar fields converted to their semantic types and
//! name references rewritten into structured cross-reference objects that
//! report renderers can walk.
//!
//! # Architecture
//!
//! ## Document model
//!
//! - [`schema`] — Record kinds and their declared fields, including the
//!   pattern-based numbered `opt` interface slots
//! - [`value`] — Scalar leaf kinds and populate-time conversions
//! - [`document`] — The arena-backed tree, parent chain, and `data` view
//!
//! Cross-reference resolution (aliases, interfaces, port aliases) runs
//! lazily on every `data` read and degrades to the raw string when a
//! reference matches nothing.
//!
//! ## Ingestion
//!
//! - [`build`] — Walk a parsed element tree into a typed [`Document`]
//!
//! ## Reporting
//!
//! - [`render`] — Markdown and BBCode report generation
//! - [`check`] — Unresolved-reference diagnostics
//! - [`inspect`] — Raw element-tree visualization
//!
//! # Workflow
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let element = xml_tree_core::parse_file(Path::new("config.xml"))?;
//! let doc = opn_focus::build_document(&element)?;
//! let report = opn_focus::render::render_markdown(&doc, None);
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod check;
pub mod document;
pub mod inspect;
pub mod render;
mod resolve;
pub mod schema;
pub mod value;

pub use build::{build_document, BuildError};
pub use document::{Document, NodeId};
pub use schema::{ChildKind, FieldDecl, RecordKind};
pub use value::{FormatError, ScalarKind, ScalarValue};
