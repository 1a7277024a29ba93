//! Markdown document tree.
//!
//! This module contains:
//! - The arena-backed [`Document`] with its text buffer
//! - Node types and roles
//! - Semantic attributes taken from the markdown source (href, src, align)
//! - Lazily created per-node metadata written by transforms
//!
//! # Example
//!
//! ```
//! use cell_titles::model::{Document, Node, NodeId, Role};
//!
//! let mut doc = Document::new();
//! let table = doc.append_new(NodeId::ROOT, Node::new(Role::Table));
//! assert_eq!(doc.role(table), Some(Role::Table));
//! assert!(doc.data(table).is_none());
//! ```

mod data;
mod document;
mod node;
mod semantic;

pub use data::{NodeData, RendererProperties};
pub use document::{ChildIter, DfsIter, Document};
pub use node::{Node, NodeId, Role, TextRange};
pub use semantic::{Alignment, SemanticMap};
