//! Sparse semantic attributes for document nodes.
//!
//! Most nodes don't have an href, a code language or a cell alignment.
//! Using HashMaps is more memory-efficient than `Option<String>` on every Node.
//!
//! String values are stored in a single contiguous buffer, with TextRange
//! references into that buffer. This avoids per-attribute String allocations.

use std::collections::HashMap;

use super::node::{NodeId, TextRange};

/// Horizontal alignment of a table column (GFM `:--`, `:-:`, `--:`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Value of the HTML `align` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Sparse map for semantic attributes.
///
/// These are attributes that come from the markdown source itself
/// (link targets, image sources, column alignment). Attributes added by
/// transforms live in [`NodeData`](super::NodeData) instead.
#[derive(Debug, Default, Clone)]
pub struct SemanticMap {
    /// Contiguous buffer for all string attribute values.
    buffer: String,
    /// href attribute (for links).
    href: HashMap<NodeId, TextRange>,
    /// src attribute (for images).
    src: HashMap<NodeId, TextRange>,
    /// title attribute (for links and images).
    title: HashMap<NodeId, TextRange>,
    /// Info string language (for code blocks).
    language: HashMap<NodeId, TextRange>,
    /// start number (for ordered lists).
    list_start: HashMap<NodeId, u64>,
    /// Whether a list is ordered.
    ordered: HashMap<NodeId, bool>,
    /// Column alignment (for table cells).
    align: HashMap<NodeId, Alignment>,
}

impl SemanticMap {
    /// Create a new empty semantic map.
    pub fn new() -> Self {
        Self::default()
    }

    fn append(&mut self, s: &str) -> TextRange {
        let start = self.buffer.len() as u32;
        self.buffer.push_str(s);
        TextRange::new(start, s.len() as u32)
    }

    fn get_str(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = range.end() as usize;
        &self.buffer[start..end]
    }

    // --- href ---

    /// Set the href for a node.
    pub fn set_href(&mut self, node: NodeId, href: &str) {
        if !href.is_empty() {
            let range = self.append(href);
            self.href.insert(node, range);
        }
    }

    /// Get the href for a node.
    pub fn href(&self, node: NodeId) -> Option<&str> {
        self.href.get(&node).map(|r| self.get_str(*r))
    }

    // --- src ---

    /// Set the src for a node.
    pub fn set_src(&mut self, node: NodeId, src: &str) {
        if !src.is_empty() {
            let range = self.append(src);
            self.src.insert(node, range);
        }
    }

    /// Get the src for a node.
    pub fn src(&self, node: NodeId) -> Option<&str> {
        self.src.get(&node).map(|r| self.get_str(*r))
    }

    // --- title ---

    /// Set the title for a node.
    pub fn set_title(&mut self, node: NodeId, title: &str) {
        if !title.is_empty() {
            let range = self.append(title);
            self.title.insert(node, range);
        }
    }

    /// Get the title for a node.
    pub fn title(&self, node: NodeId) -> Option<&str> {
        self.title.get(&node).map(|r| self.get_str(*r))
    }

    // --- language ---

    /// Set the programming language for a code block.
    pub fn set_language(&mut self, node: NodeId, language: &str) {
        if !language.is_empty() {
            let range = self.append(language);
            self.language.insert(node, range);
        }
    }

    /// Get the programming language for a code block.
    pub fn language(&self, node: NodeId) -> Option<&str> {
        self.language.get(&node).map(|r| self.get_str(*r))
    }

    // --- lists ---

    /// Mark a list as ordered, starting at `start`.
    pub fn set_ordered(&mut self, node: NodeId, start: u64) {
        self.ordered.insert(node, true);
        if start != 1 {
            self.list_start.insert(node, start);
        }
    }

    /// Check if a list is ordered.
    pub fn is_ordered(&self, node: NodeId) -> bool {
        self.ordered.get(&node).copied().unwrap_or(false)
    }

    /// Get the start number for an ordered list.
    /// Returns None if not set (defaults to 1).
    pub fn list_start(&self, node: NodeId) -> Option<u64> {
        self.list_start.get(&node).copied()
    }

    // --- align ---

    /// Set the column alignment for a table cell.
    pub fn set_align(&mut self, node: NodeId, align: Alignment) {
        self.align.insert(node, align);
    }

    /// Get the column alignment for a table cell.
    pub fn align(&self, node: NodeId) -> Option<Alignment> {
        self.align.get(&node).copied()
    }
}
