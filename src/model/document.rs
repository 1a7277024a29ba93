use std::collections::HashMap;

use super::data::NodeData;
use super::node::{Node, NodeId, Role, TextRange};
use super::semantic::SemanticMap;

/// A parsed markdown document.
///
/// The tree uses a parent-pointer / first-child / next-sibling representation
/// for efficient traversal and minimal memory overhead.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes in the tree (index 0 is always the root).
    nodes: Vec<Node>,
    /// Sparse semantic attributes (href, src, align).
    pub semantics: SemanticMap,
    /// Sparse per-node metadata, created on first write.
    data: HashMap<NodeId, NodeData>,
    /// Global text buffer (literal nodes reference ranges into this).
    text: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document with a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Role::Root)],
            semantics: SemanticMap::new(),
            data: HashMap::new(),
            text: String::new(),
        }
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Role of a node, if it exists.
    pub fn role(&self, id: NodeId) -> Option<Role> {
        self.node(id).map(|n| n.role)
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a new node and return its ID.
    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate a node and append it to `parent` in one step.
    pub fn append_new(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.alloc_node(node);
        self.append_child(parent, id);
        id
    }

    /// Append text to the global buffer and return the range.
    pub fn append_text(&mut self, text: &str) -> TextRange {
        let start = self.text.len() as u32;
        self.text.push_str(text);
        TextRange::new(start, text.len() as u32)
    }

    /// Get text from a range.
    pub fn text(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = range.end() as usize;
        &self.text[start..end]
    }

    /// Literal content of a node (empty for non-literal roles).
    pub fn literal(&self, id: NodeId) -> &str {
        match self.node(id) {
            Some(node) if node.role.is_literal() => self.text(node.text),
            _ => "",
        }
    }

    /// Append a child node to a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(child_node) = self.nodes.get_mut(child.0 as usize) {
            child_node.parent = Some(parent);
        }

        let Some(parent_node) = self.nodes.get(parent.0 as usize) else {
            return;
        };
        match parent_node.first_child {
            Some(first_child) => {
                let mut current = first_child;
                while let Some(next) = self.nodes.get(current.0 as usize).and_then(|n| n.next_sibling)
                {
                    current = next;
                }
                if let Some(last_node) = self.nodes.get_mut(current.0 as usize) {
                    last_node.next_sibling = Some(child);
                }
            }
            None => {
                if let Some(parent_node) = self.nodes.get_mut(parent.0 as usize) {
                    parent_node.first_child = Some(child);
                }
            }
        }
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        let first_child = self.node(parent).and_then(|n| n.first_child);
        ChildIter {
            document: self,
            current: first_child,
        }
    }

    /// Iterate over all nodes in depth-first pre-order.
    pub fn iter_dfs(&self) -> DfsIter<'_> {
        DfsIter {
            document: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Metadata of a node, if any was ever written.
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.data.get(&id)
    }

    /// Metadata of a node, created empty on first access.
    pub fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.data.entry(id).or_default()
    }

    /// Renderer property `key` of a node.
    pub fn renderer_property(&self, id: NodeId, key: &str) -> Option<&str> {
        self.data(id)
            .and_then(|data| data.renderer_properties.get(key))
    }

    /// Number of nodes carrying metadata.
    pub fn data_count(&self) -> usize {
        self.data.len()
    }
}

/// Iterator over children of a node.
pub struct ChildIter<'a> {
    document: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = self.document.node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Depth-first iterator over all nodes.
pub struct DfsIter<'a> {
    document: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for DfsIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Push children in reverse order so they're visited left-to-right
        let mut children: Vec<NodeId> = self.document.children(current).collect();
        children.reverse();
        self.stack.extend(children);

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert_eq!(doc.node_count(), 1);

        let root = doc.node(NodeId::ROOT).unwrap();
        assert_eq!(root.role, Role::Root);
        assert!(root.parent.is_none());
    }

    #[test]
    fn test_text_buffer() {
        let mut doc = Document::new();

        let range1 = doc.append_text("Hello, ");
        let range2 = doc.append_text("World!");

        assert_eq!(doc.text(range1), "Hello, ");
        assert_eq!(doc.text(range2), "World!");
    }

    #[test]
    fn test_node_tree() {
        let mut doc = Document::new();

        let para = doc.append_new(NodeId::ROOT, Node::new(Role::Paragraph));
        let range = doc.append_text("Test content");
        let text = doc.append_new(para, Node::text(range));

        let children: Vec<_> = doc.children(NodeId::ROOT).collect();
        assert_eq!(children, vec![para]);
        assert_eq!(doc.children(para).collect::<Vec<_>>(), vec![text]);
        assert_eq!(doc.node(text).unwrap().parent, Some(para));
        assert_eq!(doc.literal(text), "Test content");
        assert_eq!(doc.literal(para), "");
    }

    #[test]
    fn test_dfs_iteration() {
        let mut doc = Document::new();

        let para1 = doc.append_new(NodeId::ROOT, Node::new(Role::Paragraph));
        let para2 = doc.append_new(NodeId::ROOT, Node::new(Role::Paragraph));
        let range = doc.append_text("Text");
        let text = doc.append_new(para1, Node::text(range));

        let nodes: Vec<_> = doc.iter_dfs().collect();
        assert_eq!(nodes, vec![NodeId::ROOT, para1, text, para2]);
    }

    #[test]
    fn test_data_is_created_lazily() {
        let mut doc = Document::new();
        let para = doc.append_new(NodeId::ROOT, Node::new(Role::Paragraph));

        assert!(doc.data(para).is_none());
        assert_eq!(doc.data_count(), 0);

        doc.data_mut(para)
            .renderer_properties
            .set("class", "lead");
        doc.data_mut(para)
            .renderer_properties
            .set("id", "intro");

        assert_eq!(doc.data_count(), 1);
        assert_eq!(doc.renderer_property(para, "class"), Some("lead"));
        assert_eq!(doc.renderer_property(para, "id"), Some("intro"));
        assert_eq!(doc.renderer_property(NodeId::ROOT, "class"), None);
    }
}
