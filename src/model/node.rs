//! Document node types and roles.

/// Unique identifier for a node within a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Kind of a node in the markdown tree.
///
/// Roles follow the markdown AST: block containers, inline containers and
/// leaf nodes carrying a [`TextRange`] into the document's text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Leaf text content.
    #[default]
    Text,
    /// Document root.
    Root,
    /// Paragraph (`<p>`).
    Paragraph,
    /// Headings with level 1-6.
    Heading(u8),
    /// Emphasis (`*text*`).
    Emphasis,
    /// Strong emphasis (`**text**`).
    Strong,
    /// GFM strikethrough (`~~text~~`).
    Strikethrough,
    /// Inline code span. Leaf, text holds the code.
    InlineCode,
    /// Hyperlink. href/title in `SemanticMap`.
    Link,
    /// Image. src/title in `SemanticMap`, alt text is the children's text.
    Image,
    /// Hard line break.
    Break,
    /// Block quote.
    BlockQuote,
    /// List; ordered lists carry a start number in `SemanticMap`.
    List,
    /// List item.
    ListItem,
    /// Fenced or indented code. Leaf, text holds the code.
    CodeBlock,
    /// Raw HTML, block or inline. Leaf.
    Html,
    /// Thematic break (`<hr>`).
    Rule,
    /// Table.
    Table,
    /// Table row. The first row of a table is its header row.
    TableRow,
    /// Table cell.
    TableCell,
    /// Footnote definition.
    FootnoteDefinition,
    /// Anything the importer has no dedicated role for.
    Container,
}

impl Role {
    /// Whether nodes of this role store their content in the text buffer.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Role::Text | Role::InlineCode | Role::CodeBlock | Role::Html
        )
    }
}

/// Range into the document's text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    /// Byte offset into `Document::text`.
    pub start: u32,
    /// Length in bytes.
    pub len: u32,
}

impl TextRange {
    /// Create a new text range.
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Get the end offset.
    pub fn end(&self) -> u32 {
        self.start + self.len
    }
}

/// A node in the document tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node kind.
    pub role: Role,
    /// Parent node (None for root).
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Next sibling node.
    pub next_sibling: Option<NodeId>,
    /// Literal content range (only for literal roles).
    pub text: TextRange,
}

impl Node {
    /// Create a new node with default values.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            parent: None,
            first_child: None,
            next_sibling: None,
            text: TextRange::default(),
        }
    }

    /// Create a literal node (text, code, html) with the given range.
    pub fn literal(role: Role, range: TextRange) -> Self {
        Self {
            text: range,
            ..Self::new(role)
        }
    }

    /// Create a text node with the given range.
    pub fn text(range: TextRange) -> Self {
        Self::literal(Role::Text, range)
    }
}
