//! Plain-text derivation from document nodes.
//!
//! These are the stock header-text strategies for
//! [`TableCellTitles`](crate::transform::TableCellTitles): [`to_string`]
//! (the default) and [`slug`].

use crate::model::{Document, NodeId};

/// Flatten a node and all of its descendants to plain text.
///
/// Literal nodes (text, inline code, raw HTML) contribute their content;
/// every other node contributes the concatenated text of its children, so
/// markup such as emphasis or links is dropped while its label is kept.
/// Whitespace is kept verbatim.
///
/// ```
/// use cell_titles::import::parse_markdown;
/// use cell_titles::model::Role;
/// use cell_titles::text::to_string;
///
/// let doc = parse_markdown("**Bold** and [a link](https://example.com)");
/// let para = doc.iter_dfs().find(|&id| doc.role(id) == Some(Role::Paragraph)).unwrap();
/// assert_eq!(to_string(&doc, para), "Bold and a link");
/// ```
pub fn to_string(doc: &Document, id: NodeId) -> String {
    let mut result = String::new();
    let mut stack = vec![id];
    while let Some(id) = stack.pop() {
        let Some(node) = doc.node(id) else {
            continue;
        };
        if node.role.is_literal() {
            result.push_str(doc.text(node.text));
            continue;
        }
        let start = stack.len();
        stack.extend(doc.children(id));
        stack[start..].reverse();
    }
    result
}

/// Generate a GitHub-style slug from text.
///
/// Converts text to lowercase, replaces spaces and special characters with hyphens,
/// and removes consecutive/leading/trailing hyphens.
///
/// ```
/// use cell_titles::text::slugify;
///
/// assert_eq!(slugify("Header 1"), "header-1");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
/// ```
pub fn slugify(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c.to_lowercase().next().unwrap_or(c))
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Slug of a node's plain text. Usable as a header transform.
pub fn slug(doc: &Document, id: NodeId) -> String {
    slugify(&to_string(doc, id))
}
