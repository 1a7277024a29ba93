//! HTML synthesizer - converts a document to HTML.
//!
//! Walks the tree and emits HTML tags. Semantic attributes from the markdown
//! source (href, src, align) are emitted first, followed by every renderer
//! property a transform attached to the node, in insertion order. A renderer
//! property replaces the semantic attribute of the same name.
//!
//! The first row of a table is emitted inside `<thead>` with `<th>` cells,
//! the remaining rows inside `<tbody>` with `<td>` cells.
//!
//! The walk keeps its own work stack, so nesting depth is bounded by memory
//! rather than by the thread's call stack.
//!
//! # Example
//!
//! ```
//! use cell_titles::export::synthesize_html;
//! use cell_titles::model::{Document, Node, NodeId, Role};
//!
//! let mut doc = Document::new();
//! let para = doc.append_new(NodeId::ROOT, Node::new(Role::Paragraph));
//! let range = doc.append_text("Hello");
//! doc.append_new(para, Node::text(range));
//! doc.data_mut(para).renderer_properties.set("class", "lead");
//!
//! assert_eq!(synthesize_html(&doc), "<p class=\"lead\">Hello</p>\n");
//! ```

use std::io::Write;

use crate::error::Result;
use crate::model::{Document, NodeId, Role};
use crate::text;

/// Indentation stops growing past this depth.
const MAX_INDENT_LEVEL: usize = 32;

/// Synthesize HTML for the whole document.
pub fn synthesize_html(doc: &Document) -> String {
    let mut ctx = SynthesisContext {
        out: String::new(),
        doc,
        indent_level: 0,
        in_header_row: false,
        work: Vec::new(),
    };

    // Walk children of root (skip the root node itself)
    let items = ctx.block_children(NodeId::ROOT);
    ctx.schedule(items);
    ctx.run();

    ctx.out
}

/// Synthesize HTML and write it to `writer`.
pub fn write_html<W: Write>(doc: &Document, mut writer: W) -> Result<()> {
    writer.write_all(synthesize_html(doc).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Whether `name` can be written as an HTML attribute name as is.
///
/// Rejects the empty name, whitespace, control characters and the
/// characters that end or delimit an attribute (`" ' < > / =`).
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// Pending step of the synthesis walk.
enum Work {
    /// Emit a node and schedule its children.
    Node(NodeId),
    /// Append literal markup.
    Emit(String),
    /// Append indentation for the current level.
    Indent,
    Deeper,
    Shallower,
    /// Set whether cells render as `<th>`.
    HeaderRow(bool),
}

/// Context for the synthesis walk.
struct SynthesisContext<'a> {
    out: String,
    doc: &'a Document,
    indent_level: usize,
    /// Cells are emitted as `<th>` while set.
    in_header_row: bool,
    work: Vec<Work>,
}

impl SynthesisContext<'_> {
    /// Queue `items` so they run in order, before anything queued earlier.
    fn schedule(&mut self, items: Vec<Work>) {
        self.work.extend(items.into_iter().rev());
    }

    fn run(&mut self) {
        while let Some(item) = self.work.pop() {
            match item {
                Work::Node(id) => self.walk_node(id),
                Work::Emit(markup) => self.out.push_str(&markup),
                Work::Indent => self.indent(),
                Work::Deeper => self.indent_level += 1,
                Work::Shallower => self.indent_level -= 1,
                Work::HeaderRow(header) => self.in_header_row = header,
            }
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.indent_level.min(MAX_INDENT_LEVEL) {
            self.out.push_str("  ");
        }
    }

    fn has_block_children(&self, id: NodeId) -> bool {
        self.doc
            .children(id)
            .any(|child| self.doc.role(child).is_some_and(is_block_role))
    }

    /// Work items for the children of a block-layout element, one line per block.
    ///
    /// Runs of inline children between blocks share a single indented line.
    fn block_children(&self, id: NodeId) -> Vec<Work> {
        let doc = self.doc;
        let mut items = Vec::new();
        let mut in_inline_run = false;
        for child_id in doc.children(id) {
            let is_block = doc.role(child_id).is_some_and(is_block_role);
            if is_block && in_inline_run {
                items.push(Work::Emit("\n".to_string()));
                in_inline_run = false;
            } else if !is_block && !in_inline_run {
                items.push(Work::Indent);
                in_inline_run = true;
            }
            items.push(Work::Node(child_id));
        }
        if in_inline_run {
            items.push(Work::Emit("\n".to_string()));
        }
        items
    }

    fn inline_children(&self, id: NodeId) -> Vec<Work> {
        self.doc.children(id).map(Work::Node).collect()
    }

    fn walk_node(&mut self, id: NodeId) {
        let Some(role) = self.doc.role(id) else {
            return;
        };

        match role {
            Role::Text => self.out.push_str(&escape_html(self.doc.literal(id))),
            Role::Html => self.out.push_str(self.doc.literal(id)),
            Role::InlineCode => {
                let attrs = self.attributes(id);
                self.out.push_str(&format!(
                    "<code{attrs}>{}</code>",
                    escape_html(self.doc.literal(id))
                ));
            }
            Role::CodeBlock => {
                let mut code_attrs = String::new();
                if let Some(language) = self.doc.semantics.language(id) {
                    push_attr(&mut code_attrs, "class", &format!("language-{language}"));
                }
                let attrs = self.attributes(id);
                self.indent();
                self.out.push_str(&format!(
                    "<pre{attrs}><code{code_attrs}>{}</code></pre>\n",
                    escape_html(self.doc.literal(id))
                ));
            }
            Role::Image => {
                let attrs = self.attributes(id);
                self.out.push_str(&format!("<img{attrs}/>"));
            }
            Role::Break => self.out.push_str("<br/>\n"),
            Role::Rule => {
                self.indent();
                self.out.push_str("<hr/>\n");
            }
            Role::Root | Role::Container => {
                let items = self.block_children(id);
                self.schedule(items);
            }
            Role::Table => self.walk_table(id),
            Role::List => {
                let tag = if self.doc.semantics.is_ordered(id) { "ol" } else { "ul" };
                self.element(id, tag);
            }
            Role::TableCell => {
                let tag = if self.in_header_row { "th" } else { "td" };
                self.element(id, tag);
            }
            role => self.element(id, role_to_tag(role)),
        }
    }

    /// Emit a table with synthesized `<thead>`/`<tbody>` sections.
    fn walk_table(&mut self, id: NodeId) {
        let attrs = self.attributes(id);
        self.indent();
        self.out.push_str(&format!("<table{attrs}>\n"));

        let doc = self.doc;
        let mut rows = doc.children(id).peekable();
        let header_row = rows.next_if(|&row| doc.role(row) == Some(Role::TableRow));
        let body: Vec<NodeId> = rows.collect();

        let mut items = vec![Work::Deeper];
        if let Some(header_row) = header_row {
            self.section(&mut items, "thead", &[header_row], true);
        }
        if !body.is_empty() {
            self.section(&mut items, "tbody", &body, false);
        }
        items.extend([
            Work::Shallower,
            Work::Indent,
            Work::Emit("</table>\n".to_string()),
        ]);
        self.schedule(items);
    }

    fn section(&self, items: &mut Vec<Work>, tag: &str, rows: &[NodeId], header: bool) {
        items.extend([
            Work::Indent,
            Work::Emit(format!("<{tag}>\n")),
            Work::Deeper,
            Work::HeaderRow(header),
        ]);
        items.extend(rows.iter().copied().map(Work::Node));
        items.extend([
            Work::HeaderRow(self.in_header_row),
            Work::Shallower,
            Work::Indent,
            Work::Emit(format!("</{tag}>\n")),
        ]);
    }

    /// Emit a generic element and schedule its children.
    fn element(&mut self, id: NodeId, tag: &str) {
        let Some(role) = self.doc.role(id) else {
            return;
        };
        let attrs = self.attributes(id);

        if !is_block_role(role) {
            self.out.push_str(&format!("<{tag}{attrs}>"));
            let mut items = self.inline_children(id);
            items.push(Work::Emit(format!("</{tag}>")));
            self.schedule(items);
            return;
        }

        self.indent();
        self.out.push_str(&format!("<{tag}{attrs}>"));
        let items = if self.has_block_children(id) {
            self.out.push('\n');
            let mut items = vec![Work::Deeper];
            items.extend(self.block_children(id));
            items.extend([
                Work::Shallower,
                Work::Indent,
                Work::Emit(format!("</{tag}>\n")),
            ]);
            items
        } else {
            let mut items = self.inline_children(id);
            items.push(Work::Emit(format!("</{tag}>\n")));
            items
        };
        self.schedule(items);
    }

    /// Semantic attributes followed by renderer properties.
    ///
    /// A renderer property with the same name as a semantic attribute takes
    /// its place.
    fn attributes(&self, id: NodeId) -> String {
        let props = self
            .doc
            .data(id)
            .map(|data| &data.renderer_properties)
            .filter(|props| !props.is_empty());
        let semantics = &self.doc.semantics;

        let mut semantic: Vec<(&str, String)> = Vec::new();
        if let Some(href) = semantics.href(id) {
            semantic.push(("href", href.to_string()));
        }
        if let Some(src) = semantics.src(id) {
            semantic.push(("src", src.to_string()));
        }
        if self.doc.role(id) == Some(Role::Image) {
            semantic.push(("alt", text::to_string(self.doc, id)));
        }
        if let Some(title) = semantics.title(id) {
            semantic.push(("title", title.to_string()));
        }
        if let Some(start) = semantics.list_start(id) {
            semantic.push(("start", start.to_string()));
        }
        if let Some(align) = semantics.align(id) {
            semantic.push(("align", align.as_str().to_string()));
        }

        let mut attrs = String::new();
        for (name, value) in &semantic {
            if props.is_some_and(|props| props.contains_key(name)) {
                continue;
            }
            push_attr(&mut attrs, name, value);
        }
        for (name, value) in props.into_iter().flat_map(|props| props.iter()) {
            push_attr(&mut attrs, name, value);
        }
        attrs
    }
}

/// Append ` name="value"`, dropping names that would break the markup.
fn push_attr(attrs: &mut String, name: &str, value: &str) {
    if !is_valid_attribute_name(name) {
        tracing::warn!(attribute = name, "skipping invalid attribute name");
        return;
    }
    attrs.push(' ');
    attrs.push_str(name);
    attrs.push_str("=\"");
    attrs.push_str(&escape_html(value));
    attrs.push('"');
}

/// Whether a role is laid out as a block (own line) rather than inline.
fn is_block_role(role: Role) -> bool {
    matches!(
        role,
        Role::Root
            | Role::Paragraph
            | Role::Heading(_)
            | Role::BlockQuote
            | Role::List
            | Role::ListItem
            | Role::CodeBlock
            | Role::Rule
            | Role::Table
            | Role::TableRow
            | Role::TableCell
            | Role::FootnoteDefinition
            | Role::Container
    )
}

/// Map a container role to its HTML tag name.
fn role_to_tag(role: Role) -> &'static str {
    match role {
        Role::Paragraph => "p",
        Role::Heading(1) => "h1",
        Role::Heading(2) => "h2",
        Role::Heading(3) => "h3",
        Role::Heading(4) => "h4",
        Role::Heading(5) => "h5",
        Role::Heading(_) => "h6",
        Role::BlockQuote => "blockquote",
        Role::ListItem => "li",
        Role::TableRow => "tr",
        Role::TableCell => "td",
        Role::Emphasis => "em",
        Role::Strong => "strong",
        Role::Strikethrough => "del",
        Role::Link => "a",
        Role::FootnoteDefinition => "aside",
        _ => "span",
    }
}

/// Escape special HTML characters in text and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
