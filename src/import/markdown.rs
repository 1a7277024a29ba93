//! pulldown-cmark event stream → [`Document`].

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::model::{Alignment, Document, Node, NodeId, Role};

/// Parse GitHub-flavored markdown (tables, strikethrough) into a document.
///
/// The GFM header row becomes the table's first `TableRow`; there is no
/// separate head/body node. Parsing never fails: markdown has no invalid
/// input.
pub fn parse_markdown(input: &str) -> Document {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(input, options) {
        builder.push_event(event);
    }
    builder.finish()
}

/// Stack-based tree construction: every `Start` opens a node, every `End`
/// closes the innermost one.
struct TreeBuilder {
    doc: Document,
    stack: Vec<NodeId>,
    /// Column alignments of the enclosing tables.
    alignments: Vec<Vec<pulldown_cmark::Alignment>>,
    /// Text of the code block being read.
    code: Option<String>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            doc: Document::new(),
            stack: vec![NodeId::ROOT],
            alignments: Vec::new(),
            code: None,
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn push_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.push_str(&text);
                } else {
                    self.literal(Role::Text, &text);
                }
            }
            Event::Code(code) => self.literal(Role::InlineCode, &code),
            Event::Html(html) | Event::InlineHtml(html) => self.literal(Role::Html, &html),
            Event::SoftBreak => self.literal(Role::Text, "\n"),
            Event::HardBreak => {
                self.doc.append_new(self.current(), Node::new(Role::Break));
            }
            Event::Rule => {
                self.doc.append_new(self.current(), Node::new(Role::Rule));
            }
            _ => {}
        }
    }

    fn literal(&mut self, role: Role, text: &str) {
        let range = self.doc.append_text(text);
        self.doc.append_new(self.current(), Node::literal(role, range));
    }

    fn start(&mut self, tag: Tag<'_>) {
        let parent = self.current();
        let id = match tag {
            Tag::Paragraph => self.open(parent, Role::Paragraph),
            Tag::Heading { level, .. } => self.open(parent, Role::Heading(heading_level(level))),
            Tag::BlockQuote => self.open(parent, Role::BlockQuote),
            Tag::CodeBlock(kind) => {
                let id = self.open(parent, Role::CodeBlock);
                if let CodeBlockKind::Fenced(info) = kind {
                    let language = info.split_whitespace().next().unwrap_or("");
                    self.doc.semantics.set_language(id, language);
                }
                self.code = Some(String::new());
                id
            }
            Tag::List(start) => {
                let id = self.open(parent, Role::List);
                if let Some(start) = start {
                    self.doc.semantics.set_ordered(id, start);
                }
                id
            }
            Tag::Item => self.open(parent, Role::ListItem),
            Tag::FootnoteDefinition(_) => self.open(parent, Role::FootnoteDefinition),
            Tag::Table(alignments) => {
                self.alignments.push(alignments);
                self.open(parent, Role::Table)
            }
            Tag::TableHead | Tag::TableRow => self.open(parent, Role::TableRow),
            Tag::TableCell => {
                let column = self.doc.children(parent).count();
                let id = self.open(parent, Role::TableCell);
                if let Some(align) = self
                    .alignments
                    .last()
                    .and_then(|columns| columns.get(column))
                    .and_then(|&align| convert_alignment(align))
                {
                    self.doc.semantics.set_align(id, align);
                }
                id
            }
            Tag::Emphasis => self.open(parent, Role::Emphasis),
            Tag::Strong => self.open(parent, Role::Strong),
            Tag::Strikethrough => self.open(parent, Role::Strikethrough),
            Tag::Link {
                dest_url, title, ..
            } => {
                let id = self.open(parent, Role::Link);
                self.doc.semantics.set_href(id, &dest_url);
                self.doc.semantics.set_title(id, &title);
                id
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                let id = self.open(parent, Role::Image);
                self.doc.semantics.set_src(id, &dest_url);
                self.doc.semantics.set_title(id, &title);
                id
            }
            _ => self.open(parent, Role::Container),
        };
        self.stack.push(id);
    }

    fn open(&mut self, parent: NodeId, role: Role) -> NodeId {
        self.doc.append_new(parent, Node::new(role))
    }

    fn end(&mut self, tag: TagEnd) {
        let Some(id) = self.stack.pop() else {
            return;
        };
        match tag {
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    let range = self.doc.append_text(&code);
                    if let Some(node) = self.doc.node_mut(id) {
                        node.text = range;
                    }
                }
            }
            TagEnd::Table => {
                self.alignments.pop();
            }
            _ => {}
        }
        // The root is never closed
        if self.stack.is_empty() {
            self.stack.push(NodeId::ROOT);
        }
    }

    fn finish(self) -> Document {
        self.doc
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn convert_alignment(align: pulldown_cmark::Alignment) -> Option<Alignment> {
    match align {
        pulldown_cmark::Alignment::None => None,
        pulldown_cmark::Alignment::Left => Some(Alignment::Left),
        pulldown_cmark::Alignment::Center => Some(Alignment::Center),
        pulldown_cmark::Alignment::Right => Some(Alignment::Right),
    }
}
