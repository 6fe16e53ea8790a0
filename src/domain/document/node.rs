//! Typed Markdown document tree
//!
//! `pulldown-cmark` reports a document as a flat stream of start/end events.
//! [`Node::parse_document`] folds that stream into an owned tree so the
//! serializer can recurse over it with plain pattern matching.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser as MdParser, Tag};

/// A node of the document tree.
///
/// Block nodes hold block children, inline nodes hold inline children, and
/// literal nodes (`Text`, `Code`, `InlineCode`, `Html`) carry a raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Paragraph { children: Vec<Node> },
    Heading { depth: u8, children: Vec<Node> },
    List { ordered: bool, children: Vec<Node> },
    ListItem { children: Vec<Node> },
    Code { lang: Option<String>, value: String },
    Blockquote { children: Vec<Node> },
    ThematicBreak,
    Image { url: String, alt: String },
    Html { value: String },
    Text { value: String },
    Emphasis { children: Vec<Node> },
    Strong { children: Vec<Node> },
    Delete { children: Vec<Node> },
    InlineCode { value: String },
    Link { url: String, children: Vec<Node> },
    Break,
    /// Node kinds without a dedicated rendering
    Other { kind: String, children: Vec<Node> },
}

impl Node {
    /// Parse Markdown into its top-level block nodes
    pub fn parse_document(markdown: &str) -> Vec<Node> {
        let options =
            Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES;
        let mut builder = TreeBuilder::new();
        for event in MdParser::new_ext(markdown, options) {
            builder.feed(event);
        }
        builder.finish()
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// The node's type discriminant, as used in fallback tags
    pub fn type_name(&self) -> &str {
        match self {
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::List { .. } => "list",
            Node::ListItem { .. } => "listItem",
            Node::Code { .. } => "code",
            Node::Blockquote { .. } => "blockquote",
            Node::ThematicBreak => "thematicBreak",
            Node::Image { .. } => "image",
            Node::Html { .. } => "html",
            Node::Text { .. } => "text",
            Node::Emphasis { .. } => "emphasis",
            Node::Strong { .. } => "strong",
            Node::Delete { .. } => "delete",
            Node::InlineCode { .. } => "inlineCode",
            Node::Link { .. } => "link",
            Node::Break => "break",
            Node::Other { kind, .. } => kind.as_str(),
        }
    }

    /// Child nodes; empty for literal and void nodes
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Paragraph { children }
            | Node::Heading { children, .. }
            | Node::List { children, .. }
            | Node::ListItem { children }
            | Node::Blockquote { children }
            | Node::Emphasis { children }
            | Node::Strong { children }
            | Node::Delete { children }
            | Node::Link { children, .. }
            | Node::Other { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text content, markup removed
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { value } | Node::InlineCode { value } | Node::Code { value, .. } => {
                value.clone()
            }
            Node::Image { alt, .. } => alt.clone(),
            Node::Break => "\n".to_string(),
            _ => self.children().iter().map(Node::plain_text).collect(),
        }
    }
}

/// What an open frame will become once its end event arrives
#[derive(Debug)]
enum FrameKind {
    Root,
    Paragraph,
    Heading(u8),
    Blockquote,
    CodeBlock(Option<String>),
    HtmlBlock,
    List(bool),
    Item,
    Emphasis,
    Strong,
    Strikethrough,
    Link(String),
    Image(String),
    Other { kind: String, inline: bool },
}

impl FrameKind {
    /// Frames holding block children; stray inline runs get a paragraph
    fn is_block_container(&self) -> bool {
        matches!(
            self,
            FrameKind::Root
                | FrameKind::Blockquote
                | FrameKind::List(_)
                | FrameKind::Item
                | FrameKind::Other { inline: false, .. }
        )
    }

    fn is_literal(&self) -> bool {
        matches!(self, FrameKind::CodeBlock(_) | FrameKind::HtmlBlock)
    }

    fn from_tag(tag: Tag<'_>) -> Self {
        match tag {
            Tag::Paragraph => FrameKind::Paragraph,
            Tag::Heading { level, .. } => FrameKind::Heading(level as u8),
            Tag::BlockQuote { .. } => FrameKind::Blockquote,
            Tag::CodeBlock(CodeBlockKind::Fenced(info)) => FrameKind::CodeBlock(
                info.split_whitespace().next().map(|lang| lang.to_string()),
            ),
            Tag::CodeBlock(CodeBlockKind::Indented) => FrameKind::CodeBlock(None),
            Tag::HtmlBlock => FrameKind::HtmlBlock,
            Tag::List(start) => FrameKind::List(start.is_some()),
            Tag::Item => FrameKind::Item,
            Tag::Emphasis => FrameKind::Emphasis,
            Tag::Strong => FrameKind::Strong,
            Tag::Strikethrough => FrameKind::Strikethrough,
            Tag::Link { dest_url, .. } => FrameKind::Link(dest_url.into_string()),
            Tag::Image { dest_url, .. } => FrameKind::Image(dest_url.into_string()),
            Tag::Table(_) => Self::other("table"),
            Tag::TableHead => Self::other("tableHead"),
            Tag::TableRow => Self::other("tableRow"),
            Tag::TableCell => Self::other("tableCell"),
            Tag::FootnoteDefinition(_) => Self::other("footnoteDefinition"),
            _ => Self::other("unknown"),
        }
    }

    fn other(kind: &str) -> Self {
        FrameKind::Other {
            kind: kind.to_string(),
            inline: false,
        }
    }
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    children: Vec<Node>,
    /// Inline nodes waiting to be wrapped in a paragraph
    inline_run: Vec<Node>,
    /// Raw text of code and HTML blocks
    literal: String,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            inline_run: Vec::new(),
            literal: String::new(),
        }
    }

    fn push(&mut self, node: Node, inline: bool) {
        if !self.kind.is_block_container() {
            push_merged(&mut self.children, node);
        } else if inline {
            push_merged(&mut self.inline_run, node);
        } else {
            self.flush_inline_run();
            self.children.push(node);
        }
    }

    fn flush_inline_run(&mut self) {
        if !self.inline_run.is_empty() {
            let children = std::mem::take(&mut self.inline_run);
            self.children.push(Node::Paragraph { children });
        }
    }

    /// Close the frame, returning the node and whether it is inline
    fn close(mut self) -> (Node, bool) {
        self.flush_inline_run();
        let children = self.children;
        match self.kind {
            FrameKind::Root | FrameKind::Paragraph => (Node::Paragraph { children }, false),
            FrameKind::Heading(depth) => (Node::Heading { depth, children }, false),
            FrameKind::Blockquote => (Node::Blockquote { children }, false),
            FrameKind::CodeBlock(lang) => {
                let mut value = self.literal;
                if value.ends_with('\n') {
                    value.pop();
                }
                (Node::Code { lang, value }, false)
            }
            FrameKind::HtmlBlock => (
                Node::Html {
                    value: self.literal,
                },
                false,
            ),
            FrameKind::List(ordered) => (Node::List { ordered, children }, false),
            FrameKind::Item => (Node::ListItem { children }, false),
            FrameKind::Emphasis => (Node::Emphasis { children }, true),
            FrameKind::Strong => (Node::Strong { children }, true),
            FrameKind::Strikethrough => (Node::Delete { children }, true),
            FrameKind::Link(url) => (Node::Link { url, children }, true),
            FrameKind::Image(url) => {
                let alt = children.iter().map(Node::plain_text).collect();
                (Node::Image { url, alt }, true)
            }
            FrameKind::Other { kind, inline } => (Node::Other { kind, children }, inline),
        }
    }
}

/// Append a node, joining adjacent text nodes
fn push_merged(children: &mut Vec<Node>, node: Node) {
    if let (Some(Node::Text { value: last }), Node::Text { value }) = (children.last_mut(), &node) {
        last.push_str(value);
        return;
    }
    children.push(node);
}

/// Folds parser events into a tree using a stack of open frames
struct TreeBuilder {
    stack: Vec<Frame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Frame::new(FrameKind::Root)],
        }
    }

    fn top(&mut self) -> &mut Frame {
        // Root frame is never popped by `feed`
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn feed(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.stack.push(Frame::new(FrameKind::from_tag(tag))),
            Event::End(_) => {
                if self.stack.len() > 1 {
                    if let Some(frame) = self.stack.pop() {
                        let (node, inline) = frame.close();
                        self.top().push(node, inline);
                    }
                }
            }
            Event::Text(text) => {
                if self.top().kind.is_literal() {
                    self.top().literal.push_str(&text);
                } else {
                    self.top().push(Node::text(text.into_string()), true);
                }
            }
            Event::Html(html) => {
                if self.top().kind.is_literal() {
                    self.top().literal.push_str(&html);
                } else {
                    let node = Node::Html {
                        value: html.into_string(),
                    };
                    self.top().push(node, false);
                }
            }
            Event::InlineHtml(html) => {
                let node = Node::Html {
                    value: html.into_string(),
                };
                self.top().push(node, true);
            }
            Event::Code(code) => {
                let node = Node::InlineCode {
                    value: code.into_string(),
                };
                self.top().push(node, true);
            }
            Event::SoftBreak => self.top().push(Node::text("\n"), true),
            Event::HardBreak => self.top().push(Node::Break, true),
            Event::Rule => self.top().push(Node::ThematicBreak, false),
            Event::FootnoteReference(label) => {
                let node = Node::Other {
                    kind: "footnoteReference".to_string(),
                    children: vec![Node::text(label.into_string())],
                };
                self.top().push(node, true);
            }
            other => tracing::trace!(?other, "ignoring markdown event"),
        }
    }

    fn finish(mut self) -> Vec<Node> {
        // Unbalanced frames cannot come out of the parser, but fold them anyway
        while self.stack.len() > 1 {
            if let Some(frame) = self.stack.pop() {
                let (node, inline) = frame.close();
                self.top().push(node, inline);
            }
        }
        let mut root = self.stack.remove(0);
        root.flush_inline_run();
        root.children
    }
}
