//! Document tree to XML serialization
//!
//! Two mutually recursive functions walk the tree: [`serialize_inline`] for
//! character-level content and [`serialize_block`] for block structure.
//! [`serialize_body`] runs over the top-level nodes and groups everything
//! under a level-1 heading into a `<section>`.

use super::Node;
use crate::domain::xml::escape_markup as esc;

/// Serialize a run of inline nodes.
///
/// Unknown inline kinds keep their content inside `<inline type="...">`.
/// Inline HTML has no children, so its markup becomes an empty wrapper.
pub fn serialize_inline(nodes: &[Node]) -> String {
    nodes.iter().map(inline_node).collect()
}

fn inline_node(node: &Node) -> String {
    match node {
        Node::Text { value } => esc(value),
        Node::Emphasis { children } => emph("i", children),
        Node::Strong { children } => emph("b", children),
        Node::Delete { children } => emph("m", children),
        Node::InlineCode { value } => format!("<code>{}</code>", esc(value)),
        Node::Link { url, children } => format!(
            "<link to=\"{}\">{}</link>",
            esc(url),
            serialize_inline(children)
        ),
        Node::Image { url, alt } => image(url, alt),
        Node::Break => "\n".to_string(),
        other => format!(
            "<inline type=\"{}\">{}</inline>",
            esc(other.type_name()),
            serialize_inline(other.children())
        ),
    }
}

fn emph(style: &str, children: &[Node]) -> String {
    format!("<emph style=\"{}\">{}</emph>", style, serialize_inline(children))
}

fn image(url: &str, alt: &str) -> String {
    format!("<image src=\"{}\" alt=\"{}\"/>", esc(url), esc(alt))
}

fn join_blocks(nodes: &[Node]) -> String {
    nodes.iter().map(serialize_block).collect::<Vec<_>>().join("\n")
}

/// Serialize a single block node.
///
/// Headings render as nothing here; they only matter to section grouping.
/// Raw HTML is dropped.
pub fn serialize_block(node: &Node) -> String {
    match node {
        Node::Paragraph { children } => format!("<par>{}</par>", serialize_inline(children)),
        Node::Code { lang, value } => {
            let lang = lang
                .as_deref()
                .filter(|l| !l.is_empty())
                .map(|l| format!(" lang=\"{}\"", esc(l)))
                .unwrap_or_default();
            format!(
                "<code-block xml:space=\"preserve\"{}>{}</code-block>",
                lang,
                esc(value)
            )
        }
        Node::List { ordered, children } => {
            let kind = if *ordered { "enum" } else { "bullet" };
            format!("<list type=\"{}\">\n{}\n</list>", kind, join_blocks(children))
        }
        Node::ListItem { children } => {
            let content: String = children
                .iter()
                .map(|child| match child {
                    Node::Paragraph { children } => serialize_inline(children),
                    other => serialize_block(other),
                })
                .collect();
            format!("<item>{}</item>", content)
        }
        Node::Blockquote { children } => {
            format!("<block type=\"blockquote\">\n{}\n</block>", join_blocks(children))
        }
        Node::ThematicBreak => "<block type=\"hr\"/>".to_string(),
        Node::Image { url, alt } => image(url, alt),
        Node::Html { .. } | Node::Heading { .. } => String::new(),
        other => format!(
            "<block type=\"{}\">{}</block>",
            esc(other.type_name()),
            join_blocks(other.children())
        ),
    }
}

fn is_heading_within(node: &Node, max_depth: u8) -> bool {
    matches!(node, Node::Heading { depth, .. } if *depth <= max_depth)
}

/// Serialize the top-level nodes of a document, grouping sections.
///
/// A depth-1 heading opens a `<section>` whose title is the heading's inline
/// content. Following siblings are the section body until the next heading of
/// depth 1 or less. Nodes outside any section are serialized on their own.
///
/// # Examples
///
/// ```
/// use stdmark::domain::document::{serialize_body, Node};
///
/// let nodes = Node::parse_document("intro\n\n# A\n\ntext");
/// assert_eq!(
///     serialize_body(&nodes),
///     "<par>intro</par>\n<section>\n<title>A</title>\n<par>text</par>\n</section>"
/// );
/// ```
pub fn serialize_body(nodes: &[Node]) -> String {
    let mut output = Vec::new();
    let mut i = 0;

    while i < nodes.len() {
        match &nodes[i] {
            Node::Heading { depth: 1, children } => {
                let title = serialize_inline(children);
                i += 1;

                let mut body = Vec::new();
                while i < nodes.len() && !is_heading_within(&nodes[i], 1) {
                    body.push(serialize_block(&nodes[i]));
                    i += 1;
                }

                output.push(format!(
                    "<section>\n<title>{}</title>\n{}\n</section>",
                    title,
                    body.join("\n")
                ));
            }
            node => {
                output.push(serialize_block(node));
                i += 1;
            }
        }
    }

    output.join("\n")
}
