//! Markdown document conversion use case

use crate::domain::document::{
    serialize_body, split_front_matter, strip_container_directives, Metadata, Node,
};
use crate::error::Result;
use crate::infrastructure::pretty_print;

/// Runtime options for document conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Spaces per nesting level in the formatted output
    pub indent: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Converts Markdown with optional front matter into a `<document>`
pub struct ConvertDocumentService {
    options: DocumentOptions,
}

impl ConvertDocumentService {
    pub fn new(options: DocumentOptions) -> Self {
        Self { options }
    }

    /// Convert a Markdown document to formatted XML.
    ///
    /// Broken front matter is logged and replaced by empty metadata; the
    /// body is still converted.
    pub fn execute(&self, input: &str) -> Result<String> {
        let (header, body) = split_front_matter(input);

        let decoded = Metadata::decode(header);
        if let Some(failure) = &decoded.failure {
            tracing::warn!("{}", failure);
        }

        let markdown = strip_container_directives(body);
        let nodes = Node::parse_document(&markdown);
        tracing::debug!(
            metadata = decoded.metadata.len(),
            blocks = nodes.len(),
            "parsed document"
        );

        let xml = render_document(&decoded.metadata, &nodes);
        pretty_print(&xml, self.options.indent)
    }
}

/// Assemble the unformatted `<document>` for parsed metadata and body
pub fn render_document(metadata: &Metadata, nodes: &[Node]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<document>\n{}\n<body>\n{}\n</body>\n</document>",
        metadata.to_head_xml(),
        serialize_body(nodes)
    )
}
