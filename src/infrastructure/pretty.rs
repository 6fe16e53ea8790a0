//! XML re-indentation

use crate::error::{Result, StdmarkError};
use quick_xml::events::{BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::writer::Writer;

/// Elements that only ever hold other elements
const CONTAINERS: &[&[u8]] = &[b"document", b"head", b"body", b"section", b"list", b"block"];

fn xml_error(err: impl std::fmt::Display) -> StdmarkError {
    StdmarkError::Xml(err.to_string())
}

#[derive(Debug)]
struct OpenElement {
    container: bool,
    has_children: bool,
}

/// Writes events, breaking lines only between children of containers
struct Indenter {
    writer: Writer<Vec<u8>>,
    open: Vec<OpenElement>,
    indent: usize,
    started: bool,
}

impl Indenter {
    fn new(indent: usize) -> Self {
        Self {
            writer: Writer::new(Vec::new()),
            open: Vec::new(),
            indent,
            started: false,
        }
    }

    fn in_container(&self) -> bool {
        self.open.last().map_or(true, |e| e.container)
    }

    fn line_break(&mut self, depth: usize) -> Result<()> {
        let whitespace = format!("\n{}", " ".repeat(self.indent * depth));
        self.write(Event::Text(BytesText::from_escaped(whitespace)))
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(xml_error)
    }

    /// Start tags, empty tags, declarations and the like
    fn write_node(&mut self, event: Event<'_>) -> Result<()> {
        if self.in_container() && self.started {
            self.line_break(self.open.len())?;
        }
        if let Some(parent) = self.open.last_mut() {
            parent.has_children = true;
        }
        self.started = true;
        self.write(event)
    }

    fn start(&mut self, event: Event<'_>, container: bool) -> Result<()> {
        self.write_node(event)?;
        self.open.push(OpenElement {
            container,
            has_children: false,
        });
        Ok(())
    }

    fn end(&mut self, event: Event<'_>) -> Result<()> {
        let element = self
            .open
            .pop()
            .ok_or_else(|| StdmarkError::Xml("unexpected closing tag".to_string()))?;
        if element.container && element.has_children {
            self.line_break(self.open.len())?;
        }
        self.write(event)
    }

    fn text(&mut self, event: Event<'_>, blank: bool) -> Result<()> {
        if self.in_container() && blank {
            return Ok(());
        }
        if let Some(parent) = self.open.last_mut() {
            parent.has_children = true;
        }
        self.write(event)
    }

    fn finish(self) -> Result<String> {
        if !self.open.is_empty() {
            return Err(StdmarkError::Xml(
                "unclosed element at end of input".to_string(),
            ));
        }
        String::from_utf8(self.writer.into_inner()).map_err(xml_error)
    }
}

/// Re-indent an XML string.
///
/// Whitespace between the children of structural containers is replaced by
/// indentation. Text inside any other element is written back untouched, so
/// mixed content and preformatted code keep their exact characters. Empty
/// elements stay on one line as `<x></x>`.
///
/// # Examples
///
/// ```
/// use stdmark::infrastructure::pretty_print;
///
/// let xml = "<document>\n<body>\n<par>a <emph style=\"b\">b</emph></par>\n</body>\n</document>";
/// assert_eq!(
///     pretty_print(xml, 2).unwrap(),
///     "<document>\n  <body>\n    <par>a <emph style=\"b\">b</emph></par>\n  </body>\n</document>"
/// );
/// ```
pub fn pretty_print(xml: &str, indent: usize) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);
    let mut out = Indenter::new(indent);

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(format!("{} at byte {}", e, reader.error_position())))?;

        match event {
            Event::Eof => break,
            Event::Start(start) => {
                let container = CONTAINERS.iter().any(|c| *c == start.name().as_ref());
                out.start(Event::Start(start), container)?;
            }
            Event::End(end) => out.end(Event::End(end))?,
            Event::Text(text) => {
                let blank = text.iter().all(u8::is_ascii_whitespace);
                out.text(Event::Text(text), blank)?;
            }
            Event::GeneralRef(reference) => {
                let name = std::str::from_utf8(&reference).map_err(xml_error)?;
                let text = BytesText::from_escaped(format!("&{};", name));
                out.text(Event::Text(text), false)?;
            }
            Event::CData(cdata) => out.text(Event::CData(cdata), false)?,
            other => out.write_node(other)?,
        }
    }

    out.finish()
}
