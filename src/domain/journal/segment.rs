//! Journal body segmentation into paragraphs and bullet lists

use crate::domain::xml::escape_text;
use regex::Regex;
use std::sync::OnceLock;

/// Bullet marker with optional indentation: `- `, `* ` or `+ `
fn bullet_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\s*[-*+]\s+").unwrap())
}

/// Classification of a single journal line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Bullet item, marker stripped
    Bullet(&'a str),
    /// Empty or whitespace-only
    Blank,
    /// Anything else, trimmed
    Text(&'a str),
}

impl<'a> LineKind<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(marker) = bullet_regex().find(line) {
            LineKind::Bullet(line[marker.end()..].trim())
        } else if line.trim().is_empty() {
            LineKind::Blank
        } else {
            LineKind::Text(line.trim())
        }
    }
}

/// Intermediate output of the line pass
#[derive(Debug, Clone, PartialEq, Eq)]
enum Fragment {
    Line(String),
    Separator,
    List(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListState {
    Outside,
    InList,
}

/// Pending bullet items for the list being read
#[derive(Debug, Default)]
struct ListBuffer {
    items: Vec<String>,
}

impl ListBuffer {
    fn push(&mut self, item: &str) {
        self.items.push(item.to_string());
    }

    /// Emit the buffered items as one list fragment, leaving the buffer empty
    fn flush_into(&mut self, fragments: &mut Vec<Fragment>) {
        if self.items.is_empty() {
            return;
        }
        let items = self
            .items
            .drain(..)
            .map(|item| format!("<item>{}</item>", escape_text(&item)))
            .collect::<Vec<_>>()
            .join("\n");
        fragments.push(Fragment::List(format!("<list type=\"bullet\">\n{}\n</list>", items)));
    }
}

/// Convert a journal body into `<par>` and `<list>` fragments.
///
/// Consecutive text lines form one paragraph (joined with a space), blank
/// lines end paragraphs and lists, and runs of bullet lines become a single
/// bullet list. Fragments are newline separated in document order.
///
/// # Examples
///
/// ```
/// use stdmark::domain::journal::segment_content;
///
/// let xml = segment_content("Went out.\nIt rained.\n\n- umbrella\n- boots");
/// assert_eq!(
///     xml,
///     "<par>Went out. It rained.</par>\n<list type=\"bullet\">\n<item>umbrella</item>\n<item>boots</item>\n</list>"
/// );
/// ```
pub fn segment_content(text: &str) -> String {
    let fragments = scan_lines(text);
    group_paragraphs(fragments).join("\n")
}

fn scan_lines(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut list = ListBuffer::default();
    let mut state = ListState::Outside;

    for line in text.split('\n') {
        match LineKind::classify(line) {
            LineKind::Bullet(item) => {
                if state == ListState::Outside {
                    list.flush_into(&mut fragments);
                    state = ListState::InList;
                }
                list.push(item);
            }
            LineKind::Blank => {
                list.flush_into(&mut fragments);
                state = ListState::Outside;
                fragments.push(Fragment::Separator);
            }
            LineKind::Text(text) => {
                if state == ListState::InList {
                    list.flush_into(&mut fragments);
                    state = ListState::Outside;
                }
                fragments.push(Fragment::Line(text.to_string()));
            }
        }
    }

    list.flush_into(&mut fragments);
    fragments
}

fn group_paragraphs(fragments: Vec<Fragment>) -> Vec<String> {
    let mut output = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();

    let flush = |paragraph: &mut Vec<String>, output: &mut Vec<String>| {
        if !paragraph.is_empty() {
            output.push(format!("<par>{}</par>", escape_text(&paragraph.join(" "))));
            paragraph.clear();
        }
    };

    for fragment in fragments {
        match fragment {
            Fragment::Separator => flush(&mut paragraph, &mut output),
            Fragment::List(list) => {
                flush(&mut paragraph, &mut output);
                output.push(list);
            }
            Fragment::Line(line) => paragraph.push(line),
        }
    }
    flush(&mut paragraph, &mut output);

    output
}
