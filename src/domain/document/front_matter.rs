//! Front matter and container directive handling

use regex::Regex;
use std::sync::OnceLock;

/// `---` delimited preamble at the very start of the text
fn front_matter_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\A---\s*\n(?s:(.*?))\n---\s*\n?").unwrap())
}

/// Lines opening or closing a container directive, e.g. `::: date`
fn directive_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?m)^:::.*(?:\n|\z)").unwrap())
}

/// Split a YAML front matter block from the document body.
///
/// Returns the trimmed preamble (if present) and the body following it.
///
/// # Examples
///
/// ```
/// use stdmark::domain::document::split_front_matter;
///
/// let (header, body) = split_front_matter("---\ntitle: Test\n---\n# A\n");
/// assert_eq!(header, Some("title: Test"));
/// assert_eq!(body, "# A\n");
///
/// let (header, body) = split_front_matter("# No preamble\n");
/// assert_eq!(header, None);
/// assert_eq!(body, "# No preamble\n");
/// ```
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    match front_matter_regex().captures(text) {
        Some(captures) => {
            let whole = captures.get(0).map_or(0, |m| m.end());
            let header = captures.get(1).map_or("", |m| m.as_str()).trim();
            (Some(header), &text[whole..])
        }
        None => (None, text),
    }
}

/// Remove container directive marker lines (`::: name` and bare `:::`)
pub fn strip_container_directives(body: &str) -> String {
    directive_regex().replace_all(body, "").into_owned()
}
