//! XML escaping shared by both pipelines

use quick_xml::escape::{escape, partial_escape};

/// Escape character data: `&`, `<` and `>` only.
pub fn escape_text(text: &str) -> String {
    partial_escape(text).into_owned()
}

/// Escape everything that can break markup, quotes included.
pub fn escape_markup(text: &str) -> String {
    escape(text).into_owned()
}

/// Escape an attribute value delimited by double quotes.
///
/// Apostrophes are left alone since attributes are always written with `"`.
pub fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a & b < c > d"), "a &amp; b &lt; c &gt; d");
        assert_eq!(escape_text("\"quoted\" 'single'"), "\"quoted\" 'single'");
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup(r#"<a href="x">it's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;it&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"Tom & "Jerry" <3>"#), "Tom &amp; &quot;Jerry&quot; &lt;3&gt;");
        assert_eq!(escape_attr("it's"), "it's");
    }
}
