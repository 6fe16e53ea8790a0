//! Journal conversion use case

use crate::domain::journal::{segment_content, DateHeader};
use crate::domain::xml::escape_text;
use crate::error::Result;

/// Converts a dated journal entry into a `<section>`
pub struct ConvertJournalService;

impl ConvertJournalService {
    /// Convert journal text, failing before any output on a bad header.
    ///
    /// # Examples
    ///
    /// ```
    /// use stdmark::application::ConvertJournalService;
    ///
    /// let xml = ConvertJournalService::execute("Friday, june 28, 2025.\nHello world.\n\n- one\n- two\n").unwrap();
    /// assert_eq!(
    ///     xml,
    ///     "<section>\n  <title>Friday, June 28, 2025.</title>\n  <par>Hello world.</par>\n<list type=\"bullet\">\n<item>one</item>\n<item>two</item>\n</list>\n</section>"
    /// );
    /// ```
    pub fn execute(input: &str) -> Result<String> {
        let text = input.replace("\r\n", "\n");

        let (header, body) = DateHeader::split(&text)?;
        tracing::debug!(date = %header.date(), "found date declaration");

        let content = segment_content(&body);

        Ok(format!(
            "<section>\n  <title>{}</title>\n  {}\n</section>",
            escape_text(&header.normalized()),
            content
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StdmarkError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_date_moves_into_title() {
        let xml = ConvertJournalService::execute("sunday, JUNE 29, 2025. Rainy day.").unwrap();
        assert_eq!(
            xml,
            "<section>\n  <title>Sunday, June 29, 2025.</title>\n  <par>Rainy day.</par>\n</section>"
        );
        assert!(!xml.contains("JUNE"));
    }

    #[test]
    fn test_header_without_body() {
        let xml = ConvertJournalService::execute("Sunday, June 29, 2025.\n").unwrap();
        assert_eq!(
            xml,
            "<section>\n  <title>Sunday, June 29, 2025.</title>\n  \n</section>"
        );
    }

    #[test]
    fn test_crlf_input() {
        let xml =
            ConvertJournalService::execute("Sunday, June 29, 2025.\r\nA\r\n\r\n- b\r\n").unwrap();
        assert!(xml.contains("<par>A</par>"));
        assert!(xml.contains("<item>b</item>"));
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(
            ConvertJournalService::execute(""),
            Err(StdmarkError::EmptyInput)
        ));
        assert!(matches!(
            ConvertJournalService::execute("no date here"),
            Err(StdmarkError::MissingDateHeader)
        ));
        assert!(matches!(
            ConvertJournalService::execute("Friday, Smarch 40, 2025."),
            Err(StdmarkError::InvalidDate(_))
        ));
    }
}
