//! Journal date declaration: splitting, validation and normalization
//!
//! A journal entry opens with a declaration such as `Friday, June 28, 2025.`
//! at the very start of its first paragraph. The declaration becomes the
//! section title and everything after it is the entry body.

use crate::error::{Result, StdmarkError};
use chrono::{Datelike, Month, NaiveDate, Weekday};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

/// Paragraph boundary: two or more consecutive newlines
fn paragraph_break_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\n{2,}").unwrap())
}

/// Date declaration at the start of a paragraph, followed by the rest of it
fn date_header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)^([A-Za-z]+,\s+[A-Za-z]+\s+\d{1,2},\s+\d{4}\.)\s*(.*)$").unwrap()
    })
}

/// The individual tokens of a matched declaration
fn date_parts_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z]+),\s+([A-Za-z]+)\s+(\d{1,2}),\s+(\d{4})\.?$").unwrap()
    })
}

/// Split text into blank-line separated paragraphs
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    paragraph_break_regex().split(text).collect()
}

/// A validated date declaration taken from the head of a journal entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateHeader {
    raw: String,
    date: NaiveDate,
}

impl DateHeader {
    /// Separate the date declaration from the rest of the entry.
    ///
    /// Returns the header and the remaining body: the first paragraph's
    /// trailing text plus every following paragraph, empty paragraphs
    /// dropped, rejoined with a blank line.
    ///
    /// # Examples
    ///
    /// ```
    /// use stdmark::domain::journal::DateHeader;
    ///
    /// let (header, body) = DateHeader::split("friday, JUNE 28, 2025. Hi.\n\nMore.").unwrap();
    /// assert_eq!(header.normalized(), "Friday, June 28, 2025.");
    /// assert_eq!(body, "Hi.\n\nMore.");
    /// ```
    pub fn split(text: &str) -> Result<(DateHeader, String)> {
        if text.trim().is_empty() {
            return Err(StdmarkError::EmptyInput);
        }

        let mut paragraphs = split_paragraphs(text);
        let first = paragraphs.remove(0);

        let captures = date_header_regex()
            .captures(first)
            .ok_or(StdmarkError::MissingDateHeader)?;
        let raw = &captures[1];
        let rest_of_first = captures[2].trim();

        let date = parse_journal_date(raw)?;

        let body = std::iter::once(rest_of_first)
            .chain(paragraphs)
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok((
            DateHeader {
                raw: raw.to_string(),
                date,
            },
            body,
        ))
    }

    /// The declaration exactly as written
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The calendar date the declaration names
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The declaration with canonical capitalization
    pub fn normalized(&self) -> String {
        normalize_date_text(&self.raw)
    }
}

/// Validate a `Weekday, Month D, YYYY.` declaration as a real calendar date.
///
/// The month accepts full names and three-letter abbreviations in any case.
/// The weekday is not checked against the calendar; a mismatch is only
/// logged.
pub fn parse_journal_date(raw: &str) -> Result<NaiveDate> {
    let invalid = || StdmarkError::InvalidDate(raw.to_string());

    let captures = date_parts_regex().captures(raw.trim()).ok_or_else(invalid)?;

    let month = Month::from_str(&captures[2]).map_err(|_| invalid())?;
    let day: u32 = captures[3].parse().map_err(|_| invalid())?;
    let year: i32 = captures[4].parse().map_err(|_| invalid())?;

    let date = NaiveDate::from_ymd_opt(year, month.number_from_month(), day).ok_or_else(invalid)?;

    match Weekday::from_str(&captures[1]) {
        Ok(weekday) if weekday != date.weekday() => {
            tracing::warn!(
                declared = &captures[1],
                actual = %date.weekday(),
                "weekday in date declaration does not match {}",
                date
            );
        }
        Ok(_) => {}
        Err(_) => {
            tracing::warn!(declared = &captures[1], "unrecognized weekday name");
        }
    }

    Ok(date)
}

/// Capitalize the weekday and month of a date declaration.
///
/// Only the first letter of the weekday and of the month is uppercased; the
/// rest of those two tokens is lowercased. Day, year and the trailing dot are
/// kept. Strings without a comma, or without a space after it, come back
/// unchanged.
pub fn normalize_date_text(raw: &str) -> String {
    let trimmed = raw.trim();
    let (no_dot, dot) = match trimmed.strip_suffix('.') {
        Some(stripped) => (stripped, "."),
        None => (trimmed, ""),
    };

    let lower = no_dot.to_lowercase();

    let Some((weekday, rest)) = lower.split_once(',') else {
        return raw.to_string();
    };
    let weekday = weekday.trim();
    let rest = rest.trim();

    let Some((month, after_month)) = rest.split_once(' ') else {
        return raw.to_string();
    };

    format!(
        "{}, {} {}{}",
        capitalize(weekday),
        capitalize(month),
        after_month,
        dot
    )
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extracts_header_and_body() {
        let (header, body) =
            DateHeader::split("Friday, june 28, 2025.\nHello world.\n\n- one\n- two\n").unwrap();
        assert_eq!(header.raw(), "Friday, june 28, 2025.");
        assert_eq!(header.date(), NaiveDate::from_ymd_opt(2025, 6, 28).unwrap());
        assert_eq!(body, "Hello world.\n\n- one\n- two\n");
    }

    #[test]
    fn test_split_header_only_paragraph() {
        let (header, body) = DateHeader::split("Monday, March 3, 2025.\n\nSecond.").unwrap();
        assert_eq!(header.normalized(), "Monday, March 3, 2025.");
        assert_eq!(body, "Second.");
    }

    #[test]
    fn test_split_accepts_whitespace_runs() {
        let (header, _) = DateHeader::split("Friday,   June\t28,  2025.").unwrap();
        assert_eq!(header.raw(), "Friday,   June\t28,  2025.");
    }

    #[test]
    fn test_split_collapses_paragraph_gaps() {
        let (_, body) = DateHeader::split("Friday, June 27, 2025.\n\n\n\nA\n\n\nB").unwrap();
        assert_eq!(body, "A\n\nB");
    }

    #[test]
    fn test_split_empty_input() {
        assert!(matches!(DateHeader::split(""), Err(StdmarkError::EmptyInput)));
        assert!(matches!(
            DateHeader::split("  \n\n \n"),
            Err(StdmarkError::EmptyInput)
        ));
    }

    #[test]
    fn test_split_missing_header() {
        assert!(matches!(
            DateHeader::split("Just some text.\n\nFriday, June 27, 2025."),
            Err(StdmarkError::MissingDateHeader)
        ));
        // Dot is mandatory
        assert!(matches!(
            DateHeader::split("Friday, June 27, 2025\nText"),
            Err(StdmarkError::MissingDateHeader)
        ));
        // Declaration must open the first paragraph
        assert!(matches!(
            DateHeader::split("\n\nFriday, June 27, 2025."),
            Err(StdmarkError::MissingDateHeader)
        ));
    }

    #[test]
    fn test_split_invalid_date() {
        match DateHeader::split("Friday, Smarch 40, 2025.\nText") {
            Err(StdmarkError::InvalidDate(raw)) => assert_eq!(raw, "Friday, Smarch 40, 2025."),
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_journal_date() {
        assert_eq!(
            parse_journal_date("Friday, June 27, 2025.").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 27).unwrap()
        );
        assert_eq!(
            parse_journal_date("tuesday, FEB 4, 2025.").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 4).unwrap()
        );
        // Weekday disagreeing with the calendar is tolerated
        assert!(parse_journal_date("Friday, June 28, 2025.").is_ok());
    }

    #[test]
    fn test_parse_journal_date_rejects_impossible_dates() {
        assert!(parse_journal_date("Friday, February 30, 2025.").is_err());
        assert!(parse_journal_date("Friday, June 0, 2025.").is_err());
        assert!(parse_journal_date("Friday, Smarch 4, 2025.").is_err());
    }

    #[test]
    fn test_normalize_date_text() {
        assert_eq!(
            normalize_date_text("friday, june 28, 2025."),
            "Friday, June 28, 2025."
        );
        assert_eq!(
            normalize_date_text("FRIDAY, JUNE 28, 2025."),
            "Friday, June 28, 2025."
        );
        assert_eq!(normalize_date_text("fRiDaY, jUnE 28, 2025"), "Friday, June 28, 2025");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_date_text("wEDNESDAY, sEPTEMBER 3, 2025.");
        assert_eq!(normalize_date_text(&once), once);
    }

    #[test]
    fn test_normalize_falls_back_on_malformed_shape() {
        assert_eq!(normalize_date_text("june 28 2025."), "june 28 2025.");
        assert_eq!(normalize_date_text("friday,june"), "friday,june");
    }

    #[test]
    fn test_split_paragraphs() {
        assert_eq!(split_paragraphs("a\nb\n\nc\n\n\nd"), vec!["a\nb", "c", "d"]);
        assert_eq!(split_paragraphs(""), vec![""]);
    }
}
