//! Journal entries: dated declaration plus paragraphs and bullet lists

pub mod date;
pub mod segment;

pub use date::{normalize_date_text, parse_journal_date, split_paragraphs, DateHeader};
pub use segment::{segment_content, LineKind};
