//! Application layer - Conversion pipelines

pub mod convert_document;
pub mod convert_journal;

pub use convert_document::{render_document, ConvertDocumentService, DocumentOptions};
pub use convert_journal::ConvertJournalService;
