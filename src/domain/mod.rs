//! Domain layer - Parsing and XML serialization for both input formats

pub mod document;
pub mod journal;
pub mod xml;

pub use document::{Metadata, Node};
pub use journal::DateHeader;
