//! stdmark - Journal and Markdown to XML converter
//!
//! Turns dated journal entries and Markdown documents with YAML front matter
//! into a small structured XML vocabulary (`<section>`, `<par>`, `<list>`,
//! `<item>`, `<emph>`, ...).

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::StdmarkError;
