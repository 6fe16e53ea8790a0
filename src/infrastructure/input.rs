//! Input acquisition

use crate::error::Result;
use std::io::Read;

/// Read a whole input stream into memory.
///
/// Conversion only starts once the writer has closed its end, so a document
/// delivered in several chunks is still converted as one.
pub fn read_input<R: Read>(mut reader: R) -> Result<String> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    tracing::debug!(bytes = buffer.len(), "read input");
    Ok(buffer)
}

/// Read all of standard input
pub fn read_stdin() -> Result<String> {
    read_input(std::io::stdin().lock())
}
