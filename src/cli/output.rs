//! Output writing

use crate::error::Result;
use std::io::Write;

/// Write a converted document followed by a newline
pub fn write_xml<W: Write>(out: &mut W, xml: &str) -> Result<()> {
    writeln!(out, "{}", xml)?;
    out.flush()?;
    Ok(())
}
