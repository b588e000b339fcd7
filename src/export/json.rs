use crate::core::report::ReportEntry;
use crate::errors::AppResult;
use std::io::Write;

/// Entries with their metadata as a pretty-printed JSON array.
pub fn write_json<W: Write>(mut out: W, entries: &[ReportEntry]) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, entries)?;
    writeln!(out)?;
    Ok(())
}
