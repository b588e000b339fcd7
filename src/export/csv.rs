use crate::core::report::ReportEntry;
use crate::errors::AppResult;
use crate::utils::time::format_ts;
use csv::Writer;
use std::io::Write;

const CSV_TS_FMT: &str = "%m/%d/%Y %H:%M:%S";

/// Spreadsheet layout: one row per closed entry, lengths in seconds and a
/// footer formula summing them up in hours.
pub fn write_csv<W: Write>(out: W, entries: &[ReportEntry]) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);

    wtr.write_record(["Start", "End", "Length", "Description"])?;

    let closed: Vec<&ReportEntry> = entries.iter().filter(|e| !e.entry.is_active()).collect();
    for e in &closed {
        let end = e.entry.end_time.unwrap_or(e.entry.start_time);
        wtr.write_record([
            format_ts(e.entry.start_time, CSV_TS_FMT),
            format_ts(end, CSV_TS_FMT),
            e.duration.to_string(),
            e.entry.description_or_empty().to_string(),
        ])?;
    }

    let total = format!("=SUM(C2:C{})/3600", closed.len() + 1);
    wtr.write_record(["Total", "", total.as_str(), ""])?;

    wtr.flush()?;
    Ok(())
}
