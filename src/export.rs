use crate::coverage::Coverage;
use crate::error::Result;
use std::io::Write;

/// FASTA line width of the covered subsequence.
const FASTA_WIDTH: usize = 60;

/// One CSV row per accepted feature, in acceptance order. Absent colors are
/// written as empty fields.
pub fn write_coverage<W: Write>(writer: W, coverage: &Coverage) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["start", "end", "label", "background_color", "text_color", "underline"])?;
    for (segment, entry) in coverage.entries() {
        writer.write_record([
            segment.start.to_string().as_str(),
            segment.end.to_string().as_str(),
            entry.name.as_str(),
            segment.background_color.as_deref().unwrap_or(""),
            segment.text_color.as_str(),
            if segment.underline { "true" } else { "false" },
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the concatenated covered bases as a single FASTA record.
pub fn write_covered_fasta<W: Write>(mut writer: W, id: &str, coverage: &Coverage) -> Result<()> {
    writeln!(writer, ">{id} covered by {} features", coverage.len())?;
    for chunk in coverage.covered.as_bytes().chunks(FASTA_WIDTH) {
        writer.write_all(chunk)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
