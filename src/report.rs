//! Console summary and `suburb,count` CSV output.

use crate::compute::assignment::{CountTable, TallyReport};
use crate::config::Config;
use crate::error::{GeotallyError, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One line naming the top region, or saying nothing was found.
pub fn summary(report: &TallyReport, config: &Config) -> String {
    match report.top_region() {
        Some((name, count)) if count > 0 => format!(
            "Top region ({} to {}): {} with {} sightings of {}",
            config.start_date, config.end_date, name, count, config.taxon
        ),
        _ => format!(
            "No observations of {} found between {} and {} in the provided regions.",
            config.taxon, config.start_date, config.end_date
        ),
    }
}

/// Writes a bare `suburb,count` header and one row per region, in table order.
///
/// Row names are quoted so region names containing commas survive.
pub fn write_csv<W: Write>(counts: &CountTable, mut writer: W) -> Result<()> {
    writer
        .write_all(b"suburb,count\n")
        .map_err(|e| GeotallyError::Csv(csv::Error::from(e)))?;

    let mut out = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(writer);

    for (name, count) in counts.iter() {
        out.write_record([name, count.to_string().as_str()])?;
    }
    out.flush()
        .map_err(|e| GeotallyError::Csv(csv::Error::from(e)))?;
    Ok(())
}

pub fn write_csv_file(counts: &CountTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| GeotallyError::io(path, e))?;
    write_csv(counts, file)
}
