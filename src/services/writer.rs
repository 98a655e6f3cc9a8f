use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::models::{Record, RunSummary};

/// UTF-8 byte-order mark, so spreadsheet tools pick the right encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `records` with a header row to `path`, replacing any existing file.
pub fn write_records(path: &Path, records: &[Record], delimiter: u8) -> Result<(), AppError> {
    let file = File::create(path)?;
    write_records_to(BufWriter::new(file), records, delimiter)?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn write_records_to<W: Write>(mut out: W, records: &[Record], delimiter: u8) -> Result<(), AppError> {
    out.write_all(UTF8_BOM)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(out);

    // Written by hand so an empty run still gets a header line.
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub const COLUMNS: [&str; 13] = [
    "id",
    "code",
    "description",
    "unit",
    "rate",
    "category",
    "subcategory",
    "material_type",
    "material_size",
    "brand",
    "supplier",
    "remark",
    "isActive",
];

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<(), AppError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, summary)?;
    out.write_all(b"\n")?;
    out.flush()?;
    tracing::info!("Wrote run summary to {}", path.display());
    Ok(())
}
