use std::borrow::Cow;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use bytes::Bytes;
use calamine::{open_workbook_from_rs, Data, Ods, Reader, Xls, Xlsx};
use encoding_rs::WINDOWS_1252;

use super::types::{LoadedWorkbook, RawSheet};
use crate::error::AppError;

/// Input formats the normalizer can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Xlsx,
    Xls,
    Ods,
    Csv,
}

impl InputFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "ods" => Some(Self::Ods),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Reads the whole file into memory and returns every sheet it contains.
pub fn load_workbook(path: &Path) -> Result<LoadedWorkbook, AppError> {
    let format =
        InputFormat::from_path(path).ok_or_else(|| AppError::UnsupportedFormat(path.to_path_buf()))?;

    let start = std::time::Instant::now();
    let file_data = Bytes::from(std::fs::read(path)?);
    tracing::debug!("Read {}KB from {}", file_data.len() / 1024, path.display());

    let workbook = load_from_bytes(path, format, file_data)?;
    tracing::debug!(
        "Loaded {} sheet(s) from {} in {:?}",
        workbook.sheets.len(),
        path.display(),
        start.elapsed()
    );
    Ok(workbook)
}

pub fn load_from_bytes(
    path: &Path,
    format: InputFormat,
    file_data: Bytes,
) -> Result<LoadedWorkbook, AppError> {
    let cursor = Cursor::new(file_data);
    match format {
        InputFormat::Xlsx => {
            let workbook: Xlsx<_> =
                open_workbook_from_rs(cursor).map_err(|e| AppError::workbook(path, e))?;
            Ok(read_sheets(workbook))
        }
        InputFormat::Xls => {
            let workbook: Xls<_> =
                open_workbook_from_rs(cursor).map_err(|e| AppError::workbook(path, e))?;
            Ok(read_sheets(workbook))
        }
        InputFormat::Ods => {
            let workbook: Ods<_> =
                open_workbook_from_rs(cursor).map_err(|e| AppError::workbook(path, e))?;
            Ok(read_sheets(workbook))
        }
        InputFormat::Csv => read_csv(path, cursor),
    }
}

fn read_sheets<RS, R>(mut workbook: R) -> LoadedWorkbook
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: std::fmt::Display,
{
    let sheet_names = workbook.sheet_names().to_vec();
    tracing::debug!("Found {} sheets: {:?}", sheet_names.len(), sheet_names);

    let mut sheets = Vec::with_capacity(sheet_names.len());
    for sheet_name in sheet_names {
        match workbook.worksheet_range(&sheet_name) {
            Ok(range) => {
                // The range starts at the first used cell; pad it back so row
                // indices match the sheet.
                let leading = range.start().map_or(0, |(row, _)| row as usize);
                let rows: Vec<Vec<Data>> = std::iter::repeat_with(Vec::new)
                    .take(leading)
                    .chain(range.rows().map(|row| row.to_vec()))
                    .collect();
                sheets.push(RawSheet::new(sheet_name, rows));
            }
            Err(e) => {
                tracing::warn!("Failed to read worksheet {}: {}", sheet_name, e);
            }
        }
    }

    LoadedWorkbook { sheets }
}

/// A CSV file is a workbook with a single sheet named after the file stem.
fn read_csv<R: Read>(path: &Path, data: R) -> Result<LoadedWorkbook, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for result in reader.byte_records() {
        let record = result?;
        rows.push(record.iter().map(decode_field).collect());
    }

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Sheet1")
        .to_string();

    Ok(LoadedWorkbook {
        sheets: vec![RawSheet::new(name, rows)],
    })
}

/// UTF-8 when valid, otherwise Windows-1252 as written by older spreadsheet exports.
fn decode_field(bytes: &[u8]) -> Data {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    };
    let text = text.trim_start_matches('\u{feff}');
    if text.is_empty() {
        Data::Empty
    } else {
        Data::String(text.to_string())
    }
}
