use calamine::Data;

use super::types::{HeaderRow, RawSheet, HEADER_KEYWORDS, HEADER_SCAN_ROWS};
use super::utils::clean_cell;
use crate::config::HeaderStrategy;

/// Picks the header row of a sheet. `None` means the sheet has nothing to
/// read and should be skipped.
pub fn resolve_header(sheet: &RawSheet, strategy: HeaderStrategy) -> Option<HeaderRow> {
    if sheet.is_empty() {
        return None;
    }

    match strategy {
        HeaderStrategy::FirstRow => Some(HeaderRow {
            index: 0,
            detected: false,
        }),
        HeaderStrategy::Fixed(index) => (index < sheet.rows.len()).then_some(HeaderRow {
            index,
            detected: true,
        }),
        HeaderStrategy::Scan => Some(scan_for_header(&sheet.rows).unwrap_or(HeaderRow {
            index: 0,
            detected: false,
        })),
    }
}

fn scan_for_header(rows: &[Vec<Data>]) -> Option<HeaderRow> {
    rows.iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| looks_like_header(row))
        .map(|index| HeaderRow {
            index,
            detected: true,
        })
}

fn looks_like_header(row: &[Data]) -> bool {
    let joined = row
        .iter()
        .map(clean_cell)
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    HEADER_KEYWORDS.iter().any(|keyword| joined.contains(keyword))
}

/// Cleaned header labels, one per column of the header row.
pub fn header_labels(row: &[Data]) -> Vec<String> {
    row.iter().map(clean_cell).collect()
}
