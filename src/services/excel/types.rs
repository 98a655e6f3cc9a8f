use calamine::Data;

/// Number of leading rows inspected when looking for a header.
pub const HEADER_SCAN_ROWS: usize = 20;

/// Lowercase keywords that mark a header row.
pub const HEADER_KEYWORDS: [&str; 6] = ["description", "item", "code", "rate", "price", "unit"];

/// One sheet, fully loaded, with no header assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Vec<Data>>,
}

impl RawSheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Data>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Outcome of header resolution for a non-empty sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRow {
    pub index: usize,
    /// False when no keyword row was found and row 0 is used.
    pub detected: bool,
}

/// All sheets of one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedWorkbook {
    pub sheets: Vec<RawSheet>,
}
