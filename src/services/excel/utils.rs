use calamine::Data;
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use regex::Regex;

static CURRENCY_AND_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[£$€,]").expect("valid currency regex"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static GENERIC_SHEET_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^sheet\s*\d*$").expect("valid sheet name regex"));

/// Renders a cell as text. Empty and error cells become an empty string and
/// dates print as `YYYY-MM-DD`, with the time only when it is not midnight.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => match dt.as_datetime().filter(|_| dt.is_datetime()) {
            Some(value) if value.time() == NaiveTime::MIN => value.format("%Y-%m-%d").to_string(),
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

/// Trims, collapses whitespace runs (including newlines) to one space and maps
/// the placeholder literals `nan` and `None` to an empty string.
pub fn clean_text(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text.trim(), " ");
    if collapsed == "nan" || collapsed == "None" {
        String::new()
    } else {
        collapsed.into_owned()
    }
}

pub fn clean_cell(cell: &Data) -> String {
    clean_text(&cell_to_string(cell))
}

/// Reads a rate from any cell. Returns 0.0 for anything that is not a
/// positive finite number, including date cells and currency text that fails
/// to parse.
pub fn extract_rate(cell: &Data) -> f64 {
    let value = match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::Empty | Data::Error(_) | Data::Bool(_) => return 0.0,
        // A date's serial number is not a price.
        Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => return 0.0,
        other => parse_rate(&cell_to_string(other)),
    };
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Text form of [`extract_rate`].
pub fn parse_rate(text: &str) -> f64 {
    let stripped = CURRENCY_AND_SEPARATORS.replace_all(text, "");
    match stripped.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

pub fn is_empty_row(row: &[Data]) -> bool {
    row.iter().all(|cell| clean_cell(cell).is_empty())
}

/// True for the names spreadsheet tools give new sheets ("Sheet1", "Sheet 2").
pub fn is_generic_sheet_name(name: &str) -> bool {
    GENERIC_SHEET_NAME.is_match(name.trim())
}
