use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// One normalized price-list line. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub code: String,
    pub description: String,
    pub unit: String,
    pub rate: f64,
    pub category: String,
    pub subcategory: String,
    pub material_type: String,
    pub material_size: String,
    pub brand: String,
    pub supplier: String,
    pub remark: String,
    #[serde(rename = "isActive", serialize_with = "serialize_flag")]
    pub is_active: bool,
}

fn serialize_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "TRUE" } else { "FALSE" })
}

/// Why a data row did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    EmptyRow,
    MissingDescription,
    RepeatedHeader,
    NonPositiveRate,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DropReason::EmptyRow => "empty row",
            DropReason::MissingDescription => "missing description",
            DropReason::RepeatedHeader => "repeated header",
            DropReason::NonPositiveRate => "non-positive rate",
        };
        f.write_str(label)
    }
}

/// Counters for a single sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetStats {
    pub rows_seen: usize,
    pub records: usize,
    pub dropped: BTreeMap<DropReason, usize>,
}

impl SheetStats {
    pub fn record_drop(&mut self, reason: DropReason) {
        *self.dropped.entry(reason).or_insert(0) += 1;
    }

    pub fn dropped_total(&self) -> usize {
        self.dropped.values().sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub files_processed: usize,
    pub sheets_processed: usize,
    pub sheets_skipped: usize,
    pub rows_seen: usize,
    pub records_written: usize,
    pub dropped: BTreeMap<DropReason, usize>,
    pub subcategories: BTreeMap<String, usize>,
    pub average_rate: Option<f64>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            files_processed: 0,
            sheets_processed: 0,
            sheets_skipped: 0,
            rows_seen: 0,
            records_written: 0,
            dropped: BTreeMap::new(),
            subcategories: BTreeMap::new(),
            average_rate: None,
        }
    }

    pub fn absorb_sheet(&mut self, stats: &SheetStats) {
        self.sheets_processed += 1;
        self.rows_seen += stats.rows_seen;
        for (reason, count) in &stats.dropped {
            *self.dropped.entry(*reason).or_insert(0) += count;
        }
    }

    /// Fills the record-derived figures once all records are known and
    /// stamps the summary with the time the run completed.
    pub fn finish(&mut self, records: &[Record]) {
        self.generated_at = Utc::now();
        self.records_written = records.len();
        self.subcategories.clear();
        for record in records {
            let key = if record.subcategory.is_empty() {
                "(none)".to_string()
            } else {
                record.subcategory.clone()
            };
            *self.subcategories.entry(key).or_insert(0) += 1;
        }
        self.average_rate = if records.is_empty() {
            None
        } else {
            Some(records.iter().map(|r| r.rate).sum::<f64>() / records.len() as f64)
        };
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
