use std::path::{Path, PathBuf};

use crate::config::{Config, HeaderStrategy, MappingDefaults};
use crate::error::AppError;
use crate::models::{Record, RunSummary, SheetStats};
use crate::services::excel::header::{header_labels, resolve_header};
use crate::services::excel::{load_workbook, RawSheet};
use crate::services::mapper::{sheet_category, ColumnIndex, FieldMapper, IdSequence, RowOutcome};
use crate::services::writer::{write_records, write_summary};

/// Records of a run in output order, plus what happened along the way.
#[derive(Debug)]
pub struct Normalized {
    pub records: Vec<Record>,
    pub summary: RunSummary,
}

/// Accumulates records across every sheet of every input.
pub struct Normalizer<'a> {
    header: HeaderStrategy,
    mapper: FieldMapper<'a>,
    ids: IdSequence,
    records: Vec<Record>,
    summary: RunSummary,
}

impl<'a> Normalizer<'a> {
    pub fn new(header: HeaderStrategy, defaults: &'a MappingDefaults) -> Self {
        Self {
            header,
            mapper: FieldMapper::new(defaults),
            ids: IdSequence::new(defaults.id_prefix.clone()),
            records: Vec::new(),
            summary: RunSummary::new(),
        }
    }

    pub fn add_file(&mut self, path: &Path) -> Result<(), AppError> {
        let start = std::time::Instant::now();
        tracing::info!("Reading {}", path.display());

        let workbook = load_workbook(path)?;
        tracing::info!("Processing {} sheets from {}", workbook.sheets.len(), path.display());
        for sheet in &workbook.sheets {
            self.add_sheet(sheet);
        }

        self.summary.files_processed += 1;
        tracing::info!("Finished {} in {:?}", path.display(), start.elapsed());
        Ok(())
    }

    /// Maps one sheet. Returns `None` when the sheet had no header and was skipped.
    pub fn add_sheet(&mut self, sheet: &RawSheet) -> Option<SheetStats> {
        let defaults = self.mapper.defaults();
        let Some(header) = resolve_header(sheet, self.header) else {
            tracing::warn!("Sheet {} has no usable header row, skipping", sheet.name);
            self.summary.sheets_skipped += 1;
            return None;
        };

        if header.detected {
            tracing::info!("Sheet {}: header found at row {}", sheet.name, header.index);
        } else {
            tracing::info!("Sheet {}: no header keywords found, using row 0", sheet.name);
        }

        let columns = ColumnIndex::new(header_labels(&sheet.rows[header.index]));
        if !columns.has_description() || !columns.has_rate() {
            tracing::warn!(
                "Sheet {} has no description or rate column; its rows will be dropped",
                sheet.name
            );
        }

        let category = sheet_category(&sheet.name, defaults);
        let mut stats = SheetStats::default();
        for (offset, row) in sheet.rows.iter().enumerate().skip(header.index + 1) {
            stats.rows_seen += 1;
            match self.mapper.map_row(row, &columns, &category, &mut self.ids) {
                RowOutcome::Mapped(record) => {
                    stats.records += 1;
                    self.records.push(record);
                }
                RowOutcome::Dropped(reason) => {
                    tracing::debug!("Sheet {} row {}: dropped ({})", sheet.name, offset, reason);
                    stats.record_drop(reason);
                }
            }
        }

        tracing::info!(
            "Sheet {}: {} rows, {} records, {} dropped",
            sheet.name,
            stats.rows_seen,
            stats.records,
            stats.dropped_total()
        );
        self.summary.absorb_sheet(&stats);
        Some(stats)
    }

    pub fn finish(mut self) -> Normalized {
        tracing::debug!("Issued {} record ids", self.ids.issued());
        self.summary.finish(&self.records);
        Normalized {
            records: self.records,
            summary: self.summary,
        }
    }
}

/// Fails on the first input that does not exist, before anything is read.
pub fn verify_inputs(paths: &[PathBuf]) -> Result<(), AppError> {
    for path in paths {
        if !path.is_file() {
            tracing::error!("Input file not found: {}", path.display());
            return Err(AppError::InputNotFound(path.clone()));
        }
    }
    Ok(())
}

pub fn normalize_files(config: &Config) -> Result<Normalized, AppError> {
    verify_inputs(&config.inputs)?;

    let mut normalizer = Normalizer::new(config.header, &config.defaults);
    for path in &config.inputs {
        normalizer.add_file(path)?;
    }
    Ok(normalizer.finish())
}

/// Full run: read every input, write the records and the optional summary.
pub fn run(config: &Config) -> Result<RunSummary, AppError> {
    let start = std::time::Instant::now();
    let Normalized { records, summary } = normalize_files(config)?;

    if records.is_empty() {
        tracing::warn!("No valid items found in the input files");
    }
    write_records(&config.output, &records, config.delimiter)?;
    if let Some(path) = &config.summary {
        write_summary(path, &summary)?;
    }

    log_summary(&summary);
    tracing::info!("Total processing completed in {:?}", start.elapsed());
    Ok(summary)
}

fn log_summary(summary: &RunSummary) {
    tracing::info!(
        "{} files, {} sheets ({} skipped), {} rows, {} records written",
        summary.files_processed,
        summary.sheets_processed,
        summary.sheets_skipped,
        summary.rows_seen,
        summary.records_written
    );
    for (reason, count) in &summary.dropped {
        tracing::info!("Dropped {} rows: {}", count, reason);
    }
    if let Some(average) = summary.average_rate {
        tracing::info!("Average rate: {:.2}", average);
    }
    for (subcategory, count) in &summary.subcategories {
        tracing::debug!("Subcategory {}: {}", subcategory, count);
    }
}
