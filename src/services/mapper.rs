//! Row to [`Record`] mapping.

use std::collections::HashMap;

use calamine::Data;

use super::classifier::classify;
use super::excel::utils::{clean_cell, clean_text, extract_rate, is_empty_row, is_generic_sheet_name};
use crate::config::MappingDefaults;
use crate::models::{DropReason, Record};

// Candidate column names per field, in priority order.
const CODE_COLUMNS: &[&str] = &["Code", "Item Code", "SKU", "Ref", "Ref."];
const DESCRIPTION_COLUMNS: &[&str] = &["Description", "Item Description", "Product"];
const UNIT_COLUMNS: &[&str] = &["Unit", "UOM"];
const RATE_COLUMNS: &[&str] = &["Rate", "Price", "Unit Price"];
const SUBCATEGORY_COLUMNS: &[&str] = &["Category", "Type"];
const MATERIAL_TYPE_COLUMNS: &[&str] = &["Material", "Material Type"];
const MATERIAL_SIZE_COLUMNS: &[&str] = &["Size", "Dimensions"];
const BRAND_COLUMNS: &[&str] = &["Brand", "Manufacturer"];
const SUPPLIER_COLUMNS: &[&str] = &["Supplier", "Vendor"];
const REMARK_COLUMNS: &[&str] = &["Remarks", "Notes", "Remark"];

/// Header labels of one sheet, looked up case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn new(labels: Vec<String>) -> Self {
        let mut positions = HashMap::new();
        for (idx, label) in labels.iter().enumerate() {
            let key = clean_text(label).to_lowercase();
            if key.is_empty() {
                continue;
            }
            // Duplicate labels: the leftmost column wins.
            positions.entry(key).or_insert(idx);
        }
        Self { labels, positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(&clean_text(name).to_lowercase()).copied()
    }

    pub fn label(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    /// True when at least one candidate column for the field exists.
    pub fn has_any(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|name| self.position(name).is_some())
    }

    pub fn has_description(&self) -> bool {
        self.has_any(DESCRIPTION_COLUMNS)
    }

    pub fn has_rate(&self) -> bool {
        self.has_any(RATE_COLUMNS)
    }
}

/// Hands out `<PREFIX>_<NNNN>` ids, strictly increasing for the whole run.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: String,
    next: u32,
}

impl IdSequence {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("{}_{:04}", self.prefix, self.next);
        self.next += 1;
        id
    }

    pub fn issued(&self) -> u32 {
        self.next - 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Mapped(Record),
    Dropped(DropReason),
}

/// Category for every record of a sheet: its name, unless the name is a
/// generic default like "Sheet1".
pub fn sheet_category(sheet_name: &str, defaults: &MappingDefaults) -> String {
    let name = clean_text(sheet_name);
    if name.is_empty() || is_generic_sheet_name(&name) {
        defaults.category.clone()
    } else {
        name
    }
}

pub struct FieldMapper<'a> {
    defaults: &'a MappingDefaults,
}

impl<'a> FieldMapper<'a> {
    pub fn new(defaults: &'a MappingDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &'a MappingDefaults {
        self.defaults
    }

    /// Maps one data row. Ids are only drawn for rows that are kept.
    pub fn map_row(
        &self,
        row: &[Data],
        columns: &ColumnIndex,
        category: &str,
        ids: &mut IdSequence,
    ) -> RowOutcome {
        if is_empty_row(row) {
            return RowOutcome::Dropped(DropReason::EmptyRow);
        }

        let Some((desc_idx, description)) = find_value(row, columns, DESCRIPTION_COLUMNS) else {
            return RowOutcome::Dropped(DropReason::MissingDescription);
        };

        if columns
            .label(desc_idx)
            .is_some_and(|label| label.eq_ignore_ascii_case(&description))
        {
            return RowOutcome::Dropped(DropReason::RepeatedHeader);
        }

        let rate = find_cell(row, columns, RATE_COLUMNS)
            .map(extract_rate)
            .unwrap_or(0.0);
        if rate <= 0.0 {
            return RowOutcome::Dropped(DropReason::NonPositiveRate);
        }

        let text = |candidates: &[&str]| find_value(row, columns, candidates).map(|(_, value)| value);
        let inferred = classify(&description);

        RowOutcome::Mapped(Record {
            id: ids.next_id(),
            code: text(CODE_COLUMNS).unwrap_or_default(),
            unit: text(UNIT_COLUMNS).unwrap_or_else(|| self.defaults.unit.clone()),
            rate,
            category: category.to_string(),
            subcategory: text(SUBCATEGORY_COLUMNS).unwrap_or(inferred.subcategory),
            material_type: text(MATERIAL_TYPE_COLUMNS).unwrap_or(inferred.material_type),
            material_size: text(MATERIAL_SIZE_COLUMNS).unwrap_or(inferred.material_size),
            brand: text(BRAND_COLUMNS).unwrap_or_default(),
            supplier: text(SUPPLIER_COLUMNS).unwrap_or_else(|| self.defaults.supplier.clone()),
            remark: text(REMARK_COLUMNS).unwrap_or_default(),
            description,
            is_active: true,
        })
    }
}

/// First candidate column that exists and holds a non-empty cleaned value.
fn find_value(row: &[Data], columns: &ColumnIndex, candidates: &[&str]) -> Option<(usize, String)> {
    candidates.iter().find_map(|name| {
        let idx = columns.position(name)?;
        let value = clean_cell(row.get(idx)?);
        (!value.is_empty()).then_some((idx, value))
    })
}

fn find_cell<'r>(row: &'r [Data], columns: &ColumnIndex, candidates: &[&str]) -> Option<&'r Data> {
    candidates.iter().find_map(|name| {
        let cell = row.get(columns.position(name)?)?;
        (!clean_cell(cell).is_empty()).then_some(cell)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> Data {
        Data::String(value.to_string())
    }

    fn columns(labels: &[&str]) -> ColumnIndex {
        ColumnIndex::new(labels.iter().map(|l| l.to_string()).collect())
    }

    fn map(row: &[Data], cols: &ColumnIndex) -> RowOutcome {
        let defaults = MappingDefaults::default();
        let mut ids = IdSequence::new("FENCE");
        FieldMapper::new(&defaults).map_row(row, cols, "Fencing", &mut ids)
    }

    fn mapped(outcome: RowOutcome) -> Record {
        match outcome {
            RowOutcome::Mapped(record) => record,
            RowOutcome::Dropped(reason) => panic!("row dropped: {reason}"),
        }
    }

    #[test]
    fn maps_primary_columns() {
        let cols = columns(&["Code", "Description", "Unit", "Rate", "Brand", "Notes"]);
        let record = mapped(map(
            &[s("F-01"), s(" Timber  Post\n100x100 "), s("EA"), s("£25.00"), s("Jacksons"), s("nan")],
            &cols,
        ));

        assert_eq!(record.id, "FENCE_0001");
        assert_eq!(record.code, "F-01");
        assert_eq!(record.description, "Timber Post 100x100");
        assert_eq!(record.unit, "EA");
        assert_eq!(record.rate, 25.0);
        assert_eq!(record.category, "Fencing");
        assert_eq!(record.subcategory, "Posts");
        assert_eq!(record.material_type, "Timber");
        assert_eq!(record.brand, "Jacksons");
        assert_eq!(record.remark, "");
        assert!(record.is_active);
    }

    #[test]
    fn falls_through_aliases_in_order() {
        let cols = columns(&["Item Description", "Product", "Unit Price", "UOM", "SKU", "Manufacturer"]);
        let record = mapped(map(
            &[Data::Empty, s("Palisade Gate"), Data::Float(450.0), s("NR"), Data::Int(7701), s("Zaun")],
            &cols,
        ));

        assert_eq!(record.description, "Palisade Gate");
        assert_eq!(record.rate, 450.0);
        assert_eq!(record.unit, "NR");
        assert_eq!(record.code, "7701");
        assert_eq!(record.brand, "Zaun");
    }

    #[test]
    fn header_lookup_ignores_case_and_padding() {
        let cols = columns(&["DESCRIPTION", " rate "]);
        let record = mapped(map(&[s("Steel rail"), s("12")], &cols));
        assert_eq!(record.rate, 12.0);
        assert_eq!(record.material_type, "Steel");
        assert_eq!(record.subcategory, "Rails");
    }

    #[test]
    fn explicit_columns_beat_inferred_values() {
        let cols = columns(&["Description", "Rate", "Type", "Material", "Size"]);
        let record = mapped(map(
            &[s("Concrete post 2400mm high"), s("45"), s("Accessories"), s("Precast"), s("125x125")],
            &cols,
        ));
        assert_eq!(record.subcategory, "Accessories");
        assert_eq!(record.material_type, "Precast");
        assert_eq!(record.material_size, "125x125");
    }

    #[test]
    fn defaults_apply_when_columns_missing() {
        let defaults = MappingDefaults {
            unit: "LM".to_string(),
            supplier: "The Fencing People".to_string(),
            ..MappingDefaults::default()
        };
        let cols = columns(&["Description", "Rate"]);
        let mut ids = IdSequence::new("FENCE");
        let record = mapped(FieldMapper::new(&defaults).map_row(
            &[s("Close boarded fence 1800mm high"), s("30")],
            &cols,
            "Fencing",
            &mut ids,
        ));

        assert_eq!(record.unit, "LM");
        assert_eq!(record.supplier, "The Fencing People");
        assert_eq!(record.material_size, "1800mm");
        assert_eq!(record.code, "");
    }

    #[test]
    fn drop_reasons() {
        let cols = columns(&["Description", "Rate"]);
        assert_eq!(map(&[Data::Empty, s("nan")], &cols), RowOutcome::Dropped(DropReason::EmptyRow));
        assert_eq!(
            map(&[s("None"), s("10")], &cols),
            RowOutcome::Dropped(DropReason::MissingDescription)
        );
        assert_eq!(
            map(&[s("description"), s("Rate")], &cols),
            RowOutcome::Dropped(DropReason::RepeatedHeader)
        );
        assert_eq!(
            map(&[s("Timber post"), s("POA")], &cols),
            RowOutcome::Dropped(DropReason::NonPositiveRate)
        );
        assert_eq!(
            map(&[s("Timber post"), Data::Float(0.0)], &cols),
            RowOutcome::Dropped(DropReason::NonPositiveRate)
        );
        assert_eq!(
            map(&[s("Timber post")], &cols),
            RowOutcome::Dropped(DropReason::NonPositiveRate)
        );
    }

    #[test]
    fn dropped_rows_do_not_consume_ids() {
        let defaults = MappingDefaults::default();
        let mapper = FieldMapper::new(&defaults);
        let cols = columns(&["Description", "Rate"]);
        let mut ids = IdSequence::new("FENCE");

        mapper.map_row(&[s("Timber post"), s("0")], &cols, "Fencing", &mut ids);
        let record = mapped(mapper.map_row(&[s("Timber post"), s("5")], &cols, "Fencing", &mut ids));

        assert_eq!(record.id, "FENCE_0001");
        assert_eq!(ids.issued(), 1);
    }

    #[test]
    fn duplicate_labels_use_leftmost_column() {
        let cols = columns(&["Description", "Rate", "Rate"]);
        let record = mapped(map(&[s("Gate"), s("100"), s("200")], &cols));
        assert_eq!(record.rate, 100.0);
    }

    #[test]
    fn sheet_category_replaces_generic_names() {
        let defaults = MappingDefaults::default();
        assert_eq!(sheet_category("Sheet1", &defaults), "Fencing");
        assert_eq!(sheet_category("  ", &defaults), "Fencing");
        assert_eq!(sheet_category("Gates & Access", &defaults), "Gates & Access");
    }

    #[test]
    fn id_sequence_pads_to_four_digits() {
        let mut ids = IdSequence::new("TFP");
        assert_eq!(ids.next_id(), "TFP_0001");
        for _ in 0..9_998 {
            ids.next_id();
        }
        assert_eq!(ids.next_id(), "TFP_10000");
    }
}
