//! Keyword enrichment for free-text descriptions.
//!
//! Best effort only: the first keyword found (in table order) decides the
//! label, and no match leaves the field empty.

use once_cell::sync::Lazy;
use regex::Regex;

const MATERIAL_TYPES: [(&str, &str); 5] = [
    ("concrete", "Concrete"),
    ("timber", "Timber"),
    ("chain link", "Chain Link"),
    ("palisade", "Palisade"),
    ("steel", "Steel"),
];

const SUBCATEGORIES: [(&str, &str); 4] = [
    ("post", "Posts"),
    ("gate", "Gates"),
    ("panel", "Panels"),
    ("rail", "Rails"),
];

static HEIGHT_MM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*mm\s+high").expect("valid height regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub material_type: String,
    pub subcategory: String,
    pub material_size: String,
}

pub fn classify(description: &str) -> Classification {
    let lowered = description.to_lowercase();
    Classification {
        material_type: first_match(&lowered, &MATERIAL_TYPES),
        subcategory: first_match(&lowered, &SUBCATEGORIES),
        material_size: extract_height(description),
    }
}

fn first_match(lowered: &str, table: &[(&str, &str)]) -> String {
    table
        .iter()
        .find(|(keyword, _)| lowered.contains(*keyword))
        .map(|(_, label)| label.to_string())
        .unwrap_or_default()
}

/// "2000mm high" -> "2000mm".
fn extract_height(description: &str) -> String {
    HEIGHT_MM
        .captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{}mm", m.as_str()))
        .unwrap_or_default()
}
