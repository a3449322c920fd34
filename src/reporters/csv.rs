//! CSV reporter
//!
//! One row per email. Trigger columns are flattened as
//! `<category>_token_hits`, `<category>_phrase_hits`, `<category>_score`,
//! `<category>_rate_per_100w` in canonical category order. Booleans are 0/1.

use crate::models::{FeatureDataset, FeatureRecord};
use crate::triggers::TriggerCategory;
use anyhow::Result;

const BASE_COLUMNS: &[&str] = &[
    "id",
    "label",
    "word_count",
    "char_count",
    "subject_len",
    "url_count",
    "has_url",
    "has_obfuscation",
];

const CATEGORY_SUFFIXES: &[&str] = &["token_hits", "phrase_hits", "score", "rate_per_100w"];

/// Column names in output order
pub fn header() -> Vec<String> {
    let mut cols: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
    for category in TriggerCategory::ALL {
        for suffix in CATEGORY_SUFFIXES {
            cols.push(format!("{}_{}", category.name(), suffix));
        }
    }
    cols
}

/// Render dataset as CSV
pub fn render(dataset: &FeatureDataset) -> Result<String> {
    let mut out = String::new();
    out.push_str(&header().join(","));
    out.push('\n');
    for record in &dataset.records {
        out.push_str(&row(record).join(","));
        out.push('\n');
    }
    Ok(out)
}

fn row(record: &FeatureRecord) -> Vec<String> {
    let mut fields = vec![
        escape(&record.id),
        escape(&record.label),
        record.word_count.to_string(),
        record.char_count.to_string(),
        record.subject_len.to_string(),
        record.url_count.to_string(),
        u8::from(record.has_url).to_string(),
        u8::from(record.has_obfuscation).to_string(),
    ];
    for category in TriggerCategory::ALL {
        let s = record.category(category);
        fields.push(s.token_hits.to_string());
        fields.push(s.phrase_hits.to_string());
        fields.push(s.score.to_string());
        fields.push(s.rate_per_100w.to_string());
    }
    fields
}

/// Quote a field when it contains a delimiter, quote or line break.
fn escape(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
