//! JSON reporters
//!
//! `render` outputs the whole dataset (metadata, summary, records) as
//! pretty-printed JSON. `render_lines` emits one compact FeatureRecord per
//! line for streaming consumers.

use crate::models::FeatureDataset;
use anyhow::Result;

/// Render dataset as JSON
pub fn render(dataset: &FeatureDataset) -> Result<String> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

/// Render records as JSON Lines
pub fn render_lines(dataset: &FeatureDataset) -> Result<String> {
    let mut out = String::new();
    for record in &dataset.records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    Ok(out)
}
