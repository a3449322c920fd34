//! Markdown reporter for GitHub-flavored Markdown output
//!
//! A summary section followed by a per-record table, suitable for
//! notebooks, pull request comments or research notes.

use crate::models::FeatureDataset;
use crate::triggers::TriggerCategory;
use anyhow::Result;

/// Render dataset as GitHub-flavored Markdown
pub fn render(dataset: &FeatureDataset) -> Result<String> {
    let mut md = String::new();
    let s = &dataset.summary;

    md.push_str("# Phishing Signal Report\n\n");
    md.push_str(&format!(
        "*Generated {} for label `{}`*\n\n",
        dataset.generated_at, dataset.label
    ));

    md.push_str("## Summary\n\n");
    md.push_str("| Metric | Value |\n|--------|-------|\n");
    md.push_str(&format!("| Records | {} |\n", s.records));
    md.push_str(&format!("| Skipped files | {} |\n", s.skipped));
    md.push_str(&format!("| Header found | {:.1}% |\n", s.header_found_pct * 100.0));
    md.push_str(&format!("| Has URL | {:.1}% |\n", s.pct_has_url * 100.0));
    md.push_str(&format!("| Mean URL count | {:.2} |\n", s.mean_url_count));
    md.push_str(&format!(
        "| Has obfuscation | {:.1}% |\n\n",
        s.pct_has_obfuscation * 100.0
    ));

    md.push_str("## Mean Rate per 100 Words\n\n");
    md.push_str("| Category | Rate |\n|----------|------|\n");
    for category in TriggerCategory::ALL {
        md.push_str(&format!(
            "| {} | {:.2} |\n",
            category.name(),
            s.mean_rate(category)
        ));
    }
    md.push('\n');

    md.push_str("## Records\n\n");
    md.push_str("| ID | Words | URLs | Obfuscated |");
    for category in TriggerCategory::ALL {
        md.push_str(&format!(" {} |", category.name()));
    }
    md.push_str("\n|----|-------|------|------------|");
    for _ in TriggerCategory::ALL {
        md.push_str("------|");
    }
    md.push('\n');

    for record in &dataset.records {
        md.push_str(&format!(
            "| `{}` | {} | {} | {} |",
            record.id.replace('|', "\\|"),
            record.word_count,
            record.url_count,
            if record.has_obfuscation { "yes" } else { "no" }
        ));
        for t in &record.triggers {
            md.push_str(&format!(" {} |", t.score));
        }
        md.push('\n');
    }

    Ok(md)
}
