//! Text (terminal) reporter with colors and formatting

use crate::models::{FeatureDataset, FeatureRecord};
use crate::triggers::TriggerCategory;
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Records listed in the "most triggered" table
const TOP_RECORDS: usize = 10;

/// Render dataset summary as formatted terminal output
pub fn render(dataset: &FeatureDataset) -> Result<String> {
    let mut out = String::new();
    let s = &dataset.summary;

    out.push_str(&format!("\n{BOLD}phishlex feature extraction{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Records: {BOLD}{}{RESET}  Skipped: {}  Label: {}\n",
        s.records, s.skipped, dataset.label
    ));
    out.push_str(&format!(
        "Header found: {}  With URL: {}  Obfuscated: {}  Mean URLs: {:.2}\n\n",
        pct(s.header_found_pct),
        pct(s.pct_has_url),
        pct(s.pct_has_obfuscation),
        s.mean_url_count
    ));

    out.push_str(&format!("{BOLD}MEAN RATE PER 100 WORDS{RESET}\n"));
    for category in TriggerCategory::ALL {
        out.push_str(&format!(
            "  {:<15} {:>7.2}\n",
            category.name(),
            s.mean_rate(category)
        ));
    }
    out.push('\n');

    if !dataset.records.is_empty() {
        out.push_str(&format!("{BOLD}MOST TRIGGERED{RESET}\n"));
        out.push_str(&format!(
            "{DIM}  ID                        WORDS  SCORE  TOP CATEGORY{RESET}\n"
        ));

        let mut ranked: Vec<&FeatureRecord> = dataset.records.iter().collect();
        ranked.sort_by(|a, b| total_score(b).cmp(&total_score(a)).then(a.id.cmp(&b.id)));

        for record in ranked.iter().take(TOP_RECORDS) {
            let id: String = record.id.chars().take(24).collect();
            let flag = if record.has_obfuscation {
                format!(" {RED}obfuscated{RESET}")
            } else {
                String::new()
            };
            out.push_str(&format!(
                "  {:<24}  {:>5}  {YELLOW}{:>5}{RESET}  {}{}\n",
                id,
                record.word_count,
                total_score(record),
                top_category(record),
                flag
            ));
        }

        let remaining = dataset.records.len().saturating_sub(TOP_RECORDS);
        if remaining > 0 {
            out.push_str(&format!(
                "\n  {DIM}...and {} more (use --format csv or json for all records){RESET}\n",
                remaining
            ));
        }
        out.push('\n');
    }

    Ok(out)
}

fn pct(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn total_score(record: &FeatureRecord) -> usize {
    record.triggers.iter().map(|t| t.score).sum()
}

fn top_category(record: &FeatureRecord) -> String {
    record
        .triggers
        .iter()
        .filter(|t| t.score > 0)
        .max_by(|a, b| a.score.cmp(&b.score).then(b.category.cmp(&a.category)))
        .map(|t| format!("{} ({})", t.category, t.score))
        .unwrap_or_else(|| "-".to_string())
}
