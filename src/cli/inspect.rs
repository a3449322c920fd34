//! Inspect command - features of a single email

use super::extract::resolve_config;
use crate::corpus::read_record;
use crate::models::FeatureRecord;
use crate::pipeline::extract_features;
use crate::urls::extract_urls;
use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct Inspection {
    source_file: String,
    subject: String,
    urls: Vec<String>,
    features: FeatureRecord,
}

/// Run the inspect command
pub fn run(path: &Path, json: bool, config: Option<&Path>) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = resolve_config(dir, config)?;
    let record = read_record(path, &config.load_options())
        .with_context(|| format!("Cannot inspect {}", path.display()))?;
    let rules = config.rule_set()?;

    let inspection = Inspection {
        urls: extract_urls(&record.combined_text()),
        features: extract_features(&record, &rules),
        source_file: record.source_file,
        subject: record.subject,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        print!("{}", render(&inspection));
    }
    Ok(())
}

fn render(inspection: &Inspection) -> String {
    let f = &inspection.features;
    let mut out = String::new();

    out.push_str(&format!(
        "\n{} {}\n",
        style(&f.id).bold(),
        style(format!("({})", inspection.source_file)).dim()
    ));
    let subject = if inspection.subject.is_empty() {
        style("(no header line)".to_string()).dim().to_string()
    } else {
        inspection.subject.clone()
    };
    out.push_str(&format!("  Subject:     {}\n", subject));
    out.push_str(&format!("  Label:       {}\n", f.label));
    out.push_str(&format!(
        "  Words:       {}  Chars: {}\n",
        f.word_count, f.char_count
    ));
    out.push_str(&format!(
        "  URLs:        {}{}\n",
        f.url_count,
        if f.has_obfuscation {
            format!("  {}", style("obfuscation detected").red())
        } else {
            String::new()
        }
    ));
    for url in &inspection.urls {
        out.push_str(&format!("    {}\n", style(url).cyan()));
    }

    out.push_str(&format!(
        "\n  {}\n",
        style("CATEGORY         TOKENS  PHRASES  SCORE  PER 100W").dim()
    ));
    for t in &f.triggers {
        out.push_str(&format!(
            "  {:<15}  {:>6}  {:>7}  {:>5}  {:>8.2}\n",
            t.category.name(),
            t.token_hits,
            t.phrase_hits,
            t.score,
            t.rate_per_100w
        ));
    }

    out.push('\n');
    out
}
