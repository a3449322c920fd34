//! Output reporters for phishlex feature datasets
//!
//! Supports multiple output formats:
//! - `text` - Terminal summary with colors
//! - `json` - Full dataset as pretty-printed JSON
//! - `jsonl` - One feature record per line
//! - `csv` - Flat table, one row per email
//! - `markdown` - GitHub-flavored Markdown summary and table

mod csv;
mod json;
mod markdown;
mod text;

use crate::models::FeatureDataset;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonLines,
    Csv,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::JsonLines),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, jsonl, csv, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonLines => write!(f, "jsonl"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render a dataset using an OutputFormat enum
pub fn report_with_format(dataset: &FeatureDataset, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(dataset),
        OutputFormat::Json => json::render(dataset),
        OutputFormat::JsonLines => json::render_lines(dataset),
        OutputFormat::Csv => csv::render(dataset),
        OutputFormat::Markdown => markdown::render(dataset),
    }
}
