//! Extract command - corpus directory to feature dataset

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use crate::corpus::{DuplicatePolicy, LoadOptions};
use crate::pipeline::{Pipeline, DEFAULT_WORKERS};
use crate::reporters::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

/// Flags of `phishlex extract`
#[derive(Args, Debug, Default, Clone)]
pub struct ExtractArgs {
    /// Output format: text, json, jsonl, csv, markdown (or md). Default: text
    #[arg(long, short = 'f', value_parser = ["text", "json", "jsonl", "csv", "markdown", "md"])]
    pub format: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Label stamped on every record (default: ai_phish)
    #[arg(long)]
    pub label: Option<String>,

    /// Extension of email files, without the dot (default: txt)
    #[arg(long)]
    pub extension: Option<String>,

    /// Fail on unreadable files or invalid UTF-8 instead of skipping
    #[arg(long)]
    pub strict: bool,

    /// Files sharing a base name: keep-first, keep-last, reject
    #[arg(long)]
    pub duplicate_ids: Option<DuplicatePolicy>,

    /// Config file (default: phishlex.toml or .phishlexrc.json in the corpus directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// No progress bar or status lines
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl ExtractArgs {
    /// Loader options: CLI flags over config values over defaults.
    fn load_options(&self, config: &ProjectConfig) -> LoadOptions {
        let mut options = config.load_options();
        if let Some(ref label) = self.label {
            options.label = label.clone();
        }
        if let Some(ref ext) = self.extension {
            options.extension = ext.trim_start_matches('.').to_string();
        }
        if self.strict {
            options.strict = true;
        }
        if let Some(policy) = self.duplicate_ids {
            options.duplicates = policy;
        }
        options
    }

    fn format(&self, config: &ProjectConfig) -> Result<OutputFormat> {
        let name = self
            .format
            .as_deref()
            .or(config.defaults.format.as_deref())
            .unwrap_or("text");
        OutputFormat::from_str(name)
    }
}

/// Resolve the config: an explicit file must load, a discovered one may not exist.
pub(super) fn resolve_config(dir: &Path, explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => Ok(load_config_file(path)?),
        None => Ok(load_project_config(dir)),
    }
}

/// Run the extract command
pub fn run(path: &Path, workers: Option<usize>, args: &ExtractArgs) -> Result<()> {
    let config = resolve_config(path, args.config.as_deref())?;
    let options = args.load_options(&config);
    let format = args.format(&config)?;
    let workers = workers
        .or(config.defaults.workers)
        .unwrap_or(DEFAULT_WORKERS)
        .clamp(1, 64);

    let pipeline = Pipeline::new(config.rule_set()?)
        .with_options(options)
        .with_workers(workers);

    let files = pipeline
        .files(path)
        .with_context(|| format!("Cannot read corpus at {}", path.display()))?;
    info!("Found {} email files in {}", files.len(), path.display());

    let show_progress = !args.quiet && Term::stderr().is_term();
    let bar = if show_progress {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(create_bar_style());
        bar.set_message("Extracting features...");
        Some(bar)
    } else {
        None
    };

    let pipeline = match bar.clone() {
        Some(bar) => pipeline.with_progress(move |done, _| bar.set_position(done as u64)),
        None => pipeline,
    };

    let dataset = pipeline.run_files(&files)?;

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let rendered = reporters::report_with_format(&dataset, format)?;

    match args.output {
        Some(ref out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(out, &rendered)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            if !args.quiet {
                eprintln!(
                    "{} Wrote {} records ({}) to {}",
                    style("✓").green(),
                    dataset.records.len(),
                    format,
                    style(out.display()).cyan()
                );
            }
        }
        None => print!("{}", rendered),
    }

    if dataset.summary.skipped > 0 && !args.quiet {
        eprintln!(
            "{} Skipped {} unreadable file(s); rerun with --log-level warn for details",
            style("!").yellow(),
            dataset.summary.skipped
        );
    }

    Ok(())
}

/// Create bar progress style
fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ")
}
