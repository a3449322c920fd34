//! CLI command definitions and handlers

mod extract;
mod init;
mod inspect;
mod rules;

pub use extract::ExtractArgs;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// phishlex - lexical feature extraction for phishing email corpora
#[derive(Parser, Debug)]
#[command(name = "phishlex")]
#[command(
    version,
    about = "Extract lexical phishing signals (persuasion cues, URLs, obfuscation) from a directory of plain-text emails",
    long_about = "phishlex reads a directory of plain-text emails, one email per file, and \
derives per-email features: word and character counts, URL counts with defanged URLs \
restored, an obfuscation flag, and hit counts for six persuasion-cue categories.\n\n\
Run without a subcommand to extract features from the current directory:\n  \
phishlex .",
    after_help = "\
Examples:
  phishlex emails/                          Summary of a corpus
  phishlex extract emails/ -f csv -o out.csv    Feature table for analysis
  phishlex extract emails/ -f jsonl         One JSON record per line
  phishlex inspect emails/email_01.txt      Features of a single email
  phishlex rules                            List the cue words and phrases
  phishlex init emails/                     Write an example phishlex.toml"
)]
pub struct Cli {
    /// Corpus directory, or a single email for `inspect` (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Number of parallel workers (1-64, default 8)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract features from every email in a corpus directory
    #[command(after_help = "\
Examples:
  phishlex extract emails/                          Terminal summary
  phishlex extract emails/ -f csv -o features.csv   CSV table
  phishlex extract emails/ -f json                  Full dataset as JSON
  phishlex extract emails/ --label human_phish      Label records as human-written
  phishlex extract emails/ --extension eml          Read .eml files instead of .txt
  phishlex extract emails/ --strict                 Fail on unreadable or non-UTF-8 files")]
    Extract(ExtractArgs),

    /// Show the features of a single email file
    Inspect {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Config file (default: phishlex.toml next to the email)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the trigger categories and their cue words and phrases
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Config file whose overrides to apply (default: phishlex.toml in PATH)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write an example phishlex.toml into a corpus directory
    Init,
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Extract(args)) => extract::run(&cli.path, cli.workers, &args),
        Some(Commands::Inspect { json, config }) => {
            inspect::run(&cli.path, json, config.as_deref())
        }
        Some(Commands::Rules { json, config }) => rules::run(&cli.path, json, config.as_deref()),
        Some(Commands::Init) => init::run(&cli.path),
        None => extract::run(&cli.path, cli.workers, &ExtractArgs::default()),
    }
}
