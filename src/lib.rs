//! phishlex - lexical feature extraction for phishing email corpora
//!
//! Reads a directory of plain-text emails and derives per-email features:
//! word and character counts, URL counts (with defanged links restored),
//! an obfuscation flag and hit counts for six persuasion-cue categories.
//!
//! ```no_run
//! use phishlex::pipeline::Pipeline;
//! use phishlex::triggers::RuleSet;
//!
//! let dataset = Pipeline::new(RuleSet::builtin())
//!     .run(std::path::Path::new("emails"))?;
//! println!("{} records", dataset.summary.records);
//! # Ok::<(), phishlex::pipeline::PipelineError>(())
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod models;
pub mod pipeline;
pub mod reporters;
pub mod text;
pub mod triggers;
pub mod urls;
