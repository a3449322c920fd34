//! Feature extraction pipeline
//!
//! Orchestrates a full run over a corpus directory:
//! 1. List and sort the corpus files
//! 2. Read each file and derive its features (parallel, one task per file)
//! 3. Collect results in file-name order
//! 4. Apply the skip / strict policy and the duplicate-id policy
//! 5. Summarize the corpus
//!
//! Workers share the rule set by reference and never write shared state,
//! so the only synchronization is the progress counter.

mod features;

pub use features::extract_features;

use crate::corpus::{
    list_corpus_files, read_record, resolve_duplicates, CorpusError, LoadOptions,
};
use crate::models::{CorpusSummary, FeatureDataset, FeatureRecord};
use crate::triggers::RuleSet;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default number of worker threads
pub const DEFAULT_WORKERS: usize = 8;

/// Errors that abort a pipeline run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Progress callback: `(completed, total)`
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

/// One record that made it through the parallel stage
struct Extracted {
    features: FeatureRecord,
    source_file: String,
}

/// Corpus-to-dataset pipeline.
pub struct Pipeline {
    rules: RuleSet,
    options: LoadOptions,
    workers: usize,
    progress: Option<ProgressCallback>,
}

impl Pipeline {
    /// Create a pipeline with default load options.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            options: LoadOptions::default(),
            workers: DEFAULT_WORKERS,
            progress: None,
        }
    }

    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the worker count (at least 1).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Report progress as files complete.
    pub fn with_progress(mut self, callback: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    /// List the corpus files this pipeline would process.
    pub fn files(&self, dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
        Ok(list_corpus_files(dir, &self.options.extension)?)
    }

    /// Run the pipeline over a corpus directory.
    pub fn run(&self, dir: &Path) -> Result<FeatureDataset, PipelineError> {
        let files = self.files(dir)?;
        self.run_files(&files)
    }

    /// Run the pipeline over an explicit, already sorted file list.
    pub fn run_files(&self, files: &[PathBuf]) -> Result<FeatureDataset, PipelineError> {
        let total = files.len();
        let completed = AtomicUsize::new(0);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;

        debug!("Extracting features from {} files on {} workers", total, self.workers);

        // Indexed collect keeps file order regardless of scheduling
        let results: Vec<Result<Extracted, CorpusError>> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let result = read_record(path, &self.options).map(|record| Extracted {
                        features: extract_features(&record, &self.rules),
                        source_file: record.source_file,
                    });

                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(ref callback) = self.progress {
                        callback(done, total);
                    }

                    result
                })
                .collect()
        });

        let mut extracted = Vec::with_capacity(results.len());
        let mut skipped = 0;
        for result in results {
            match result {
                Ok(item) => extracted.push(item),
                Err(e) if self.options.strict => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping {}", e);
                    skipped += 1;
                }
            }
        }

        let extracted = resolve_duplicates(
            extracted,
            |item| (item.features.id.as_str(), item.source_file.as_str()),
            self.options.duplicates,
        )?;
        let records: Vec<FeatureRecord> = extracted.into_iter().map(|e| e.features).collect();

        let summary = CorpusSummary::from_features(&records, skipped);
        info!(
            "Extracted features for {} records ({} skipped)",
            summary.records, summary.skipped
        );

        Ok(FeatureDataset {
            generated_at: chrono::Utc::now().to_rfc3339(),
            label: self.options.label.clone(),
            summary,
            records,
        })
    }
}
