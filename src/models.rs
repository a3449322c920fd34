//! Core data models for phishlex
//!
//! These models flow through every stage of the pipeline: the loader
//! produces [`RawRecord`]s, the feature stage turns each one into a
//! [`FeatureRecord`], and the reporters render a [`FeatureDataset`].

use crate::triggers::TriggerCategory;
use serde::{Deserialize, Serialize};

/// Label assigned to every record when the corpus does not configure one.
pub const DEFAULT_LABEL: &str = "ai_phish";

/// One email as read from disk. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// File stem, unique within a corpus
    pub id: String,
    /// Remainder of the first `header:` line, or empty
    pub subject: String,
    /// Whole file content, trimmed, invalid UTF-8 dropped
    pub body: String,
    pub source_file: String,
    pub label: String,
}

impl RawRecord {
    /// Subject and body joined the way every text stage consumes them.
    pub fn combined_text(&self) -> String {
        let mut combined = String::with_capacity(self.subject.len() + self.body.len() + 1);
        combined.push_str(&self.subject);
        combined.push('\n');
        combined.push_str(&self.body);
        combined
    }
}

/// Hit counts for one trigger category on one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: TriggerCategory,
    pub token_hits: usize,
    pub phrase_hits: usize,
    /// `token_hits + 2 * phrase_hits`
    pub score: usize,
    /// `100 * score / max(word_count, 1)`
    pub rate_per_100w: f64,
}

impl CategoryScore {
    /// Build a score from raw hit counts, deriving the composite fields.
    pub fn from_hits(
        category: TriggerCategory,
        token_hits: usize,
        phrase_hits: usize,
        word_count: usize,
    ) -> Self {
        let score = token_hits + 2 * phrase_hits;
        let rate_per_100w = 100.0 * score as f64 / word_count.max(1) as f64;
        Self {
            category,
            token_hits,
            phrase_hits,
            score,
            rate_per_100w,
        }
    }
}

/// Derived lexical features for one email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub id: String,
    pub label: String,
    pub word_count: usize,
    pub char_count: usize,
    pub subject_len: usize,
    pub url_count: usize,
    pub has_url: bool,
    pub has_obfuscation: bool,
    /// One entry per category, in [`TriggerCategory::ALL`] order
    pub triggers: Vec<CategoryScore>,
}

impl FeatureRecord {
    /// Score for a single category.
    pub fn category(&self, category: TriggerCategory) -> &CategoryScore {
        &self.triggers[category.index()]
    }
}

/// Corpus-level aggregates reported after a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub records: usize,
    /// Files that failed to read and were left out
    pub skipped: usize,
    pub header_found_pct: f64,
    pub pct_has_url: f64,
    pub mean_url_count: f64,
    pub pct_has_obfuscation: f64,
    /// Mean `rate_per_100w` per category, in [`TriggerCategory::ALL`] order
    pub mean_rate_per_100w: Vec<CategoryMean>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMean {
    pub category: TriggerCategory,
    pub mean: f64,
}

impl CorpusSummary {
    /// Aggregate a finished feature set. A record counts as having a header
    /// when its subject is non-empty.
    pub fn from_features(features: &[FeatureRecord], skipped: usize) -> Self {
        let n = features.len();
        let ratio = |count: usize| if n == 0 { 0.0 } else { count as f64 / n as f64 };

        let headers = features.iter().filter(|f| f.subject_len > 0).count();
        let with_url = features.iter().filter(|f| f.has_url).count();
        let obfuscated = features.iter().filter(|f| f.has_obfuscation).count();
        let urls: usize = features.iter().map(|f| f.url_count).sum();

        let mean_rate_per_100w = TriggerCategory::ALL
            .iter()
            .map(|&category| {
                let total: f64 = features
                    .iter()
                    .map(|f| f.category(category).rate_per_100w)
                    .sum();
                CategoryMean {
                    category,
                    mean: if n == 0 { 0.0 } else { total / n as f64 },
                }
            })
            .collect();

        Self {
            records: n,
            skipped,
            header_found_pct: ratio(headers),
            pct_has_url: ratio(with_url),
            mean_url_count: ratio(urls),
            pct_has_obfuscation: ratio(obfuscated),
            mean_rate_per_100w,
        }
    }

    pub fn mean_rate(&self, category: TriggerCategory) -> f64 {
        self.mean_rate_per_100w
            .iter()
            .find(|m| m.category == category)
            .map_or(0.0, |m| m.mean)
    }
}

/// The full output of one extraction run. Regenerated from scratch every time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureDataset {
    pub generated_at: String,
    pub label: String,
    pub summary: CorpusSummary,
    pub records: Vec<FeatureRecord>,
}
