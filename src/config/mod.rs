//! Configuration module for phishlex
//!
//! Loads per-corpus configuration from `phishlex.toml` or `.phishlexrc.json`
//! in the corpus directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # phishlex.toml
//!
//! [corpus]
//! label = "ai_phish"
//! extension = "txt"
//! strict = false
//! duplicate_ids = "keep-first"
//!
//! [triggers.urgency]
//! tokens = ["urgent", "now", "hurry"]
//! phrases = ["act now"]
//!
//! [defaults]
//! format = "csv"
//! workers = 8
//! ```
//!
//! Precedence: CLI flags, then this file, then built-in defaults.

use crate::corpus::{DuplicatePolicy, LoadOptions, DEFAULT_EXTENSION};
use crate::models::DEFAULT_LABEL;
use crate::triggers::{RuleError, RuleSet, TriggerCategory, TriggerRule};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Config file names probed in a corpus directory, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["phishlex.toml", ".phishlexrc.json"];

/// Errors raised while loading or applying configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown trigger category '{0}'. Valid categories: urgency, fear_loss, authority, action_demand, account_focus, reward_gain")]
    UnknownCategory(String),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Project-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Per-category cue replacements, keyed by category name
    #[serde(default)]
    pub triggers: BTreeMap<String, TriggerOverride>,

    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Loader settings; every field falls back to the built-in default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub strict: Option<bool>,
    #[serde(default)]
    pub duplicate_ids: Option<DuplicatePolicy>,
}

/// Replacement cues for one category. An omitted list keeps the built-in one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerOverride {
    #[serde(default)]
    pub tokens: Option<Vec<String>>,
    #[serde(default)]
    pub phrases: Option<Vec<String>>,
}

/// CLI defaults that can be set per corpus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliDefaults {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl ProjectConfig {
    /// Loader options with config values applied over the defaults.
    pub fn load_options(&self) -> LoadOptions {
        let base = LoadOptions::default();
        LoadOptions {
            extension: self
                .corpus
                .extension
                .as_deref()
                .map(|e| e.trim_start_matches('.').to_string())
                .unwrap_or(base.extension),
            label: self.corpus.label.clone().unwrap_or(base.label),
            strict: self.corpus.strict.unwrap_or(base.strict),
            duplicates: self.corpus.duplicate_ids.unwrap_or(base.duplicates),
        }
    }

    /// The built-in rule set with this config's overrides applied.
    pub fn rule_set(&self) -> Result<RuleSet, ConfigError> {
        let builtin = RuleSet::builtin();
        let mut overrides = Vec::with_capacity(self.triggers.len());

        for (name, over) in &self.triggers {
            let category = TriggerCategory::from_name(name)
                .ok_or_else(|| ConfigError::UnknownCategory(name.clone()))?;
            let base = builtin.rule(category);

            let tokens = over.tokens.as_ref().unwrap_or(&base.tokens);
            let phrases = over.phrases.as_ref().unwrap_or(&base.phrases);
            overrides.push(TriggerRule::new(category, tokens, phrases)?);
        }

        Ok(builtin.with_overrides(overrides))
    }
}

/// Load project config from a corpus directory.
///
/// Missing files give the default config; unreadable or invalid files are
/// logged and ignored.
pub fn load_project_config(corpus_dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = corpus_dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Ignoring config: {}", e);
            }
        }
    }

    debug!("No project config in {}, using defaults", corpus_dir.display());
    ProjectConfig::default()
}

/// Load an explicit config file. Format is picked by extension: `.json` is
/// JSON, anything else TOML.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Commented example written by `phishlex init`
pub fn example_config() -> String {
    format!(
        r#"# phishlex configuration
# Values here apply to this corpus directory. CLI flags take precedence.

[corpus]
# Label stamped on every record
label = "{DEFAULT_LABEL}"

# Extension of email files (case-insensitive)
extension = "{DEFAULT_EXTENSION}"

# Fail on unreadable files or invalid UTF-8 instead of skipping / dropping bytes
strict = false

# Two files with the same base name: keep-first, keep-last, or reject
duplicate_ids = "keep-first"

# Replace the cues of a trigger category. Omitted lists keep the built-in cues.
# Categories: urgency, fear_loss, authority, action_demand, account_focus, reward_gain
#
# [triggers.reward_gain]
# tokens = ["winner", "prize", "lottery"]
# phrases = ["you have won"]

[defaults]
# Output format: text, json, jsonl, csv, markdown
format = "text"

# Parallel workers (1-64)
workers = 8
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        let options = config.load_options();
        assert_eq!(options.extension, "txt");
        assert_eq!(options.label, "ai_phish");
        assert!(!options.strict);
        assert_eq!(options.duplicates, DuplicatePolicy::KeepFirst);
        assert_eq!(config.rule_set().unwrap(), RuleSet::builtin());
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
[corpus]
label = "human_phish"
extension = ".EML"
strict = true
duplicate_ids = "reject"

[triggers.urgency]
tokens = ["Hurry", "now"]

[defaults]
format = "csv"
workers = 4
"#;
        let config: ProjectConfig = toml::from_str(toml_str).unwrap();
        let options = config.load_options();
        assert_eq!(options.label, "human_phish");
        assert_eq!(options.extension, "EML");
        assert!(options.strict);
        assert_eq!(options.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.defaults.format.as_deref(), Some("csv"));
        assert_eq!(config.defaults.workers, Some(4));

        let rules = config.rule_set().unwrap();
        let urgency = rules.rule(TriggerCategory::Urgency);
        assert_eq!(urgency.tokens, vec!["hurry", "now"]);
        // phrases were not overridden
        assert_eq!(
            urgency.phrases,
            RuleSet::builtin().rule(TriggerCategory::Urgency).phrases
        );
    }

    #[test]
    fn test_unknown_category() {
        let config: ProjectConfig = toml::from_str("[triggers.greed]\ntokens = [\"money\"]").unwrap();
        assert!(matches!(
            config.rule_set(),
            Err(ConfigError::UnknownCategory(ref name)) if name == "greed"
        ));
    }

    #[test]
    fn test_invalid_override_cue() {
        let config: ProjectConfig =
            toml::from_str("[triggers.authority]\ntokens = [\"help desk\"]").unwrap();
        assert!(matches!(config.rule_set(), Err(ConfigError::Rule(_))));
    }

    #[test]
    fn test_example_config_parses() {
        let config: ProjectConfig = toml::from_str(&example_config()).unwrap();
        assert_eq!(config.load_options().label, DEFAULT_LABEL);
        assert_eq!(config.defaults.workers, Some(8));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_project_config(dir.path()), ProjectConfig::default());

        std::fs::write(
            dir.path().join(".phishlexrc.json"),
            r#"{"corpus": {"label": "from_json"}}"#,
        )
        .unwrap();
        assert_eq!(
            load_project_config(dir.path()).corpus.label.as_deref(),
            Some("from_json")
        );

        std::fs::write(dir.path().join("phishlex.toml"), "[corpus]\nlabel = \"from_toml\"\n")
            .unwrap();
        assert_eq!(
            load_project_config(dir.path()).corpus.label.as_deref(),
            Some("from_toml")
        );
    }

    #[test]
    fn test_invalid_implicit_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("phishlex.toml"), "corpus = [not valid").unwrap();
        assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
    }

    #[test]
    fn test_explicit_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_file(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
