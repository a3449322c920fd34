//! Corpus loading
//!
//! A corpus is a flat directory of text files, one email per file. Files are
//! enumerated non-recursively, filtered by extension (case-insensitive) and
//! sorted by file name so every run sees the same order.

mod header;

pub use header::extract_subject;

use crate::models::{RawRecord, DEFAULT_LABEL};
use ignore::WalkBuilder;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default text file extension
pub const DEFAULT_EXTENSION: &str = "txt";

/// Errors that can occur while loading a corpus
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("no .{extension} files found in {}", .dir.display())]
    Empty { dir: PathBuf, extension: String },

    #[error("corpus path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 (first bad byte at offset {offset})", .path.display())]
    InvalidEncoding { path: PathBuf, offset: usize },

    #[error("duplicate record id '{id}' ({first} and {second})")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },
}

pub type CorpusResult<T> = Result<T, CorpusError>;

/// What to do when two files map to the same record id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Keep the file that sorts first, skip the rest with a warning
    #[default]
    KeepFirst,
    /// Later files replace earlier ones, with a warning
    KeepLast,
    /// Abort the run
    Reject,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep-first" | "first" => Ok(DuplicatePolicy::KeepFirst),
            "keep-last" | "last" | "overwrite" => Ok(DuplicatePolicy::KeepLast),
            "reject" | "error" => Ok(DuplicatePolicy::Reject),
            _ => Err(format!(
                "unknown duplicate policy '{s}'. Valid values: keep-first, keep-last, reject"
            )),
        }
    }
}

/// Loader settings
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Extension to accept, without the dot, compared case-insensitively
    pub extension: String,
    /// Label stamped on every record
    pub label: String,
    /// Treat unreadable files as fatal instead of skipping them
    pub strict: bool,
    pub duplicates: DuplicatePolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            label: DEFAULT_LABEL.to_string(),
            strict: false,
            duplicates: DuplicatePolicy::default(),
        }
    }
}

/// Collect matching files directly inside `dir`, sorted by file name.
///
/// Hidden files are included and ignore files are not consulted: the corpus
/// is taken exactly as it sits on disk.
pub fn list_corpus_files(dir: &Path, extension: &str) -> CorpusResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CorpusError::NotADirectory(dir.to_path_buf()));
    }

    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .build();

    let mut files: Vec<PathBuf> = walker
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extension))
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        return Err(CorpusError::Empty {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    info!("Found {} .{} files in {}", files.len(), extension, dir.display());
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Decode bytes as UTF-8, dropping invalid sequences instead of replacing them.
pub fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// Build a record from file content that has already been read.
///
/// Line endings are unified to `\n` before trimming, so `body` and its
/// character count do not depend on the platform that wrote the file.
pub fn record_from_bytes(path: &Path, bytes: &[u8], label: &str) -> RawRecord {
    let body = decode_dropping_invalid(bytes)
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .to_string();

    let subject = extract_subject(&body).unwrap_or_else(|| {
        debug!("No header line in {}", path.display());
        String::new()
    });

    RawRecord {
        id: path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        subject,
        body,
        source_file: path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
        label: label.to_string(),
    }
}

/// Read one email file into a record.
///
/// Invalid UTF-8 is dropped, or rejected with [`CorpusError::InvalidEncoding`]
/// when `options.strict` is set.
pub fn read_record(path: &Path, options: &LoadOptions) -> CorpusResult<RawRecord> {
    let bytes = std::fs::read(path).map_err(|source| CorpusError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(e) = std::str::from_utf8(&bytes) {
        if options.strict {
            return Err(CorpusError::InvalidEncoding {
                path: path.to_path_buf(),
                offset: e.valid_up_to(),
            });
        }
        debug!(
            "Dropping invalid UTF-8 in {} (first at offset {})",
            path.display(),
            e.valid_up_to()
        );
    }

    Ok(record_from_bytes(path, &bytes, &options.label))
}

/// Apply the duplicate-id policy to records in file-name order.
///
/// Surviving records keep the position of the file they came from; with
/// `KeepLast` the replacement takes the slot of the record it displaces.
pub fn resolve_duplicates<T>(
    items: Vec<T>,
    id_of: impl Fn(&T) -> (&str, &str),
    policy: DuplicatePolicy,
) -> CorpusResult<Vec<T>> {
    let mut slots: Vec<Option<T>> = Vec::with_capacity(items.len());
    let mut seen: FxHashMap<String, (usize, String)> = FxHashMap::default();

    for item in items {
        let (id, source) = id_of(&item);
        let (id, source) = (id.to_string(), source.to_string());

        match seen.get(&id) {
            None => {
                seen.insert(id, (slots.len(), source));
                slots.push(Some(item));
            }
            Some((slot, first)) => match policy {
                DuplicatePolicy::Reject => {
                    return Err(CorpusError::DuplicateId {
                        id,
                        first: first.clone(),
                        second: source,
                    });
                }
                DuplicatePolicy::KeepFirst => {
                    warn!("Duplicate id '{}': keeping {}, skipping {}", id, first, source);
                }
                DuplicatePolicy::KeepLast => {
                    warn!("Duplicate id '{}': {} replaces {}", id, source, first);
                    let slot = *slot;
                    slots[slot] = Some(item);
                    seen.insert(id, (slot, source));
                }
            },
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

/// Records loaded from a corpus directory
#[derive(Debug, Default)]
pub struct Corpus {
    pub records: Vec<RawRecord>,
    /// Files that could not be read (non-strict mode only)
    pub skipped: Vec<PathBuf>,
}

/// Load every record sequentially. The feature pipeline has its own parallel
/// path; this is the simple entry point for library callers.
pub fn load_corpus(dir: &Path, options: &LoadOptions) -> CorpusResult<Corpus> {
    let files = list_corpus_files(dir, &options.extension)?;

    let mut corpus = Corpus::default();
    let mut records = Vec::with_capacity(files.len());
    for path in files {
        match read_record(&path, options) {
            Ok(record) => records.push(record),
            Err(e) if !options.strict => {
                warn!("Skipping {}", e);
                corpus.skipped.push(path);
            }
            Err(e) => return Err(e),
        }
    }

    corpus.records = resolve_duplicates(
        records,
        |r| (r.id.as_str(), r.source_file.as_str()),
        options.duplicates,
    )?;
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, content: &[u8]) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "notes.md", b"not an email");
        let err = list_corpus_files(dir.path(), "txt").unwrap_err();
        assert!(matches!(err, CorpusError::Empty { .. }));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_corpus_files(&dir.path().join("nope"), "txt").unwrap_err();
        assert!(matches!(err, CorpusError::NotADirectory(_)));
    }

    #[test]
    fn test_sorted_case_insensitive_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.TXT", b"b");
        write(dir.path(), "a.txt", b"a");
        write(dir.path(), "c.eml", b"c");
        write(dir.path(), ".hidden.txt", b"h");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write(&dir.path().join("nested"), "d.txt", b"d");

        let files = list_corpus_files(dir.path(), "txt").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![".hidden.txt", "a.txt", "b.TXT"]);
    }

    #[test]
    fn test_invalid_bytes_are_dropped() {
        assert_eq!(decode_dropping_invalid(b"ver\xffify\xc3"), "verify");
        assert_eq!(decode_dropping_invalid("caf\u{e9}".as_bytes()), "caf\u{e9}");
    }

    #[test]
    fn test_record_from_bytes() {
        let path = Path::new("/corpus/email_01.txt");
        let record = record_from_bytes(
            path,
            b"\n  Header: Urgent Account Notice\nDear user,\xfe please verify.  \n",
            "ai_phish",
        );
        assert_eq!(record.id, "email_01");
        assert_eq!(record.source_file, "email_01.txt");
        assert_eq!(record.subject, "Urgent Account Notice");
        assert_eq!(
            record.body,
            "Header: Urgent Account Notice\nDear user, please verify."
        );
        assert_eq!(record.label, "ai_phish");
    }

    #[test]
    fn test_crlf_body_uses_line_feeds() {
        let record = record_from_bytes(
            Path::new("mail.txt"),
            b"Header: Hi\r\nline two\r\n",
            DEFAULT_LABEL,
        );
        assert_eq!(record.body, "Header: Hi\nline two");
        assert_eq!(record.body.chars().count(), 19);
        assert_eq!(record.subject, "Hi");

        let old_mac = record_from_bytes(Path::new("mac.txt"), b"a\rb\r", DEFAULT_LABEL);
        assert_eq!(old_mac.body, "a\nb");
    }

    #[test]
    fn test_record_without_header() {
        let record = record_from_bytes(Path::new("x.txt"), b"Dear user", "lbl");
        assert_eq!(record.subject, "");
        assert_eq!(record.label, "lbl");
    }

    #[test]
    fn test_duplicate_policies() {
        fn key<'a>(t: &'a (&'static str, &'static str)) -> (&'a str, &'a str) {
            (t.0, t.1)
        }
        let items = vec![("a", "a.txt"), ("b", "b.txt"), ("a", "a.TXT")];

        let kept = resolve_duplicates(items.clone(), key, DuplicatePolicy::KeepFirst).unwrap();
        assert_eq!(kept, vec![("a", "a.txt"), ("b", "b.txt")]);

        let kept = resolve_duplicates(items.clone(), key, DuplicatePolicy::KeepLast).unwrap();
        assert_eq!(kept, vec![("a", "a.TXT"), ("b", "b.txt")]);

        let err = resolve_duplicates(items, key, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, CorpusError::DuplicateId { ref id, .. } if id == "a"));
    }

    #[test]
    fn test_duplicate_policy_parsing() {
        assert_eq!("keep-first".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::KeepFirst));
        assert_eq!("OVERWRITE".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::KeepLast));
        assert_eq!("reject".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::Reject));
        assert!("maybe".parse::<DuplicatePolicy>().is_err());
    }

    #[test]
    fn test_load_corpus() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "02.txt", b"Header: Second\nbody two");
        write(dir.path(), "01.txt", b"body one");

        let corpus = load_corpus(dir.path(), &LoadOptions::default()).unwrap();
        assert_eq!(corpus.records.len(), 2);
        assert_eq!(corpus.records[0].id, "01");
        assert_eq!(corpus.records[1].subject, "Second");
        assert!(corpus.skipped.is_empty());
    }

    #[test]
    fn test_strict_rejects_invalid_encoding() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.txt", b"Header: Hi\nclick\xff here");

        let lenient = load_corpus(dir.path(), &LoadOptions::default()).unwrap();
        assert_eq!(lenient.records[0].body, "Header: Hi\nclick here");

        let strict = LoadOptions {
            strict: true,
            ..LoadOptions::default()
        };
        let err = load_corpus(dir.path(), &strict).unwrap_err();
        assert!(matches!(err, CorpusError::InvalidEncoding { offset: 16, .. }));
    }
}
