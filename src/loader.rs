//! Loader - statistics and chapter documents
//!
//! The statistics document is read once up front. Chapter documents are read
//! on demand through [`ChapterStore`], which keeps each result (document or
//! failure) for the rest of the run.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::config::chapter_file;
use crate::error::UsageError;

/// Usage counts keyed by `"<scripture> <chapter>.<designator>"`, in document order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageStats {
    #[serde(rename = "usageByVerse")]
    usage_by_verse: Map<String, Value>,
}

impl UsageStats {
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            usage_by_verse: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Keys and raw counts in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.usage_by_verse.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.usage_by_verse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usage_by_verse.is_empty()
    }
}

/// Read and parse the statistics document.
pub fn load_stats(path: &Path) -> Result<UsageStats, UsageError> {
    let content = fs::read_to_string(path).map_err(|source| UsageError::ReadStats {
        path: path.to_path_buf(),
        source,
    })?;
    let stats: UsageStats =
        serde_json::from_str(&content).map_err(|source| UsageError::ParseStats {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), keys = stats.len(), "Loaded usage stats");
    Ok(stats)
}

/// One verse of a chapter document. All fields are kept in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct VerseRecord {
    fields: Map<String, Value>,
}

impl VerseRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The `number` field, if it is a string
    pub fn number(&self) -> Option<&str> {
        self.fields.get("number").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

#[derive(Deserialize)]
struct RawChapter {
    verses: Vec<Map<String, Value>>,
}

/// Verse records of one chapter, in document order.
///
/// Records are not validated on load: a record without a string `number`
/// only fails a lookup that reaches it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChapterDocument {
    pub chapter: u32,
    pub verses: Vec<VerseRecord>,
}

impl ChapterDocument {
    pub fn new(chapter: u32, verses: Vec<VerseRecord>) -> Self {
        Self { chapter, verses }
    }

    /// Read and parse the document for `chapter` at `path`.
    pub fn load(chapter: u32, path: &Path) -> Result<Self, UsageError> {
        let content = fs::read_to_string(path).map_err(|source| UsageError::ReadChapter {
            chapter,
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawChapter =
            serde_json::from_str(&content).map_err(|source| UsageError::ParseChapter {
                chapter,
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::new(
            chapter,
            raw.verses.into_iter().map(VerseRecord::new).collect(),
        ))
    }
}

/// Lazily loaded chapter documents
#[derive(Debug)]
pub struct ChapterStore {
    dir: PathBuf,
    chapters: HashMap<u32, Option<ChapterDocument>>,
}

impl ChapterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            chapters: HashMap::new(),
        }
    }

    /// Document for `chapter`, read on first request.
    ///
    /// A read or parse failure is logged once and then reported as `None`
    /// for every later request.
    pub fn chapter(&mut self, chapter: u32) -> Option<&ChapterDocument> {
        let dir = &self.dir;
        self.chapters
            .entry(chapter)
            .or_insert_with(|| {
                let path = chapter_file(dir, chapter);
                match ChapterDocument::load(chapter, &path) {
                    Ok(doc) => {
                        debug!(chapter, verses = doc.verses.len(), "Loaded chapter");
                        Some(doc)
                    }
                    Err(err) => {
                        error!(chapter, error = %err.report(), "Skipping chapter");
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Chapters whose document could not be loaded, ascending
    pub fn failed(&self) -> Vec<u32> {
        let mut failed: Vec<u32> = self
            .chapters
            .iter()
            .filter(|(_, doc)| doc.is_none())
            .map(|(chapter, _)| *chapter)
            .collect();
        failed.sort_unstable();
        failed
    }
}
