//! Matcher - resolve usage stats keys to verse records
//!
//! Each stats key for the target scripture is normalized to a [`VerseKey`]
//! and looked up in its chapter. A record matches when its `number` equals
//! the key exactly, or when it belongs to the same chapter and the two verse
//! ranges overlap. The first matching record in chapter order wins.
//!
//! Keys are handled independently: two keys that land on the same record
//! produce two output verses.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::error::{KeyError, UsageError};
use crate::loader::{ChapterDocument, ChapterStore, UsageStats, VerseRecord};
use crate::reference::{VerseKey, VerseRange};

/// Field removed from every verse before output
pub const WORD_BY_WORD_FIELD: &str = "word_by_word";

/// Field appended to every verse in the output
pub const USAGE_COUNT_FIELD: &str = "usage_count";

/// A stats entry for the target scripture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    /// Stats key as it appears in the document
    pub key: String,
    pub verse: VerseKey,
    pub count: i64,
}

impl UsageEntry {
    pub fn parse(key: &str, count: &Value, prefix: &str) -> Result<Self, KeyError> {
        let verse = VerseKey::parse(key, prefix)?;
        let count = integral_count(count).ok_or_else(|| KeyError::InvalidCount {
            key: key.to_string(),
            count: count.to_string(),
        })?;
        Ok(Self {
            key: key.to_string(),
            verse,
            count,
        })
    }
}

/// Count as an integer; integral floats such as `5.0` are accepted.
fn integral_count(count: &Value) -> Option<i64> {
    count.as_i64().or_else(|| {
        count
            .as_f64()
            .filter(|n| n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64)
            .map(|n| n as i64)
    })
}

/// A matched verse: the record's fields minus `word_by_word`, plus `usage_count`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OutputVerse {
    #[serde(skip)]
    number: String,
    fields: Map<String, Value>,
}

impl OutputVerse {
    pub fn new(record: &VerseRecord, usage_count: i64) -> Self {
        let mut fields: Map<String, Value> = record
            .fields()
            .iter()
            .filter(|(name, _)| name.as_str() != WORD_BY_WORD_FIELD)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        fields.insert(USAGE_COUNT_FIELD.to_string(), Value::from(usage_count));

        Self {
            number: record.number().unwrap_or_default().to_string(),
            fields,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn usage_count(&self) -> Option<i64> {
        self.fields.get(USAGE_COUNT_FIELD).and_then(Value::as_i64)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Whether `record` is the verse `key` refers to.
pub fn is_verse_match(record: &VerseRecord, key: &VerseKey) -> bool {
    let Some(number) = record.number() else {
        return false;
    };
    if number == key.target() {
        return true;
    }

    let Some(record_designator) = number
        .strip_prefix(&key.chapter_prefix())
        .map(|rest| rest.split('.').next().unwrap_or(rest))
    else {
        return false;
    };

    match (
        VerseRange::parse(record_designator),
        VerseRange::parse(&key.designator),
    ) {
        (Some(record_range), Some(key_range)) => record_range.overlaps(&key_range),
        _ => false,
    }
}

/// First record in `chapter` matching `key`.
///
/// Records are checked in document order; reaching a record without a string
/// `number` before a match is an error for this lookup only.
pub fn find_verse<'a>(
    chapter: &'a ChapterDocument,
    key: &VerseKey,
) -> Result<Option<&'a VerseRecord>, UsageError> {
    for (index, record) in chapter.verses.iter().enumerate() {
        if record.number().is_none() {
            return Err(UsageError::InvalidVerseRecord {
                chapter: chapter.chapter,
                index,
            });
        }
        if is_verse_match(record, key) {
            return Ok(Some(record));
        }
    }
    Ok(None)
}

/// What happened to the stats keys during matching
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    /// Matched verses in stats-key order
    pub verses: Vec<OutputVerse>,
    /// Keys carrying the target prefix
    pub target_keys: usize,
    /// Keys whose chapter has no matching record
    pub unmatched: Vec<String>,
    /// Keys dropped because their chapter document could not be loaded or
    /// had an invalid record ahead of any match
    pub skipped: Vec<String>,
    /// Keys with the target prefix that could not be normalized
    pub malformed: Vec<String>,
}

/// Resolve every stats key that starts with `prefix` against its chapter.
pub fn match_verses(stats: &UsageStats, prefix: &str, store: &mut ChapterStore) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();

    for (key, count) in stats.iter().filter(|(key, _)| key.starts_with(prefix)) {
        outcome.target_keys += 1;

        let entry = match UsageEntry::parse(key, count, prefix) {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Ignoring malformed usage key");
                outcome.malformed.push(key.to_string());
                continue;
            }
        };

        let Some(chapter) = store.chapter(entry.verse.chapter) else {
            debug!(key = %entry.key, chapter = entry.verse.chapter, "Chapter unavailable");
            outcome.skipped.push(entry.key);
            continue;
        };

        match find_verse(chapter, &entry.verse) {
            Ok(Some(record)) => {
                debug!(key = %entry.key, number = ?record.number(), "Matched verse");
                outcome.verses.push(OutputVerse::new(record, entry.count));
            }
            Err(err) => {
                error!(key = %entry.key, error = %err, "Skipping verse");
                outcome.skipped.push(entry.key);
            }
            Ok(None) => {
                warn!(
                    "Verse {} not found in chapter {}",
                    entry.verse, entry.verse.chapter
                );
                outcome.unmatched.push(entry.key);
            }
        }
    }

    outcome
}
