//! Writer - sort matched verses and write the output document

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::UsageError;
use crate::matcher::OutputVerse;
use crate::reference::sort_key;

/// `{ "verses": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutputDocument {
    pub verses: Vec<OutputVerse>,
}

impl OutputDocument {
    /// Build the document with verses ordered by (chapter, first verse).
    ///
    /// The sort is stable, so verses sharing a number keep stats-key order.
    pub fn sorted(mut verses: Vec<OutputVerse>) -> Self {
        verses.sort_by_key(|verse| sort_key(verse.number()));
        Self { verses }
    }

    /// Pretty JSON with 2-space indentation
    pub fn to_json(&self) -> Result<String, UsageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write to `path`, creating parent directories and replacing any
    /// existing file. Returns the number of verses written.
    pub fn write_to(&self, path: &Path) -> Result<usize, UsageError> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| UsageError::CreateOutputDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| UsageError::WriteOutput {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(self.verses.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::VerseRecord;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    fn verse(number: &str, count: i64) -> OutputVerse {
        let Value::Object(fields) = json!({"number": number}) else {
            unreachable!()
        };
        OutputVerse::new(&VerseRecord::new(fields), count)
    }

    #[test]
    fn test_sorted_by_chapter_then_verse() {
        let doc = OutputDocument::sorted(vec![
            verse("10.8", 1),
            verse("2.13", 1),
            verse("2.10-12", 1),
            verse("1.1", 1),
            verse("2.2", 1),
        ]);
        let numbers: Vec<&str> = doc.verses.iter().map(|v| v.number()).collect();
        assert_eq!(numbers, vec!["1.1", "2.2", "2.10-12", "2.13", "10.8"]);
    }

    #[test]
    fn test_sort_is_stable_for_duplicates() {
        let doc = OutputDocument::sorted(vec![verse("3.5", 7), verse("3.1", 1), verse("3.5", 2)]);
        let counts: Vec<Option<i64>> = doc.verses.iter().map(|v| v.usage_count()).collect();
        assert_eq!(counts, vec![Some(1), Some(7), Some(2)]);
    }

    #[test]
    fn test_json_uses_two_space_indent() {
        let doc = OutputDocument::sorted(vec![verse("1.1", 5)]);
        assert_eq!(
            doc.to_json().unwrap(),
            "{\n  \"verses\": [\n    {\n      \"number\": \"1.1\",\n      \"usage_count\": 5\n    }\n  ]\n}"
        );
    }

    #[test]
    fn test_empty_document() {
        let doc = OutputDocument::default();
        assert_eq!(doc.to_json().unwrap(), "{\n  \"verses\": []\n}");
    }

    #[test]
    fn test_write_creates_directories_and_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("output").join("nested").join("all.json");

        let first = OutputDocument::sorted(vec![verse("1.1", 5), verse("1.2", 1)]);
        assert_eq!(first.write_to(&path).unwrap(), 2);

        let second = OutputDocument::sorted(vec![verse("1.3", 2)]);
        assert_eq!(second.write_to(&path).unwrap(), 1);

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({"verses": [{"number": "1.3", "usage_count": 2}]})
        );
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("output");
        fs::write(&blocker, "not a directory").unwrap();

        let err = OutputDocument::default()
            .write_to(&blocker.join("all.json"))
            .unwrap_err();
        assert!(matches!(err, UsageError::CreateOutputDir { .. }));
    }
}
