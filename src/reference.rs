//! Verse references
//!
//! Stats keys look like `"Бхагавад-гита 12.18-19"`; verse records carry a
//! `number` like `"12.18-19"`. The part after the chapter is the verse
//! designator: a single verse, a hyphen range (`18-19`) or a comma list
//! (`18,20`). Comma lists collapse to the span between their smallest and
//! largest entry.

use std::fmt;

use crate::error::KeyError;

/// Normalized stats key: chapter number plus the verse designator verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseKey {
    pub chapter: u32,
    pub designator: String,
}

impl VerseKey {
    /// Parse a stats key of the form `<prefix><chapter>.<designator>`.
    pub fn parse(key: &str, prefix: &str) -> Result<Self, KeyError> {
        let rest = key
            .strip_prefix(prefix)
            .ok_or_else(|| KeyError::MissingPrefix {
                key: key.to_string(),
                prefix: prefix.to_string(),
            })?;

        let mut parts = rest.split('.');
        let chapter = parts
            .next()
            .and_then(leading_int)
            .ok_or_else(|| KeyError::InvalidChapter {
                key: key.to_string(),
            })?;
        let designator = parts.next().ok_or_else(|| KeyError::MissingVerse {
            key: key.to_string(),
        })?;

        Ok(Self {
            chapter,
            designator: designator.trim().to_string(),
        })
    }

    /// `"{chapter}.{designator}"`, the form verse records use.
    pub fn target(&self) -> String {
        format!("{}.{}", self.chapter, self.designator)
    }

    /// Prefix shared by every verse number in this key's chapter.
    pub fn chapter_prefix(&self) -> String {
        format!("{}.", self.chapter)
    }
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.chapter, self.designator)
    }
}

/// Inclusive verse range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseRange {
    pub low: u32,
    pub high: u32,
}

impl VerseRange {
    /// Range covered by a verse designator.
    ///
    /// - `"11"` -> `[11, 11]`
    /// - `"10-12"` -> `[10, 12]`
    /// - `"10,12"` -> `[10, 12]` (interior entries ignored)
    ///
    /// Returns `None` if any part has no leading integer.
    pub fn parse(designator: &str) -> Option<Self> {
        if designator.contains('-') {
            let mut parts = designator.split('-');
            let low = parts.next().and_then(leading_int)?;
            let high = parts.next().and_then(leading_int)?;
            return Some(Self { low, high });
        }

        if designator.contains(',') {
            let nums = designator
                .split(',')
                .map(leading_int)
                .collect::<Option<Vec<u32>>>()?;
            let low = *nums.iter().min()?;
            let high = *nums.iter().max()?;
            return Some(Self { low, high });
        }

        leading_int(designator).map(|n| Self { low: n, high: n })
    }

    /// Inclusive intersection test
    pub fn overlaps(&self, other: &VerseRange) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

/// Sort key of a verse `number`: leading integers of the chapter and of the
/// designator. Unparseable parts sort after everything else.
pub fn sort_key(number: &str) -> (u32, u32) {
    let mut parts = number.split('.');
    let chapter = parts.next().and_then(leading_int).unwrap_or(u32::MAX);
    let verse = parts.next().and_then(leading_int).unwrap_or(u32::MAX);
    (chapter, verse)
}

/// Leading decimal integer of `s` after surrounding whitespace is skipped:
/// `"18-19"` is 18, `" 7 "` is 7, `"x1"` has none.
pub fn leading_int(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "Бхагавад-гита ";

    #[test]
    fn test_parse_single_verse_key() {
        let key = VerseKey::parse("Бхагавад-гита 2.11", PREFIX).unwrap();
        assert_eq!(key.chapter, 2);
        assert_eq!(key.designator, "11");
        assert_eq!(key.target(), "2.11");
    }

    #[test]
    fn test_parse_keeps_designator_verbatim() {
        let range = VerseKey::parse("Бхагавад-гита 12.18-19", PREFIX).unwrap();
        assert_eq!(range.designator, "18-19");

        let list = VerseKey::parse("Бхагавад-гита 2.10,12", PREFIX).unwrap();
        assert_eq!(list.designator, "10,12");
        assert_eq!(list.to_string(), "2.10,12");
    }

    #[test]
    fn test_parse_normalizes_chapter_padding() {
        let key = VerseKey::parse("Бхагавад-гита 03.5 ", PREFIX).unwrap();
        assert_eq!(key.target(), "3.5");
        assert_eq!(key.chapter_prefix(), "3.");
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        assert!(matches!(
            VerseKey::parse("Шримад-Бхагаватам 1.1.1", PREFIX),
            Err(KeyError::MissingPrefix { .. })
        ));
        assert!(matches!(
            VerseKey::parse("Бхагавад-гита 12", PREFIX),
            Err(KeyError::MissingVerse { .. })
        ));
        assert!(matches!(
            VerseKey::parse("Бхагавад-гита глава.1", PREFIX),
            Err(KeyError::InvalidChapter { .. })
        ));
    }

    #[test]
    fn test_range_forms() {
        assert_eq!(VerseRange::parse("11"), Some(VerseRange { low: 11, high: 11 }));
        assert_eq!(VerseRange::parse("10-12"), Some(VerseRange { low: 10, high: 12 }));
        assert_eq!(VerseRange::parse("10, 12"), Some(VerseRange { low: 10, high: 12 }));
        assert_eq!(VerseRange::parse("14,10,12"), Some(VerseRange { low: 10, high: 14 }));
        assert_eq!(VerseRange::parse(""), None);
        assert_eq!(VerseRange::parse("a-b"), None);
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let record = VerseRange::parse("10-12").unwrap();
        assert!(record.overlaps(&VerseRange::parse("11").unwrap()));
        assert!(record.overlaps(&VerseRange::parse("12").unwrap()));
        assert!(record.overlaps(&VerseRange::parse("8-10").unwrap()));
        assert!(!record.overlaps(&VerseRange::parse("13").unwrap()));
    }

    #[test]
    fn test_comma_list_collapses_gaps() {
        // 11 is not in the list but falls inside its span
        let list = VerseRange::parse("10,12").unwrap();
        assert!(list.overlaps(&VerseRange::parse("11").unwrap()));
    }

    #[test]
    fn test_sort_key_uses_leading_integers() {
        assert_eq!(sort_key("2.10-12"), (2, 10));
        assert_eq!(sort_key("18.66"), (18, 66));
        assert_eq!(sort_key("3.1,2"), (3, 1));
        assert_eq!(sort_key("intro"), (u32::MAX, u32::MAX));
    }

    #[test]
    fn test_leading_int() {
        assert_eq!(leading_int("18-19"), Some(18));
        assert_eq!(leading_int(" 7 "), Some(7));
        assert_eq!(leading_int("x1"), None);
        assert_eq!(leading_int(""), None);
    }
}
