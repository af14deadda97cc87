//! Error types for the usage pipeline
//!
//! `UsageError` covers file and document failures. Whether a failure aborts
//! the run is decided by the caller: stats and output errors are fatal,
//! chapter errors only drop that chapter's verses.
//! `KeyError` covers stats keys that cannot be normalized.

use std::path::PathBuf;

use thiserror::Error;

/// File and document errors
#[derive(Error, Debug)]
pub enum UsageError {
    #[error("Error reading stats file {}", path.display())]
    ReadStats {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing stats file {}", path.display())]
    ParseStats {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Error reading chapter file {}", path.display())]
    ReadChapter {
        chapter: u32,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error parsing chapter file {}", path.display())]
    ParseChapter {
        chapter: u32,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Verse #{index} in chapter {chapter} has no string `number`")]
    InvalidVerseRecord { chapter: u32, index: usize },

    #[error("Error creating output directory {}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error writing output file {}", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl UsageError {
    /// True when the statistics document could not be loaded
    pub fn is_stats_error(&self) -> bool {
        matches!(self, Self::ReadStats { .. } | Self::ParseStats { .. })
    }

    /// Message followed by every underlying cause, `: `-separated.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }
        message
    }
}

/// A stats key that cannot be turned into a chapter/verse reference
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Key '{key}' does not start with '{prefix}'")]
    MissingPrefix { key: String, prefix: String },

    #[error("Key '{key}' has no numeric chapter")]
    InvalidChapter { key: String },

    #[error("Key '{key}' has no verse after the chapter")]
    MissingVerse { key: String },

    #[error("Key '{key}' has a non-integer usage count: {count}")]
    InvalidCount { key: String, count: String },
}
