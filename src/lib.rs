//! Bhagavad-gita usage extraction
//!
//! Reads verse usage counts from `json/stats.json`, finds each cited
//! Bhagavad-gita verse in the per-chapter documents under `json/lv/`, and
//! writes the matched verses, sorted and annotated with `usage_count`, to
//! `output/all.json`.
//!
//! # Stages
//!
//! ```text
//! stats.json ──► loader ──► matcher ◄── loader (json/lv/NN.json, on demand)
//!                              │
//!                              ▼
//!                           writer ──► output/all.json
//! ```
//!
//! Verse designators may be single verses (`2.11`), ranges (`2.10-12`) or
//! comma lists (`2.10,12`); a stats key matches a chapter record when the
//! numbers are equal or the ranges overlap.
//!
//! # Usage
//!
//! ```ignore
//! use gita_usage::{pipeline, PipelineConfig};
//!
//! let report = pipeline::run(&PipelineConfig::default())?;
//! println!("{} verses written", report.written);
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod pipeline;
pub mod reference;
pub mod writer;

// Re-export main types
pub use config::PipelineConfig;
pub use error::{KeyError, UsageError};
pub use loader::{load_stats, ChapterDocument, ChapterStore, UsageStats, VerseRecord};
pub use matcher::{find_verse, is_verse_match, match_verses, MatchOutcome, OutputVerse, UsageEntry};
pub use pipeline::{run, RunReport};
pub use reference::{VerseKey, VerseRange};
pub use writer::OutputDocument;
