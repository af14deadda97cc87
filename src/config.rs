//! Pipeline configuration.
//!
//! The tool has no command-line surface: every run reads the same relative
//! layout. `PipelineConfig::rooted_at` resolves that layout under another
//! base directory so the pipeline can be driven against fixtures.

use std::path::{Path, PathBuf};

/// Default statistics document
pub const DEFAULT_STATS_PATH: &str = "./json/stats.json";

/// Default directory holding `<NN>.json` chapter documents
pub const DEFAULT_CHAPTERS_DIR: &str = "./json/lv";

/// Default output document
pub const DEFAULT_OUTPUT_PATH: &str = "./output/all.json";

/// Key prefix identifying Bhagavad-gita verses in the usage statistics
pub const GITA_PREFIX: &str = "Бхагавад-гита ";

/// Paths and key prefix for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Statistics document with a `usageByVerse` object
    pub stats_path: PathBuf,

    /// Directory of per-chapter verse documents
    pub chapters_dir: PathBuf,

    /// Where the merged `{ "verses": [...] }` document is written
    pub output_path: PathBuf,

    /// Stats keys must start with this literal (trailing space included)
    pub scripture_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stats_path: PathBuf::from(DEFAULT_STATS_PATH),
            chapters_dir: PathBuf::from(DEFAULT_CHAPTERS_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            scripture_prefix: GITA_PREFIX.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Default layout resolved under `root` instead of the working directory.
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            stats_path: root.join("json").join("stats.json"),
            chapters_dir: root.join("json").join("lv"),
            output_path: root.join("output").join("all.json"),
            ..Default::default()
        }
    }
}

/// Path of the document for `chapter` in `dir`, zero-padded to two digits.
pub(crate) fn chapter_file(dir: &Path, chapter: u32) -> PathBuf {
    dir.join(format!("{:02}.json", chapter))
}
