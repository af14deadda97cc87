//! Pipeline - load stats, match verses, write the sorted document

use std::path::PathBuf;

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::UsageError;
use crate::loader::{load_stats, ChapterStore};
use crate::matcher::match_verses;
use crate::writer::OutputDocument;

/// Summary of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// All keys in `usageByVerse`
    pub total_keys: usize,
    /// Keys for the target scripture
    pub target_keys: usize,
    /// Verses assembled by the matcher
    pub processed: usize,
    /// Verses serialized to the output file
    pub written: usize,
    pub unmatched: Vec<String>,
    pub skipped: Vec<String>,
    pub malformed: Vec<String>,
    /// Chapters whose document could not be loaded
    pub failed_chapters: Vec<u32>,
    pub output_path: PathBuf,
}

/// Run the whole pipeline.
///
/// Fails only when the stats document cannot be loaded or the output cannot
/// be written; chapter and verse problems are logged and recorded in the
/// report.
pub fn run(config: &PipelineConfig) -> Result<RunReport, UsageError> {
    let stats = load_stats(&config.stats_path)?;
    let mut store = ChapterStore::new(config.chapters_dir.clone());

    let outcome = match_verses(&stats, &config.scripture_prefix, &mut store);
    let processed = outcome.verses.len();

    let document = OutputDocument::sorted(outcome.verses);
    let written = document.write_to(&config.output_path)?;

    info!(
        "Successfully wrote {} verses to {}",
        written,
        config.output_path.display()
    );
    info!("Processed {} verses", processed);

    Ok(RunReport {
        total_keys: stats.len(),
        target_keys: outcome.target_keys,
        processed,
        written,
        unmatched: outcome.unmatched,
        skipped: outcome.skipped,
        malformed: outcome.malformed,
        failed_chapters: store.failed(),
        output_path: config.output_path.clone(),
    })
}
