//! gita-usage
//!
//! Usage: run from the directory that holds `json/` and `output/`.
//!   RUST_LOG=gita_usage=debug gita-usage

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use gita_usage::{pipeline, PipelineConfig, RunReport, UsageError};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "gita_usage=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = PipelineConfig::default();

    match execute(&config) {
        Ok(report) => {
            tracing::info!(
                target_keys = report.target_keys,
                written = report.written,
                unmatched = report.unmatched.len(),
                skipped = report.skipped.len(),
                malformed = report.malformed.len(),
                failed_chapters = ?report.failed_chapters,
                "Run complete"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            if err
                .downcast_ref::<UsageError>()
                .is_some_and(UsageError::is_stats_error)
            {
                eprintln!(
                    "Make sure the file exists at {}",
                    config.stats_path.display()
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn execute(config: &PipelineConfig) -> Result<RunReport> {
    pipeline::run(config).context("Usage extraction aborted")
}
