//! End-to-end pipeline: discover → extract headings → render → write.

use std::path::PathBuf;

use tracing::{info, instrument};

use tocgen_markdown::{ExtractOptions, extract_headings};
use tocgen_shared::{Result, TocConfig, TocSection};

use crate::toc;
use crate::writer::{self, Markers, WriteOutcome};

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Resolved target document path.
    pub target: PathBuf,
    /// What happened to the target; `None` on a dry run.
    pub outcome: Option<WriteOutcome>,
    /// Number of numbered files discovered.
    pub file_count: usize,
    /// Total headings across all files.
    pub heading_count: usize,
    /// The rendered TOC block.
    pub toc: String,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each file's headings have been extracted.
    fn file_extracted(&self, name: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &RunReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_extracted(&self, _name: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &RunReport) {}
}

/// Run the full pipeline against `config`.
///
/// A missing root directory or an unwritable target aborts the run; files
/// that fail to parse only lose their headings.
#[instrument(skip_all, fields(root = %config.root_dir.display()))]
pub fn run(config: &TocConfig, progress: &dyn ProgressReporter) -> Result<RunReport> {
    config.validate()?;
    let kinds = config.kinds()?;

    progress.phase("Discovering files");
    let files = tocgen_discovery::discover(&config.root_dir, &kinds)?;
    info!(count = files.len(), "found numbered files");

    progress.phase("Extracting headings");
    let options = ExtractOptions::from(config);
    let total = files.len();
    let sections: Vec<TocSection> = files
        .into_iter()
        .enumerate()
        .map(|(i, file)| {
            let headings = extract_headings(&file, &options);
            progress.file_extracted(&file.name, i + 1, total);
            TocSection { file, headings }
        })
        .collect();

    let heading_count = sections.iter().map(|s| s.headings.len()).sum();
    let block = toc::render(&sections, config);

    let target = config.readme_path();
    let outcome = if config.dry_run {
        None
    } else {
        progress.phase("Writing TOC");
        Some(writer::write_toc(&target, &block, Markers::from_config(config))?)
    };

    let report = RunReport {
        target,
        outcome,
        file_count: total,
        heading_count,
        toc: block,
    };
    progress.done(&report);
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
