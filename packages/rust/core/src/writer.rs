//! Marker-delimited TOC writer.
//!
//! The target document is opaque except for the first region that starts with
//! the start marker and ends with the nearest following end marker. That region
//! belongs to tocgen and is replaced wholesale on every run. Marker text is
//! assumed never to appear verbatim in ordinary prose.

use std::path::Path;

use tracing::{debug, info, instrument};

use tocgen_shared::{Result, TocConfig, TocError};

/// The pair of sentinel strings bounding the generated region.
#[derive(Debug, Clone, Copy)]
pub struct Markers<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

impl<'a> Markers<'a> {
    pub fn from_config(config: &'a TocConfig) -> Self {
        Self {
            start: &config.marker_start,
            end: &config.marker_end,
        }
    }

    /// Byte range of the first `start ... end` region, markers included.
    pub fn find_region(&self, content: &str) -> Option<std::ops::Range<usize>> {
        let begin = content.find(self.start)?;
        let after_start = begin + self.start.len();
        let end = after_start + content[after_start..].find(self.end)? + self.end.len();
        Some(begin..end)
    }
}

/// What the writer did to the target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The document did not exist and was created with just the TOC.
    Created,
    /// An existing marker region was replaced with new content.
    Replaced,
    /// An existing marker region already held exactly this TOC.
    Unchanged,
    /// No marker region was found; the TOC was inserted at the top.
    Prepended,
}

impl WriteOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Replaced => "updated",
            Self::Unchanged => "unchanged",
            Self::Prepended => "prepended",
        }
    }
}

/// Compute the new document content without touching the filesystem.
pub fn splice_toc(existing: Option<&str>, block: &str, markers: Markers<'_>) -> (String, WriteOutcome) {
    let Some(content) = existing else {
        return (block.to_string(), WriteOutcome::Created);
    };

    match markers.find_region(content) {
        Some(region) => {
            let updated = format!("{}{block}{}", &content[..region.start], &content[region.end..]);
            let outcome = if updated == content {
                WriteOutcome::Unchanged
            } else {
                WriteOutcome::Replaced
            };
            (updated, outcome)
        }
        None => (format!("{block}\n\n{content}"), WriteOutcome::Prepended),
    }
}

/// Insert or replace the TOC block in the document at `target`.
///
/// The document is always rewritten in full, even when unchanged.
#[instrument(skip(block, markers), fields(target = %target.display()))]
pub fn write_toc(target: &Path, block: &str, markers: Markers<'_>) -> Result<WriteOutcome> {
    let existing = if target.exists() {
        Some(std::fs::read_to_string(target).map_err(|e| TocError::io(target, e))?)
    } else {
        None
    };

    let (content, outcome) = splice_toc(existing.as_deref(), block, markers);

    std::fs::write(target, content).map_err(|e| TocError::write(target, e))?;

    match outcome {
        WriteOutcome::Unchanged => debug!("TOC already up to date"),
        other => info!(outcome = other.as_str(), "wrote TOC"),
    }
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
