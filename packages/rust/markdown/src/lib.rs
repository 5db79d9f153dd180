//! Heading extraction for numbered content files.
//!
//! Each supported file kind has a [`HeadingSource`] that turns file content
//! into an ordered list of [`Heading`]s. [`extract_headings`] is the fail-soft
//! entry point used by the pipeline: a file that cannot be read or parsed
//! contributes zero headings and a warning, never an error.

mod markdown;
mod notebook;
mod script;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use tocgen_shared::{CandidateFile, FileKind, Heading, Result, TocConfig, TocError};

pub use markdown::MarkdownSource;
pub use notebook::NotebookSource;
pub use script::ScriptSource;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Knobs shared by every heading source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Ignore heading-like lines inside ``` / ~~~ fenced code blocks.
    pub skip_code_fences: bool,
}

impl From<&TocConfig> for ExtractOptions {
    fn from(config: &TocConfig) -> Self {
        Self {
            skip_code_fences: config.skip_code_fences,
        }
    }
}

/// A format-specific heading scanner.
pub trait HeadingSource: Send + Sync {
    /// The file kind this source understands.
    fn kind(&self) -> FileKind;

    /// Extract headings, in document order, from the full file content.
    fn parse(&self, content: &str, options: &ExtractOptions) -> Result<Vec<Heading>>;
}

static MARKDOWN: MarkdownSource = MarkdownSource;
static NOTEBOOK: NotebookSource = NotebookSource;
static SCRIPT: ScriptSource = ScriptSource;

/// The heading source registered for `kind`.
pub fn source_for(kind: FileKind) -> &'static dyn HeadingSource {
    match kind {
        FileKind::Markdown => &MARKDOWN,
        FileKind::Notebook => &NOTEBOOK,
        FileKind::Script => &SCRIPT,
    }
}

// ---------------------------------------------------------------------------
// Extraction entry points
// ---------------------------------------------------------------------------

/// Read `path` and extract its headings, propagating any failure.
pub fn try_extract(kind: FileKind, path: &Path, options: &ExtractOptions) -> Result<Vec<Heading>> {
    let content = std::fs::read_to_string(path).map_err(|e| TocError::io(path, e))?;
    source_for(kind).parse(&content, options)
}

/// Extract the headings of a discovered file.
///
/// Read and parse failures are logged and yield an empty list.
pub fn extract_headings(file: &CandidateFile, options: &ExtractOptions) -> Vec<Heading> {
    match try_extract(file.kind, &file.path, options) {
        Ok(headings) => {
            debug!(file = %file.name, count = headings.len(), "extracted headings");
            headings
        }
        Err(e) => {
            warn!(file = %file.name, error = %e, "could not extract headings, skipping file contents");
            Vec::new()
        }
    }
}

// ---------------------------------------------------------------------------
// Shared line matching
// ---------------------------------------------------------------------------

/// Matches an ATX heading: 1-6 `#`, whitespace, then the title.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)").expect("heading regex"));

/// Build a heading from a `#` run and raw title text. Empty titles are dropped.
pub(crate) fn heading_from(hashes: &str, title: &str) -> Option<Heading> {
    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some(Heading::new(hashes.len() as u8, title))
}

/// Parse a single Markdown line as a heading.
pub(crate) fn parse_heading_line(line: &str) -> Option<Heading> {
    let caps = HEADING_RE.captures(line)?;
    heading_from(&caps[1], &caps[2])
}

/// Tracks fenced code blocks (```` ``` ```` or `~~~`) across lines.
///
/// A disabled tracker reports every line as prose.
#[derive(Debug)]
pub(crate) struct FenceTracker {
    enabled: bool,
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new(options: &ExtractOptions) -> Self {
        Self {
            enabled: options.skip_code_fences,
            open: None,
        }
    }

    /// Feed one line; returns `true` if it is a fence line or inside a fence.
    pub(crate) fn is_code(&mut self, line: &str) -> bool {
        if !self.enabled {
            return false;
        }
        let trimmed = line.trim_start();
        let fence = ['`', '~'].into_iter().find_map(|c| {
            let run = trimmed.chars().take_while(|&ch| ch == c).count();
            (run >= 3).then_some((c, run))
        });

        match (self.open, fence) {
            (None, Some(f)) => {
                self.open = Some(f);
                true
            }
            (Some((c, len)), Some((fc, flen))) if c == fc && flen >= len => {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tocgen-markdown-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn candidate(dir: &Path, name: &str, kind: FileKind, content: &[u8]) -> CandidateFile {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        CandidateFile {
            ordinal: "1".parse().unwrap(),
            name: name.into(),
            path,
            kind,
        }
    }

    #[test]
    fn heading_line_levels_and_trimming() {
        assert_eq!(parse_heading_line("# Title"), Some(Heading::new(1, "Title")));
        assert_eq!(
            parse_heading_line("###### Deep   "),
            Some(Heading::new(6, "Deep"))
        );
        assert_eq!(parse_heading_line("####### Too deep"), None);
        assert_eq!(parse_heading_line("#NoSpace"), None);
        assert_eq!(parse_heading_line("#   "), None);
        assert_eq!(parse_heading_line(" # Indented"), None);
    }

    #[test]
    fn fence_tracker_skips_code_when_enabled() {
        let mut fences = FenceTracker::new(&ExtractOptions {
            skip_code_fences: true,
        });
        let flags: Vec<bool> = ["text", "```bash", "# comment", "~~~", "```", "after"]
            .iter()
            .map(|l| fences.is_code(l))
            .collect();
        assert_eq!(flags, vec![false, true, true, true, true, false]);
    }

    #[test]
    fn fence_tracker_is_off_by_default() {
        let mut fences = FenceTracker::new(&ExtractOptions::default());
        assert!(["```", "# inside", "```"].iter().all(|l| !fences.is_code(l)));
    }

    #[test]
    fn source_for_dispatches_by_kind() {
        for kind in FileKind::ALL {
            assert_eq!(source_for(kind).kind(), kind);
        }
    }

    #[test]
    fn extract_headings_reads_file() {
        let dir = temp_dir();
        let file = candidate(
            &dir,
            "01_intro.md",
            FileKind::Markdown,
            b"# Title\n\ntext\n## Sub\n",
        );

        assert_eq!(
            extract_headings(&file, &ExtractOptions::default()),
            vec![Heading::new(1, "Title"), Heading::new(2, "Sub")]
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn extract_headings_is_fail_soft() {
        let dir = temp_dir();
        let broken = candidate(&dir, "02_broken.ipynb", FileKind::Notebook, b"{ not json");
        let options = ExtractOptions::default();
        assert!(extract_headings(&broken, &options).is_empty());
        assert!(matches!(
            try_extract(broken.kind, &broken.path, &options),
            Err(TocError::Parse { .. })
        ));

        let binary = candidate(&dir, "03_binary.md", FileKind::Markdown, &[0xff, 0xfe, 0x00]);
        assert!(extract_headings(&binary, &options).is_empty());

        let mut missing = binary.clone();
        missing.path = dir.join("gone.md");
        assert!(extract_headings(&missing, &options).is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }
}
