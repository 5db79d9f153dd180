//! Core domain types for tocgen.

use std::cmp::Ordering;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// FileKind
// ---------------------------------------------------------------------------

/// The kind of content file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// `.md` document.
    Markdown,
    /// `.ipynb` Jupyter notebook.
    Notebook,
    /// `.py` script with Markdown headings nested in comments.
    Script,
}

impl FileKind {
    /// Every supported kind, in extension-declaration order.
    pub const ALL: [FileKind; 3] = [FileKind::Markdown, FileKind::Notebook, FileKind::Script];

    /// Map a bare extension (no leading dot) to a kind. Case-sensitive.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "md" => Some(Self::Markdown),
            "ipynb" => Some(Self::Notebook),
            "py" => Some(Self::Script),
            _ => None,
        }
    }

    /// The extension this kind is recognized by.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Notebook => "ipynb",
            Self::Script => "py",
        }
    }

    /// Whether headings of this kind can be targeted by a `#anchor` link.
    pub fn supports_anchors(&self) -> bool {
        !matches!(self, Self::Script)
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

// ---------------------------------------------------------------------------
// Ordinal
// ---------------------------------------------------------------------------

/// The leading digit run of a filename, compared numerically.
///
/// Stored as a normalized digit string (leading zeros removed) so prefixes of
/// any length compare correctly without overflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ordinal(String);

impl Ordinal {
    /// The normalized digits (no leading zeros; `"0"` for all-zero input).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for Ordinal {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("not a decimal digit run: {s:?}"));
        }
        let trimmed = s.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Ok(Self(digits.to_string()))
    }
}

impl Ord for Ordinal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Ordinal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// CandidateFile / Heading / TocSection
// ---------------------------------------------------------------------------

/// A numbered content file found by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Parsed filename prefix, used as the sort key.
    pub ordinal: Ordinal,
    /// Bare filename (e.g. `01_intro.ipynb`).
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
    pub kind: FileKind,
}

/// A heading extracted from a content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Nesting level, 1 (top) through 6.
    pub level: u8,
    /// Heading text, trimmed.
    pub title: String,
}

impl Heading {
    pub fn new(level: u8, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
        }
    }
}

/// One file's entry in the rendered TOC.
#[derive(Debug, Clone)]
pub struct TocSection {
    pub file: CandidateFile,
    pub headings: Vec<Heading>,
}
