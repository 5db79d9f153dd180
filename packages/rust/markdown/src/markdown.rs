//! `.md` documents.

use tocgen_shared::{FileKind, Heading, Result};

use crate::{ExtractOptions, FenceTracker, HeadingSource, parse_heading_line};

/// Scans Markdown line by line for ATX headings.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSource;

impl HeadingSource for MarkdownSource {
    fn kind(&self) -> FileKind {
        FileKind::Markdown
    }

    fn parse(&self, content: &str, options: &ExtractOptions) -> Result<Vec<Heading>> {
        let mut fences = FenceTracker::new(options);
        Ok(content
            .lines()
            .filter(|line| !fences.is_code(line))
            .filter_map(parse_heading_line)
            .collect())
    }
}
