//! `.py` scripts annotated with Markdown headings inside comments.

use std::sync::LazyLock;

use regex::Regex;

use tocgen_shared::{FileKind, Heading, Result};

use crate::{ExtractOptions, HeadingSource, heading_from};

/// Matches `# ## Title`: a comment marker, whitespace, then an ATX heading.
static COMMENT_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#\s+(#{1,6})\s+(.*)").expect("comment heading regex"));

/// Scans a script for headings nested in `#` line comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptSource;

impl HeadingSource for ScriptSource {
    fn kind(&self) -> FileKind {
        FileKind::Script
    }

    fn parse(&self, content: &str, _options: &ExtractOptions) -> Result<Vec<Heading>> {
        Ok(content
            .lines()
            .filter_map(|line| {
                let caps = COMMENT_HEADING_RE.captures(line)?;
                heading_from(&caps[1], &caps[2])
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_nested_headings_count() {
        let script = "\
# plain comment
# # Setup
import os
    # ## Load data
## not a nested heading
x = 1  # # trailing comment
";
        assert_eq!(
            ScriptSource.parse(script, &ExtractOptions::default()).unwrap(),
            vec![Heading::new(1, "Setup"), Heading::new(2, "Load data")]
        );
    }

    #[test]
    fn requires_whitespace_after_inner_hashes() {
        assert!(ScriptSource.parse("# ##NoSpace\n", &ExtractOptions::default()).unwrap().is_empty());
    }
}
