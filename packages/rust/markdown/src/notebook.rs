//! `.ipynb` Jupyter notebooks.
//!
//! Only markdown cells are scanned. A cell's `source` may be stored either as
//! a list of line fragments or as one string; both forms are valid nbformat.

use serde::Deserialize;

use tocgen_shared::{FileKind, Heading, Result, TocError};

use crate::{ExtractOptions, FenceTracker, HeadingSource, parse_heading_line};

#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    #[serde(default)]
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Fragments(Vec<String>),
    Text(String),
}

impl Default for CellSource {
    fn default() -> Self {
        Self::Fragments(Vec::new())
    }
}

impl CellSource {
    fn lines(&self) -> Vec<&str> {
        match self {
            Self::Fragments(parts) => parts.iter().map(String::as_str).collect(),
            Self::Text(text) => text.lines().collect(),
        }
    }
}

/// Scans the markdown cells of a notebook for ATX headings.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotebookSource;

impl HeadingSource for NotebookSource {
    fn kind(&self) -> FileKind {
        FileKind::Notebook
    }

    fn parse(&self, content: &str, options: &ExtractOptions) -> Result<Vec<Heading>> {
        let notebook: Notebook = serde_json::from_str(content)
            .map_err(|e| TocError::parse(format!("invalid notebook JSON: {e}")))?;

        let mut headings = Vec::new();
        for cell in notebook.cells.iter().filter(|c| c.cell_type == "markdown") {
            // Fences never span cells.
            let mut fences = FenceTracker::new(options);
            for fragment in cell.source.lines() {
                let fragment = fragment.trim();
                if fences.is_code(fragment) {
                    continue;
                }
                headings.extend(parse_heading_line(fragment));
            }
        }

        Ok(headings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<Heading>> {
        NotebookSource.parse(json, &ExtractOptions::default())
    }

    #[test]
    fn markdown_cell_fragments() {
        let json = r##"{"cells": [{"cell_type": "markdown", "source": ["# Intro\n", "more text\n"]}]}"##;
        assert_eq!(parse(json).unwrap(), vec![Heading::new(1, "Intro")]);
    }

    #[test]
    fn code_cells_are_ignored() {
        let json = r##"{
            "cells": [
                {"cell_type": "code", "source": ["# not a heading\n"], "outputs": []},
                {"cell_type": "markdown", "source": ["  ## Indented fragment  \n"]},
                {"cell_type": "raw", "source": ["# raw\n"]}
            ],
            "metadata": {},
            "nbformat": 4
        }"##;
        assert_eq!(parse(json).unwrap(), vec![Heading::new(2, "Indented fragment")]);
    }

    #[test]
    fn string_source_is_split_into_lines() {
        let json = r##"{"cells": [{"cell_type": "markdown", "source": "# One\ntext\n### Three"}]}"##;
        assert_eq!(
            parse(json).unwrap(),
            vec![Heading::new(1, "One"), Heading::new(3, "Three")]
        );
    }

    #[test]
    fn fenced_code_in_markdown_cell() {
        let json = r###"{"cells": [{"cell_type": "markdown", "source": ["```python\n", "# comment\n", "```\n", "## Real\n"]}]}"###;
        assert_eq!(
            parse(json).unwrap(),
            vec![Heading::new(1, "comment"), Heading::new(2, "Real")]
        );

        let options = ExtractOptions {
            skip_code_fences: true,
        };
        assert_eq!(
            NotebookSource.parse(json, &options).unwrap(),
            vec![Heading::new(2, "Real")]
        );
    }

    #[test]
    fn missing_cells_means_no_headings() {
        assert!(parse(r#"{"nbformat": 4}"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(parse("{\"cells\": ["), Err(TocError::Parse { .. })));
        assert!(matches!(parse("\"cells\""), Err(TocError::Parse { .. })));
    }
}
