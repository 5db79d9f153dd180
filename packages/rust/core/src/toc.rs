//! TOC (Table of Contents) renderer.
//!
//! Turns discovered files and their headings into the Markdown block that the
//! writer splices into the target document. Rendering is pure: no I/O, and
//! identical input always yields identical output.

use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use tocgen_shared::{Heading, TocConfig, TocSection};

/// Render the complete TOC block, markers included, without a trailing newline.
///
/// Layout:
/// ```text
/// <start marker>
/// <header>
///
/// ### [01_intro.ipynb](01_intro.ipynb)
/// - Intro
///   - Setup
///
/// <end marker>
/// ```
pub fn render(sections: &[TocSection], config: &TocConfig) -> String {
    let mut lines: Vec<String> = vec![config.marker_start.clone(), config.header.clone()];

    if sections.is_empty() {
        lines.push(String::new());
        lines.push(config.placeholder.clone());
    }

    for section in sections {
        let link = file_link(&section.file.name);
        lines.push(String::new());
        lines.push(format!("### [{}]({link})", escape_link_text(&section.file.name)));

        let anchored = config.link_headings && section.file.kind.supports_anchors();
        for heading in &section.headings {
            lines.push(heading_line(heading, anchored.then_some(link.as_str())));
        }
    }

    lines.push(String::new());
    lines.push(config.marker_end.clone());
    lines.join("\n")
}

/// One bullet line, indented two spaces per level below 1.
fn heading_line(heading: &Heading, link: Option<&str>) -> String {
    let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
    match link {
        Some(link) => format!(
            "{indent}- [{}]({link}#{})",
            escape_link_text(&heading.title),
            anchor(&heading.title)
        ),
        None => format!("{indent}- {}", heading.title),
    }
}

/// Bytes left as-is in link targets: ASCII alphanumerics plus `-._~/`.
const LINK_UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Percent-encode a filename for use as a relative link target.
///
/// Every byte outside [`LINK_UNRESERVED`] is escaped, including Markdown
/// punctuation such as `(` `)` `[` `]` and control characters.
pub fn file_link(name: &str) -> String {
    utf8_percent_encode(name, LINK_UNRESERVED).to_string()
}

/// Backslash-escape the characters that would end Markdown link text early.
fn escape_link_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Heading anchor in the style GitHub generates for rendered Markdown.
///
/// Lowercases, drops everything except word characters, whitespace and
/// hyphens, then joins whitespace runs with a single `-`.
pub fn anchor(title: &str) -> String {
    static STRIP_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
    static SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

    let lowered = title.to_lowercase();
    let stripped = STRIP_RE.replace_all(lowered.trim(), "");
    SPACE_RE.replace_all(&stripped, "-").into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
