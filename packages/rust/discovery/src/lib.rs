//! Numbered content-file discovery.
//!
//! Lists a single directory (non-recursively) and keeps the files whose names
//! start with an ASCII digit run and end in one of the requested extensions,
//! e.g. `01_intro.ipynb` or `10-advanced topics.md`. Results are ordered by the
//! numeric value of that prefix.

use std::path::Path;

use regex::Regex;
use tracing::{debug, instrument};

use tocgen_shared::{CandidateFile, FileKind, Result, TocError};

/// Build the filename pattern for a set of kinds.
///
/// Group 1 is the ASCII digit prefix, group 2 the extension. `\d` would also
/// accept other Unicode decimal digits, which [`tocgen_shared::Ordinal`] rejects.
fn filename_pattern(kinds: &[FileKind]) -> Result<Regex> {
    let alternation = kinds
        .iter()
        .map(|k| regex::escape(k.extension()))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&format!(r"^([0-9]+).*\.({alternation})$"))
        .map_err(|e| TocError::config(format!("invalid discovery pattern: {e}")))
}

/// Match a single filename against the pattern, returning a candidate on success.
fn classify(pattern: &Regex, name: &str, root_dir: &Path) -> Option<CandidateFile> {
    let caps = pattern.captures(name)?;
    let ordinal = caps[1].parse().ok()?;
    let kind = FileKind::from_extension(&caps[2])?;

    Some(CandidateFile {
        ordinal,
        name: name.to_string(),
        path: root_dir.join(name),
        kind,
    })
}

/// Discover numbered files in `root_dir`, sorted by ascending ordinal.
///
/// Ties keep directory-listing order. Subdirectories and names that are not
/// valid UTF-8 are skipped. A missing `root_dir` yields [`TocError::NotFound`].
#[instrument(skip(kinds), fields(root = %root_dir.display()))]
pub fn discover(root_dir: &Path, kinds: &[FileKind]) -> Result<Vec<CandidateFile>> {
    if kinds.is_empty() {
        return Ok(Vec::new());
    }
    let pattern = filename_pattern(kinds)?;

    let entries = std::fs::read_dir(root_dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TocError::not_found(root_dir),
        _ => TocError::io(root_dir, e),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| TocError::io(root_dir, e))?;

        let Ok(name) = entry.file_name().into_string() else {
            debug!(name = ?entry.file_name(), "skipping non-UTF-8 file name");
            continue;
        };

        let Some(candidate) = classify(&pattern, &name, root_dir) else {
            continue;
        };

        if !candidate.path.is_file() {
            debug!(name, "skipping non-file entry");
            continue;
        }

        files.push(candidate);
    }

    files.sort_by(|a, b| a.ordinal.cmp(&b.ordinal));

    debug!(count = files.len(), "discovered numbered files");
    Ok(files)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "tocgen-discovery-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            std::fs::write(dir.join(name), "").unwrap();
        }
    }

    fn names(files: &[CandidateFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    const ALL: [FileKind; 3] = FileKind::ALL;

    #[test]
    fn sorts_by_numeric_ordinal() {
        let dir = temp_dir();
        touch(&dir, &["10_b.md", "2_a.md", "001_first.md"]);

        let files = discover(&dir, &ALL).unwrap();
        assert_eq!(names(&files), vec!["001_first.md", "2_a.md", "10_b.md"]);
        assert_eq!(files[0].ordinal.as_str(), "1");
        assert_eq!(files[2].path, dir.join("10_b.md"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn excludes_unnumbered_and_unknown_extensions() {
        let dir = temp_dir();
        touch(&dir, &["notes.md", "3.txt", "README.md", "4_ok.py", "x1.ipynb"]);

        let files = discover(&dir, &ALL).unwrap();
        assert_eq!(names(&files), vec!["4_ok.py"]);
        assert_eq!(files[0].kind, FileKind::Script);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn respects_extension_set() {
        let dir = temp_dir();
        touch(&dir, &["01_a.md", "02_b.ipynb", "03_c.py"]);

        let files = discover(&dir, &[FileKind::Notebook]).unwrap();
        assert_eq!(names(&files), vec!["02_b.ipynb"]);
        assert_eq!(files[0].kind, FileKind::Notebook);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn skips_directories() {
        let dir = temp_dir();
        std::fs::create_dir_all(dir.join("05_folder.md")).unwrap();
        touch(&dir, &["06_real.md"]);

        let files = discover(&dir, &ALL).unwrap();
        assert_eq!(names(&files), vec!["06_real.md"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn equal_ordinals_are_all_kept() {
        let dir = temp_dir();
        touch(&dir, &["1_a.md", "01_b.md", "1_c.md"]);

        let files = discover(&dir, &ALL).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.ordinal.as_str() == "1"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_directory_is_not_found() {
        let dir = temp_dir().join("does-not-exist");
        let err = discover(&dir, &ALL).unwrap_err();
        assert!(matches!(err, TocError::NotFound { .. }));
    }

    #[test]
    fn classify_parses_prefix_and_extension() {
        let pattern = filename_pattern(&ALL).unwrap();
        let root = Path::new("/r");

        let file = classify(&pattern, "12 intro notes.ipynb", root).unwrap();
        assert_eq!(file.ordinal.as_str(), "12");
        assert_eq!(file.kind, FileKind::Notebook);

        assert!(classify(&pattern, "12_intro.md.bak", root).is_none());
        assert!(classify(&pattern, "_12.md", root).is_none());
    }

    #[test]
    fn only_ascii_digit_prefixes_count() {
        let pattern = filename_pattern(&[FileKind::Markdown]).unwrap();
        let root = Path::new("/nb");
        assert!(!pattern.is_match("١٢_arabic.md"));
        assert!(classify(&pattern, "١٢_arabic.md", root).is_none());
        assert!(classify(&pattern, "１_fullwidth.md", root).is_none());

        let mixed = classify(&pattern, "3١_mixed.md", root).unwrap();
        assert_eq!(mixed.ordinal.as_str(), "3");

        let dir = temp_dir();
        touch(&dir, &["١_a.md", "2_b.md"]);
        let files = discover(&dir, &[FileKind::Markdown]).unwrap();
        assert_eq!(names(&files), vec!["2_b.md"]);
        std::fs::remove_dir_all(&dir).ok();
    }
}
