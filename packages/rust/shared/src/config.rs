//! Run configuration for tocgen.
//!
//! An optional `tocgen.toml` in the scanned directory overrides the defaults;
//! CLI flags override config file values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TocError};
use crate::types::FileKind;

/// Default configuration file name, looked up in the root directory.
pub const CONFIG_FILE_NAME: &str = "tocgen.toml";

// ---------------------------------------------------------------------------
// TocConfig
// ---------------------------------------------------------------------------

/// Everything one pipeline run needs, passed explicitly to the entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TocConfig {
    /// Directory scanned for numbered files. Set at runtime, never serialized.
    #[serde(skip, default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Target document. Relative paths resolve against `root_dir`.
    #[serde(default = "default_readme")]
    pub readme: PathBuf,

    /// Title line emitted right after the start marker.
    #[serde(default = "default_header")]
    pub header: String,

    /// Line emitted when no files were discovered.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default = "default_marker_start")]
    pub marker_start: String,

    #[serde(default = "default_marker_end")]
    pub marker_end: String,

    /// Extensions (without the dot) that participate in discovery.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Render Markdown/notebook headings as `file#anchor` links.
    #[serde(default)]
    pub link_headings: bool,

    /// Ignore heading-like lines inside fenced code blocks.
    #[serde(default)]
    pub skip_code_fences: bool,

    /// Render only; leave the target document untouched.
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            readme: default_readme(),
            header: default_header(),
            placeholder: default_placeholder(),
            marker_start: default_marker_start(),
            marker_end: default_marker_end(),
            extensions: default_extensions(),
            link_headings: false,
            skip_code_fences: false,
            dry_run: false,
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_readme() -> PathBuf {
    PathBuf::from("README.md")
}
fn default_header() -> String {
    "## 목차 (Table of Contents)".into()
}
fn default_placeholder() -> String {
    "_(목차에 표시할 파일이 없습니다.)_".into()
}
fn default_marker_start() -> String {
    "<!-- TOC START -->".into()
}
fn default_marker_end() -> String {
    "<!-- TOC END -->".into()
}
fn default_extensions() -> Vec<String> {
    vec!["ipynb".into()]
}

impl TocConfig {
    /// Defaults rooted at `root_dir`.
    pub fn for_dir(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    /// Resolved path of the target document.
    pub fn readme_path(&self) -> PathBuf {
        if self.readme.is_absolute() {
            self.readme.clone()
        } else {
            self.root_dir.join(&self.readme)
        }
    }

    /// File kinds selected by `extensions`, in configured order.
    pub fn kinds(&self) -> Result<Vec<FileKind>> {
        self.extensions
            .iter()
            .map(|ext| {
                let ext = ext.trim_start_matches('.');
                FileKind::from_extension(ext).ok_or_else(|| {
                    TocError::config(format!(
                        "unsupported extension {ext:?} (expected one of: md, ipynb, py)"
                    ))
                })
            })
            .collect()
    }

    /// Reject configurations the writer or discoverer cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.marker_start.is_empty() || self.marker_end.is_empty() {
            return Err(TocError::config("TOC markers must not be empty"));
        }
        if self.marker_start == self.marker_end {
            return Err(TocError::config(
                "marker_start and marker_end must differ",
            ));
        }
        if self.extensions.is_empty() {
            return Err(TocError::config("at least one extension is required"));
        }
        self.kinds()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load `tocgen.toml` from `root_dir`. Returns defaults if the file does not exist.
pub fn load_config(root_dir: &Path) -> Result<TocConfig> {
    let path = root_dir.join(CONFIG_FILE_NAME);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(TocConfig::for_dir(root_dir));
    }

    let mut config = load_config_from(&path)?;
    config.root_dir = root_dir.to_path_buf();
    Ok(config)
}

/// Load a config from a specific file path. `root_dir` is left at its default.
pub fn load_config_from(path: &Path) -> Result<TocConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TocError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TocError::config(format!("failed to parse {}: {e}", path.display())))
}
