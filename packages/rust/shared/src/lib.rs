//! Shared types, error model, and configuration for tocgen.
//!
//! This crate is the foundation depended on by all other tocgen crates.
//! It provides:
//! - [`TocError`]: the unified error type
//! - Domain types ([`CandidateFile`], [`Heading`], [`FileKind`], [`Ordinal`])
//! - Configuration ([`TocConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{CONFIG_FILE_NAME, TocConfig, load_config, load_config_from};
pub use error::{Result, TocError};
pub use types::{CandidateFile, FileKind, Heading, Ordinal, TocSection};
