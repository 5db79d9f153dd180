//! Core rendering, writing, and pipeline orchestration for tocgen.
//!
//! This crate ties discovery and heading extraction together with the TOC
//! renderer and the marker-based README writer (see [`pipeline::run`]).

pub mod pipeline;
pub mod toc;
pub mod writer;
