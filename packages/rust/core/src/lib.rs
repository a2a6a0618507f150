//! Document building for srcprint.
//!
//! This crate turns an ordered list of source files into one highlighted
//! HTML or LaTeX document: line wrapping, document templates, the scoped
//! output file, and the build itself (`build_document`).

pub mod builder;
pub mod document;
pub mod output;
pub mod wrap;

pub use builder::{BuildReport, ProgressReporter, SilentProgress, build_document};
