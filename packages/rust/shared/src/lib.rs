//! Shared types, error model, and configuration for srcprint.
//!
//! This crate is the foundation depended on by all other srcprint crates.
//! It provides:
//! - [`SrcprintError`] — the unified error type
//! - Domain types ([`OutputFormat`], [`BuildOptions`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, StylesConfig, config_dir, config_file_path, load_config,
    load_config_from,
};
pub use error::{Result, SrcprintError};
pub use types::{BuildOptions, DEFAULT_STYLE, DEFAULT_WIDTH, OutputFormat};
