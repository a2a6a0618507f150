//! Core domain types for srcprint documents.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Wrap width used when neither the CLI nor the config sets one.
pub const DEFAULT_WIDTH: usize = 100;

/// Style used when neither the CLI nor the config names one.
pub const DEFAULT_STYLE: &str = "default";

// ---------------------------------------------------------------------------
// OutputFormat
// ---------------------------------------------------------------------------

/// The kind of document produced by a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Latex,
}

impl OutputFormat {
    /// Output path used when the caller does not give one.
    pub fn default_output(self) -> &'static str {
        match self {
            Self::Html => "output.html",
            Self::Latex => "output.tex",
        }
    }

    /// Whether overlong lines are hard-wrapped before highlighting.
    pub fn wraps_lines(self) -> bool {
        matches!(self, Self::Html)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Latex => f.write_str("latex"),
        }
    }
}

// ---------------------------------------------------------------------------
// BuildOptions
// ---------------------------------------------------------------------------

/// Fully resolved options for one document build (CLI merged over config).
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Input files, rendered in this order.
    pub files: Vec<PathBuf>,
    /// Target document path.
    pub output: PathBuf,
    /// Highlighting style name.
    pub style: String,
    /// Wrap width in characters (HTML only).
    pub width: usize,
    /// Output format.
    pub format: OutputFormat,
}

impl BuildOptions {
    /// Options with defaults for `format`: default style, width and output path.
    pub fn new(format: OutputFormat, files: Vec<PathBuf>) -> Self {
        Self {
            files,
            output: PathBuf::from(format.default_output()),
            style: DEFAULT_STYLE.to_string(),
            width: DEFAULT_WIDTH,
            format,
        }
    }
}
