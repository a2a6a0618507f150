//! The document build: input files → wrap → highlight → one output document.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use srcprint_highlight::Highlighter;
use srcprint_shared::{BuildOptions, Result, SrcprintError};

use crate::document;
use crate::output::OutputFile;
use crate::wrap;

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Path of the committed document.
    pub output: PathBuf,
    /// Number of input files rendered.
    pub files: usize,
    /// Line breaks inserted by wrapping (always 0 for LaTeX).
    pub wrapped_lines: usize,
    /// Size of the document in bytes.
    pub bytes_written: u64,
}

/// Progress callback for reporting build status.
pub trait ProgressReporter {
    /// Called before an input file is processed (`current` is 1-based).
    fn file_started(&self, path: &Path, current: usize, total: usize);
    /// Called once the document has been committed.
    fn done(&self, report: &BuildReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn file_started(&self, _path: &Path, _current: usize, _total: usize) {}
    fn done(&self, _report: &BuildReport) {}
}

/// Build one document containing every file of `options`, in order.
///
/// 1. Resolve the style and open the output
/// 2. Per file: resolve grammar, read, wrap (HTML only), heading, fragment
/// 3. Close the document and move it into place
///
/// The first failure aborts the build; the output path is then left as it was.
#[instrument(skip_all, fields(format = %options.format, files = options.files.len()))]
pub fn build_document(
    options: &BuildOptions,
    highlighter: &Highlighter,
    progress: &dyn ProgressReporter,
) -> Result<BuildReport> {
    if options.files.is_empty() {
        return Err(SrcprintError::NoInputFiles);
    }
    if options.format.wraps_lines() && options.width == 0 {
        return Err(SrcprintError::validation("wrap width must be at least 1"));
    }

    let format = options.format;
    let style = highlighter.style(&options.style)?;
    let style_defs = highlighter.style_defs(format, style)?;

    let mut output = OutputFile::create(&options.output)?;
    info!(output = %output.target().display(), style = style.name(), "building document");
    output.write_str(&document::preamble(format, &style_defs))?;

    let total = options.files.len();
    let mut wrapped_lines = 0;

    for (i, path) in options.files.iter().enumerate() {
        progress.file_started(path, i + 1, total);

        let grammar = highlighter.resolve_grammar(path)?;
        let source = std::fs::read_to_string(path).map_err(|e| SrcprintError::io(path, e))?;

        let text = if format.wraps_lines() {
            let wrapped = wrap::wrap_source(&source, options.width)?;
            wrapped_lines += wrapped.wrapped_lines;
            wrapped.text
        } else {
            source
        };

        output.write_str(&document::heading(format, &path.display().to_string()))?;
        let fragment = highlighter.render(format, &text, grammar, style)?;
        output.write_str(&fragment)?;

        debug!(
            path = %path.display(),
            grammar = grammar.name(),
            bytes = fragment.len(),
            "rendered file"
        );
    }

    output.write_str(document::closing(format))?;
    let bytes_written = output.commit()?;

    let report = BuildReport {
        output: options.output.clone(),
        files: total,
        wrapped_lines,
        bytes_written,
    };

    info!(
        output = %report.output.display(),
        files = report.files,
        wrapped_lines = report.wrapped_lines,
        bytes = report.bytes_written,
        "document complete"
    );
    progress.done(&report);

    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
