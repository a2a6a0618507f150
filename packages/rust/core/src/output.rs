//! Scoped output document.
//!
//! The document is written to a temporary file next to the target and only
//! renamed over it by [`OutputFile::commit`]. Dropping an uncommitted
//! [`OutputFile`] deletes the temporary file, so a failed run leaves neither
//! a truncated document nor a modified previous one.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use srcprint_shared::{Result, SrcprintError};

/// Output document being assembled.
pub struct OutputFile {
    target: PathBuf,
    writer: BufWriter<NamedTempFile>,
    bytes_written: u64,
}

impl OutputFile {
    /// Open a temporary file in the directory of `target`.
    pub fn create(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut builder = tempfile::Builder::new();
        builder.prefix(".srcprint-").suffix(".tmp");
        #[cfg(unix)]
        {
            // Let the umask decide, as for a plainly created file.
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o666));
        }

        let temp = builder
            .tempfile_in(dir)
            .map_err(|e| SrcprintError::io(target, e))?;
        debug!(temp = %temp.path().display(), target = %target.display(), "opened output");

        Ok(Self {
            target: target.to_path_buf(),
            writer: BufWriter::new(temp),
            bytes_written: 0,
        })
    }

    /// Path the document is committed to.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Append `text` to the document.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| SrcprintError::io(&self.target, e))?;
        self.bytes_written += text.len() as u64;
        Ok(())
    }

    /// Flush and atomically move the document into place. Returns bytes written.
    pub fn commit(self) -> Result<u64> {
        let Self {
            target,
            writer,
            bytes_written,
        } = self;

        let temp = writer
            .into_inner()
            .map_err(|e| SrcprintError::io(&target, e.into_error()))?;
        temp.persist(&target)
            .map_err(|e| SrcprintError::io(&target, e.error))?;

        debug!(target = %target.display(), bytes_written, "output committed");
        Ok(bytes_written)
    }
}
