//! Hard line wrapping for HTML output.
//!
//! Lengths are counted in `char`s and exclude the line terminator, which is
//! kept as-is. A line of `L > width` characters becomes `ceil(L / width)`
//! physical lines; nothing is dropped.

use tracing::trace;

use srcprint_shared::{Result, SrcprintError};

/// Source text after wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapped {
    /// The rewrapped text.
    pub text: String,
    /// Number of line breaks inserted.
    pub wrapped_lines: usize,
}

/// Split every line longer than `width` characters into `width`-sized chunks.
pub fn wrap_source(source: &str, width: usize) -> Result<Wrapped> {
    if width == 0 {
        return Err(SrcprintError::validation("wrap width must be at least 1"));
    }

    let mut text = String::with_capacity(source.len());
    let mut wrapped_lines = 0;

    for (number, raw) in source.split_inclusive('\n').enumerate() {
        let (mut rest, ending) = split_line_ending(raw);
        let line_break = if ending.is_empty() { "\n" } else { ending };

        let before = wrapped_lines;
        while let Some(cut) = char_boundary_after(rest, width) {
            text.push_str(&rest[..cut]);
            text.push_str(line_break);
            rest = &rest[cut..];
            wrapped_lines += 1;
        }
        text.push_str(rest);
        text.push_str(ending);

        if wrapped_lines > before {
            trace!(line = number + 1, breaks = wrapped_lines - before, "wrapped line");
        }
    }

    Ok(Wrapped {
        text,
        wrapped_lines,
    })
}

/// Separate a line from its `\n` / `\r\n` terminator.
fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Byte offset just past the first `width` chars, if `s` is longer than that.
fn char_boundary_after(s: &str, width: usize) -> Option<usize> {
    s.char_indices().nth(width).map(|(offset, _)| offset)
}
