//! Pure marked-block text operations
//!
//! A block starts at the first line that contains the start marker and ends at
//! the first later line that contains the end marker, both inclusive. A start
//! line with no end line after it opens a block that runs to the end of the
//! text. A second start line inside an open block is simply part of it.
//!
//! Text is handled as raw bytes split into lines with their terminators
//! attached, so everything outside a block is carried over byte-for-byte,
//! including `\r\n` endings, a final line without a newline and bytes that are
//! not valid UTF-8.

use super::BlockError;

/// A validated pair of block delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    start: String,
    end: String,
}

impl Markers {
    /// Validate and build a marker pair.
    ///
    /// Matching is by substring, so markers must be non-empty, single-line and
    /// neither may contain the other.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self, BlockError> {
        let start = start.into();
        let end = end.into();

        for marker in [&start, &end] {
            if marker.trim().is_empty() {
                return Err(BlockError::EmptyMarker);
            }
            if marker.contains('\n') || marker.contains('\r') {
                return Err(BlockError::MultilineMarker {
                    marker: marker.clone(),
                });
            }
        }

        if start.contains(end.as_str()) || end.contains(start.as_str()) {
            return Err(BlockError::AmbiguousMarkers { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    fn opens(&self, line: &[u8]) -> bool {
        contains_bytes(line, self.start.as_bytes())
    }

    fn closes(&self, line: &[u8]) -> bool {
        contains_bytes(line, self.end.as_bytes())
    }
}

/// Outcome of stripping blocks from a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The text with every block removed.
    pub text: Vec<u8>,
    /// Number of blocks removed.
    pub blocks: usize,
    /// Number of lines removed, marker lines included.
    pub lines: usize,
    /// Whether the last block had no end marker and ran to end of text.
    pub unterminated: bool,
}

impl Removal {
    /// Whether anything was removed.
    pub fn is_changed(&self) -> bool {
        self.blocks > 0
    }
}

/// Remove every marked block from `text`.
///
/// Normally there is at most one block. Stray duplicates left behind by hand
/// edits are removed as well so a following patch leaves exactly one.
pub fn remove_block(text: &[u8], markers: &Markers) -> Removal {
    let mut kept = Vec::with_capacity(text.len());
    let mut blocks = 0;
    let mut lines = 0;
    let mut inside = false;

    for line in text.split_inclusive(|b| *b == b'\n') {
        if inside {
            lines += 1;
            if markers.closes(line) {
                inside = false;
            }
        } else if markers.opens(line) {
            inside = true;
            blocks += 1;
            lines += 1;
        } else {
            kept.extend_from_slice(line);
        }
    }

    Removal {
        text: kept,
        blocks,
        lines,
        unterminated: inside,
    }
}

/// Replace the block in `text` with a fresh one at the end.
///
/// The result always ends with `end\n`. `content` is copied verbatim; a
/// newline is added after it only when it does not already end with one, and
/// a newline is added before the start marker when the kept text does not end
/// with one. Content lines containing either marker are rejected since they
/// would make the block impossible to remove cleanly.
pub fn patch_block(text: &[u8], markers: &Markers, content: &str) -> Result<Vec<u8>, BlockError> {
    check_payload(content, markers)?;

    let mut out = remove_block(text, markers).text;
    out.reserve(markers.start().len() + content.len() + markers.end().len() + 3);

    if !out.is_empty() && !out.ends_with(b"\n") {
        out.push(b'\n');
    }
    out.extend_from_slice(markers.start().as_bytes());
    out.push(b'\n');
    out.extend_from_slice(content.as_bytes());
    if !content.is_empty() && !content.ends_with('\n') {
        out.push(b'\n');
    }
    out.extend_from_slice(markers.end().as_bytes());
    out.push(b'\n');

    Ok(out)
}

/// Whether `text` contains a start marker line.
pub fn contains_block(text: &[u8], markers: &Markers) -> bool {
    text.split(|b| *b == b'\n').any(|line| markers.opens(line))
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

fn check_payload(content: &str, markers: &Markers) -> Result<(), BlockError> {
    for (idx, line) in content.lines().enumerate() {
        for marker in [markers.start(), markers.end()] {
            if line.contains(marker) {
                return Err(BlockError::MarkerInPayload {
                    marker: marker.to_string(),
                    line: idx + 1,
                });
            }
        }
    }
    Ok(())
}
