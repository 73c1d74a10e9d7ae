//! Byte-offset indexing of logical CSV lines
//!
//! One chunked scan over the raw byte stream records the position
//! immediately after every unquoted newline. A quoted field may contain
//! embedded newlines, so the scan tracks quote state with the same toggle
//! rule the splitter applies; the two passes must agree on where logical
//! lines end or multi-line records would corrupt the index.

use crate::error::{CsvSeekError, Result};
use std::io::Read;

const CHUNK_SIZE: usize = 131072; // 128 KB chunks

/// Immutable table of logical line boundaries.
///
/// Entry `i` is the byte offset just past the end of logical line `i`.
/// Offsets are strictly increasing, and a successful scan always yields at
/// least one entry.
#[derive(Debug)]
pub struct LineIndex {
    offsets: Vec<u64>,
}

impl LineIndex {
    /// Scan a byte stream and record every logical line boundary.
    ///
    /// The stream is read in fixed-size chunks, so memory stays constant
    /// regardless of input size. A double quote toggles quote state; a
    /// newline outside quotes ends a logical line. When the stream does not
    /// end with an unquoted newline, the final position is recorded anyway
    /// so the last line is still addressable.
    ///
    /// Returns [`CsvSeekError::EmptyFile`] for a zero-byte stream and
    /// [`CsvSeekError::ReadError`] if the underlying read fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use csvseek::LineIndex;
    ///
    /// let index = LineIndex::scan(&b"a,b\nc,d\n"[..]).unwrap();
    /// assert_eq!(index.line_count(), 2);
    /// assert_eq!(index.span(1), Some((4, 8)));
    /// ```
    pub fn scan<R: Read>(mut reader: R) -> Result<Self> {
        let mut offsets = Vec::new();
        let mut in_quotes = false;
        let mut pos: u64 = 0;
        let mut chunk = vec![0u8; CHUNK_SIZE];

        loop {
            let n = reader
                .read(&mut chunk)
                .map_err(|e| CsvSeekError::ReadError(format!("Failed to read chunk: {}", e)))?;
            if n == 0 {
                break;
            }

            for &byte in &chunk[..n] {
                pos += 1;
                match byte {
                    b'"' => in_quotes = !in_quotes,
                    b'\n' if !in_quotes => offsets.push(pos),
                    _ => {}
                }
            }
        }

        if pos == 0 {
            return Err(CsvSeekError::EmptyFile(
                "file contains no indexable content".to_string(),
            ));
        }

        // The last line may be missing its trailing newline; record its end
        // anyway, without duplicating an already-recorded boundary.
        if offsets.last() != Some(&pos) {
            offsets.push(pos);
        }

        Ok(LineIndex { offsets })
    }

    /// Number of logical lines in the indexed stream.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    /// Byte range `[start, end)` of the given logical line, or `None` when
    /// the line number is past the end of the index.
    pub fn span(&self, line: usize) -> Option<(u64, u64)> {
        let end = *self.offsets.get(line)?;
        let start = if line == 0 { 0 } else { self.offsets[line - 1] };
        Some((start, end))
    }
}
