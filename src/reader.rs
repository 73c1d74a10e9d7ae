//! Random-access CSV reading backed by a byte-offset line index

use crate::error::{CsvSeekError, Result};
use crate::index::LineIndex;
use crate::splitter::split_record;
use indexmap::IndexMap;
use std::fs::File;
use std::path::Path;

/// Random-access CSV file reader.
///
/// Opening the reader runs one indexing scan that records where every
/// logical line starts; after that any row is fetched with a single
/// positioned read, so lookup cost does not depend on where in the file the
/// row lives. Quoted fields may span physical lines; the index and the
/// splitter track quote state with the same rule, so such records stay one
/// row. The file must not change after indexing.
///
/// Rows are parsed fresh on every call and returned as an ordered map from
/// column name to value. With `has_header`, the first logical line supplies
/// the names and is excluded from row counting and row indexing; without
/// it, columns are named `[1]`, `[2]`, ... by position.
///
/// # Concurrency
///
/// `read_row` and `row_count` take `&self` and use offset-explicit reads
/// only, never a shared seek cursor, so concurrent `read_row` calls from
/// multiple threads against one reader are safe wherever the OS supports
/// positioned reads on a shared handle (true of ordinary files on Unix and
/// Windows). No internal lock is taken. `open` and `close` are exclusive
/// phases; `close` requires `&mut self`.
///
/// # Examples
///
/// ```no_run
/// use csvseek::RandomAccessReader;
///
/// let reader = RandomAccessReader::open("data.csv", true).unwrap();
/// println!("{} rows", reader.row_count().unwrap());
///
/// // Jump straight to row 41 - no sequential parse.
/// let row = reader.read_row(41).unwrap();
/// println!("{:?}", row.get("name"));
/// ```
pub struct RandomAccessReader {
    file: Option<File>,
    index: LineIndex,
    header: Option<Vec<String>>,
}

impl RandomAccessReader {
    /// Open a CSV file and index its logical lines.
    ///
    /// When `has_header` is true, logical line 0 is read and stored as the
    /// header; it does not count as a data row and row 0 becomes the first
    /// line after it.
    ///
    /// Fails with [`CsvSeekError::ReadError`] if the file cannot be opened
    /// or read, and [`CsvSeekError::EmptyFile`] if it holds no bytes.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvseek::RandomAccessReader;
    ///
    /// let with_names = RandomAccessReader::open("data.csv", true).unwrap();
    /// let positional = RandomAccessReader::open("bare.csv", false).unwrap();
    /// # let _ = (with_names, positional);
    /// ```
    pub fn open<P: AsRef<Path>>(path: P, has_header: bool) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| CsvSeekError::ReadError(format!("Failed to open CSV file: {}", e)))?;

        let index = LineIndex::scan(&file)?;

        let mut reader = RandomAccessReader {
            file: Some(file),
            index,
            header: None,
        };

        if has_header {
            reader.header = Some(reader.read_line(0)?);
        }

        Ok(reader)
    }

    /// Whether the file was opened with a header row.
    ///
    /// Row counting and row indexing never include the header.
    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    /// Column names from the header row, if one was captured.
    pub fn headers(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Number of data rows, excluding the header row if present.
    ///
    /// O(1), derived from the index. Fails with
    /// [`CsvSeekError::InvalidState`] after [`close`](Self::close).
    pub fn row_count(&self) -> Result<usize> {
        if self.file.is_none() {
            return Err(CsvSeekError::InvalidState("reader is closed".to_string()));
        }

        let lines = self.index.line_count();
        Ok(if self.header.is_some() { lines - 1 } else { lines })
    }

    /// Read one data row and map its values by column name.
    ///
    /// The byte span comes from the index and is fetched with one positioned
    /// read, then split into fields. With a header, the row's field count
    /// must equal the header's or [`CsvSeekError::SchemaMismatch`] is
    /// returned. Without a header, positional `[1]`, `[2]`, ... names scale
    /// to however many fields the row holds, so no count check applies.
    ///
    /// Fails with [`CsvSeekError::OutOfRange`] when `row` is not below
    /// [`row_count`](Self::row_count), and [`CsvSeekError::InvalidState`]
    /// after close. Repeated calls for the same row return identical
    /// results as long as the file is unchanged.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvseek::RandomAccessReader;
    ///
    /// let reader = RandomAccessReader::open("data.csv", true).unwrap();
    /// let row = reader.read_row(0).unwrap();
    /// for (name, value) in &row {
    ///     println!("{} = {}", name, value);
    /// }
    /// ```
    pub fn read_row(&self, row: usize) -> Result<IndexMap<String, String>> {
        let count = self.row_count()?;
        if row >= count {
            return Err(CsvSeekError::OutOfRange(format!(
                "row {} is past the capacity ({}) of the CSV file",
                row, count
            )));
        }

        let line = if self.header.is_some() { row + 1 } else { row };
        let fields = self.read_line(line)?;

        match &self.header {
            Some(header) => {
                if fields.len() != header.len() {
                    return Err(CsvSeekError::SchemaMismatch(format!(
                        "row {} has {} fields but the header has {}",
                        row,
                        fields.len(),
                        header.len()
                    )));
                }
                Ok(header.iter().cloned().zip(fields).collect())
            }
            None => Ok(fields
                .into_iter()
                .enumerate()
                .map(|(i, value)| (positional_name(i + 1), value))
                .collect()),
        }
    }

    /// Iterate over all data rows in order.
    ///
    /// Each item is produced by [`read_row`](Self::read_row), so the same
    /// naming and error behavior applies.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use csvseek::RandomAccessReader;
    ///
    /// let reader = RandomAccessReader::open("data.csv", true).unwrap();
    /// for row in reader.rows() {
    ///     println!("{:?}", row.unwrap());
    /// }
    /// ```
    pub fn rows(&self) -> RowIterator<'_> {
        RowIterator {
            reader: self,
            next_row: 0,
            failed: false,
        }
    }

    /// Release the underlying file handle.
    ///
    /// The handle is dropped exactly once; calling `close` again is a
    /// no-op. Subsequent `read_row`, `rows`, and `row_count` calls fail
    /// with [`CsvSeekError::InvalidState`].
    pub fn close(&mut self) -> Result<()> {
        self.file.take();
        Ok(())
    }

    /// Fetch and split one logical line with a positioned read.
    fn read_line(&self, line: usize) -> Result<Vec<String>> {
        let file = self
            .file
            .as_ref()
            .ok_or_else(|| CsvSeekError::InvalidState("reader is closed".to_string()))?;

        let (start, end) = self.index.span(line).ok_or_else(|| {
            CsvSeekError::OutOfRange(format!("logical line {} is past the end of the index", line))
        })?;

        let mut buf = vec![0u8; (end - start) as usize];
        read_exact_at(file, &mut buf, start).map_err(|e| {
            CsvSeekError::ReadError(format!("Failed to read line at offset {}: {}", start, e))
        })?;

        Ok(split_record(&buf))
    }
}

/// Synthetic column name for 1-based position `i` when no header exists.
fn positional_name(i: usize) -> String {
    format!("[{}]", i)
}

#[cfg(unix)]
fn read_exact_at(file: &File, buf: &mut [u8], offset: u64) -> std::io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.read_exact_at(buf, offset)
}

#[cfg(windows)]
fn read_exact_at(file: &File, mut buf: &mut [u8], offset: u64) -> std::io::Result<()> {
    use std::io::{Error, ErrorKind};
    use std::os::windows::fs::FileExt;

    let mut pos = offset;
    while !buf.is_empty() {
        match file.seek_read(buf, pos) {
            Ok(0) => {
                return Err(Error::new(
                    ErrorKind::UnexpectedEof,
                    "failed to fill whole buffer",
                ))
            }
            Ok(n) => {
                pos += n as u64;
                let rest = buf;
                buf = &mut rest[n..];
            }
            Err(ref e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Iterator over data rows, yielding [`read_row`] results in row order.
///
/// [`read_row`]: RandomAccessReader::read_row
pub struct RowIterator<'a> {
    reader: &'a RandomAccessReader,
    next_row: usize,
    failed: bool,
}

impl<'a> Iterator for RowIterator<'a> {
    type Item = Result<IndexMap<String, String>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let count = match self.reader.row_count() {
            Ok(count) => count,
            Err(e) => {
                // Reader was closed before iteration; report it once.
                self.failed = true;
                return Some(Err(e));
            }
        };

        if self.next_row >= count {
            return None;
        }

        let item = self.reader.read_row(self.next_row);
        self.next_row += 1;
        Some(item)
    }
}
