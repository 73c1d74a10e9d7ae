//! Random-access CSV reading backed by a one-time byte-offset index
//!
//! `csvseek` scans a CSV file once, recording the byte offset of every
//! logical line boundary, then serves any row through a single positioned
//! read - O(1) lookup no matter where in the file the row lives. Quoted
//! fields may contain embedded commas and newlines; the index and the
//! splitter track quote state with the same rule, so a multi-line record
//! indexes as exactly one row.
//!
//! **Best for:**
//! - Large files read sparsely or out of order
//! - Repeated lookups against a file that does not change
//! - Concurrent readers sharing one open handle
//!
//! **Out of scope:**
//! - Files that change after indexing (the index is never invalidated)
//! - CSV dialects other than comma + double-quote
//! - Writing or streaming CSV output
//!
//! # Examples
//!
//! ```no_run
//! use csvseek::RandomAccessReader;
//!
//! let reader = RandomAccessReader::open("data.csv", true).unwrap();
//! println!("{} rows", reader.row_count().unwrap());
//!
//! // Jump straight to a row in the middle of the file.
//! let row = reader.read_row(41).unwrap();
//! println!("{:?}", row.get("name"));
//!
//! // Or walk every data row in order.
//! for row in reader.rows() {
//!     println!("{:?}", row.unwrap());
//! }
//! ```

pub mod error;
pub mod index;
pub mod reader;
pub mod splitter;

pub use error::{CsvSeekError, Result};
pub use index::LineIndex;
pub use reader::{RandomAccessReader, RowIterator};
pub use splitter::split_record;
