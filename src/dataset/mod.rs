//! Dataset handles over delimited text files
//!
//! A `Dataset` is opened once: the first line of the file is parsed into a
//! header index and the handle is immutable afterwards. Rows are streamed
//! one line at a time through a `DatasetReader`; the whole file is never
//! loaded into memory.
//!
//! # Reader guarantees
//!
//! - The header line is never yielded as a row
//! - Every yielded row has exactly one value per header field
//! - A malformed line aborts the scan (no skip-and-continue)
//! - Blank lines are skipped
//! - `rewind` seeks back to the first data line without reopening the file

mod errors;
mod handle;
mod reader;

pub use errors::{DatasetError, DatasetErrorCode, DatasetResult};
pub use handle::Dataset;
pub use reader::DatasetReader;
