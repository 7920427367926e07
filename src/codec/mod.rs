//! Row codec for delimited text files
//!
//! Converts between raw lines and named rows:
//! - `build_header_index`: header line → field name to column position
//! - `decode_row`: data line → `Row`, strictly one value per header entry
//! - `encode_row` / `encode_values`: values → one output line (no terminator)
//!
//! Tokenizing is delegated to the `csv` crate so that quoting follows the
//! usual rules: a value containing the delimiter or the quote character is
//! enclosed, and embedded quotes are doubled.
//!
//! Names and values are trimmed of surrounding whitespace on decode.

mod dialect;
mod errors;
mod header;
mod row;

pub use dialect::Dialect;
pub use errors::{CodecError, CodecResult};
pub use header::{build_header_index, HeaderIndex};
pub use row::{decode_row, encode_row, encode_values, Row};
