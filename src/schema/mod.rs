//! Type inference for decoded rows
//!
//! Every value of a row is classified as DATE, NUMERIC or STRING, in that
//! order of preference: a value is a date if the date parser accepts it,
//! otherwise numeric if it parses as a number, otherwise a string.
//!
//! Inference is row-local. Nothing is cached between rows, because the
//! files being queried carry no schema beyond their header line.

mod inference;
mod literals;
mod types;

pub use inference::TypeInferencer;
pub use literals::{parse_date, parse_numeric};
pub use types::{TypeMap, TypeTag};
