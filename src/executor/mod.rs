//! Query and compare execution
//!
//! Both scans stream their input one line at a time and write matches
//! through the same `BatchWriter`.
//!
//! # Query
//!
//! Filters one dataset: every row is decoded, its clause fields are
//! type-checked, clause results are combined with ALL or ANY, and matching
//! rows are projected onto the selected fields.
//!
//! # Compare
//!
//! Joins a source and a compare dataset in a nested loop on key fields,
//! keeping matching or non-matching pairs, then filters and projects the
//! joined pair.
//!
//! # Failure
//!
//! Field and condition errors are raised before the output is opened. A
//! decode or type error mid-scan aborts the scan; lines already flushed
//! remain in the output file.

mod compare;
mod errors;
mod executor;
mod filters;
mod options;
mod result;
mod sink;

pub use compare::CompareEngine;
pub use errors::{ExecutorError, ExecutorResult};
pub use executor::QueryExecutor;
pub use filters::{PreparedClause, RowFilter};
pub use options::{ExecutionOptions, DEFAULT_FLUSH_THRESHOLD};
pub use result::ExecutionResult;
pub use sink::BatchWriter;
