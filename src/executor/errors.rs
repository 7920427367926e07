//! Executor error types
//!
//! Error codes surfaced by a scan:
//! - everything a dataset, query or codec error carries, passed through
//! - DATATOOL_OUTPUT_FAILED: the output file could not be opened or written
//! - DATATOOL_PATTERN_INVALID: a statistics pattern did not compile
//! - DATATOOL_OPTIONS_INVALID: execution options out of range
//!
//! Lines flushed before a failure stay on disk; nothing is rolled back.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;
use crate::dataset::DatasetError;
use crate::query::QueryError;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Executor error type
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("DATATOOL_ENCODE_FAILED: {0}")]
    Codec(#[from] CodecError),

    #[error("DATATOOL_OUTPUT_FAILED: {message}: {}", .path.display())]
    Output {
        path: PathBuf,
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("DATATOOL_PATTERN_INVALID: {0}")]
    Pattern(#[from] regex::Error),

    #[error("DATATOOL_OPTIONS_INVALID: {0}")]
    Options(String),
}

impl ExecutorError {
    /// Create an output error for `path`
    pub fn output(path: impl Into<PathBuf>, message: impl Into<String>, source: io::Error) -> Self {
        ExecutorError::Output {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::Dataset(e) => e.code().code(),
            ExecutorError::Query(e) => e.code().code(),
            ExecutorError::Codec(_) => "DATATOOL_ENCODE_FAILED",
            ExecutorError::Output { .. } => "DATATOOL_OUTPUT_FAILED",
            ExecutorError::Pattern(_) => "DATATOOL_PATTERN_INVALID",
            ExecutorError::Options(_) => "DATATOOL_OPTIONS_INVALID",
        }
    }

    /// Returns the query error, if this is one
    pub fn as_query(&self) -> Option<&QueryError> {
        match self {
            ExecutorError::Query(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the dataset error, if this is one
    pub fn as_dataset(&self) -> Option<&DatasetError> {
        match self {
            ExecutorError::Dataset(e) => Some(e),
            _ => None,
        }
    }
}
