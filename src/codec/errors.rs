//! Codec error types

use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Row codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Cannot encode an empty row")]
    EmptyRow,

    #[error("Header has {expected} fields but line has {found}: {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: String,
    },

    #[error("Duplicate header field: {0}")]
    DuplicateHeader(String),

    #[error("Delimiter and quote must differ (both {0:?})")]
    AmbiguousDialect(char),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Encoded line is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
