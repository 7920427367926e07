//! Dataset error types
//!
//! Error codes:
//! - DATATOOL_CONFIG_INVALID (missing path, nonexistent file)
//! - DATATOOL_READ_FAILED (I/O failure while reading)
//! - DATATOOL_DECODE_FAILED (line does not match the header)

use std::fmt;
use std::io;

use crate::codec::CodecError;

/// Dataset-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetErrorCode {
    /// Dataset cannot be opened as configured
    ConfigInvalid,
    /// Disk read failure
    ReadFailed,
    /// Line could not be decoded
    DecodeFailed,
}

impl DatasetErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DatasetErrorCode::ConfigInvalid => "DATATOOL_CONFIG_INVALID",
            DatasetErrorCode::ReadFailed => "DATATOOL_READ_FAILED",
            DatasetErrorCode::DecodeFailed => "DATATOOL_DECODE_FAILED",
        }
    }
}

impl fmt::Display for DatasetErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug)]
enum Cause {
    Io(io::Error),
    Codec(CodecError),
}

/// Dataset error type with full context
#[derive(Debug)]
pub struct DatasetError {
    /// Error code
    code: DatasetErrorCode,
    /// Human-readable message
    message: String,
    /// 1-based line number, for decode failures
    line: Option<u64>,
    /// Underlying error if applicable
    cause: Option<Cause>,
}

impl DatasetError {
    /// Create a configuration error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self {
            code: DatasetErrorCode::ConfigInvalid,
            message: message.into(),
            line: None,
            cause: None,
        }
    }

    /// Create a read failure
    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: DatasetErrorCode::ReadFailed,
            message: message.into(),
            line: None,
            cause: Some(Cause::Io(source)),
        }
    }

    /// Create a decode failure for the given line of a file
    pub fn decode_failed(path: &std::path::Path, line: u64, source: CodecError) -> Self {
        Self {
            code: DatasetErrorCode::DecodeFailed,
            message: format!("{} line {}: {}", path.display(), line, source),
            line: Some(line),
            cause: Some(Cause::Codec(source)),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> DatasetErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the failing line number, if applicable
    pub fn line(&self) -> Option<u64> {
        self.line
    }
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)?;
        if let Some(Cause::Io(ref source)) = self.cause {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Some(Cause::Io(e)) => Some(e),
            Some(Cause::Codec(e)) => Some(e),
            None => None,
        }
    }
}

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
