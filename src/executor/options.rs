//! Execution options

use serde::{Deserialize, Serialize};

use crate::query::ValidationMode;

use super::errors::{ExecutorError, ExecutorResult};

/// Lines buffered before the output file is appended to
pub const DEFAULT_FLUSH_THRESHOLD: usize = 100;

/// Tunables shared by query and compare scans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionOptions {
    /// Buffered lines per output flush
    pub flush_threshold: usize,
    /// When clauses are checked against inferred row types
    pub validation: ValidationMode,
    /// Write a header line of the selected fields to compare output
    pub compare_header: bool,
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            validation: ValidationMode::default(),
            compare_header: false,
        }
    }
}

impl ExecutionOptions {
    pub fn with_flush_threshold(mut self, flush_threshold: usize) -> Self {
        self.flush_threshold = flush_threshold;
        self
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    pub fn with_compare_header(mut self, compare_header: bool) -> Self {
        self.compare_header = compare_header;
        self
    }

    /// Rejects a zero flush threshold.
    pub fn validate(&self) -> ExecutorResult<()> {
        if self.flush_threshold == 0 {
            return Err(ExecutorError::Options(
                "flush_threshold must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
