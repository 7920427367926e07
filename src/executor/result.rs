//! Result type for query and compare scans

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Output file and number of records written to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    /// Output file path
    #[serde(rename = "filename")]
    pub output_path: PathBuf,
    /// Data lines written (header excluded)
    #[serde(rename = "records")]
    pub matched_records: u64,
}

impl ExecutionResult {
    pub fn new(output_path: impl Into<PathBuf>, matched_records: u64) -> Self {
        Self {
            output_path: output_path.into(),
            matched_records,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Returns true if nothing matched
    pub fn is_empty(&self) -> bool {
        self.matched_records == 0
    }
}
