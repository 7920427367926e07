//! Dataset handle

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::codec::{build_header_index, Dialect, HeaderIndex};
use crate::observability::{log_event_with_fields, Event};

use super::errors::{DatasetError, DatasetResult};
use super::reader::{strip_terminator, DatasetReader};

/// An open delimited file: path, dialect and parsed header.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    dialect: Dialect,
    header: HeaderIndex,
}

impl Dataset {
    /// Opens a dataset and parses its header line.
    ///
    /// # Errors
    ///
    /// - `DATATOOL_CONFIG_INVALID` if the path is empty or does not exist
    /// - `DATATOOL_READ_FAILED` if the first line cannot be read
    /// - `DATATOOL_DECODE_FAILED` if the header line cannot be tokenized
    pub fn open(path: impl AsRef<Path>, dialect: Dialect) -> DatasetResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(DatasetError::config_invalid("Dataset path must be provided"));
        }
        if !path.exists() {
            return Err(DatasetError::config_invalid(format!(
                "File must exist: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            DatasetError::read_failed(format!("Failed to open dataset: {}", path.display()), e)
        })?;

        let mut first_line = String::new();
        BufReader::new(file)
            .read_line(&mut first_line)
            .map_err(|e| DatasetError::read_failed("Failed to read header line", e))?;

        let header = build_header_index(strip_terminator(&first_line), &dialect)
            .map_err(|e| DatasetError::decode_failed(path, 1, e))?;

        let path_field = path.display().to_string();
        let fields_field = header.len().to_string();
        log_event_with_fields(
            Event::DatasetOpened,
            &[("path", path_field.as_str()), ("fields", fields_field.as_str())],
        );

        Ok(Self {
            path: path.to_path_buf(),
            dialect,
            header,
        })
    }

    /// Opens a comma separated, double-quote enclosed dataset.
    pub fn open_csv(path: impl AsRef<Path>) -> DatasetResult<Self> {
        Self::open(path, Dialect::default())
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the delimiter/quote configuration.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Returns the parsed header.
    pub fn header(&self) -> &HeaderIndex {
        &self.header
    }

    /// Opens a fresh reader positioned at the first data line.
    pub fn reader(&self) -> DatasetResult<DatasetReader<'_>> {
        DatasetReader::open(self)
    }
}
