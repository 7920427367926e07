//! Streaming, rewindable row reader
//!
//! Reads one line at a time from a buffered file handle. The byte offset of
//! the first data line is remembered so that `rewind` can seek straight back
//! to it; nested-loop comparisons rescan a dataset once per outer row this
//! way without reopening the file.
//!
//! Blank lines are skipped, except in a single-field dataset where a blank
//! line is a row whose one value is empty.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};

use crate::codec::{decode_row, Row};

use super::errors::{DatasetError, DatasetResult};
use super::handle::Dataset;

/// Removes a trailing `\n` or `\r\n`.
pub(crate) fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(|c| c == '\n' || c == '\r')
}

/// Sequential reader over the data lines of a dataset.
pub struct DatasetReader<'a> {
    /// Dataset being read
    dataset: &'a Dataset,
    /// Buffered reader
    reader: BufReader<File>,
    /// Byte offset of the first data line
    data_start: u64,
    /// 1-based number of the last line read (the header is line 1)
    line_number: u64,
    /// Line buffer reused across reads
    line: String,
}

impl<'a> DatasetReader<'a> {
    /// Opens the dataset file and skips the header line.
    pub fn open(dataset: &'a Dataset) -> DatasetResult<Self> {
        let path = dataset.path();
        let file = File::open(path).map_err(|e| {
            DatasetError::read_failed(format!("Failed to open dataset: {}", path.display()), e)
        })?;

        let mut reader = BufReader::new(file);
        let mut header = String::new();
        let data_start = reader
            .read_line(&mut header)
            .map_err(|e| DatasetError::read_failed("Failed to read header line", e))?
            as u64;

        Ok(Self {
            dataset,
            reader,
            data_start,
            line_number: 1,
            line: String::new(),
        })
    }

    /// Returns the dataset being read.
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Returns the 1-based number of the last line read.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Reads and decodes the next data line.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(row))` for a decoded line
    /// - `Ok(None)` at end of file
    /// - `Err(DATATOOL_DECODE_FAILED)` if the line does not match the header
    pub fn next_row(&mut self) -> DatasetResult<Option<Row>> {
        loop {
            self.line.clear();
            let read = self.reader.read_line(&mut self.line).map_err(|e| {
                DatasetError::read_failed(
                    format!("Failed to read line {}", self.line_number + 1),
                    e,
                )
            })?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let dataset = self.dataset;
            let content = strip_terminator(&self.line);
            if content.trim().is_empty() {
                match dataset.header().names() {
                    [only] => return Ok(Some(Row::from_iter([(only.clone(), String::new())]))),
                    _ => continue,
                }
            }

            let row = decode_row(content, dataset.dialect(), dataset.header())
                .map_err(|e| DatasetError::decode_failed(dataset.path(), self.line_number, e))?;
            return Ok(Some(row));
        }
    }

    /// Seeks back to the first data line.
    pub fn rewind(&mut self) -> DatasetResult<()> {
        self.reader
            .seek(SeekFrom::Start(self.data_start))
            .map_err(|e| DatasetError::read_failed("Failed to rewind dataset", e))?;
        self.line_number = 1;
        Ok(())
    }
}

impl Iterator for DatasetReader<'_> {
    type Item = DatasetResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}
