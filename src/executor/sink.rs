//! Buffered batch writer
//!
//! Matched lines are collected in memory and appended to the output file
//! once `threshold` lines are pending; `finish` appends the remainder.
//! Every pushed line reaches the file exactly once. The header line, when
//! there is one, is written straight away so it always precedes the data.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::codec::{encode_row, encode_values, Dialect, Row};
use crate::observability::{log_event_with_fields, Event};

use super::errors::{ExecutorError, ExecutorResult};

/// Batched line writer shared by the query and compare scans
pub struct BatchWriter {
    path: PathBuf,
    file: File,
    dialect: Dialect,
    buffer: Vec<String>,
    threshold: usize,
    written: u64,
}

impl BatchWriter {
    /// Opens `path` for writing. Without `append` the file is truncated.
    pub fn create(
        path: impl AsRef<Path>,
        dialect: Dialect,
        threshold: usize,
        append: bool,
    ) -> ExecutorResult<Self> {
        let path = path.as_ref();
        let mut options = OpenOptions::new();
        options.create(true);
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }

        let file = options
            .open(path)
            .map_err(|e| ExecutorError::output(path, "Failed to open output", e))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            dialect,
            buffer: Vec::with_capacity(threshold),
            threshold: threshold.max(1),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Data lines already on disk.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Data lines waiting for the next flush.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Writes the header line immediately.
    pub fn write_header(&mut self, fields: &[String]) -> ExecutorResult<()> {
        let line = encode_values(fields.iter().map(String::as_str), &self.dialect)?;
        self.write_lines(std::slice::from_ref(&line))
    }

    /// Encodes a row and buffers it.
    pub fn push_row(&mut self, row: &Row) -> ExecutorResult<()> {
        let line = encode_row(row, &self.dialect)?;
        self.push_line(line)
    }

    /// Buffers an encoded line, flushing at the threshold.
    pub fn push_line(&mut self, line: String) -> ExecutorResult<()> {
        self.buffer.push(line);
        if self.buffer.len() >= self.threshold {
            self.flush()?;
        }
        Ok(())
    }

    /// Appends all buffered lines to the file.
    pub fn flush(&mut self) -> ExecutorResult<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }

        let mut lines = std::mem::take(&mut self.buffer);
        self.write_lines(&lines)?;
        let flushed = lines.len();
        self.written += flushed as u64;
        lines.clear();
        self.buffer = lines;

        let count = flushed.to_string();
        let total = self.written.to_string();
        log_event_with_fields(
            Event::BatchFlushed,
            &[("lines", count.as_str()), ("total", total.as_str())],
        );
        Ok(())
    }

    /// Flushes the remainder and returns the number of data lines written.
    pub fn finish(mut self) -> ExecutorResult<u64> {
        self.flush()?;
        self.file
            .sync_data()
            .map_err(|e| ExecutorError::output(&self.path, "Failed to sync output", e))?;
        Ok(self.written)
    }

    fn write_lines(&mut self, lines: &[String]) -> ExecutorResult<()> {
        let mut chunk = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines {
            chunk.push_str(line);
            chunk.push('\n');
        }
        self.file
            .write_all(chunk.as_bytes())
            .and_then(|_| self.file.flush())
            .map_err(|e| ExecutorError::output(&self.path, "Failed to write output", e))
    }
}
