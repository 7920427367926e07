//! Field delimiter and quote configuration

use super::errors::{CodecError, CodecResult};

/// Delimiter and quote character shared by every line of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field delimiter (default `,`)
    pub delimiter: u8,
    /// Quote character enclosing values that contain the delimiter (default `"`)
    pub quote: u8,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl Dialect {
    /// Creates a dialect from single-byte characters.
    pub fn new(delimiter: u8, quote: u8) -> CodecResult<Self> {
        if delimiter == quote {
            return Err(CodecError::AmbiguousDialect(delimiter as char));
        }
        Ok(Self { delimiter, quote })
    }

    /// Tab separated, double-quote enclosed.
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            quote: b'"',
        }
    }

    /// Sets the delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the quote character.
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }

    pub(crate) fn reader(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .flexible(true)
            .trim(csv::Trim::All);
        builder
    }

    pub(crate) fn writer(&self) -> csv::WriterBuilder {
        let mut builder = csv::WriterBuilder::new();
        builder
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quote_style(csv::QuoteStyle::Necessary)
            .terminator(csv::Terminator::Any(b'\n'));
        builder
    }
}
