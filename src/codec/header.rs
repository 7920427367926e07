//! Header index: field name → zero-based column position

use std::collections::HashMap;

use super::dialect::Dialect;
use super::errors::{CodecError, CodecResult};
use super::row::tokenize;

/// Parsed header line of a delimited file.
///
/// Names are trimmed and unique. Column order is preserved for diagnostics
/// and for decoding rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
    names: Vec<String>,
}

impl HeaderIndex {
    /// Builds an index from names given in column order.
    pub fn from_names<I, S>(names: I) -> CodecResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for name in names {
            let name = name.into().trim().to_string();
            if index.positions.contains_key(&name) {
                return Err(CodecError::DuplicateHeader(name));
            }
            index.positions.insert(name.clone(), index.names.len());
            index.names.push(name);
        }
        Ok(index)
    }

    /// Returns the column position of a field.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Returns true if the field exists.
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Field names in column order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the header has no fields.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the requested fields that are not part of this header,
    /// in request order.
    pub fn missing<'f>(&self, fields: &'f [String]) -> Vec<&'f str> {
        fields
            .iter()
            .filter(|f| !self.contains(f))
            .map(String::as_str)
            .collect()
    }
}

/// Builds the header index from a header line.
///
/// An empty line yields an empty index.
pub fn build_header_index(line: &str, dialect: &Dialect) -> CodecResult<HeaderIndex> {
    HeaderIndex::from_names(tokenize(line, dialect)?)
}
