//! Row decoding and encoding

use super::dialect::Dialect;
use super::errors::{CodecError, CodecResult};
use super::header::HeaderIndex;

/// One decoded line: field name → value, in column (or projection) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty row with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Sets a field, replacing the value if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Appends a field without checking for an existing one of that name.
    pub(crate) fn push(&mut self, name: &str, value: &str) {
        self.fields.push((name.to_string(), value.to_string()));
    }

    /// Returns the value of a field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Iterates over values in order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, v)| v.as_str())
    }

    /// Builds a new row holding only `fields`, in the order given.
    ///
    /// Fields absent from this row are projected as empty values.
    pub fn project(&self, fields: &[String]) -> Row {
        fields
            .iter()
            .map(|f| (f.clone(), self.get(f).unwrap_or_default().to_string()))
            .collect()
    }
}

impl FromIterator<(String, String)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// Splits one line into trimmed tokens.
pub(crate) fn tokenize(line: &str, dialect: &Dialect) -> CodecResult<Vec<String>> {
    let mut reader = dialect.reader().from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Ok(Vec::new());
    }
    Ok(record.iter().map(str::to_string).collect())
}

/// Decodes one data line against a header index.
///
/// Fails if the number of values differs from the number of header fields.
pub fn decode_row(line: &str, dialect: &Dialect, header: &HeaderIndex) -> CodecResult<Row> {
    let values = tokenize(line, dialect)?;
    if values.len() != header.len() {
        return Err(CodecError::FieldCountMismatch {
            expected: header.len(),
            found: values.len(),
            line: line.to_string(),
        });
    }

    let mut row = Row::with_capacity(values.len());
    for (name, value) in header.names().iter().zip(values) {
        row.fields.push((name.clone(), value));
    }
    Ok(row)
}

/// Encodes a row's values as one line, without a trailing newline.
pub fn encode_row(row: &Row, dialect: &Dialect) -> CodecResult<String> {
    encode_values(row.values(), dialect)
}

/// Encodes values as one line, without a trailing newline.
pub fn encode_values<'v, I>(values: I, dialect: &Dialect) -> CodecResult<String>
where
    I: IntoIterator<Item = &'v str>,
{
    let values: Vec<&str> = values.into_iter().collect();
    if values.is_empty() {
        return Err(CodecError::EmptyRow);
    }

    let mut writer = dialect.writer().from_writer(Vec::new());
    writer.write_record(&values)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| CodecError::Io(e.into_error()))?;

    let mut line = String::from_utf8(bytes)?;
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}
