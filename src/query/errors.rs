//! Query error types
//!
//! Error codes:
//! - DATATOOL_FIELD_HEADER (unknown field in select list or clause)
//! - DATATOOL_CONDITION_TYPE (condition not legal for the field's type)
//! - DATATOOL_UNKNOWN_CONDITION (condition name not registered)
//! - DATATOOL_EMPTY_SELECTION (nothing to project)

use std::fmt;

use crate::schema::TypeTag;

use super::conditions::Condition;

/// Query-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorCode {
    /// Field not present in the dataset header
    FieldHeader,
    /// Condition used on a field of the wrong type
    ConditionType,
    /// Condition name not in the registry
    UnknownCondition,
    /// Select list is empty
    EmptySelection,
}

impl QueryErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            QueryErrorCode::FieldHeader => "DATATOOL_FIELD_HEADER",
            QueryErrorCode::ConditionType => "DATATOOL_CONDITION_TYPE",
            QueryErrorCode::UnknownCondition => "DATATOOL_UNKNOWN_CONDITION",
            QueryErrorCode::EmptySelection => "DATATOOL_EMPTY_SELECTION",
        }
    }
}

impl fmt::Display for QueryErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Query error type with full context
#[derive(Debug, Clone)]
pub struct QueryError {
    /// Error code
    code: QueryErrorCode,
    /// Human-readable message
    message: String,
    /// Offending fields
    fields: Vec<String>,
    /// Expected field type, for condition type errors
    expected: Option<TypeTag>,
    /// Offending condition group
    conditions: Vec<Condition>,
}

impl QueryError {
    fn new(code: QueryErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            fields: Vec::new(),
            expected: None,
            conditions: Vec::new(),
        }
    }

    /// Create a field header error listing unknown fields and the known header
    pub fn field_header<F, H>(fields: F, headers: H) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| h.as_ref().to_string())
            .collect();
        let mut err = Self::new(
            QueryErrorCode::FieldHeader,
            format!(
                "Fields \"{}\" do not exist in headers, data has \"{}\" headers",
                fields.join(", "),
                headers.join(", ")
            ),
        );
        err.fields = fields;
        err
    }

    /// Create a condition type error
    pub fn condition_type(field: impl Into<String>, expected: TypeTag, conditions: &[Condition]) -> Self {
        let field = field.into();
        let names: Vec<&str> = conditions.iter().map(Condition::name).collect();
        let mut err = Self::new(
            QueryErrorCode::ConditionType,
            format!(
                "Value of '{}' must be {} to use {}",
                field,
                expected.type_name(),
                names.join(", ")
            ),
        );
        err.fields = vec![field];
        err.expected = Some(expected);
        err.conditions = conditions.to_vec();
        err
    }

    /// Create an unknown condition error enumerating the registry
    pub fn unknown_condition(name: impl Into<String>) -> Self {
        Self::new(
            QueryErrorCode::UnknownCondition,
            format!(
                "Condition '{}' must be one of {}",
                name.into(),
                Condition::names().join(", ")
            ),
        )
    }

    /// Create an empty selection error
    pub fn empty_selection() -> Self {
        Self::new(
            QueryErrorCode::EmptySelection,
            "At least one field must be selected".into(),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> QueryErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending fields
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the expected type for condition type errors
    pub fn expected_type(&self) -> Option<TypeTag> {
        self.expected
    }

    /// Returns the offending condition group
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for QueryError {}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
