//! Clause validation against inferred row types

use serde::{Deserialize, Serialize};

use crate::schema::{TypeMap, TypeTag};

use super::ast::Clause;
use super::conditions::Condition;
use super::errors::{QueryError, QueryResult};

/// When clauses are validated during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Validate against every row's inferred types
    #[default]
    EveryRow,
    /// Validate against the first row only. The caller asserts the file is
    /// homogeneously typed; later rows of another type simply do not match.
    FirstRow,
}

/// Validates clauses before they are evaluated
pub struct QueryValidator;

impl QueryValidator {
    /// Resolves a clause's condition in the registry.
    pub fn resolve(clause: &Clause) -> QueryResult<Condition> {
        let name = clause.condition.trim().to_uppercase();
        Condition::lookup(&name).ok_or_else(|| QueryError::unknown_condition(name))
    }

    /// Validates a clause against a row's types and returns its condition.
    ///
    /// # Errors
    ///
    /// - `DATATOOL_UNKNOWN_CONDITION` if the condition is not registered
    /// - `DATATOOL_CONDITION_TYPE` if the field's type does not fit the condition
    pub fn validate(types: &TypeMap, clause: &Clause) -> QueryResult<Condition> {
        let condition = Self::resolve(clause)?;
        Self::check_type(&clause.field, condition, types.get(&clause.field).copied())?;
        Ok(condition)
    }

    /// Checks a resolved condition against the inferred type of its field.
    ///
    /// A field with no inferred type fails any type-restricted condition.
    pub fn check_type(field: &str, condition: Condition, actual: Option<TypeTag>) -> QueryResult<()> {
        match condition.required_type() {
            Some(required) if actual != Some(required) => Err(QueryError::condition_type(
                field,
                required,
                condition.group(),
            )),
            _ => Ok(()),
        }
    }
}
