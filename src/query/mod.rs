//! Query model for row filtering
//!
//! # Components
//!
//! - `Clause`: one field / condition / value triple of a where-list
//! - `Condition`: the fixed registry of named binary predicates
//! - `Combinator`: ALL (AND) or ANY (OR) over clause results
//! - `QueryValidator`: checks a clause against a row's inferred types
//!
//! # Type rules
//!
//! - GREATER and LESS require a NUMERIC field
//! - BEFORE and AFTER require a DATE field
//! - CONTAINS, EQUALS, NOT and BETWEEN accept any type
//!
//! Predicates are total: once a clause has been validated, evaluating it
//! never fails. A value that cannot be coerced simply does not match.

mod ast;
mod conditions;
mod errors;
mod validator;

pub use ast::{Clause, ClauseValue, Combinator};
pub use conditions::Condition;
pub use errors::{QueryError, QueryErrorCode, QueryResult};
pub use validator::{QueryValidator, ValidationMode};
