//! Inferred value types

use std::collections::HashMap;
use std::fmt;

/// Type of a single field value, as inferred from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Date,
    Numeric,
    String,
}

impl TypeTag {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            TypeTag::Date => "date",
            TypeTag::Numeric => "numeric",
            TypeTag::String => "string",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// Field name → inferred type for one row.
pub type TypeMap = HashMap<String, TypeTag>;
