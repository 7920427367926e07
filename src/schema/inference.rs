//! Row type inference

use crate::codec::Row;

use super::literals::{parse_date, parse_numeric};
use super::types::{TypeMap, TypeTag};

/// Classifies row values as DATE, NUMERIC or STRING.
///
/// Stateless; every call looks only at the values it is given.
pub struct TypeInferencer;

impl TypeInferencer {
    /// Infers the type of every field of a row.
    pub fn infer(row: &Row) -> TypeMap {
        row.iter()
            .map(|(name, value)| (name.to_string(), Self::infer_value(value)))
            .collect()
    }

    /// Infers the types of the named fields only.
    ///
    /// Names not present in the row are left out of the map.
    pub fn infer_fields<'f, I>(row: &Row, fields: I) -> TypeMap
    where
        I: IntoIterator<Item = &'f str>,
    {
        let mut types = TypeMap::new();
        for field in fields {
            if types.contains_key(field) {
                continue;
            }
            if let Some(value) = row.get(field) {
                types.insert(field.to_string(), Self::infer_value(value));
            }
        }
        types
    }

    /// Infers the type of a single value: date, then numeric, then string.
    pub fn infer_value(value: &str) -> TypeTag {
        if parse_date(value).is_some() {
            TypeTag::Date
        } else if parse_numeric(value).is_some() {
            TypeTag::Numeric
        } else {
            TypeTag::String
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        let mut row = Row::new();
        row.insert("email", "tony@stark.com");
        row.insert("location", "malibu");
        row.insert("dob", "31/05/1976");
        row.insert("age", "37");
        row
    }

    #[test]
    fn test_infer_whole_row() {
        let types = TypeInferencer::infer(&sample_row());

        assert_eq!(types.len(), 4);
        assert_eq!(types["email"], TypeTag::String);
        assert_eq!(types["location"], TypeTag::String);
        assert_eq!(types["dob"], TypeTag::Date);
        assert_eq!(types["age"], TypeTag::Numeric);
    }

    #[test]
    fn test_infer_selected_fields() {
        let types = TypeInferencer::infer_fields(&sample_row(), ["age", "missing", "age"]);
        assert_eq!(types.len(), 1);
        assert_eq!(types["age"], TypeTag::Numeric);
    }

    #[test]
    fn test_date_wins_over_numeric() {
        // Looks numeric-ish but the date parser accepts it
        assert_eq!(TypeInferencer::infer_value("2020-01-02"), TypeTag::Date);
        assert_eq!(TypeInferencer::infer_value("3.5"), TypeTag::Numeric);
        assert_eq!(TypeInferencer::infer_value(""), TypeTag::String);
    }
}
