use crate::value::FieldValue;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while building a schema or a record against it
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A schema needs at least one field
    #[error("Schema must declare at least one field")]
    NoFields,

    /// Field names must be non-empty
    #[error("Field name at position {position} is empty")]
    EmptyFieldName {
        /// Zero-based position of the offending name
        position: usize,
    },

    /// Field names must be unique within a schema
    #[error("Duplicate field name '{name}'")]
    DuplicateField {
        /// The repeated name
        name: String,
    },

    /// A record was given a different number of values than the schema has fields
    #[error("Expected {expected} values, got {actual}")]
    ArityMismatch {
        /// Field count of the schema
        expected: usize,
        /// Number of values supplied
        actual: usize,
    },
}

/// Ordered, duplicate-free field names shared by every record of one shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Schema {
    names: Box<[String]>,
}

impl Schema {
    /// Build a schema from field names in declaration order
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] when no names are given, a name is empty, or a
    /// name repeats.
    pub fn new<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(SchemaError::NoFields);
        }

        for (position, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName { position });
            }
            if names[..position].contains(name) {
                return Err(SchemaError::DuplicateField {
                    name: name.clone(),
                });
            }
        }

        Ok(Self {
            names: names.into_boxed_slice(),
        })
    }

    /// Field names in declaration order
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed schema; provided for API symmetry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of a field by name
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// The first declared field, the default index of a table
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// A dynamically shaped, immutable record
///
/// Equality and hashing are structural over the field names and values, so
/// two records built independently from the same data collapse to one entry
/// in a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    schema: Arc<Schema>,
    values: Box<[FieldValue]>,
}

impl Record {
    /// Create a record from values given in schema order
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ArityMismatch`] if the number of values differs
    /// from the schema's field count.
    pub fn new(schema: Arc<Schema>, values: Vec<FieldValue>) -> Result<Self, SchemaError> {
        if values.len() != schema.len() {
            return Err(SchemaError::ArityMismatch {
                expected: schema.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            schema,
            values: values.into_boxed_slice(),
        })
    }

    /// The shared schema
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Values in schema order
    #[must_use]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Value of a named field
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema.position(name).map(|i| &self.values[i])
    }

    /// Iterate `(field name, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.schema.names().iter().map(String::as_str).zip(self.values.iter())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record(")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(f, ")")
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog_schema() -> Arc<Schema> {
        Arc::new(Schema::new(["id", "name", "collar"]).unwrap())
    }

    #[test]
    fn test_schema_rejects_bad_names() {
        assert_eq!(Schema::new(Vec::<String>::new()), Err(SchemaError::NoFields));
        assert_eq!(Schema::new(["a", ""]), Err(SchemaError::EmptyFieldName { position: 1 }));
        assert_eq!(
            Schema::new(["a", "b", "a"]),
            Err(SchemaError::DuplicateField {
                name: "a".to_string()
            })
        );
    }

    #[test]
    fn test_schema_lookup() {
        let schema = dog_schema();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.first(), Some("id"));
        assert_eq!(schema.position("collar"), Some(2));
        assert_eq!(schema.position("tail"), None);
    }

    #[test]
    fn test_record_arity_is_checked() {
        let err = Record::new(dog_schema(), vec!["1".into(), "Rex".into()]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ArityMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_records_compare_structurally() {
        let a = Record::new(dog_schema(), vec!["1".into(), "Rex".into(), "red".into()]).unwrap();
        let b = Record::new(dog_schema(), vec!["1".into(), "Rex".into(), "red".into()]).unwrap();
        let c = Record::new(dog_schema(), vec!["2".into(), "Rex".into(), "red".into()]).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.get("name"), Some(&FieldValue::from("Rex")));
        assert_eq!(a.get("tail"), None);
    }

    #[test]
    fn test_record_display_and_serialize() {
        let rex = Record::new(dog_schema(), vec!["1".into(), "Rex".into(), "red".into()]).unwrap();
        assert_eq!(rex.to_string(), "Record(id=1, name=Rex, collar=red)");

        let json = serde_json::to_value(&rex).unwrap();
        assert_eq!(json["name"], serde_json::json!({ "String": "Rex" }));
    }
}
