//! Error handling for table construction, re-indexing, lookup and import
//!
//! Every failure is raised by the call that detects it. Nothing here is
//! transient, so callers are expected to report rather than retry.

use std::path::{Path, PathBuf};
use tabula_types::{FieldValue, SchemaError};
use thiserror::Error;

/// Error type for all table operations
#[derive(Error, Debug)]
pub enum TableError {
    /// The default index was requested but there is no record to inspect
    #[error("Cannot infer an index field from empty input")]
    EmptyInput,

    /// The chosen index field does not identify every record
    #[error("Cannot use '{field}' as index: not unique for all items")]
    DuplicateIndex { field: String },

    /// The chosen index field is not part of the records' schema
    #[error("Cannot use '{field}' as index: no such field")]
    UnknownField { field: String },

    /// Two records in one table declare different fields
    #[error("Records do not share one field set: expected {expected:?}, found {found:?}")]
    MismatchedFields {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Lookup miss
    #[error("Key not found: {key}")]
    KeyNotFound { key: FieldValue },

    /// An imported data line does not have the header's column count
    #[error("Malformed row (column count differs from header): {raw_line}")]
    MalformedRow { raw_line: String },

    /// The header line of an import could not be turned into a schema
    #[error("Invalid header: {reason}")]
    InvalidHeader { reason: String },

    /// Reading the import source failed
    #[error("I/O error reading {}: {source}", source_name(.path.as_deref()))]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    /// A record did not fit its schema
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl TableError {
    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            TableError::EmptyInput => "empty_input",
            TableError::DuplicateIndex { .. } => "duplicate_index",
            TableError::UnknownField { .. } => "unknown_field",
            TableError::MismatchedFields { .. } => "mismatched_fields",
            TableError::KeyNotFound { .. } => "key_not_found",
            TableError::MalformedRow { .. } => "malformed_row",
            TableError::InvalidHeader { .. } => "invalid_header",
            TableError::Io { .. } => "io",
            TableError::Schema(_) => "schema",
        }
    }

    /// Create a duplicate index error
    pub fn duplicate_index(field: &str) -> Self {
        Self::DuplicateIndex {
            field: field.to_string(),
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(field: &str) -> Self {
        Self::UnknownField {
            field: field.to_string(),
        }
    }

    /// Create a mismatched fields error from two rows' field names
    pub fn mismatched_fields(expected: &[&str], found: &[&str]) -> Self {
        Self::MismatchedFields {
            expected: expected.iter().map(|name| (*name).to_string()).collect(),
            found: found.iter().map(|name| (*name).to_string()).collect(),
        }
    }

    /// Create a malformed row error carrying the line as read
    pub fn malformed_row(raw_line: &str) -> Self {
        Self::MalformedRow {
            raw_line: raw_line.to_string(),
        }
    }

    /// Create an I/O error, optionally naming the file being read
    pub fn io(path: Option<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path, source }
    }
}

fn source_name(path: Option<&Path>) -> String {
    path.map_or_else(|| "<reader>".to_string(), |p| p.display().to_string())
}

/// Result type alias for table operations
pub type TableResult<T> = Result<T, TableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_index_names_field() {
        let err = TableError::duplicate_index("floof");
        assert_eq!(err.to_string(), "Cannot use 'floof' as index: not unique for all items");
        assert_eq!(err.category(), "duplicate_index");
    }

    #[test]
    fn test_malformed_row_keeps_raw_line() {
        let err = TableError::malformed_row("3\tBandit\t\t\t40");
        assert!(err.to_string().contains("3\tBandit\t\t\t40"));
    }

    #[test]
    fn test_io_error_display() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = TableError::io(Some(PathBuf::from("dogs.tsv")), source);
        assert_eq!(err.to_string(), "I/O error reading dogs.tsv: missing");

        let source = std::io::Error::new(std::io::ErrorKind::InvalidData, "not utf-8");
        let err = TableError::io(None, source);
        assert_eq!(err.to_string(), "I/O error reading <reader>: not utf-8");
        assert_eq!(err.category(), "io");
    }

    #[test]
    fn test_mismatched_fields_lists_both_sides() {
        let err = TableError::mismatched_fields(&["id", "name"], &["id", "colour", "size"]);
        assert_eq!(
            err.to_string(),
            "Records do not share one field set: expected [\"id\", \"name\"], \
             found [\"id\", \"colour\", \"size\"]"
        );
        assert_eq!(err.category(), "mismatched_fields");
    }

    #[test]
    fn test_schema_error_converts() {
        let err: TableError = SchemaError::NoFields.into();
        assert_eq!(err.category(), "schema");
    }
}
