//! Tab-separated text import
//!
//! The first line holds the column names, every following line one record:
//!
//! ```text
//! name⇥number⇥cake
//! Winnifred⇥1⇥carrot
//! Dom⇥⇥2⇥berry
//! ```
//!
//! Runs of TABs count as a single delimiter so columns can be aligned
//! visually, which also means fields may not be left empty. Values are kept
//! as text.

use crate::config::TableConfig;
use crate::constants::tsv::FIELD_DELIMITER;
use crate::error::{TableError, TableResult};
use crate::table::Table;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tabula_types::{FieldValue, Record, Schema};
use tracing::{debug, instrument};

/// Split a line on runs of TABs after trimming surrounding whitespace
fn split_fields(line: &str) -> Vec<&str> {
    line.trim()
        .split(FIELD_DELIMITER)
        .filter(|field| !field.is_empty())
        .collect()
}

/// Parse tab-separated text into records sharing one schema
///
/// Every line after the header is a record, so a blank line in the data is
/// malformed. A final newline does not start a new line.
///
/// # Errors
///
/// - [`TableError::EmptyInput`] if there is no header line
/// - [`TableError::InvalidHeader`] if the header has no names or repeats one
/// - [`TableError::MalformedRow`] if a line's column count differs from the
///   header, including blank lines
pub fn parse_tsv(text: &str) -> TableResult<Vec<Record>> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(TableError::EmptyInput)?;

    let schema = Schema::new(split_fields(header)).map_err(|err| TableError::InvalidHeader {
        reason: err.to_string(),
    })?;
    let schema = Arc::new(schema);

    let mut records = Vec::new();
    for line in lines {
        let fields = split_fields(line);
        if fields.len() != schema.len() {
            return Err(TableError::malformed_row(line));
        }

        let values = fields.into_iter().map(FieldValue::from).collect();
        records.push(Record::new(Arc::clone(&schema), values)?);
    }

    debug!(columns = schema.len(), records = records.len(), "Parsed tab-separated text");
    Ok(records)
}

/// A table of records imported from text
pub type RecordTable = Table<Record>;

impl Table<Record> {
    /// Build a table from tab-separated text
    ///
    /// `index` defaults to the first column.
    ///
    /// # Errors
    ///
    /// Any [`parse_tsv`] error, or any error of [`Table::new`].
    pub fn from_tsv_str(text: &str, index: Option<&str>) -> TableResult<Self> {
        Self::from_tsv_str_with_config(text, index, &TableConfig::default())
    }

    /// Build a table from tab-separated text with explicit configuration
    ///
    /// # Errors
    ///
    /// Same as [`Table::from_tsv_str`].
    pub fn from_tsv_str_with_config(
        text: &str,
        index: Option<&str>,
        config: &TableConfig,
    ) -> TableResult<Self> {
        Self::with_config(parse_tsv(text)?, index, config)
    }

    /// Read a whole source, then build a table from it
    ///
    /// # Errors
    ///
    /// [`TableError::Io`] if reading fails or the text is not UTF-8, otherwise
    /// the same as [`Table::from_tsv_str`].
    #[instrument(skip(reader))]
    pub fn from_tsv_reader(mut reader: impl Read, index: Option<&str>) -> TableResult<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| TableError::io(None, source))?;
        Self::from_tsv_str(&text, index)
    }

    /// Read a `.tsv` file, then build a table from it
    ///
    /// # Errors
    ///
    /// [`TableError::Io`] naming the path if the file cannot be read, otherwise
    /// the same as [`Table::from_tsv_str`].
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_tsv_path(path: impl AsRef<Path>, index: Option<&str>) -> TableResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| TableError::io(Some(path.to_path_buf()), source))?;
        Self::from_tsv_str(&text, index)
    }
}
