#![deny(warnings)]
#![allow(missing_docs)]
//! Core functionality for tabula indexed tables.
//!
//! A [`Table`] is an immutable, deduplicated set of rows with O(1) lookup by
//! one field whose values are unique across the set. Re-indexing by another
//! field produces a new view over the same rows; recently used views are
//! cached. Tables of text records can be imported from tab-separated files.

/// Bounded LRU cache for re-indexed views
mod cache;
/// Table configuration
pub mod config;
/// Core constants
pub mod constants;
/// Error types for table operations
pub mod error;
#[cfg(test)]
mod send_sync_test;
/// The indexed table itself
pub mod table;
/// Tab-separated text import
pub mod tsv;

pub use cache::CacheStats;
pub use config::TableConfig;
pub use error::{TableError, TableResult};
pub use table::{Iter, Table};
pub use tsv::{RecordTable, parse_tsv};

// Record model re-exported so most callers only depend on this crate
pub use tabula_types::{FieldValue, Record, Row, Schema, SchemaError, record_struct};
