//! Tabula Prelude
//!
//! This crate re-exports the most frequently used public items from the
//! tabula crates. Down-stream applications can depend on `tabula-prelude` to
//! avoid long import lists and to stay insulated from internal module
//! reshuffles.

#![deny(warnings)]
#![deny(missing_docs)]

// Tables, import and errors --------------------------------------------------------------------

pub use tabula_core::{
    RecordTable, Table, TableConfig, TableError, TableResult,
};

// Record model -------------------------------------------------------------------------------

pub use tabula_types::{FieldValue, Record, Row, Schema, record_struct};
