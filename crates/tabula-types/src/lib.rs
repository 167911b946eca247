//! Tabula Types
//!
//! This crate defines the record model used by `tabula-core`: the
//! [`FieldValue`] key/value type, dynamically shaped [`Record`]s over a shared
//! [`Schema`], and the [`Row`] trait that lets callers store their own
//! fixed-schema structs (see [`record_struct!`]).

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]

mod record;
mod row;
mod value;

pub use record::{Record, Schema, SchemaError};
pub use row::Row;
pub use value::FieldValue;

#[doc(hidden)]
pub use row::unraw as __unraw;
