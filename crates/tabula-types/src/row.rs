use crate::record::Record;
use crate::value::FieldValue;
use std::fmt::Debug;
use std::hash::Hash;

/// A fixed-schema, immutable value that can be stored in a table
///
/// Equality and hashing must be structural: tables deduplicate rows by value,
/// never by identity.
pub trait Row: Clone + Eq + Hash + Debug {
    /// Field names in declaration order
    fn field_names(&self) -> Vec<&str>;

    /// Value of a named field, or `None` when the row has no such field
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Field names fixed by the type itself, when known without an instance
    ///
    /// Lets a table reject an unknown index field even when it has no rows.
    /// Dynamically shaped rows return `None`.
    fn declared_fields() -> Option<Vec<&'static str>> {
        None
    }

    /// The first declared field, used as the default table index
    fn first_field(&self) -> Option<String> {
        self.field_names().first().map(|name| (*name).to_string())
    }
}

impl Row for Record {
    fn field_names(&self) -> Vec<&str> {
        self.schema().names().iter().map(String::as_str).collect()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }

    fn first_field(&self) -> Option<String> {
        self.schema().first().map(str::to_string)
    }
}

/// Strip the `r#` prefix that `stringify!` keeps on raw identifiers
#[doc(hidden)]
#[must_use]
pub fn unraw(ident: &'static str) -> &'static str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Declare a record struct with structural equality and a [`Row`] impl
///
/// Every field type must convert into [`FieldValue`] (`String`, `i64`, `i32`,
/// `u32`, `bool`). Raw identifiers such as `r#ref` are exposed under their
/// plain name (`ref`).
///
/// ```
/// tabula_types::record_struct! {
///     pub struct CatRow {
///         pub name: String,
///         pub ref_no: i64,
///         pub floof: bool,
///     }
/// }
///
/// use tabula_types::Row;
/// let cat = CatRow::new("Freddy", 25, true);
/// assert_eq!(cat.first_field().as_deref(), Some("name"));
/// ```
#[macro_export]
macro_rules! record_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty, )+
        }

        impl $name {
            /// Create a row from field values in declaration order
            #[allow(clippy::too_many_arguments)]
            $vis fn new($( $field: impl ::std::convert::Into<$ty> ),+) -> Self {
                Self { $( $field: $field.into(), )+ }
            }
        }

        impl $crate::Row for $name {
            fn field_names(&self) -> ::std::vec::Vec<&str> {
                ::std::vec![$( $crate::__unraw(stringify!($field)) ),+]
            }

            fn declared_fields() -> ::std::option::Option<::std::vec::Vec<&'static str>> {
                ::std::option::Option::Some(::std::vec![$( $crate::__unraw(stringify!($field)) ),+])
            }

            fn field(&self, name: &str) -> ::std::option::Option<$crate::FieldValue> {
                $(
                    if name == $crate::__unraw(stringify!($field)) {
                        return ::std::option::Option::Some($crate::FieldValue::from(
                            ::std::clone::Clone::clone(&self.$field),
                        ));
                    }
                )+
                ::std::option::Option::None
            }
        }
    };
}
