//! Immutable record table indexed by a single unique field
//!
//! A [`Table`] owns a deduplicated set of rows shared through an `Arc`, plus a
//! validated key index for one field. Re-indexing shares the row set and only
//! builds (or reuses) a key index for the new field.

use crate::cache::{CacheStats, LruCache};
use crate::config::TableConfig;
use crate::error::{TableError, TableResult};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tabula_types::{FieldValue, Row};
use tracing::{debug, instrument};

type KeySlots = HashMap<FieldValue, usize, ahash::RandomState>;

/// Validated mapping from index-field value to row position
#[derive(Debug)]
struct KeyIndex {
    field: String,
    slots: KeySlots,
}

impl KeyIndex {
    fn build<R: Row>(rows: &[R], field: &str) -> TableResult<Self> {
        // With no rows to inspect, fall back to the fields the row type declares
        if rows.is_empty()
            && R::declared_fields().is_some_and(|names| !names.iter().any(|name| *name == field))
        {
            return Err(TableError::unknown_field(field));
        }

        let mut slots = KeySlots::with_capacity_and_hasher(rows.len(), ahash::RandomState::new());

        for (position, row) in rows.iter().enumerate() {
            let key = row.field(field).ok_or_else(|| TableError::unknown_field(field))?;
            if slots.insert(key, position).is_some() {
                return Err(TableError::duplicate_index(field));
            }
        }

        Ok(Self {
            field: field.to_string(),
            slots,
        })
    }
}

/// Every row must declare the same fields, in the same order, as the first
fn check_fields<R: Row>(rows: &[R]) -> TableResult<()> {
    let Some((first, rest)) = rows.split_first() else {
        return Ok(());
    };

    let expected = first.field_names();
    for row in rest {
        let found = row.field_names();
        if found != expected {
            return Err(TableError::mismatched_fields(&expected, &found));
        }
    }
    Ok(())
}

/// The deduplicated rows shared by every view over them
struct RowSet<R> {
    rows: Box<[R]>,
    /// Key indexes already validated for this row set, by field name
    indexes: Mutex<LruCache<String, Arc<KeyIndex>>>,
}

impl<R> RowSet<R> {
    fn indexes(&self) -> MutexGuard<'_, LruCache<String, Arc<KeyIndex>>> {
        // Cached indexes are immutable once inserted, so a poisoned lock is still usable
        self.indexes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An immutable collection of rows using one field as an index
pub struct Table<R: Row> {
    rows: Arc<RowSet<R>>,
    index: Arc<KeyIndex>,
}

impl<R: Row> Table<R> {
    /// Build a table, indexed by `index` or by the first declared field
    ///
    /// Rows that are structurally equal are collapsed; input order is not kept.
    ///
    /// # Errors
    ///
    /// - [`TableError::EmptyInput`] when `index` is `None` and there are no rows
    /// - [`TableError::MismatchedFields`] when rows declare different fields
    /// - [`TableError::UnknownField`] when the rows have no such field
    /// - [`TableError::DuplicateIndex`] when two rows share an index value
    pub fn new<I>(rows: I, index: Option<&str>) -> TableResult<Self>
    where
        I: IntoIterator<Item = R>,
    {
        Self::with_config(rows, index, &TableConfig::default())
    }

    /// Build a table with explicit configuration
    ///
    /// # Errors
    ///
    /// Same as [`Table::new`].
    pub fn with_config<I>(rows: I, index: Option<&str>, config: &TableConfig) -> TableResult<Self>
    where
        I: IntoIterator<Item = R>,
    {
        let mut rows = rows.into_iter().peekable();

        let field = match index {
            Some(field) => field.to_string(),
            None => rows
                .peek()
                .ok_or(TableError::EmptyInput)?
                .first_field()
                .ok_or(TableError::EmptyInput)?,
        };

        let unique: HashSet<R, ahash::RandomState> = rows.collect();
        let rows: Box<[R]> = unique.into_iter().collect();
        check_fields(&rows)?;

        let index = Arc::new(KeyIndex::build(&rows, &field)?);
        debug!(rows = rows.len(), index = %field, "Built table");

        let mut cache = LruCache::new(config.reindex_cache_capacity);
        cache.put(field, Arc::clone(&index));

        let rows = Arc::new(RowSet {
            rows,
            indexes: Mutex::new(cache),
        });
        Ok(Self { rows, index })
    }

    /// The field this view is indexed by
    pub fn index_field(&self) -> &str {
        &self.index.field
    }

    /// A view over the same rows indexed by `field`
    ///
    /// Results are cached per row set, so asking again for a recently used
    /// field returns a table sharing the same index (see [`Table::ptr_eq`]).
    ///
    /// # Errors
    ///
    /// [`TableError::DuplicateIndex`] or [`TableError::UnknownField`] if
    /// `field` cannot index these rows. Failures are not cached.
    #[instrument(skip(self), fields(rows = self.len()))]
    pub fn with_index(&self, field: &str) -> TableResult<Self> {
        if let Some(index) = self.rows.indexes().get(field) {
            debug!("Re-index cache hit");
            return Ok(Self {
                rows: Arc::clone(&self.rows),
                index,
            });
        }

        debug!("Re-index cache miss");
        let index = Arc::new(KeyIndex::build(&self.rows.rows, field)?);
        self.rows.indexes().put(field.to_string(), Arc::clone(&index));

        Ok(Self {
            rows: Arc::clone(&self.rows),
            index,
        })
    }

    /// Look up the row whose index field equals `key`
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if no row has that key.
    pub fn get(&self, key: impl Into<FieldValue>) -> TableResult<&R> {
        let key = key.into();
        match self.index.slots.get(&key) {
            Some(&position) => Ok(&self.rows.rows[position]),
            None => Err(TableError::KeyNotFound { key }),
        }
    }

    /// Whether a row with index value `key` exists
    pub fn contains_key(&self, key: impl Into<FieldValue>) -> bool {
        self.index.slots.contains_key(&key.into())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.rows.is_empty()
    }

    /// Index values, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &FieldValue> + '_ {
        self.index.slots.keys()
    }

    /// Rows, in no particular order
    pub fn values(&self) -> impl Iterator<Item = &R> + '_ {
        self.rows.rows.iter()
    }

    /// `(index value, row)` pairs, in no particular order
    pub fn iter(&self) -> Iter<'_, R> {
        Iter {
            slots: self.index.slots.iter(),
            rows: &self.rows.rows,
        }
    }

    /// Whether both tables are the same cached view: same rows, same index instance
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.rows, &other.rows) && Arc::ptr_eq(&this.index, &other.index)
    }

    /// Occupancy of the re-index cache shared by views of these rows
    pub fn cache_stats(&self) -> CacheStats {
        self.rows.indexes().stats()
    }
}

/// Iterator over `(index value, row)` pairs of a [`Table`]
pub struct Iter<'a, R> {
    slots: std::collections::hash_map::Iter<'a, FieldValue, usize>,
    rows: &'a [R],
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = (&'a FieldValue, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next().map(|(key, &position)| (key, &self.rows[position]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl<R> ExactSizeIterator for Iter<'_, R> {}

impl<'a, R: Row> IntoIterator for &'a Table<R> {
    type Item = (&'a FieldValue, &'a R);
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: Row> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            index: Arc::clone(&self.index),
        }
    }
}

impl<R: Row> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("index", &self.index.field)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<R: Row> fmt::Display for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Table ({} items, index = {})", self.len(), self.index.field)
    }
}

impl<R: Row> PartialEq for Table<R> {
    fn eq(&self, other: &Self) -> bool {
        if self.index.field != other.index.field || self.len() != other.len() {
            return false;
        }
        if Arc::ptr_eq(&self.rows, &other.rows) {
            return true;
        }
        // Keys are unique on both sides, so matching every pair means equal row sets
        self.iter().all(|(key, row)| {
            other.index.slots.get(key).is_some_and(|&position| &other.rows.rows[position] == row)
        })
    }
}

impl<R: Row> Eq for Table<R> {}

impl<R: Row> Hash for Table<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Row order is arbitrary, so only order-independent parts are hashed
        self.index.field.hash(state);
        self.len().hash(state);
    }
}
