//! Table configuration
//!
//! Settings can be deserialized from any serde source, taken from
//! [`TableConfig::default`], or read from the process environment.

use crate::constants::reindex::{CACHE_CAPACITY_ENV, DEFAULT_CACHE_CAPACITY};
use serde::Deserialize;

/// Tunables shared by every table built from the same row set
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableConfig {
    /// Re-indexed views kept per row set; zero disables the cache
    #[serde(default = "default_reindex_cache_capacity")]
    pub reindex_cache_capacity: usize,
}

fn default_reindex_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            reindex_cache_capacity: default_reindex_cache_capacity(),
        }
    }
}

impl TableConfig {
    /// Create configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_environment() -> Self {
        Self {
            reindex_cache_capacity: std::env::var(CACHE_CAPACITY_ENV)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or_else(default_reindex_cache_capacity),
        }
    }

    /// Override the re-index cache capacity
    pub fn with_reindex_cache_capacity(mut self, capacity: usize) -> Self {
        self.reindex_cache_capacity = capacity;
        self
    }
}
