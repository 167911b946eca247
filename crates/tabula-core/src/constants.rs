/// Core constants used throughout tabula
///
/// Re-index cache constants
pub mod reindex {
    /// Number of re-indexed views remembered per row set
    pub const DEFAULT_CACHE_CAPACITY: usize = 5;

    /// Environment variable overriding [`DEFAULT_CACHE_CAPACITY`]
    pub const CACHE_CAPACITY_ENV: &str = "TABULA_REINDEX_CACHE_CAPACITY";
}

/// Tab-separated import constants
pub mod tsv {
    /// Column delimiter; runs of it collapse into one
    pub const FIELD_DELIMITER: char = '\t';
}
