//! Compile-time check that tables can be shared across threads

use crate::table::Table;
use crate::tsv::RecordTable;
use std::sync::Arc;

fn _test_send_sync_bounds() {
    fn assert_send_sync<T: Send + Sync>(_t: &T) {}

    let table = RecordTable::from_tsv_str("id\tname\n1\tRex\n", None).unwrap();
    assert_send_sync(&table);
    assert_send_sync(&Arc::new(table.clone()));

    // Views produced by re-indexing share the same row set
    let by_name: Table<_> = table.with_index("name").unwrap();
    assert_send_sync(&by_name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_send_sync() {
        _test_send_sync_bounds();
    }

    #[test]
    fn test_shared_table_across_threads() {
        let table = Arc::new(
            RecordTable::from_tsv_str("id\tname\n1\tRex\n2\tGeoff\n3\tBandit\n", None).unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let table = Arc::clone(&table);
                std::thread::spawn(move || {
                    let by_name = table.with_index("name").unwrap();
                    assert_eq!(by_name.len(), 3);
                    by_name.get("Geoff").unwrap().get("id").cloned()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some("2".into()));
        }
    }
}
