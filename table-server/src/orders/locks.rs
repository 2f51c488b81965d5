//! Per-table lock registry
//!
//! Every mutation that touches a table (or an order bound to a table) runs
//! while holding that table's mutex, so check-then-act sequences on one
//! table never interleave. Different tables proceed in parallel.
//!
//! Entries live only while someone holds or waits on them. Ids come from
//! requests, so unknown tables must not leave anything behind.

use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// Table lock registry
///
/// Mutexes are created on first use, keyed by table id, and evicted once the
/// last holder is done.
#[derive(Debug, Default)]
pub struct TableLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl TableLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the mutex for a table
    fn handle(&self, table_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(table_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Run `f` while holding the table's lock
    ///
    /// The DashMap shard guard is released before blocking on the mutex.
    /// Afterwards the entry is removed if no other thread holds a handle;
    /// `remove_if` runs under the shard lock, so a concurrent `handle()`
    /// either sees the old entry (count > 1, kept) or inserts a fresh one.
    pub fn with_table<T>(&self, table_id: &str, f: impl FnOnce() -> T) -> T {
        let handle = self.handle(table_id);
        let result = {
            let _guard = handle.lock();
            f()
        };
        drop(handle);
        self.locks.remove_if(table_id, |_, m| Arc::strong_count(m) == 1);
        result
    }

    /// Number of tables currently locked or waited on
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_same_table_is_serialized() {
        let locks = Arc::new(TableLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = locks.clone();
                let inside = inside.clone();
                let max_seen = max_seen.clone();
                thread::spawn(move || {
                    locks.with_table("t1", || {
                        let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        max_seen.fetch_max(now, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(5));
                        inside.fetch_sub(1, Ordering::SeqCst);
                    })
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_different_tables_do_not_block() {
        let locks = TableLocks::new();
        // Would deadlock if tables shared a mutex
        let value = locks.with_table("t1", || {
            locks.with_table("t2", || {
                assert_eq!(locks.len(), 2);
                7
            })
        });
        assert_eq!(value, 7);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let locks = TableLocks::new();
        locks.with_table("t1", || ());
        let again = locks.with_table("t1", || true);
        assert!(again);
        assert!(locks.is_empty());
    }

    #[test]
    fn test_registry_does_not_grow() {
        let locks = TableLocks::new();
        for i in 0..1_000 {
            locks.with_table(&format!("ghost_{i}"), || ());
        }
        assert!(locks.is_empty());
    }

    #[test]
    fn test_entry_kept_while_waiter_holds_handle() {
        let locks = Arc::new(TableLocks::new());
        let (entered_tx, entered_rx) = std::sync::mpsc::channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

        let holder = {
            let locks = locks.clone();
            thread::spawn(move || {
                locks.with_table("t1", || {
                    entered_tx.send(()).unwrap();
                    release_rx.recv().unwrap();
                })
            })
        };
        entered_rx.recv().unwrap();
        assert_eq!(locks.len(), 1);

        let waiter = {
            let locks = locks.clone();
            thread::spawn(move || locks.with_table("t1", || 42))
        };
        thread::sleep(Duration::from_millis(20));
        release_tx.send(()).unwrap();

        holder.join().unwrap();
        assert_eq!(waiter.join().unwrap(), 42);
        assert!(locks.is_empty());
    }
}
