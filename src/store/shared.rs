//! Shared store
//!
//! RecordStore has no locking of its own. This wrapper serializes access
//! from several threads with one RwLock around the whole store:
//! - scans take the read lock and return owned copies (a borrow cannot
//!   outlive the guard)
//! - inserts and deletes take the write lock

use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::record::{Column, Record};

use super::RecordStore;

/// Cloneable, thread-safe handle to a RecordStore
#[derive(Debug, Clone)]
pub struct SharedRecordStore {
    inner: Arc<RwLock<RecordStore>>,
}

impl SharedRecordStore {
    /// Wrap a store for shared access
    pub fn new(store: RecordStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Matcher scan under the read lock
    pub fn scan(&self, column: Column, text: &str) -> Result<Vec<Record>> {
        let store = self.inner.read();
        Ok(store.scan(column, text)?.into_iter().cloned().collect())
    }

    /// Direct-dispatch scan under the read lock
    pub fn scan_direct(&self, column: Column, text: &str) -> Result<Vec<Record>> {
        let store = self.inner.read();
        Ok(store.scan_direct(column, text)?.into_iter().cloned().collect())
    }

    /// Delete under the write lock
    pub fn delete_by_id(&self, id: u32) -> bool {
        self.inner.write().delete_by_id(id)
    }

    /// Insert under the write lock
    pub fn insert(&self, record: Record) -> Result<usize> {
        self.inner.write().insert(record)
    }

    /// Number of live records
    pub fn count_live(&self) -> usize {
        self.inner.read().count_live()
    }

    /// Number of deleted slots
    pub fn count_deleted(&self) -> usize {
        self.inner.read().count_deleted()
    }

    /// Run `f` with shared access to the store
    pub fn read<R>(&self, f: impl FnOnce(&RecordStore) -> R) -> R {
        let store = self.inner.read();
        f(&*store)
    }

    /// Run `f` with exclusive access to the store
    pub fn write<R>(&self, f: impl FnOnce(&mut RecordStore) -> R) -> R {
        let mut store = self.inner.write();
        f(&mut *store)
    }
}
