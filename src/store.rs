//! State store adapter.
//!
//! The world state is an external transactional key-value store owned by the
//! host ledger runtime. This module defines the seam the rest of the crate
//! talks through, plus [`MemoryStore`], an in-memory mapping for tests and
//! for embedding without a real ledger behind it.

use crate::error::{LedgerError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Point get/put against the host's world state.
///
/// The contract assumed of implementations, all guaranteed by the host
/// rather than checked here:
///
/// - `get` is a point lookup; no range queries are used.
/// - `put` is an unconditional upsert; no compare-and-swap semantics are
///   relied upon.
/// - Within one operation invocation, reads observe that invocation's own
///   writes (read-your-writes), and the whole invocation commits or rolls
///   back atomically at its boundary.
pub trait StateStore: Send + Sync {
    /// Look up the record stored under `key`.
    ///
    /// # Returns
    ///
    /// The stored bytes, or `None` if no record exists under the key.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Store`] if the underlying lookup fails.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Write `value` under `key`, replacing any existing record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Store`] if the underlying write fails.
    fn put(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<()>> + Send;
}

// Components borrow the contract's store, so a shared reference is a store.
impl<S: StateStore> StateStore for &S {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send {
        S::get(self, key)
    }

    fn put(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<()>> + Send {
        S::put(self, key, value)
    }
}

/// In-memory world state.
///
/// A `HashMap` behind a mutex, cloned handles sharing the same state. This
/// is the fake the lifecycle engine is tested against, and the reference
/// implementation for hosts that keep state in-process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records (for tests).
    ///
    /// # Errors
    ///
    /// Returns error if the lock is poisoned.
    pub fn record_count(&self) -> Result<usize> {
        Ok(self
            .records
            .lock()
            .map_err(|_| LedgerError::Store("state lock poisoned".to_owned()))?
            .len())
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send {
        let records = Arc::clone(&self.records);
        let key = key.to_owned();

        async move {
            let records_guard = records
                .lock()
                .map_err(|_| LedgerError::Store("state lock poisoned".to_owned()))?;

            Ok(records_guard.get(&key).cloned())
        }
    }

    fn put(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<()>> + Send {
        let records = Arc::clone(&self.records);
        let key = key.to_owned();

        async move {
            records
                .lock()
                .map_err(|_| LedgerError::Store("state lock poisoned".to_owned()))?
                .insert(key, value);

            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_absent_key_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get_reads_own_write() {
        let store = MemoryStore::new();
        store.put("T1", b"first".to_vec()).await.unwrap();
        assert_eq!(store.get("T1").await.unwrap(), Some(b"first".to_vec()));

        // Upsert semantics: a second put replaces the record.
        store.put("T1", b"second".to_vec()).await.unwrap();
        assert_eq!(store.get("T1").await.unwrap(), Some(b"second".to_vec()));
        assert_eq!(store.record_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cloned_handles_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();

        handle.put("E1", b"event".to_vec()).await.unwrap();
        assert_eq!(store.get("E1").await.unwrap(), Some(b"event".to_vec()));
    }
}
