use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::errors::{AppError, AppResult};
use crate::storage::KvStore;

/// In-memory, map-based key/value store.
///
/// Intended for tests and embedding. Entries are cloned on read/write.
/// Writes can be switched off with [`MemoryStore::set_read_only`] to
/// simulate an unavailable backend.
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    read_only: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Reject every subsequent write until switched back.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.read_only.get() {
            return Err(AppError::Storage("store is read-only".into()));
        }
        Ok(())
    }
}

impl KvStore for MemoryStore {
    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        self.check_writable()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn delete(&self, key: &str) -> AppResult<bool> {
        self.check_writable()?;
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }

    fn scan(&self, prefix: &str) -> AppResult<Vec<(String, String)>> {
        let map = self.entries.borrow();
        Ok(map
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("key_count", &self.len())
            .field("read_only", &self.read_only.get())
            .finish()
    }
}
