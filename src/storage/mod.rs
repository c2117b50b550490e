//! Narrow key/value persistence port.
//!
//! The timepiece store only ever needs four primitives, so every backend
//! (SQLite on disk, a plain map in memory) implements exactly these.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::errors::AppResult;

/// Key/value store holding opaque text values.
///
/// Implementations must satisfy:
/// - `put` is atomic with respect to its own key and overwrites any
///   previous value.
/// - `delete` of a missing key is not an error; it returns `false`.
/// - `scan` returns every entry whose key starts with `prefix`, in the
///   backend's own enumeration order.
/// - I/O failures are propagated, never swallowed.
pub trait KvStore {
    fn put(&self, key: &str, value: &str) -> AppResult<()>;

    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Remove a key. Returns `true` if it existed.
    fn delete(&self, key: &str) -> AppResult<bool>;

    fn scan(&self, prefix: &str) -> AppResult<Vec<(String, String)>>;
}
