use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::storage::KvStore;

/// Durable key/value store backed by the `kv` table of a SQLite database.
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run pending migrations.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Throw-away database living only as long as the returned value.
    pub fn in_memory() -> AppResult<Self> {
        let pool = DbPool::in_memory()?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    /// Append a line to the internal audit log.
    pub fn audit(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.pool.conn, operation, target, message)
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

impl KvStore for SqliteStore {
    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        let now = Local::now().to_rfc3339();
        let mut stmt = self.pool.conn.prepare_cached(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
        )?;
        stmt.execute(params![key, value, now])?;
        Ok(())
    }

    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut stmt = self
            .pool
            .conn
            .prepare_cached("SELECT value FROM kv WHERE key = ?1")?;
        let value = stmt
            .query_row([key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn delete(&self, key: &str) -> AppResult<bool> {
        let n = self
            .pool
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])?;
        Ok(n > 0)
    }

    fn scan(&self, prefix: &str) -> AppResult<Vec<(String, String)>> {
        // substr instead of LIKE: '_' in key prefixes is a LIKE wildcard
        let mut stmt = self.pool.conn.prepare_cached(
            "SELECT key, value FROM kv
             WHERE substr(key, 1, length(?1)) = ?1
             ORDER BY rowid ASC",
        )?;
        let rows = stmt.query_map([prefix], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}
