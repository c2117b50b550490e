//! Application context: built once at startup and handed to every command.

use std::rc::Rc;

use crate::config::Config;
use crate::core::store::TimepieceStore;
use crate::core::timelog::{TimeLog, TimepieceId};
use crate::errors::AppResult;
use crate::storage::SqliteStore;
use crate::ui::messages::warning;

pub struct App {
    pub cfg: Config,
    pub store: TimepieceStore,
    db: Rc<SqliteStore>,
}

impl App {
    /// Open the configured database and wire the store on top of it.
    pub fn open(cfg: Config) -> AppResult<Self> {
        let path = cfg.database_path();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let db = Rc::new(SqliteStore::open(&path.to_string_lossy())?);
        let store = TimepieceStore::new(db.clone());
        Ok(Self { cfg, store, db })
    }

    pub fn timepiece(&self, id: TimepieceId) -> AppResult<TimeLog> {
        self.store.get(id)
    }

    pub fn db(&self) -> &SqliteStore {
        &self.db
    }

    /// Record an operation in the internal log. Failures only warn.
    pub fn audit(&self, operation: &str, target: &str, message: &str) {
        if let Err(e) = self.db.audit(operation, target, message) {
            warning(format!("Failed to write internal log: {}", e));
        }
    }
}
