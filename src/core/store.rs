//! Durable collection of timepieces on top of a [`KvStore`].
//!
//! Key layout:
//!
//! | key                | value                                   |
//! |--------------------|-----------------------------------------|
//! | `timepiece_<id>`   | `{"name": "...", "timestamps": [...]}`  |
//! | `timepiece_index`  | `[id, ...]` in creation order           |
//! | `lastUsedId`       | last id handed out, as a JSON integer   |
//!
//! Records are discovered through `timepiece_index`, completed by a scan for
//! `timepiece_<digits>` keys it does not list. Stores written without an
//! index get one built on the next save. Any other key is ignored.

use std::fmt;
use std::rc::Rc;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::clock::{Clock, Millis, SystemClock};
use crate::core::timelog::{SavePort, TimeLog, TimepieceId};
use crate::errors::{AppError, AppResult};
use crate::storage::KvStore;

pub const RECORD_PREFIX: &str = "timepiece_";
pub const INDEX_KEY: &str = "timepiece_index";
pub const LAST_USED_ID_KEY: &str = "lastUsedId";

/// Persisted form of a timepiece. The id lives in the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub timestamps: Vec<Millis>,
}

/// A record that could not be loaded. Never fatal for the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadIssue {
    pub key: String,
    pub reason: String,
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.reason)
    }
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub timepieces: Vec<TimeLog>,
    pub issues: Vec<LoadIssue>,
    /// True when the index was missing, unreadable or incomplete and records
    /// were found by scanning keys. The next save persists a fresh index.
    pub index_rebuilt: bool,
}

fn record_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^timepiece_([0-9]+)$").expect("valid record key regex"))
}

pub fn record_key(id: TimepieceId) -> String {
    format!("{RECORD_PREFIX}{id}")
}

/// Id encoded in a record key, or `None` for anything that is not one.
pub fn parse_record_key(key: &str) -> Option<TimepieceId> {
    record_key_re()
        .captures(key)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[derive(Clone)]
pub struct TimepieceStore {
    kv: Rc<dyn KvStore>,
    clock: Rc<dyn Clock>,
}

impl TimepieceStore {
    pub fn new(kv: Rc<dyn KvStore>) -> Self {
        Self::with_clock(kv, Rc::new(SystemClock))
    }

    pub fn with_clock(kv: Rc<dyn KvStore>, clock: Rc<dyn Clock>) -> Self {
        Self { kv, clock }
    }

    fn port(&self) -> Rc<dyn SavePort> {
        Rc::new(self.clone())
    }

    /// Hand out the next identifier and persist the counter.
    ///
    /// Must be called exactly once per newly created timepiece.
    pub fn allocate_id(&self) -> AppResult<TimepieceId> {
        let last = match self.kv.get(LAST_USED_ID_KEY)? {
            None => 0,
            Some(raw) => raw
                .trim()
                .parse::<TimepieceId>()
                .map_err(|e| AppError::CorruptRecord {
                    key: LAST_USED_ID_KEY.into(),
                    reason: e.to_string(),
                })?,
        };
        let id = last.checked_add(1).ok_or_else(|| AppError::CorruptRecord {
            key: LAST_USED_ID_KEY.into(),
            reason: format!("counter {last} cannot be incremented"),
        })?;
        self.kv.put(LAST_USED_ID_KEY, &id.to_string())?;
        Ok(id)
    }

    pub fn create(&self, name: impl Into<String>) -> AppResult<TimeLog> {
        let id = self.allocate_id()?;
        TimeLog::new(id, name, self.port(), self.clock.clone())
    }

    /// Upsert the record for `log` and make sure the index lists it.
    pub fn save(&self, log: &TimeLog) -> AppResult<()> {
        let record = Record {
            name: log.name().to_string(),
            timestamps: log.timestamps(),
        };
        self.kv
            .put(&record_key(log.id()), &serde_json::to_string(&record)?)?;

        let Index {
            mut ids, rebuilt, ..
        } = self.index()?;
        let listed = ids.contains(&log.id());
        if !listed {
            ids.push(log.id());
        }
        if rebuilt || !listed {
            self.write_index(&ids)?;
        }
        Ok(())
    }

    pub fn load_all(&self) -> AppResult<Vec<TimeLog>> {
        Ok(self.load_all_with_report()?.timepieces)
    }

    /// Load every known timepiece. Records that are missing or fail to
    /// parse are skipped and listed in the report.
    pub fn load_all_with_report(&self) -> AppResult<LoadReport> {
        let index = self.index()?;
        let mut report = LoadReport {
            index_rebuilt: index.rebuilt,
            ..LoadReport::default()
        };
        report.issues.extend(index.issue);

        for id in index.ids {
            match self.load(id) {
                Ok(Some(log)) => report.timepieces.push(log),
                Ok(None) => report.issues.push(LoadIssue {
                    key: record_key(id),
                    reason: "listed in index but not stored".into(),
                }),
                Err(AppError::CorruptRecord { key, reason }) => {
                    report.issues.push(LoadIssue { key, reason })
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }

    pub fn get(&self, id: TimepieceId) -> AppResult<TimeLog> {
        self.load(id)?.ok_or(AppError::TimepieceNotFound(id))
    }

    pub fn rename(&self, id: TimepieceId, name: impl Into<String>) -> AppResult<TimeLog> {
        let mut log = self.get(id)?;
        log.set_name(name)?;
        Ok(log)
    }

    pub fn clear_history(&self, id: TimepieceId) -> AppResult<TimeLog> {
        let mut log = self.get(id)?;
        log.reset()?;
        Ok(log)
    }

    /// Remove the record for `id`. Returns `true` if it existed.
    pub fn delete(&self, id: TimepieceId) -> AppResult<bool> {
        let existed = self.kv.delete(&record_key(id))?;

        if let Some(Ok(mut ids)) = self.read_index()? {
            let before = ids.len();
            ids.retain(|&i| i != id);
            if ids.len() != before {
                self.write_index(&ids)?;
            }
        }
        Ok(existed)
    }

    fn load(&self, id: TimepieceId) -> AppResult<Option<TimeLog>> {
        let key = record_key(id);
        let Some(raw) = self.kv.get(&key)? else {
            return Ok(None);
        };

        let record: Record = serde_json::from_str(&raw).map_err(|e| AppError::CorruptRecord {
            key,
            reason: e.to_string(),
        })?;

        Ok(Some(TimeLog::reconstruct(
            id,
            record.name,
            record.timestamps,
            self.port(),
            self.clock.clone(),
        )))
    }

    fn read_index(&self) -> AppResult<Option<Result<Vec<TimepieceId>, serde_json::Error>>> {
        Ok(self
            .kv
            .get(INDEX_KEY)?
            .map(|raw| serde_json::from_str::<Vec<TimepieceId>>(&raw)))
    }

    fn write_index(&self, ids: &[TimepieceId]) -> AppResult<()> {
        self.kv.put(INDEX_KEY, &serde_json::to_string(ids)?)
    }

    /// Ids in the index, falling back to a key scan when it is missing or
    /// unreadable. Never writes. An unreadable index is reported as an issue.
    ///
    /// Records stored under a canonical key but absent from a readable index
    /// (a save whose index write failed) are appended in id order and mark
    /// the index as rebuilt.
    fn index(&self) -> AppResult<Index> {
        let stored = self.scan_ids()?;

        let issue = match self.read_index()? {
            Some(Ok(mut ids)) => {
                let mut extra: Vec<TimepieceId> =
                    stored.into_iter().filter(|id| !ids.contains(id)).collect();
                extra.sort_unstable();
                let rebuilt = !extra.is_empty();
                ids.extend(extra);
                return Ok(Index {
                    ids,
                    rebuilt,
                    issue: None,
                });
            }
            Some(Err(e)) => Some(LoadIssue {
                key: INDEX_KEY.into(),
                reason: format!("{e}; rebuilt from record keys"),
            }),
            None => None,
        };

        Ok(Index {
            rebuilt: issue.is_some() || !stored.is_empty(),
            ids: stored,
            issue,
        })
    }

    /// Ids of every record stored under a canonical key, in scan order.
    fn scan_ids(&self) -> AppResult<Vec<TimepieceId>> {
        // only canonical keys: "timepiece_01" would shadow "timepiece_1"
        Ok(self
            .kv
            .scan(RECORD_PREFIX)?
            .into_iter()
            .filter_map(|(key, _)| parse_record_key(&key).filter(|&id| record_key(id) == key))
            .collect())
    }
}

struct Index {
    ids: Vec<TimepieceId>,
    rebuilt: bool,
    issue: Option<LoadIssue>,
}

impl SavePort for TimepieceStore {
    fn save(&self, log: &TimeLog) -> AppResult<()> {
        TimepieceStore::save(self, log)
    }

    fn forget(&self, id: TimepieceId) -> AppResult<()> {
        self.delete(id).map(|_| ())
    }
}

impl fmt::Debug for TimepieceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimepieceStore").finish_non_exhaustive()
    }
}
