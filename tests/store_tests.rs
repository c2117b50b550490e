use rtimepiece::core::clock::ManualClock;
use rtimepiece::core::store::{
    INDEX_KEY, LAST_USED_ID_KEY, TimepieceStore, parse_record_key, record_key,
};
use rtimepiece::core::watch::WatchLogic;
use rtimepiece::errors::{AppError, AppResult};
use rtimepiece::storage::{KvStore, MemoryStore, SqliteStore};
use std::cell::Cell;
use std::rc::Rc;

mod common;
use common::setup_test_db;

fn memory_store(start: i64) -> (Rc<MemoryStore>, Rc<ManualClock>, TimepieceStore) {
    let kv = Rc::new(MemoryStore::new());
    let clock = Rc::new(ManualClock::new(start));
    let store = TimepieceStore::with_clock(kv.clone(), clock.clone());
    (kv, clock, store)
}

fn names(store: &TimepieceStore) -> Vec<String> {
    store
        .load_all()
        .unwrap()
        .iter()
        .map(|t| t.name().to_string())
        .collect()
}

#[test]
fn test_record_key_naming() {
    assert_eq!(record_key(12), "timepiece_12");
    assert_eq!(parse_record_key("timepiece_12"), Some(12));
    assert_eq!(parse_record_key("timepiece_"), None);
    assert_eq!(parse_record_key("timepiece_index"), None);
    assert_eq!(parse_record_key("timepiece_1a"), None);
    assert_eq!(parse_record_key("xtimepiece_1"), None);
    assert_eq!(parse_record_key("lastUsedId"), None);
}

#[test]
fn test_allocate_id_survives_restarts() {
    let kv = Rc::new(MemoryStore::new());
    let mut ids = Vec::new();

    for _ in 0..5 {
        // a new store per iteration simulates a process restart
        let store = TimepieceStore::new(kv.clone());
        ids.push(store.allocate_id().unwrap());
    }

    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(kv.get(LAST_USED_ID_KEY).unwrap().as_deref(), Some("5"));
}

#[test]
fn test_allocate_id_rejects_corrupt_counter() {
    let (kv, _, store) = memory_store(0);
    kv.put(LAST_USED_ID_KEY, "banana").unwrap();
    assert!(matches!(
        store.allocate_id(),
        Err(AppError::CorruptRecord { .. })
    ));
}

#[test]
fn test_allocate_id_rejects_exhausted_counter() {
    let (kv, _, store) = memory_store(0);
    kv.put(LAST_USED_ID_KEY, &u64::MAX.to_string()).unwrap();
    assert!(matches!(
        store.allocate_id(),
        Err(AppError::CorruptRecord { .. })
    ));
    assert_eq!(
        kv.get(LAST_USED_ID_KEY).unwrap(),
        Some(u64::MAX.to_string())
    );
}

#[test]
fn test_create_persists_record_and_index() {
    let (kv, _, store) = memory_store(0);
    let t = store.create("Unnamed").unwrap();

    assert_eq!(t.id(), 1);
    assert_eq!(
        kv.get("timepiece_1").unwrap().as_deref(),
        Some(r#"{"name":"Unnamed","timestamps":[]}"#)
    );
    assert_eq!(kv.get(INDEX_KEY).unwrap().as_deref(), Some("[1]"));
}

#[test]
fn test_mutations_write_through() {
    let (kv, clock, store) = memory_store(1_000);
    let mut t = store.create("Work").unwrap();

    t.start().unwrap();
    clock.advance(60_000);
    t.stop().unwrap();
    assert_eq!(
        kv.get("timepiece_1").unwrap().as_deref(),
        Some(r#"{"name":"Work","timestamps":[1000,61000]}"#)
    );

    t.set_name("Deep work").unwrap();
    let reloaded = store.get(1).unwrap();
    assert_eq!(reloaded.name(), "Deep work");
    assert_eq!(reloaded.timestamps(), vec![1_000, 61_000]);
    assert_eq!(reloaded.total_time(), 60_000);
}

#[test]
fn test_load_all_in_creation_order() {
    let (_, _, store) = memory_store(0);
    for name in ["b", "a", "c"] {
        store.create(name).unwrap();
    }
    assert_eq!(names(&store), vec!["b", "a", "c"]);
}

#[test]
fn test_load_all_keeps_running_state_across_restart() {
    let kv = Rc::new(MemoryStore::new());
    let clock = Rc::new(ManualClock::new(0));

    {
        let store = TimepieceStore::with_clock(kv.clone(), clock.clone());
        let mut t = store.create("Running").unwrap();
        t.start().unwrap();
    }

    clock.advance(3_000);
    let store = TimepieceStore::with_clock(kv.clone(), clock.clone());
    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].is_running());
    assert_eq!(all[0].total_time(), 3_000);
}

#[test]
fn test_loading_does_not_write() {
    let (kv, _, store) = memory_store(0);
    store.create("one").unwrap();
    store.create("two").unwrap();

    kv.set_read_only(true);
    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_malformed_record_is_skipped_and_reported() {
    let (kv, _, store) = memory_store(0);
    store.create("good").unwrap();
    store.create("bad").unwrap();
    store.create("also good").unwrap();
    kv.put("timepiece_2", "{not json").unwrap();

    let report = store.load_all_with_report().unwrap();
    let loaded: Vec<&str> = report.timepieces.iter().map(|t| t.name()).collect();
    assert_eq!(loaded, vec!["good", "also good"]);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].key, "timepiece_2");

    // wrong shape is malformed too
    kv.put("timepiece_2", r#"{"name": 5}"#).unwrap();
    let report = store.load_all_with_report().unwrap();
    assert_eq!(report.timepieces.len(), 2);
    assert_eq!(report.issues.len(), 1);
}

#[test]
fn test_foreign_keys_are_ignored_during_scan() {
    let (kv, _, store) = memory_store(0);
    // legacy layout: records without an index
    kv.put("timepiece_3", r#"{"name":"three","timestamps":[1,2]}"#)
        .unwrap();
    kv.put("timepiece_10", r#"{"name":"ten","timestamps":[]}"#)
        .unwrap();
    kv.put("timepiece_x", r#"{"name":"nope","timestamps":[]}"#)
        .unwrap();
    kv.put("timepiece_03", r#"{"name":"shadow","timestamps":[]}"#)
        .unwrap();
    kv.put("settings", "whatever").unwrap();
    kv.put(LAST_USED_ID_KEY, "10").unwrap();

    let report = store.load_all_with_report().unwrap();
    assert!(report.index_rebuilt);
    assert!(report.issues.is_empty());

    let mut loaded: Vec<(u64, String)> = report
        .timepieces
        .iter()
        .map(|t| (t.id(), t.name().to_string()))
        .collect();
    loaded.sort();
    assert_eq!(
        loaded,
        vec![(3, "three".to_string()), (10, "ten".to_string())]
    );
    // the scan alone does not write an index
    assert_eq!(kv.get(INDEX_KEY).unwrap(), None);
}

#[test]
fn test_index_is_bootstrapped_on_first_save() {
    let (kv, _, store) = memory_store(0);
    kv.put("timepiece_4", r#"{"name":"legacy","timestamps":[]}"#)
        .unwrap();
    kv.put(LAST_USED_ID_KEY, "4").unwrap();

    let t = store.create("new").unwrap();
    assert_eq!(t.id(), 5);

    let raw = kv.get(INDEX_KEY).unwrap().unwrap();
    let ids: Vec<u64> = serde_json::from_str(&raw).unwrap();
    assert!(ids.contains(&4));
    assert!(ids.contains(&5));
    assert_eq!(names(&store).len(), 2);
}

#[test]
fn test_corrupt_index_falls_back_to_scan() {
    let (kv, _, store) = memory_store(0);
    store.create("one").unwrap();
    store.create("two").unwrap();
    kv.put(INDEX_KEY, "][").unwrap();

    let report = store.load_all_with_report().unwrap();
    assert!(report.index_rebuilt);
    assert_eq!(report.timepieces.len(), 2);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].key, INDEX_KEY);

    // any save repairs it
    store.rename(1, "uno").unwrap();
    let report = store.load_all_with_report().unwrap();
    assert!(!report.index_rebuilt);
    assert!(report.issues.is_empty());
}

#[test]
fn test_index_entry_without_record_is_reported() {
    let (kv, _, store) = memory_store(0);
    store.create("one").unwrap();
    kv.put(INDEX_KEY, "[1,9]").unwrap();

    let report = store.load_all_with_report().unwrap();
    assert_eq!(report.timepieces.len(), 1);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].key, "timepiece_9");
}

#[test]
fn test_delete_removes_record_and_index_entry() {
    let (kv, _, store) = memory_store(0);
    store.create("keep").unwrap();
    let gone = store.create("gone").unwrap();

    gone.destroy().unwrap();
    assert_eq!(kv.get("timepiece_2").unwrap(), None);
    assert_eq!(kv.get(INDEX_KEY).unwrap().as_deref(), Some("[1]"));
    assert_eq!(names(&store), vec!["keep"]);

    assert!(!store.delete(2).unwrap());
    assert!(matches!(store.get(2), Err(AppError::TimepieceNotFound(2))));

    // ids are never reused
    assert_eq!(store.create("next").unwrap().id(), 3);
}

#[test]
fn test_rename_and_clear_history() {
    let (_, clock, store) = memory_store(0);
    let mut t = store.create("Unnamed").unwrap();
    t.start().unwrap();
    clock.advance(1_000);
    t.stop().unwrap();

    let renamed = store.rename(1, "Email").unwrap();
    assert_eq!(renamed.name(), "Email");
    assert_eq!(renamed.timestamps().len(), 2);

    let cleared = store.clear_history(1).unwrap();
    assert_eq!(cleared.name(), "Email");
    assert!(cleared.timestamps().is_empty());
    assert_eq!(store.get(1).unwrap().total_time(), 0);

    assert!(matches!(
        store.rename(42, "x"),
        Err(AppError::TimepieceNotFound(42))
    ));
}

#[test]
fn test_storage_failure_propagates_to_mutator() {
    let (kv, _, store) = memory_store(500);
    let mut t = store.create("fragile").unwrap();

    kv.set_read_only(true);
    assert!(matches!(t.start(), Err(AppError::Storage(_))));
    assert!(t.is_running());
    assert!(store.create("never").is_err());
    assert!(t.destroy().is_err());

    kv.set_read_only(false);
    // the stored copy still has the pre-failure state
    assert!(store.get(1).unwrap().timestamps().is_empty());
}

#[test]
fn test_sqlite_backend_scan_and_upsert() {
    let kv = SqliteStore::in_memory().unwrap();
    kv.put("timepiece_1", "a").unwrap();
    kv.put("timepieceX1", "b").unwrap();
    kv.put("other", "c").unwrap();
    kv.put("timepiece_1", "a2").unwrap();

    // '_' must be matched literally
    let scanned = kv.scan("timepiece_").unwrap();
    assert_eq!(scanned, vec![("timepiece_1".to_string(), "a2".to_string())]);

    assert_eq!(kv.get("other").unwrap().as_deref(), Some("c"));
    assert!(kv.delete("other").unwrap());
    assert!(!kv.delete("other").unwrap());
    assert_eq!(kv.get("other").unwrap(), None);
}

#[test]
fn test_sqlite_file_survives_reopen() {
    let db_path = setup_test_db("store_reopen");

    {
        let kv = Rc::new(SqliteStore::open(&db_path).unwrap());
        let store = TimepieceStore::new(kv);
        let mut t = store.create("persisted").unwrap();
        t.toggle().unwrap();
        t.toggle().unwrap();
    }

    let kv = Rc::new(SqliteStore::open(&db_path).unwrap());
    let store = TimepieceStore::new(kv);
    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name(), "persisted");
    assert_eq!(all[0].timestamps().len(), 2);
    assert!(!all[0].is_running());
    assert_eq!(store.allocate_id().unwrap(), 2);
}

/// Memory store whose index writes can be made to fail.
#[derive(Default)]
struct FlakyIndexStore {
    inner: MemoryStore,
    fail_index: Cell<bool>,
}

impl KvStore for FlakyIndexStore {
    fn put(&self, key: &str, value: &str) -> AppResult<()> {
        if key == INDEX_KEY && self.fail_index.get() {
            return Err(AppError::Storage("index write failed".into()));
        }
        self.inner.put(key, value)
    }

    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key)
    }

    fn delete(&self, key: &str) -> AppResult<bool> {
        self.inner.delete(key)
    }

    fn scan(&self, prefix: &str) -> AppResult<Vec<(String, String)>> {
        self.inner.scan(prefix)
    }
}

#[test]
fn test_record_missing_from_index_is_recovered() {
    let kv = Rc::new(FlakyIndexStore::default());
    let store = TimepieceStore::new(kv.clone());
    store.create("a").unwrap();

    kv.fail_index.set(true);
    assert!(matches!(store.create("b"), Err(AppError::Storage(_))));
    assert!(kv.get("timepiece_2").unwrap().is_some());
    kv.fail_index.set(false);

    // a new store simulates a restart
    let store = TimepieceStore::new(kv.clone());
    let report = store.load_all_with_report().unwrap();
    assert!(report.index_rebuilt);
    assert!(report.issues.is_empty());
    assert_eq!(names(&store), vec!["a", "b"]);

    store.create("c").unwrap();
    let raw = kv.get(INDEX_KEY).unwrap().unwrap();
    let ids: Vec<u64> = serde_json::from_str(&raw).unwrap();
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(!store.load_all_with_report().unwrap().index_rebuilt);
    assert_eq!(names(&store), vec!["a", "b", "c"]);
}

#[test]
fn test_watch_frame_follows_changes_made_elsewhere() {
    let (kv, clock, store) = memory_store(1_000);
    let mut t = store.create("watched").unwrap();
    t.start().unwrap();

    clock.advance(2_000);
    let frame = WatchLogic::frame(&store, 1).unwrap();
    assert!(frame.running);
    assert_eq!(frame.total, 2_000);
    assert_eq!(frame.seconds(), 2);

    // another handle on the same storage stops it
    let other = TimepieceStore::with_clock(kv.clone(), clock.clone());
    other.get(1).unwrap().stop().unwrap();

    clock.advance(5_000);
    let frame = WatchLogic::frame(&store, 1).unwrap();
    assert!(!frame.running);
    assert_eq!(frame.total, 2_000);
    assert_eq!(frame.name, "watched");
}
