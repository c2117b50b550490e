#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rtimepiece::core::clock::{ManualClock, Millis};
use rtimepiece::core::timelog::{SavePort, TimeLog, TimepieceId};
use rtimepiece::errors::AppResult;
use std::cell::{Cell, RefCell};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

pub fn rti() -> Command {
    cargo_bin_cmd!("rtimepiece")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimepiece.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize a DB through the CLI in test mode (no config file written)
pub fn init_db(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Port that remembers every save and forget instead of persisting.
#[derive(Default)]
pub struct RecordingPort {
    pub saves: RefCell<Vec<(TimepieceId, String, Vec<Millis>)>>,
    pub forgotten: RefCell<Vec<TimepieceId>>,
    pub fail: Cell<bool>,
}

impl RecordingPort {
    pub fn save_count(&self) -> usize {
        self.saves.borrow().len()
    }

    pub fn last_saved(&self) -> Option<(TimepieceId, String, Vec<Millis>)> {
        self.saves.borrow().last().cloned()
    }
}

impl SavePort for RecordingPort {
    fn save(&self, log: &TimeLog) -> AppResult<()> {
        if self.fail.get() {
            return Err(rtimepiece::errors::AppError::Storage("disk full".into()));
        }
        self.saves
            .borrow_mut()
            .push((log.id(), log.name().to_string(), log.timestamps()));
        Ok(())
    }

    fn forget(&self, id: TimepieceId) -> AppResult<()> {
        self.forgotten.borrow_mut().push(id);
        Ok(())
    }
}

/// Fresh timepiece on a hand-driven clock starting at `start`.
pub fn manual_log(start: Millis) -> (TimeLog, Rc<RecordingPort>, Rc<ManualClock>) {
    let port = Rc::new(RecordingPort::default());
    let clock = Rc::new(ManualClock::new(start));
    let log = TimeLog::new(1, "Unnamed", port.clone(), clock.clone()).expect("new timelog");
    (log, port, clock)
}

/// Fresh timepiece on the wall clock.
pub fn wall_log() -> TimeLog {
    let port = Rc::new(RecordingPort::default());
    TimeLog::new(
        1,
        "Unnamed",
        port,
        Rc::new(rtimepiece::core::clock::SystemClock),
    )
    .expect("new timelog")
}
