//! A single timepiece: a named list of start/stop boundaries.
//!
//! The run state is never stored on its own. It is derived from the parity
//! of the timestamp list:
//!
//! ```text
//! []                 stopped, total 0
//! [t0]               running since t0
//! [t0, t1]           stopped, total t1 - t0
//! [t0, t1, t2]       running, total (t1 - t0) + (now - t2)
//! ```

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::core::clock::{Clock, Millis};
use crate::errors::AppResult;

pub type TimepieceId = u64;

/// Where a timepiece goes to be persisted. Implemented by the store.
pub trait SavePort {
    /// Write the current state of `log`. Called after every mutation.
    fn save(&self, log: &TimeLog) -> AppResult<()>;

    /// Drop whatever was persisted for `id`.
    fn forget(&self, id: TimepieceId) -> AppResult<()>;
}

/// One run of the timepiece. `stop` is `None` while it is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: Millis,
    pub stop: Option<Millis>,
}

impl Interval {
    /// Length of the interval, measuring an open one up to `now`.
    /// Never negative.
    pub fn duration(&self, now: Millis) -> Millis {
        self.stop.unwrap_or(now).saturating_sub(self.start).max(0)
    }

    pub fn is_open(&self) -> bool {
        self.stop.is_none()
    }
}

/// A timestamp that does not come after its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anomaly {
    pub index: usize,
    pub previous: Millis,
    pub current: Millis,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timestamp #{} ({}) is not after #{} ({})",
            self.index,
            self.current,
            self.index - 1,
            self.previous
        )
    }
}

pub struct TimeLog {
    id: TimepieceId,
    name: String,
    timestamps: Vec<Millis>,
    port: Rc<dyn SavePort>,
    clock: Rc<dyn Clock>,
}

impl TimeLog {
    /// Brand-new timepiece with no history. Persisted immediately.
    pub fn new(
        id: TimepieceId,
        name: impl Into<String>,
        port: Rc<dyn SavePort>,
        clock: Rc<dyn Clock>,
    ) -> AppResult<Self> {
        let log = Self {
            id,
            name: name.into(),
            timestamps: Vec::new(),
            port,
            clock,
        };
        log.save()?;
        Ok(log)
    }

    /// Rebuild a timepiece from persisted data without writing it back.
    ///
    /// The timestamps are taken as-is, even when they are not increasing.
    /// Use [`TimeLog::anomalies`] to inspect them.
    pub fn reconstruct(
        id: TimepieceId,
        name: impl Into<String>,
        timestamps: Vec<Millis>,
        port: Rc<dyn SavePort>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            timestamps,
            port,
            clock,
        }
    }

    pub fn id(&self) -> TimepieceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> AppResult<()> {
        self.name = name.into();
        self.save()
    }

    pub fn is_running(&self) -> bool {
        self.timestamps.len() % 2 == 1
    }

    /// (Re-)start the timepiece. No-op if it is already running.
    pub fn start(&mut self) -> AppResult<()> {
        if self.is_running() {
            return Ok(());
        }
        self.toggle()
    }

    /// Stop the timepiece. No-op if it is already stopped.
    pub fn stop(&mut self) -> AppResult<()> {
        if !self.is_running() {
            return Ok(());
        }
        self.toggle()
    }

    /// Record a boundary at the current time, flipping the run state.
    ///
    /// If persisting fails the boundary stays recorded in memory and the
    /// error is returned.
    pub fn toggle(&mut self) -> AppResult<()> {
        self.timestamps.push(self.clock.now_millis());
        self.save()
    }

    /// Discard all history. The timepiece ends up stopped at zero.
    pub fn reset(&mut self) -> AppResult<()> {
        self.timestamps.clear();
        self.save()
    }

    /// Total running time in milliseconds, computed from scratch on every
    /// call. Intervals that would be negative (clock went backwards, or
    /// bad stored data) count as zero.
    pub fn total_time(&self) -> Millis {
        let closed = self
            .timestamps
            .chunks_exact(2)
            .map(|pair| pair[1].saturating_sub(pair[0]).max(0))
            .fold(0, Millis::saturating_add);

        match self.timestamps.last() {
            Some(&last) if self.is_running() => {
                let open = self.clock.now_millis().saturating_sub(last).max(0);
                closed.saturating_add(open)
            }
            _ => closed,
        }
    }

    /// Copy of all recorded boundaries.
    pub fn timestamps(&self) -> Vec<Millis> {
        self.timestamps.clone()
    }

    pub fn intervals(&self) -> Vec<Interval> {
        self.timestamps
            .chunks(2)
            .map(|c| Interval {
                start: c[0],
                stop: c.get(1).copied(),
            })
            .collect()
    }

    /// Positions where the list fails to strictly increase.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.timestamps
            .windows(2)
            .enumerate()
            .filter(|(_, w)| w[1] <= w[0])
            .map(|(i, w)| Anomaly {
                index: i + 1,
                previous: w[0],
                current: w[1],
            })
            .collect()
    }

    /// Current time according to this timepiece's clock.
    pub fn now(&self) -> Millis {
        self.clock.now_millis()
    }

    /// Remove the persisted record. The in-memory value is left untouched
    /// and should simply be dropped by the caller.
    pub fn destroy(&self) -> AppResult<()> {
        self.port.forget(self.id)
    }

    fn save(&self) -> AppResult<()> {
        self.port.save(self)
    }
}

impl fmt::Debug for TimeLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeLog")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("timestamps", &self.timestamps)
            .finish()
    }
}
