//! Source of "now" for timepieces, in milliseconds since the Unix epoch.

use chrono::Utc;
use std::cell::Cell;

/// Milliseconds since the Unix epoch.
pub type Millis = i64;

pub trait Clock {
    fn now_millis(&self) -> Millis;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> Millis {
        Utc::now().timestamp_millis()
    }
}

/// Hand-driven clock, for deterministic tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, millis: Millis) {
        self.now.set(millis);
    }

    pub fn advance(&self, millis: Millis) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Millis {
        self.now.get()
    }
}
