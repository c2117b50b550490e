use crate::core::clock::Millis;
use crate::core::store::TimepieceStore;
use crate::core::timelog::TimepieceId;
use crate::errors::AppResult;

/// What `watch` shows on one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub total: Millis,
    pub running: bool,
}

impl Frame {
    pub fn seconds(&self) -> i64 {
        self.total / 1000
    }
}

pub struct WatchLogic;

impl WatchLogic {
    /// Read the stored timepiece afresh and take its total once.
    /// Never writes, so other processes may start or stop it meanwhile.
    pub fn frame(store: &TimepieceStore, id: TimepieceId) -> AppResult<Frame> {
        let t = store.get(id)?;
        Ok(Frame {
            name: t.name().to_string(),
            total: t.total_time(),
            running: t.is_running(),
        })
    }
}
