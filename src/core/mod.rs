pub mod app;
pub mod backup;
pub mod check;
pub mod clock;
pub mod log;
pub mod store;
pub mod timelog;
pub mod watch;

pub use app::App;
pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use store::{LoadIssue, LoadReport, TimepieceStore};
pub use timelog::{Interval, SavePort, TimeLog, TimepieceId};
