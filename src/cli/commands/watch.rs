use crate::cli::parser::Commands;
use crate::core::App;
use crate::core::watch::WatchLogic;
use crate::errors::AppResult;
use crate::utils::format_hms;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Redraw the total time on a fixed cadence. The record is re-read on every
/// tick and never written, so starts and stops made elsewhere show up.
pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Watch {
        id,
        interval,
        ticks,
    } = cmd
    {
        let every = Duration::from_millis(interval.unwrap_or(app.cfg.watch_interval_ms).max(1));

        let mut out = io::stdout();
        let mut last_seconds: Option<i64> = None;
        let mut tick = 0u64;

        loop {
            let frame = WatchLogic::frame(&app.store, *id)?;
            // only redraw when the shown value changes
            if last_seconds != Some(frame.seconds()) {
                write!(out, "\r{} {}", frame.name, format_hms(frame.total))?;
                out.flush()?;
                last_seconds = Some(frame.seconds());
            }

            tick += 1;
            if ticks.is_some_and(|n| tick >= n) {
                break;
            }
            thread::sleep(every);
        }
        writeln!(out)?;
    }
    Ok(())
}
