//! `start`, `stop` and `toggle`: the three ways to flip a timepiece.

use crate::cli::parser::Commands;
use crate::core::App;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::format_hms;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    let (id, op) = match cmd {
        Commands::Start { id } => (*id, "start"),
        Commands::Stop { id } => (*id, "stop"),
        Commands::Toggle { id } => (*id, "toggle"),
        _ => return Ok(()),
    };

    let mut t = app.timepiece(id)?;
    let before = t.timestamps().len();

    match cmd {
        Commands::Start { .. } => t.start()?,
        Commands::Stop { .. } => t.stop()?,
        _ => t.toggle()?,
    }

    if t.timestamps().len() == before {
        let state = if t.is_running() { "running" } else { "stopped" };
        info(format!("Timepiece #{} '{}' is already {}.", id, t.name(), state));
        return Ok(());
    }

    let verb = if t.is_running() { "started" } else { "stopped" };
    app.audit(op, &format!("#{id}"), &format!("Timepiece {verb}"));
    success(format!(
        "Timepiece #{} '{}' {} (total {}).",
        id,
        t.name(),
        verb,
        format_hms(t.total_time())
    ));
    Ok(())
}
