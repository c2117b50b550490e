use crate::cli::parser::Commands;
use crate::core::App;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::ui::prompt::ask_confirmation;
use crate::utils::format_hms;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Reset { id, yes } = cmd {
        let t = app.timepiece(*id)?;

        let prompt = format!(
            "Reset timepiece #{} '{}' ({} recorded)? All history is discarded.",
            id,
            t.name(),
            format_hms(t.total_time())
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let t = app.store.clear_history(*id)?;
        app.audit("reset", &format!("#{id}"), "History cleared");
        success(format!("Timepiece #{} '{}' has been reset.", id, t.name()));
    }
    Ok(())
}
