use crate::cli::parser::Commands;
use crate::core::App;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::ask_confirmation;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        // an unreadable record can still be removed; only its name is lost
        let t = match app.timepiece(*id) {
            Ok(t) => Some(t),
            Err(AppError::CorruptRecord { key, reason }) => {
                warning(format!("Record {} is unreadable: {}", key, reason));
                None
            }
            Err(e) => return Err(e),
        };

        let prompt = match &t {
            Some(t) => format!(
                "Delete timepiece #{} '{}'? This action is irreversible.",
                id,
                t.name()
            ),
            None => format!("Delete unreadable timepiece #{}? This action is irreversible.", id),
        };
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let message = match t {
            Some(t) => {
                let message = format!("Deleted '{}'", t.name());
                t.destroy()?;
                message
            }
            None => {
                app.store.delete(*id)?;
                "Deleted unreadable record".to_string()
            }
        };
        app.audit("del", &format!("#{id}"), &message);
        success(format!("Timepiece #{} has been deleted.", id));
    }
    Ok(())
}
