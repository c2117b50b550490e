use crate::cli::parser::Commands;
use crate::core::App;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Rename { id, name } = cmd {
        let old = app.timepiece(*id)?.name().to_string();
        let t = app.store.rename(*id, name.clone())?;
        app.audit(
            "rename",
            &format!("#{id}"),
            &format!("'{}' → '{}'", old, t.name()),
        );
        success(format!("Timepiece #{} renamed to '{}'.", id, t.name()));
    }
    Ok(())
}
