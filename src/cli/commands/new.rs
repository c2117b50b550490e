use crate::cli::parser::Commands;
use crate::core::App;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::New { name, start } = cmd {
        let name = name.clone().unwrap_or_else(|| app.cfg.default_name.clone());
        let mut t = app.store.create(name)?;
        app.audit("new", &format!("#{}", t.id()), &format!("Created '{}'", t.name()));

        if *start {
            t.start()?;
            app.audit("start", &format!("#{}", t.id()), "Started on creation");
        }

        success(format!(
            "Timepiece #{} '{}' created{}.",
            t.id(),
            t.name(),
            if t.is_running() { " and started" } else { "" }
        ));
    }
    Ok(())
}
