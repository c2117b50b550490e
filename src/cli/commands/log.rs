use crate::cli::parser::Commands;
use crate::core::App;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        LogLogic::print_log(app.db().conn())?;
    }

    Ok(())
}
