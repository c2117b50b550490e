use crate::cli::parser::Commands;
use crate::core::App;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let written = BackupLogic::backup(&app.cfg.database_path(), file, *compress, *force)?;
        app.audit(
            "backup",
            &written.to_string_lossy(),
            if *compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );
    }

    Ok(())
}
