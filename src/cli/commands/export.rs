use crate::cli::parser::Commands;
use crate::core::App;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::warning;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let report = app.store.load_all_with_report()?;
        for issue in &report.issues {
            warning(format!("Skipped unreadable record {}", issue));
        }

        let rows = ExportLogic::export(&report.timepieces, *format, file, *force)?;
        if rows > 0 {
            app.audit(
                "export",
                file,
                &format!("{} interval(s) as {}", rows, format.as_str()),
            );
        }
    }

    Ok(())
}
