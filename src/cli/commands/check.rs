use crate::cli::parser::Commands;
use crate::core::App;
use crate::core::check::CheckLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if !matches!(cmd, Commands::Check) {
        return Ok(());
    }

    let report = CheckLogic::run(&app.store)?;

    info(format!("Checked {} timepiece(s).", report.checked));
    if report.index_rebuilt {
        warning("Timepiece index was missing, unreadable or incomplete; records were found by key scan.");
    }
    for issue in &report.issues {
        warning(format!("Unreadable record {}", issue));
    }
    for (id, a) in &report.anomalies {
        warning(format!("Timepiece #{}: {}", id, a));
    }

    if report.is_clean() {
        success("No problems found.");
    }
    Ok(())
}
