use crate::cli::parser::Commands;
use crate::core::App;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::utils::format_hms;
use crate::utils::formatting::truncate;
use crate::utils::table::{Column, Table};

const NAME_MAX: usize = 32;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if !matches!(cmd, Commands::List) {
        return Ok(());
    }

    let report = app.store.load_all_with_report()?;
    for issue in &report.issues {
        warning(format!("Skipped unreadable record {}", issue));
    }

    if report.timepieces.is_empty() {
        info("No timepieces yet. Create one with `rtimepiece new <NAME>`.");
        return Ok(());
    }

    let name_w = report
        .timepieces
        .iter()
        .map(|t| unicode_width::UnicodeWidthStr::width(truncate(t.name(), NAME_MAX).as_str()))
        .max()
        .unwrap_or(4)
        .max(4);

    let mut table = Table::new(vec![
        Column::right("ID", 4),
        Column::left("NAME", name_w),
        Column::left("STATE", 7),
        Column::right("TOTAL", 9),
    ]);

    for t in &report.timepieces {
        table.add_row(vec![
            t.id().to_string(),
            truncate(t.name(), NAME_MAX),
            if t.is_running() { "running" } else { "stopped" }.to_string(),
            format_hms(t.total_time()),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
