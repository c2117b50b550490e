use crate::cli::parser::Commands;
use crate::core::App;
use crate::errors::AppResult;
use crate::ui::messages::{header, warning};
use crate::utils::colors::state_label;
use crate::utils::format_hms;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_instant;

pub fn handle(cmd: &Commands, app: &App) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let t = app.timepiece(*id)?;
        let fmt = &app.cfg.time_format;
        let now = t.now();

        header(format!("#{} {}", t.id(), t.name()));
        println!("State : {}", state_label(t.is_running()));
        println!("Total : {}\n", format_hms(t.total_time()));

        let intervals = t.intervals();
        if intervals.is_empty() {
            println!("No intervals recorded.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::right("#", 3),
            Column::left("START", 10),
            Column::left("STOP", 10),
            Column::right("DURATION", 9),
        ]);

        for (i, iv) in intervals.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                format_instant(iv.start, fmt),
                iv.stop.map(|s| format_instant(s, fmt)).unwrap_or_default(),
                format_hms(iv.duration(now)),
            ]);
        }
        print!("{}", table.render());

        for a in t.anomalies() {
            warning(format!("Stored history looks wrong: {}", a));
        }
    }
    Ok(())
}
