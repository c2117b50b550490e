use crate::core::timelog::TimeLog;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::model::{IntervalExport, rows_for};
use crate::export::{ExportFormat, csv, json, notify_export_success};
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export every interval of `timepieces` to `file`.
    /// Returns the number of rows written; nothing is written for zero rows.
    pub fn export(
        timepieces: &[TimeLog],
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        let rows: Vec<IntervalExport> = timepieces.iter().flat_map(rows_for).collect();
        if rows.is_empty() {
            warning("No intervals recorded yet, nothing to export.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => csv::write_csv(path, &rows)?,
            ExportFormat::Json => json::write_json(path, &rows)?,
        }

        notify_export_success(&format.as_str().to_uppercase(), path);
        Ok(rows.len())
    }
}
