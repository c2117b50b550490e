use crate::errors::AppResult;
use crate::export::model::IntervalExport;
use std::path::Path;

/// Write interval rows as pretty-printed JSON.
pub(crate) fn write_json(path: &Path, rows: &[IntervalExport]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(rows)?;
    std::fs::write(path, json)?;
    Ok(())
}
