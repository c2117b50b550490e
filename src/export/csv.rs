use crate::errors::AppResult;
use crate::export::model::{IntervalExport, get_headers, to_row};
use csv::Writer;
use std::path::Path;

/// Write interval rows as CSV.
pub(crate) fn write_csv(path: &Path, rows: &[IntervalExport]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(get_headers())?;
    for row in rows {
        wtr.write_record(to_row(row))?;
    }

    wtr.flush()?;
    Ok(())
}
