use std::path::Path;

use crate::row::PlanRow;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("plan CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("plan I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Writes `rows` as header-first CSV with the fixed field order from
/// `PlanRow`'s derive order. UTF-8, LF endings (csv crate default).
pub fn write_plan_csv(rows: &[PlanRow], out: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_path(out)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Malformed CSV is a fatal `PlanParseError` for apply, per the error
/// taxonomy — this surfaces as `Error::Csv`.
pub fn read_plan_csv(path: impl AsRef<Path>) -> Result<Vec<PlanRow>> {
    let mut reader = csv::ReaderBuilder::new().from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
