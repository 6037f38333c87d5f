//! Чтение и запись CSV

use std::fs::File;
use std::path::Path;

use crate::error::{PrepError, Result};
use crate::types::Table;

pub fn read_csv(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if columns.is_empty() {
        return Err(PrepError::Data(format!("{} has no header row", path.display())));
    }

    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(|v| v.to_string()).collect()))
        .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?;

    tracing::debug!("Read {} rows x {} columns from {}", rows.len(), columns.len(), path.display());
    Table::new(columns, rows)
}

/// Запись таблицы без индексного столбца
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
