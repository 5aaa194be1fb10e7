// src/export/json_csv.rs

use crate::core::calculator::grid::Grid;
use crate::errors::{AppError, AppResult};
use crate::export::model::grid_table;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export the grid as pretty-printed JSON.
pub(crate) fn export_json(grid: &Grid, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(grid)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export the grid as CSV, one record per employee.
pub(crate) fn export_csv(grid: &Grid, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let (header, rows) = grid_table(grid);
    let csv_err = |e: csv::Error| AppError::Export(format!("CSV write error: {e}"));

    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    wtr.write_record(&header).map_err(csv_err)?;
    for record in &rows {
        wtr.write_record(record).map_err(csv_err)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
