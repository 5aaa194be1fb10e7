// src/export/model.rs

use crate::core::calculator::grid::{Cell, CellStatus, Grid};
use crate::utils::time::format_clock;

/// Flat cell value: `off`, `break`, `work`, or `work:<role>` when the slot
/// belongs to a named shift.
pub fn cell_value(cell: &Cell) -> String {
    match (cell.status, &cell.role) {
        (CellStatus::Work, Some(role)) => format!("work:{role}"),
        (status, _) => status.as_str().to_string(),
    }
}

/// Header plus one record per employee:
/// `id,name,role,work_hours,<slot labels...>`.
pub fn grid_table(grid: &Grid) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header: Vec<String> = ["id", "name", "role", "work_hours"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend(grid.slots.iter().map(|s| format_clock(*s)));

    let rows = grid
        .rows
        .iter()
        .map(|row| {
            let roles = row
                .roles
                .iter()
                .map(|t| t.role.as_str())
                .collect::<Vec<_>>()
                .join("/");
            let mut record = vec![row.id.clone(), row.name.clone(), roles, row.work_hours.to_string()];
            record.extend(row.cells.iter().map(cell_value));
            record
        })
        .collect();

    (header, rows)
}
