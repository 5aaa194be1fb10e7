use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::grid::{CellStatus, Grid, GridRow};
use crate::core::logic::Core;
use crate::core::registry::FALLBACK_COLOR;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{BREAK_BG, GREY, RESET, paint_bg};
use crate::utils::format_clock;
use crate::utils::formatting::{bold, display_width, format_work_duration, pad_center, pad_right};

const CELL_WIDTH: usize = 5;

fn render_cell(row: &GridRow, index: usize) -> String {
    let cell = &row.cells[index];
    let text = pad_center(cell.status.label(), CELL_WIDTH);
    match cell.status {
        CellStatus::Off => format!("{GREY}{}{RESET}", pad_center("·", CELL_WIDTH)),
        CellStatus::Break => format!("{BREAK_BG}{text}{RESET}"),
        CellStatus::Work => {
            let color = cell
                .color
                .as_deref()
                .or_else(|| row.roles.first().map(|t| t.color.as_str()))
                .unwrap_or(FALLBACK_COLOR);
            paint_bg(color, &text)
        }
    }
}

/// Full grid as printed by `shiftgrid grid`.
pub fn render(grid: &Grid) -> String {
    let name_w = grid
        .rows
        .iter()
        .map(|r| display_width(&r.name))
        .max()
        .unwrap_or(0)
        .max(display_width("姓名"));

    let mut out = String::new();

    out.push_str(&pad_right("姓名", name_w));
    out.push(' ');
    for slot in &grid.slots {
        out.push_str(&pad_center(&format_clock(*slot), CELL_WIDTH));
    }
    out.push('\n');

    for row in &grid.rows {
        out.push_str(&pad_right(&row.name, name_w));
        out.push(' ');
        for i in 0..row.cells.len() {
            out.push_str(&render_cell(row, i));
        }
        let roles = row
            .roles
            .iter()
            .map(|t| paint_bg(&t.color, &format!(" {} ", t.role)))
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!(
            "  {} 上班 {}\n",
            roles,
            format_work_duration(row.work_hours)
        ));
    }

    out.push('\n');
    out.push_str(&bold(&format!(
        "當日總工時：{}",
        format_work_duration(grid.total_work_hours)
    )));
    out.push('\n');

    if !grid.legend.is_empty() {
        let legend = grid
            .legend
            .iter()
            .map(|t| format!("{} {}", paint_bg(&t.color, "  "), t.role))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&format!("職位：{}\n", legend));
    }

    out
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Grid) {
        let pool = DbPool::new(&cfg.database)?;
        let (_, grid) = Core::load_grid(&pool, cfg)?;

        header(format!("營業時間 {}", cfg.business_hours()?.label()));

        if grid.is_empty() {
            info("No employees in the roster.");
            return Ok(());
        }

        print!("{}", render(&grid));
    }
    Ok(())
}
