use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::Roster;
use crate::db::pool::DbPool;
use crate::db::queries::load_roster;
use crate::errors::AppResult;
use crate::models::employee::Shift;
use crate::ui::messages::info;
use crate::utils::format_clock;
use crate::utils::formatting::format_work_duration;
use crate::utils::table::{Column, Table};

fn clock_range(start: f64, end: f64) -> String {
    format!("{} ~ {}", format_clock(start), format_clock(end))
}

fn shift_cell(shift: &Option<Shift>) -> String {
    match shift {
        Some(s) => format!("{} {}", s.role, clock_range(s.shift_start, s.shift_end)),
        None => "-".to_string(),
    }
}

/// Employee table for either roster shape.
pub fn render(roster: &Roster) -> String {
    match roster {
        Roster::Single(r) => {
            let mut table = Table::new(vec![
                Column::new("ID", 2),
                Column::new("姓名", 4),
                Column::new("職位", 4),
                Column::new("上班時間", 8),
                Column::new("休息時間", 8),
                Column::new("工時", 4),
            ]);
            for e in r.employees() {
                table.add_row(vec![
                    e.id.to_string(),
                    e.name.clone(),
                    e.role.clone(),
                    clock_range(e.shift_start, e.shift_end),
                    e.break_range()
                        .map(|(s, end)| clock_range(s, end))
                        .unwrap_or_else(|| "-".to_string()),
                    format_work_duration(e.work_hours()),
                ]);
            }
            table.render()
        }
        Roster::Dual(r) => {
            let mut table = Table::new(vec![
                Column::new("ID", 2),
                Column::new("姓名", 4),
                Column::new("第一段班", 8),
                Column::new("第二段班", 8),
                Column::new("工時", 4),
            ]);
            for e in r.employees() {
                table.add_row(vec![
                    e.id.to_string(),
                    e.name.clone(),
                    shift_cell(&e.shift1),
                    shift_cell(&e.shift2),
                    format_work_duration(e.work_hours()),
                ]);
            }
            table.render()
        }
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::List) {
        let pool = DbPool::new(&cfg.database)?;
        let roster = load_roster(&pool, cfg)?;

        if roster.is_empty() {
            info("No employees in the roster.");
            return Ok(());
        }

        print!("{}", render(&roster));
        println!("\n{} / {} employees", roster.len(), cfg.roster_cap);
    }
    Ok(())
}
