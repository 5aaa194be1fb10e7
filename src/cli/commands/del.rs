use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::db::queries::load_roster_for_update;
use crate::errors::{AppError, AppResult};
use crate::models::employee::EmployeeId;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let id = EmployeeId::from(id.as_str());
        let mut pool = DbPool::new(&cfg.database)?;

        let name = {
            let roster = load_roster_for_update(&pool, cfg)?;
            roster
                .name_of(&id)
                .map(str::to_string)
                .ok_or_else(|| AppError::EmployeeNotFound(id.to_string()))?
        };

        if !*yes && !ask_confirmation(&format!("Delete {} ({})?", name, id)) {
            info("Operation cancelled.");
            return Ok(());
        }

        let removed = DeleteLogic::apply(&mut pool, cfg, &id)?;
        success(format!("{} has been removed from the roster.", removed));
    }

    Ok(())
}
