use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::employee::EmployeeId;

/// Replace an employee's data; fields left out keep their current value.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { id, fields } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let id = EmployeeId::from(id.as_str());
        AddLogic::apply(&mut pool, cfg, &fields.to_input(), Some(&id), None)?;
    }

    Ok(())
}
