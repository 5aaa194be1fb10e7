use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::export_token;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Print the share token on its own line so it can be piped.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Share) {
        let pool = DbPool::new(&cfg.database)?;
        println!("{}", export_token(&pool, cfg)?);
    }
    Ok(())
}
