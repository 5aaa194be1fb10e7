use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::remote::{RemoteSink, sink_from_config};
use crate::ui::messages::warning;

/// Add an employee.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add { fields } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let sink = match sink_from_config(&cfg.remote) {
            Ok(sink) => sink,
            Err(e) => {
                warning(format!("Remote sync disabled: {}", e));
                None
            }
        };

        AddLogic::apply(
            &mut pool,
            cfg,
            &fields.to_input(),
            None,
            sink.as_ref().map(|s| s as &dyn RemoteSink),
        )?;
    }

    Ok(())
}
