use crate::config::Config;
use crate::core::calculator::grid::Grid;
use crate::core::roster::Roster;
use crate::db::pool::DbPool;
use crate::db::queries::load_roster;
use crate::errors::AppResult;

pub struct Core;

impl Core {
    /// Grid of `roster` on the configured business hours.
    pub fn project(roster: &Roster, cfg: &Config) -> AppResult<Grid> {
        let hours = cfg.business_hours()?;
        Ok(roster.project(&hours, cfg.overlap_policy))
    }

    /// Load the stored roster and project it.
    pub fn load_grid(pool: &DbPool, cfg: &Config) -> AppResult<(Roster, Grid)> {
        let roster = load_roster(pool, cfg)?;
        let grid = Self::project(&roster, cfg)?;
        Ok((roster, grid))
    }
}
