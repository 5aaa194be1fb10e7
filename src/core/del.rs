use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{load_roster_for_update, save_roster};
use crate::errors::AppResult;
use crate::models::employee::EmployeeId;
use crate::ui::messages::info;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one employee; returns the removed name.
    pub fn apply(pool: &mut DbPool, cfg: &Config, id: &EmployeeId) -> AppResult<String> {
        let mut roster = load_roster_for_update(pool, cfg)?;
        let name = roster.delete(id)?;
        save_roster(pool, &roster)?;

        ttlog_quiet(&pool.conn, "del", id.as_str(), &format!("Deleted {}", name));
        info(format!("Deleted {} ({}); {} employees left.", name, id, roster.len()));
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::add::{AddLogic, EmployeeInput};
    use crate::core::roster::Roster;
    use crate::db::initialize::init_db;
    use crate::db::queries::load_roster;
    use crate::errors::AppError;

    #[test]
    fn delete_reclaims_role_color() {
        let mut pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let cfg = Config::default();
        let input = EmployeeInput {
            name: Some("a".into()),
            role: Some("客服".into()),
            ..EmployeeInput::default()
        };
        let id = AddLogic::apply(&mut pool, &cfg, &input, None, None).unwrap();

        assert_eq!(DeleteLogic::apply(&mut pool, &cfg, &id).unwrap(), "a");

        let Roster::Single(r) = load_roster(&pool, &cfg).unwrap() else {
            panic!("expected single roster");
        };
        assert!(r.employees().is_empty());
        assert!(r.registry().color_of("客服").is_none());
        assert_eq!(r.registry().palette_index(), 1);

        let err = DeleteLogic::apply(&mut pool, &cfg, &id).unwrap_err();
        assert!(matches!(err, AppError::EmployeeNotFound(_)));
    }
}
