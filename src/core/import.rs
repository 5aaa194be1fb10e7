use crate::config::Config;
use crate::core::roster::Roster;
use crate::core::share;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{load_roster, load_roster_for_update, save_roster};
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Replace the stored roster with the content of a share token.
pub struct ImportLogic;

impl ImportLogic {
    /// All-or-nothing: a malformed token, or a batch breaking the roster
    /// rules, leaves the stored roster untouched.
    /// Returns the number of imported employees.
    pub fn apply(pool: &mut DbPool, cfg: &Config, token: &str) -> AppResult<usize> {
        let rules = cfg.rules()?;
        let mut roster = load_roster_for_update(pool, cfg)?;

        let count = match &mut roster {
            Roster::Single(r) => {
                let employees = share::decode_strict(token)?;
                let n = employees.len();
                r.replace_all(employees, &rules)?;
                n
            }
            Roster::Dual(r) => {
                let employees = share::decode_strict(token)?;
                let n = employees.len();
                r.replace_all(employees, &rules)?;
                n
            }
        };

        save_roster(pool, &roster)?;
        ttlog_quiet(
            &pool.conn,
            "import",
            roster.variant().to_db_str(),
            &format!("Imported {} employees from share token", count),
        );
        success(format!("Imported {} employees.", count));
        Ok(count)
    }
}

/// Share token for the stored roster.
pub fn export_token(pool: &DbPool, cfg: &Config) -> AppResult<String> {
    match load_roster(pool, cfg)? {
        Roster::Single(r) => share::encode(r.employees()),
        Roster::Dual(r) => share::encode(r.employees()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::add::{AddLogic, EmployeeInput};
    use crate::db::initialize::init_db;
    use crate::errors::AppError;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn add(pool: &mut DbPool, cfg: &Config, name: &str, role: &str) {
        let input = EmployeeInput {
            name: Some(name.into()),
            role: Some(role.into()),
            ..EmployeeInput::default()
        };
        AddLogic::apply(pool, cfg, &input, None, None).unwrap();
    }

    #[test]
    fn token_moves_roster_between_databases() {
        let cfg = Config::default();
        let mut source = pool();
        add(&mut source, &cfg, "a", "菜口");
        add(&mut source, &cfg, "b", "客服");
        let token = export_token(&source, &cfg).unwrap();

        let mut target = pool();
        add(&mut target, &cfg, "x", "舊角色");
        assert_eq!(ImportLogic::apply(&mut target, &cfg, &token).unwrap(), 2);

        let Roster::Single(r) = load_roster(&target, &cfg).unwrap() else {
            panic!("expected single roster");
        };
        let names: Vec<_> = r.employees().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(r.registry().color_of("舊角色").is_none());
        assert_eq!(r.registry().color_of("菜口"), Some("#1d4ed8"));
    }

    #[test]
    fn malformed_token_keeps_roster() {
        let cfg = Config::default();
        let mut pool = pool();
        add(&mut pool, &cfg, "a", "客服");

        let err = ImportLogic::apply(&mut pool, &cfg, "bm90IGpzb24=").unwrap_err();
        assert!(matches!(err, AppError::DecodeMalformed(_)));
        assert_eq!(load_roster(&pool, &cfg).unwrap().len(), 1);
    }

    #[test]
    fn batch_with_duplicate_ids_keeps_roster() {
        let cfg = Config::default();
        let mut source = pool();
        add(&mut source, &cfg, "a", "客服");
        let Roster::Single(r) = load_roster(&source, &cfg).unwrap() else {
            panic!("expected single roster");
        };
        let twice = vec![r.employees()[0].clone(), r.employees()[0].clone()];
        let token = share::encode(&twice).unwrap();

        let mut target = pool();
        add(&mut target, &cfg, "x", "廚房");
        let err = ImportLogic::apply(&mut target, &cfg, &token).unwrap_err();
        assert!(matches!(err, AppError::DecodeMalformed(_)));
        assert_eq!(load_roster(&target, &cfg).unwrap().len(), 1);
    }
}
