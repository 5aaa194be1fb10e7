//! Whole-roster persistence on top of the `state` key/value table.
//! Reads and writes always cover the complete roster; there is no
//! per-employee row.

use crate::config::Config;
use crate::core::registry::RegistrySnapshot;
use crate::core::roster::{DualRoster, Roster, SingleRoster};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::employee::{DualShiftEmployee, SingleShiftEmployee};
use crate::models::variant::Variant;
use crate::ui::messages::warning;
use rusqlite::{Connection, OptionalExtension, params};

const KEY_VARIANT: &str = "variant";
const KEY_EMPLOYEES: &str = "employees";
const KEY_ROLE_COLORS: &str = "role_colors";
const KEY_PALETTE_INDEX: &str = "palette_index";

/// One row of the internal `log` table.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

fn read_state(conn: &Connection, key: &str) -> AppResult<Option<String>> {
    let mut stmt = conn.prepare_cached("SELECT value FROM state WHERE key = ?1")?;
    Ok(stmt.query_row([key], |row| row.get(0)).optional()?)
}

fn write_state(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO state (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

fn empty_roster(cfg: &Config) -> Roster {
    match cfg.variant {
        Variant::Single => Roster::Single(SingleRoster::new(cfg.registry())),
        Variant::Dual => Roster::Dual(DualRoster::new(cfg.static_colors())),
    }
}

/// Stored roster decoded for `cfg.variant`. Errors come back as
/// `DecodeMalformed` / `VariantMismatch`; see [`load_roster`] for the
/// forgiving variant.
pub fn load_roster_strict(pool: &DbPool, cfg: &Config) -> AppResult<Roster> {
    let conn = &pool.conn;

    let Some(stored_variant) = read_state(conn, KEY_VARIANT)? else {
        return Ok(empty_roster(cfg));
    };
    let found = Variant::from_db_str(&stored_variant)
        .ok_or_else(|| AppError::DecodeMalformed(format!("unknown variant '{stored_variant}'")))?;
    if found != cfg.variant {
        return Err(AppError::VariantMismatch {
            expected: cfg.variant.to_db_str().to_string(),
            found: found.to_db_str().to_string(),
        });
    }

    let employees_json = read_state(conn, KEY_EMPLOYEES)?.unwrap_or_else(|| "[]".to_string());
    let malformed = |e: serde_json::Error| AppError::DecodeMalformed(e.to_string());

    match cfg.variant {
        Variant::Single => {
            let employees: Vec<SingleShiftEmployee> =
                serde_json::from_str(&employees_json).map_err(malformed)?;

            let entries: Vec<(String, String)> = match read_state(conn, KEY_ROLE_COLORS)? {
                Some(json) => serde_json::from_str(&json).map_err(malformed)?,
                None => Vec::new(),
            };
            let palette_index = match read_state(conn, KEY_PALETTE_INDEX)? {
                Some(raw) => raw
                    .parse::<usize>()
                    .map_err(|e| AppError::DecodeMalformed(format!("palette_index: {e}")))?,
                None => 0,
            };

            let registry = cfg.registry().restore(RegistrySnapshot {
                entries,
                palette_index,
            });
            Ok(Roster::Single(SingleRoster::from_parts(employees, registry)))
        }
        Variant::Dual => {
            let employees: Vec<DualShiftEmployee> =
                serde_json::from_str(&employees_json).map_err(malformed)?;
            Ok(Roster::Dual(DualRoster::from_parts(employees, cfg.static_colors())))
        }
    }
}

/// Stored roster, or an empty one when the stored data belongs to the
/// other variant or cannot be decoded.
pub fn load_roster(pool: &DbPool, cfg: &Config) -> AppResult<Roster> {
    match load_roster_strict(pool, cfg) {
        Ok(roster) => Ok(roster),
        Err(e @ (AppError::VariantMismatch { .. } | AppError::DecodeMalformed(_))) => {
            warning(format!("Stored roster ignored: {e}"));
            Ok(empty_roster(cfg))
        }
        Err(e) => Err(e),
    }
}

/// Roster that is about to be saved back. A valid roster of the other
/// variant is an error here, since saving would overwrite it; corrupt data
/// still loads as empty.
pub fn load_roster_for_update(pool: &DbPool, cfg: &Config) -> AppResult<Roster> {
    match load_roster_strict(pool, cfg) {
        Err(e @ AppError::DecodeMalformed(_)) => {
            warning(format!("Stored roster ignored: {e}"));
            Ok(empty_roster(cfg))
        }
        other => other,
    }
}

/// Rewrite the whole roster (and the color registry) in one transaction.
pub fn save_roster(pool: &mut DbPool, roster: &Roster) -> AppResult<()> {
    let (employees_json, snapshot) = match roster {
        Roster::Single(r) => (
            serde_json::to_string(r.employees())?,
            r.registry().snapshot(),
        ),
        Roster::Dual(r) => (
            serde_json::to_string(r.employees())?,
            RegistrySnapshot::default(),
        ),
    };
    let role_colors_json = serde_json::to_string(&snapshot.entries)?;

    let tx = pool.conn.transaction()?;
    write_state(&tx, KEY_VARIANT, roster.variant().to_db_str())?;
    write_state(&tx, KEY_EMPLOYEES, &employees_json)?;
    write_state(&tx, KEY_ROLE_COLORS, &role_colors_json)?;
    write_state(&tx, KEY_PALETTE_INDEX, &snapshot.palette_index.to_string())?;
    tx.commit()?;

    Ok(())
}

pub fn load_log_entries(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
    let mut stmt = pool.conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(LogEntry {
            id: row.get(0)?,
            date: row.get(1)?,
            operation: row.get(2)?,
            target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            message: row.get(4)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::roster::RosterRules;
    use crate::core::validation::SingleShiftForm;
    use crate::db::initialize::init_db;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn form(name: &str, role: &str) -> SingleShiftForm {
        SingleShiftForm {
            name: name.into(),
            role: role.into(),
            ..SingleShiftForm::default()
        }
    }

    #[test]
    fn empty_database_loads_empty_roster() {
        let pool = pool();
        let roster = load_roster(&pool, &Config::default()).unwrap();
        assert!(roster.is_empty());
        assert_eq!(roster.variant(), Variant::Single);
    }

    #[test]
    fn saved_roster_comes_back_with_registry() {
        let mut pool = pool();
        let cfg = Config::default();
        let mut single = SingleRoster::new(cfg.registry());
        single.submit(&form("a", "客服"), None, &RosterRules::default()).unwrap();
        single.submit(&form("b", "廚房"), None, &RosterRules::default()).unwrap();
        save_roster(&mut pool, &Roster::Single(single.clone())).unwrap();

        let Roster::Single(back) = load_roster(&pool, &cfg).unwrap() else {
            panic!("expected single roster");
        };
        assert_eq!(back.employees(), single.employees());
        assert_eq!(back.registry().snapshot(), single.registry().snapshot());
    }

    #[test]
    fn other_variant_is_treated_as_absent() {
        let mut pool = pool();
        let mut single = SingleRoster::default();
        single.submit(&form("a", "客服"), None, &RosterRules::default()).unwrap();
        save_roster(&mut pool, &Roster::Single(single)).unwrap();

        let dual_cfg = Config {
            variant: Variant::Dual,
            ..Config::default()
        };
        assert!(matches!(
            load_roster_strict(&pool, &dual_cfg),
            Err(AppError::VariantMismatch { .. })
        ));
        let roster = load_roster(&pool, &dual_cfg).unwrap();
        assert_eq!(roster.variant(), Variant::Dual);
        assert!(roster.is_empty());
    }

    #[test]
    fn corrupt_employees_are_treated_as_absent() {
        let pool = pool();
        write_state(&pool.conn, KEY_VARIANT, "single").unwrap();
        write_state(&pool.conn, KEY_EMPLOYEES, "{not json").unwrap();
        assert!(load_roster(&pool, &Config::default()).unwrap().is_empty());
        assert!(load_roster_for_update(&pool, &Config::default()).unwrap().is_empty());
    }

    #[test]
    fn update_load_refuses_other_variant() {
        let mut pool = pool();
        let mut single = SingleRoster::default();
        single.submit(&form("a", "客服"), None, &RosterRules::default()).unwrap();
        save_roster(&mut pool, &Roster::Single(single)).unwrap();

        let dual_cfg = Config {
            variant: Variant::Dual,
            ..Config::default()
        };
        assert!(matches!(
            load_roster_for_update(&pool, &dual_cfg),
            Err(AppError::VariantMismatch { .. })
        ));
        assert_eq!(load_roster(&pool, &Config::default()).unwrap().len(), 1);
    }
}
