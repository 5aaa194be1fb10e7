use crate::config::Config;
use crate::core::roster::Roster;
use crate::core::validation::{DualShiftForm, ShiftForm, SingleShiftForm};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{load_roster_for_update, save_roster};
use crate::errors::{AppError, AppResult};
use crate::models::employee::EmployeeId;
use crate::remote::{RemoteSink, ScheduleRecord, push_best_effort};
use crate::ui::messages::{success, warning};

/// Raw field values typed on the command line. `None` keeps the current
/// (edit) or default (add) value of the field.
#[derive(Debug, Clone, Default)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub role: Option<String>,
    pub shift_start: Option<String>,
    pub shift_end: Option<String>,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
    pub role2: Option<String>,
    pub shift2_start: Option<String>,
    pub shift2_end: Option<String>,
}

fn overlay(target: &mut String, value: &Option<String>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl EmployeeInput {
    pub fn single_form(&self, mut form: SingleShiftForm) -> SingleShiftForm {
        if self.role2.is_some() || self.shift2_start.is_some() || self.shift2_end.is_some() {
            warning("Second-shift fields are ignored for single-shift rosters.");
        }
        overlay(&mut form.name, &self.name);
        overlay(&mut form.role, &self.role);
        overlay(&mut form.shift_start, &self.shift_start);
        overlay(&mut form.shift_end, &self.shift_end);
        overlay(&mut form.break_start, &self.break_start);
        overlay(&mut form.break_end, &self.break_end);
        form
    }

    /// `--role/--in/--out` fill the first shift, `--role2/--in2/--out2` the second.
    pub fn dual_form(&self, mut form: DualShiftForm) -> DualShiftForm {
        if self.break_start.is_some() || self.break_end.is_some() {
            warning("Break fields are ignored for dual-shift rosters.");
        }
        overlay(&mut form.name, &self.name);
        let apply = |shift: &mut ShiftForm, role: &Option<String>, s: &Option<String>, e: &Option<String>| {
            overlay(&mut shift.role, role);
            overlay(&mut shift.shift_start, s);
            overlay(&mut shift.shift_end, e);
        };
        apply(&mut form.shift1, &self.role, &self.shift_start, &self.shift_end);
        apply(&mut form.shift2, &self.role2, &self.shift2_start, &self.shift2_end);
        form
    }
}

/// High-level business logic for the `add` and `edit` commands.
pub struct AddLogic;

impl AddLogic {
    /// Validate and store a new employee (`editing == None`) or fully
    /// replace an existing one. Returns the employee id.
    ///
    /// Only brand-new single-shift employees are pushed to `sink`.
    pub fn apply(
        pool: &mut DbPool,
        cfg: &Config,
        input: &EmployeeInput,
        editing: Option<&EmployeeId>,
        sink: Option<&dyn RemoteSink>,
    ) -> AppResult<EmployeeId> {
        let rules = cfg.rules()?;
        let roster = load_roster_for_update(pool, cfg)?;

        let not_found = |id: &EmployeeId| AppError::EmployeeNotFound(id.to_string());

        let (roster, id, name, remote_record) = match roster {
            Roster::Single(mut r) => {
                let base = match editing {
                    Some(id) => SingleShiftForm::from_employee(r.find(id).ok_or_else(|| not_found(id))?),
                    None => SingleShiftForm::default(),
                };
                let form = input.single_form(base);
                let e = r.submit(&form, editing, &rules)?;
                let (id, name) = (e.id.clone(), e.name.clone());
                let record = editing
                    .is_none()
                    .then(|| ScheduleRecord::from_form(&cfg.remote.owner_id, &form));
                (Roster::Single(r), id, name, record)
            }
            Roster::Dual(mut r) => {
                let base = match editing {
                    Some(id) => DualShiftForm::from_employee(r.find(id).ok_or_else(|| not_found(id))?),
                    None => DualShiftForm::default(),
                };
                let form = input.dual_form(base);
                let e = r.submit(&form, editing, &rules)?;
                let (id, name) = (e.id.clone(), e.name.clone());
                (Roster::Dual(r), id, name, None)
            }
        };

        save_roster(pool, &roster)?;

        let operation = if editing.is_some() { "edit" } else { "add" };
        ttlog_quiet(
            &pool.conn,
            operation,
            id.as_str(),
            &format!("{} {} ({} employees)", operation, name, roster.len()),
        );

        if editing.is_some() {
            success(format!("Updated {} ({}).", name, id));
        } else {
            success(format!("Added {} ({}).", name, id));
        }

        if let (Some(sink), Some(record)) = (sink, remote_record) {
            push_best_effort(&pool.conn, sink, &record);
        }

        Ok(id)
    }
}
