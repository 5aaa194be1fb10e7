//! In-memory session state: the employee list plus, for single-shift
//! rosters, the role color registry that mirrors it.
//!
//! Every mutation validates first and only touches state once the form was
//! accepted, so a rejected submission leaves the roster exactly as it was.

use crate::core::calculator::grid::{self, Grid};
use crate::core::calculator::overlap::OverlapPolicy;
use crate::core::calculator::slots::BusinessHours;
use crate::core::registry::{RoleColorRegistry, StaticRoleColors};
use crate::core::validation::{
    Capacity, DualShiftForm, SingleShiftForm, validate_dual, validate_single,
};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{DualShiftEmployee, EmployeeId, SingleShiftEmployee};
use crate::models::variant::Variant;
use std::collections::HashSet;

pub const ROSTER_CAP: usize = 15;

/// Limits a submission is checked against.
#[derive(Debug, Clone, Copy)]
pub struct RosterRules {
    pub hours: BusinessHours,
    pub cap: usize,
}

impl Default for RosterRules {
    fn default() -> Self {
        Self {
            hours: BusinessHours::default(),
            cap: ROSTER_CAP,
        }
    }
}

fn not_found(id: &EmployeeId) -> AppError {
    AppError::EmployeeNotFound(id.to_string())
}

fn malformed(id: &EmployeeId, what: &str) -> AppError {
    AppError::DecodeMalformed(format!("employee {id}: {what}"))
}

/// Checks shared by every replacement batch: cap, unique ids, names.
fn check_batch<'a>(
    records: impl ExactSizeIterator<Item = (&'a EmployeeId, &'a str)>,
    rules: &RosterRules,
) -> AppResult<()> {
    if records.len() > rules.cap {
        return Err(AppError::DecodeMalformed(format!(
            "{} employees, at most {} allowed",
            records.len(),
            rules.cap
        )));
    }
    let mut seen = HashSet::new();
    for (id, name) in records {
        if !seen.insert(id) {
            return Err(malformed(id, "duplicate id"));
        }
        if name.trim().is_empty() {
            return Err(malformed(id, "empty name"));
        }
    }
    Ok(())
}

fn check_interval(id: &EmployeeId, start: f64, end: f64, hours: &BusinessHours) -> AppResult<()> {
    if start >= end {
        return Err(malformed(id, "shift ends before it starts"));
    }
    if !hours.contains(start, end) {
        return Err(malformed(id, "shift outside business hours"));
    }
    Ok(())
}

fn check_single(e: &SingleShiftEmployee, hours: &BusinessHours) -> AppResult<()> {
    check_interval(&e.id, e.shift_start, e.shift_end, hours)?;
    match (e.break_start, e.break_end) {
        (None, None) => Ok(()),
        (Some(s), Some(b)) if e.shift_start <= s && s < b && b <= e.shift_end => Ok(()),
        _ => Err(malformed(&e.id, "break outside its shift")),
    }
}

fn check_dual(e: &DualShiftEmployee, hours: &BusinessHours) -> AppResult<()> {
    if e.shifts().next().is_none() {
        return Err(malformed(&e.id, "no shift"));
    }
    for s in e.shifts() {
        if s.role.trim().is_empty() {
            return Err(malformed(&e.id, "shift without role"));
        }
        check_interval(&e.id, s.shift_start, s.shift_end, hours)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Single-shift
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SingleRoster {
    employees: Vec<SingleShiftEmployee>,
    registry: RoleColorRegistry,
}

impl SingleRoster {
    pub fn new(registry: RoleColorRegistry) -> Self {
        Self {
            employees: Vec::new(),
            registry,
        }
    }

    pub fn from_parts(employees: Vec<SingleShiftEmployee>, registry: RoleColorRegistry) -> Self {
        Self {
            employees,
            registry,
        }
    }

    pub fn employees(&self) -> &[SingleShiftEmployee] {
        &self.employees
    }

    pub fn registry(&self) -> &RoleColorRegistry {
        &self.registry
    }

    pub fn find(&self, id: &EmployeeId) -> Option<&SingleShiftEmployee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    /// Create (`editing == None`) or fully replace an employee.
    pub fn submit(
        &mut self,
        form: &SingleShiftForm,
        editing: Option<&EmployeeId>,
        rules: &RosterRules,
    ) -> AppResult<&SingleShiftEmployee> {
        let index = match editing {
            Some(id) => Some(
                self.employees
                    .iter()
                    .position(|e| &e.id == id)
                    .ok_or_else(|| not_found(id))?,
            ),
            None => None,
        };

        let valid = validate_single(
            form,
            &rules.hours,
            Capacity {
                current: self.employees.len(),
                cap: rules.cap,
                editing: index.is_some(),
            },
        )?;

        let color = self.registry.assign(&valid.role);
        let (break_start, break_end) = match valid.break_range {
            Some((s, e)) => (Some(s), Some(e)),
            None => (None, None),
        };

        let slot = match index {
            Some(i) => {
                let previous_role = std::mem::take(&mut self.employees[i].role);
                let e = &mut self.employees[i];
                e.name = valid.name;
                e.role = valid.role;
                e.color = color;
                e.shift_start = valid.shift_start;
                e.shift_end = valid.shift_end;
                e.break_start = break_start;
                e.break_end = break_end;

                if previous_role != self.employees[i].role {
                    self.registry.release_if_unused(
                        &previous_role,
                        self.employees.iter().map(|e| e.role.as_str()),
                    );
                }
                i
            }
            None => {
                self.employees.push(SingleShiftEmployee {
                    id: EmployeeId::generate(),
                    name: valid.name,
                    role: valid.role,
                    color,
                    shift_start: valid.shift_start,
                    shift_end: valid.shift_end,
                    break_start,
                    break_end,
                });
                self.employees.len() - 1
            }
        };

        Ok(&self.employees[slot])
    }

    /// Remove an employee and reclaim its role color if nobody else uses it.
    pub fn delete(&mut self, id: &EmployeeId) -> AppResult<SingleShiftEmployee> {
        let index = self
            .employees
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = self.employees.remove(index);
        self.registry.release_if_unused(
            &removed.role,
            self.employees.iter().map(|e| e.role.as_str()),
        );
        Ok(removed)
    }

    /// Replace the whole roster, re-deriving every color from the registry.
    /// The batch is checked against `rules` first; on error nothing changes.
    pub fn replace_all(
        &mut self,
        mut employees: Vec<SingleShiftEmployee>,
        rules: &RosterRules,
    ) -> AppResult<()> {
        check_batch(employees.iter().map(|e| (&e.id, e.name.as_str())), rules)?;
        for e in &employees {
            check_single(e, &rules.hours)?;
        }

        self.registry.clear_entries();
        for e in &mut employees {
            e.color = self.registry.assign(&e.role);
        }
        self.employees = employees;
        Ok(())
    }

    pub fn project(&self, hours: &BusinessHours, policy: OverlapPolicy) -> Grid {
        grid::project_single(&self.employees, &self.registry, hours, policy)
    }
}

// ---------------------------------------------------------------------------
// Dual-shift
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct DualRoster {
    employees: Vec<DualShiftEmployee>,
    colors: StaticRoleColors,
}

impl DualRoster {
    pub fn new(colors: StaticRoleColors) -> Self {
        Self {
            employees: Vec::new(),
            colors,
        }
    }

    pub fn from_parts(employees: Vec<DualShiftEmployee>, colors: StaticRoleColors) -> Self {
        Self { employees, colors }
    }

    pub fn employees(&self) -> &[DualShiftEmployee] {
        &self.employees
    }

    pub fn colors(&self) -> &StaticRoleColors {
        &self.colors
    }

    pub fn find(&self, id: &EmployeeId) -> Option<&DualShiftEmployee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    pub fn submit(
        &mut self,
        form: &DualShiftForm,
        editing: Option<&EmployeeId>,
        rules: &RosterRules,
    ) -> AppResult<&DualShiftEmployee> {
        let index = match editing {
            Some(id) => Some(
                self.employees
                    .iter()
                    .position(|e| &e.id == id)
                    .ok_or_else(|| not_found(id))?,
            ),
            None => None,
        };

        let valid = validate_dual(
            form,
            &rules.hours,
            Capacity {
                current: self.employees.len(),
                cap: rules.cap,
                editing: index.is_some(),
            },
        )?;

        let slot = match index {
            Some(i) => {
                let e = &mut self.employees[i];
                e.name = valid.name;
                e.shift1 = valid.shift1;
                e.shift2 = valid.shift2;
                i
            }
            None => {
                self.employees.push(DualShiftEmployee {
                    id: EmployeeId::generate(),
                    name: valid.name,
                    shift1: valid.shift1,
                    shift2: valid.shift2,
                });
                self.employees.len() - 1
            }
        };

        Ok(&self.employees[slot])
    }

    pub fn delete(&mut self, id: &EmployeeId) -> AppResult<DualShiftEmployee> {
        let index = self
            .employees
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| not_found(id))?;
        Ok(self.employees.remove(index))
    }

    pub fn replace_all(&mut self, employees: Vec<DualShiftEmployee>, rules: &RosterRules) -> AppResult<()> {
        check_batch(employees.iter().map(|e| (&e.id, e.name.as_str())), rules)?;
        for e in &employees {
            check_dual(e, &rules.hours)?;
        }
        self.employees = employees;
        Ok(())
    }

    pub fn project(&self, hours: &BusinessHours, policy: OverlapPolicy) -> Grid {
        grid::project_dual(&self.employees, &self.colors, hours, policy)
    }
}

// ---------------------------------------------------------------------------
// Tagged union over the two shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Roster {
    Single(SingleRoster),
    Dual(DualRoster),
}

impl Roster {
    pub fn variant(&self) -> Variant {
        match self {
            Roster::Single(_) => Variant::Single,
            Roster::Dual(_) => Variant::Dual,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Roster::Single(r) => r.employees().len(),
            Roster::Dual(r) => r.employees().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &EmployeeId) -> bool {
        match self {
            Roster::Single(r) => r.find(id).is_some(),
            Roster::Dual(r) => r.find(id).is_some(),
        }
    }

    /// Display name of an employee, used for log lines.
    pub fn name_of(&self, id: &EmployeeId) -> Option<&str> {
        match self {
            Roster::Single(r) => r.find(id).map(|e| e.name.as_str()),
            Roster::Dual(r) => r.find(id).map(|e| e.name.as_str()),
        }
    }

    pub fn delete(&mut self, id: &EmployeeId) -> AppResult<String> {
        match self {
            Roster::Single(r) => r.delete(id).map(|e| e.name),
            Roster::Dual(r) => r.delete(id).map(|e| e.name),
        }
    }

    pub fn project(&self, hours: &BusinessHours, policy: OverlapPolicy) -> Grid {
        match self {
            Roster::Single(r) => r.project(hours, policy),
            Roster::Dual(r) => r.project(hours, policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::COLOR_PALETTE;
    use crate::core::validation::{ShiftForm, ValidationKind};

    fn form(name: &str, role: &str) -> SingleShiftForm {
        SingleShiftForm {
            name: name.into(),
            role: role.into(),
            ..SingleShiftForm::default()
        }
    }

    fn kind(err: AppError) -> ValidationKind {
        match err {
            AppError::Validation(v) => v.kind,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn new_role_allocates_exactly_one_color() {
        let rules = RosterRules::default();
        let mut roster = SingleRoster::default();

        let color = roster.submit(&form("a", "客服"), None, &rules).unwrap().color.clone();
        assert_eq!(color, COLOR_PALETTE[0]);
        assert_eq!(roster.registry().palette_index(), 1);

        // same role again: no second allocation
        let again = roster.submit(&form("b", "客服"), None, &rules).unwrap().color.clone();
        assert_eq!(again, color);
        assert_eq!(roster.registry().palette_index(), 1);
    }

    #[test]
    fn deleting_last_holder_reclaims_role() {
        let rules = RosterRules::default();
        let mut roster = SingleRoster::default();
        let a = roster.submit(&form("a", "客服"), None, &rules).unwrap().id.clone();
        let b = roster.submit(&form("b", "客服"), None, &rules).unwrap().id.clone();

        roster.delete(&a).unwrap();
        assert!(roster.registry().color_of("客服").is_some());
        roster.delete(&b).unwrap();
        assert!(roster.registry().color_of("客服").is_none());
        assert_eq!(roster.registry().palette_index(), 1);
    }

    #[test]
    fn edit_keeps_id_and_reclaims_previous_role() {
        let rules = RosterRules::default();
        let mut roster = SingleRoster::default();
        let id = roster.submit(&form("a", "客服"), None, &rules).unwrap().id.clone();

        let edited = roster.submit(&form("a2", "廚房"), Some(&id), &rules).unwrap();
        assert_eq!(edited.id, id);
        assert_eq!(edited.name, "a2");
        assert_eq!(edited.color, COLOR_PALETTE[1]);
        assert_eq!(roster.employees().len(), 1);
        assert!(roster.registry().color_of("客服").is_none());
        assert!(roster.registry().color_of("廚房").is_some());
    }

    #[test]
    fn edit_with_unchanged_role_keeps_color() {
        let rules = RosterRules::default();
        let mut roster = SingleRoster::default();
        let id = roster.submit(&form("a", "客服"), None, &rules).unwrap().id.clone();
        let mut f = form("a", "客服");
        f.shift_end = "20:00".into();
        let e = roster.submit(&f, Some(&id), &rules).unwrap();
        assert_eq!(e.shift_end, 20.0);
        assert_eq!(e.color, COLOR_PALETTE[0]);
        assert_eq!(roster.registry().palette_index(), 1);
    }

    #[test]
    fn sixteenth_submission_is_rejected_but_edit_succeeds() {
        let rules = RosterRules::default();
        let mut roster = SingleRoster::default();
        for i in 0..15 {
            roster.submit(&form(&format!("e{i}"), "客服"), None, &rules).unwrap();
        }
        let err = roster.submit(&form("late", "客服"), None, &rules).unwrap_err();
        assert_eq!(kind(err), ValidationKind::RosterFull);
        assert_eq!(roster.employees().len(), 15);

        let id = roster.employees()[3].id.clone();
        assert!(roster.submit(&form("renamed", "客服"), Some(&id), &rules).is_ok());
        assert_eq!(roster.employees().len(), 15);
    }

    #[test]
    fn rejected_submission_leaves_state_untouched() {
        let rules = RosterRules::default();
        let mut roster = SingleRoster::default();
        let mut bad = form("a", "新角色");
        bad.shift_start = "19:00".into();
        bad.shift_end = "18:00".into();
        assert!(roster.submit(&bad, None, &rules).is_err());
        assert!(roster.employees().is_empty());
        assert!(roster.registry().entries().is_empty());
        assert_eq!(roster.registry().palette_index(), 0);
    }

    #[test]
    fn editing_unknown_id_is_an_error() {
        let mut roster = SingleRoster::default();
        let err = roster
            .submit(&form("a", "b"), Some(&EmployeeId::from("nope")), &RosterRules::default())
            .unwrap_err();
        assert!(matches!(err, AppError::EmployeeNotFound(_)));
    }

    #[test]
    fn replace_all_recolors_from_registry() {
        let rules = RosterRules::default();
        let mut source = SingleRoster::default();
        source.submit(&form("a", "菜口"), None, &rules).unwrap();
        source.submit(&form("b", "客服"), None, &rules).unwrap();
        let imported = source.employees().to_vec();

        let mut target = SingleRoster::default();
        target.submit(&form("x", "舊角色"), None, &rules).unwrap();
        target.replace_all(imported, &rules).unwrap();
        assert_eq!(target.employees().len(), 2);
        assert_eq!(target.employees()[0].color, "#1d4ed8");
        assert!(target.registry().color_of("舊角色").is_none());
        // palette position carries on from the session
        assert_eq!(target.employees()[1].color, COLOR_PALETTE[1]);
    }

    #[test]
    fn dual_submit_and_delete() {
        let rules = RosterRules::default();
        let mut roster = DualRoster::default();
        let f = DualShiftForm {
            name: "林".into(),
            shift1: ShiftForm {
                role: "菜口".into(),
                shift_start: "10:00".into(),
                shift_end: "14:00".into(),
            },
            ..DualShiftForm::default()
        };
        let id = roster.submit(&f, None, &rules).unwrap().id.clone();
        assert!(roster.find(&id).unwrap().shift2.is_none());

        let mut both = f.clone();
        both.shift2.role = "跑菜".into();
        let e = roster.submit(&both, Some(&id), &rules).unwrap();
        assert_eq!(e.work_hours(), 9.0);

        let mut wrapped = Roster::Dual(roster);
        assert_eq!(wrapped.delete(&id).unwrap(), "林");
        assert!(wrapped.is_empty());
    }

    #[test]
    fn replace_all_rejects_invalid_batches() {
        let rules = RosterRules::default();
        let mut roster = SingleRoster::default();
        roster.submit(&form("keep", "客服"), None, &rules).unwrap();
        let valid = roster.employees()[0].clone();

        let inverted = SingleShiftEmployee {
            id: EmployeeId::from("2-x"),
            shift_start: 18.0,
            shift_end: 12.0,
            ..valid.clone()
        };
        let loose_break = SingleShiftEmployee {
            id: EmployeeId::from("3-x"),
            break_start: Some(9.0),
            break_end: Some(11.0),
            ..valid.clone()
        };
        let too_many: Vec<_> = (0..16)
            .map(|i| SingleShiftEmployee {
                id: EmployeeId::from(format!("{i}-n").as_str()),
                ..valid.clone()
            })
            .collect();

        for batch in [
            vec![inverted],
            vec![loose_break],
            vec![valid.clone(), valid.clone()],
            too_many,
        ] {
            let err = roster.replace_all(batch, &rules).unwrap_err();
            assert!(matches!(err, AppError::DecodeMalformed(_)));
        }
        assert_eq!(roster.employees(), [valid]);
        assert!(roster.registry().color_of("客服").is_some());
    }

    #[test]
    fn dual_replace_all_needs_a_shift() {
        let mut roster = DualRoster::default();
        let empty = DualShiftEmployee {
            id: EmployeeId::from("1-d"),
            name: "林".into(),
            shift1: None,
            shift2: None,
        };
        let err = roster
            .replace_all(vec![empty], &RosterRules::default())
            .unwrap_err();
        assert!(matches!(err, AppError::DecodeMalformed(_)));
        assert!(roster.employees().is_empty());
    }
}
