//! Form validation for both employee shapes.
//!
//! Checks run in a fixed order and stop at the first failure. A failure can
//! still point at more than one input (e.g. both shift bounds), so the error
//! carries a list of field keys matching the form input identifiers.

use crate::core::calculator::slots::BusinessHours;
use crate::models::employee::{DualShiftEmployee, Shift, SingleShiftEmployee};
use crate::utils::time::{is_half_hour_aligned, parse_clock, to_time_input_value};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Role,
    ShiftStart,
    ShiftEnd,
    BreakStart,
    BreakEnd,
    Shift1Role,
    Shift1Start,
    Shift1End,
    Shift2Role,
    Shift2Start,
    Shift2End,
    /// Form-wide error not tied to one input.
    Root,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Role => "role",
            FormField::ShiftStart => "shiftStart",
            FormField::ShiftEnd => "shiftEnd",
            FormField::BreakStart => "breakStart",
            FormField::BreakEnd => "breakEnd",
            FormField::Shift1Role => "shift1Role",
            FormField::Shift1Start => "shift1Start",
            FormField::Shift1End => "shift1End",
            FormField::Shift2Role => "shift2Role",
            FormField::Shift2Start => "shift2Start",
            FormField::Shift2End => "shift2End",
            FormField::Root => "root",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    InputIncomplete,
    InputInvalid,
    InputOutOfRange,
    CapacityExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    EmptyName,
    EmptyRole,
    MisalignedTime,
    IncompleteShift,
    OutOfBusinessHours,
    InvertedShift,
    IncompleteBreak,
    BreakOutOfShift,
    InvertedBreak,
    RosterFull,
    IncompleteShiftTime,
    NoShiftSelected,
}

impl ValidationKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidationKind::EmptyName
            | ValidationKind::EmptyRole
            | ValidationKind::IncompleteShift
            | ValidationKind::IncompleteBreak
            | ValidationKind::IncompleteShiftTime
            | ValidationKind::NoShiftSelected => ErrorCategory::InputIncomplete,
            ValidationKind::MisalignedTime
            | ValidationKind::InvertedShift
            | ValidationKind::InvertedBreak => ErrorCategory::InputInvalid,
            ValidationKind::OutOfBusinessHours | ValidationKind::BreakOutOfShift => {
                ErrorCategory::InputOutOfRange
            }
            ValidationKind::RosterFull => ErrorCategory::CapacityExceeded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub fields: Vec<FormField>,
    pub message: String,
}

impl ValidationError {
    fn new(kind: ValidationKind, fields: &[FormField], message: impl Into<String>) -> Self {
        Self {
            kind,
            fields: fields.to_vec(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Field keys as the form knows them.
    pub fn field_keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(FormField::as_str).collect()
    }
}

type Validated<T> = Result<T, ValidationError>;

/// Roster context a submission is checked against.
#[derive(Debug, Clone, Copy)]
pub struct Capacity {
    pub current: usize,
    pub cap: usize,
    pub editing: bool,
}

fn check_capacity(capacity: Capacity) -> Validated<()> {
    if !capacity.editing && capacity.current >= capacity.cap {
        return Err(ValidationError::new(
            ValidationKind::RosterFull,
            &[FormField::Root],
            format!("已達 {} 位員工的上限。", capacity.cap),
        ));
    }
    Ok(())
}

fn check_alignment(fields: &[(FormField, &str)]) -> Validated<()> {
    for (field, value) in fields {
        if !is_half_hour_aligned(value.trim()) {
            return Err(ValidationError::new(
                ValidationKind::MisalignedTime,
                &[*field],
                "分鐘僅能為 00 或 30。",
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Single-shift form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SingleShiftForm {
    pub name: String,
    pub role: String,
    pub shift_start: String,
    pub shift_end: String,
    pub break_start: String,
    pub break_end: String,
}

impl Default for SingleShiftForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: String::new(),
            shift_start: "10:00".into(),
            shift_end: "18:00".into(),
            break_start: String::new(),
            break_end: String::new(),
        }
    }
}

impl SingleShiftForm {
    /// Prefill used when editing an existing employee.
    pub fn from_employee(e: &SingleShiftEmployee) -> Self {
        Self {
            name: e.name.clone(),
            role: e.role.clone(),
            shift_start: to_time_input_value(Some(e.shift_start)),
            shift_end: to_time_input_value(Some(e.shift_end)),
            break_start: to_time_input_value(e.break_start),
            break_end: to_time_input_value(e.break_end),
        }
    }
}

/// Accepted single-shift fields, trimmed and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSingleShift {
    pub name: String,
    pub role: String,
    pub shift_start: f64,
    pub shift_end: f64,
    pub break_range: Option<(f64, f64)>,
}

fn optional_clock(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        None
    } else {
        parse_clock(value)
    }
}

pub fn validate_single(
    form: &SingleShiftForm,
    hours: &BusinessHours,
    capacity: Capacity,
) -> Validated<ValidSingleShift> {
    check_capacity(capacity)?;
    check_alignment(&[
        (FormField::ShiftStart, form.shift_start.as_str()),
        (FormField::ShiftEnd, form.shift_end.as_str()),
        (FormField::BreakStart, form.break_start.as_str()),
        (FormField::BreakEnd, form.break_end.as_str()),
    ])?;

    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new(
            ValidationKind::EmptyName,
            &[FormField::Name],
            "請輸入員工姓名。",
        ));
    }

    let role = form.role.trim();
    if role.is_empty() {
        return Err(ValidationError::new(
            ValidationKind::EmptyRole,
            &[FormField::Role],
            "請輸入工作項目。",
        ));
    }

    let (Some(shift_start), Some(shift_end)) =
        (parse_clock(&form.shift_start), parse_clock(&form.shift_end))
    else {
        return Err(ValidationError::new(
            ValidationKind::IncompleteShift,
            &[FormField::ShiftStart, FormField::ShiftEnd],
            "請輸入完整的上班時段。",
        ));
    };

    let mut out_of_hours = Vec::new();
    if shift_start < hours.start {
        out_of_hours.push(FormField::ShiftStart);
    }
    if shift_end > hours.end {
        out_of_hours.push(FormField::ShiftEnd);
    }
    if !out_of_hours.is_empty() {
        return Err(ValidationError::new(
            ValidationKind::OutOfBusinessHours,
            &out_of_hours,
            format!("上班時間需介於 {}。", hours.label()),
        ));
    }

    if shift_start >= shift_end {
        return Err(ValidationError::new(
            ValidationKind::InvertedShift,
            &[FormField::ShiftEnd],
            "上班開始時間需早於結束時間。",
        ));
    }

    let break_range = match (optional_clock(&form.break_start), optional_clock(&form.break_end)) {
        (None, None) => None,
        (Some(s), Some(e)) => Some((s, e)),
        _ => {
            return Err(ValidationError::new(
                ValidationKind::IncompleteBreak,
                &[FormField::BreakStart, FormField::BreakEnd],
                "請輸入完整的休息起迄時間，或全部留空。",
            ));
        }
    };

    if let Some((break_start, break_end)) = break_range {
        let mut outside = Vec::new();
        if break_start < shift_start {
            outside.push(FormField::BreakStart);
        }
        if break_end > shift_end {
            outside.push(FormField::BreakEnd);
        }
        if !outside.is_empty() {
            return Err(ValidationError::new(
                ValidationKind::BreakOutOfShift,
                &outside,
                "休息時段需介於上班時段之內。",
            ));
        }
        if break_start >= break_end {
            return Err(ValidationError::new(
                ValidationKind::InvertedBreak,
                &[FormField::BreakEnd],
                "休息開始時間需早於結束時間。",
            ));
        }
    }

    Ok(ValidSingleShift {
        name: name.to_string(),
        role: role.to_string(),
        shift_start,
        shift_end,
        break_range,
    })
}

// ---------------------------------------------------------------------------
// Dual-shift form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ShiftForm {
    pub role: String,
    pub shift_start: String,
    pub shift_end: String,
}

impl ShiftForm {
    fn with_times(start: &str, end: &str) -> Self {
        Self {
            role: String::new(),
            shift_start: start.into(),
            shift_end: end.into(),
        }
    }

    /// A shift counts as filled in only when a role was chosen;
    /// the time inputs always carry defaults.
    pub fn is_present(&self) -> bool {
        !self.role.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DualShiftForm {
    pub name: String,
    pub shift1: ShiftForm,
    pub shift2: ShiftForm,
}

impl Default for DualShiftForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            shift1: ShiftForm::with_times("10:00", "18:00"),
            shift2: ShiftForm::with_times("18:00", "23:00"),
        }
    }
}

impl DualShiftForm {
    pub fn from_employee(e: &DualShiftEmployee) -> Self {
        let defaults = Self::default();
        let prefill = |shift: &Option<Shift>, fallback: ShiftForm| match shift {
            Some(s) => ShiftForm {
                role: s.role.clone(),
                shift_start: to_time_input_value(Some(s.shift_start)),
                shift_end: to_time_input_value(Some(s.shift_end)),
            },
            None => fallback,
        };
        Self {
            name: e.name.clone(),
            shift1: prefill(&e.shift1, defaults.shift1),
            shift2: prefill(&e.shift2, defaults.shift2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidDualShift {
    pub name: String,
    pub shift1: Option<Shift>,
    pub shift2: Option<Shift>,
}

struct ShiftSlot<'a> {
    form: &'a ShiftForm,
    ordinal: &'static str,
    role: FormField,
    start: FormField,
    end: FormField,
}

impl ShiftSlot<'_> {
    fn require_times(&self) -> Validated<()> {
        if !self.form.is_present() {
            return Ok(());
        }
        if self.form.shift_start.trim().is_empty() {
            return Err(ValidationError::new(
                ValidationKind::IncompleteShiftTime,
                &[self.start],
                format!("請輸入{}的上班開始時間。", self.ordinal),
            ));
        }
        if self.form.shift_end.trim().is_empty() {
            return Err(ValidationError::new(
                ValidationKind::IncompleteShiftTime,
                &[self.end],
                format!("請輸入{}的上班結束時間。", self.ordinal),
            ));
        }
        Ok(())
    }

    fn resolve(&self, hours: &BusinessHours) -> Validated<Option<Shift>> {
        if !self.form.is_present() {
            return Ok(None);
        }

        let start = parse_clock(&self.form.shift_start).ok_or_else(|| {
            ValidationError::new(
                ValidationKind::IncompleteShiftTime,
                &[self.start],
                format!("請輸入{}的上班開始時間。", self.ordinal),
            )
        })?;
        let end = parse_clock(&self.form.shift_end).ok_or_else(|| {
            ValidationError::new(
                ValidationKind::IncompleteShiftTime,
                &[self.end],
                format!("請輸入{}的上班結束時間。", self.ordinal),
            )
        })?;

        if start >= end {
            return Err(ValidationError::new(
                ValidationKind::InvertedShift,
                &[self.end],
                format!("{}的上班開始時間需早於結束時間。", self.ordinal),
            ));
        }

        let mut outside = Vec::new();
        if start < hours.start {
            outside.push(self.start);
        }
        if end > hours.end {
            outside.push(self.end);
        }
        if !outside.is_empty() {
            return Err(ValidationError::new(
                ValidationKind::OutOfBusinessHours,
                &outside,
                format!("{}時間需介於 {}。", self.ordinal, hours.label()),
            ));
        }

        Ok(Some(Shift {
            role: self.form.role.trim().to_string(),
            shift_start: start,
            shift_end: end,
        }))
    }
}

/// Shift 1 and shift 2 are validated independently; no check is made that
/// they do not overlap each other.
pub fn validate_dual(
    form: &DualShiftForm,
    hours: &BusinessHours,
    capacity: Capacity,
) -> Validated<ValidDualShift> {
    check_capacity(capacity)?;

    let slots = [
        ShiftSlot {
            form: &form.shift1,
            ordinal: "第一段班",
            role: FormField::Shift1Role,
            start: FormField::Shift1Start,
            end: FormField::Shift1End,
        },
        ShiftSlot {
            form: &form.shift2,
            ordinal: "第二段班",
            role: FormField::Shift2Role,
            start: FormField::Shift2Start,
            end: FormField::Shift2End,
        },
    ];

    for slot in &slots {
        check_alignment(&[
            (slot.start, slot.form.shift_start.as_str()),
            (slot.end, slot.form.shift_end.as_str()),
        ])?;
    }

    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::new(
            ValidationKind::EmptyName,
            &[FormField::Name],
            "請輸入員工姓名。",
        ));
    }

    for slot in &slots {
        slot.require_times()?;
    }

    if slots.iter().all(|s| !s.form.is_present()) {
        return Err(ValidationError::new(
            ValidationKind::NoShiftSelected,
            &[slots[0].role, slots[1].role],
            "請至少填寫一段班次。",
        ));
    }

    let shift1 = slots[0].resolve(hours)?;
    let shift2 = slots[1].resolve(hours)?;

    Ok(ValidDualShift {
        name: name.to_string(),
        shift1,
        shift2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: Capacity = Capacity {
        current: 0,
        cap: 15,
        editing: false,
    };

    fn single(name: &str, role: &str, shift: (&str, &str), brk: (&str, &str)) -> SingleShiftForm {
        SingleShiftForm {
            name: name.into(),
            role: role.into(),
            shift_start: shift.0.into(),
            shift_end: shift.1.into(),
            break_start: brk.0.into(),
            break_end: brk.1.into(),
        }
    }

    fn kind_of(form: &SingleShiftForm) -> ValidationKind {
        validate_single(form, &BusinessHours::default(), OPEN)
            .unwrap_err()
            .kind
    }

    #[test]
    fn accepts_shift_with_break() {
        let v = validate_single(
            &single(" 王小明 ", " 客服 ", ("10:00", "18:00"), ("12:00", "13:00")),
            &BusinessHours::default(),
            OPEN,
        )
        .unwrap();
        assert_eq!(v.name, "王小明");
        assert_eq!(v.role, "客服");
        assert_eq!(v.break_range, Some((12.0, 13.0)));
    }

    #[test]
    fn accepts_shift_spanning_whole_business_day() {
        let v = validate_single(
            &single("a", "b", ("10:00", "23:00"), ("", "")),
            &BusinessHours::default(),
            OPEN,
        )
        .unwrap();
        assert_eq!((v.shift_start, v.shift_end), (10.0, 23.0));
        assert_eq!(v.break_range, None);
    }

    #[test]
    fn first_failure_wins_in_order() {
        // name and role both empty: name is reported
        assert_eq!(
            kind_of(&single(" ", "", ("10:00", "18:00"), ("", ""))),
            ValidationKind::EmptyName
        );
        assert_eq!(
            kind_of(&single("a", " ", ("10:00", "18:00"), ("", ""))),
            ValidationKind::EmptyRole
        );
        assert_eq!(
            kind_of(&single("a", "b", ("", "18:00"), ("", ""))),
            ValidationKind::IncompleteShift
        );
        // out of hours is reported before inversion
        assert_eq!(
            kind_of(&single("a", "b", ("09:00", "08:00"), ("", ""))),
            ValidationKind::OutOfBusinessHours
        );
        assert_eq!(
            kind_of(&single("a", "b", ("18:00", "18:00"), ("", ""))),
            ValidationKind::InvertedShift
        );
        assert_eq!(
            kind_of(&single("a", "b", ("10:00", "18:00"), ("12:00", ""))),
            ValidationKind::IncompleteBreak
        );
        assert_eq!(
            kind_of(&single("a", "b", ("12:00", "18:00"), ("11:00", "13:00"))),
            ValidationKind::BreakOutOfShift
        );
        assert_eq!(
            kind_of(&single("a", "b", ("10:00", "18:00"), ("13:00", "12:00"))),
            ValidationKind::InvertedBreak
        );
    }

    #[test]
    fn out_of_hours_points_at_offending_bounds() {
        let err = validate_single(
            &single("a", "b", ("09:00", "23:30"), ("", "")),
            &BusinessHours::default(),
            OPEN,
        )
        .unwrap_err();
        assert_eq!(err.field_keys(), vec!["shiftStart", "shiftEnd"]);
        assert_eq!(err.message, "上班時間需介於 10:00 ~ 23:00。");
        assert_eq!(err.category(), ErrorCategory::InputOutOfRange);
    }

    #[test]
    fn break_may_touch_shift_edges() {
        assert!(
            validate_single(
                &single("a", "b", ("10:00", "18:00"), ("10:00", "18:00")),
                &BusinessHours::default(),
                OPEN,
            )
            .is_ok()
        );
    }

    #[test]
    fn misaligned_minutes_are_rejected_per_field() {
        let err = validate_single(
            &single("a", "b", ("10:00", "18:00"), ("12:15", "13:00")),
            &BusinessHours::default(),
            OPEN,
        )
        .unwrap_err();
        assert_eq!(err.kind, ValidationKind::MisalignedTime);
        assert_eq!(err.fields, vec![FormField::BreakStart]);
    }

    #[test]
    fn full_roster_rejects_new_but_not_edits() {
        let form = single("a", "b", ("10:00", "18:00"), ("", ""));
        let full = Capacity {
            current: 15,
            cap: 15,
            editing: false,
        };
        let err = validate_single(&form, &BusinessHours::default(), full).unwrap_err();
        assert_eq!(err.kind, ValidationKind::RosterFull);
        assert_eq!(err.category(), ErrorCategory::CapacityExceeded);
        assert_eq!(err.field_keys(), vec!["root"]);

        let editing = Capacity {
            editing: true,
            ..full
        };
        assert!(validate_single(&form, &BusinessHours::default(), editing).is_ok());
    }

    fn dual(name: &str, s1: (&str, &str, &str), s2: (&str, &str, &str)) -> DualShiftForm {
        DualShiftForm {
            name: name.into(),
            shift1: ShiftForm {
                role: s1.0.into(),
                shift_start: s1.1.into(),
                shift_end: s1.2.into(),
            },
            shift2: ShiftForm {
                role: s2.0.into(),
                shift_start: s2.1.into(),
                shift_end: s2.2.into(),
            },
        }
    }

    fn dual_err(form: &DualShiftForm) -> ValidationError {
        validate_dual(form, &BusinessHours::default(), OPEN).unwrap_err()
    }

    #[test]
    fn dual_presence_follows_role_only() {
        // times filled, roles empty → nothing selected
        let err = dual_err(&dual("a", ("", "10:00", "18:00"), ("", "18:00", "23:00")));
        assert_eq!(err.kind, ValidationKind::NoShiftSelected);
        assert_eq!(err.field_keys(), vec!["shift1Role", "shift2Role"]);

        let v = validate_dual(
            &dual("a", ("", "10:00", "18:00"), ("菜口", "18:00", "23:00")),
            &BusinessHours::default(),
            OPEN,
        )
        .unwrap();
        assert!(v.shift1.is_none());
        assert_eq!(v.shift2.unwrap().role, "菜口");
    }

    #[test]
    fn dual_missing_time_has_distinct_message_per_field() {
        let start = dual_err(&dual("a", ("菜口", "", "18:00"), ("", "", "")));
        let end = dual_err(&dual("a", ("菜口", "10:00", ""), ("", "", "")));
        assert_eq!(start.kind, ValidationKind::IncompleteShiftTime);
        assert_eq!(start.fields, vec![FormField::Shift1Start]);
        assert_eq!(end.fields, vec![FormField::Shift1End]);
        assert_ne!(start.message, end.message);
    }

    #[test]
    fn dual_missing_time_is_reported_before_no_shift() {
        let err = dual_err(&dual("a", ("", "", ""), ("跑菜", "18:00", "")));
        assert_eq!(err.kind, ValidationKind::IncompleteShiftTime);
        assert_eq!(err.fields, vec![FormField::Shift2End]);
    }

    #[test]
    fn dual_inversion_before_business_hours() {
        let err = dual_err(&dual("a", ("菜口", "23:30", "09:00"), ("", "", "")));
        assert_eq!(err.kind, ValidationKind::InvertedShift);

        let err = dual_err(&dual("a", ("菜口", "09:00", "12:00"), ("", "", "")));
        assert_eq!(err.kind, ValidationKind::OutOfBusinessHours);
        assert_eq!(err.fields, vec![FormField::Shift1Start]);
    }

    #[test]
    fn dual_overlapping_shifts_are_not_checked() {
        let v = validate_dual(
            &dual("a", ("菜口", "10:00", "15:00"), ("跑菜", "12:00", "18:00")),
            &BusinessHours::default(),
            OPEN,
        )
        .unwrap();
        assert!(v.shift1.is_some() && v.shift2.is_some());
    }

    #[test]
    fn dual_capacity_is_checked_first() {
        let full = Capacity {
            current: 15,
            cap: 15,
            editing: false,
        };
        let err = validate_dual(&dual("", ("", "", ""), ("", "", "")), &BusinessHours::default(), full)
            .unwrap_err();
        assert_eq!(err.kind, ValidationKind::RosterFull);
    }
}
