//! Occupancy grid: one row per employee, one cell per slot.
//! Recomputed from the roster on every read; nothing here is cached.

use crate::core::calculator::overlap::OverlapPolicy;
use crate::core::calculator::slots::{BusinessHours, Slot};
use crate::core::registry::{RoleColorRegistry, StaticRoleColors};
use crate::models::employee::{DualShiftEmployee, SingleShiftEmployee};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Off,
    Work,
    Break,
}

impl CellStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellStatus::Off => "off",
            CellStatus::Work => "work",
            CellStatus::Break => "break",
        }
    }

    /// Label printed inside a grid cell.
    pub fn label(&self) -> &'static str {
        match self {
            CellStatus::Off => "",
            CellStatus::Work => "上班",
            CellStatus::Break => "休息",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub status: CellStatus,
    /// Role of the shift covering this slot (dual-shift rosters only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Cell {
    fn off() -> Self {
        Self {
            status: CellStatus::Off,
            role: None,
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleTag {
    pub role: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub id: String,
    pub name: String,
    pub roles: Vec<RoleTag>,
    pub cells: Vec<Cell>,
    pub work_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub slots: Vec<f64>,
    pub rows: Vec<GridRow>,
    pub total_work_hours: f64,
    pub legend: Vec<RoleTag>,
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// off → outside the shift; break → inside an enclosed break; work otherwise.
pub fn classify_single(e: &SingleShiftEmployee, slot: Slot, policy: OverlapPolicy) -> CellStatus {
    if !policy.overlaps(slot.start, slot.end, e.shift_start, e.shift_end) {
        return CellStatus::Off;
    }

    if let Some((break_start, break_end)) = e.break_range()
        && policy.overlaps(slot.start, slot.end, break_start, break_end)
    {
        return CellStatus::Break;
    }

    CellStatus::Work
}

/// First matching shift wins; shift 1 is checked before shift 2.
pub fn classify_dual(e: &DualShiftEmployee, slot: Slot, policy: OverlapPolicy) -> Cell {
    e.shifts()
        .find(|s| policy.overlaps(slot.start, slot.end, s.shift_start, s.shift_end))
        .map(|s| Cell {
            status: CellStatus::Work,
            role: Some(s.role.clone()),
            color: None,
        })
        .unwrap_or_else(Cell::off)
}

fn tags(entries: Vec<(String, String)>) -> Vec<RoleTag> {
    entries
        .into_iter()
        .map(|(role, color)| RoleTag { role, color })
        .collect()
}

pub fn project_single(
    employees: &[SingleShiftEmployee],
    registry: &RoleColorRegistry,
    hours: &BusinessHours,
    policy: OverlapPolicy,
) -> Grid {
    let rows: Vec<GridRow> = employees
        .iter()
        .map(|e| GridRow {
            id: e.id.to_string(),
            name: e.name.clone(),
            roles: vec![RoleTag {
                role: e.role.clone(),
                color: e.color.clone(),
            }],
            cells: hours
                .slots()
                .map(|slot| Cell {
                    status: classify_single(e, slot, policy),
                    role: None,
                    color: None,
                })
                .collect(),
            work_hours: e.work_hours(),
        })
        .collect();

    finish(hours, rows, tags(registry.entries().to_vec()))
}

pub fn project_dual(
    employees: &[DualShiftEmployee],
    colors: &StaticRoleColors,
    hours: &BusinessHours,
    policy: OverlapPolicy,
) -> Grid {
    let rows: Vec<GridRow> = employees
        .iter()
        .map(|e| GridRow {
            id: e.id.to_string(),
            name: e.name.clone(),
            roles: e
                .shifts()
                .map(|s| RoleTag {
                    role: s.role.clone(),
                    color: colors.color_for(&s.role).to_string(),
                })
                .collect(),
            cells: hours
                .slots()
                .map(|slot| {
                    let mut cell = classify_dual(e, slot, policy);
                    cell.color = cell.role.as_deref().map(|r| colors.color_for(r).to_string());
                    cell
                })
                .collect(),
            work_hours: e.work_hours(),
        })
        .collect();

    finish(hours, rows, tags(colors.legend()))
}

fn finish(hours: &BusinessHours, rows: Vec<GridRow>, legend: Vec<RoleTag>) -> Grid {
    let total_work_hours = rows.iter().map(|r| r.work_hours).sum();
    Grid {
        slots: hours.slots().map(|s| s.start).collect(),
        rows,
        total_work_hours,
        legend,
    }
}
