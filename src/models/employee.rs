use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque employee token: `<unix-millis>-<random hex>`.
/// Generated once at creation and kept across edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let salt: u64 = rand::random();
        Self(format!("{}-{:x}", millis, salt))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EmployeeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single-shift shape: one shift and an optional break inside it.
///
/// Invariants (enforced by validation, not by construction):
/// `shift_start < shift_end`, and when a break is present
/// `shift_start <= break_start < break_end <= shift_end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleShiftEmployee {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    pub color: String,
    pub shift_start: f64,
    pub shift_end: f64,
    pub break_start: Option<f64>,
    pub break_end: Option<f64>,
}

impl SingleShiftEmployee {
    pub fn break_range(&self) -> Option<(f64, f64)> {
        match (self.break_start, self.break_end) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }

    /// Shift length minus break length, in hours.
    pub fn work_hours(&self) -> f64 {
        let total = self.shift_end - self.shift_start;
        let pause = self.break_range().map(|(s, e)| e - s).unwrap_or(0.0);
        total - pause
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub role: String,
    pub shift_start: f64,
    pub shift_end: f64,
}

impl Shift {
    pub fn duration(&self) -> f64 {
        self.shift_end - self.shift_start
    }
}

/// Dual-shift shape: up to two independent shifts, at least one present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DualShiftEmployee {
    pub id: EmployeeId,
    pub name: String,
    pub shift1: Option<Shift>,
    pub shift2: Option<Shift>,
}

impl DualShiftEmployee {
    /// Present shifts, first shift first.
    pub fn shifts(&self) -> impl Iterator<Item = &Shift> {
        self.shift1.iter().chain(self.shift2.iter())
    }

    pub fn work_hours(&self) -> f64 {
        self.shifts().map(Shift::duration).sum()
    }

    pub fn roles(&self) -> Vec<&str> {
        self.shifts().map(|s| s.role.as_str()).collect()
    }
}
