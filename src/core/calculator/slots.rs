//! Business hours and the half-hour slot sequence the grid is drawn on.

use crate::errors::{AppError, AppResult};
use crate::utils::time::format_clock;
use serde::{Deserialize, Serialize};

pub const WORK_START: f64 = 10.0;
pub const WORK_END: f64 = 23.0;
pub const SLOT_STEP: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start: WORK_START,
            end: WORK_END,
            step: SLOT_STEP,
        }
    }
}

/// One half-open display slot `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub start: f64,
    pub end: f64,
}

impl Slot {
    pub fn label(&self) -> String {
        format_clock(self.start)
    }
}

impl BusinessHours {
    pub fn new(start: f64, end: f64, step: f64) -> AppResult<Self> {
        let hours = Self { start, end, step };
        hours.validate()?;
        Ok(hours)
    }

    /// Reject hours that cannot be cut into whole slots.
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=24.0).contains(&self.start) || !(0.0..=24.0).contains(&self.end) {
            return Err(AppError::Config(format!(
                "business hours must lie within 0..24 (got {}..{})",
                self.start, self.end
            )));
        }
        if self.start >= self.end {
            return Err(AppError::Config(format!(
                "business_start ({}) must be earlier than business_end ({})",
                self.start, self.end
            )));
        }
        if self.step <= 0.0 {
            return Err(AppError::Config(format!(
                "slot_step must be positive (got {})",
                self.step
            )));
        }
        let count = (self.end - self.start) / self.step;
        if (count - count.round()).abs() > 1e-9 {
            return Err(AppError::Config(format!(
                "slot_step {} does not divide {}..{} evenly",
                self.step, self.start, self.end
            )));
        }
        Ok(())
    }

    pub fn slot_count(&self) -> usize {
        ((self.end - self.start) / self.step).round() as usize
    }

    /// Slots from `start` up to (not including) `end`. Each call starts over.
    pub fn slots(&self) -> Slots {
        Slots {
            hours: *self,
            next: 0,
            count: self.slot_count(),
        }
    }

    pub fn contains(&self, start: f64, end: f64) -> bool {
        self.start <= start && end <= self.end
    }

    /// "10:00 ~ 23:00"
    pub fn label(&self) -> String {
        format!("{} ~ {}", format_clock(self.start), format_clock(self.end))
    }
}

#[derive(Debug, Clone)]
pub struct Slots {
    hours: BusinessHours,
    next: usize,
    count: usize,
}

impl Iterator for Slots {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if self.next >= self.count {
            return None;
        }
        let start = self.hours.start + self.next as f64 * self.hours.step;
        self.next += 1;
        Some(Slot {
            start,
            end: start + self.hours.step,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Slots {}
