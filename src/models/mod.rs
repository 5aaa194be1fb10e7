pub mod employee;
pub mod variant;

pub use employee::{DualShiftEmployee, EmployeeId, Shift, SingleShiftEmployee};
pub use variant::Variant;
