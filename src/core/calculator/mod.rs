pub mod grid;
pub mod overlap;
pub mod slots;
