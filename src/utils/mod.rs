pub mod colors;
pub mod formatting;
pub mod path;
pub mod table;
pub mod time;

pub use formatting::format_work_duration;
pub use time::{format_clock, parse_clock};
