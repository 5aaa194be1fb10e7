pub mod add;
pub mod calculator;
pub mod config;
pub mod del;
pub mod import;
pub mod log;
pub mod logic;
pub mod registry;
pub mod roster;
pub mod share;
pub mod validation;
