//! Script parameters and the predefined reports built on them

mod parameters;
mod reports;

pub use parameters::{day_boundary, ParameterType, ScriptParameter, END_OF_DAY, START_OF_DAY};
pub use reports::{DateRange, Report};
