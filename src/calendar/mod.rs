//! Calendar views: the month grid and per-day details

pub mod day;
pub mod grid;

pub use day::*;
pub use grid::*;
