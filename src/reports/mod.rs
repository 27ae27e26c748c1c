//! Reporting: period statistics, budget progress and grouped history

pub mod budget;
pub mod history;
pub mod statistics;

pub use budget::*;
pub use history::*;
pub use statistics::*;
