//! Tracker module containing transaction, category and backup management

pub mod backup;
pub mod category;
pub mod core;
pub mod transaction;

pub use backup::*;
pub use category::CategoryManager;
pub use self::core::*;
pub use transaction::*;
