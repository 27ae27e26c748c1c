//! # Expense Tracker Core
//!
//! Personal income and expense bookkeeping with receipt text extraction,
//! a month calendar view, and budget reporting.
//!
//! ## Features
//!
//! - **Receipt extraction**: Candidate totals, a normalized date and an invoice
//!   number pulled from noisy OCR text (Taiwanese receipts, ROC years included)
//! - **Calendar aggregation**: Six-week month grids with per-day income and expense
//! - **Reporting**: Period statistics, category breakdowns, budget progress and
//!   grouped history
//! - **Backup**: JSON export and import of everything stored
//! - **Storage abstraction**: Database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use expense_tracker_core::{build_month_grid, extract_receipt_data};
//! use bigdecimal::BigDecimal;
//!
//! let data = extract_receipt_data("總計: 350元\n2024-01-15");
//! assert_eq!(data.amounts, vec![BigDecimal::from(350)]);
//! assert_eq!(data.date.as_deref(), Some("2024-01-15"));
//!
//! let grid = build_month_grid(2024, 1, &[]);
//! assert_eq!(grid.cells().len(), 42);
//! ```

pub mod calendar;
pub mod config;
pub mod receipt;
pub mod reports;
pub mod tracker;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use calendar::*;
pub use config::*;
pub use receipt::*;
pub use reports::*;
pub use tracker::{
    CategoryManager, ImportSummary, Tracker, TrackerBackup, TransactionBuilder,
    TransactionManager, BACKUP_VERSION,
};
pub use traits::*;
pub use types::*;
pub use utils::format::*;
pub use utils::memory_storage::MemoryStorage;

// Re-export transaction patterns for convenience
pub use tracker::transaction::patterns;
