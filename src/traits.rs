//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

use crate::types::*;
use crate::utils::validation::{validate_category_name, validate_note};

/// Storage abstraction for the tracker
///
/// The tracker never owns persistence: any backend (IndexedDB bridge, SQLite,
/// a REST service, in-memory, ...) can be plugged in by implementing these
/// methods.
#[async_trait]
pub trait TrackerStorage: Send + Sync {
    /// Save a new transaction
    async fn save_transaction(&mut self, transaction: &Transaction) -> TrackerResult<()>;

    /// Get a transaction by ID
    async fn get_transaction(&self, transaction_id: &str) -> TrackerResult<Option<Transaction>>;

    /// Replace an existing transaction
    async fn update_transaction(&mut self, transaction: &Transaction) -> TrackerResult<()>;

    /// Delete a transaction
    async fn delete_transaction(&mut self, transaction_id: &str) -> TrackerResult<()>;

    /// List transactions, most recent first, optionally capped at `limit`
    async fn get_transactions(&self, limit: Option<usize>) -> TrackerResult<Vec<Transaction>>;

    /// List the transactions recorded on a single day
    async fn get_transactions_by_date(&self, date: NaiveDate) -> TrackerResult<Vec<Transaction>>;

    /// List transactions between two dates, both inclusive
    async fn get_transactions_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> TrackerResult<Vec<Transaction>>;

    /// Save or replace a category
    async fn save_category(&mut self, category: &Category) -> TrackerResult<()>;

    /// List categories, optionally filtered by kind
    async fn list_categories(&self, kind: Option<TransactionType>) -> TrackerResult<Vec<Category>>;

    /// Delete a category
    async fn delete_category(&mut self, category_id: &str) -> TrackerResult<()>;

    /// Get the budget for a month
    async fn get_budget(&self, month: CalendarMonth) -> TrackerResult<Option<Budget>>;

    /// Save or replace the budget for its month
    async fn set_budget(&mut self, budget: &Budget) -> TrackerResult<()>;

    /// List all stored budgets
    async fn list_budgets(&self) -> TrackerResult<Vec<Budget>>;

    /// Get a setting value
    async fn get_setting(&self, key: &str) -> TrackerResult<Option<String>>;

    /// Store a setting value
    async fn set_setting(&mut self, key: &str, value: &str) -> TrackerResult<()>;

    /// All settings
    async fn list_settings(&self) -> TrackerResult<HashMap<String, String>>;
}

/// External text recognizer used for receipt scanning
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize the text printed on a receipt image
    async fn recognize(&self, image: &[u8]) -> TrackerResult<String>;
}

/// Trait for implementing custom transaction validation rules
pub trait TransactionValidator: Send + Sync {
    /// Validate a transaction before saving
    fn validate_transaction(&self, transaction: &Transaction) -> TrackerResult<()>;
}

/// Trait for implementing custom category validation rules
pub trait CategoryValidator: Send + Sync {
    /// Validate a category before saving
    fn validate_category(&self, category: &Category) -> TrackerResult<()>;
}

/// Default transaction validator
pub struct DefaultTransactionValidator;

impl TransactionValidator for DefaultTransactionValidator {
    fn validate_transaction(&self, transaction: &Transaction) -> TrackerResult<()> {
        transaction.validate()?;
        if let Some(note) = &transaction.note {
            validate_note(note)?;
        }
        Ok(())
    }
}

/// Default category validator
pub struct DefaultCategoryValidator;

impl CategoryValidator for DefaultCategoryValidator {
    fn validate_category(&self, category: &Category) -> TrackerResult<()> {
        validate_category_name(&category.name)
    }
}
