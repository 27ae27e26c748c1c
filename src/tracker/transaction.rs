//! Transaction recording and retrieval

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_positive_amount;

/// Transaction manager for handling transaction operations
pub struct TransactionManager<S: TrackerStorage> {
    pub(crate) storage: S,
    validator: Box<dyn TransactionValidator>,
}

impl<S: TrackerStorage> TransactionManager<S> {
    /// Create a new transaction manager
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultTransactionValidator),
        }
    }

    /// Create a new transaction manager with custom validator
    pub fn with_validator(storage: S, validator: Box<dyn TransactionValidator>) -> Self {
        Self { storage, validator }
    }

    /// Record a new transaction
    pub async fn record_transaction(
        &mut self,
        transaction: Transaction,
    ) -> TrackerResult<Transaction> {
        if let Err(err) = self.validator.validate_transaction(&transaction) {
            warn!(%err, category = %transaction.category, "rejected transaction");
            return Err(err);
        }
        self.storage.save_transaction(&transaction).await?;

        info!(
            id = %transaction.id,
            date = %transaction.date,
            kind = %transaction.kind,
            amount = %transaction.amount,
            category = %transaction.category,
            "recorded transaction"
        );
        Ok(transaction)
    }

    /// Run the configured validator without saving
    pub fn validate(&self, transaction: &Transaction) -> TrackerResult<()> {
        self.validator.validate_transaction(transaction)
    }

    /// Get a transaction by ID
    pub async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> TrackerResult<Option<Transaction>> {
        self.storage.get_transaction(transaction_id).await
    }

    /// Get a transaction by ID, returning an error if not found
    pub async fn get_transaction_required(
        &self,
        transaction_id: &str,
    ) -> TrackerResult<Transaction> {
        self.storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| TrackerError::TransactionNotFound(transaction_id.to_string()))
    }

    /// Replace a stored transaction in place; its creation time is preserved
    pub async fn update_transaction(&mut self, transaction: &Transaction) -> TrackerResult<()> {
        let existing = self.get_transaction_required(&transaction.id).await?;
        self.validator.validate_transaction(transaction)?;

        let mut updated = transaction.clone();
        updated.created_at = existing.created_at;
        self.storage.update_transaction(&updated).await?;

        info!(id = %updated.id, "updated transaction");
        Ok(())
    }

    /// Delete a transaction
    pub async fn delete_transaction(&mut self, transaction_id: &str) -> TrackerResult<()> {
        self.storage.delete_transaction(transaction_id).await?;
        info!(id = %transaction_id, "deleted transaction");
        Ok(())
    }

    /// Most recent transactions, newest first
    pub async fn recent_transactions(&self, limit: usize) -> TrackerResult<Vec<Transaction>> {
        self.storage.get_transactions(Some(limit)).await
    }

    /// Every stored transaction, newest first
    pub async fn all_transactions(&self) -> TrackerResult<Vec<Transaction>> {
        self.storage.get_transactions(None).await
    }

    /// Transactions dated `date`
    pub async fn transactions_on(&self, date: NaiveDate) -> TrackerResult<Vec<Transaction>> {
        self.storage.get_transactions_by_date(date).await
    }

    /// Transactions within `start..=end`
    pub async fn transactions_between(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> TrackerResult<Vec<Transaction>> {
        if start_date > end_date {
            return Err(TrackerError::Validation(format!(
                "Start date {} is after end date {}",
                start_date, end_date
            )));
        }
        let transactions = self
            .storage
            .get_transactions_by_date_range(start_date, end_date)
            .await?;
        debug!(%start_date, %end_date, count = transactions.len(), "loaded transactions");
        Ok(transactions)
    }
}

/// Transaction builder for assembling a transaction step by step
#[derive(Debug)]
pub struct TransactionBuilder {
    transaction: Transaction,
}

impl TransactionBuilder {
    /// Start an expense of `amount` on `date`
    pub fn expense(date: NaiveDate, amount: BigDecimal) -> Self {
        Self::new(date, TransactionType::Expense, amount)
    }

    /// Start an income of `amount` on `date`
    pub fn income(date: NaiveDate, amount: BigDecimal) -> Self {
        Self::new(date, TransactionType::Income, amount)
    }

    /// Start a transaction of the given kind
    pub fn new(date: NaiveDate, kind: TransactionType, amount: BigDecimal) -> Self {
        Self {
            transaction: Transaction::new(date, kind, amount, String::new(), None),
        }
    }

    /// Set the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.transaction.category = category.into();
        self
    }

    /// Set the note; blank notes are dropped
    pub fn note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.transaction.note = if note.trim().is_empty() {
            None
        } else {
            Some(note)
        };
        self
    }

    /// Build the transaction
    pub fn build(self) -> TrackerResult<Transaction> {
        validate_positive_amount(&self.transaction.amount)?;
        self.transaction.validate()?;
        Ok(self.transaction)
    }
}

/// Common transaction patterns
pub mod patterns {
    use super::*;

    /// One-tap entry from the calendar: fixed category and note from config
    pub fn quick_add(
        config: &TrackerConfig,
        date: NaiveDate,
        kind: TransactionType,
        amount: BigDecimal,
    ) -> TrackerResult<Transaction> {
        TransactionBuilder::new(date, kind, amount)
            .category(config.quick_add_category(kind))
            .note(config.quick_add_note.clone())
            .build()
    }
}
