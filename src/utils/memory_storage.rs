//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
    categories: Arc<RwLock<HashMap<String, Category>>>,
    budgets: Arc<RwLock<HashMap<CalendarMonth, Budget>>>,
    settings: Arc<RwLock<HashMap<String, String>>>,
}

fn read<T>(lock: &RwLock<T>) -> TrackerResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| TrackerError::Storage("storage lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> TrackerResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| TrackerError::Storage("storage lock poisoned".to_string()))
}

/// Newest date first; ties broken by creation time, newest first
fn sort_recent_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) -> TrackerResult<()> {
        write(&self.transactions)?.clear();
        write(&self.categories)?.clear();
        write(&self.budgets)?.clear();
        write(&self.settings)?.clear();
        Ok(())
    }

    fn filter_transactions<F>(&self, predicate: F) -> TrackerResult<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut filtered: Vec<Transaction> = read(&self.transactions)?
            .values()
            .filter(|txn| predicate(txn))
            .cloned()
            .collect();
        sort_recent_first(&mut filtered);
        Ok(filtered)
    }
}

#[async_trait]
impl TrackerStorage for MemoryStorage {
    async fn save_transaction(&mut self, transaction: &Transaction) -> TrackerResult<()> {
        write(&self.transactions)?.insert(transaction.id.clone(), transaction.clone());
        Ok(())
    }

    async fn get_transaction(&self, transaction_id: &str) -> TrackerResult<Option<Transaction>> {
        Ok(read(&self.transactions)?.get(transaction_id).cloned())
    }

    async fn update_transaction(&mut self, transaction: &Transaction) -> TrackerResult<()> {
        let mut transactions = write(&self.transactions)?;
        match transactions.get_mut(&transaction.id) {
            Some(existing) => {
                *existing = transaction.clone();
                Ok(())
            }
            None => Err(TrackerError::TransactionNotFound(transaction.id.clone())),
        }
    }

    async fn delete_transaction(&mut self, transaction_id: &str) -> TrackerResult<()> {
        if write(&self.transactions)?.remove(transaction_id).is_some() {
            Ok(())
        } else {
            Err(TrackerError::TransactionNotFound(transaction_id.to_string()))
        }
    }

    async fn get_transactions(&self, limit: Option<usize>) -> TrackerResult<Vec<Transaction>> {
        let mut transactions = self.filter_transactions(|_| true)?;
        if let Some(limit) = limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    async fn get_transactions_by_date(&self, date: NaiveDate) -> TrackerResult<Vec<Transaction>> {
        self.filter_transactions(|txn| txn.date == date)
    }

    async fn get_transactions_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> TrackerResult<Vec<Transaction>> {
        self.filter_transactions(|txn| txn.date >= start_date && txn.date <= end_date)
    }

    async fn save_category(&mut self, category: &Category) -> TrackerResult<()> {
        write(&self.categories)?.insert(category.id.clone(), category.clone());
        Ok(())
    }

    async fn list_categories(&self, kind: Option<TransactionType>) -> TrackerResult<Vec<Category>> {
        let mut categories: Vec<Category> = read(&self.categories)?
            .values()
            .filter(|category| kind.is_none_or(|k| category.kind == k))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        Ok(categories)
    }

    async fn delete_category(&mut self, category_id: &str) -> TrackerResult<()> {
        if write(&self.categories)?.remove(category_id).is_some() {
            Ok(())
        } else {
            Err(TrackerError::CategoryNotFound(category_id.to_string()))
        }
    }

    async fn get_budget(&self, month: CalendarMonth) -> TrackerResult<Option<Budget>> {
        Ok(read(&self.budgets)?.get(&month).cloned())
    }

    async fn set_budget(&mut self, budget: &Budget) -> TrackerResult<()> {
        write(&self.budgets)?.insert(budget.month, budget.clone());
        Ok(())
    }

    async fn list_budgets(&self) -> TrackerResult<Vec<Budget>> {
        let mut budgets: Vec<Budget> = read(&self.budgets)?.values().cloned().collect();
        budgets.sort_by_key(|budget| budget.month);
        Ok(budgets)
    }

    async fn get_setting(&self, key: &str) -> TrackerResult<Option<String>> {
        Ok(read(&self.settings)?.get(key).cloned())
    }

    async fn set_setting(&mut self, key: &str, value: &str) -> TrackerResult<()> {
        write(&self.settings)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn list_settings(&self) -> TrackerResult<HashMap<String, String>> {
        Ok(read(&self.settings)?.clone())
    }
}
