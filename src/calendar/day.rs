//! Per-day transaction details

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// The transactions of a single day with their totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
    pub total_income: BigDecimal,
    pub total_expense: BigDecimal,
}

impl DaySummary {
    /// Summarize the transactions dated `date`; others are dropped
    pub fn new(date: NaiveDate, transactions: Vec<Transaction>) -> Self {
        let transactions: Vec<Transaction> =
            transactions.into_iter().filter(|t| t.date == date).collect();
        let (total_income, total_expense) = sum_by_kind(&transactions);
        Self {
            date,
            transactions,
            total_income,
            total_expense,
        }
    }

    /// Income minus expenses
    pub fn net(&self) -> BigDecimal {
        &self.total_income - &self.total_expense
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Sum income and expense amounts separately
pub fn sum_by_kind<'a, I>(transactions: I) -> (BigDecimal, BigDecimal)
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = BigDecimal::from(0);
    let mut expense = BigDecimal::from(0);
    for txn in transactions {
        match txn.kind {
            TransactionType::Income => income += &txn.amount,
            TransactionType::Expense => expense += &txn.amount,
        }
    }
    (income, expense)
}
