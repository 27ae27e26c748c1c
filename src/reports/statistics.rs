//! Income and expense statistics over a date range

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::sum_by_kind;
use crate::types::*;

/// Totals and per-category breakdowns for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatistics {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_income: BigDecimal,
    pub total_expenses: BigDecimal,
    pub income_by_category: BTreeMap<String, BigDecimal>,
    pub expenses_by_category: BTreeMap<String, BigDecimal>,
    pub transaction_count: usize,
}

impl PeriodStatistics {
    /// Compute statistics from the transactions inside `start..=end`
    pub fn from_transactions(
        start_date: NaiveDate,
        end_date: NaiveDate,
        transactions: &[Transaction],
    ) -> Self {
        let in_range: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| t.date >= start_date && t.date <= end_date)
            .collect();

        let (total_income, total_expenses) = sum_by_kind(in_range.iter().copied());

        let mut income_by_category = BTreeMap::new();
        let mut expenses_by_category = BTreeMap::new();
        for txn in &in_range {
            let breakdown = match txn.kind {
                TransactionType::Income => &mut income_by_category,
                TransactionType::Expense => &mut expenses_by_category,
            };
            *breakdown
                .entry(txn.category.clone())
                .or_insert_with(|| BigDecimal::from(0)) += &txn.amount;
        }

        Self {
            start_date,
            end_date,
            total_income,
            total_expenses,
            income_by_category,
            expenses_by_category,
            transaction_count: in_range.len(),
        }
    }

    /// Income minus expenses
    pub fn balance(&self) -> BigDecimal {
        &self.total_income - &self.total_expenses
    }

    /// Breakdown for one side of the ledger
    pub fn by_category(&self, kind: TransactionType) -> &BTreeMap<String, BigDecimal> {
        match kind {
            TransactionType::Income => &self.income_by_category,
            TransactionType::Expense => &self.expenses_by_category,
        }
    }

    /// Categories of `kind`, largest total first
    pub fn top_categories(&self, kind: TransactionType) -> Vec<(&str, &BigDecimal)> {
        let mut ranked: Vec<(&str, &BigDecimal)> = self
            .by_category(kind)
            .iter()
            .map(|(name, amount)| (name.as_str(), amount))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_statistics_totals_and_breakdown() {
        let transactions = vec![
            Transaction::income(date(1), dec("3000"), "Salary".to_string()),
            Transaction::expense(date(2), dec("120.50"), "Food".to_string()),
            Transaction::expense(date(3), dec("79.50"), "Food".to_string()),
            Transaction::expense(date(4), dec("500"), "Rent".to_string()),
            // Outside the range
            Transaction::expense(
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                dec("999"),
                "Food".to_string(),
            ),
        ];

        let stats = PeriodStatistics::from_transactions(date(1), date(31), &transactions);

        assert_eq!(stats.transaction_count, 4);
        assert_eq!(stats.total_income, dec("3000"));
        assert_eq!(stats.total_expenses, dec("700"));
        assert_eq!(stats.balance(), dec("2300"));
        assert_eq!(stats.expenses_by_category["Food"], dec("200"));
        assert_eq!(stats.expenses_by_category["Rent"], dec("500"));
        assert_eq!(stats.income_by_category.len(), 1);

        let top = stats.top_categories(TransactionType::Expense);
        assert_eq!(top[0].0, "Rent");
        assert_eq!(top[1].0, "Food");
    }

    #[test]
    fn test_empty_period() {
        let stats = PeriodStatistics::from_transactions(date(1), date(31), &[]);
        assert_eq!(stats.balance(), BigDecimal::from(0));
        assert!(stats.income_by_category.is_empty());
        assert!(stats.expenses_by_category.is_empty());
    }
}
