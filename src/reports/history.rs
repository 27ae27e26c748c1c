//! Transaction history grouped by day

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calendar::sum_by_kind;
use crate::types::*;
use crate::utils::format::relative_day_label;

/// Transactions of one day as shown in the history list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    /// `今天`, `昨天`, or `M月D日 週X`
    pub label: String,
    pub daily_income: BigDecimal,
    pub daily_expense: BigDecimal,
    pub transactions: Vec<Transaction>,
}

/// Group transactions by date, newest day first.
///
/// Order inside a group follows the input order.
pub fn group_by_date(transactions: Vec<Transaction>, today: NaiveDate) -> Vec<DateGroup> {
    let mut by_date: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for txn in transactions {
        by_date.entry(txn.date).or_default().push(txn);
    }

    by_date
        .into_iter()
        .rev()
        .map(|(date, transactions)| {
            let (daily_income, daily_expense) = sum_by_kind(&transactions);
            DateGroup {
                date,
                label: relative_day_label(date, today),
                daily_income,
                daily_expense,
                transactions,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_groups_newest_first_with_labels() {
        let transactions = vec![
            Transaction::expense(date(5), BigDecimal::from(30), "Food".to_string()),
            Transaction::expense(date(10), BigDecimal::from(20), "Food".to_string()),
            Transaction::income(date(10), BigDecimal::from(100), "Salary".to_string()),
            Transaction::expense(date(9), BigDecimal::from(5), "Transport".to_string()),
        ];

        let groups = group_by_date(transactions, date(10));

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].date, date(10));
        assert_eq!(groups[0].label, "今天");
        assert_eq!(groups[0].daily_income, BigDecimal::from(100));
        assert_eq!(groups[0].daily_expense, BigDecimal::from(20));
        assert_eq!(groups[1].label, "昨天");
        assert_eq!(groups[2].label, "1月5日 週五");
    }

    #[test]
    fn test_empty_history() {
        assert!(group_by_date(Vec::new(), date(1)).is_empty());
    }
}
