//! Monthly budget progress

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Spending measured against a month's budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetProgress {
    pub month: CalendarMonth,
    pub budget: BigDecimal,
    pub spent: BigDecimal,
    pub savings_goal: Option<BigDecimal>,
}

impl BudgetProgress {
    /// Progress for `budget` given the month's expenses.
    ///
    /// Returns `None` unless the budget amount is positive.
    pub fn new(budget: &Budget, spent: BigDecimal) -> Option<Self> {
        if budget.amount <= BigDecimal::from(0) {
            return None;
        }
        Some(Self {
            month: budget.month,
            budget: budget.amount.clone(),
            spent,
            savings_goal: budget.savings_goal.clone(),
        })
    }

    /// Budget left; negative once overspent
    pub fn remaining(&self) -> BigDecimal {
        &self.budget - &self.spent
    }

    /// Spent as a percentage of the budget, rounded to two decimals
    pub fn percentage(&self) -> BigDecimal {
        (&self.spent * BigDecimal::from(100) / &self.budget).round(2)
    }

    /// Percentage capped at 100 for a progress bar
    pub fn fill_percentage(&self) -> BigDecimal {
        let hundred = BigDecimal::from(100);
        let percentage = self.percentage();
        if percentage > hundred {
            hundred
        } else {
            percentage
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }

    /// Amount spent beyond the budget, zero when within it
    pub fn overspent(&self) -> BigDecimal {
        if self.is_over_budget() {
            &self.spent - &self.budget
        } else {
            BigDecimal::from(0)
        }
    }
}
