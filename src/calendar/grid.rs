//! Month grid aggregation
//!
//! A month is displayed as 6 weeks of 7 days starting on Sunday. Cells before
//! the first and after the last day of the month belong to the neighbouring
//! months but still carry their own totals.

use bigdecimal::BigDecimal;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::types::*;

/// Number of cells in a month grid (6 rows of 7 days)
pub const GRID_CELLS: usize = 42;

/// What kind of money movement happened on a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayActivity {
    None,
    IncomeOnly,
    ExpenseOnly,
    Mixed,
}

/// One day of the month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    /// Day of the month (1-31)
    pub day_number: u32,
    /// True for leading/trailing days of the adjacent months
    pub is_other_month: bool,
    /// Calendar date of the cell
    pub date: NaiveDate,
    /// Total income recorded on this date
    pub income: BigDecimal,
    /// Total expenses recorded on this date
    pub expense: BigDecimal,
}

impl DayCell {
    fn empty(date: NaiveDate, is_other_month: bool) -> Self {
        Self {
            day_number: date.day(),
            is_other_month,
            date,
            income: BigDecimal::from(0),
            expense: BigDecimal::from(0),
        }
    }

    /// Income minus expenses
    pub fn net(&self) -> BigDecimal {
        &self.income - &self.expense
    }

    pub fn activity(&self) -> DayActivity {
        let zero = BigDecimal::from(0);
        match (self.income > zero, self.expense > zero) {
            (true, true) => DayActivity::Mixed,
            (true, false) => DayActivity::IncomeOnly,
            (false, true) => DayActivity::ExpenseOnly,
            (false, false) => DayActivity::None,
        }
    }

    pub fn has_transactions(&self) -> bool {
        self.activity() != DayActivity::None
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Whether the day of month is one of the configured paydays
    pub fn is_payday(&self, payday_days: &[u32]) -> bool {
        payday_days.contains(&self.day_number)
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}

/// The 42-cell grid for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthGrid {
    month: CalendarMonth,
    leading_days: usize,
    cells: Vec<DayCell>,
}

impl MonthGrid {
    pub fn month(&self) -> CalendarMonth {
        self.month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    /// Number of cells taken by the previous month
    pub fn leading_days(&self) -> usize {
        self.leading_days
    }

    /// Number of cells taken by the next month
    pub fn trailing_days(&self) -> usize {
        self.cells.len() - self.leading_days - self.month.days_in_month() as usize
    }

    /// First date shown on the grid
    pub fn window_start(&self) -> NaiveDate {
        self.cells[0].date
    }

    /// Last date shown on the grid
    pub fn window_end(&self) -> NaiveDate {
        self.cells[self.cells.len() - 1].date
    }

    /// Rows of seven days, Sunday first
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    /// Cell for a date, if it is displayed
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        if date < self.window_start() || date > self.window_end() {
            return None;
        }
        let offset = (date - self.window_start()).num_days() as usize;
        self.cells.get(offset)
    }

    /// Income over every displayed cell
    pub fn total_income(&self) -> BigDecimal {
        self.cells.iter().map(|c| &c.income).sum()
    }

    /// Expenses over every displayed cell
    pub fn total_expense(&self) -> BigDecimal {
        self.cells.iter().map(|c| &c.expense).sum()
    }

    /// Income within the target month only
    pub fn month_income(&self) -> BigDecimal {
        self.cells
            .iter()
            .filter(|c| !c.is_other_month)
            .map(|c| &c.income)
            .sum()
    }

    /// Expenses within the target month only
    pub fn month_expense(&self) -> BigDecimal {
        self.cells
            .iter()
            .filter(|c| !c.is_other_month)
            .map(|c| &c.expense)
            .sum()
    }
}

/// First and last date displayed for a month
pub fn grid_window(month: CalendarMonth) -> (NaiveDate, NaiveDate) {
    let start = grid_start(month);
    let end = start
        .checked_add_days(Days::new(GRID_CELLS as u64 - 1))
        .unwrap_or(start);
    (start, end)
}

fn grid_start(month: CalendarMonth) -> NaiveDate {
    let first = month.first_day();
    let leading = first.weekday().num_days_from_sunday() as u64;
    first.checked_sub_days(Days::new(leading)).unwrap_or(first)
}

/// Build the grid for `year` and 0-based `month0`
///
/// A `month0` of 12 or more rolls into the following years. The resulting
/// year is clamped to `MIN_YEAR..=MAX_YEAR`, so out-of-range input yields the
/// nearest representable month; check [`MonthGrid::month`] when the input is
/// not trusted.
pub fn build_month_grid(year: i32, month0: u32, transactions: &[Transaction]) -> MonthGrid {
    build_grid(CalendarMonth::new(year, month0), transactions)
}

/// Build the grid for a month, summing each transaction into the cell of its date
pub fn build_grid(month: CalendarMonth, transactions: &[Transaction]) -> MonthGrid {
    let (start, end) = grid_window(month);
    let leading_days = month.first_day().weekday().num_days_from_sunday() as usize;

    let mut totals: HashMap<NaiveDate, (BigDecimal, BigDecimal)> = HashMap::new();
    let mut outside = 0usize;
    for txn in transactions {
        if txn.date < start || txn.date > end {
            outside += 1;
            continue;
        }
        let (income, expense) = totals
            .entry(txn.date)
            .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));
        match txn.kind {
            TransactionType::Income => *income += &txn.amount,
            TransactionType::Expense => *expense += &txn.amount,
        }
    }

    let cells: Vec<DayCell> = start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let mut cell = DayCell::empty(date, !month.contains(date));
            if let Some((income, expense)) = totals.remove(&date) {
                cell.income = income;
                cell.expense = expense;
            }
            cell
        })
        .collect();

    debug!(
        month = %month,
        leading_days,
        counted = transactions.len() - outside,
        outside,
        "Built month grid"
    );

    MonthGrid {
        month,
        leading_days,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(d: NaiveDate, kind: TransactionType, amount: &str) -> Transaction {
        Transaction::new(
            d,
            kind,
            BigDecimal::from_str(amount).unwrap(),
            "Test".to_string(),
            None,
        )
    }

    #[test]
    fn test_february_2024_layout() {
        let grid = build_month_grid(2024, 1, &[]);
        assert_eq!(grid.cells().len(), GRID_CELLS);
        assert_eq!(grid.leading_days(), 4);
        assert_eq!(grid.trailing_days(), 9);

        let numbers: Vec<u32> = grid.cells()[..4].iter().map(|c| c.day_number).collect();
        assert_eq!(numbers, vec![28, 29, 30, 31]);
        assert!(grid.cells()[..4].iter().all(|c| c.is_other_month));

        assert_eq!(grid.cells()[4].date, date(2024, 2, 1));
        assert_eq!(grid.cells()[32].date, date(2024, 2, 29));
        assert!(!grid.cells()[32].is_other_month);

        let trailing: Vec<u32> = grid.cells()[33..].iter().map(|c| c.day_number).collect();
        assert_eq!(trailing, (1..=9).collect::<Vec<u32>>());
        assert_eq!(grid.window_end(), date(2024, 3, 9));
    }

    #[test]
    fn test_every_month_has_42_cells() {
        for year in [1900, 2023, 2024, 2100] {
            for month0 in 0..12 {
                let grid = build_month_grid(year, month0, &[]);
                assert_eq!(grid.cells().len(), GRID_CELLS);
                let current = grid.cells().iter().filter(|c| !c.is_other_month).count();
                assert_eq!(current as u32, grid.month().days_in_month());
                assert!(grid.trailing_days() >= 4);
            }
        }
    }

    #[test]
    fn test_short_february_starting_on_sunday() {
        // February 2026 starts on a Sunday and has 28 days
        let grid = build_month_grid(2026, 1, &[]);
        assert_eq!(grid.leading_days(), 0);
        assert_eq!(grid.trailing_days(), 14);
        assert_eq!(grid.cells().len(), GRID_CELLS);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_leading_days() {
        // September 2024 starts on a Sunday
        let grid = build_month_grid(2024, 8, &[]);
        assert_eq!(grid.leading_days(), 0);
        assert_eq!(grid.window_start(), date(2024, 9, 1));
    }

    #[test]
    fn test_month_rollover() {
        let grid = build_month_grid(2023, 13, &[]);
        assert_eq!(grid.month(), CalendarMonth::new(2024, 1));
    }

    #[test]
    fn test_out_of_range_years_are_clamped() {
        let grid = build_month_grid(10_000, 0, &[]);
        assert_eq!(grid.month(), CalendarMonth::new(MAX_YEAR, 0));
        assert_eq!(grid.cells().len(), GRID_CELLS);

        let grid = build_month_grid(2024, u32::MAX, &[]);
        assert_eq!(grid.month().key(), "9999-04");

        let grid = build_month_grid(-5, 0, &[]);
        assert_eq!(grid.month(), CalendarMonth::new(MIN_YEAR, 0));
        assert_eq!(grid.cells().len(), GRID_CELLS);
    }

    #[test]
    fn test_totals_land_in_matching_cells() {
        let txns = vec![
            txn(date(2024, 2, 14), TransactionType::Expense, "120.50"),
            txn(date(2024, 2, 14), TransactionType::Expense, "30"),
            txn(date(2024, 2, 14), TransactionType::Income, "1000"),
            txn(date(2024, 1, 29), TransactionType::Income, "50"),
            txn(date(2024, 3, 9), TransactionType::Expense, "5"),
        ];
        let grid = build_month_grid(2024, 1, &txns);

        let valentine = grid.cell(date(2024, 2, 14)).unwrap();
        assert_eq!(valentine.expense, BigDecimal::from_str("150.50").unwrap());
        assert_eq!(valentine.income, BigDecimal::from(1000));
        assert_eq!(valentine.activity(), DayActivity::Mixed);

        let leading = grid.cell(date(2024, 1, 29)).unwrap();
        assert!(leading.is_other_month);
        assert_eq!(leading.activity(), DayActivity::IncomeOnly);

        let trailing = grid.cell(date(2024, 3, 9)).unwrap();
        assert_eq!(trailing.activity(), DayActivity::ExpenseOnly);

        assert_eq!(grid.total_income(), BigDecimal::from(1050));
        assert_eq!(grid.month_income(), BigDecimal::from(1000));
        assert_eq!(grid.month_expense(), BigDecimal::from_str("150.50").unwrap());
    }

    #[test]
    fn test_transactions_outside_window_are_ignored() {
        let txns = vec![
            txn(date(2024, 1, 20), TransactionType::Income, "999"),
            txn(date(2024, 3, 10), TransactionType::Expense, "999"),
            txn(date(2024, 2, 1), TransactionType::Income, "1"),
        ];
        let grid = build_month_grid(2024, 1, &txns);
        assert_eq!(grid.total_income(), BigDecimal::from(1));
        assert_eq!(grid.total_expense(), BigDecimal::from(0));
        assert!(grid.cell(date(2024, 1, 20)).is_none());
    }

    #[test]
    fn test_income_sum_matches_window_transactions() {
        let txns: Vec<Transaction> = (0..60)
            .map(|i| {
                let d = date(2024, 1, 1).checked_add_days(Days::new(i)).unwrap();
                let kind = if i % 3 == 0 {
                    TransactionType::Income
                } else {
                    TransactionType::Expense
                };
                txn(d, kind, &format!("{}.25", i + 1))
            })
            .collect();

        let grid = build_month_grid(2024, 1, &txns);
        let (start, end) = grid_window(grid.month());
        let expected: BigDecimal = txns
            .iter()
            .filter(|t| t.is_income() && t.date >= start && t.date <= end)
            .map(|t| &t.amount)
            .sum();
        assert_eq!(grid.total_income(), expected);
    }

    #[test]
    fn test_day_indicators() {
        let grid = build_month_grid(2024, 1, &[]);
        let first = grid.cell(date(2024, 2, 1)).unwrap();
        assert!(first.is_payday(&[1, 15]));
        assert!(!first.is_weekend());
        assert!(grid.cell(date(2024, 2, 3)).unwrap().is_weekend());
        assert!(first.is_today(date(2024, 2, 1)));
        assert!(!first.has_transactions());
        assert_eq!(grid.weeks().count(), 6);
    }
}
