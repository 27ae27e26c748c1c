//! Core types and data structures for the expense tracker

use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of money flow for a transaction or category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (salary, bonus, refunds, ...)
    Income,
    /// Money going out
    Expense,
}

impl TransactionType {
    /// Default icon shown next to categories of this type
    pub fn default_icon(&self) -> &'static str {
        match self {
            TransactionType::Income => "💰",
            TransactionType::Expense => "💸",
        }
    }

    /// Sign prefix used when displaying an amount of this type
    pub fn sign(&self) -> &'static str {
        match self {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// A single recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: String,
    /// Calendar day the transaction belongs to
    pub date: NaiveDate,
    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount of the transaction, always positive
    pub amount: BigDecimal,
    /// Category name
    pub category: String,
    /// Optional free-form note (receipt invoice number, memo, ...)
    #[serde(default)]
    pub note: Option<String>,
    /// When the transaction was created
    pub created_at: NaiveDateTime,
}

impl Transaction {
    /// Create a new transaction with a freshly generated id
    pub fn new(
        date: NaiveDate,
        kind: TransactionType,
        amount: BigDecimal,
        category: String,
        note: Option<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            kind,
            amount,
            category,
            note,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Create an income transaction
    pub fn income(date: NaiveDate, amount: BigDecimal, category: String) -> Self {
        Self::new(date, TransactionType::Income, amount, category, None)
    }

    /// Create an expense transaction
    pub fn expense(date: NaiveDate, amount: BigDecimal, category: String) -> Self {
        Self::new(date, TransactionType::Expense, amount, category, None)
    }

    /// Attach a note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.amount <= BigDecimal::from(0) {
            return Err(TrackerError::InvalidTransaction(
                "Transaction amount must be positive".to_string(),
            ));
        }

        if self.category.trim().is_empty() {
            return Err(TrackerError::InvalidTransaction(
                "Transaction must have a category".to_string(),
            ));
        }

        Ok(())
    }
}

/// A user-visible transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier for the category
    pub id: String,
    /// Display name, unique per kind
    pub name: String,
    /// Whether the category applies to income or expenses
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Emoji icon
    pub icon: String,
}

impl Category {
    /// Create a category with the default icon for its kind
    pub fn new(name: String, kind: TransactionType) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            kind,
            icon: kind.default_icon().to_string(),
        }
    }

    /// Override the icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}

/// Earliest year a [`CalendarMonth`] can represent
pub const MIN_YEAR: i32 = 1;
/// Latest year a [`CalendarMonth`] can represent
pub const MAX_YEAR: i32 = 9999;

/// A calendar month, identified by year and 0-based month index
///
/// Serialized as a `YYYY-MM` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarMonth {
    year: i32,
    month0: u32,
}

impl CalendarMonth {
    /// Create a month from a year and a 0-based month index.
    ///
    /// Month indexes past 11 roll over into the following years. Years are
    /// clamped to four-digit calendar years.
    pub fn new(year: i32, month0: u32) -> Self {
        let year = year.saturating_add((month0 / 12) as i32);
        Self {
            year: year.clamp(MIN_YEAR, MAX_YEAR),
            month0: month0 % 12,
        }
    }

    /// The month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0())
    }

    /// Parse a `YYYY-MM` key
    pub fn parse(key: &str) -> TrackerResult<Self> {
        let (year, month) = key
            .trim()
            .split_once('-')
            .ok_or_else(|| TrackerError::Validation(format!("Invalid month key: {}", key)))?;

        let year: i32 = year
            .parse()
            .map_err(|_| TrackerError::Validation(format!("Invalid year in month key: {}", key)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| TrackerError::Validation(format!("Invalid month in month key: {}", key)))?;

        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(TrackerError::Validation(format!(
                "Month key out of range: {}",
                key
            )));
        }

        Ok(Self::new(year, month - 1))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-based month index (0 = January)
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// `YYYY-MM` key used for budgets and backups
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month0 + 1)
    }

    /// Header label shown above the calendar, e.g. `2024年3月`
    pub fn header_label(&self) -> String {
        format!("{}年{}月", self.year, self.month0 + 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        ymd(self.year, self.month0 + 1, 1)
    }

    pub fn last_day(&self) -> NaiveDate {
        ymd(self.year, self.month0 + 1, self.days_in_month())
    }

    /// Number of days in this month
    pub fn days_in_month(&self) -> u32 {
        if self.month0 == 11 {
            return 31;
        }
        ymd(self.year, self.month0 + 2, 1)
            .pred_opt()
            .map(|d| d.day())
            .unwrap_or(31)
    }

    /// Whether the date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// The following month; saturates at the last representable month
    pub fn next(&self) -> Self {
        if self.year == MAX_YEAR && self.month0 == 11 {
            return *self;
        }
        Self::new(self.year, self.month0 + 1)
    }

    /// The preceding month; saturates at the first representable month
    pub fn previous(&self) -> Self {
        if self.year == MIN_YEAR && self.month0 == 0 {
            return *self;
        }
        if self.month0 == 0 {
            Self::new(self.year - 1, 11)
        } else {
            Self::new(self.year, self.month0 - 1)
        }
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl TryFrom<String> for CalendarMonth {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarMonth> for String {
    fn from(month: CalendarMonth) -> Self {
        month.key()
    }
}

/// Build a date that is known to be valid.
///
/// Callers only pass days within the month of a clamped [`CalendarMonth`].
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Monthly spending budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Month the budget applies to
    pub month: CalendarMonth,
    /// Maximum planned spending for the month
    pub amount: BigDecimal,
    /// Optional savings target for the month
    #[serde(default)]
    pub savings_goal: Option<BigDecimal>,
}

impl Budget {
    /// Create a budget without a savings goal
    pub fn new(month: CalendarMonth, amount: BigDecimal) -> Self {
        Self {
            month,
            amount,
            savings_goal: None,
        }
    }
}

/// Errors that can occur in the tracker
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("No amount could be recognized on the receipt; enter it manually")]
    NoAmountRecognized,
    #[error("OCR error: {0}")]
    Ocr(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_month_rollover() {
        let month = CalendarMonth::new(2024, 13);
        assert_eq!(month.year(), 2025);
        assert_eq!(month.month0(), 1);
        assert_eq!(month.key(), "2025-02");
    }

    #[test]
    fn test_calendar_month_navigation() {
        let jan = CalendarMonth::new(2024, 0);
        assert_eq!(jan.previous().key(), "2023-12");
        assert_eq!(jan.next().key(), "2024-02");
        assert_eq!(CalendarMonth::new(2023, 11).next().key(), "2024-01");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(CalendarMonth::new(2024, 1).days_in_month(), 29);
        assert_eq!(CalendarMonth::new(2023, 1).days_in_month(), 28);
        assert_eq!(CalendarMonth::new(2024, 3).days_in_month(), 30);
        assert_eq!(CalendarMonth::new(2024, 11).days_in_month(), 31);
        assert_eq!(
            CalendarMonth::new(2024, 1).last_day(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_calendar_month_parse_and_serde() {
        let month = CalendarMonth::parse("2024-03").unwrap();
        assert_eq!(month, CalendarMonth::new(2024, 2));
        assert_eq!(month.header_label(), "2024年3月");
        assert!(CalendarMonth::parse("2024-13").is_err());
        assert!(CalendarMonth::parse("March").is_err());

        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: CalendarMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }

    #[test]
    fn test_transaction_validation() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert!(Transaction::expense(date, BigDecimal::from(100), "Food".to_string())
            .validate()
            .is_ok());
        assert!(Transaction::expense(date, BigDecimal::from(0), "Food".to_string())
            .validate()
            .is_err());
        assert!(Transaction::income(date, BigDecimal::from(10), "  ".to_string())
            .validate()
            .is_err());
    }

    #[test]
    fn test_transaction_type_serializes_lowercase() {
        let json = serde_json::to_string(&TransactionType::Income).unwrap();
        assert_eq!(json, "\"income\"");
    }
}
