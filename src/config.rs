//! Tracker configuration
//!
//! Every field has a default, so a partial JSON document (or none at all) is a
//! valid configuration.

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Acceptance windows for receipt amount candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionLimits {
    /// Labeled amounts must be strictly below this value (and above zero)
    #[serde(default = "default_labeled_max_exclusive")]
    pub labeled_max_exclusive: u64,
    /// Unlabeled numbers must be at least this value
    #[serde(default = "default_standalone_min")]
    pub standalone_min: u64,
    /// Unlabeled numbers must be strictly below this value
    #[serde(default = "default_standalone_max_exclusive")]
    pub standalone_max_exclusive: u64,
}

fn default_labeled_max_exclusive() -> u64 {
    1_000_000
}

fn default_standalone_min() -> u64 {
    10
}

fn default_standalone_max_exclusive() -> u64 {
    100_000
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            labeled_max_exclusive: default_labeled_max_exclusive(),
            standalone_min: default_standalone_min(),
            standalone_max_exclusive: default_standalone_max_exclusive(),
        }
    }
}

/// Configuration for the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Receipt amount acceptance windows
    #[serde(default)]
    pub extraction: ExtractionLimits,

    /// Number of transactions shown on the home screen
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Number of transactions shown in the full history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Days of the month flagged as paydays on the calendar
    #[serde(default = "default_payday_days")]
    pub payday_days: Vec<u32>,

    /// Category used by quick-add income entries
    #[serde(default = "default_quick_income_category")]
    pub quick_income_category: String,

    /// Category used by quick-add expense entries
    #[serde(default = "default_quick_expense_category")]
    pub quick_expense_category: String,

    /// Note attached to quick-add entries
    #[serde(default = "default_quick_add_note")]
    pub quick_add_note: String,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_recent_limit() -> usize {
    10
}

fn default_history_limit() -> usize {
    100
}

fn default_payday_days() -> Vec<u32> {
    vec![1, 15]
}

fn default_quick_income_category() -> String {
    "Other Income".to_string()
}

fn default_quick_expense_category() -> String {
    "Other Expense".to_string()
}

fn default_quick_add_note() -> String {
    "Quick add".to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            extraction: ExtractionLimits::default(),
            recent_limit: default_recent_limit(),
            history_limit: default_history_limit(),
            payday_days: default_payday_days(),
            quick_income_category: default_quick_income_category(),
            quick_expense_category: default_quick_expense_category(),
            quick_add_note: default_quick_add_note(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a JSON document
    pub fn from_json_str(json: &str) -> TrackerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configured values are consistent
    pub fn validate(&self) -> TrackerResult<()> {
        let limits = &self.extraction;
        if limits.standalone_min >= limits.standalone_max_exclusive {
            return Err(TrackerError::Validation(format!(
                "Standalone amount window is empty: [{}, {})",
                limits.standalone_min, limits.standalone_max_exclusive
            )));
        }

        if limits.labeled_max_exclusive == 0 {
            return Err(TrackerError::Validation(
                "Labeled amount upper bound must be positive".to_string(),
            ));
        }

        if let Some(day) = self.payday_days.iter().find(|d| !(1..=31).contains(*d)) {
            return Err(TrackerError::Validation(format!(
                "Payday {} is not a valid day of the month",
                day
            )));
        }

        Ok(())
    }

    /// Category used for quick-add entries of the given kind
    pub fn quick_add_category(&self, kind: TransactionType) -> &str {
        match kind {
            TransactionType::Income => &self.quick_income_category,
            TransactionType::Expense => &self.quick_expense_category,
        }
    }
}
