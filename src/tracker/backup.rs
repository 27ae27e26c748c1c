//! Full data export and import

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::*;

/// Current backup format version
pub const BACKUP_VERSION: u32 = 1;

/// Everything the tracker stores, as written to a backup file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerBackup {
    #[serde(default = "default_version")]
    pub version: u32,
    pub exported_at: NaiveDateTime,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

fn default_version() -> u32 {
    BACKUP_VERSION
}

impl TrackerBackup {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> TrackerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a backup, rejecting versions newer than this build understands
    pub fn from_json(json: &str) -> TrackerResult<Self> {
        let backup: Self = serde_json::from_str(json)?;
        if backup.version > BACKUP_VERSION {
            return Err(TrackerError::Serialization(format!(
                "Unsupported backup version {}",
                backup.version
            )));
        }
        Ok(backup)
    }

    /// Default file name, e.g. `expense-tracker-backup-2024-01-15.json`
    pub fn file_name(&self) -> String {
        format!(
            "expense-tracker-backup-{}.json",
            self.exported_at.date().format("%Y-%m-%d")
        )
    }
}

/// Counts of records written by an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub transactions: usize,
    pub categories: usize,
    pub budgets: usize,
    pub settings: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_backup_parses_with_defaults() {
        let backup =
            TrackerBackup::from_json(r#"{"exported_at": "2024-01-15T10:30:00"}"#).unwrap();
        assert_eq!(backup.version, BACKUP_VERSION);
        assert!(backup.transactions.is_empty());
        assert_eq!(backup.file_name(), "expense-tracker-backup-2024-01-15.json");
    }

    #[test]
    fn test_future_version_rejected() {
        let result =
            TrackerBackup::from_json(r#"{"version": 99, "exported_at": "2024-01-15T10:30:00"}"#);
        assert!(matches!(result, Err(TrackerError::Serialization(_))));
    }

    #[test]
    fn test_keys_match_config_naming() {
        let backup =
            TrackerBackup::from_json(r#"{"exported_at": "2024-01-15T10:30:00"}"#).unwrap();
        let json = backup.to_json().unwrap();
        assert!(json.contains("\"exported_at\""));
        assert!(!json.contains("exportedAt"));

        // Camel-cased keys are not recognized
        assert!(TrackerBackup::from_json(r#"{"exportedAt": "2024-01-15T10:30:00"}"#).is_err());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(TrackerBackup::from_json("not json").is_err());
    }
}
