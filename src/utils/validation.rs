//! Validation utilities

use bigdecimal::BigDecimal;

use crate::types::*;

/// Validate that an amount is positive
pub fn validate_positive_amount(amount: &BigDecimal) -> TrackerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(TrackerError::Validation(
            "Amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that an amount is not negative (budgets may be cleared with zero)
pub fn validate_non_negative_amount(amount: &BigDecimal) -> TrackerResult<()> {
    if *amount < BigDecimal::from(0) {
        Err(TrackerError::Validation(
            "Amount cannot be negative".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a category name is valid
pub fn validate_category_name(name: &str) -> TrackerResult<()> {
    if name.trim().is_empty() {
        return Err(TrackerError::Validation(
            "Category name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > 50 {
        return Err(TrackerError::Validation(
            "Category name cannot exceed 50 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a transaction note is valid
pub fn validate_note(note: &str) -> TrackerResult<()> {
    if note.chars().count() > 500 {
        return Err(TrackerError::Validation(
            "Transaction note cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a setting key
pub fn validate_setting_key(key: &str) -> TrackerResult<()> {
    if key.trim().is_empty() {
        return Err(TrackerError::Validation(
            "Setting key cannot be empty".to_string(),
        ));
    }

    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.') {
        return Err(TrackerError::Validation(
            "Setting key can only contain alphanumeric characters, dots, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}
