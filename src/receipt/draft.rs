//! Transaction form draft filled from a scanned receipt

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Values carried from a receipt scan into a new expense
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDraft {
    /// The candidate amount the user picked
    pub amount: Option<BigDecimal>,
    /// Receipt date, when one was recognized and is a real day
    pub date: Option<NaiveDate>,
    /// Invoice number printed on the receipt
    pub invoice_number: Option<String>,
}

impl ReceiptDraft {
    /// Note text recording the invoice number, e.g. `發票: AB12345678`
    pub fn note(&self) -> Option<String> {
        self.invoice_number
            .as_ref()
            .map(|number| format!("發票: {}", number))
    }

    /// Turn the draft into an expense transaction.
    ///
    /// `fallback_date` is used when the receipt carried no usable date.
    pub fn into_transaction(
        self,
        category: String,
        fallback_date: NaiveDate,
    ) -> TrackerResult<Transaction> {
        let note = self.note();
        let amount = self.amount.ok_or(TrackerError::NoAmountRecognized)?;
        let date = self.date.unwrap_or(fallback_date);

        let transaction = Transaction::new(date, TransactionType::Expense, amount, category, note);
        transaction.validate()?;
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_without_amount_is_rejected() {
        let draft = ReceiptDraft::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let result = draft.into_transaction("Food".to_string(), today);
        assert!(matches!(result, Err(TrackerError::NoAmountRecognized)));
    }

    #[test]
    fn test_draft_uses_fallback_date() {
        let draft = ReceiptDraft {
            amount: Some(BigDecimal::from(120)),
            date: None,
            invoice_number: Some("AB12345678".to_string()),
        };
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let txn = draft.into_transaction("Food".to_string(), today).unwrap();
        assert_eq!(txn.date, today);
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.note.as_deref(), Some("發票: AB12345678"));
    }
}
