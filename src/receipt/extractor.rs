//! Receipt data extraction from raw OCR text

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use regex::Captures;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::str::FromStr;
use tracing::debug;

use crate::config::ExtractionLimits;
use crate::receipt::draft::ReceiptDraft;
use crate::receipt::rules::*;

/// Everything recovered from one receipt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedReceiptData {
    /// Candidate totals, distinct values, largest first
    pub amounts: Vec<BigDecimal>,
    /// First date found, normalized to `YYYY-MM-DD`
    pub date: Option<String>,
    /// First invoice number found, letters uppercased
    pub invoice_number: Option<String>,
}

impl ExtractedReceiptData {
    /// An empty candidate list means the amount has to be typed in by hand
    pub fn requires_manual_entry(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Largest candidate, the likeliest receipt total
    pub fn best_amount(&self) -> Option<&BigDecimal> {
        self.amounts.first()
    }

    /// The extracted date as a calendar date, if it names a real day
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Build a form draft using the candidate at `selected` (0 = largest)
    pub fn draft(&self, selected: usize) -> ReceiptDraft {
        ReceiptDraft {
            amount: self.amounts.get(selected).cloned(),
            date: self.parsed_date(),
            invoice_number: self.invoice_number.clone(),
        }
    }
}

/// Extracts amounts, a date and an invoice number from receipt text
#[derive(Debug, Clone, Default)]
pub struct ReceiptDataExtractor {
    limits: ExtractionLimits,
}

impl ReceiptDataExtractor {
    /// Create an extractor with custom acceptance windows
    pub fn new(limits: ExtractionLimits) -> Self {
        Self { limits }
    }

    /// Scan `text`. Never fails; missing data is left empty.
    pub fn extract(&self, text: &str) -> ExtractedReceiptData {
        let data = ExtractedReceiptData {
            amounts: self.extract_amounts(text),
            date: extract_date(text),
            invoice_number: extract_invoice_number(text),
        };

        debug!(
            candidates = data.amounts.len(),
            date = ?data.date,
            invoice = ?data.invoice_number,
            "Extracted receipt data"
        );

        data
    }

    /// All accepted amount candidates, deduplicated and sorted descending
    pub fn extract_amounts(&self, text: &str) -> Vec<BigDecimal> {
        let date_spans: Vec<Range<usize>> = date_like_pattern()
            .find_iter(text)
            .map(|m| m.range())
            .collect();

        let mut amounts = Vec::new();
        for rule in amount_rules() {
            for caps in rule.pattern.captures_iter(text) {
                let Some(number) = caps.get(1) else {
                    continue;
                };

                if rule.window == AmountWindow::Standalone
                    && date_spans.iter().any(|span| overlaps(span, &number.range()))
                {
                    continue;
                }

                let Some(value) = parse_amount(number.as_str()) else {
                    continue;
                };

                if self.accepts(rule.window, &value) {
                    amounts.push(value);
                } else {
                    debug!(rule = rule.name, value = %value, "Amount outside accepted window");
                }
            }
        }

        amounts.sort_by(|a, b| b.cmp(a));
        amounts.dedup();
        amounts
    }

    fn accepts(&self, window: AmountWindow, value: &BigDecimal) -> bool {
        match window {
            AmountWindow::Labeled => {
                *value > BigDecimal::from(0)
                    && *value < BigDecimal::from(self.limits.labeled_max_exclusive)
            }
            AmountWindow::Standalone => {
                *value >= BigDecimal::from(self.limits.standalone_min)
                    && *value < BigDecimal::from(self.limits.standalone_max_exclusive)
            }
        }
    }
}

/// Extract with the default acceptance windows
pub fn extract_receipt_data(text: &str) -> ExtractedReceiptData {
    ReceiptDataExtractor::default().extract(text)
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Parse a numeric literal such as `1,234.50`
fn parse_amount(literal: &str) -> Option<BigDecimal> {
    let cleaned: String = literal.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    BigDecimal::from_str(&cleaned).ok()
}

/// First date in priority order, normalized to `YYYY-MM-DD`
pub fn extract_date(text: &str) -> Option<String> {
    date_rules().iter().find_map(|rule| {
        let caps = rule.pattern.captures(text)?;
        normalize_date(rule.layout, &caps)
    })
}

fn normalize_date(layout: DateLayout, caps: &Captures<'_>) -> Option<String> {
    let part = |i: usize| caps.get(i).map(|m| m.as_str());

    let (year, month, day) = match layout {
        DateLayout::RocYearMonthDay => {
            let roc_year: u32 = part(1)?.parse().ok()?;
            ((roc_year + ROC_YEAR_OFFSET).to_string(), part(2)?, part(3)?)
        }
        DateLayout::YearMonthDay => (part(1)?.to_string(), part(2)?, part(3)?),
        DateLayout::MonthDayYear => (part(3)?.to_string(), part(1)?, part(2)?),
    };

    Some(format!("{}-{:0>2}-{:0>2}", year, month, day))
}

/// First invoice number in priority order
pub fn extract_invoice_number(text: &str) -> Option<String> {
    invoice_rules().iter().find_map(|rule| {
        let caps = rule.pattern.captures(text)?;
        let mut number = caps.get(1)?.as_str().to_uppercase();
        if let Some(digits) = caps.get(2) {
            number.push_str(digits.as_str());
        }
        debug!(rule = rule.name, %number, "Matched invoice number");
        Some(number)
    })
}
