//! Pattern rules used to scan OCR text
//!
//! Each rule is a compiled pattern tagged with how its matches are accepted.
//! Rules are evaluated in the order they are listed.

use regex::Regex;
use std::sync::OnceLock;

/// Numeric literal with optional thousands separators and a two-digit fraction
const NUMBER: &str = r"([0-9,]+(?:\.[0-9]{2})?)";

/// Labels that introduce a total on Taiwanese and Western receipts
const AMOUNT_LABELS: [&str; 5] = ["金額", "總計", "合計", "(?i:total)", "(?i:amount)"];

/// Which acceptance window applies to an amount rule's matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountWindow {
    /// Currency-marked or labeled amounts: `0 < v < labeled_max_exclusive`
    Labeled,
    /// Bare numbers: `standalone_min <= v < standalone_max_exclusive`
    Standalone,
}

/// A single amount scanning rule
#[derive(Debug)]
pub struct AmountRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub window: AmountWindow,
}

/// How the captures of a date rule map onto a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `YYY/MM/DD`, Republic of China era year
    RocYearMonthDay,
    /// `YYYY/MM/DD`
    YearMonthDay,
    /// `MM/DD/YYYY`
    MonthDayYear,
}

/// A single date scanning rule
#[derive(Debug)]
pub struct DateRule {
    pub layout: DateLayout,
    pub pattern: Regex,
}

/// A single invoice number scanning rule
#[derive(Debug)]
pub struct InvoiceRule {
    pub name: &'static str,
    pub pattern: Regex,
}

/// Offset added to a ROC era year to get the Western year
pub const ROC_YEAR_OFFSET: u32 = 1911;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("receipt pattern must compile")
}

/// Amount rules in evaluation order
pub fn amount_rules() -> &'static [AmountRule] {
    static RULES: OnceLock<Vec<AmountRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let mut rules = vec![
            AmountRule {
                name: "nt_dollar",
                pattern: compile(&format!(r"(?i:NT)\$\s*{}", NUMBER)),
                window: AmountWindow::Labeled,
            },
            AmountRule {
                name: "dollar",
                pattern: compile(&format!(r"\$\s*{}", NUMBER)),
                window: AmountWindow::Labeled,
            },
            AmountRule {
                name: "yuan",
                pattern: compile(&format!(r"{}\s*元", NUMBER)),
                window: AmountWindow::Labeled,
            },
        ];

        rules.extend(AMOUNT_LABELS.iter().map(|label| AmountRule {
            name: "label",
            pattern: compile(&format!(r"{}[\s:：]*{}", label, NUMBER)),
            window: AmountWindow::Labeled,
        }));

        // ASCII word boundaries so that `350元` still counts as a bare number
        rules.push(AmountRule {
            name: "standalone",
            pattern: compile(r"(?-u:\b)([0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]{2})?)(?-u:\b)"),
            window: AmountWindow::Standalone,
        });

        rules
    })
}

/// Date-shaped runs whose digits must not be read as bare amounts
pub fn date_like_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"[0-9]{1,4}[/-][0-9]{1,2}[/-][0-9]{1,4}"))
}

/// Date rules in priority order
pub fn date_rules() -> &'static [DateRule] {
    static RULES: OnceLock<Vec<DateRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            DateRule {
                layout: DateLayout::RocYearMonthDay,
                pattern: compile(r"(?:^|[^0-9])([0-9]{3})[/-]([0-9]{1,2})[/-]([0-9]{1,2})"),
            },
            DateRule {
                layout: DateLayout::YearMonthDay,
                pattern: compile(r"(?:^|[^0-9])([0-9]{4})[/-]([0-9]{1,2})[/-]([0-9]{1,2})"),
            },
            DateRule {
                layout: DateLayout::MonthDayYear,
                pattern: compile(r"(?:^|[^0-9])([0-9]{1,2})[/-]([0-9]{1,2})[/-]([0-9]{4})"),
            },
        ]
    })
}

/// Invoice number rules in priority order
pub fn invoice_rules() -> &'static [InvoiceRule] {
    static RULES: OnceLock<Vec<InvoiceRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            InvoiceRule {
                name: "track_number",
                pattern: compile(r"([A-Za-z]{2})[-\s]?([0-9]{8})"),
            },
            InvoiceRule {
                name: "labeled_track_number",
                pattern: compile(r"發票號碼[\s:：]*([A-Za-z]{2})[-\s]?([0-9]{8})"),
            },
            InvoiceRule {
                name: "invoice_label",
                pattern: compile(r"(?i:invoice)[\s#:：]*([A-Za-z0-9-]*[0-9][A-Za-z0-9-]*)"),
            },
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_compile_in_order() {
        let names: Vec<&str> = amount_rules().iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"nt_dollar"));
        assert_eq!(names.last(), Some(&"standalone"));
        assert_eq!(amount_rules().len(), 9);

        assert_eq!(date_rules()[0].layout, DateLayout::RocYearMonthDay);
        assert_eq!(invoice_rules().len(), 3);
    }

    #[test]
    fn test_standalone_boundaries() {
        let standalone = &amount_rules()[8];
        let found: Vec<&str> = standalone
            .pattern
            .captures_iter("350元 x1234 1,200 AB12345678")
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect();
        assert_eq!(found, vec!["350", "1,200"]);
    }

    #[test]
    fn test_roc_rule_ignores_four_digit_years() {
        let roc = &date_rules()[0];
        assert!(roc.pattern.is_match("113/01/11"));
        assert!(!roc.pattern.is_match("2024-01-15"));
    }
}
