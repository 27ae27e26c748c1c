//! Display formatting for amounts and dates

use bigdecimal::{BigDecimal, RoundingMode, Signed, ToPrimitive};
use chrono::{Datelike, NaiveDate, Weekday};

/// Format an amount as currency with thousands separators, e.g. `$1,234.50`
///
/// Amounts are rounded half-up to cents. Negative amounts are rendered as
/// `-$12.00`.
pub fn format_currency(amount: &BigDecimal, symbol: &str) -> String {
    let cents = (amount.abs() * BigDecimal::from(100)).with_scale_round(0, RoundingMode::HalfUp);
    let sign = if amount.is_negative() && cents != BigDecimal::from(0) {
        "-"
    } else {
        ""
    };

    match cents.to_u128() {
        Some(cents) => format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(cents / 100),
            cents % 100
        ),
        None => format!("{}{}{}", sign, symbol, amount.abs()),
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Signed amount for list display, e.g. `+$50.00` or `-$12.00`
pub fn format_signed(amount: &BigDecimal, sign: &str, symbol: &str) -> String {
    format!("{}{}", sign, format_currency(&amount.abs(), symbol))
}

/// Short Chinese weekday name (`週日` .. `週六`)
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "週日",
        Weekday::Mon => "週一",
        Weekday::Tue => "週二",
        Weekday::Wed => "週三",
        Weekday::Thu => "週四",
        Weekday::Fri => "週五",
        Weekday::Sat => "週六",
    }
}

/// Heading for a group of transactions: `今天`, `昨天`, or `M月D日 週X`
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "今天".to_string()
    } else if today.pred_opt() == Some(date) {
        "昨天".to_string()
    } else {
        format!(
            "{}月{}日 {}",
            date.month(),
            date.day(),
            weekday_label(date.weekday())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_currency() {
        let symbol = "$";
        assert_eq!(format_currency(&BigDecimal::from(0), symbol), "$0.00");
        assert_eq!(format_currency(&BigDecimal::from(350), symbol), "$350.00");
        assert_eq!(
            format_currency(&BigDecimal::from_str("1234.5").unwrap(), symbol),
            "$1,234.50"
        );
        assert_eq!(
            format_currency(&BigDecimal::from_str("1234567.005").unwrap(), symbol),
            "$1,234,567.01"
        );
        assert_eq!(
            format_currency(&BigDecimal::from_str("-12").unwrap(), "NT$"),
            "-NT$12.00"
        );
    }

    #[test]
    fn test_format_signed() {
        assert_eq!(
            format_signed(&BigDecimal::from(50), "+", "$"),
            "+$50.00"
        );
        assert_eq!(
            format_signed(&BigDecimal::from(12), "-", "$"),
            "-$12.00"
        );
    }

    #[test]
    fn test_relative_day_label() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(relative_day_label(today, today), "今天");
        assert_eq!(
            relative_day_label(NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(), today),
            "昨天"
        );
        // 2024-01-05 was a Friday
        assert_eq!(
            relative_day_label(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), today),
            "1月5日 週五"
        );
    }
}
