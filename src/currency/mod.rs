//! Display formatting for monetary amounts.

/// Symbol used when no preference is configured (Ghana cedi).
pub const DEFAULT_SYMBOL: &str = "₵";

const DECIMAL_SEPARATOR: char = '.';
const GROUPING_SEPARATOR: char = ',';

/// Formats an amount with two decimals and thousands grouping, e.g. `₵1,250.00`.
pub fn format_currency_value(amount: f64, symbol: &str) -> String {
    let body = format_number(amount.abs(), 2);
    if amount < 0.0 {
        format!("-{}{}", symbol, body)
    } else {
        format!("{}{}", symbol, body)
    }
}

/// Groups the integer part of a non-negative value and keeps `precision` decimals.
pub fn format_number(value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, value);
    match body.find(DECIMAL_SEPARATOR) {
        Some(pos) => format!("{}{}", group_digits(&body[..pos]), &body[pos..]),
        None => group_digits(&body),
    }
}

/// Shortest round-trip rendering without grouping (`500`, `12.5`), as used in exports.
pub fn format_plain(value: f64) -> String {
    value.to_string()
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, GROUPING_SEPARATOR);
        }
        grouped.insert(0, ch);
    }
    grouped
}
