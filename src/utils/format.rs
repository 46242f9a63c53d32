//! Formatting utilities for salaries, dates, and other display values.

use chrono::NaiveDate;

use crate::config::CURRENCY_SYMBOL;

/// Format an amount with thousands separators and two decimals
/// (e.g., "$52,500.00").
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    format!(
        "{}{}{}.{:02}",
        sign,
        CURRENCY_SYMBOL,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Format an integer with thousands separators (e.g., "12,345").
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a date for display (e.g., "Jan 15, 2023").
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format a percentage with one decimal (e.g., "37.5%").
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Turn a backend enum name into a label (e.g., "FRONT_DESK" -> "Front Desk").
pub fn humanize(value: &str) -> String {
    value
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Avatar initials from a first and last name (e.g., "JD").
pub fn initials(first: &str, last: &str) -> String {
    [first, last]
        .iter()
        .filter_map(|name| name.trim().chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}
