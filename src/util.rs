use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

/// Format a decimal amount as dollars with thousand separators and 2
/// decimal places. e.g. `1234567.89` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let abs = val.abs();
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if val < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Signed percentage for display, one decimal place. e.g. `"+12.3%"`
pub(crate) fn format_percent(val: Decimal) -> String {
    let rounded = val.round_dp(1);
    if rounded < Decimal::ZERO {
        format!("{rounded:.1}%")
    } else {
        format!("+{rounded:.1}%")
    }
}

/// Accept a handful of common date spellings and normalize to ISO
/// "YYYY-MM-DD". Ambiguous day/month orderings resolve in list order.
pub(crate) fn parse_date_input(s: &str) -> Option<String> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%m/%d/%Y",
        "%d/%m/%Y",
        "%Y/%m/%d",
        "%m-%d-%Y",
        "%d-%m-%Y",
    ];

    let trimmed = s.trim();
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    None
}

/// True when the string is already a valid ISO calendar date.
pub(crate) fn validate_date_format(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Entry precondition for an expense record: a non-blank description of at
/// most 200 characters and a positive amount.
pub(crate) fn validate_expense_input(description: &str, amount: Decimal) -> bool {
    let trimmed = description.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= 200 && amount > Decimal::ZERO
}

/// Collapse whitespace runs and strip NUL bytes from free text. A regex
/// that fails to compile degrades to a plain trim.
pub(crate) fn sanitize_input(text: &str) -> String {
    let cleaned = text.replace('\0', "");
    match Regex::new(r"\s+") {
        Ok(re) => re.replace_all(cleaned.trim(), " ").into_owned(),
        Err(_) => cleaned.trim().to_string(),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if
/// truncated. Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Full month name for a 1-based month number.
pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
#[path = "util_tests.rs"]
mod tests;
