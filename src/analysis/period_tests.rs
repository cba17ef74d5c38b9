#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Category;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn make_expense(day: &str, amount: Decimal) -> Expense {
    Expense {
        id: None,
        description: "Test".into(),
        amount,
        category: Category::Food,
        date: day.into(),
        created_at: String::new(),
    }
}

// ── Windows ───────────────────────────────────────────────────

#[test]
fn test_current_month_window() {
    let window = DateWindow::current_month(date(2024, 7, 15)).unwrap();
    assert_eq!(window.start, date(2024, 7, 1));
    assert_eq!(window.end, date(2024, 7, 15));
}

#[test]
fn test_previous_month_window() {
    let window = DateWindow::previous_month(date(2024, 7, 15)).unwrap();
    assert_eq!(window.start, date(2024, 6, 1));
    assert_eq!(window.end, date(2024, 6, 30));
}

#[test]
fn test_previous_month_wraps_january() {
    let window = DateWindow::previous_month(date(2024, 1, 10)).unwrap();
    assert_eq!(window.start, date(2023, 12, 1));
    assert_eq!(window.end, date(2023, 12, 31));
}

#[test]
fn test_previous_month_keeps_leap_february() {
    let window = DateWindow::previous_month(date(2024, 3, 5)).unwrap();
    assert_eq!(window.end, date(2024, 2, 29));
}

#[test]
fn test_window_contains_is_inclusive() {
    let window = DateWindow::new(date(2024, 6, 1), date(2024, 6, 30));
    assert!(window.contains(date(2024, 6, 1)));
    assert!(window.contains(date(2024, 6, 30)));
    assert!(!window.contains(date(2024, 5, 31)));
    assert!(!window.contains(date(2024, 7, 1)));
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_window_total() {
    let expenses = vec![
        make_expense("2024-06-30", dec!(10.00)),
        make_expense("2024-06-15", dec!(25.50)),
        make_expense("2024-05-31", dec!(99.00)),
    ];
    let window = DateWindow::new(date(2024, 6, 1), date(2024, 6, 30));
    assert_eq!(window_total(&expenses, window).unwrap(), dec!(35.50));
}

#[test]
fn test_window_total_rejects_bad_date() {
    let expenses = vec![make_expense("garbage", dec!(10.00))];
    let window = DateWindow::new(date(2024, 6, 1), date(2024, 6, 30));
    assert!(window_total(&expenses, window).is_err());
}

#[test]
fn test_window_stats() {
    let expenses = vec![
        make_expense("2024-06-10", dec!(30.00)),
        make_expense("2024-06-20", dec!(10.00)),
    ];
    let window = DateWindow::new(date(2024, 6, 1), date(2024, 6, 30));
    let (total, mean) = window_stats(&expenses, window).unwrap();
    assert_eq!(total, dec!(40.00));
    assert_eq!(mean, dec!(20.00));
}

#[test]
fn test_window_stats_empty_is_zero() {
    let expenses = vec![make_expense("2024-01-01", dec!(30.00))];
    let window = DateWindow::new(date(2024, 6, 1), date(2024, 6, 30));
    let (total, mean) = window_stats(&expenses, window).unwrap();
    assert_eq!(total, Decimal::ZERO);
    assert_eq!(mean, Decimal::ZERO);
}

#[test]
fn test_mean_of_empty_set_is_zero() {
    assert_eq!(mean_of(Decimal::ZERO, 0), Decimal::ZERO);
    assert_eq!(mean_of(dec!(90.00), 3), dec!(30.00));
}

// ── Percentage change ─────────────────────────────────────────

#[test]
fn test_percentage_change_basic() {
    assert_eq!(percentage_change(dec!(150), dec!(100)), dec!(50));
    assert_eq!(percentage_change(dec!(50), dec!(100)), dec!(-50));
}

#[test]
fn test_percentage_change_both_zero() {
    assert_eq!(percentage_change(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
}

#[test]
fn test_percentage_change_zero_baseline_saturates() {
    // Saturating placeholder, not a true growth figure.
    assert_eq!(percentage_change(dec!(0.01), Decimal::ZERO), dec!(100));
    assert_eq!(percentage_change(dec!(5000), Decimal::ZERO), dec!(100));
}

// ── Month comparison ──────────────────────────────────────────

#[test]
fn test_compare_months() {
    let expenses = vec![
        make_expense("2024-07-10", dec!(200.00)),
        make_expense("2024-07-01", dec!(100.00)),
        make_expense("2024-06-15", dec!(200.00)),
        make_expense("2024-04-15", dec!(999.00)),
    ];
    let comparison = compare_months(&expenses, date(2024, 7, 15)).unwrap();
    assert_eq!(comparison.current_month, dec!(300.00));
    assert_eq!(comparison.previous_month, dec!(200.00));
    assert_eq!(comparison.percent_change, dec!(50));
}

#[test]
fn test_compare_months_ignores_rest_of_current_month() {
    // "Current month" ends at today, not at month end.
    let expenses = vec![
        make_expense("2024-07-20", dec!(500.00)),
        make_expense("2024-07-10", dec!(100.00)),
    ];
    let comparison = compare_months(&expenses, date(2024, 7, 15)).unwrap();
    assert_eq!(comparison.current_month, dec!(100.00));
}
