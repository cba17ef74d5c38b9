#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;
use crate::models::Category;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}

fn make_expense(day: &str, amount: rust_decimal::Decimal, category: Category) -> Expense {
    Expense {
        id: None,
        description: "Test".into(),
        amount,
        category,
        date: day.into(),
        created_at: String::new(),
    }
}

// ── Failure boundaries ────────────────────────────────────────

#[test]
fn test_analyze_empty_snapshot_is_none() {
    assert_eq!(analyze_monthly_spending_at(&[], today()), None);
}

#[test]
fn test_analyze_contains_bad_dates() {
    let expenses = vec![
        make_expense("2024-07-10", dec!(50.00), Category::Food),
        make_expense("not-a-date", dec!(50.00), Category::Food),
    ];
    assert_eq!(analyze_monthly_spending_at(&expenses, today()), None);
}

#[test]
fn test_insights_contain_bad_dates() {
    let expenses = vec![make_expense("not-a-date", dec!(50.00), Category::Food)];
    assert!(detect_insights_at(&expenses, today()).is_empty());
}

#[test]
fn test_predict_contains_bad_dates() {
    let expenses = vec![
        make_expense("2024-06-10", dec!(50.00), Category::Food),
        make_expense("not-a-date", dec!(50.00), Category::Food),
        make_expense("2024-07-10", dec!(50.00), Category::Food),
    ];
    assert_eq!(predict_next_month(&expenses), None);
}

// ── Saturating percent change ─────────────────────────────────

#[test]
fn test_percent_change_zero_baseline() {
    let expenses = vec![make_expense("2024-07-01", dec!(100.00), Category::Food)];
    let comparison = analyze_monthly_spending_at(&expenses, today()).unwrap();
    assert_eq!(comparison.previous_month, dec!(0));
    assert_eq!(comparison.percent_change, dec!(100));
}

#[test]
fn test_percent_change_both_months_empty() {
    let expenses = vec![make_expense("2024-03-01", dec!(100.00), Category::Food)];
    let comparison = analyze_monthly_spending_at(&expenses, today()).unwrap();
    assert_eq!(comparison.current_month, dec!(0));
    assert_eq!(comparison.previous_month, dec!(0));
    assert_eq!(comparison.percent_change, dec!(0));
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn test_repeated_calls_are_identical() {
    let expenses = vec![
        make_expense("2024-07-10", dec!(300.00), Category::Food),
        make_expense("2024-07-11", dec!(20.00), Category::Bills),
        make_expense("2024-06-10", dec!(100.00), Category::Food),
        make_expense("2024-05-10", dec!(100.00), Category::Food),
    ];

    assert_eq!(
        analyze_monthly_spending_at(&expenses, today()),
        analyze_monthly_spending_at(&expenses, today())
    );
    assert_eq!(predict_next_month(&expenses), predict_next_month(&expenses));
    assert_eq!(
        detect_insights_at(&expenses, today()),
        detect_insights_at(&expenses, today())
    );
}

// ── Categorize facade ─────────────────────────────────────────

#[test]
fn test_categorizer_shares_one_table() {
    let table = KeywordTable::builtin();
    let categorizer = Categorizer::new(&table);
    let interpreter = QueryInterpreter::new(&table);

    assert_eq!(categorizer.categorize("bus ticket"), Category::Transportation);
    let reply = interpreter.answer_at(
        "total spent on Transportation",
        &[make_expense("2024-07-10", dec!(2.75), Category::Transportation)],
        today(),
    );
    match reply.unwrap() {
        QueryReply::Answer(answer) => assert_eq!(answer.amount, dec!(2.75)),
        QueryReply::Message(message) => panic!("unexpected message: {message}"),
    }
}
