use anyhow::{anyhow, Result};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::Expense;

/// Fewest records worth fitting a line over.
const MIN_RECORDS: usize = 3;
/// Fewest distinct calendar months worth extrapolating from.
const MIN_MONTHS: usize = 2;

/// Project next month's total by fitting a least-squares line over the
/// monthly totals and evaluating it one month past the last observed one.
///
/// Returns `None` when history is too thin to extrapolate; that is a
/// normal outcome, not a fault. Predictions are clamped at zero and are a
/// best-effort heuristic with no confidence attached.
pub(crate) fn predict(expenses: &[Expense]) -> Result<Option<Decimal>> {
    if expenses.len() < MIN_RECORDS {
        return Ok(None);
    }

    let totals = monthly_totals(expenses)?;
    if totals.len() < MIN_MONTHS {
        return Ok(None);
    }

    let mut points = Vec::with_capacity(totals.len());
    for (i, total) in totals.iter().enumerate() {
        let y = total
            .to_f64()
            .ok_or_else(|| anyhow!("Monthly total out of range: {total}"))?;
        points.push((i as f64, y));
    }

    let (slope, intercept) = least_squares(&points);
    let next_index = points.len() as f64;
    let predicted = (slope * next_index + intercept).max(0.0);

    let amount = Decimal::from_f64(predicted)
        .ok_or_else(|| anyhow!("Prediction out of range: {predicted}"))?;
    Ok(Some(amount.round_dp(2)))
}

/// Totals per calendar month, chronological.
fn monthly_totals(expenses: &[Expense]) -> Result<Vec<Decimal>> {
    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for expense in expenses {
        *by_month.entry(expense.year_month()?).or_insert(Decimal::ZERO) += expense.amount;
    }
    Ok(by_month.into_values().collect())
}

/// Ordinary least squares fit `y = slope * x + intercept`. Callers ensure
/// at least two distinct x values, so the denominator is nonzero.
fn least_squares(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.0).sum();
    let sum_y: f64 = points.iter().map(|p| p.1).sum();
    let sum_xx: f64 = points.iter().map(|p| p.0 * p.0).sum();
    let sum_xy: f64 = points.iter().map(|p| p.0 * p.1).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    (slope, intercept)
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod tests;
