use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::{Category, Expense, Insight};

use super::period::{mean_of, DateWindow};

/// Trend insights need strictly more records than this before the
/// month-over-month comparison is attempted. A record-count gate, not a
/// month-count one.
const TREND_MIN_RECORDS: usize = 30;

/// Flag categories whose current-month spend stands out: well above the
/// cross-category mean, or sharply up on the prior month.
///
/// All high-spending insights are emitted before all trend insights; each
/// group follows category grouping order.
pub(crate) fn detect(expenses: &[Expense], today: NaiveDate) -> Result<Vec<Insight>> {
    let mut insights = Vec::new();
    if expenses.is_empty() {
        return Ok(insights);
    }

    let current = category_totals(expenses, DateWindow::current_month(today)?)?;

    if !current.is_empty() {
        let total: Decimal = current.values().copied().sum();
        let mean = mean_of(total, current.len());
        // 1.5x the mean of all current-month category sums.
        let threshold = mean * Decimal::new(15, 1);
        for (&category, &amount) in &current {
            if amount > threshold {
                insights.push(Insight::high_spending(category, amount));
            }
        }
    }

    if expenses.len() > TREND_MIN_RECORDS {
        let previous = category_totals(expenses, DateWindow::previous_month(today)?)?;
        // 30% over last month counts as increasing.
        let growth = Decimal::new(13, 1);
        for (&category, &amount) in &current {
            // Categories with no prior-month baseline never trigger this.
            if let Some(&prior) = previous.get(&category) {
                if amount > prior * growth {
                    insights.push(Insight::increasing_trend(category, amount, prior));
                }
            }
        }
    }

    Ok(insights)
}

/// Per-category sums inside the window, keyed in category order.
fn category_totals(
    expenses: &[Expense],
    window: DateWindow,
) -> Result<BTreeMap<Category, Decimal>> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        if window.contains(expense.calendar_date()?) {
            *totals.entry(expense.category).or_insert(Decimal::ZERO) += expense.amount;
        }
    }
    Ok(totals)
}

#[cfg(test)]
#[path = "insights_tests.rs"]
mod tests;
