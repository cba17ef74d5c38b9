use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::Expense;

/// An inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateWindow {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
}

impl DateWindow {
    pub(crate) fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day of `today`'s month through `today`.
    pub(crate) fn current_month(today: NaiveDate) -> Result<Self> {
        Ok(Self::new(first_of_month(today)?, today))
    }

    /// The full calendar month before `today`'s.
    pub(crate) fn previous_month(today: NaiveDate) -> Result<Self> {
        let end = first_of_month(today)?
            .pred_opt()
            .context("Date out of range")?;
        Ok(Self::new(first_of_month(end)?, end))
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

pub(crate) fn first_of_month(date: NaiveDate) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).context("Date out of range")
}

/// Sum of amounts for expenses dated inside the window.
pub(crate) fn window_total(expenses: &[Expense], window: DateWindow) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for expense in expenses {
        if window.contains(expense.calendar_date()?) {
            total += expense.amount;
        }
    }
    Ok(total)
}

/// Sum and mean for expenses dated inside the window. An empty window
/// yields (0, 0); the mean is never a division fault.
pub(crate) fn window_stats(expenses: &[Expense], window: DateWindow) -> Result<(Decimal, Decimal)> {
    let mut total = Decimal::ZERO;
    let mut count = 0;
    for expense in expenses {
        if window.contains(expense.calendar_date()?) {
            total += expense.amount;
            count += 1;
        }
    }
    Ok((total, mean_of(total, count)))
}

/// Mean that treats an empty set as zero.
pub(crate) fn mean_of(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count as u64)
    }
}

/// Month-over-month change as a percentage. A zero baseline saturates:
/// 0 when the current total is also 0, otherwise 100. This is a known
/// approximation, not a true infinite-growth signal.
pub(crate) fn percentage_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous > Decimal::ZERO {
        (current - previous) / previous * Decimal::ONE_HUNDRED
    } else if current == Decimal::ZERO {
        Decimal::ZERO
    } else {
        Decimal::ONE_HUNDRED
    }
}

/// Current-month vs previous-month totals with percent change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyComparison {
    pub(crate) current_month: Decimal,
    pub(crate) previous_month: Decimal,
    pub(crate) percent_change: Decimal,
}

pub(crate) fn compare_months(expenses: &[Expense], today: NaiveDate) -> Result<MonthlyComparison> {
    let current = window_total(expenses, DateWindow::current_month(today)?)?;
    let previous = window_total(expenses, DateWindow::previous_month(today)?)?;
    Ok(MonthlyComparison {
        current_month: current,
        previous_month: previous,
        percent_change: percentage_change(current, previous),
    })
}

#[cfg(test)]
#[path = "period_tests.rs"]
mod tests;
