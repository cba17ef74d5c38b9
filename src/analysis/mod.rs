//! The analytical core: keyword categorization, month-over-month
//! comparison, trend forecasting, insight detection, and plain-English
//! queries.
//!
//! Every operation reads a snapshot of expense records and returns a fresh
//! value; nothing is cached or mutated between calls. Each top-level
//! operation is a single failure boundary: an internal fault (an
//! unparseable record date, mostly) comes back as "no result", never as a
//! crash and never as a partial result.

mod forecast;
mod insights;
mod keywords;
mod period;
mod query;

pub(crate) use keywords::{Categorizer, KeywordTable};
pub(crate) use period::MonthlyComparison;
pub(crate) use query::{QueryAnswer, QueryInterpreter, QueryReply};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Expense, Insight};

/// Current vs previous month totals with percent change, or `None` when
/// the snapshot is empty or a record cannot be read.
pub(crate) fn analyze_monthly_spending(expenses: &[Expense]) -> Option<MonthlyComparison> {
    analyze_monthly_spending_at(expenses, today())
}

pub(crate) fn analyze_monthly_spending_at(
    expenses: &[Expense],
    today: NaiveDate,
) -> Option<MonthlyComparison> {
    if expenses.is_empty() {
        return None;
    }
    period::compare_months(expenses, today).ok()
}

/// Least-squares projection of next month's spend. `None` means "no
/// prediction" (thin history or an unreadable record), not zero.
pub(crate) fn predict_next_month(expenses: &[Expense]) -> Option<Decimal> {
    forecast::predict(expenses).ok().flatten()
}

/// Category-level observations for the current month. A snapshot that
/// cannot be analyzed produces no insights rather than partial ones.
pub(crate) fn detect_insights(expenses: &[Expense]) -> Vec<Insight> {
    detect_insights_at(expenses, today())
}

pub(crate) fn detect_insights_at(expenses: &[Expense], today: NaiveDate) -> Vec<Insight> {
    insights::detect(expenses, today).unwrap_or_default()
}

/// Interpret a plain-English question over the snapshot.
pub(crate) fn answer_query(table: &KeywordTable, query: &str, expenses: &[Expense]) -> QueryReply {
    QueryInterpreter::new(table).answer(query, expenses)
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests;
