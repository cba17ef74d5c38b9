use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Category, Expense};
use crate::util::format_amount;

use super::keywords::KeywordTable;
use super::period::{first_of_month, mean_of, DateWindow};

/// A successful query evaluation: the headline amount, a display summary,
/// and a bounded preview of matching records (never the full filtered set).
#[derive(Debug, Clone)]
pub(crate) struct QueryAnswer {
    pub(crate) amount: Decimal,
    pub(crate) details: String,
    pub(crate) matches: Vec<Expense>,
}

/// Outcome of interpreting one query. `Message` covers "nothing to query"
/// and "could not understand"; both are answers, not errors.
#[derive(Debug, Clone)]
pub(crate) enum QueryReply {
    Answer(QueryAnswer),
    Message(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimeFilter {
    LastWeek,
    LastMonth,
    ThisMonth,
    ThisYear,
    LastYear,
}

/// Time phrases in priority order. The FIRST table-order phrase present in
/// the query wins, even when a later one also appears.
const TIME_PHRASES: &[(&str, TimeFilter)] = &[
    ("last week", TimeFilter::LastWeek),
    ("last month", TimeFilter::LastMonth),
    ("this month", TimeFilter::ThisMonth),
    ("this year", TimeFilter::ThisYear),
    ("last year", TimeFilter::LastYear),
];

impl TimeFilter {
    /// The date window this phrase selects. Only "last month" is bounded
    /// on both sides; the rest run open-ended from their start date.
    fn window(self, today: NaiveDate) -> Result<DateWindow> {
        let window = match self {
            Self::LastWeek => DateWindow::new(today - Duration::days(7), NaiveDate::MAX),
            Self::LastMonth => DateWindow::previous_month(today)?,
            Self::ThisMonth => DateWindow::new(first_of_month(today)?, NaiveDate::MAX),
            Self::ThisYear => DateWindow::new(
                NaiveDate::from_ymd_opt(today.year(), 1, 1).context("Date out of range")?,
                NaiveDate::MAX,
            ),
            Self::LastYear => DateWindow::new(
                NaiveDate::from_ymd_opt(today.year() - 1, 1, 1).context("Date out of range")?,
                NaiveDate::MAX,
            ),
        };
        Ok(window)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Intent {
    Sum,
    Average,
    Max,
    Min,
    Summary,
}

/// Intent cues in priority order; the first rule with any cue present in
/// the query decides. No cue at all falls back to `Summary`.
const INTENT_RULES: &[(&[&str], Intent)] = &[
    (&["how much", "total", "spent", "spending"], Intent::Sum),
    (&["average", "avg"], Intent::Average),
    (&["highest", "maximum", "max", "most expensive"], Intent::Max),
    (&["lowest", "minimum", "min", "cheapest"], Intent::Min),
];

/// How many matching records an answer carries for display.
const PREVIEW_LIMIT: usize = 10;
/// How many ranked records a max/min answer carries.
const RANKED_LIMIT: usize = 5;

/// Rule-based interpreter for plain-English questions over the snapshot:
/// one time phrase, at most one category mention, one intent, evaluated in
/// a single pass with no backtracking.
pub(crate) struct QueryInterpreter<'a> {
    table: &'a KeywordTable,
}

impl<'a> QueryInterpreter<'a> {
    pub(crate) fn new(table: &'a KeywordTable) -> Self {
        Self { table }
    }

    pub(crate) fn answer(&self, query: &str, expenses: &[Expense]) -> QueryReply {
        if expenses.is_empty() {
            return QueryReply::Message("No expense data available to query.".into());
        }
        let today = chrono::Local::now().date_naive();
        match self.answer_at(query, expenses, today) {
            Ok(reply) => reply,
            Err(e) => QueryReply::Message(format!("Error processing query: {e}")),
        }
    }

    /// Interpretation against a fixed `today`, so the window arithmetic is
    /// deterministic under test.
    pub(crate) fn answer_at(
        &self,
        query: &str,
        expenses: &[Expense],
        today: NaiveDate,
    ) -> Result<QueryReply> {
        let query_lower = query.to_lowercase();

        let time = extract_time_phrase(&query_lower);
        let mut filtered: Vec<&Expense> = match time {
            Some((_, filter)) => {
                let window = filter.window(today)?;
                let mut kept = Vec::new();
                for expense in expenses {
                    if window.contains(expense.calendar_date()?) {
                        kept.push(expense);
                    }
                }
                kept
            }
            None => expenses.iter().collect(),
        };

        let category = self.extract_category(&query_lower);
        if let Some(cat) = category {
            filtered.retain(|e| e.category == cat);
        }

        let period_text = time
            .map(|(phrase, _)| format!(" {phrase}"))
            .unwrap_or_default();
        let category_text = category.map(|c| format!(" on {c}")).unwrap_or_default();

        let answer = match classify_intent(&query_lower) {
            Intent::Sum => {
                let total: Decimal = filtered.iter().map(|e| e.amount).sum();
                Some(QueryAnswer {
                    amount: total,
                    details: format!(
                        "Total spending{category_text}{period_text}: {}",
                        format_amount(total)
                    ),
                    matches: preview(&filtered, PREVIEW_LIMIT),
                })
            }
            Intent::Average => {
                let total: Decimal = filtered.iter().map(|e| e.amount).sum();
                let average = mean_of(total, filtered.len());
                Some(QueryAnswer {
                    amount: average,
                    details: format!(
                        "Average spending{category_text}{period_text}: {}",
                        format_amount(average)
                    ),
                    matches: preview(&filtered, PREVIEW_LIMIT),
                })
            }
            Intent::Max => ranked_answer(&filtered, true),
            Intent::Min => ranked_answer(&filtered, false),
            Intent::Summary => {
                if filtered.is_empty() {
                    None
                } else {
                    let total: Decimal = filtered.iter().map(|e| e.amount).sum();
                    Some(QueryAnswer {
                        amount: total,
                        details: format!(
                            "Found {} expenses totaling {}",
                            filtered.len(),
                            format_amount(total)
                        ),
                        matches: preview(&filtered, PREVIEW_LIMIT),
                    })
                }
            }
        };

        Ok(match answer {
            Some(answer) => QueryReply::Answer(answer),
            None => QueryReply::Message(
                "I couldn't understand your query. Please try rephrasing it.".into(),
            ),
        })
    }

    /// First table-order category whose name occurs in the query. At most
    /// one category filter applies; `Other` is never matched by name.
    fn extract_category(&self, query_lower: &str) -> Option<Category> {
        self.table
            .categories()
            .find(|category| query_lower.contains(&category.as_str().to_lowercase()))
    }
}

fn extract_time_phrase(query_lower: &str) -> Option<(&'static str, TimeFilter)> {
    TIME_PHRASES
        .iter()
        .find(|(phrase, _)| query_lower.contains(phrase))
        .copied()
}

pub(crate) fn classify_intent(query_lower: &str) -> Intent {
    for (cues, intent) in INTENT_RULES {
        if cues.iter().any(|cue| query_lower.contains(cue)) {
            return *intent;
        }
    }
    Intent::Summary
}

/// Max/min answer over the filtered set. An empty set produces nothing;
/// the caller falls through to the not-understood message rather than
/// inventing a zero-value result.
fn ranked_answer(filtered: &[&Expense], descending: bool) -> Option<QueryAnswer> {
    let mut ranked: Vec<&Expense> = filtered.to_vec();
    if descending {
        // Stable sort: equal amounts keep snapshot order, so the extreme
        // record is the first occurrence.
        ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
    } else {
        ranked.sort_by(|a, b| a.amount.cmp(&b.amount));
    }

    let top = ranked.first()?;
    let label = if descending { "Highest" } else { "Lowest" };
    Some(QueryAnswer {
        amount: top.amount,
        details: format!(
            "{label} expense: {} - {} on {}",
            top.description,
            format_amount(top.amount),
            top.date
        ),
        matches: preview(&ranked, RANKED_LIMIT),
    })
}

fn preview(records: &[&Expense], limit: usize) -> Vec<Expense> {
    records.iter().take(limit).map(|e| (*e).clone()).collect()
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
