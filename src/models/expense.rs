use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::Category;

/// A single recorded expense. `date` is when the money was spent (day
/// granularity); `created_at` is when the record was entered and is used
/// only to break ordering ties.
#[derive(Debug, Clone)]
pub struct Expense {
    pub id: Option<i64>,
    pub description: String,
    pub amount: Decimal,
    pub category: Category,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    pub created_at: String,
}

impl Expense {
    pub fn new(description: String, amount: Decimal, category: Category, date: String) -> Self {
        Self {
            id: None,
            description,
            amount,
            category,
            date,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Parse the stored date string into a calendar date.
    pub fn calendar_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .with_context(|| format!("Unparseable expense date: '{}'", self.date))
    }

    /// The calendar month this expense falls in, as (year, month).
    pub fn year_month(&self) -> Result<(i32, u32)> {
        let date = self.calendar_date()?;
        Ok((date.year(), date.month()))
    }
}
