use rust_decimal::Decimal;

use super::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightKind {
    HighSpending,
    IncreasingTrend,
}

/// A derived observation about category-level spending. Produced on demand
/// and handed straight to the caller; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub kind: InsightKind,
    pub category: Category,
    /// Current-month sum for the category.
    pub amount: Decimal,
    /// Prior-month sum; present only for trend insights.
    pub previous_amount: Option<Decimal>,
    pub message: String,
}

impl Insight {
    pub fn high_spending(category: Category, amount: Decimal) -> Self {
        Self {
            kind: InsightKind::HighSpending,
            category,
            amount,
            previous_amount: None,
            message: format!("High spending detected in {category}"),
        }
    }

    pub fn increasing_trend(category: Category, amount: Decimal, previous: Decimal) -> Self {
        Self {
            kind: InsightKind::IncreasingTrend,
            category,
            amount,
            previous_amount: Some(previous),
            message: format!("Spending in {category} is increasing"),
        }
    }
}
