mod category;
mod expense;
mod insight;

pub use category::Category;
pub use expense::Expense;
pub use insight::{Insight, InsightKind};
