use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{Category, Expense};
use crate::util::{parse_date_input, sanitize_input, validate_expense_input};

/// Reads the expense ledger CSV and hands back the snapshot every
/// analytical operation consumes: every record, newest first.
///
/// Rows are `date, description, amount, category[, created_at]`. A header
/// row is detected and skipped.
pub(crate) struct LedgerCsv;

impl LedgerCsv {
    pub(crate) fn load(path: &Path) -> Result<Vec<Expense>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open ledger: {}", path.display()))?;

        let mut expenses: Vec<Expense> = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result.with_context(|| format!("Row {}: failed to read", i + 1))?;
            let fields: Vec<&str> = record.iter().map(str::trim).collect();

            if i == 0 && looks_like_header(&fields) {
                continue;
            }
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }

            let id = expenses.len() as i64 + 1;
            expenses.push(parse_row(&fields, id, i + 1)?);
        }

        sort_snapshot(&mut expenses);
        Ok(expenses)
    }
}

/// Snapshot order: date descending, then created_at descending, insertion
/// order (id) breaking remaining ties. ISO date strings compare
/// lexicographically, which is chronological.
fn sort_snapshot(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn parse_row(fields: &[&str], id: i64, row: usize) -> Result<Expense> {
    let date_raw = fields.first().copied().unwrap_or_default();
    let date = parse_date_input(date_raw)
        .with_context(|| format!("Row {row}: unrecognized date '{date_raw}'"))?;

    let description = sanitize_input(fields.get(1).copied().unwrap_or_default());

    let amount_raw = fields.get(2).copied().unwrap_or_default();
    let amount = parse_amount(amount_raw)
        .with_context(|| format!("Row {row}: failed to parse amount '{amount_raw}'"))?;

    if !validate_expense_input(&description, amount) {
        anyhow::bail!("Row {row}: expense needs a non-blank description and a positive amount");
    }

    let category_raw = fields.get(3).copied().unwrap_or_default();
    let category = Category::parse(category_raw)
        .with_context(|| format!("Row {row}: unknown category '{category_raw}'"))?;

    let created_at = fields.get(4).copied().unwrap_or_default().to_string();

    Ok(Expense {
        id: Some(id),
        description,
        amount,
        category,
        date,
        created_at,
    })
}

fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.replace(['$', ','], "").trim().to_string();
    Decimal::from_str(&cleaned).with_context(|| format!("Failed to parse '{s}' as decimal"))
}

/// Headers don't parse as dates or numbers.
fn looks_like_header(fields: &[&str]) -> bool {
    fields.iter().any(|f| !f.is_empty())
        && fields.iter().all(|field| {
            let trimmed = field.trim();
            Decimal::from_str(trimmed.replace(['$', ','], "").trim()).is_err()
                && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err()
                && NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").is_err()
        })
}
