use anyhow::Result;
use chrono::Datelike;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::analysis::{self, Categorizer, KeywordTable, MonthlyComparison, QueryAnswer, QueryReply};
use crate::ledger::LedgerCsv;
use crate::models::{Category, Expense};
use crate::util::{format_amount, format_percent, month_name, sanitize_input, truncate};

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..]),
        "compare" => cli_compare(&args[2..]),
        "forecast" => cli_forecast(&args[2..]),
        "insights" => cli_insights(&args[2..]),
        "ask" => cli_ask(&args[2..]),
        "categorize" => cli_categorize(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendlens {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("SpendLens — local-only personal expense tracker");
    println!();
    println!("Usage: spendlens <command> [args] [--ledger <file.csv>]");
    println!();
    println!("Commands:");
    println!("  summary [YYYY-MM]             Monthly totals and category breakdown");
    println!("  compare                       This month vs last month");
    println!("  forecast                      Predict next month's spending");
    println!("  insights                      Category-level spending insights");
    println!("  ask \"<question>\"              Ask in plain English, e.g.");
    println!("                                \"How much did I spend on Food last month?\"");
    println!("  categorize \"<description>\"    Suggest a category for a description");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("The ledger is a CSV of date,description,amount,category rows.");
}

fn cli_summary(args: &[String]) -> Result<()> {
    let expenses = load_ledger(args)?;
    let month = positional(args)
        .first()
        .map(|m| m.to_string())
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string());

    let in_month: Vec<&Expense> = expenses
        .iter()
        .filter(|e| e.date.starts_with(&month))
        .collect();
    let total: Decimal = in_month.iter().map(|e| e.amount).sum();
    let count = in_month.len();
    let average = if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count as u64)
    };

    println!("SpendLens — {month}");
    println!("{}", "─".repeat(40));
    println!("  Total:      {}", format_amount(total));
    println!("  Average:    {}", format_amount(average));
    println!("  Expenses:   {count}");

    let mut by_category: BTreeMap<Category, Decimal> = BTreeMap::new();
    for expense in &in_month {
        *by_category.entry(expense.category).or_insert(Decimal::ZERO) += expense.amount;
    }
    if !by_category.is_empty() {
        let mut breakdown: Vec<(Category, Decimal)> = by_category.into_iter().collect();
        breakdown.sort_by(|a, b| b.1.cmp(&a.1));

        println!();
        println!("Spending by Category:");
        for (category, amount) in &breakdown {
            println!("  {:<16} {}", category.as_str(), format_amount(*amount));
        }
    }

    Ok(())
}

fn cli_compare(args: &[String]) -> Result<()> {
    let expenses = load_ledger(args)?;
    let Some(comparison) = analysis::analyze_monthly_spending(&expenses) else {
        println!("Monthly analysis unavailable (no usable expense history)");
        return Ok(());
    };
    print_comparison(&comparison);
    Ok(())
}

fn print_comparison(comparison: &MonthlyComparison) {
    let today = chrono::Local::now().date_naive();
    let previous = if today.month() == 1 {
        12
    } else {
        today.month() - 1
    };

    println!(
        "Spending: {} vs {}",
        month_name(today.month()),
        month_name(previous)
    );
    println!("  This month:  {}", format_amount(comparison.current_month));
    println!("  Last month:  {}", format_amount(comparison.previous_month));
    println!("  Change:      {}", format_percent(comparison.percent_change));
}

fn cli_forecast(args: &[String]) -> Result<()> {
    let expenses = load_ledger(args)?;
    match analysis::predict_next_month(&expenses) {
        Some(amount) => println!("Predicted spending next month: {}", format_amount(amount)),
        None => println!("Not enough history to forecast (need 3+ expenses across 2+ months)"),
    }
    Ok(())
}

fn cli_insights(args: &[String]) -> Result<()> {
    let expenses = load_ledger(args)?;
    let insights = analysis::detect_insights(&expenses);
    if insights.is_empty() {
        println!("No insights for the current month");
        return Ok(());
    }

    for insight in &insights {
        match insight.previous_amount {
            Some(previous) => println!(
                "  {} ({} last month, {} this month)",
                insight.message,
                format_amount(previous),
                format_amount(insight.amount)
            ),
            None => println!(
                "  {} ({} this month)",
                insight.message,
                format_amount(insight.amount)
            ),
        }
    }
    Ok(())
}

fn cli_ask(args: &[String]) -> Result<()> {
    let words = positional(args);
    let Some(question) = words.first() else {
        anyhow::bail!("Usage: spendlens ask \"<question>\"");
    };

    let expenses = load_ledger(args)?;
    let table = KeywordTable::builtin();
    match analysis::answer_query(&table, question.as_str(), &expenses) {
        QueryReply::Answer(answer) => print_answer(&answer),
        QueryReply::Message(message) => println!("{message}"),
    }
    Ok(())
}

fn print_answer(answer: &QueryAnswer) {
    println!("{}", answer.details);
    if answer.matches.is_empty() {
        return;
    }
    println!();
    for expense in &answer.matches {
        println!(
            "  {}  {:<32} {:>12}  {}",
            expense.date,
            truncate(&expense.description, 32),
            format_amount(expense.amount),
            expense.category
        );
    }
}

fn cli_categorize(args: &[String]) -> Result<()> {
    let words = positional(args);
    let Some(description) = words.first() else {
        anyhow::bail!("Usage: spendlens categorize \"<description>\"");
    };

    let table = KeywordTable::builtin();
    let categorizer = Categorizer::new(&table);
    let cleaned = sanitize_input(description.as_str());
    println!("{}", categorizer.categorize(&cleaned));
    Ok(())
}

fn load_ledger(args: &[String]) -> Result<Vec<Expense>> {
    let path = ledger_path(args)?;
    if !path.exists() {
        anyhow::bail!(
            "No ledger found at {} (point at one with --ledger <file.csv>)",
            path.display()
        );
    }
    LedgerCsv::load(&path)
}

fn ledger_path(args: &[String]) -> Result<PathBuf> {
    if let Some(pair) = args.windows(2).find(|w| w[0] == "--ledger") {
        return Ok(PathBuf::from(&pair[1]));
    }
    let proj_dirs = directories::ProjectDirs::from("com", "spendlens", "SpendLens")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().join("expenses.csv"))
}

/// Arguments with the `--ledger <path>` pair removed.
fn positional(args: &[String]) -> Vec<&String> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--ledger" {
            i += 2;
        } else {
            out.push(&args[i]);
            i += 1;
        }
    }
    out
}
