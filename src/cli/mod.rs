//! Thin command-line front end over the ledger core.
//!
//! The interface is deliberately small: every command loads the ledger
//! snapshot, runs one core operation, saves, and exits.

use chrono::{NaiveDate, Utc};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use once_cell::sync::Lazy;

use crate::currency::{format_amount, format_date, format_time, DisplayOptions};
use crate::errors::LedgerError;
use crate::ledger::{
    Category, FlowDirection, Ledger, LineageId, Period, RecurrenceMode, TransactionDraft,
    TransactionId,
};
use crate::storage::{JsonStorage, StorageBackend};

const DEFAULT_LEDGER: &str = "default";

static THEME: Lazy<ColorfulTheme> = Lazy::new(ColorfulTheme::default);

/// Entry point for the binary. Parses `args` (without the program name)
/// and dispatches to one command handler.
pub fn run(args: &[String]) -> Result<(), LedgerError> {
    let storage = JsonStorage::new_default()?;
    let mut ledger = load_or_create(&storage)?;

    let options = DisplayOptions {
        hide_values: args.iter().any(|arg| arg == "--hide"),
    };
    let args: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|arg| *arg != "--hide")
        .collect();

    match args.first().copied() {
        None | Some("report") => {
            let period = parse_period_arg(args.get(1).copied())?;
            print_report(&ledger, period, &options);
            Ok(())
        }
        Some("statement") => {
            let period = parse_period_arg(args.get(1).copied())?;
            print_statement(&ledger, period, &options);
            Ok(())
        }
        Some("add") => {
            add_interactive(&mut ledger)?;
            storage.save(&ledger, DEFAULT_LEDGER)
        }
        Some("delete") => {
            let id = parse_delete_id(&args[1..])?;
            delete_command(&mut ledger, TransactionId(id), args.contains(&"--series"))?;
            storage.save(&ledger, DEFAULT_LEDGER)
        }
        Some("categories") => {
            categories_command(&mut ledger, &args[1..])?;
            storage.save(&ledger, DEFAULT_LEDGER)
        }
        Some("goals") => {
            goals_command(&mut ledger, &args[1..], &options)?;
            storage.save(&ledger, DEFAULT_LEDGER)
        }
        Some("seed") => {
            ledger.seed_sample(Utc::now().date_naive());
            println!("{}", "Sample data generated.".green());
            storage.save(&ledger, DEFAULT_LEDGER)
        }
        Some("reset") => {
            let confirmed = Confirm::with_theme(&*THEME)
                .with_prompt("Delete every transaction?")
                .default(false)
                .interact()
                .map_err(|err| LedgerError::InvalidInput(err.to_string()))?;
            if confirmed {
                ledger.clear_transactions();
                println!("{}", "Transaction log cleared.".yellow());
                storage.save(&ledger, DEFAULT_LEDGER)?;
            }
            Ok(())
        }
        Some(other) => Err(LedgerError::InvalidInput(format!(
            "unknown command `{}`; try report, statement, add, delete, categories, goals, seed, reset",
            other
        ))),
    }
}

fn load_or_create(storage: &JsonStorage) -> Result<Ledger, LedgerError> {
    if storage.ledger_path(DEFAULT_LEDGER).exists() {
        storage.load(DEFAULT_LEDGER)
    } else {
        let ledger = Ledger::new(DEFAULT_LEDGER);
        storage.save(&ledger, DEFAULT_LEDGER)?;
        Ok(ledger)
    }
}

fn parse_period_arg(raw: Option<&str>) -> Result<Period, LedgerError> {
    match raw {
        Some(value) => Period::parse(value),
        None => Ok(Period::from_date(Utc::now().date_naive())),
    }
}

fn print_report(ledger: &Ledger, period: Period, options: &DisplayOptions) {
    let summary = ledger.summarize(period);
    println!("{}", format!("=== {} ===", period.label()).bold());
    println!("Inflow:  {}", format_amount(summary.inflow, options).green());
    println!("Outflow: {}", format_amount(summary.outflow, options).red());
    let net = format_amount(summary.net, options);
    if summary.net >= 0.0 {
        println!("Net:     {}", net.green().bold());
    } else {
        println!("Net:     {}", net.red().bold());
    }

    if !summary.category_outflow.is_empty() {
        println!();
        println!("{}", "Spending by category".bold());
        for entry in &summary.category_outflow {
            println!(
                "  {:<16} {}",
                entry.category,
                format_amount(entry.total, options).red()
            );
        }
    }

    let goal_report = ledger.goal_report(period);
    if !goal_report.is_empty() {
        println!();
        println!("{}", "Spending limits".bold());
        for status in &goal_report {
            let bar = progress_bar(status.progress.ratio);
            let line = format!(
                "  {:<16} {} {:>6.1}%  {} / {}",
                status.goal.category,
                bar,
                status.progress.percent,
                format_amount(status.spent, options),
                format_amount(status.goal.ceiling, options),
            );
            if status.progress.over_limit {
                println!("{} {}", line.red(), "LIMIT EXCEEDED".red().bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

fn progress_bar(ratio: f64) -> String {
    const WIDTH: usize = 20;
    let filled = (ratio * WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled.min(WIDTH)),
        "-".repeat(WIDTH - filled.min(WIDTH))
    )
}

fn print_statement(ledger: &Ledger, period: Period, options: &DisplayOptions) {
    let rows = ledger.statement(period);
    println!("{}", format!("=== Statement {} ===", period.label()).bold());
    if rows.is_empty() {
        println!("No records found.");
        return;
    }
    for txn in rows {
        let sign = match txn.direction {
            FlowDirection::Income => "+".green(),
            FlowDirection::Expense => "-".red(),
        };
        let mut meta = format!(
            "{} {} \u{2022} {}",
            format_date(txn.occurred_at),
            format_time(txn.occurred_at),
            txn.category
        );
        if let Some(label) = txn.recurrence.label() {
            meta.push_str(&format!(" \u{2022} ({})", label));
        }
        println!(
            "{} {:<6} {:<32} {}",
            sign,
            txn.id.to_string().dimmed(),
            txn.description,
            format_amount(txn.amount, options)
        );
        println!("         {}", meta.dimmed());
    }
}

fn add_interactive(ledger: &mut Ledger) -> Result<(), LedgerError> {
    let invalid = |err: dialoguer::Error| LedgerError::InvalidInput(err.to_string());

    let description: String = Input::with_theme(&*THEME)
        .with_prompt("Description")
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("description must not be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .map_err(invalid)?;

    let amount: f64 = Input::with_theme(&*THEME)
        .with_prompt("Amount")
        .validate_with(|value: &f64| {
            if *value > 0.0 {
                Ok(())
            } else {
                Err("amount must be positive")
            }
        })
        .interact_text()
        .map_err(invalid)?;

    let category_names: Vec<String> = ledger
        .categories
        .iter()
        .map(|category| category.name.clone())
        .collect();
    if category_names.is_empty() {
        return Err(LedgerError::InvalidInput(
            "no categories configured; add one first".into(),
        ));
    }
    let category_index = Select::with_theme(&*THEME)
        .with_prompt("Category")
        .items(&category_names)
        .default(0)
        .interact()
        .map_err(invalid)?;

    let direction_index = Select::with_theme(&*THEME)
        .with_prompt("Type")
        .items(&["Expense", "Income"])
        .default(0)
        .interact()
        .map_err(invalid)?;
    let direction = if direction_index == 1 {
        FlowDirection::Income
    } else {
        FlowDirection::Expense
    };

    let date_raw: String = Input::with_theme(&*THEME)
        .with_prompt("Date (YYYY-MM-DD)")
        .default(Utc::now().date_naive().to_string())
        .interact_text()
        .map_err(invalid)?;
    let anchor_date = NaiveDate::parse_from_str(date_raw.trim(), "%Y-%m-%d")
        .map_err(|err| LedgerError::InvalidInput(format!("bad date: {}", err)))?;

    let mode_index = Select::with_theme(&*THEME)
        .with_prompt("Recurrence")
        .items(&["Single", "Installments", "Fixed monthly"])
        .default(0)
        .interact()
        .map_err(invalid)?;
    let mode = match mode_index {
        1 => {
            let count: u32 = Input::with_theme(&*THEME)
                .with_prompt("Number of installments")
                .validate_with(|value: &u32| {
                    if (2..=60).contains(value) {
                        Ok(())
                    } else {
                        Err("installments must be between 2 and 60")
                    }
                })
                .interact_text()
                .map_err(invalid)?;
            RecurrenceMode::Installments(count)
        }
        2 => RecurrenceMode::FixedMonthly,
        _ => RecurrenceMode::Single,
    };

    let draft = TransactionDraft {
        description: description.trim().to_string(),
        amount,
        category: category_names[category_index].clone(),
        direction,
        anchor_date,
    };
    let lineage = ledger.record(&draft, mode);
    println!(
        "{} lineage {}",
        "Saved.".green().bold(),
        lineage.to_string().dimmed()
    );
    Ok(())
}

/// Picks the transaction id out of the remaining `delete` arguments.
/// Flags may come before or after the id.
fn parse_delete_id(args: &[&str]) -> Result<u64, LedgerError> {
    args.iter()
        .find(|arg| !arg.starts_with("--"))
        .and_then(|raw| raw.trim_start_matches('#').parse::<u64>().ok())
        .ok_or_else(|| LedgerError::InvalidInput("usage: delete <id> [--series]".into()))
}

fn delete_command(
    ledger: &mut Ledger,
    id: TransactionId,
    whole_series: bool,
) -> Result<(), LedgerError> {
    if whole_series {
        let lineage: LineageId = ledger
            .transaction(id)
            .map(|txn| txn.lineage)
            .ok_or_else(|| LedgerError::InvalidInput(format!("no transaction {}", id)))?;
        let removed = ledger.delete_lineage(lineage);
        println!("Removed {} row(s).", removed);
    } else if ledger.delete_transaction(id) {
        println!("Removed {}.", id);
    } else {
        println!("Nothing to remove.");
    }
    Ok(())
}

fn categories_command(ledger: &mut Ledger, args: &[&str]) -> Result<(), LedgerError> {
    match args.first().copied() {
        None | Some("list") => {
            for category in &ledger.categories {
                println!("{:<16} {}", category.name, category.color.dimmed());
            }
            Ok(())
        }
        Some("add") => {
            let name = args.get(1).ok_or_else(usage_categories)?;
            let color = args.get(2).copied().unwrap_or("#B0B3B8");
            ledger.add_category(Category::new(*name, color))?;
            println!("{}", format!("Category `{}` created.", name).green());
            Ok(())
        }
        Some("rename") => {
            let old = args.get(1).ok_or_else(usage_categories)?;
            let new = args.get(2).ok_or_else(usage_categories)?;
            let cascaded = ledger.rename_category(old, new)?;
            println!(
                "{}",
                format!("Renamed `{}` to `{}` ({} references updated).", old, new, cascaded)
                    .green()
            );
            Ok(())
        }
        Some("remove") => {
            let name = args.get(1).ok_or_else(usage_categories)?;
            ledger.remove_category(name)?;
            println!("Category `{}` removed.", name);
            Ok(())
        }
        Some(_) => Err(usage_categories()),
    }
}

fn usage_categories() -> LedgerError {
    LedgerError::InvalidInput(
        "usage: categories [list | add <name> [color] | rename <old> <new> | remove <name>]".into(),
    )
}

fn goals_command(
    ledger: &mut Ledger,
    args: &[&str],
    options: &DisplayOptions,
) -> Result<(), LedgerError> {
    match args.first().copied() {
        None | Some("list") => {
            let period = Period::from_date(Utc::now().date_naive());
            for status in ledger.goal_report(period) {
                let line = format!(
                    "{:<16} {} / {} ({:.1}%)",
                    status.goal.category,
                    format_amount(status.spent, options),
                    format_amount(status.goal.ceiling, options),
                    status.progress.percent
                );
                if status.progress.over_limit {
                    println!("{}", line.red());
                } else {
                    println!("{}", line);
                }
            }
            Ok(())
        }
        Some("set") => {
            let category = args.get(1).ok_or_else(usage_goals)?;
            let ceiling: f64 = args
                .get(2)
                .and_then(|raw| raw.parse().ok())
                .filter(|value| *value > 0.0)
                .ok_or_else(usage_goals)?;
            match ledger.set_goal(category, ceiling) {
                Ok(()) => println!("{}", format!("Limit set for `{}`.", category).green()),
                Err(LedgerError::DuplicateGoal(_)) => {
                    ledger.update_goal(category, ceiling)?;
                    println!("{}", format!("Limit updated for `{}`.", category).green());
                }
                Err(err) => return Err(err),
            }
            Ok(())
        }
        Some("remove") => {
            let category = args.get(1).ok_or_else(usage_goals)?;
            if ledger.remove_goal(category) {
                println!("Limit removed for `{}`.", category);
            } else {
                println!("No limit set for `{}`.", category);
            }
            Ok(())
        }
        Some(_) => Err(usage_goals()),
    }
}

fn usage_goals() -> LedgerError {
    LedgerError::InvalidInput("usage: goals [list | set <category> <ceiling> | remove <category>]".into())
}
