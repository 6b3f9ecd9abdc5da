use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::errors::LedgerError;

use super::category::same_name;
use super::transaction::{FlowDirection, Transaction};

/// A calendar year + month, the bucket every monthly view is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, LedgerError> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::InvalidInput(format!(
                "month {} out of range 1..=12",
                month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The `YYYY-MM` key transactions are bucketed under.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Parses user input in `YYYY-MM` form.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let invalid =
            || LedgerError::InvalidInput(format!("expected a period like 2025-03, got `{}`", raw));
        let (year_part, month_part) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    /// Human-readable form, e.g. "March 2025".
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|date| date.format("%B %Y").to_string())
            .unwrap_or_else(|| self.key())
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

/// Total Expense amount for one category within a period.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOutflow {
    pub category: String,
    pub total: f64,
}

/// Aggregated view of one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub period: Period,
    pub inflow: f64,
    pub outflow: f64,
    pub net: f64,
    /// Expense totals per category, ranked descending by amount. Equal
    /// totals keep alphabetical category order, so the ranking is
    /// deterministic.
    pub category_outflow: Vec<CategoryOutflow>,
}

impl MonthlySummary {
    /// Rolls the flat transaction log up into one month's totals. An empty
    /// log or a month with no rows yields zero totals and an empty ranking.
    pub fn for_period(transactions: &[Transaction], period: Period) -> Self {
        let key = period.key();
        let mut inflow = 0.0;
        let mut outflow = 0.0;
        let mut per_category: BTreeMap<&str, f64> = BTreeMap::new();

        for txn in transactions.iter().filter(|txn| txn.period_key == key) {
            match txn.direction {
                FlowDirection::Income => inflow += txn.amount,
                FlowDirection::Expense => {
                    outflow += txn.amount;
                    *per_category.entry(txn.category.as_str()).or_default() += txn.amount;
                }
            }
        }

        let mut category_outflow: Vec<CategoryOutflow> = per_category
            .into_iter()
            .map(|(category, total)| CategoryOutflow {
                category: category.to_string(),
                total,
            })
            .collect();
        // The map iterates alphabetically; the stable sort preserves that
        // order for ties.
        category_outflow.sort_by(|a, b| b.total.total_cmp(&a.total));

        Self {
            period,
            inflow,
            outflow,
            net: inflow - outflow,
            category_outflow,
        }
    }

    /// Expense total for one category in this summary, zero when absent.
    /// Matches by the shared category-name rule, so "food" finds "Food";
    /// rows stored under distinct case variants are summed together.
    pub fn outflow_for(&self, category: &str) -> f64 {
        self.category_outflow
            .iter()
            .filter(|entry| same_name(&entry.category, category))
            .map(|entry| entry.total)
            .sum()
    }
}

/// The period's rows sorted newest first, for statement rendering.
pub fn statement<'a>(transactions: &'a [Transaction], period: Period) -> Vec<&'a Transaction> {
    let key = period.key();
    let mut rows: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| txn.period_key == key)
        .collect();
    rows.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at).then(b.id.cmp(&a.id)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::{
        period_key_for, LineageId, RecurrenceKind, Transaction, TransactionId,
    };

    fn row(id: u64, direction: FlowDirection, amount: f64, category: &str, day: u32) -> Transaction {
        let occurred_at = NaiveDate::from_ymd_opt(2025, 7, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Transaction {
            id: TransactionId(id),
            description: format!("row {}", id),
            amount,
            category: category.into(),
            direction,
            occurred_at,
            period_key: period_key_for(occurred_at),
            lineage: LineageId::generate(),
            recurrence: RecurrenceKind::Single,
        }
    }

    #[test]
    fn empty_log_yields_zero_totals() {
        let summary = MonthlySummary::for_period(&[], Period::new(2025, 7).unwrap());
        assert_eq!(summary.inflow, 0.0);
        assert_eq!(summary.outflow, 0.0);
        assert_eq!(summary.net, 0.0);
        assert!(summary.category_outflow.is_empty());
    }

    #[test]
    fn totals_split_by_direction() {
        let log = vec![
            row(1, FlowDirection::Income, 4500.0, "Salary", 1),
            row(2, FlowDirection::Expense, 300.0, "Food", 5),
            row(3, FlowDirection::Expense, 200.0, "Transport", 9),
        ];
        let summary = MonthlySummary::for_period(&log, Period::new(2025, 7).unwrap());
        assert_eq!(summary.inflow, 4500.0);
        assert_eq!(summary.outflow, 500.0);
        assert_eq!(summary.net, 4000.0);
        let ranked: f64 = summary.category_outflow.iter().map(|c| c.total).sum();
        assert_eq!(ranked, 500.0);
    }

    #[test]
    fn rows_outside_the_period_are_ignored() {
        let mut other_month = row(4, FlowDirection::Expense, 999.0, "Food", 1);
        other_month.occurred_at = NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        other_month.period_key = period_key_for(other_month.occurred_at);
        let log = vec![row(1, FlowDirection::Expense, 50.0, "Food", 2), other_month];
        let summary = MonthlySummary::for_period(&log, Period::new(2025, 7).unwrap());
        assert_eq!(summary.outflow, 50.0);
    }

    #[test]
    fn ranking_is_descending_with_alphabetical_ties() {
        let log = vec![
            row(1, FlowDirection::Expense, 100.0, "Transport", 1),
            row(2, FlowDirection::Expense, 250.0, "Food", 2),
            row(3, FlowDirection::Expense, 100.0, "Leisure", 3),
        ];
        let summary = MonthlySummary::for_period(&log, Period::new(2025, 7).unwrap());
        let names: Vec<&str> = summary
            .category_outflow
            .iter()
            .map(|entry| entry.category.as_str())
            .collect();
        assert_eq!(names, vec!["Food", "Leisure", "Transport"]);
    }

    #[test]
    fn outflow_lookup_ignores_name_case() {
        let log = vec![
            row(1, FlowDirection::Expense, 120.0, "Food", 2),
            row(2, FlowDirection::Expense, 80.0, "food", 4),
        ];
        let summary = MonthlySummary::for_period(&log, Period::new(2025, 7).unwrap());
        assert_eq!(summary.outflow_for("FOOD"), 200.0);
        assert_eq!(summary.outflow_for("Transport"), 0.0);
    }

    #[test]
    fn statement_sorts_newest_first() {
        let log = vec![
            row(1, FlowDirection::Expense, 10.0, "Food", 3),
            row(2, FlowDirection::Expense, 20.0, "Food", 10),
            row(3, FlowDirection::Income, 30.0, "Salary", 10),
        ];
        let rows = statement(&log, Period::new(2025, 7).unwrap());
        let ids: Vec<u64> = rows.iter().map(|txn| txn.id.0).collect();
        // Same-day rows fall back to id order, newest insertion first.
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn period_parse_accepts_key_form() {
        let period = Period::parse("2025-03").unwrap();
        assert_eq!(period, Period::new(2025, 3).unwrap());
        assert_eq!(period.key(), "2025-03");
        assert!(Period::parse("2025-13").is_err());
        assert!(Period::parse("soon").is_err());
    }
}
