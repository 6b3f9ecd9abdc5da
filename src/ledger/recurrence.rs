use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::transaction::{FlowDirection, LineageId, RecurrenceKind};

/// Fixed monthly series cover one year ahead, by design.
pub const FIXED_MONTHLY_HORIZON: u32 = 12;

/// How many rows one add action produces and how their dates and amounts
/// derive from the intent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrenceMode {
    Single,
    /// Split evenly across N monthly installments, N >= 2.
    Installments(u32),
    /// Repeat the full amount every month for a year.
    FixedMonthly,
}

/// One transaction intent as captured from the caller.
///
/// Preconditions (positive amount, non-empty description, installment count
/// of at least two) are the caller's responsibility; expansion does not
/// re-validate them.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub direction: FlowDirection,
    pub anchor_date: NaiveDate,
}

/// A concrete row produced by expansion, not yet assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedEntry {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub recurrence: RecurrenceKind,
}

/// The ordered output of one expansion call. Every entry shares `lineage`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub lineage: LineageId,
    pub entries: Vec<ExpandedEntry>,
}

/// Turns one transaction intent into the ordered rows it persists as.
pub fn expand(draft: &TransactionDraft, mode: RecurrenceMode) -> Expansion {
    let lineage = LineageId::generate();
    let entries = match mode {
        RecurrenceMode::Single => vec![ExpandedEntry {
            description: draft.description.clone(),
            amount: draft.amount,
            date: draft.anchor_date,
            recurrence: RecurrenceKind::Single,
        }],
        RecurrenceMode::Installments(count) => expand_installments(draft, count),
        RecurrenceMode::FixedMonthly => (0..FIXED_MONTHLY_HORIZON)
            .map(|offset| ExpandedEntry {
                description: draft.description.clone(),
                amount: draft.amount,
                date: shift_months(draft.anchor_date, offset as i32),
                recurrence: RecurrenceKind::FixedMonthly,
            })
            .collect(),
    };
    debug!(
        lineage = %lineage,
        rows = entries.len(),
        "expanded transaction intent"
    );
    Expansion { lineage, entries }
}

/// Splits the amount into integer cents, one share per installment; the
/// last installment absorbs the rounding remainder so the series sums
/// exactly to the original amount.
fn expand_installments(draft: &TransactionDraft, count: u32) -> Vec<ExpandedEntry> {
    let total_cents = to_cents(draft.amount);
    let share_cents = ((total_cents as f64) / (count as f64)).round() as i64;
    (0..count)
        .map(|offset| {
            let index = offset + 1;
            let cents = if index == count {
                total_cents - share_cents * (count as i64 - 1)
            } else {
                share_cents
            };
            ExpandedEntry {
                description: format!("{} ({}/{})", draft.description, index, count),
                amount: from_cents(cents),
                date: shift_months(draft.anchor_date, offset as i32),
                recurrence: RecurrenceKind::Installment {
                    index,
                    total: count,
                },
            }
        })
        .collect()
}

/// Moves a date forward or backward by whole months, clamping the day to
/// the target month's length (Jan 31 + 1mo = Feb 28/29).
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}
