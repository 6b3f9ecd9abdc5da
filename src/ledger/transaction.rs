use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row identifier assigned by the ledger, monotonically increasing in
/// insertion order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub struct TransactionId(pub u64);

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier shared by every row produced from one add action.
///
/// Rows from different add actions never share a lineage; the v4 collision
/// probability is treated as negligible rather than eliminated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LineageId(pub Uuid);

impl LineageId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for LineageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Whether a transaction adds to or draws from the monthly balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FlowDirection {
    Income,
    Expense,
}

/// How a row came to exist. Replaces the string sentinels ("k/N", fixed
/// markers) that older exports used for installment bookkeeping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrenceKind {
    /// One-off entry.
    Single,
    /// Installment `index` of `total`, both 1-based.
    Installment { index: u32, total: u32 },
    /// One of the twelve rows of a fixed monthly series.
    FixedMonthly,
}

impl RecurrenceKind {
    /// Display marker in the legacy format: nothing for one-offs, `k/N`
    /// for installments, `recurring-fixed` for fixed series.
    pub fn label(&self) -> Option<String> {
        match self {
            RecurrenceKind::Single => None,
            RecurrenceKind::Installment { index, total } => Some(format!("{}/{}", index, total)),
            RecurrenceKind::FixedMonthly => Some("recurring-fixed".into()),
        }
    }

    /// Series rows (anything but one-offs) support whole-lineage deletion.
    pub fn is_series(&self) -> bool {
        !matches!(self, RecurrenceKind::Single)
    }
}

/// A persisted income or expense record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    pub amount: f64,
    /// Category name, by string reference. Renames cascade manually.
    pub category: String,
    pub direction: FlowDirection,
    /// Calendar date supplied by the caller combined with the wall-clock
    /// time of record creation. The time is always "now", even for rows
    /// dated in the future.
    pub occurred_at: NaiveDateTime,
    /// `YYYY-MM` bucket key, derived once from `occurred_at` at insertion.
    pub period_key: String,
    pub lineage: LineageId,
    pub recurrence: RecurrenceKind,
}

/// Renders a datetime's `YYYY-MM` monthly bucket key.
pub fn period_key_for(moment: NaiveDateTime) -> String {
    format!("{:04}-{:02}", moment.year(), moment.month())
}
