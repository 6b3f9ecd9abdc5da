//! Ledger domain models and the tracker's core logic: recurrence
//! expansion, lineage deletion, and monthly aggregation.

pub mod category;
pub mod goal;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod recurrence;
pub mod report;
pub mod transaction;

pub use category::{default_categories, Category};
pub use goal::{Goal, GoalProgress, GoalStatus};
pub use ledger::Ledger;
pub use recurrence::{
    expand, shift_months, ExpandedEntry, Expansion, RecurrenceMode, TransactionDraft,
    FIXED_MONTHLY_HORIZON,
};
pub use report::{statement, CategoryOutflow, MonthlySummary, Period};
pub use transaction::{
    period_key_for, FlowDirection, LineageId, RecurrenceKind, Transaction, TransactionId,
};
