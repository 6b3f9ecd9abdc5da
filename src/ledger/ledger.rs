use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::LedgerError;

use super::{
    category::{default_categories, same_name, Category},
    goal::{Goal, GoalProgress, GoalStatus},
    recurrence::{expand, RecurrenceMode, TransactionDraft},
    report::{statement, MonthlySummary, Period},
    transaction::{period_key_for, LineageId, Transaction, TransactionId},
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The flat transaction log plus its category and goal configuration.
///
/// All access is serialized through `&mut self`; there is no background
/// processing and no concurrent-writer coordination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    next_transaction_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    /// Creates an empty ledger seeded with the default category palette.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            categories: default_categories(),
            goals: Vec::new(),
            transactions: Vec::new(),
            next_transaction_id: 0,
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    // ---- transactions -----------------------------------------------------

    /// Expands one transaction intent and appends every resulting row.
    ///
    /// The batch is built fully before anything is inserted, so the log
    /// never holds a partial lineage. Returns the shared lineage id.
    pub fn record(&mut self, draft: &TransactionDraft, mode: RecurrenceMode) -> LineageId {
        let expansion = expand(draft, mode);
        // Rows keep the caller's calendar date but stamp the wall-clock
        // time of creation, even when the date lies in the future.
        let clock = Utc::now().time();
        let rows: Vec<Transaction> = expansion
            .entries
            .into_iter()
            .map(|entry| {
                let occurred_at = entry.date.and_time(clock);
                Transaction {
                    id: self.next_id(),
                    description: entry.description,
                    amount: entry.amount,
                    category: draft.category.clone(),
                    direction: draft.direction,
                    occurred_at,
                    period_key: period_key_for(occurred_at),
                    lineage: expansion.lineage,
                    recurrence: entry.recurrence,
                }
            })
            .collect();
        info!(
            lineage = %expansion.lineage,
            rows = rows.len(),
            category = %draft.category,
            "recorded transaction batch"
        );
        self.transactions.extend(rows);
        self.touch();
        expansion.lineage
    }

    /// Removes at most one row. A missing id is a no-op, not an error.
    pub fn delete_transaction(&mut self, id: TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            info!(%id, "deleted transaction");
            self.touch();
        }
        removed
    }

    /// Removes every row sharing the lineage, returning how many were
    /// deleted. Zero matches is a no-op.
    pub fn delete_lineage(&mut self, lineage: LineageId) -> usize {
        let before = self.transactions.len();
        self.transactions.retain(|txn| txn.lineage != lineage);
        let removed = before - self.transactions.len();
        if removed > 0 {
            info!(%lineage, rows = removed, "deleted lineage");
            self.touch();
        }
        removed
    }

    /// Empties the transaction log, keeping categories and goals.
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
        self.touch();
    }

    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    // ---- categories -------------------------------------------------------

    pub fn add_category(&mut self, category: Category) -> Result<(), LedgerError> {
        if self.find_category(&category.name).is_some() {
            return Err(LedgerError::DuplicateCategory(category.name));
        }
        self.categories.push(category);
        self.touch();
        Ok(())
    }

    /// Renames a category and cascades the new name into every transaction
    /// and goal that references the old one. The cascade happens in one
    /// exclusive pass, so an in-memory ledger is never half-renamed.
    /// Returns how many references were updated.
    pub fn rename_category(&mut self, old: &str, new: &str) -> Result<usize, LedgerError> {
        let position = self
            .category_position(old)
            .ok_or_else(|| LedgerError::UnknownCategory(old.to_string()))?;
        let clashes = self
            .find_category(new)
            .map(|existing| !same_name(&existing.name, old))
            .unwrap_or(false);
        if clashes {
            return Err(LedgerError::DuplicateCategory(new.to_string()));
        }

        self.categories[position].name = new.to_string();
        // References match by the same rule as the lookup above, so a
        // caller-supplied case variant still finds every row and goal.
        let mut cascaded = 0;
        for txn in self
            .transactions
            .iter_mut()
            .filter(|txn| same_name(&txn.category, old))
        {
            txn.category = new.to_string();
            cascaded += 1;
        }
        for goal in self
            .goals
            .iter_mut()
            .filter(|goal| same_name(&goal.category, old))
        {
            goal.category = new.to_string();
            cascaded += 1;
        }
        info!(%old, %new, references = cascaded, "renamed category");
        self.touch();
        Ok(cascaded)
    }

    pub fn recolor_category(&mut self, name: &str, color: &str) -> Result<(), LedgerError> {
        let position = self
            .category_position(name)
            .ok_or_else(|| LedgerError::UnknownCategory(name.to_string()))?;
        self.categories[position].color = color.to_string();
        self.touch();
        Ok(())
    }

    /// Drops the category entry. Transactions keep their (now dangling)
    /// string reference; there is no enforced foreign key.
    pub fn remove_category(&mut self, name: &str) -> Result<(), LedgerError> {
        let position = self
            .category_position(name)
            .ok_or_else(|| LedgerError::UnknownCategory(name.to_string()))?;
        self.categories.remove(position);
        self.touch();
        Ok(())
    }

    pub fn find_category(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|category| same_name(&category.name, name))
    }

    fn category_position(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|category| same_name(&category.name, name))
    }

    // ---- goals ------------------------------------------------------------

    /// Stores the goal under the category's canonical name, whatever
    /// spelling the caller used, so the spending join always lands.
    pub fn set_goal(&mut self, category: &str, ceiling: f64) -> Result<(), LedgerError> {
        let canonical = self
            .find_category(category)
            .map(|category| category.name.clone())
            .ok_or_else(|| LedgerError::UnknownCategory(category.to_string()))?;
        if self
            .goals
            .iter()
            .any(|goal| same_name(&goal.category, &canonical))
        {
            return Err(LedgerError::DuplicateGoal(canonical));
        }
        self.goals.push(Goal::new(canonical, ceiling));
        self.touch();
        Ok(())
    }

    pub fn update_goal(&mut self, category: &str, ceiling: f64) -> Result<(), LedgerError> {
        let goal = self
            .goals
            .iter_mut()
            .find(|goal| same_name(&goal.category, category))
            .ok_or_else(|| LedgerError::UnknownCategory(category.to_string()))?;
        goal.ceiling = ceiling;
        self.touch();
        Ok(())
    }

    pub fn remove_goal(&mut self, category: &str) -> bool {
        let before = self.goals.len();
        self.goals.retain(|goal| !same_name(&goal.category, category));
        let removed = self.goals.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    // ---- reporting --------------------------------------------------------

    pub fn summarize(&self, period: Period) -> MonthlySummary {
        MonthlySummary::for_period(&self.transactions, period)
    }

    pub fn statement(&self, period: Period) -> Vec<&Transaction> {
        statement(&self.transactions, period)
    }

    /// Every goal joined with the period's spending in its category.
    pub fn goal_report(&self, period: Period) -> Vec<GoalStatus> {
        let summary = self.summarize(period);
        self.goals
            .iter()
            .map(|goal| {
                let spent = summary.outflow_for(&goal.category);
                GoalStatus {
                    goal: goal.clone(),
                    spent,
                    progress: GoalProgress::evaluate(goal.ceiling, spent),
                }
            })
            .collect()
    }

    // ---- bookkeeping ------------------------------------------------------

    /// Deterministic demo content: one salary plus a spread of expenses in
    /// the month of `today`, and a sample goal.
    pub fn seed_sample(&mut self, today: NaiveDate) {
        use crate::ledger::transaction::FlowDirection;

        let salary = TransactionDraft {
            description: "Salary".into(),
            amount: 4500.0,
            category: "Salary".into(),
            direction: FlowDirection::Income,
            anchor_date: today,
        };
        self.record(&salary, RecurrenceMode::Single);

        let spread: &[(&str, &str, f64, u32)] = &[
            ("Groceries", "Food", 320.0, 3),
            ("Restaurant", "Food", 140.0, 12),
            ("Bus pass", "Transport", 90.0, 2),
            ("Fuel", "Transport", 180.0, 17),
            ("Rent", "Housing", 1200.0, 5),
            ("Cinema", "Leisure", 60.0, 20),
            ("Pharmacy", "Health", 75.0, 9),
        ];
        for (description, category, amount, day) in spread {
            let date = today.with_day(*day).unwrap_or(today);
            let draft = TransactionDraft {
                description: (*description).into(),
                amount: *amount,
                category: (*category).into(),
                direction: FlowDirection::Expense,
                anchor_date: date,
            };
            self.record(&draft, RecurrenceMode::Single);
        }

        if !self.goals.iter().any(|goal| goal.category == "Food") {
            let _ = self.set_goal("Food", 1000.0);
        }
    }

    /// Repairs counters after deserialization so ids stay monotonic even
    /// across files written by older builds.
    pub fn restore_invariants(&mut self) {
        let max_id = self
            .transactions
            .iter()
            .map(|txn| txn.id.0)
            .max()
            .unwrap_or(0);
        self.next_transaction_id = self.next_transaction_id.max(max_id);
    }

    fn next_id(&mut self) -> TransactionId {
        self.next_transaction_id += 1;
        TransactionId(self.next_transaction_id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
