use serde::{Deserialize, Serialize};

/// A monthly spending ceiling for a specific category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Category name, by string reference. One goal per category.
    pub category: String,
    /// Monthly ceiling. Always positive by construction.
    pub ceiling: f64,
}

impl Goal {
    pub fn new(category: impl Into<String>, ceiling: f64) -> Self {
        Self {
            category: category.into(),
            ceiling,
        }
    }
}

/// Utilization of a goal's ceiling for one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    /// `spent / ceiling` clamped to `[0, 1]`, for progress bars.
    pub ratio: f64,
    /// Unclamped `spent / ceiling * 100`; exceeds 100 on overage.
    pub percent: f64,
    pub over_limit: bool,
}

impl GoalProgress {
    /// Evaluates spending against a ceiling.
    ///
    /// A non-positive ceiling violates the construction invariant and
    /// fails fast instead of producing infinity.
    pub fn evaluate(ceiling: f64, spent: f64) -> Self {
        assert!(ceiling > 0.0, "goal ceiling must be positive");
        let raw = spent / ceiling;
        Self {
            ratio: raw.clamp(0.0, 1.0),
            percent: raw * 100.0,
            over_limit: spent > ceiling,
        }
    }
}

/// A goal joined with the aggregated spending of the active period.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalStatus {
    pub goal: Goal,
    pub spent: f64,
    pub progress: GoalProgress,
}
