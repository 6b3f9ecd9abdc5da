use serde::{Deserialize, Serialize};

/// Categorises ledger activity for reporting and spending goals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique name (compared case-insensitively on the trimmed form).
    pub name: String,
    /// Display hint, opaque to the core.
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Category names are equal when their trimmed forms match
/// case-insensitively. Every lookup, cascade, and join uses this one
/// comparison so no path accepts a name another path then misses.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Starter palette installed into freshly created ledgers.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Food", "#FF5733"),
        Category::new("Transport", "#33FF57"),
        Category::new("Housing", "#3357FF"),
        Category::new("Leisure", "#FF33A8"),
        Category::new("Health", "#33FFF5"),
        Category::new("Salary", "#A3E635"),
        Category::new("Other", "#B0B3B8"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_comparison_ignores_case_and_padding() {
        assert!(same_name("Food", "food"));
        assert!(same_name("  Food ", "FOOD"));
        assert!(!same_name("Food", "Transport"));
    }
}
