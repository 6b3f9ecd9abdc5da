use chrono::NaiveDate;
use kiwi_budget::errors::LedgerError;
use kiwi_budget::ledger::{FlowDirection, Ledger, RecurrenceMode, TransactionDraft};
use kiwi_budget::storage::{JsonStorage, StorageBackend};
use tempfile::tempdir;

fn expense(category: &str, amount: f64) -> TransactionDraft {
    TransactionDraft {
        description: format!("{} spend", category),
        amount,
        category: category.into(),
        direction: FlowDirection::Expense,
        anchor_date: NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
    }
}

#[test]
fn rename_updates_every_reference_and_no_record_keeps_the_old_name() {
    let mut ledger = Ledger::new("Cascade");
    ledger.record(&expense("Food", 40.0), RecurrenceMode::Single);
    ledger.record(&expense("Food", 25.0), RecurrenceMode::Installments(2));
    ledger.record(&expense("Transport", 15.0), RecurrenceMode::Single);
    ledger.set_goal("Food", 500.0).unwrap();

    let cascaded = ledger.rename_category("Food", "Groceries").unwrap();
    // Three transaction rows plus one goal.
    assert_eq!(cascaded, 4);
    assert!(ledger
        .transactions
        .iter()
        .all(|txn| txn.category != "Food"));
    assert_eq!(
        ledger
            .transactions
            .iter()
            .filter(|txn| txn.category == "Groceries")
            .count(),
        3
    );
    assert!(ledger.goals.iter().all(|goal| goal.category == "Groceries"));
    assert!(ledger.find_category("Food").is_none());
}

#[test]
fn rename_survives_a_save_load_round_trip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::new(Some(dir.path().to_path_buf())).unwrap();

    let mut ledger = Ledger::new("Cascade");
    ledger.record(&expense("Food", 40.0), RecurrenceMode::Single);
    ledger.set_goal("Food", 500.0).unwrap();
    ledger.rename_category("Food", "Groceries").unwrap();
    storage.save(&ledger, "cascade").unwrap();

    let loaded = storage.load("cascade").unwrap();
    assert_eq!(loaded.transactions[0].category, "Groceries");
    assert_eq!(loaded.goals[0].category, "Groceries");
    assert!(loaded.find_category("Groceries").is_some());
}

#[test]
fn rename_of_missing_category_reports_unknown() {
    let mut ledger = Ledger::new("Cascade");
    let err = ledger.rename_category("Yachts", "Boats").unwrap_err();
    assert!(matches!(err, LedgerError::UnknownCategory(_)));
}

#[test]
fn removal_leaves_transactions_with_their_string_reference() {
    let mut ledger = Ledger::new("Cascade");
    ledger.record(&expense("Food", 40.0), RecurrenceMode::Single);
    ledger.remove_category("Food").unwrap();
    // No foreign key: the row keeps its (now dangling) name.
    assert_eq!(ledger.transactions[0].category, "Food");
    assert!(ledger.find_category("Food").is_none());
}
