use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("kiwi_budget_cli").unwrap();
    cmd.env("KIWI_BUDGET_HOME", home);
    cmd
}

#[test]
fn report_on_a_fresh_home_prints_zero_totals() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .args(["report", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Inflow"))
        .stdout(predicate::str::contains("R$ 0,00"));
}

#[test]
fn hide_flag_masks_amounts() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .args(["report", "2025-01", "--hide"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{2022}\u{2022}\u{2022}\u{2022}"))
        .stdout(predicate::str::contains("R$ 0,00").not());
}

#[test]
fn categories_list_shows_the_default_palette() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("Salary"));
}

#[test]
fn category_rename_cascades_and_persists() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .args(["categories", "rename", "Food", "Groceries"])
        .assert()
        .success();
    cli(dir.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("Food").not());
}

#[test]
fn statement_on_an_empty_month_reports_no_records() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .args(["statement", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));
}

#[test]
fn delete_accepts_the_series_flag_before_the_id() {
    let dir = tempdir().unwrap();
    // The id parses even when the flag comes first; the command then
    // fails on the empty ledger rather than on its own usage check.
    cli(dir.path())
        .args(["delete", "--series", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no transaction"))
        .stderr(predicate::str::contains("usage:").not());
    cli(dir.path())
        .args(["delete", "--series"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("usage: delete"));
}

#[test]
fn unknown_commands_fail_with_usage_hint() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn bad_period_input_is_rejected() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .args(["report", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a period"));
}
