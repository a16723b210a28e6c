use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("repay").arg("tests/fixtures/debts.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "months,monthly_payment,total_paid,total_interest_paid,priority",
        ))
        .stdout(predicate::str::contains("41,210.00,7000.00,1260.94,card"));

    Ok(())
}

#[test]
fn test_cli_extra_payment() {
    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.args(["repay", "tests/fixtures/debts.csv", "--extra", "100"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("26,210.00,7000.00,1053.09,card"));
}

#[test]
fn test_cli_json_output() {
    let output = Command::new(cargo_bin!("debtplan"))
        .args(["--format", "json", "repay", "tests/fixtures/debts.csv"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["months"], 41);
    assert_eq!(value["total_interest_paid"], "1260.94");
    assert_eq!(value["priority"], "card");
}

#[test]
fn test_cli_priority() {
    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.args(["priority", "tests/fixtures/debts.csv"]);

    cmd.assert().success().stdout("priority\ncard\n");
}

#[test]
fn test_cli_budget() {
    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.args(["budget", "tests/fixtures/expenses.csv", "--budget", "3000"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("item,amount\n"))
        .stdout(predicate::str::contains("Rent,1200\n"))
        .stdout(predicate::str::contains("Groceries,250\n"))
        .stdout(predicate::str::contains("Spend,1680\n"))
        .stdout(predicate::str::contains("Saved/Invested,500\n"))
        .stdout(predicate::str::contains("Available,1320\n"))
        .stdout(predicate::str::ends_with("Total,650\n"));
}
