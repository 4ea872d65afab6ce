use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn bankvault(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bankvault").unwrap();
    cmd.arg("--data-dir")
        .arg(dir)
        .env_remove("BANKVAULT_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn create_account(dir: &Path, holder: &str, balance: &str) {
    bankvault(dir)
        .args(["account", "create", holder, "--balance", balance])
        .assert()
        .success();
}

#[test]
fn create_and_list_accounts() {
    let dir = TempDir::new().unwrap();

    bankvault(dir.path())
        .args(["account", "create", "Alice", "--balance", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created account: 10000000"))
        .stdout(predicate::str::contains("$100.00"));
    create_account(dir.path(), "Bob", "20");

    bankvault(dir.path())
        .args(["account", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("10000001"))
        .stdout(predicate::str::contains("$120.00"));

    assert!(dir.path().join("secret.key").exists());
    assert!(dir.path().join("data").join("ledger.json").exists());
}

#[test]
fn ledger_file_is_encrypted() {
    let dir = TempDir::new().unwrap();
    create_account(dir.path(), "Alice Plaintext", "42.00");

    let contents = fs::read_to_string(dir.path().join("data").join("ledger.json")).unwrap();
    assert!(contents.contains("\"ciphertext\""));
    assert!(!contents.contains("Alice Plaintext"));
}

#[test]
fn deposit_withdraw_and_transfer() {
    let dir = TempDir::new().unwrap();
    create_account(dir.path(), "Alice", "100");
    create_account(dir.path(), "Bob", "20");

    bankvault(dir.path())
        .args(["deposit", "10000000", "50.25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New balance: $150.25"));

    bankvault(dir.path())
        .args(["withdraw", "10000000", "0.25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New balance: $150.00"));

    bankvault(dir.path())
        .args(["transfer", "10000000", "10000001", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("new balance $120.00"))
        .stdout(predicate::str::contains("new balance $50.00"));

    bankvault(dir.path())
        .args(["account", "show", "10000001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$50.00"))
        .stdout(predicate::str::contains("Transactions: 2"));
}

#[test]
fn insufficient_funds_fails_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    create_account(dir.path(), "Alice", "50");

    bankvault(dir.path())
        .args(["withdraw", "10000000", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Insufficient funds"));

    bankvault(dir.path())
        .args(["account", "show", "10000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$50.00"));
}

#[test]
fn invalid_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    create_account(dir.path(), "Alice", "50");

    bankvault(dir.path())
        .args(["deposit", "10000000", "1.005"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));

    bankvault(dir.path())
        .args(["deposit", "99999999", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Account not found: 99999999"));

    bankvault(dir.path())
        .args(["transfer", "10000000", "10000000", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("to itself"));
}

#[test]
fn receipt_and_history() {
    let dir = TempDir::new().unwrap();
    create_account(dir.path(), "Alice", "0");
    for amount in ["1", "2", "3", "4", "5", "6", "7"] {
        bankvault(dir.path())
            .args(["deposit", "10000000", amount])
            .assert()
            .success();
    }

    let receipt = bankvault(dir.path())
        .args(["receipt", "10000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account Holder: Alice"))
        .stdout(predicate::str::contains("Balance: $28.00"))
        .get_output()
        .stdout
        .clone();
    let receipt = String::from_utf8(receipt).unwrap();
    assert_eq!(receipt.lines().filter(|l| l.starts_with("- ")).count(), 5);

    let short = bankvault(dir.path())
        .args(["receipt", "10000000", "--limit", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let short = String::from_utf8(short).unwrap();
    assert_eq!(short.lines().filter(|l| l.starts_with("- ")).count(), 2);

    bankvault(dir.path())
        .args(["history", "10000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transactions: 7"));
}

#[test]
fn export_statement_to_file() {
    let dir = TempDir::new().unwrap();
    create_account(dir.path(), "Alice", "10");
    let output = dir.path().join("statement.csv");

    bankvault(dir.path())
        .args(["export", "10000000", "--output"])
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.starts_with("ID,Timestamp,Type"));
    assert!(csv.contains(",Deposit,,10.00,10.00,10.00"));

    bankvault(dir.path())
        .args(["export", "10000000", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"holder_name\": \"Alice\""));
}

#[test]
fn corrupted_ledger_is_fatal() {
    let dir = TempDir::new().unwrap();
    create_account(dir.path(), "Alice", "10");

    let ledger_path = dir.path().join("data").join("ledger.json");
    let mut bytes = fs::read(&ledger_path).unwrap();
    let middle = bytes.len() / 2;
    bytes[middle] ^= 0x01;
    fs::write(&ledger_path, &bytes).unwrap();

    bankvault(dir.path())
        .args(["account", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not load the ledger"))
        .stderr(predicate::str::contains("the file was left untouched"));

    // The damaged file is left as it was
    assert_eq!(fs::read(&ledger_path).unwrap(), bytes);
}

#[test]
fn wrong_length_key_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("secret.key"), b"too short").unwrap();

    bankvault(dir.path())
        .args(["account", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Encryption key unavailable"));
}

#[test]
fn interactive_shell_session() {
    let dir = TempDir::new().unwrap();

    bankvault(dir.path())
        .write_stdin("1\nAlice\n2\n10000000\n25\n5\n10000000\n7\n6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Account created successfully. Account Number: 10000000",
        ))
        .stdout(predicate::str::contains("$25.00 has been deposited"))
        .stdout(predicate::str::contains("Transaction Receipt"))
        .stdout(predicate::str::contains("Invalid choice"))
        .stdout(predicate::str::contains("Goodbye!"));

    bankvault(dir.path())
        .args(["account", "show", "10000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$25.00"));
}

#[test]
fn data_dir_from_environment() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("bankvault")
        .unwrap()
        .env("BANKVAULT_DATA_DIR", dir.path())
        .args(["account", "create", "Carol"])
        .assert()
        .success();

    assert!(dir.path().join("secret.key").exists());
}

#[test]
fn config_does_not_create_files() {
    let dir = TempDir::new().unwrap();

    bankvault(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("secret.key"))
        .stdout(predicate::str::contains("Receipt limit:   5"));

    assert!(!dir.path().join("secret.key").exists());
}
