use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledgerbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledgerbook").unwrap();
    cmd.env("LEDGERBOOK_DATA_DIR", dir.path())
        .env("RUST_LOG", "off");
    cmd
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%d/%m/%Y").to_string()
}

fn add(dir: &TempDir, description: &str, amount: &str, kind: &str, date: &str) {
    ledgerbook(dir)
        .args(["transaction", "add", description, amount, "--type", kind, "--date", date])
        .assert()
        .success();
}

#[test]
fn init_reports_defaults() {
    let dir = TempDir::new().unwrap();
    ledgerbook(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized Ledgerbook"))
        .stdout(predicate::str::contains("Currency:     €"))
        .stdout(predicate::str::contains("Language:     en"));

    ledgerbook(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already initialized"));
}

#[test]
fn added_transactions_show_in_current_month() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Salary", "3000", "income", &today());
    add(&dir, "Groceries", "42,50", "expense", &today());

    ledgerbook(&dir)
        .args(["transaction", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("-€42.50"))
        .stdout(predicate::str::contains("Showing 2 transactions"));

    ledgerbook(&dir)
        .args(["transaction", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€2957.50"));
}

#[test]
fn invalid_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    ledgerbook(&dir)
        .args(["transaction", "add", "Nothing", "0", "--date", &today()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be a number greater than zero"));

    ledgerbook(&dir)
        .args(["transaction", "add", "Bad date", "5", "--date", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected dd/mm/yyyy"));
}

#[test]
fn oversized_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    for _ in 0..2 {
        ledgerbook(&dir)
            .args(["transaction", "add", "Big", "79228162514264337593543950335"])
            .args(["--type", "income", "--date", &today()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Amount must not exceed"));
    }

    add(&dir, "Estate", "1000000000000000", "income", &today());
    add(&dir, "Estate", "1000000000000000", "income", &today());
    ledgerbook(&dir)
        .args(["transaction", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("€2000000000000000.00"));
}

#[test]
fn delete_requires_force() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Coffee", "3", "expense", &today());

    ledgerbook(&dir)
        .args(["transaction", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));

    ledgerbook(&dir)
        .args(["transaction", "delete", "1", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction: 1"));

    ledgerbook(&dir)
        .args(["transaction", "delete", "1", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found: 1"));
}

#[test]
fn archive_lists_and_exports() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Salary", "3000", "income", "01/07/2024");
    add(&dir, "Rent", "1000", "expense", "15/07/2024");
    add(&dir, "Books", "20", "expense", "30/11/2023");

    ledgerbook(&dir)
        .args(["archive", "years"])
        .assert()
        .success()
        .stdout("2023\n2024\n");

    ledgerbook(&dir)
        .args(["archive", "show", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("July (07)"))
        .stdout(predicate::str::contains("Books").not());

    let out = TempDir::new().unwrap();
    ledgerbook(&dir)
        .args(["archive", "export", "--year", "2024", "--month", "7", "--name", "Jane Doe"])
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("archive_2024_M07.json"))
        .stdout(predicate::str::contains("a PDF engine renders it as archive_2024_M07.pdf"));

    let written = std::fs::read(out.path().join("archive_2024_M07.json")).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&written).unwrap();
    assert_eq!(value["pageSize"], "A4");
    assert_eq!(value["content"][0]["text"], "July 2024");
    assert!(String::from_utf8(written).unwrap().contains("Jane Doe"));
}

#[test]
fn settings_change_output() {
    let dir = TempDir::new().unwrap();
    ledgerbook(&dir)
        .args(["settings", "currency", "$"])
        .assert()
        .success();
    ledgerbook(&dir)
        .args(["settings", "date-format", "yyyy-mm-dd"])
        .assert()
        .success();
    ledgerbook(&dir)
        .args(["settings", "language", "de"])
        .assert()
        .success();

    ledgerbook(&dir)
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$"))
        .stdout(predicate::str::contains("JJJJ-MM-TT"))
        .stdout(predicate::str::contains("Deutsch").or(predicate::str::contains("(de)")));

    ledgerbook(&dir)
        .args(["settings", "language", "fr"])
        .assert()
        .failure();
}

#[test]
fn notes_round_trip() {
    let dir = TempDir::new().unwrap();
    ledgerbook(&dir)
        .args(["note", "add", "Call the bank"])
        .assert()
        .success();

    ledgerbook(&dir)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Call the bank"));

    ledgerbook(&dir)
        .args(["note", "add", "   "])
        .assert()
        .failure();
}

#[test]
fn exports_transactions_csv() {
    let dir = TempDir::new().unwrap();
    add(&dir, "Dinner, with friends", "42.50", "expense", "01/02/2024");

    let out = dir.path().join("ledger.csv");
    ledgerbook(&dir)
        .args(["export", "transactions"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 transactions"));

    let text = std::fs::read_to_string(out).unwrap();
    assert!(text.starts_with("ID,Date,Description,Type,Amount\n"));
    assert!(text.contains("1,01/02/2024,\"Dinner, with friends\",expense,-42.50"));
}
