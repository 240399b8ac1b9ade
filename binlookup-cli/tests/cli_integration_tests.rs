//! Integration tests for binlookup CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const DATASET: &str = "\
BIN,Brand,Type,Category,Issuer,IssuerPhone,IssuerUrl,isoCode2,isoCode3,CountryName
400000,VISA,DEBIT,CLASSIC,EXAMPLE BANK,+1 555 0100,www.example.com,US,USA,UNITED STATES
510000,MASTERCARD,CREDIT,GOLD,\"BANK, LTD\",,,GB,GBR,UNITED KINGDOM
520000,MASTERCARD,DEBIT,STANDARD,OTHER BANK,,,GB,GBR,UNITED KINGDOM
";

fn dataset_file(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", contents).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Test the version command
#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("binlookup"));
}

/// Test the help command
#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bank Identification Number"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("lookup"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("inspect"));
}

/// Test check with a well-formed BIN
#[test]
fn test_check_valid() {
    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("check")
        .arg("400000")
        .assert()
        .success()
        .stdout(predicate::str::contains("400000 is a valid BIN"));
}

/// Test check with malformed BINs
#[test]
fn test_check_invalid() {
    for bin in ["abc123", "12345", "12345678901234567"] {
        let mut cmd = Command::cargo_bin("binlookup").unwrap();
        cmd.arg("check")
            .arg(bin)
            .assert()
            .failure()
            .stdout(predicate::str::contains("Invalid BIN"));
    }
}

/// Test check without a BIN argument
#[test]
fn test_check_missing_argument() {
    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

/// Test lookup against a local dataset, text output
#[test]
fn test_lookup_found_text() {
    let file = dataset_file(DATASET);

    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("lookup")
        .arg("400000")
        .arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("BIN Found"))
        .stdout(predicate::str::contains("VISA"))
        .stdout(predicate::str::contains("EXAMPLE BANK"))
        .stdout(predicate::str::contains("UNITED STATES"));
}

/// Test lookup JSON output matches the HTTP envelope
#[test]
fn test_lookup_found_json() {
    let file = dataset_file(DATASET);

    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    let output = cmd
        .arg("lookup")
        .arg("510000")
        .arg("--file")
        .arg(file.path())
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["result"], true);
    assert_eq!(json["message"], "BIN Found");
    assert_eq!(json["data"]["bin"], 510000);
    assert_eq!(json["data"]["vendor"], "MASTERCARD");
    assert_eq!(json["data"]["issuer"], "BANK, LTD");
    assert_eq!(json["data"]["isoCode3"], "GBR");
}

/// Test lookup of an absent BIN
#[test]
fn test_lookup_not_found() {
    let file = dataset_file(DATASET);

    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("lookup")
        .arg("999999")
        .arg("--file")
        .arg(file.path())
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("BIN Not Found"))
        .stdout(predicate::str::contains("null"));
}

/// Invalid BINs are rejected before the dataset is read
#[test]
fn test_lookup_invalid_bin() {
    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("lookup")
        .arg("abc123")
        .arg("--file")
        .arg("/nonexistent/bins.csv")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid BIN"));
}

/// Unreadable dataset maps to the fetch error envelope
#[test]
fn test_lookup_missing_file() {
    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("lookup")
        .arg("400000")
        .arg("--file")
        .arg("/nonexistent/bins.csv")
        .arg("--format")
        .arg("json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error fetching BIN data"));
}

/// Malformed dataset maps to the fetch error envelope
#[test]
fn test_lookup_malformed_dataset() {
    let file = dataset_file("BIN,Brand\n400000,VISA\n");

    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("lookup")
        .arg("400000")
        .arg("--file")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Error fetching BIN data"))
        .stdout(predicate::str::contains("missing column Type"));
}

/// A short row does not hide the rows around it
#[test]
fn test_lookup_with_short_row() {
    let file = dataset_file(&format!("{}999998,VISA,DEBIT\n", DATASET));

    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("lookup")
        .arg("400000")
        .arg("--file")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("BIN Found"))
        .stdout(predicate::str::contains("EXAMPLE BANK"));
}

/// Only a successful lookup gets the check mark
#[test]
fn test_lookup_failure_has_no_check_mark() {
    let file = dataset_file(DATASET);

    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("lookup")
        .arg("999999")
        .arg("--file")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Total time"))
        .stdout(predicate::str::contains("✓").not());
}

/// --file and --dataset-url are mutually exclusive
#[test]
fn test_lookup_conflicting_sources() {
    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("lookup")
        .arg("400000")
        .arg("--file")
        .arg("bins.csv")
        .arg("--dataset-url")
        .arg("http://localhost/bins.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

/// Test inspect with a valid dataset
#[test]
fn test_inspect_valid() {
    let file = dataset_file(DATASET);

    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("inspect")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dataset is valid"))
        .stdout(predicate::str::contains("Rows: 3"))
        .stdout(predicate::str::contains("Brands: 2"))
        .stdout(predicate::str::contains("Countries: 2"));
}

/// Test inspect with a header missing columns
#[test]
fn test_inspect_invalid() {
    let file = dataset_file("BIN,Brand\n400000,VISA\n");

    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("inspect")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("Dataset is invalid"));
}

/// Ragged rows still count toward the dataset
#[test]
fn test_inspect_ragged_rows() {
    let file = dataset_file(&format!("{}999998,VISA\n", DATASET));

    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("inspect")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 4"));
}

/// Test inspect with missing file
#[test]
fn test_inspect_missing_file() {
    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("inspect")
        .arg("/nonexistent/bins.csv")
        .assert()
        .failure();
}

/// Test verbose flag is accepted globally
#[test]
fn test_verbose_flag() {
    let mut cmd = Command::cargo_bin("binlookup").unwrap();
    cmd.arg("--verbose")
        .arg("check")
        .arg("4000001234")
        .assert()
        .success();
}
