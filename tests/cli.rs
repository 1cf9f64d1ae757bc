use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn subuniq() -> Command {
    Command::new(env!("CARGO_BIN_EXE_subuniq"))
}

fn setup(input: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("subs.txt");
    fs::write(&path, input).unwrap();
    (dir, path)
}

#[test]
fn shows_help() {
    subuniq()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--ignore"))
        .stdout(predicate::str::contains("--valid"));
}

#[test]
fn missing_output_prints_usage() {
    subuniq()
        .args(["-i", "subs.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn dedups_and_prints_summary() {
    let (dir, input) = setup("Foo.Example.com\n\nfoo.example.com\nBAR.example.com\n");
    let output = dir.path().join("out.txt");

    subuniq()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total input lines"))
        .stdout(predicate::str::contains("Unique subdomains"))
        .stdout(predicate::str::contains("2 entries"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "bar.example.com\nfoo.example.com\n");
}

#[test]
fn json_round_trips_against_plain() {
    let (dir, input) = setup("c.example.com\nA.example.com\nb.example.com\na.example.com\n");
    let plain = dir.path().join("out.txt");
    let json = dir.path().join("out.json");

    subuniq().arg("-i").arg(&input).arg("-o").arg(&plain).arg("-q").assert().success();
    subuniq()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&json)
        .args(["--format", "json", "-q"])
        .assert()
        .success();

    let plain = fs::read_to_string(&plain).unwrap();
    let parsed: Vec<String> = serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
    let lines: Vec<&str> = plain.lines().collect();
    assert_eq!(parsed, lines);
}

#[test]
fn ignore_filter_and_validate() {
    let (dir, input) = setup("test.example.com\nprod.example.com\na.b.gov.eg\nabc.gov.eg\nx_y\n");
    let output = dir.path().join("out.csv");

    subuniq()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--ignore", "test,abc", "--filter", ".gov.eg", "--valid", "--format", "csv", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output).unwrap(), "a.b.gov.eg\n");
}

#[test]
fn unsupported_format_writes_nothing() {
    let (dir, input) = setup("a.com\n");
    let output = dir.path().join("out.xml");

    subuniq()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--format", "xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unsupported format"));

    assert!(!output.exists());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.txt");

    subuniq()
        .arg("-i")
        .arg(dir.path().join("missing.txt"))
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error opening input file"));

    assert!(!output.exists());
}

#[test]
fn unwritable_output_fails() {
    let (dir, input) = setup("a.com\n");

    subuniq()
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("nope").join("out.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error creating output file"));
}
