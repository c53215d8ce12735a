//! End-to-end tests for the `cardiee` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cardiee(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cardiee").unwrap();
    cmd.env("CARDIEE_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("CARDIEE_LOG");
    cmd
}

fn initialized() -> TempDir {
    let home = TempDir::new().unwrap();
    cardiee(&home).arg("init").assert().success();
    home
}

fn list_json(home: &TempDir, due: bool) -> serde_json::Value {
    let mut cmd = cardiee(home);
    cmd.args(["--output", "json", "list"]);
    if due {
        cmd.arg("--due");
    }
    let out = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&out).unwrap()
}

#[test]
fn test_init_creates_database() {
    let home = TempDir::new().unwrap();

    cardiee(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initializing the database succeeded"));

    assert!(home.path().join("cardiee.db").exists());
    assert!(home.path().join("config.yaml").exists());
}

#[test]
fn test_commands_require_init() {
    let home = TempDir::new().unwrap();

    cardiee(&home)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cardiee init"));
}

#[test]
fn test_add_then_list() {
    let home = initialized();

    cardiee(&home)
        .args(["add", "Capital of Peru?", "Lima"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flashcard added with ID: 1"));

    let value = list_json(&home, true);
    assert_eq!(value["count"], 1);
    assert_eq!(value["items"][0]["question"], "Capital of Peru?");
    assert_eq!(value["items"][0]["growth_factor"], 1);
    assert_eq!(value["items"][0]["due"], true);
}

#[test]
fn test_add_rejects_blank_question() {
    let home = initialized();

    cardiee(&home).args(["add", "   ", "Lima"]).assert().failure();
    assert_eq!(list_json(&home, false)["count"], 0);
}

#[test]
fn test_remove_and_clear() {
    let home = initialized();
    cardiee(&home).args(["add", "a", "1"]).assert().success();
    cardiee(&home).args(["add", "b", "2"]).assert().success();
    cardiee(&home).args(["add", "c", "3"]).assert().success();

    cardiee(&home)
        .args(["remove", "2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flashcard with ID: 2 removed."));
    assert_eq!(list_json(&home, false)["count"], 2);

    cardiee(&home).args(["remove", "2", "--yes"]).assert().failure();

    cardiee(&home).arg("clear").write_stdin("n\n").assert().success();
    assert_eq!(list_json(&home, false)["count"], 2);

    cardiee(&home)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 removed"));
    assert_eq!(list_json(&home, false)["count"], 0);
}

#[test]
fn test_study_retries_missed_card() {
    let home = initialized();
    cardiee(&home).args(["add", "Capital of Peru?", "Lima"]).assert().success();

    cardiee(&home)
        .args(["study", "--yes", "--seed", "7"])
        .write_stdin("Cusco\nLIMA\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Incorrect. The correct answer is: Lima"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Study session completed."));

    // One miss then a hit: the card now waits two days.
    let value = list_json(&home, false);
    assert_eq!(value["items"][0]["growth_factor"], 2);
    assert_eq!(value["items"][0]["due"], false);
    assert_eq!(list_json(&home, true)["count"], 0);
}

#[test]
fn test_study_json_keeps_prompts_off_stdout() {
    let home = initialized();
    cardiee(&home).args(["add", "2 + 2", "4"]).assert().success();

    let out = cardiee(&home)
        .args(["--output", "json", "study", "--yes"])
        .write_stdin("4\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Question 1/1: 2 + 2"))
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["status"], "complete");
    assert_eq!(value["correct_count"], 1);
}

#[test]
fn test_study_with_nothing_due() {
    let home = initialized();

    cardiee(&home)
        .args(["study", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No due flashcards found."));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    cardiee(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cardiee"));
}
