//! End-to-end portal sessions driven through stdin.
//!
//! Each invocation is a separate process sharing one data directory, so these
//! tests also cover that every write is on disk when the portal exits.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn portal(dir: &TempDir, input: &[&str]) -> assert_cmd::assert::Assert {
    let mut stdin = input.join("\n");
    stdin.push('\n');

    #[allow(deprecated)]
    Command::cargo_bin("quizportal")
        .unwrap()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("QUIZPORTAL_DATA_DIR")
        .write_stdin(stdin)
        .assert()
}

fn read(dir: &TempDir, file: &str) -> String {
    std::fs::read_to_string(dir.path().join(file)).unwrap_or_default()
}

#[test]
fn exit_choice_ends_cleanly() {
    let dir = TempDir::new().unwrap();
    portal(&dir, &["5"])
        .success()
        .stdout(predicate::str::contains("==== MAIN PORTAL ===="))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn closed_input_ends_cleanly() {
    let dir = TempDir::new().unwrap();
    #[allow(deprecated)]
    Command::cargo_bin("quizportal")
        .unwrap()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("QUIZPORTAL_DATA_DIR")
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn first_admin_selection_sets_up_credentials() {
    let dir = TempDir::new().unwrap();

    portal(&dir, &["1", "root", "toor", "5"])
        .success()
        .stdout(predicate::str::contains("==== Admin INITIAL SETUP ===="))
        .stdout(predicate::str::contains("Admin setup complete! Please login now."))
        .stdout(predicate::str::contains("Welcome").not());

    assert_eq!(read(&dir, "admin_creds.txt").trim(), "root toor");

    // The next selection is a login, not another setup.
    portal(&dir, &["1", "root", "toor", "4", "5"])
        .success()
        .stdout(predicate::str::contains("Welcome to the Portal, root!"))
        .stdout(predicate::str::contains("[ADMIN PORTAL]"))
        .stdout(predicate::str::contains("Goodbye, root! Session closed."));
}

#[test]
fn wrong_password_returns_to_role_menu() {
    let dir = TempDir::new().unwrap();
    portal(&dir, &["2", "mrs_k", "chalk", "5"]).success();

    portal(&dir, &["2", "mrs_k", "eraser", "5"])
        .success()
        .stdout(predicate::str::contains("[TEACHER PORTAL]").not())
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn unregistered_child_is_turned_away() {
    let dir = TempDir::new().unwrap();
    portal(&dir, &["4", "Ben", "5"])
        .success()
        .stdout(predicate::str::contains("Not registered!"));
}

#[test]
fn quiz_progression_across_sessions() {
    let dir = TempDir::new().unwrap();

    // Admin: set up, then load the default bank.
    portal(&dir, &["1", "root", "toor", "5"]).success();
    portal(&dir, &["1", "root", "toor", "1", "4", "5"])
        .success()
        .stdout(predicate::str::contains("Default questions added automatically!"));
    assert_eq!(read(&dir, "quiz.txt").lines().count(), 9);

    // Parent: set up, log in, register Cara.
    portal(
        &dir,
        &["3", "mum", "pw", "3", "mum", "pw", "1", "Cara", "3", "5"],
    )
    .success();
    assert_eq!(read(&dir, "children.txt"), "Cara\n");

    // Cara: level 2 is locked, level 1 at 2/3 unlocks it.
    portal(
        &dir,
        &[
            "4", "Cara", //
            "2", //
            "1", ".cpp", "yes", "printf", //
            "2", "int", "1", "double", //
            "5", "5",
        ],
    )
    .success()
    .stdout(predicate::str::contains(
        "LOCKED! Pass previous level with 2+ stars.",
    ))
    .stdout(predicate::str::contains("Correct!"))
    .stdout(predicate::str::contains("Wrong!"))
    .stdout(predicate::str::contains("Score: 2/3 Stars: * *"));

    assert_eq!(read(&dir, "results.txt"), "Cara 1 2\nCara 2 2\n");

    // Parent sees the scores; admin sees the average.
    portal(&dir, &["3", "mum", "pw", "2", "3", "5"])
        .success()
        .stdout(predicate::str::contains("--- SCORES ---"))
        .stdout(predicate::str::contains("Cara 1 2"));

    portal(&dir, &["1", "root", "toor", "3", "4", "5"])
        .success()
        .stdout(predicate::str::contains("Class Average: 2.00/3"));
}

#[test]
fn help_request_reaches_teacher() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("children.txt"), "Ann\n").unwrap();

    portal(&dir, &["4", "Ann", "4", "what does & do?", "5", "5"]).success();
    assert_eq!(read(&dir, "help.txt"), "Ann: what does & do?\n");

    portal(&dir, &["2", "mrs_k", "chalk", "5"]).success();
    portal(
        &dir,
        &["2", "mrs_k", "chalk", "1", "2", "Ann", "it takes an address", "3", "5"],
    )
    .success()
    .stdout(predicate::str::contains("--- REQUESTS ---"))
    .stdout(predicate::str::contains("Ann: what does & do?"));

    assert_eq!(read(&dir, "replies.txt"), "To Ann: it takes an address\n");
}

#[test]
fn non_utf8_input_does_not_abort() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("children.txt"), b"Ann\nRen\xe9e\n").unwrap();

    #[allow(deprecated)]
    Command::cargo_bin("quizportal")
        .unwrap()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("QUIZPORTAL_DATA_DIR")
        .write_stdin(b"4\nAnn\n4\ncaf\xe9 help\n5\n5\n".to_vec())
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye, Ann! Session closed."))
        .stdout(predicate::str::contains("Goodbye!"));

    assert_eq!(read(&dir, "help.txt"), "Ann: caf\u{fffd} help\n");
}

#[test]
fn pass_threshold_from_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("quizportal.toml"), "pass_threshold = 3\n").unwrap();
    std::fs::write(dir.path().join("children.txt"), "Dan\n").unwrap();
    std::fs::write(dir.path().join("results.txt"), "Dan 1 2\n").unwrap();

    portal(&dir, &["4", "Dan", "3", "5", "5"])
        .success()
        .stdout(predicate::str::contains(
            "LOCKED! Pass previous level with 3+ stars.",
        ));
}
