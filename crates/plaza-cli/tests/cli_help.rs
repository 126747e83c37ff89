use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("plaza")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("whoami"))
        .stdout(predicate::str::contains("feed"))
        .stdout(predicate::str::contains("post"))
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn test_post_help_shows_message_flag() {
    cargo_bin_cmd!("plaza")
        .args(["post", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--message"))
        .stdout(predicate::str::contains("--username"));
}

#[test]
fn test_feed_requires_username() {
    cargo_bin_cmd!("plaza")
        .arg("feed")
        .env("PLAZA_PASSWORD", "secret1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--username"));
}

#[test]
fn test_interactive_mode_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("plaza")
        .env("PLAZA_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
