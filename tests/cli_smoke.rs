use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn mb(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mb").expect("binary");
    cmd.arg("--data-dir").arg(dir);
    cmd
}

#[test]
fn help_works() {
    Command::cargo_bin("mb")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("mission board"));
}

#[test]
fn subcommand_help_works() {
    for cmd in ["ui", "add", "list", "toggle", "edit", "delete", "stats", "completions"] {
        Command::cargo_bin("mb")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn add_toggle_and_stats_flow() {
    let dir = TempDir::new().unwrap();

    mb(dir.path())
        .args(["add", "Steal", "the", "car"])
        .assert()
        .success()
        .stdout(contains("Mission accepted: #1 Steal the car"));
    mb(dir.path())
        .args(["add", "  Deliver package  "])
        .assert()
        .success()
        .stdout(contains("#2 Deliver package"));

    mb(dir.path())
        .args(["toggle", "1"])
        .assert()
        .success()
        .stdout(contains("Mission #1 marked completed"));

    mb(dir.path())
        .args(["list", "--status", "pending"])
        .assert()
        .success()
        .stdout(contains("Deliver package").and(contains("Steal the car").not()));

    mb(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(contains("Missions").and(contains("2")))
        .stdout(contains("Completed    1"))
        .stdout(contains("Pending      1"));

    let raw = fs::read_to_string(dir.path().join("viceCityTodos.json")).unwrap();
    assert!(raw.contains("\"completed\":true"));
}

#[test]
fn edit_and_delete_report_missing_ids() {
    let dir = TempDir::new().unwrap();
    mb(dir.path()).args(["add", "Meet Lance"]).assert().success();

    mb(dir.path())
        .args(["edit", "1", "Meet", "Ken", "Rosenberg"])
        .assert()
        .success()
        .stdout(contains("Updated mission #1"));
    mb(dir.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(contains("Meet Ken Rosenberg"));

    mb(dir.path()).args(["delete", "1"]).assert().success();
    mb(dir.path())
        .args(["delete", "1"])
        .assert()
        .code(2)
        .stderr(contains("not found"));
    mb(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Miami is waiting"));
}

#[test]
fn blank_and_oversized_text_is_rejected() {
    let dir = TempDir::new().unwrap();
    mb(dir.path()).args(["add", "   "]).assert().code(2);
    mb(dir.path())
        .arg("add")
        .arg("x".repeat(151))
        .assert()
        .code(2);

    mb(dir.path()).args(["add", "Short"]).assert().success();
    mb(dir.path())
        .args(["edit", "1"])
        .arg("y".repeat(81))
        .assert()
        .code(2);
    mb(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Short"));
}

#[test]
fn corrupt_snapshot_lists_as_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("viceCityTodos.json"), "{not json").unwrap();

    mb(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No missions in progress"));
    mb(dir.path()).args(["add", "Fresh start"]).assert().success();
    mb(dir.path())
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(contains("\"text\": \"Fresh start\""));
}

#[test]
fn invalid_explicit_config_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, "sound = = nope").unwrap();

    mb(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("stats")
        .assert()
        .code(2)
        .stderr(contains("failed to load config"));

    mb(dir.path())
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .arg("stats")
        .assert()
        .code(2)
        .stderr(contains("does not exist"));
}

#[test]
fn broken_config_in_data_dir_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "sound = = nope").unwrap();

    mb(dir.path()).arg("stats").assert().success();
}

#[test]
fn failed_save_exits_with_operation_failed() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("viceCityTodos.json")).unwrap();

    mb(dir.path())
        .args(["add", "x"])
        .assert()
        .code(4)
        .stderr(contains("Failed to save"));
    assert!(!dir.path().join("viceCityTodos.json.tmp").exists());
}

#[test]
fn data_dir_comes_from_env_unless_flag_given() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();

    Command::cargo_bin("mb")
        .expect("binary")
        .env("MISSION_BOARD_DIR", env_dir.path())
        .args(["add", "From env"])
        .assert()
        .success();
    assert!(env_dir.path().join("viceCityTodos.json").exists());

    Command::cargo_bin("mb")
        .expect("binary")
        .env("MISSION_BOARD_DIR", env_dir.path())
        .arg("--data-dir")
        .arg(flag_dir.path())
        .args(["add", "From flag"])
        .assert()
        .success();

    mb(flag_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("From flag").and(contains("From env").not()));
    mb(env_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("From env").and(contains("From flag").not()));
}

#[test]
fn list_completed_shows_only_finished_missions() {
    let dir = TempDir::new().unwrap();
    mb(dir.path()).args(["add", "Steal the car"]).assert().success();
    mb(dir.path()).args(["add", "Deliver package"]).assert().success();
    mb(dir.path()).args(["toggle", "2"]).assert().success();

    mb(dir.path())
        .args(["list", "--status", "completed"])
        .assert()
        .success()
        .stdout(contains("Deliver package").and(contains("Steal the car").not()));
}

#[test]
fn completions_generate() {
    Command::cargo_bin("mb")
        .expect("binary")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("mb"));
}
