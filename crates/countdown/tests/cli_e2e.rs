#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use chrono::{Duration, SecondsFormat, Utc};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn data_file(&self) -> PathBuf {
        self.dir.path().join("countdowns.json")
    }

    /// A command isolated from the developer's own config and data.
    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("countdown"));
        cmd.env("COUNTDOWN_CONFIG", self.dir.path().join("countdown.toml"))
            .env("COUNTDOWN_DATA_FILE", self.data_file())
            .env_remove("COUNTDOWN_SEED")
            .env_remove("RUST_LOG");
        cmd
    }

    fn records(&self) -> Vec<Value> {
        let raw = fs::read_to_string(self.data_file()).unwrap();
        serde_json::from_str::<Value>(&raw)
            .unwrap()
            .as_array()
            .unwrap()
            .clone()
    }

    fn add_at(&self, title: &str, at: &str) -> String {
        self.cmd().args(["add", title, "--at", at]).assert().success();
        self.records()
            .iter()
            .find(|r| r["title"] == title)
            .map(|r| r["id"].as_str().unwrap().to_string())
            .unwrap()
    }
}

fn in_seconds(seconds: i64) -> String {
    (Utc::now() + Duration::seconds(seconds)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn no_temp_files(dir: &Path) -> bool {
    fs::read_dir(dir)
        .unwrap()
        .all(|e| !e.unwrap().file_name().to_string_lossy().ends_with(".tmp"))
}

#[test]
fn test_first_run_seeds_and_lists() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Anniversary"))
        .stdout(predicate::str::contains("Vacation"));
    assert_eq!(sandbox.records().len(), 2);
}

#[test]
fn test_list_is_sorted_by_soonest() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["init"]).assert().success();

    let output = sandbox.cmd().args(["list"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let anniversary = stdout.find("Anniversary").unwrap();
    let vacation = stdout.find("Vacation").unwrap();
    assert!(anniversary < vacation);
}

#[test]
fn test_init_twice_reports_existing_file() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created countdown data"));
    let before = fs::read_to_string(sandbox.data_file()).unwrap();

    sandbox
        .cmd()
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert_eq!(fs::read_to_string(sandbox.data_file()).unwrap(), before);
}

#[test]
fn test_seed_can_be_disabled_by_env() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("COUNTDOWN_SEED", "false")
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No countdowns yet."));
    assert!(sandbox.records().is_empty());
}

#[test]
fn test_seed_can_be_disabled_by_config_file() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.dir.path().join("countdown.toml"), "seed = false\n").unwrap();
    sandbox.cmd().args(["init"]).assert().success();
    assert!(sandbox.records().is_empty());
}

#[test]
fn test_data_file_flag_beats_env() {
    let sandbox = Sandbox::new();
    let other = sandbox.dir.path().join("nested").join("other.json");
    sandbox
        .cmd()
        .args(["init", "--data-file", other.to_str().unwrap()])
        .assert()
        .success();
    assert!(other.exists());
    assert!(!sandbox.data_file().exists());
}

#[test]
fn test_add_show_edit_delete_workflow() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("COUNTDOWN_SEED", "false")
        .args(["init"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args([
            "add",
            "  Launch  ",
            "--at",
            "2040-01-01T12:00:00Z",
            "--description",
            "Lift off",
            "--emoji",
            "🚀",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Countdown created: Launch"));

    let records = sandbox.records();
    assert_eq!(records.len(), 1);
    let id = records[0]["id"].as_str().unwrap().to_string();
    assert_eq!(records[0]["title"], "Launch");
    assert_eq!(records[0]["color"], "#8B5CF6");
    assert_eq!(records[0]["target"], "2040-01-01T12:00:00Z");

    sandbox
        .cmd()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("🚀 Launch"))
        .stdout(predicate::str::contains("Lift off"))
        .stdout(predicate::str::contains(id.as_str()));

    sandbox
        .cmd()
        .args(["edit", &id, "--title", "Launch day", "--color", "#00D1FF"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Countdown updated: Launch day"));
    let edited = &sandbox.records()[0];
    assert_eq!(edited["title"], "Launch day");
    assert_eq!(edited["color"], "#00D1FF");
    assert_eq!(edited["description"], "Lift off");
    assert_eq!(edited["target"], "2040-01-01T12:00:00Z");
    assert_eq!(edited["id"], id.as_str());

    sandbox
        .cmd()
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Countdown deleted: Launch day"));
    assert!(sandbox.records().is_empty());
    assert!(no_temp_files(sandbox.dir.path()));
}

#[test]
fn test_parallel_adds_from_separate_processes_all_land() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("COUNTDOWN_SEED", "false")
        .args(["init"])
        .assert()
        .success();

    let children: Vec<_> = (0..8)
        .map(|i| {
            std::process::Command::new(cargo_bin("countdown"))
                .env("COUNTDOWN_CONFIG", sandbox.dir.path().join("countdown.toml"))
                .env("COUNTDOWN_DATA_FILE", sandbox.data_file())
                .env_remove("RUST_LOG")
                .args(["add", &format!("p{}", i), "--at", "2040-01-01T00:00:00Z"])
                .stdout(std::process::Stdio::null())
                .spawn()
                .unwrap()
        })
        .collect();
    for mut child in children {
        assert!(child.wait().unwrap().success());
    }

    let mut titles: Vec<_> = sandbox
        .records()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect();
    titles.sort();
    let mut expected: Vec<_> = (0..8).map(|i| format!("p{}", i)).collect();
    expected.sort();
    assert_eq!(titles, expected);
    assert!(no_temp_files(sandbox.dir.path()));
}

#[test]
fn test_add_with_local_date_and_time() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "Dinner", "--date", "2039-06-01", "--time", "19:30"])
        .assert()
        .success();
    assert!(sandbox.records().iter().any(|r| r["title"] == "Dinner"));
}

#[test]
fn test_add_without_target_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "Someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: a target is required"));
}

#[test]
fn test_add_with_bad_date_fails() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["add", "Oops", "--date", "31/12/2039"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target"));
}

#[test]
fn test_unknown_id_fails_for_show_edit_delete() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["init"]).assert().success();
    let before = fs::read_to_string(sandbox.data_file()).unwrap();

    for args in [
        vec!["show", "missing"],
        vec!["edit", "missing", "--title", "x"],
        vec!["delete", "missing"],
    ] {
        sandbox
            .cmd()
            .args(&args)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Countdown not found: missing"));
    }
    assert_eq!(fs::read_to_string(sandbox.data_file()).unwrap(), before);
}

#[test]
fn test_export_prints_unsorted_json() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("COUNTDOWN_SEED", "false")
        .args(["init"])
        .assert()
        .success();
    sandbox.add_at("Later", "2045-01-01T00:00:00Z");
    sandbox.add_at("Sooner", "2041-01-01T00:00:00Z");

    let output = sandbox.cmd().args(["export"]).output().unwrap();
    assert!(output.status.success());
    let exported: Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<_> = exported
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Later", "Sooner"]);
}

#[test]
fn test_corrupt_file_lists_nothing_and_refuses_writes() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.data_file(), "{ definitely not a list").unwrap();

    sandbox
        .cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot read countdowns"));

    sandbox
        .cmd()
        .args(["export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("unreadable"));

    sandbox
        .cmd()
        .args(["add", "New", "--at", "2040-01-01T00:00:00Z"])
        .assert()
        .failure();
    assert_eq!(
        fs::read_to_string(sandbox.data_file()).unwrap(),
        "{ definitely not a list"
    );
}

#[test]
fn test_past_target_shows_arrived() {
    let sandbox = Sandbox::new();
    sandbox.add_at("Yesterday", &in_seconds(-86_400));
    sandbox
        .cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("It's time!"));
}

#[test]
fn test_watch_announces_arrival_once() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("COUNTDOWN_SEED", "false")
        .args(["init"])
        .assert()
        .success();
    sandbox.add_at("Soon", &in_seconds(4));

    let output = sandbox.cmd().args(["watch", "--ticks", "7"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("Soon has arrived. It's time!").count(), 1);
}

#[test]
fn test_config_shows_effective_settings_without_creating_data() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seed = true"))
        .stdout(predicate::str::contains("countdowns.json"));
    assert!(!sandbox.data_file().exists());

    sandbox
        .cmd()
        .args(["config", "--template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("data_file"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().args(["export", "-v"]).output().unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("created countdown data file"));
    let exported: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(exported.as_array().unwrap().len(), 2);
}
