use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn xdg_config_changes_display_format() {
    let tmp = tempdir().unwrap();
    let cfg_dir = tmp.path().join("liturgist");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("config.toml"),
        "version = 1\n[dates]\ndisplay_format = \"%A, %B %d, %Y\"\n",
    )
    .unwrap();

    let schedule = tmp.path().join("schedule.csv");
    fs::write(&schedule, "Date,Scripture\n3/10/24,John 1:1\n").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liturgist"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.args(["--date", "3/10/24", "--print"]).arg(&schedule);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Sunday, March 10, 2024"));
}

#[test]
fn default_output_path_comes_from_config() {
    let tmp = tempdir().unwrap();
    let out = tmp.path().join("printed/bulletin.html");
    let cfg = tmp.path().join("config.toml");
    fs::write(
        &cfg,
        format!("version = 1\n[output]\npath = \"{}\"\n", out.display()),
    )
    .unwrap();

    let schedule = tmp.path().join("schedule.csv");
    let template = tmp.path().join("t.html");
    fs::write(&schedule, "Date,Scripture\n3/10/24,John 1:1\n").unwrap();
    fs::write(&template, "<p>{{SCRIPTURE}}</p>").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liturgist"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("--config").arg(&cfg);
    cmd.args(["--date", "3/10/24", "--template"]).arg(&template).arg(&schedule);
    cmd.assert().success();

    assert_eq!(fs::read_to_string(&out).unwrap(), "<p>John 1:1</p>");
}

#[test]
fn next_sunday_uses_schedule_format_without_input_format() {
    let tmp = tempdir().unwrap();
    let cfg_dir = tmp.path().join("liturgist");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(
        cfg_dir.join("config.toml"),
        "version = 1\n[dates]\nschedule_format = \"%Y-%m-%d\"\n",
    )
    .unwrap();

    let sunday = liturgist_core::dates::next_sunday(chrono::Local::now().date_naive());
    let schedule = tmp.path().join("schedule.csv");
    fs::write(
        &schedule,
        format!("Date,Scripture\n{},John 1:1\n", sunday.format("%Y-%m-%d")),
    )
    .unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liturgist"));
    cmd.env("XDG_CONFIG_HOME", tmp.path());
    cmd.arg("--print").arg(&schedule);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(sunday.format("%B %-d, %Y").to_string()))
        .stdout(predicate::str::contains("John 1:1"));
}
