use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::TestHome;

#[test]
fn test_list_on_new_database() {
    let home = TestHome::new();
    home.cmd(&["list"])
        .assert()
        .success()
        .stdout("(no sheets)\n");
}

#[test]
fn test_clock_in_and_out() {
    let home = TestHome::new();

    home.cmd(&["in", "writing", "docs"]).assert().success().stdout("");
    home.cmd(&["now"])
        .assert()
        .success()
        .stdout(contains("default: ").and(contains("(writing docs)")));
    home.cmd(&["in"])
        .assert()
        .failure()
        .stderr(contains("error: timesheet default already active"));
    home.cmd(&["out"]).assert().success();
    home.cmd(&["now"])
        .assert()
        .success()
        .stdout("default: not active\n");
}

#[test]
fn test_switch_and_list_sheets() {
    let home = TestHome::new();
    home.cmd(&["sw", "-v", "client"])
        .assert()
        .success()
        .stdout("switched to empty timesheet \"client\"\n");
    home.cmd(&["in", "call"]).assert().success();
    home.cmd(&["ls", "-s"]).assert().success().stdout("client\n");
    home.cmd(&["running"])
        .assert()
        .success()
        .stdout(contains("client").and(contains("call")));
}

#[test]
fn test_no_command_prints_command_list() {
    let home = TestHome::new();
    home.cmd(&[])
        .assert()
        .failure()
        .stdout(contains("Commands:").and(contains("backdate")))
        .stderr(contains("error: no command specified"));
}

#[test]
fn test_unknown_and_ambiguous_commands() {
    let home = TestHome::new();
    home.cmd(&["frobnicate"])
        .assert()
        .failure()
        .stderr(contains("error: no such command \"frobnicate\""));
    home.cmd(&["s"])
        .assert()
        .failure()
        .stderr(contains("ambiguous command \"s\": stats switch"));
}

#[test]
fn test_command_help_goes_to_stdout() {
    let home = TestHome::new();
    home.cmd(&["in", "--help"])
        .assert()
        .success()
        .stdout(contains("--switch").and(contains("--resume")));
}

#[test]
fn test_bad_arguments_are_usage_errors() {
    let home = TestHome::new();
    home.cmd(&["display", "-f", "xml"])
        .assert()
        .failure()
        .stderr(contains("xml"));
}

#[test]
fn test_kill_reads_confirmation_from_stdin() {
    let home = TestHome::new();
    home.cmd(&["in", "-a", "2013-05-01 09:00", "old"]).assert().success();
    home.cmd(&["out", "-a", "2013-05-01 10:00"]).assert().success();

    home.cmd(&["kill", "default"])
        .write_stdin("no\n")
        .assert()
        .success()
        .stdout(contains("canceled"));
    home.cmd(&["ls", "-s"]).assert().success().stdout("default\n");

    home.cmd(&["delete", "default"])
        .write_stdin("y\n")
        .assert()
        .success();
    home.cmd(&["list"]).assert().success().stdout("(no sheets)\n");
}

#[test]
fn test_display_csv_from_binary() {
    let home = TestHome::new();
    home.cmd(&["insert", "2013-05-01 09:00", "2013-05-01 10:30", "planning"])
        .assert()
        .success();
    home.cmd(&["display", "-f", "csv"])
        .assert()
        .success()
        .stdout(contains("Start,End,Length,Description").and(contains("5400,planning")));
}

#[test]
fn test_config_file_alias_and_overlap_policy() {
    let home = TestHome::new();
    std::fs::write(
        home.config(),
        "aliases:\n  meeting: in -s meetings\nbackdate_overlap: confirm\n",
    )
    .unwrap();

    home.cmd(&["meeting", "weekly", "sync"]).assert().success();
    home.cmd(&["now", "-s"]).assert().success().stdout("meetings\n");
}

#[test]
fn test_malformed_config_is_reported() {
    let home = TestHome::new();
    std::fs::write(home.config(), "backdate_overlap: sometimes\n").unwrap();

    home.cmd(&["list"])
        .assert()
        .failure()
        .stderr(contains("configuration error"));
}
