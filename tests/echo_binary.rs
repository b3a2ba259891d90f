//! Process-level tests for the `bract-echo` binary.
//!
//! These run the real executable so the abort exit status and the exact bytes
//! reaching stderr are observed the way a host shell would see them.

use assert_cmd::Command;
use predicates::prelude::*;
use test_support::parse_message_line;

fn bract_echo() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bract-echo"));
    command.env_remove("BRACT_LOG");
    command
}

#[test]
fn quiet_echo_writes_zero_bytes() {
    bract_echo()
        .arg("x")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}

#[test]
fn verbose_echo_matches_message_format() {
    bract_echo()
        .args(["--verbose", "--label", "demo", "hello"])
        .assert()
        .success()
        .stderr(predicate::str::is_match(r"^\[demo \d+ms\] hello\n$").expect("valid regex"));
}

#[test]
fn abort_exits_with_status_one_after_writing_line() {
    bract_echo()
        .args(["--abort", "fatal"])
        .assert()
        .code(1)
        .stderr(predicate::str::is_match(r"^\[bract:ABORT \d+ms\] fatal\n$").expect("valid regex"));
}

#[test]
fn abort_honours_custom_exit_code() {
    bract_echo()
        .args(["--label", "svc", "--abort", "disk full", "--exit-code", "23"])
        .assert()
        .code(23)
        .stderr(predicate::str::contains("[svc:ABORT "))
        .stderr(predicate::str::ends_with("ms] disk full\n"));
}

#[test]
fn abort_refuses_zero_exit_code() {
    bract_echo()
        .args(["--abort", "fatal", "--exit-code", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(":ABORT ").not());
}

#[test]
fn section_lines_wrap_messages() {
    let output = bract_echo()
        .args(["-v", "--section", "A", "--section", "B", "work"])
        .output()
        .expect("bract-echo runs");
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("utf-8");
    let bodies: Vec<String> = stderr
        .lines()
        .map(|line| parse_message_line(line).expect("echo format").message)
        .collect();
    assert_eq!(
        bodies,
        vec![
            "===== [ 1] Begin: A =====",
            "===== [ 2] Begin: B =====",
            "work",
            "..... [ 2]   End: B .....",
            "..... [ 1]   End: A .....",
        ]
    );
}

#[test]
fn bridged_tracing_events_follow_log_filter() {
    let output = bract_echo()
        .env("BRACT_LOG", "bract=debug")
        .args(["-v", "hello"])
        .output()
        .expect("bract-echo runs");
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("utf-8");
    let bodies: Vec<String> = stderr
        .lines()
        .map(|line| parse_message_line(line).expect("echo format").message)
        .collect();
    assert_eq!(bodies, vec!["echo run starting", "hello"]);
}

#[test]
fn bridged_tracing_events_stay_quiet_without_verbose() {
    bract_echo()
        .env("BRACT_LOG", "bract=debug")
        .arg("hello")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn usage_errors_exit_two() {
    bract_echo()
        .args(["--exit-code", "9"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--abort"));
}
