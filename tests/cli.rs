//! End-to-end checks of the command surface: every case here fails during
//! parsing or validation, before any prctl call, so the tests run
//! unprivileged on kernels without core scheduling support.

use std::process::{Command, Output};

fn coresched(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_coresched"))
        .args(args)
        .output()
        .expect("failed to run coresched")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn get_without_source_is_a_usage_error() {
    let output = coresched(&["get"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("requires a source task"));
}

#[test]
fn copy_without_dest_names_the_destination() {
    let output = coresched(&["copy", "-s", "100"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("destination"));
}

#[test]
fn negative_task_id_is_rejected_with_its_own_message() {
    let output = coresched(&["get", "-s", "-5"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("cannot be negative"));
}

#[test]
fn garbage_task_id_echoes_the_input() {
    let output = coresched(&["get", "-s", "12x"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("12x"));
}

#[test]
fn unknown_scope_keyword_is_rejected() {
    let output = coresched(&["create", "-s", "1", "-t", "gid"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("pid/tgid/pgid"));
}

#[test]
fn exec_without_a_program_is_rejected() {
    let output = coresched(&["exec"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("program"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let output = coresched(&["frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
}
