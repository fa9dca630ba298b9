//! End-to-end tests for the `lox` binary: argument handling, exit statuses
//! and what lands on stdout versus stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn lox() -> Command {
    let mut cmd = Command::new(PathBuf::from(env!("CARGO_BIN_EXE_lox")));
    cmd.env_remove("LOX_DIAGNOSTICS").env_remove("LOX_LOG");
    cmd
}

fn script(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write script");
    path
}

#[test]
fn two_scripts_print_usage_and_exit_64() {
    lox()
        .args(["a.lox", "b.lox"])
        .assert()
        .code(64)
        .stdout("Usage: lox [script]\n")
        .stderr("");
}

#[test]
fn three_scripts_do_not_touch_the_files() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = script(&dir, "real.lox", "print 1;");

    lox()
        .arg(&path)
        .arg(&path)
        .arg(&path)
        .assert()
        .code(64)
        .stdout(predicate::str::contains("PRINT").not());
}

#[test]
fn unknown_flag_is_usage_error() {
    lox()
        .arg("--no-such-flag")
        .assert()
        .code(64)
        .stdout(predicate::str::contains("Usage: lox [script]"));
}

#[test]
fn help_exits_successfully() {
    lox()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("script"));
}

#[test]
fn clean_file_prints_every_token() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = script(&dir, "clean.lox", "var x = 1;\nprint x;\n");

    lox()
        .arg(&path)
        .assert()
        .success()
        .stdout(
            "VAR var null\n\
             IDENTIFIER x null\n\
             EQUAL = null\n\
             NUMBER 1 1.0\n\
             SEMICOLON ; null\n\
             PRINT print null\n\
             IDENTIFIER x null\n\
             SEMICOLON ; null\n\
             EOF  null\n",
        )
        .stderr("");
}

#[test]
fn file_error_reports_once_and_exits_65() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = script(&dir, "broken.lox", "first;\nsecond @;\nthird;\n");

    lox()
        .arg(&path)
        .assert()
        .code(65)
        .stdout(predicate::str::contains("IDENTIFIER first null"))
        .stdout(predicate::str::contains("IDENTIFIER third null"))
        .stderr("[line 2] Error: Unexpected character.\n");
}

#[test]
fn empty_file_is_clean() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = script(&dir, "empty.lox", "");

    lox()
        .arg(&path)
        .assert()
        .success()
        .stdout("EOF  null\n")
        .stderr("");
}

#[test]
fn missing_file_exits_66() {
    let dir = TempDir::new().expect("Failed to create temp directory");

    lox()
        .arg(dir.path().join("absent.lox"))
        .assert()
        .code(66)
        .stdout("")
        .stderr(predicate::str::starts_with("lox: cannot read"));
}

#[test]
fn pretty_format_annotates_the_source() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = script(&dir, "pretty.lox", "var a = ~;\n");

    lox()
        .args(["--format", "pretty", "--color", "never"])
        .arg(&path)
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Unexpected character."))
        .stderr(predicate::str::contains("var a = ~;"))
        .stderr(predicate::str::contains("[line 1]").not());
}

#[test]
fn prompt_runs_each_line() {
    lox()
        .write_stdin("print 1;\n")
        .assert()
        .success()
        .stdout("> PRINT print null\nNUMBER 1 1.0\nSEMICOLON ; null\nEOF  null\n> ");
}

#[test]
fn prompt_survives_errors_and_exits_zero() {
    lox()
        .write_stdin("@\nok\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("IDENTIFIER ok null"))
        .stderr("[line 1] Error: Unexpected character.\n");
}

#[test]
fn prompt_with_no_input_just_prompts() {
    lox().write_stdin("").assert().success().stdout("> ").stderr("");
}

#[test]
fn logging_can_be_enabled_without_touching_stdout() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = script(&dir, "logged.lox", "1");

    lox()
        .env("LOX_LOG", "lox=debug")
        .arg(&path)
        .assert()
        .success()
        .stdout("NUMBER 1 1.0\nEOF  null\n")
        .stderr(predicate::str::contains("running script"));
}
