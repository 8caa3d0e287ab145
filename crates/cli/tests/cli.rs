//! End-to-end tests for the mend binary.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the mend binary, run from `dir`
fn mend(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mend").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

/// Create a temp directory with a mend.yml
fn project(targets: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("mend.yml"), targets).unwrap();
    temp
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap_or_default()
}

/// A (phony) <- B (b.out) <- c.txt
const SCENARIO: &str = r#"
default: A
targets:
  - name: A
    phony: true
    dependencies: [B]
    command: echo A >> runs.log
  - name: B
    output: b.out
    dependencies: [c.txt]
    command: echo B >> runs.log && cp c.txt b.out
"#;

fn scenario() -> TempDir {
    let temp = project(SCENARIO);
    std::fs::write(temp.path().join("c.txt"), "source").unwrap();
    temp
}

#[test]
fn help_flag_works() {
    let temp = TempDir::new().unwrap();
    mend(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn second_run_skips_fresh_file_target_but_reruns_phony() {
    let temp = scenario();

    mend(&temp).assert().success();
    assert_eq!(read(&temp, "runs.log"), "B\nA\n");
    assert_eq!(read(&temp, "b.out"), "source");

    mend(&temp).arg("A").assert().success();
    assert_eq!(read(&temp, "runs.log"), "B\nA\nA\n");
}

#[test]
fn always_run_rebuilds_everything() {
    let temp = scenario();
    mend(&temp).arg("-q").assert().success();

    mend(&temp).args(["-q", "-B"]).assert().success();
    assert_eq!(read(&temp, "runs.log"), "B\nA\nB\nA\n");
}

#[test]
fn dry_run_shows_plan_and_runs_nothing() {
    let temp = scenario();

    mend(&temp)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("c.txt"))
        .stdout(predicate::str::contains("would run: output missing"));

    assert!(!temp.path().join("b.out").exists());
    assert!(!temp.path().join("runs.log").exists());
}

#[test]
fn unknown_target_exits_with_code_2() {
    let temp = scenario();

    mend(&temp)
        .arg("Z")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No rule to make target 'Z'"));
    assert!(!temp.path().join("runs.log").exists());
}

#[test]
fn cycle_exits_with_code_3() {
    let temp = project(
        r#"
targets:
  - name: X
    phony: true
    dependencies: [Y]
  - name: Y
    phony: true
    dependencies: [X]
"#,
    );

    mend(&temp)
        .arg("X")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("X -> Y -> X"));
}

#[test]
fn failing_action_exits_with_code_4_and_stops() {
    let temp = project(
        r#"
targets:
  - name: all
    phony: true
    dependencies: [lint, test]
  - name: lint
    phony: true
    command: exit 7
  - name: test
    phony: true
    command: touch tested
"#,
    );

    mend(&temp)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Target 'lint' failed"));
    assert!(!temp.path().join("tested").exists());
}

#[test]
fn duplicate_target_exits_with_code_5() {
    let temp = project(
        r#"
targets:
  - name: test
    phony: true
    command: touch first
  - name: test
    phony: true
    command: touch second
"#,
    );

    mend(&temp).arg("test").assert().code(5);
    assert!(!temp.path().join("first").exists());
}

#[test]
fn missing_declaration_file_exits_with_code_1() {
    let temp = TempDir::new().unwrap();
    mend(&temp)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("mend.yml"));
}

#[test]
fn directory_and_file_flags_locate_declarations() {
    let temp = TempDir::new().unwrap();
    let sub = temp.path().join("pkg");
    std::fs::create_dir_all(&sub).unwrap();
    std::fs::write(
        sub.join("build.yml"),
        "targets:\n  - name: out.txt\n    command: echo built > out.txt\n",
    )
    .unwrap();

    mend(&temp)
        .args(["-C", "pkg", "-f", "build.yml", "-q"])
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(sub.join("out.txt")).unwrap(), "built\n");
}

#[test]
fn script_target_runs_under_relative_directory() {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let temp = TempDir::new().unwrap();
    let scripts = temp.path().join("pkg").join("scripts");
    std::fs::create_dir_all(&scripts).unwrap();
    std::fs::write(
        temp.path().join("pkg").join("mend.yml"),
        "targets:\n  - name: out.txt\n    script: scripts/build.sh\n",
    )
    .unwrap();
    let mut script = std::fs::File::options()
        .create(true)
        .write(true)
        .mode(0o755)
        .open(scripts.join("build.sh"))
        .unwrap();
    script
        .write_all(b"#!/bin/sh\nprintf %s \"$MEND_TARGET\" > out.txt\n")
        .unwrap();
    script.sync_all().unwrap();
    drop(script);

    mend(&temp).args(["-C", "pkg", "-q"]).assert().success();
    assert_eq!(
        std::fs::read_to_string(temp.path().join("pkg").join("out.txt")).unwrap(),
        "out.txt"
    );
}

#[test]
fn list_shows_targets_and_default() {
    let temp = project(
        r#"
name: efd
default: check
targets:
  - name: test
    phony: true
    description: Run the unit tests
  - name: check
    phony: true
    dependencies: [test]
"#,
    );

    mend(&temp)
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Targets (efd)"))
        .stdout(predicate::str::contains("Run the unit tests"))
        .stdout(predicate::str::contains("[default]"));
}

#[test]
fn graph_warns_about_cycles_without_failing() {
    let temp = project(
        r#"
targets:
  - name: X
    phony: true
    dependencies: [Y]
  - name: Y
    phony: true
    dependencies: [X]
"#,
    );

    mend(&temp)
        .arg("--graph")
        .assert()
        .success()
        .stdout(predicate::str::contains("Circular dependencies detected"));
}

#[test]
fn schema_describes_declaration_file() {
    let temp = TempDir::new().unwrap();
    mend(&temp)
        .arg("--schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"targets\""));
}
