use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn eqplot() -> Command {
    Command::cargo_bin("eqplot").unwrap()
}

#[test]
fn print_lists_one_line_per_series() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("curves.txt");
    fs::write(&file, "x\n\nx^2\n").unwrap();

    eqplot()
        .arg(&file)
        .args(["--range", "0", "4", "--samples", "2", "--step-multiplier", "1", "--print"])
        .assert()
        .success()
        .stdout("x= y\t#CD5C5C\t3\t0\t4\nx^2= y\t#0000FF\t3\t0\t16\n");
}

#[test]
fn appended_files_continue_the_palette() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");
    fs::write(&first, "1\n2\n").unwrap();
    fs::write(&second, "sqrt(x)\n").unwrap();

    eqplot()
        .arg(&first)
        .arg("--append")
        .arg(&second)
        .args(["--range", "-4", "4", "--samples", "2", "--step-multiplier", "1", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sqrt(x)= y\t#FF1493\t2\t0\t2\n"));
}

#[test]
fn invalid_line_fails_with_line_number() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.txt");
    fs::write(&file, "sin(x)\ncos(x\n").unwrap();

    eqplot()
        .arg(&file)
        .arg("--print")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();

    eqplot()
        .arg(dir.path().join("nope.txt"))
        .arg("--print")
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}

#[test]
fn inverted_range_is_rejected() {
    eqplot()
        .args(["--range", "5", "1", "--print"])
        .assert()
        .failure();
}
