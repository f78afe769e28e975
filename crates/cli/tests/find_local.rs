use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn python_fixture(source: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".py")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(source.as_bytes())
        .expect("failed to write fixture");
    file
}

#[test]
fn finds_function_in_local_python_file() {
    let file = python_fixture("# greeting helper\ndef greet():\n    return \"hi\"\n");

    Command::cargo_bin("repofind")
        .unwrap()
        .args(["find-local", file.path().to_str().unwrap(), "greet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("def greet():"))
        .stdout(predicate::str::contains("return \"hi\""));
}

#[test]
fn json_output_carries_the_span() {
    let file = python_fixture("def greet():\n    return \"hi\"\n");

    let assert = Command::cargo_bin("repofind")
        .unwrap()
        .args([
            "find-local",
            file.path().to_str().unwrap(),
            "greet",
            "--json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(value["found"], true);
    assert_eq!(value["start_line"], 0);
    assert_eq!(value["end_line"], 2);
    assert_eq!(value["text"], "def greet():\n    return \"hi\"");
}

#[test]
fn missing_function_exits_nonzero() {
    let file = python_fixture("def greet():\n    return \"hi\"\n");

    Command::cargo_bin("repofind")
        .unwrap()
        .args(["find-local", file.path().to_str().unwrap(), "absent"])
        .assert()
        .failure();
}

#[test]
fn json_not_found_reports_found_false() {
    let file = python_fixture("def greet():\n    return \"hi\"\n");

    let assert = Command::cargo_bin("repofind")
        .unwrap()
        .args([
            "find-local",
            file.path().to_str().unwrap(),
            "absent",
            "--json",
        ])
        .assert()
        .failure();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(value["found"], false);
}
