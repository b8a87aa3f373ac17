//! Command-line interface tests

use assert_cmd::Command;
use dirtree::test_utils::TestTree;
use predicates::prelude::*;

fn dirtree() -> Command {
    let mut cmd = Command::cargo_bin("dirtree").unwrap();
    cmd.env_remove("FORCE_COLOR");
    cmd
}

#[test]
fn test_help_lists_flags() {
    dirtree()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--include"))
        .stdout(predicate::str::contains("--no-smart-exclude"))
        .stdout(predicate::str::contains("--llm-max-size"));
}

#[test]
fn test_version() {
    dirtree()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dirtree "));
}

#[test]
fn test_unknown_style_rejected() {
    let tree = TestTree::new();
    dirtree()
        .current_dir(tree.path())
        .args(["--style", "fancy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fancy"));
}

#[test]
fn test_summary_line() {
    let tree = TestTree::with_paths(&["a/b.txt", "c.txt"]);
    dirtree()
        .current_dir(tree.path())
        .assert()
        .success()
        .stdout(predicate::str::ends_with("\n1 directories, 2 files\n"));
}

#[test]
fn test_bad_pattern_exit_code() {
    let tree = TestTree::new();
    dirtree()
        .current_dir(tree.path())
        .args(["-E", "a**b"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("dirtree: invalid pattern 'a**b'"));
}

#[test]
fn test_bad_size_checked_before_walk() {
    let tree = TestTree::new();
    dirtree()
        .current_dir(tree.path())
        .args(["-L", "--llm-max-size=-5k", "missing-dir"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid size"));
}

#[test]
fn test_decimal_size_accepted() {
    let tree = TestTree::with_paths(&["a.txt"]);
    let out = TestTree::new();
    dirtree()
        .current_dir(tree.path())
        .args(["-L", "--llm-max-size", "1.5k", "--llm-output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("1/1 files with content"));

    let text = std::fs::read_dir(out.path())
        .unwrap()
        .map(|e| std::fs::read_to_string(e.unwrap().path()).unwrap())
        .next()
        .unwrap();
    assert!(text.contains("*Maximum file size for inclusion: 1.5 KB*"));
}

#[test]
fn test_json_is_not_mixed_with_tree() {
    let tree = TestTree::with_paths(&["a.txt"]);
    dirtree()
        .current_dir(tree.path())
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("directories,").not());
}
