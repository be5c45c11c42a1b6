// Copyright (c) 2016-2021 Fabian Schuiki

//! Command line behaviour of the `bnfmerge` binary.

mod common;
use common::COLUMNS;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Write the column grammar into a fresh directory for one test.
fn fixture(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bnfmerge-cli-{}-{}", std::process::id(), test));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("columns.xml");
    std::fs::write(&path, COLUMNS).unwrap();
    path
}

fn bnfmerge(args: &[&str], input: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bnfmerge"))
        .args(args)
        .arg(input)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn missing_filter_root_fails() {
    let input = fixture("missing_filter_root_fails");
    let out = bnfmerge(&["-f", "nothing"], &input);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("symbol 'nothing' not found"));
    assert!(stdout(&out).is_empty());
}

#[test]
fn filter_root_is_bnfc_entrypoint() {
    let input = fixture("filter_root_is_bnfc_entrypoint");
    let out = bnfmerge(&["-b", "-f", "column list"], &input);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("entrypoints ColumnList ;\n\n"), "{}", text);
    assert!(!text.contains("Digit"));

    let out = bnfmerge(
        &["-b", "-f", "column list", "--entrypoint", "column name"],
        &input,
    );
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("entrypoints ColumnName ;\n\n"));
}

#[test]
fn layout_flags_only_affect_plain_bnf() {
    let input = fixture("layout_flags_only_affect_plain_bnf");
    let out = bnfmerge(&["-a", "-s", "-e"], &input);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("digit: '0' | '1' | '2' ;\n\n"), "{}", text);

    let out = bnfmerge(&["-s", "-e"], &input);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(!text.contains(';'));
    assert!(!text.contains("\n\n"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn roots_without_grammar() {
    let input = fixture("roots_without_grammar");
    let out = bnfmerge(&["-g", "-r"], &input);
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "Grammar tree root: <unsigned integer>\nGrammar tree root: <column list>\n"
    );

    let out = bnfmerge(&["-g"], &input);
    assert!(out.status.success());
    assert!(stdout(&out).is_empty());
}

#[test]
fn unreadable_input_fails() {
    let input = fixture("unreadable_input_fails");
    let missing = input.with_file_name("missing.xml");
    let out = bnfmerge(&[], &missing);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("cannot read"));
}

#[test]
fn conflicting_styles_are_rejected() {
    let input = fixture("conflicting_styles_are_rejected");
    assert!(!bnfmerge(&["-b", "-x"], &input).status.success());
    assert!(!bnfmerge(&["-b", "-a"], &input).status.success());
    assert!(!bnfmerge(&["-x", "-a"], &input).status.success());
    // Strict BNF combines with any output style.
    let out = bnfmerge(&["-n", "-x"], &input);
    assert!(out.status.success());
    assert!(stdout(&out).contains("unsigned integer = unsigned integer seq A ;"));
}
