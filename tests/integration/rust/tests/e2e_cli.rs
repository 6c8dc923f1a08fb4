//! End-to-End CLI Tests
//!
//! Drives the compiler the way the `oc` binary does: flags in, text out.

use clap::Parser as ClapParser;
use integration_tests::samples::ACCOUNTS;
use o_cli::{Cli, CliError};
use std::io::Write;
use tempfile::NamedTempFile;

fn run(args: &[&str]) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(args).expect("arguments");
    let driver = cli.driver();
    match (&cli.file, &cli.eval) {
        (Some(path), _) => driver.compile_file(path),
        (None, Some(code)) => driver.compile_source(code),
        (None, None) => Err(CliError::NoInput),
    }
}

/// Test: compiling a file from disk
#[test]
fn test_compile_file_from_flags() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(ACCOUNTS.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let text = run(&["oc", "--file", &path]).unwrap();
    assert!(text.contains(".class public Bank"));
}

/// Test: inline code with an AST dump
#[test]
fn test_eval_with_ast_dump() {
    let text = run(&["oc", "-e", "class A is var x: Integer := 10 end", "--print-ast", "--no-optimize"]).unwrap();
    assert!(text.starts_with("Program\n  class: A\n    declaration: x (Integer)\n"));
    assert!(text.contains(".field private x LInteger;"));
}

/// Test: no input is an error
#[test]
fn test_no_input() {
    assert!(matches!(run(&["oc"]), Err(CliError::NoInput)));
}

/// Test: peephole cleanup follows --no-optimize
#[test]
fn test_no_optimize_keeps_dead_jump() {
    let source = "class A is method m(b: Boolean) Integer is if b then return 1 else return 2 end end end";
    let optimized = run(&["oc", "-e", source]).unwrap();
    let plain = run(&["oc", "-e", source, "--no-optimize"]).unwrap();
    assert!(!optimized.contains("goto EndIf_0"));
    assert!(plain.contains("goto EndIf_0"));
}
