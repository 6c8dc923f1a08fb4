//! Full Pipeline Integration Tests
//!
//! Source text in, assembly text or a classified error out.

use core_types::ErrorKind;
use integration_tests::samples::ACCOUNTS;
use parser::compile;

/// Test: the sample program compiles to three class units
#[test]
fn test_sample_compiles() {
    let text = compile(ACCOUNTS).expect("compilation failed");
    assert_eq!(text.matches(".class public ").count(), 3);
    assert_eq!(text.matches(".end method").count(), 6);
}

/// Test: unused declarations never reach the output
#[test]
fn test_unused_declarations_dropped() {
    let text = compile(
        "class A is \
           var unused: Integer := 1 \
           method main() is var tmp: Integer := 2 print(3) end \
         end",
    )
    .unwrap();
    assert!(!text.contains("unused"));
    assert!(!text.contains("astore_1"));
}

/// Test: statements after a return never reach the output
#[test]
fn test_unreachable_statements_dropped() {
    let text = compile(
        "class A is method m() Integer is return 1 print(\"dead\") end end",
    )
    .unwrap();
    assert!(!text.contains("dead"));
}

/// Test: the first error of each stage is classified
#[test]
fn test_error_kinds_by_stage() {
    let cases = [
        ("class A is $ end", ErrorKind::LexError),
        ("class A end", ErrorKind::ParseError),
        ("class B extends A is end", ErrorKind::UndefinedClass),
        ("class A is method m() Integer is return z end end", ErrorKind::UndefinedIdentifier),
        ("class A is method m(i: Integer) is i.Nope() end end", ErrorKind::UnknownMethod),
        ("class A is end class A is end", ErrorKind::DuplicateDeclaration),
        ("class A is method m() Integer is return true end end", ErrorKind::TypeMismatch),
        ("class A is method m(i: Integer) Integer is return i.Plus() end end", ErrorKind::ArityMismatch),
        ("class A is var x: Integer method main() is print(x) end end", ErrorKind::UnsupportedConstruct),
    ];

    for (source, expected) in cases {
        let err = compile(source).unwrap_err();
        assert_eq!(err.kind, expected, "source: {}", source);
    }
}

/// Test: compile errors report line and column
#[test]
fn test_error_positions() {
    let err = compile("class A is\n  method m() is\n    undefined := 1\n  end\nend").unwrap_err();
    let position = err.source_position.expect("position");
    assert_eq!((position.line, position.column), (3, 5));
}

/// Test: compilation is deterministic
#[test]
fn test_output_is_deterministic() {
    assert_eq!(compile(ACCOUNTS).unwrap(), compile(ACCOUNTS).unwrap());
}
