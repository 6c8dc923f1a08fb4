//! Parser to Bytecode Integration Tests
//!
//! Tests the integration between the parser crate and bytecode_system.
//! Verifies that checked programs lower to well-formed class units.

use bytecode_system::{ClassUnit, Opcode};
use integration_tests::samples::ACCOUNTS;
use parser::{BytecodeGenerator, Lexer, Parser, Program, SemanticAnalyzer};

fn checked(source: &str) -> Program {
    let tokens = Lexer::new(source).tokenize().expect("lexing failed");
    let mut program = Parser::new(tokens).parse().expect("parsing failed");
    SemanticAnalyzer::new()
        .analyze(&mut program)
        .expect("analysis failed");
    program
}

fn units(source: &str) -> Vec<ClassUnit> {
    BytecodeGenerator::new()
        .generate_units(&checked(source))
        .expect("generation failed")
}

/// Test: every class becomes one unit, in order, with its super class
#[test]
fn test_units_follow_declaration_order() {
    let units = units(ACCOUNTS);
    let names: Vec<(&str, &str)> = units
        .iter()
        .map(|u| (u.name.as_str(), u.super_class.as_str()))
        .collect();
    assert_eq!(
        names,
        vec![
            ("Account", "java/lang/Object"),
            ("Savings", "Account"),
            ("Bank", "java/lang/Object"),
        ]
    );
}

/// Test: fields keep their descriptors
#[test]
fn test_field_descriptors() {
    let units = units(ACCOUNTS);
    let savings = &units[1];
    assert_eq!(savings.fields.len(), 1);
    assert_eq!(savings.fields[0].name, "rate");
    assert_eq!(savings.fields[0].descriptor, "D");
}

/// Test: constructor calls the super initializer first
#[test]
fn test_constructor_prologue() {
    let units = units(ACCOUNTS);
    let init = units[1].method("<init>").expect("constructor");
    assert_eq!(init.descriptor, "(LInteger;)V");
    assert_eq!(init.instructions[0].to_string(), "    aload_0");
    assert_eq!(
        init.instructions[1].to_string(),
        "    invokespecial Account/<init>()V"
    );
    assert!(units[0]
        .methods
        .iter()
        .any(|m| m.name == "<init>" && m.descriptor == "()V"));
    assert!(matches!(
        init.instructions.last().map(|i| &i.opcode),
        Some(Opcode::Return)
    ));
}

/// Test: every method body ends in a terminator
#[test]
fn test_methods_end_with_terminator() {
    for unit in units(ACCOUNTS) {
        for method in &unit.methods {
            assert!(
                method.ends_with_terminator(),
                "{}.{} falls off its end",
                unit.name,
                method.name
            );
        }
    }
}

/// Test: main is static and its loop labels are balanced
#[test]
fn test_main_control_flow() {
    let units = units(ACCOUNTS);
    let main = units[2].method("main").expect("main");
    assert!(main.is_static);

    let text = main.to_string();
    for label in ["Loop_0:", "EndLoop_0:", "Else_1:"] {
        assert!(text.contains(label), "missing {}", label);
    }
    assert!(text.contains("invokevirtual Savings/deposit(LInteger;)LInteger;\n    pop\n"));
    assert!(text.contains("invokevirtual java/io/PrintStream/println(D)V"));
}

/// Test: inherited fields resolve to their declaring class
#[test]
fn test_inherited_field_owner() {
    let units = units(ACCOUNTS);
    let interest = units[1].method("interest").expect("interest");
    let text = interest.to_string();
    assert!(text.contains("getfield Account/balance LInteger;"));
    assert!(text.contains("getfield Savings/rate D"));
    assert!(text.contains("invokestatic Real/Mult(DD)D"));
    assert!(text.contains("dreturn"));
}
