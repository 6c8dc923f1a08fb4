//! Contract compliance tests for bytecode_system
//! Verifies the public surface the code generator relies on

use bytecode_system::builtins::{boolean_text, integer_value, string_equals, system_out};
use bytecode_system::{
    descriptor_for, lookup_builtin, method_descriptor, slot_width, Dispatch, LabelGenerator,
};

#[test]
fn test_contract_descriptor_mapping() {
    assert_eq!(descriptor_for("Integer"), "LInteger;");
    assert_eq!(descriptor_for("String"), "Ljava/lang/String;");
    assert_eq!(descriptor_for("Real"), "D");
    assert_eq!(descriptor_for("Boolean"), "LBoolean;");
    assert_eq!(descriptor_for("Void"), "V");
    assert_eq!(descriptor_for("Array[String]"), "[Ljava/lang/String;");
    assert_eq!(descriptor_for("Animal"), "LAnimal;");
}

#[test]
fn test_contract_method_descriptor() {
    assert_eq!(
        method_descriptor(&["Integer", "Real"], Some("Boolean")),
        "(LInteger;D)LBoolean;"
    );
    assert_eq!(method_descriptor::<&str>(&[], None), "()V");
}

#[test]
fn test_contract_slot_width() {
    assert_eq!(slot_width("D"), 2);
    assert_eq!(slot_width("LInteger;"), 1);
    assert_eq!(slot_width("V"), 0);
}

#[test]
fn test_contract_builtin_coverage() {
    for name in ["Plus", "Minus", "Mult", "Div", "Rem", "Less", "LessEqual", "Greater", "GreaterEqual", "Equal"] {
        assert!(lookup_builtin("Integer", name).is_some(), "Integer.{}", name);
        assert!(lookup_builtin("Real", name).is_some(), "Real.{}", name);
    }
    for name in ["And", "Or", "Xor", "Not"] {
        assert!(lookup_builtin("Boolean", name).is_some(), "Boolean.{}", name);
    }
    let concat = lookup_builtin("String", "Concat").unwrap();
    assert!(concat.variadic);
    let substring = lookup_builtin("String", "Substring").unwrap();
    assert!(substring.unbox_arguments);
    assert_eq!(substring.dispatch, Dispatch::Virtual);
}

#[test]
fn test_contract_runtime_helpers() {
    assert_eq!(integer_value().to_string(), "Integer/getValue()I");
    assert_eq!(boolean_text().to_string(), "Boolean/getBool()Ljava/lang/String;");
    assert_eq!(
        string_equals().to_string(),
        "java/lang/String/equals(Ljava/lang/Object;)Z"
    );
    assert_eq!(
        system_out().to_string(),
        "java/lang/System/out Ljava/io/PrintStream;"
    );
}

#[test]
fn test_contract_label_uniqueness() {
    let mut labels = LabelGenerator::new();
    let (else_a, end_a) = labels.if_labels();
    let (else_b, _) = labels.if_labels();
    let (loop_c, _) = labels.loop_labels();
    assert_ne!(else_a, else_b);
    assert_ne!(end_a.name(), loop_c.name());
    assert_eq!(labels.issued(), 3);
}
