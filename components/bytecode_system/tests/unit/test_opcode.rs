//! Tests for Opcode rendering and classification

use bytecode_system::{Constant, FieldRef, Label, LocalSlot, MethodRef, Opcode};

#[test]
fn test_slot_forms() {
    assert_eq!(Opcode::AStore(LocalSlot(3)).to_string(), "astore_3");
    assert_eq!(Opcode::AStore(LocalSlot(4)).to_string(), "astore 4");
    assert_eq!(Opcode::DLoad(LocalSlot(1)).to_string(), "dload_1");
    assert_eq!(Opcode::DStore(LocalSlot(7)).to_string(), "dstore 7");
}

#[test]
fn test_constant_forms() {
    assert_eq!(Opcode::Ldc(Constant::Integer(10)).to_string(), "ldc 10");
    assert_eq!(Opcode::Ldc2W(Constant::Real(2.0)).to_string(), "ldc2_w 2.0");
    assert_eq!(Opcode::Ldc2W(Constant::Real(3.5)).to_string(), "ldc2_w 3.5");
    assert_eq!(
        Opcode::Ldc(Constant::String("a \"b\"".to_string())).to_string(),
        "ldc \"a \\\"b\\\"\""
    );
}

#[test]
fn test_iconst_forms() {
    assert_eq!(Opcode::IConst(-1).to_string(), "iconst_m1");
    assert_eq!(Opcode::IConst(1).to_string(), "iconst_1");
    assert_eq!(Opcode::IConst(6).to_string(), "bipush 6");
}

#[test]
fn test_references() {
    let put = Opcode::PutField(FieldRef::new("Point", "x", "LInteger;"));
    assert_eq!(put.to_string(), "putfield Point/x LInteger;");

    let init = Opcode::InvokeSpecial(MethodRef::init("Integer", "I"));
    assert_eq!(init.to_string(), "invokespecial Integer/<init>(I)V");
}

#[test]
fn test_classification() {
    let label = Label::new("EndLoop_0");
    assert!(Opcode::Goto(label.clone()).is_unconditional_terminator());
    assert!(!Opcode::IfEq(label.clone()).is_unconditional_terminator());
    assert!(Opcode::DReturn.is_return());
    assert!(!Opcode::Goto(label.clone()).is_return());
    assert_eq!(Opcode::IfEq(label.clone()).branch_target(), Some(&label));
    assert_eq!(Opcode::Label(label).branch_target(), None);
}
