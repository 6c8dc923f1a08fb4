//! Tests for Instruction struct

use bytecode_system::{Instruction, Label, LocalSlot, Opcode, SourcePosition};

#[test]
fn test_instruction_creation() {
    let inst = Instruction::new(Opcode::Dup);
    assert!(matches!(inst.opcode, Opcode::Dup));
    assert!(inst.source_position.is_none());
}

#[test]
fn test_instruction_with_source_position() {
    let pos = SourcePosition {
        line: 10,
        column: 5,
        offset: 100,
    };
    let inst = Instruction::with_position(Opcode::Pop, pos);
    match inst.source_position {
        Some(sp) => {
            assert_eq!(sp.line, 10);
            assert_eq!(sp.column, 5);
            assert_eq!(sp.offset, 100);
        }
        None => panic!("Expected source position"),
    }
}

#[test]
fn test_instruction_display_indented() {
    let inst = Instruction::new(Opcode::ALoad(LocalSlot(2)));
    assert_eq!(inst.to_string(), "    aload_2");
}

#[test]
fn test_label_display_flush_left() {
    let inst = Instruction::new(Opcode::Label(Label::new("Else_3")));
    assert_eq!(inst.to_string(), "Else_3:");
}
