//! Tests for the peephole optimizer

use bytecode_system::{Label, LocalSlot, MethodChunk, Opcode, Optimizer};

fn chunk_of(opcodes: Vec<Opcode>) -> MethodChunk {
    let mut chunk = MethodChunk::new("test", "()V");
    for op in opcodes {
        chunk.emit(op);
    }
    chunk
}

#[test]
fn test_if_else_shape_survives() {
    // Branch targets that are referenced must stay.
    let else_label = Label::new("Else_0");
    let end_label = Label::new("EndIf_0");
    let mut chunk = chunk_of(vec![
        Opcode::IfEq(else_label.clone()),
        Opcode::ALoad(LocalSlot(1)),
        Opcode::AStore(LocalSlot(2)),
        Opcode::Goto(end_label.clone()),
        Opcode::Label(else_label),
        Opcode::ALoad(LocalSlot(3)),
        Opcode::AStore(LocalSlot(2)),
        Opcode::Label(end_label),
        Opcode::Return,
    ]);
    let before = chunk.clone();

    Optimizer::new().optimize(&mut chunk);
    assert_eq!(chunk, before);
}

#[test]
fn test_both_branches_return() {
    let else_label = Label::new("Else_0");
    let end_label = Label::new("EndIf_0");
    let mut chunk = chunk_of(vec![
        Opcode::IfEq(else_label.clone()),
        Opcode::ALoad(LocalSlot(1)),
        Opcode::AReturn,
        Opcode::Goto(end_label.clone()),
        Opcode::Label(else_label),
        Opcode::ALoad(LocalSlot(2)),
        Opcode::AReturn,
        Opcode::Label(end_label),
        Opcode::Return,
    ]);

    Optimizer::new().optimize(&mut chunk);

    let rendered: Vec<String> = chunk.instructions.iter().map(|i| i.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "    ifeq Else_0",
            "    aload_1",
            "    areturn",
            "Else_0:",
            "    aload_2",
            "    areturn",
        ]
    );
}

#[test]
fn test_single_pass_limit() {
    let mut chunk = chunk_of(vec![
        Opcode::Return,
        Opcode::Label(Label::new("Orphan")),
        Opcode::Dup,
    ]);

    Optimizer::new().with_max_passes(1).optimize(&mut chunk);
    // The orphan label goes in pass one; the code behind it needs a second pass.
    assert_eq!(chunk.instruction_count(), 2);

    Optimizer::new().optimize(&mut chunk);
    assert_eq!(chunk.instruction_count(), 1);
}
