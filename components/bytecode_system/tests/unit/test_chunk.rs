//! Tests for MethodChunk and ClassUnit

use bytecode_system::{ClassUnit, Constant, Label, MethodChunk, Opcode, SourcePosition};

#[test]
fn test_chunk_limits_in_header() {
    let mut chunk = MethodChunk::new("get", "()LInteger;");
    chunk.locals_limit = 3;
    chunk.emit(Opcode::AReturn);

    let text = chunk.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], ".method public get()LInteger;");
    assert_eq!(lines[1], "    .limit stack 1000");
    assert_eq!(lines[2], "    .limit locals 3");
    assert_eq!(lines[3], "    areturn");
    assert_eq!(lines[4], ".end method");
}

#[test]
fn test_emit_with_position_keeps_position() {
    let mut chunk = MethodChunk::new("run", "()V");
    let pos = SourcePosition::offset_only(12);
    chunk.emit_with_position(Opcode::Return, Some(pos));
    assert_eq!(chunk.instructions[0].source_position, Some(pos));
}

#[test]
fn test_chunk_optimize_drops_dead_tail() {
    let mut chunk = MethodChunk::new("run", "()V");
    chunk.emit(Opcode::Return);
    chunk.emit(Opcode::Ldc(Constant::Integer(1)));
    chunk.emit(Opcode::Pop);
    chunk.optimize();
    assert_eq!(chunk.instruction_count(), 1);
}

#[test]
fn test_class_unit_rendering_order() {
    let mut class = ClassUnit::new("Counter", "Base");
    class.add_field("count", "LInteger;");
    class.add_field("name", "Ljava/lang/String;");

    let mut tick = MethodChunk::new("tick", "()V");
    tick.emit(Opcode::Label(Label::new("Loop_0")));
    tick.emit(Opcode::Return);
    class.add_method(tick);

    let text = class.to_string();
    assert!(text.starts_with(".class public Counter\n.super Base\n"));
    assert!(text.contains(".field private count LInteger;\n.field private name Ljava/lang/String;\n"));
    assert!(text.contains(".method public tick()V\n"));
    assert!(text.contains("\nLoop_0:\n"));
}
