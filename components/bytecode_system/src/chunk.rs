//! Method chunk - one compiled method body
//!
//! Contains the method header, frame limits and instruction list.

use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::optimizer::Optimizer;
use core_types::SourcePosition;
use std::fmt;

/// Default operand stack limit written into every method header
pub const DEFAULT_STACK_LIMIT: u16 = 1000;

/// A compiled method body
#[derive(Debug, Clone, PartialEq)]
pub struct MethodChunk {
    /// Method name (`<init>` for constructors)
    pub name: String,
    /// Method descriptor, e.g. `(LInteger;)V`
    pub descriptor: String,
    /// Whether the method is static
    pub is_static: bool,
    /// Operand stack limit
    pub stack_limit: u16,
    /// Number of local slots used, including `this` and arguments
    pub locals_limit: u16,
    /// Sequence of instructions
    pub instructions: Vec<Instruction>,
}

impl MethodChunk {
    /// Create a new empty instance method
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: descriptor.into(),
            is_static: false,
            stack_limit: DEFAULT_STACK_LIMIT,
            locals_limit: 1,
            instructions: Vec::new(),
        }
    }

    /// Create a new empty static method
    pub fn new_static(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            is_static: true,
            ..Self::new(name, descriptor)
        }
    }

    /// Emit an instruction without source position
    pub fn emit(&mut self, opcode: Opcode) {
        self.instructions.push(Instruction::new(opcode));
    }

    /// Emit an instruction with source position
    pub fn emit_with_position(&mut self, opcode: Opcode, position: Option<SourcePosition>) {
        self.instructions.push(Instruction {
            opcode,
            source_position: position,
        });
    }

    /// Get the number of instructions
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Check whether control cannot fall off the end of the method
    pub fn ends_with_terminator(&self) -> bool {
        self.instructions
            .last()
            .map(|i| i.opcode.is_unconditional_terminator())
            .unwrap_or(false)
    }

    /// Run peephole cleanup on this method
    pub fn optimize(&mut self) {
        let mut optimizer = Optimizer::new();
        optimizer.optimize(self);
    }
}

impl fmt::Display for MethodChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".method public ")?;
        if self.is_static {
            write!(f, "static ")?;
        }
        writeln!(f, "{}{}", self.name, self.descriptor)?;
        writeln!(f, "    .limit stack {}", self.stack_limit)?;
        writeln!(f, "    .limit locals {}", self.locals_limit)?;
        for inst in &self.instructions {
            writeln!(f, "{}", inst)?;
        }
        writeln!(f, ".end method")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;

    #[test]
    fn test_chunk_creation() {
        let chunk = MethodChunk::new("run", "()V");
        assert_eq!(chunk.instruction_count(), 0);
        assert!(!chunk.is_static);
        assert_eq!(chunk.locals_limit, 1);
    }

    #[test]
    fn test_ends_with_terminator() {
        let mut chunk = MethodChunk::new("run", "()V");
        assert!(!chunk.ends_with_terminator());
        chunk.emit(Opcode::Return);
        assert!(chunk.ends_with_terminator());
    }

    #[test]
    fn test_display_static_header() {
        let mut chunk = MethodChunk::new_static("main", "([Ljava/lang/String;)V");
        chunk.emit(Opcode::Return);
        let text = chunk.to_string();
        assert!(text.starts_with(".method public static main([Ljava/lang/String;)V\n"));
        assert!(text.ends_with("    return\n.end method\n"));
    }

    #[test]
    fn test_display_labels_unindented() {
        let mut chunk = MethodChunk::new("spin", "()V");
        chunk.emit(Opcode::Label(Label::new("Loop_0")));
        chunk.emit(Opcode::Goto(Label::new("Loop_0")));
        let text = chunk.to_string();
        assert!(text.contains("\nLoop_0:\n    goto Loop_0\n"));
    }
}
