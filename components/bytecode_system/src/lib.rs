//! Textual stack-machine bytecode for the O compiler
//!
//! This crate provides the instruction model the code generator emits:
//! class units with field directives and method bodies rendered as
//! class-file assembly text.
//!
//! # Features
//!
//! - Stack-machine opcodes with explicit local-slot load/store
//! - Type descriptors for fields and method signatures
//! - Static table of built-in method descriptors
//! - Unbounded unique label generation
//! - Peephole cleanup of unreachable instructions
//!
//! # Example
//!
//! ```
//! use bytecode_system::{ClassUnit, Constant, MethodChunk, Opcode};
//!
//! let mut method = MethodChunk::new("greeting", "()Ljava/lang/String;");
//! method.emit(Opcode::Ldc(Constant::String("hello".to_string())));
//! method.emit(Opcode::AReturn);
//!
//! let mut class = ClassUnit::new("Test", "java/lang/Object");
//! class.add_method(method);
//!
//! let text = class.to_string();
//! assert!(text.starts_with(".class public Test\n.super java/lang/Object\n"));
//! assert!(text.contains("    ldc \"hello\"\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builtins;
pub mod chunk;
pub mod class_unit;
pub mod descriptor;
pub mod instruction;
pub mod label;
pub mod opcode;
pub mod optimizer;
pub mod value;

// Re-export main types at crate root
pub use builtins::{lookup_builtin, BuiltinMethod, Dispatch};
pub use chunk::MethodChunk;
pub use class_unit::{ClassUnit, FieldDirective};
pub use core_types::SourcePosition;
pub use descriptor::{descriptor_for, internal_name, method_descriptor, slot_width};
pub use instruction::Instruction;
pub use label::{Label, LabelGenerator};
pub use opcode::{FieldRef, LocalSlot, MethodRef, Opcode};
pub use optimizer::Optimizer;
pub use value::Constant;
