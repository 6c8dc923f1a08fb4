//! Stack-machine opcodes
//!
//! Defines the instruction set emitted by the code generator. Each opcode
//! renders as one line of class-file assembly text.

use crate::label::Label;
use crate::value::Constant;
use std::fmt;

/// Local variable slot index
///
/// Slot 0 of an instance method holds `this`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalSlot(pub u16);

/// Symbolic reference to a method: `owner/name(params)ret`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    /// Internal name of the declaring class
    pub owner: String,
    /// Method name
    pub name: String,
    /// Method descriptor, e.g. `(LInteger;)LBoolean;`
    pub descriptor: String,
}

impl MethodRef {
    /// Create a new method reference
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Reference to an instance initializer
    pub fn init(owner: impl Into<String>, parameters: &str) -> Self {
        Self::new(owner, "<init>", format!("({})V", parameters))
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}{}", self.owner, self.name, self.descriptor)
    }
}

/// Symbolic reference to a field: `owner/name descriptor`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    /// Internal name of the declaring class
    pub owner: String,
    /// Field name
    pub name: String,
    /// Field type descriptor
    pub descriptor: String,
}

impl FieldRef {
    /// Create a new field reference
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.owner, self.name, self.descriptor)
    }
}

/// Stack-machine opcodes
#[derive(Debug, Clone, PartialEq)]
pub enum Opcode {
    // Locals
    /// Load reference from local slot
    ALoad(LocalSlot),
    /// Store reference into local slot
    AStore(LocalSlot),
    /// Load double from local slot
    DLoad(LocalSlot),
    /// Store double into local slot
    DStore(LocalSlot),

    // Constants
    /// Push int or string constant
    Ldc(Constant),
    /// Push double constant
    Ldc2W(Constant),
    /// Push small int constant (`iconst_<n>`)
    IConst(i8),

    // Objects
    /// Allocate an uninitialized instance
    New(String),
    /// Duplicate top of stack
    Dup,
    /// Discard one stack word
    Pop,
    /// Discard two stack words
    Pop2,
    /// Allocate a reference array of the given element class
    ANewArray(String),
    /// Load reference from array
    AALoad,
    /// Store reference into array
    AAStore,

    // Fields
    /// Read a static field
    GetStatic(FieldRef),
    /// Read an instance field
    GetField(FieldRef),
    /// Write an instance field
    PutField(FieldRef),

    // Calls
    /// Virtual dispatch call
    InvokeVirtual(MethodRef),
    /// Non-virtual call (initializers, super calls)
    InvokeSpecial(MethodRef),
    /// Static call
    InvokeStatic(MethodRef),

    // Control flow
    /// Branch if int on top of stack is zero
    IfEq(Label),
    /// Unconditional branch
    Goto(Label),
    /// Branch target marker
    Label(Label),
    /// Return from void method
    Return,
    /// Return reference
    AReturn,
    /// Return double
    DReturn,
}

impl Opcode {
    /// Check if control never falls through this opcode
    pub fn is_unconditional_terminator(&self) -> bool {
        matches!(
            self,
            Opcode::Goto(_) | Opcode::Return | Opcode::AReturn | Opcode::DReturn
        )
    }

    /// Check if this opcode is a return of any kind
    pub fn is_return(&self) -> bool {
        matches!(self, Opcode::Return | Opcode::AReturn | Opcode::DReturn)
    }

    /// Check if this opcode is a label marker
    pub fn is_label(&self) -> bool {
        matches!(self, Opcode::Label(_))
    }

    /// Label referenced by a branch, if any
    pub fn branch_target(&self) -> Option<&Label> {
        match self {
            Opcode::IfEq(label) | Opcode::Goto(label) => Some(label),
            _ => None,
        }
    }
}

fn write_slot(f: &mut fmt::Formatter<'_>, mnemonic: &str, slot: LocalSlot) -> fmt::Result {
    if slot.0 <= 3 {
        write!(f, "{}_{}", mnemonic, slot.0)
    } else {
        write!(f, "{} {}", mnemonic, slot.0)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::ALoad(slot) => write_slot(f, "aload", *slot),
            Opcode::AStore(slot) => write_slot(f, "astore", *slot),
            Opcode::DLoad(slot) => write_slot(f, "dload", *slot),
            Opcode::DStore(slot) => write_slot(f, "dstore", *slot),
            Opcode::Ldc(constant) => write!(f, "ldc {}", constant),
            Opcode::Ldc2W(constant) => write!(f, "ldc2_w {}", constant),
            Opcode::IConst(-1) => write!(f, "iconst_m1"),
            Opcode::IConst(n) if (0..=5).contains(n) => write!(f, "iconst_{}", n),
            Opcode::IConst(n) => write!(f, "bipush {}", n),
            Opcode::New(class) => write!(f, "new {}", class),
            Opcode::Dup => write!(f, "dup"),
            Opcode::Pop => write!(f, "pop"),
            Opcode::Pop2 => write!(f, "pop2"),
            Opcode::ANewArray(class) => write!(f, "anewarray {}", class),
            Opcode::AALoad => write!(f, "aaload"),
            Opcode::AAStore => write!(f, "aastore"),
            Opcode::GetStatic(field) => write!(f, "getstatic {}", field),
            Opcode::GetField(field) => write!(f, "getfield {}", field),
            Opcode::PutField(field) => write!(f, "putfield {}", field),
            Opcode::InvokeVirtual(method) => write!(f, "invokevirtual {}", method),
            Opcode::InvokeSpecial(method) => write!(f, "invokespecial {}", method),
            Opcode::InvokeStatic(method) => write!(f, "invokestatic {}", method),
            Opcode::IfEq(label) => write!(f, "ifeq {}", label),
            Opcode::Goto(label) => write!(f, "goto {}", label),
            Opcode::Label(label) => write!(f, "{}:", label),
            Opcode::Return => write!(f, "return"),
            Opcode::AReturn => write!(f, "areturn"),
            Opcode::DReturn => write!(f, "dreturn"),
        }
    }
}
