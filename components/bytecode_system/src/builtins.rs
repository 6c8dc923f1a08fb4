//! Static table of built-in method descriptors
//!
//! Numeric, boolean and string receivers expose a fixed set of methods.
//! `Integer` and `Boolean` are boxed runtime classes called virtually;
//! `Real` is an unboxed double whose operations are static helpers on the
//! `Real` runtime class; `String` maps onto `java/lang/String`.

use crate::opcode::{FieldRef, MethodRef, Opcode};

/// How a built-in is invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// `invokevirtual` on the receiver
    Virtual,
    /// `invokestatic` with the receiver as first operand
    Static,
}

/// One entry of the built-in method table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinMethod {
    /// Source type name of the receiver
    pub receiver: &'static str,
    /// Source-level method name
    pub name: &'static str,
    /// Class that implements the method
    pub owner: &'static str,
    /// Method name in the emitted instruction
    pub target: &'static str,
    /// Method descriptor in the emitted instruction
    pub descriptor: &'static str,
    /// Call kind
    pub dispatch: Dispatch,
    /// Source type names of the explicit arguments
    pub argument_types: &'static [&'static str],
    /// Source type name of the result
    pub return_type: &'static str,
    /// Arguments are boxed `Integer`s that must be unboxed to `int` first
    pub unbox_arguments: bool,
    /// The call is applied once per argument (`Concat`)
    pub variadic: bool,
}

impl BuiltinMethod {
    /// Symbolic reference to the implementing method
    pub fn method_ref(&self) -> MethodRef {
        MethodRef::new(self.owner, self.target, self.descriptor)
    }

    /// Call instruction for this built-in
    pub fn call(&self) -> Opcode {
        match self.dispatch {
            Dispatch::Virtual => Opcode::InvokeVirtual(self.method_ref()),
            Dispatch::Static => Opcode::InvokeStatic(self.method_ref()),
        }
    }
}

macro_rules! builtin {
    ($recv:expr, $name:expr, $owner:expr, $target:expr, $desc:expr, $dispatch:ident,
     [$($arg:expr),*], $ret:expr) => {
        BuiltinMethod {
            receiver: $recv,
            name: $name,
            owner: $owner,
            target: $target,
            descriptor: $desc,
            dispatch: Dispatch::$dispatch,
            argument_types: &[$($arg),*],
            return_type: $ret,
            unbox_arguments: false,
            variadic: false,
        }
    };
}

/// Every built-in method, keyed by receiver type and source name
pub static BUILTIN_METHODS: &[BuiltinMethod] = &[
    // Integer
    builtin!("Integer", "Plus", "Integer", "Plus", "(LInteger;)LInteger;", Virtual, ["Integer"], "Integer"),
    builtin!("Integer", "Minus", "Integer", "Minus", "(LInteger;)LInteger;", Virtual, ["Integer"], "Integer"),
    builtin!("Integer", "Mult", "Integer", "Mult", "(LInteger;)LInteger;", Virtual, ["Integer"], "Integer"),
    builtin!("Integer", "Div", "Integer", "Div", "(LInteger;)LInteger;", Virtual, ["Integer"], "Integer"),
    builtin!("Integer", "Rem", "Integer", "Rem", "(LInteger;)LInteger;", Virtual, ["Integer"], "Integer"),
    builtin!("Integer", "Less", "Integer", "Less", "(LInteger;)LBoolean;", Virtual, ["Integer"], "Boolean"),
    builtin!("Integer", "LessEqual", "Integer", "LessEqual", "(LInteger;)LBoolean;", Virtual, ["Integer"], "Boolean"),
    builtin!("Integer", "Greater", "Integer", "Greater", "(LInteger;)LBoolean;", Virtual, ["Integer"], "Boolean"),
    builtin!("Integer", "GreaterEqual", "Integer", "GreaterEqual", "(LInteger;)LBoolean;", Virtual, ["Integer"], "Boolean"),
    builtin!("Integer", "Equal", "Integer", "Equal", "(LInteger;)LBoolean;", Virtual, ["Integer"], "Boolean"),
    builtin!("Integer", "toReal", "Integer", "toReal", "()D", Virtual, [], "Real"),
    builtin!("Integer", "toBoolean", "Integer", "toBoolean", "()LBoolean;", Virtual, [], "Boolean"),
    builtin!("Integer", "UnaryMinus", "Integer", "UnaryMinus", "()LInteger;", Virtual, [], "Integer"),
    // Real
    builtin!("Real", "Plus", "Real", "Plus", "(DD)D", Static, ["Real"], "Real"),
    builtin!("Real", "Minus", "Real", "Minus", "(DD)D", Static, ["Real"], "Real"),
    builtin!("Real", "Mult", "Real", "Mult", "(DD)D", Static, ["Real"], "Real"),
    builtin!("Real", "Div", "Real", "Div", "(DD)D", Static, ["Real"], "Real"),
    builtin!("Real", "Rem", "Real", "Rem", "(DD)D", Static, ["Real"], "Real"),
    builtin!("Real", "Less", "Real", "Less", "(DD)LBoolean;", Static, ["Real"], "Boolean"),
    builtin!("Real", "LessEqual", "Real", "LessEqual", "(DD)LBoolean;", Static, ["Real"], "Boolean"),
    builtin!("Real", "Greater", "Real", "Greater", "(DD)LBoolean;", Static, ["Real"], "Boolean"),
    builtin!("Real", "GreaterEqual", "Real", "GreaterEqual", "(DD)LBoolean;", Static, ["Real"], "Boolean"),
    builtin!("Real", "Equal", "Real", "Equal", "(DD)LBoolean;", Static, ["Real"], "Boolean"),
    builtin!("Real", "toInteger", "Real", "toInteger", "(D)LInteger;", Static, [], "Integer"),
    builtin!("Real", "UnaryMinus", "Real", "UnaryMinus", "(D)D", Static, [], "Real"),
    // Boolean
    builtin!("Boolean", "Or", "Boolean", "Or", "(LBoolean;)LBoolean;", Virtual, ["Boolean"], "Boolean"),
    builtin!("Boolean", "And", "Boolean", "And", "(LBoolean;)LBoolean;", Virtual, ["Boolean"], "Boolean"),
    builtin!("Boolean", "Xor", "Boolean", "Xor", "(LBoolean;)LBoolean;", Virtual, ["Boolean"], "Boolean"),
    builtin!("Boolean", "Not", "Boolean", "Not", "()LBoolean;", Virtual, [], "Boolean"),
    builtin!("Boolean", "toInteger", "Boolean", "toInteger", "()LInteger;", Virtual, [], "Integer"),
    // String
    BuiltinMethod {
        receiver: "String",
        name: "Concat",
        owner: "java/lang/String",
        target: "concat",
        descriptor: "(Ljava/lang/String;)Ljava/lang/String;",
        dispatch: Dispatch::Virtual,
        argument_types: &["String"],
        return_type: "String",
        unbox_arguments: false,
        variadic: true,
    },
    BuiltinMethod {
        receiver: "String",
        name: "Substring",
        owner: "java/lang/String",
        target: "substring",
        descriptor: "(II)Ljava/lang/String;",
        dispatch: Dispatch::Virtual,
        argument_types: &["Integer", "Integer"],
        return_type: "String",
        unbox_arguments: true,
        variadic: false,
    },
];

/// Look up a built-in by receiver type name and method name
pub fn lookup_builtin(receiver: &str, name: &str) -> Option<&'static BuiltinMethod> {
    BUILTIN_METHODS
        .iter()
        .find(|m| m.receiver == receiver && m.name == name)
}

/// `Integer/getValue()I`, unboxes an `Integer`
pub fn integer_value() -> MethodRef {
    MethodRef::new("Integer", "getValue", "()I")
}

/// `Boolean/getBool()Ljava/lang/String;`, the printable form of a `Boolean`
pub fn boolean_text() -> MethodRef {
    MethodRef::new("Boolean", "getBool", "()Ljava/lang/String;")
}

/// `java/lang/System/out`
pub fn system_out() -> FieldRef {
    FieldRef::new("java/lang/System", "out", "Ljava/io/PrintStream;")
}

/// `java/io/PrintStream/println` for an operand descriptor
pub fn println(operand_descriptor: &str) -> MethodRef {
    MethodRef::new(
        "java/io/PrintStream",
        "println",
        format!("({})V", operand_descriptor),
    )
}

/// `java/lang/String/equals`, used to test `Boolean` conditions
pub fn string_equals() -> MethodRef {
    MethodRef::new("java/lang/String", "equals", "(Ljava/lang/Object;)Z")
}
