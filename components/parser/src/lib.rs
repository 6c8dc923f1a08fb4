//! O Language Front End
//!
//! Provides lexer, parser, AST construction, semantic analysis, AST
//! optimization and bytecode generation for the O language.
//!
//! # Overview
//!
//! - [`Lexer`] - Tokenizes O source code
//! - [`Token`] - Token kind, lexeme and offset
//! - [`Parser`] - Recursive descent parser producing a [`Program`]
//! - [`ASTNode`] - Abstract Syntax Tree node types
//! - [`SemanticAnalyzer`] - Collects signatures, checks types and scopes,
//!   then prunes unused and unreachable code
//! - [`BytecodeGenerator`] - Converts a checked program to class-file
//!   assembly text
//!
//! # Example
//!
//! ```
//! use parser::{BytecodeGenerator, Lexer, Parser, SemanticAnalyzer};
//!
//! let source = "class Greeter is method main() is print(\"hi\") end end";
//! let tokens = Lexer::new(source).tokenize().unwrap();
//! let mut program = Parser::new(tokens).parse().unwrap();
//!
//! SemanticAnalyzer::new().analyze(&mut program).unwrap();
//!
//! let text = BytecodeGenerator::new().generate(&program).unwrap();
//! assert!(text.starts_with(".class public Greeter\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod bytecode_gen;
pub mod class_table;
pub mod error;
pub mod lexer;
pub mod optimize;
pub mod parser;
pub mod semantic;

pub use ast::{ASTNode, ClassDeclaration, ClassMember, Expression, Program, Statement, Type};
pub use bytecode_gen::BytecodeGenerator;
pub use class_table::{ClassDefinition, ClassTable, MethodSignature};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use semantic::{DeclarationSite, SemanticAnalyzer};

use core_types::CompileError;

/// Run the whole pipeline with every pass enabled.
///
/// Errors carry line and column information resolved against `source`.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let run = || {
        let tokens = Lexer::new(source).tokenize()?;
        let mut program = Parser::new(tokens).parse()?;
        SemanticAnalyzer::new().analyze(&mut program)?;
        BytecodeGenerator::new().with_peephole(true).generate(&program)
    };
    run().map_err(|err| err.with_source(source))
}
