//! Error helpers for each compiler stage

use crate::lexer::Token;
use core_types::{CompileError, ErrorKind, SourcePosition};

/// Create a lex error at a byte offset of `source`
pub fn lex_error(message: impl Into<String>, source: &str, offset: usize) -> CompileError {
    CompileError::new(ErrorKind::LexError, message).at(SourcePosition::from_offset(source, offset))
}

/// Create a syntax error at a given position
pub fn syntax_error(message: impl Into<String>, position: Option<SourcePosition>) -> CompileError {
    CompileError::new(ErrorKind::ParseError, message).at_opt(position)
}

/// Create an unexpected token error; `found` is `None` at end of input
pub fn unexpected_token(expected: &str, found: Option<&Token>) -> CompileError {
    match found {
        Some(token) => syntax_error(
            format!(
                "Expected {}, found {} '{}' at offset {}",
                expected, token.kind, token.lexeme, token.offset
            ),
            Some(SourcePosition::offset_only(token.offset)),
        ),
        None => syntax_error(format!("Expected {}, found end of input", expected), None),
    }
}

/// Create a semantic error of the given kind
pub fn semantic_error(
    kind: ErrorKind,
    message: impl Into<String>,
    position: Option<SourcePosition>,
) -> CompileError {
    CompileError::new(kind, message).at_opt(position)
}

/// Create a type mismatch error
pub fn type_mismatch(message: impl Into<String>, position: Option<SourcePosition>) -> CompileError {
    semantic_error(ErrorKind::TypeMismatch, message, position)
}

/// Create an undefined identifier error
pub fn undefined_identifier(name: &str, position: Option<SourcePosition>) -> CompileError {
    semantic_error(
        ErrorKind::UndefinedIdentifier,
        format!("Undefined identifier: {}", name),
        position,
    )
}

/// Create an unknown method error
pub fn unknown_method(receiver: &str, name: &str, position: Option<SourcePosition>) -> CompileError {
    semantic_error(
        ErrorKind::UnknownMethod,
        format!("Unknown method {} for receiver type {}", name, receiver),
        position,
    )
}

/// Create an unsupported construct error raised by the code generator
pub fn unsupported(message: impl Into<String>, position: Option<SourcePosition>) -> CompileError {
    CompileError::new(ErrorKind::UnsupportedConstruct, message).at_opt(position)
}
