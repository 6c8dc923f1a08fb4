//! Compilation error types.
//!
//! One error kind per failure category of the pipeline. Every stage fails
//! fast and surfaces the first error it encounters.

use crate::SourcePosition;
use thiserror::Error;

/// The kind of compilation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No token pattern matches the remaining input
    LexError,
    /// An expected token was not found
    ParseError,
    /// A class is referenced before it is registered
    UndefinedClass,
    /// A name is not declared in any visible scope
    UndefinedIdentifier,
    /// A method name does not resolve for its receiver
    UnknownMethod,
    /// A name collides with an existing entry in the same scope
    DuplicateDeclaration,
    /// An operand, argument or return value has the wrong type
    TypeMismatch,
    /// A call supplies the wrong number of arguments
    ArityMismatch,
    /// The code generator was given something other than a program
    InvalidRoot,
    /// The code generator has no rule for a construct
    UnsupportedConstruct,
}

impl ErrorKind {
    /// Human readable name of the error kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::LexError => "LexError",
            ErrorKind::ParseError => "ParseError",
            ErrorKind::UndefinedClass => "UndefinedClass",
            ErrorKind::UndefinedIdentifier => "UndefinedIdentifier",
            ErrorKind::UnknownMethod => "UnknownMethod",
            ErrorKind::DuplicateDeclaration => "DuplicateDeclaration",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::ArityMismatch => "ArityMismatch",
            ErrorKind::InvalidRoot => "InvalidRoot",
            ErrorKind::UnsupportedConstruct => "UnsupportedConstruct",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compilation error with message and optional source position.
///
/// # Examples
///
/// ```
/// use core_types::{CompileError, ErrorKind};
///
/// let error = CompileError::new(ErrorKind::UndefinedIdentifier, "Undefined identifier: y");
///
/// assert_eq!(error.message, "Undefined identifier: y");
/// assert_eq!(error.to_string(), "UndefinedIdentifier: Undefined identifier: y");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}{}", position_suffix(.source_position))]
pub struct CompileError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Source position where the error occurred
    pub source_position: Option<SourcePosition>,
}

impl CompileError {
    /// Create an error without position information
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source_position: None,
        }
    }

    /// Attach a source position
    pub fn at(mut self, position: SourcePosition) -> Self {
        self.source_position = Some(position);
        self
    }

    /// Attach a source position if one is known
    pub fn at_opt(mut self, position: Option<SourcePosition>) -> Self {
        if position.is_some() {
            self.source_position = position;
        }
        self
    }

    /// Fill in line and column from the source text when only the byte
    /// offset is known.
    pub fn with_source(mut self, source: &str) -> Self {
        if let Some(pos) = self.source_position {
            if !pos.has_line_info() {
                self.source_position = Some(SourcePosition::from_offset(source, pos.offset));
            }
        }
        self
    }
}

fn position_suffix(position: &Option<SourcePosition>) -> String {
    match position {
        Some(pos) => format!(" (at {})", pos),
        None => String::new(),
    }
}

/// Result type used by every compiler stage
pub type CompileResult<T> = Result<T, CompileError>;
