//! Shared error and source-location types for the O compiler.
//!
//! Every stage of the pipeline (lexer, parser, semantic analyzer, bytecode
//! generator) reports failures through the same [`CompileError`] so a
//! driver can surface a single descriptive diagnostic per run.
//!
//! # Overview
//!
//! - [`CompileError`] - A compilation error with kind, message and position
//! - [`ErrorKind`] - The category of a compilation error
//! - [`SourcePosition`] - Source code location
//!
//! # Examples
//!
//! ```
//! use core_types::{CompileError, ErrorKind, SourcePosition};
//!
//! let source = "class A is\nend";
//! let error = CompileError::new(ErrorKind::ParseError, "Expected end")
//!     .at(SourcePosition::from_offset(source, 11));
//!
//! assert_eq!(error.kind, ErrorKind::ParseError);
//! assert_eq!(error.source_position.unwrap().line, 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{CompileError, CompileResult, ErrorKind};
pub use source::SourcePosition;
