//! Error types for the CLI

use core_types::CompileError;
use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Any pipeline stage rejected the input
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Source file could not be read
    #[error("Could not read file '{path}': {source}")]
    Io {
        /// Path given on the command line
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Token or AST dump could not be serialized
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither a file nor inline code was given
    #[error("No input given; pass --file <PATH> or --eval <CODE>")]
    NoInput,
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
