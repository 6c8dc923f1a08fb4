//! O Compiler CLI Library
//!
//! Provides the Driver struct and supporting modules for the `oc` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod driver;
pub mod error;

pub use cli::Cli;
pub use driver::Driver;
pub use error::{CliError, CliResult};
