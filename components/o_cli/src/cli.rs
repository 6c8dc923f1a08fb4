//! Command-line arguments

use crate::driver::Driver;
use clap::{ArgAction, Parser};
use log::LevelFilter;

/// `oc` - compile O source to class-file assembly text
#[derive(Debug, Parser)]
#[command(name = "oc", version, about = "Compiler for the O language")]
pub struct Cli {
    /// Source file to compile
    #[arg(short, long, value_name = "PATH", conflicts_with = "eval")]
    pub file: Option<String>,

    /// Inline source to compile
    #[arg(short, long, value_name = "CODE")]
    pub eval: Option<String>,

    /// Print the token sequence before compiling
    #[arg(long)]
    pub print_tokens: bool,

    /// Print the syntax tree after analysis
    #[arg(long)]
    pub print_ast: bool,

    /// Print tokens and syntax tree as JSON
    #[arg(long)]
    pub emit_json: bool,

    /// Skip AST optimization and instruction cleanup
    #[arg(long)]
    pub no_optimize: bool,

    /// Skip semantic analysis
    #[arg(long)]
    pub no_check: bool,

    /// Raise log verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log level selected by the number of `-v` flags
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Driver configured from the flags
    pub fn driver(&self) -> Driver {
        Driver::new()
            .with_print_tokens(self.print_tokens)
            .with_print_ast(self.print_ast)
            .with_json(self.emit_json)
            .with_optimize(!self.no_optimize)
            .with_check(!self.no_check)
    }
}
