//! O Compiler CLI
//!
//! Entry point for the compiler. Parses CLI arguments and delegates to the
//! Driver for compilation.

use clap::Parser as ClapParser;
use o_cli::{Cli, CliError};
use simple_logger::SimpleLogger;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = SimpleLogger::new().with_level(cli.log_level()).env().init() {
        eprintln!("Warning: logging disabled: {}", err);
    }

    let driver = cli.driver();
    let result = match (&cli.file, &cli.eval) {
        (Some(path), _) => driver.compile_file(path),
        (None, Some(code)) => driver.compile_source(code),
        (None, None) => Err(CliError::NoInput),
    };

    match result {
        Ok(text) => print!("{}", text),
        Err(CliError::Compile(e)) => {
            eprintln!("Compile error: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
