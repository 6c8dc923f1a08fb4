//! Pipeline orchestration for compiling O sources
//!
//! The Driver runs the stages in order:
//! - Lexer and Parser for syntax
//! - SemanticAnalyzer for checking and AST optimization
//! - BytecodeGenerator for class-file assembly text
//!
//! Every report the flags ask for is appended to the returned text, so the
//! caller decides where it goes.

use crate::error::{CliError, CliResult};
use core_types::CompileError;
use parser::{BytecodeGenerator, Lexer, Parser, Program, SemanticAnalyzer, Token};

/// Compiler driver
#[derive(Debug, Clone)]
pub struct Driver {
    /// Whether to dump tokens before parsing
    print_tokens: bool,
    /// Whether to dump the syntax tree before generation
    print_ast: bool,
    /// Whether dumps are JSON instead of text
    json: bool,
    /// Whether AST and instruction optimizations run
    optimize: bool,
    /// Whether semantic analysis runs
    check: bool,
}

impl Driver {
    /// Create a driver with analysis and optimization enabled
    ///
    /// # Example
    /// ```
    /// use o_cli::Driver;
    ///
    /// let text = Driver::new().compile_source("class A is end").unwrap();
    /// assert!(text.starts_with(".class public A\n"));
    /// ```
    pub fn new() -> Self {
        Self {
            print_tokens: false,
            print_ast: false,
            json: false,
            optimize: true,
            check: true,
        }
    }

    /// Enable token dump
    pub fn with_print_tokens(mut self, enabled: bool) -> Self {
        self.print_tokens = enabled;
        self
    }

    /// Enable syntax tree dump
    pub fn with_print_ast(mut self, enabled: bool) -> Self {
        self.print_ast = enabled;
        self
    }

    /// Emit dumps as JSON
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Enable or disable optimization passes
    pub fn with_optimize(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }

    /// Enable or disable semantic analysis
    pub fn with_check(mut self, enabled: bool) -> Self {
        self.check = enabled;
        self
    }

    /// Compile an O source file
    ///
    /// # Errors
    /// Returns `CliError` if the file cannot be read or compilation fails
    pub fn compile_file(&self, path: &str) -> CliResult<String> {
        let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_string(),
            source,
        })?;
        log::info!("compiling {} ({} bytes)", path, source.len());
        self.compile_source(&source)
    }

    /// Compile an O source string
    ///
    /// Returns the requested dumps followed by the generated assembly text.
    /// Compile errors carry line and column information.
    pub fn compile_source(&self, source: &str) -> CliResult<String> {
        let mut output = String::new();

        let tokens = stage(source, Lexer::new(source).tokenize())?;
        log::debug!("lexed {} tokens", tokens.len());
        if self.print_tokens {
            self.dump_tokens(&tokens, &mut output)?;
        }

        let mut program = stage(source, Parser::new(tokens).parse())?;

        if self.check {
            let mut analyzer = SemanticAnalyzer::new().with_optimizations(self.optimize);
            stage(source, analyzer.analyze(&mut program))?;
        } else {
            log::warn!("semantic analysis skipped");
        }

        if self.print_ast {
            self.dump_program(&program, &mut output)?;
        }

        let mut generator = BytecodeGenerator::new().with_peephole(self.optimize);
        let text = stage(source, generator.generate(&program))?;
        output.push_str(&text);

        log::info!("compiled {} classes", program.classes.len());
        Ok(output)
    }

    fn dump_tokens(&self, tokens: &[Token], output: &mut String) -> CliResult<()> {
        if self.json {
            output.push_str(&serde_json::to_string_pretty(tokens)?);
            output.push('\n');
        } else {
            for token in tokens {
                output.push_str(&format!(
                    "{:>6}  {:<18} {}\n",
                    token.offset,
                    token.kind.to_string(),
                    token.lexeme
                ));
            }
        }
        Ok(())
    }

    fn dump_program(&self, program: &Program, output: &mut String) -> CliResult<()> {
        if self.json {
            output.push_str(&serde_json::to_string_pretty(program)?);
            output.push('\n');
        } else {
            output.push_str(&program.to_string());
        }
        Ok(())
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

fn stage<T>(source: &str, result: Result<T, CompileError>) -> CliResult<T> {
    result.map_err(|err| CliError::Compile(err.with_source(source)))
}
