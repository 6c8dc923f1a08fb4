//! Lexer - turns O source text into a token sequence
//!
//! Every [`TokenKind`] owns one regular expression. At each cursor position
//! the kinds are tried in declaration order and the first kind that matches
//! wins; this is priority matching, not longest match.

use crate::error::lex_error;
use core_types::{CompileError, SourcePosition};
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Token kinds in match-priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Keywords
    /// `class`
    Class,
    /// `extends`
    Extends,
    /// `is`
    Is,
    /// `end`
    End,
    /// `var`
    Var,
    /// `method`
    Method,
    /// `this`
    This,
    /// `while`
    While,
    /// `loop`
    Loop,
    /// `if`
    If,
    /// `then`
    Then,
    /// `else`
    Else,
    /// `return`
    Return,

    // Punctuation
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `:=`
    Assign,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `,`
    Comma,

    // Built-in type names
    /// `Array`
    Array,
    /// `List`
    List,
    /// `AnyRef`
    AnyRef,
    /// `AnyValue`
    AnyValue,
    /// `Integer`
    Integer,
    /// `Real`
    Real,
    /// `Boolean`
    Boolean,

    // Literals
    /// `true` or `false`
    BooleanLiteral,
    /// Identifier
    Identifier,
    /// Decimal with a fractional part
    RealLiteral,
    /// Decimal integer
    IntegerLiteral,
    /// Double-quoted string without escapes
    StringLiteral,

    /// Spaces, tabs, form feeds and newlines
    Whitespace,
}

impl TokenKind {
    /// Every kind, in match-priority order
    pub const ALL: [TokenKind; 36] = [
        TokenKind::Class,
        TokenKind::Extends,
        TokenKind::Is,
        TokenKind::End,
        TokenKind::Var,
        TokenKind::Method,
        TokenKind::This,
        TokenKind::While,
        TokenKind::Loop,
        TokenKind::If,
        TokenKind::Then,
        TokenKind::Else,
        TokenKind::Return,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBracket,
        TokenKind::RightBracket,
        TokenKind::Assign,
        TokenKind::Colon,
        TokenKind::Dot,
        TokenKind::Comma,
        TokenKind::Array,
        TokenKind::List,
        TokenKind::AnyRef,
        TokenKind::AnyValue,
        TokenKind::Integer,
        TokenKind::Real,
        TokenKind::Boolean,
        TokenKind::BooleanLiteral,
        TokenKind::Identifier,
        TokenKind::RealLiteral,
        TokenKind::IntegerLiteral,
        TokenKind::StringLiteral,
        TokenKind::Whitespace,
    ];

    /// Regular expression for this kind, without the start anchor
    pub fn pattern(&self) -> &'static str {
        match self {
            TokenKind::Class => r"class\b",
            TokenKind::Extends => r"extends\b",
            TokenKind::Is => r"is\b",
            TokenKind::End => r"end\b",
            TokenKind::Var => r"var\b",
            TokenKind::Method => r"method\b",
            TokenKind::This => r"this\b",
            TokenKind::While => r"while\b",
            TokenKind::Loop => r"loop\b",
            TokenKind::If => r"if\b",
            TokenKind::Then => r"then\b",
            TokenKind::Else => r"else\b",
            TokenKind::Return => r"return\b",
            TokenKind::LeftBrace => r"\{",
            TokenKind::RightBrace => r"\}",
            TokenKind::LeftParen => r"\(",
            TokenKind::RightParen => r"\)",
            TokenKind::LeftBracket => r"\[",
            TokenKind::RightBracket => r"\]",
            TokenKind::Assign => r":=",
            TokenKind::Colon => r":",
            TokenKind::Dot => r"\.",
            TokenKind::Comma => r",",
            TokenKind::Array => r"Array\b",
            TokenKind::List => r"List\b",
            TokenKind::AnyRef => r"AnyRef\b",
            TokenKind::AnyValue => r"AnyValue\b",
            TokenKind::Integer => r"Integer\b",
            TokenKind::Real => r"Real\b",
            TokenKind::Boolean => r"Boolean\b",
            TokenKind::BooleanLiteral => r"(?:true|false)\b",
            TokenKind::Identifier => r"[a-zA-Z_][a-zA-Z0-9_]*",
            TokenKind::RealLiteral => r"\d+\.\d+",
            TokenKind::IntegerLiteral => r"\d+",
            TokenKind::StringLiteral => r#""[^"]*""#,
            TokenKind::Whitespace => r"[ \t\f\r\n]+",
        }
    }

    /// Check if this kind names a type in `Type` position
    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            TokenKind::Array
                | TokenKind::List
                | TokenKind::AnyRef
                | TokenKind::AnyValue
                | TokenKind::Integer
                | TokenKind::Real
                | TokenKind::Boolean
                | TokenKind::Identifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::BooleanLiteral => f.write_str("boolean literal"),
            TokenKind::Identifier => f.write_str("identifier"),
            TokenKind::RealLiteral => f.write_str("real literal"),
            TokenKind::IntegerLiteral => f.write_str("integer literal"),
            TokenKind::StringLiteral => f.write_str("string literal"),
            TokenKind::Whitespace => f.write_str("whitespace"),
            other => {
                // Fixed-text kinds print their text, minus the regex escaping.
                let text = other.pattern().trim_end_matches(r"\b").replace('\\', "");
                write!(f, "'{}'", text)
            }
        }
    }
}

/// Token produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Matched text, trimmed
    pub lexeme: String,
    /// Byte offset of the lexeme's first character
    pub offset: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }

    /// Source position of the token, offset only
    pub fn position(&self) -> Option<SourcePosition> {
        Some(SourcePosition::offset_only(self.offset))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) @{}", self.kind, self.lexeme, self.offset)
    }
}

/// Longest unconsumed suffix shown in a lex error
const SUFFIX_PREVIEW: usize = 20;

/// Lexer for O source code
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Tokenize the whole source.
    ///
    /// Whitespace is matched and skipped but never emitted.
    pub fn tokenize(&self) -> Result<Vec<Token>, CompileError> {
        let rules = compile_rules()?;
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < self.source.len() {
            let rest = &self.source[offset..];
            let matched = rules.iter().find_map(|(kind, regex)| {
                regex
                    .find(rest)
                    .filter(|m| !m.as_str().is_empty())
                    .map(|m| (*kind, m.as_str()))
            });

            let Some((kind, text)) = matched else {
                let preview: String = rest.chars().take(SUFFIX_PREVIEW).collect();
                return Err(lex_error(
                    format!("No token matches at offset {}: '{}'", offset, preview),
                    self.source,
                    offset,
                ));
            };

            if kind != TokenKind::Whitespace {
                tokens.push(Token::new(kind, text.trim(), offset));
            }
            offset += text.len();
        }

        log::debug!("lexed {} tokens from {} bytes", tokens.len(), self.source.len());
        Ok(tokens)
    }
}

fn compile_rules() -> Result<Vec<(TokenKind, Regex)>, CompileError> {
    TokenKind::ALL
        .iter()
        .map(|kind| {
            Regex::new(&format!("^(?:{})", kind.pattern()))
                .map(|regex| (*kind, regex))
                .map_err(|e| lex_error(format!("Invalid pattern for {:?}: {}", kind, e), "", 0))
        })
        .collect()
}
