//! Constant operands for `ldc`-style instructions

use std::fmt;

/// Constant pushed by a load-constant instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// 32-bit integer constant
    Integer(i32),
    /// Double constant (two stack words)
    Real(f64),
    /// String constant
    String(String),
}

impl Constant {
    /// Check if the constant occupies two stack words
    pub fn is_wide(&self) -> bool {
        matches!(self, Constant::Real(_))
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Integer(n) => write!(f, "{}", n),
            Constant::Real(r) => {
                if r.fract() == 0.0 && r.is_finite() {
                    write!(f, "{:.1}", r)
                } else {
                    write!(f, "{}", r)
                }
            }
            Constant::String(s) => {
                write!(f, "\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        other => write!(f, "{}", other)?,
                    }
                }
                write!(f, "\"")
            }
        }
    }
}
