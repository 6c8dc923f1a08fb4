//! Class unit - one compiled class
//!
//! A class header, its field directives and its method bodies, rendered in
//! declaration order.

use crate::chunk::MethodChunk;
use std::fmt;

/// `.field private <name> <descriptor>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDirective {
    /// Field name
    pub name: String,
    /// Field type descriptor
    pub descriptor: String,
}

impl fmt::Display for FieldDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".field private {} {}", self.name, self.descriptor)
    }
}

/// A compiled class
#[derive(Debug, Clone, PartialEq)]
pub struct ClassUnit {
    /// Class name
    pub name: String,
    /// Internal name of the superclass
    pub super_class: String,
    /// Field directives in declaration order
    pub fields: Vec<FieldDirective>,
    /// Method bodies in declaration order
    pub methods: Vec<MethodChunk>,
}

impl ClassUnit {
    /// Create an empty class unit
    pub fn new(name: impl Into<String>, super_class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_class: super_class.into(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Add a field directive
    pub fn add_field(&mut self, name: impl Into<String>, descriptor: impl Into<String>) {
        self.fields.push(FieldDirective {
            name: name.into(),
            descriptor: descriptor.into(),
        });
    }

    /// Add a method body
    pub fn add_method(&mut self, method: MethodChunk) {
        self.methods.push(method);
    }

    /// Find a method by name
    pub fn method(&self, name: &str) -> Option<&MethodChunk> {
        self.methods.iter().find(|m| m.name == name)
    }
}

impl fmt::Display for ClassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".class public {}", self.name)?;
        writeln!(f, ".super {}", self.super_class)?;
        if !self.fields.is_empty() {
            writeln!(f)?;
            for field in &self.fields {
                writeln!(f, "{}", field)?;
            }
        }
        for method in &self.methods {
            writeln!(f)?;
            write!(f, "{}", method)?;
        }
        Ok(())
    }
}
