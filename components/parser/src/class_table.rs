//! Class definitions collected from a program
//!
//! Built once per compilation by [`collect`] and read-only afterward. Both
//! the semantic analyzer and the bytecode generator derive their signature
//! information from it.

use crate::ast::{ClassMember, Program, Type};
use crate::error::{semantic_error, type_mismatch};
use core_types::{CompileError, ErrorKind};
use std::collections::HashMap;

/// Resolved method signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Class that declares the method
    pub owner: String,
    /// Method name
    pub name: String,
    /// Parameter types in order
    pub parameters: Vec<Type>,
    /// Return type, `Void` for void methods
    pub return_type: Type,
}

/// Signature information of one class
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassDefinition {
    /// Class name
    pub name: String,
    /// Parent class name
    pub parent: Option<String>,
    /// Constructor parameter types; empty without a declared constructor
    pub constructor_arg_types: Vec<Type>,
    /// Method name to return type
    pub method_return_types: HashMap<String, Type>,
    /// Method name to parameter types
    pub method_parameter_types: HashMap<String, Vec<Type>>,
    /// Field name to declared type
    pub field_types: HashMap<String, Type>,
}

impl ClassDefinition {
    /// Create an empty definition
    pub fn new(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent,
            ..Default::default()
        }
    }

    /// Signature of a method declared directly in this class
    pub fn own_method(&self, name: &str) -> Option<MethodSignature> {
        let return_type = self.method_return_types.get(name)?;
        Some(MethodSignature {
            owner: self.name.clone(),
            name: name.to_string(),
            parameters: self
                .method_parameter_types
                .get(name)
                .cloned()
                .unwrap_or_default(),
            return_type: return_type.clone(),
        })
    }
}

/// All class definitions of a program, in declaration order
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: HashMap<String, ClassDefinition>,
    order: Vec<String>,
}

impl ClassTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition; the name must be new
    pub fn register(&mut self, definition: ClassDefinition) -> Result<(), CompileError> {
        if self.classes.contains_key(&definition.name) {
            return Err(semantic_error(
                ErrorKind::DuplicateDeclaration,
                format!("Class {} is already defined", definition.name),
                None,
            ));
        }
        self.order.push(definition.name.clone());
        self.classes.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Look up a class by name
    pub fn get(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(name)
    }

    /// Check if a class is registered
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.order.iter().filter_map(move |name| self.classes.get(name))
    }

    /// The class itself followed by its ancestors, nearest first
    pub fn ancestors<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a ClassDefinition> + 'a {
        // Parents are registered before children, so the chain is finite;
        // the bound only guards hand-built tables.
        let mut next = self.classes.get(name);
        let mut remaining = self.order.len();
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            remaining -= 1;
            let current = next?;
            next = current.parent.as_deref().and_then(|p| self.classes.get(p));
            Some(current)
        })
    }

    /// Resolve a method through the class and its ancestors
    pub fn lookup_method(&self, class: &str, name: &str) -> Option<MethodSignature> {
        self.ancestors(class).find_map(|def| def.own_method(name))
    }

    /// Resolve a field through the class and its ancestors; returns the
    /// declaring class and the field type
    pub fn lookup_field(&self, class: &str, name: &str) -> Option<(String, Type)> {
        self.ancestors(class).find_map(|def| {
            def.field_types
                .get(name)
                .map(|ty| (def.name.clone(), ty.clone()))
        })
    }

    /// Check if `class` is `ancestor` or derives from it
    pub fn is_subclass_of(&self, class: &str, ancestor: &str) -> bool {
        self.ancestors(class).any(|def| def.name == ancestor)
    }
}

/// Build the class table of a program.
///
/// Classes are processed in declaration order, so a parent must be declared
/// before any class that extends it.
pub fn collect(program: &Program) -> Result<ClassTable, CompileError> {
    let mut table = ClassTable::new();

    for class in &program.classes {
        if let Some(parent) = &class.parent {
            if !table.contains(parent) {
                return Err(semantic_error(
                    ErrorKind::UndefinedClass,
                    format!("Parent class {} of {} is not defined", parent, class.name),
                    class.position,
                ));
            }
        }

        let mut definition = ClassDefinition::new(&class.name, class.parent.clone());
        let mut has_constructor = false;

        for member in &class.members {
            match member {
                ClassMember::Field(field) => {
                    if definition
                        .field_types
                        .insert(field.name.clone(), field.var_type.clone())
                        .is_some()
                    {
                        return Err(semantic_error(
                            ErrorKind::DuplicateDeclaration,
                            format!("Field {} is already declared in class {}", field.name, class.name),
                            field.position,
                        ));
                    }
                }
                ClassMember::Constructor(ctor) => {
                    if has_constructor {
                        return Err(semantic_error(
                            ErrorKind::DuplicateDeclaration,
                            format!("Class {} declares more than one constructor", class.name),
                            ctor.position,
                        ));
                    }
                    has_constructor = true;
                    definition.constructor_arg_types =
                        ctor.parameters.iter().map(|p| p.param_type.clone()).collect();
                }
                ClassMember::Method(method) => {
                    if definition.method_return_types.contains_key(&method.name) {
                        return Err(semantic_error(
                            ErrorKind::DuplicateDeclaration,
                            format!("Method {} is already declared in class {}", method.name, class.name),
                            method.position,
                        ));
                    }

                    let return_type = method.result_type();
                    if let Some(inherited) = class
                        .parent
                        .as_deref()
                        .and_then(|parent| table.lookup_method(parent, &method.name))
                    {
                        if inherited.return_type != return_type {
                            return Err(type_mismatch(
                                format!(
                                    "Method {}.{} returns {} but overrides {}.{} returning {}",
                                    class.name,
                                    method.name,
                                    return_type,
                                    inherited.owner,
                                    method.name,
                                    inherited.return_type
                                ),
                                method.position,
                            ));
                        }
                    }

                    definition
                        .method_return_types
                        .insert(method.name.clone(), return_type);
                    definition.method_parameter_types.insert(
                        method.name.clone(),
                        method.parameters.iter().map(|p| p.param_type.clone()).collect(),
                    );
                }
            }
        }

        table
            .register(definition)
            .map_err(|e| e.at_opt(class.position))?;
    }

    log::debug!("collected {} class definitions", table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn table_for(source: &str) -> Result<ClassTable, CompileError> {
        let tokens = Lexer::new(source).tokenize()?;
        let program = Parser::new(tokens).parse()?;
        collect(&program)
    }

    #[test]
    fn test_collect_signatures() {
        let table = table_for(
            "class P is this(a: Integer, b: Real) is end \
             var f: Boolean \
             method m(x: String) Integer is return 1 end end",
        )
        .unwrap();
        let def = table.get("P").unwrap();
        assert_eq!(def.constructor_arg_types, vec![Type::Integer, Type::Real]);
        assert_eq!(def.field_types.get("f"), Some(&Type::Boolean));
        assert_eq!(def.method_return_types.get("m"), Some(&Type::Integer));
        assert_eq!(def.method_parameter_types.get("m"), Some(&vec![Type::String]));
    }

    #[test]
    fn test_inherited_lookup() {
        let table = table_for(
            "class A is var x: Integer method get() Integer is return x end end \
             class B extends A is end \
             class C extends B is end",
        )
        .unwrap();
        let sig = table.lookup_method("C", "get").unwrap();
        assert_eq!(sig.owner, "A");
        assert_eq!(table.lookup_field("C", "x"), Some(("A".to_string(), Type::Integer)));
        assert!(table.is_subclass_of("C", "A"));
        assert!(!table.is_subclass_of("A", "C"));
        let names: Vec<&str> = table.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parent_must_precede_child() {
        let err = table_for("class B extends A is end class A is end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedClass);
    }

    #[test]
    fn test_duplicate_class() {
        let err = table_for("class A is end class A is end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateDeclaration);
    }

    #[test]
    fn test_duplicate_field() {
        let err = table_for("class A is var x: Integer var x: Real end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateDeclaration);
        assert_eq!(err.message, "Field x is already declared in class A");
    }

    #[test]
    fn test_duplicate_method() {
        let err = table_for("class A is method m() is end method m() is end end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateDeclaration);
        assert_eq!(err.message, "Method m is already declared in class A");
    }

    #[test]
    fn test_second_constructor() {
        let err = table_for("class A is this() is end this(a: Integer) is end end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateDeclaration);
        assert!(err.message.contains("more than one constructor"));
    }

    #[test]
    fn test_override_return_type_must_match() {
        let err = table_for(
            "class A is method m() Integer is return 1 end end \
             class B extends A is method m() String is return \"s\" end end",
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }
}
