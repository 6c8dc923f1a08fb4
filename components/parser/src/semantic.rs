//! Semantic analysis: collect, check, then the two tree-rewriting passes
//!
//! The analyzer owns all per-compilation state (class table, global symbols,
//! local scope stack). Traversal passes the enclosing [`DeclarationSite`]
//! down instead of asking nodes for their parent.

use crate::ast::{
    ASTNode, ClassMember, ConstructorDeclaration, Expression, MethodCall, MethodDeclaration,
    Parameter, Program, Statement, Type, VariableDeclaration,
};
use crate::class_table::{self, ClassTable, MethodSignature};
use crate::error::{semantic_error, type_mismatch, undefined_identifier, unknown_method};
use crate::optimize;
use bytecode_system::{lookup_builtin, BuiltinMethod};
use core_types::{CompileError, ErrorKind, SourcePosition};
use std::collections::HashMap;

/// Element types an `Array[T]` may be constructed with
const ARRAY_ELEMENT_TYPES: [Type; 3] = [Type::Integer, Type::String, Type::Boolean];

/// Named types that need no class declaration
const BUILTIN_NAMED_TYPES: [&str; 3] = ["AnyRef", "AnyValue", "List"];

/// Where a declaration appears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationSite {
    /// Directly in a class body: a field, registered globally
    Class,
    /// Inside a method body: a local
    Method,
    /// Inside a constructor body: a local
    Constructor,
}

impl DeclarationSite {
    /// Check if declarations at this site go into the local scope
    pub fn is_local(&self) -> bool {
        !matches!(self, DeclarationSite::Class)
    }
}

/// What a `return` is checked against
#[derive(Debug, Clone)]
enum ReturnContext {
    /// Field initializers and constructors
    None,
    /// Method with its declared result type
    Method { name: String, result: Type },
}

/// Semantic analyzer
pub struct SemanticAnalyzer {
    classes: ClassTable,
    globals: HashMap<String, Type>,
    scopes: Vec<HashMap<String, Type>>,
    current_class: Option<String>,
    returns: ReturnContext,
    optimize: bool,
}

impl SemanticAnalyzer {
    /// Create a new analyzer with both optimization passes enabled
    pub fn new() -> Self {
        Self {
            classes: ClassTable::new(),
            globals: HashMap::new(),
            scopes: Vec::new(),
            current_class: None,
            returns: ReturnContext::None,
            optimize: true,
        }
    }

    /// Enable or disable the unused and unreachable elimination passes
    pub fn with_optimizations(mut self, enabled: bool) -> Self {
        self.optimize = enabled;
        self
    }

    /// Analyze a tree whose root must be a program
    pub fn analyze_node(&mut self, node: &mut ASTNode) -> Result<ClassTable, CompileError> {
        match node {
            ASTNode::Program(program) => self.analyze(program),
            _ => Err(semantic_error(
                ErrorKind::InvalidRoot,
                "Semantic analysis requires a Program root",
                None,
            )),
        }
    }

    /// Run collect, check, eliminate-unused and eliminate-unreachable in
    /// that order. Returns the collected class table.
    pub fn analyze(&mut self, program: &mut Program) -> Result<ClassTable, CompileError> {
        self.classes = class_table::collect(program)?;
        self.globals.clear();
        self.scopes.clear();

        self.check_program(program)?;
        log::debug!("semantic check passed for {} classes", program.classes.len());

        if self.optimize {
            let unused = optimize::eliminate_unused(program);
            let unreachable = optimize::eliminate_unreachable(program);
            log::debug!(
                "removed {} unused declarations and {} unreachable statements",
                unused,
                unreachable
            );
        }

        Ok(std::mem::take(&mut self.classes))
    }

    fn check_program(&mut self, program: &Program) -> Result<(), CompileError> {
        for class in &program.classes {
            self.current_class = Some(class.name.clone());
            for member in &class.members {
                match member {
                    ClassMember::Field(decl) => {
                        self.returns = ReturnContext::None;
                        self.check_declaration(decl, DeclarationSite::Class)?;
                    }
                    ClassMember::Constructor(ctor) => self.check_constructor(ctor)?,
                    ClassMember::Method(method) => self.check_method(method)?,
                }
            }
        }
        self.current_class = None;
        Ok(())
    }

    fn check_constructor(&mut self, ctor: &ConstructorDeclaration) -> Result<(), CompileError> {
        self.enter_scope(&ctor.parameters)?;
        self.returns = ReturnContext::None;
        let result = self.check_block(&ctor.body, DeclarationSite::Constructor);
        self.scopes.pop();
        result
    }

    fn check_method(&mut self, method: &MethodDeclaration) -> Result<(), CompileError> {
        if let Some(return_type) = &method.return_type {
            self.check_type_exists(return_type, method.position)?;
        }
        if method.name == "main" {
            if let Some(param) = method.parameters.first() {
                return Err(semantic_error(
                    ErrorKind::UnsupportedConstruct,
                    format!("Entry point main cannot declare parameter {}", param.name),
                    param.position,
                ));
            }
        }
        self.enter_scope(&method.parameters)?;
        self.returns = ReturnContext::Method {
            name: method.name.clone(),
            result: method.result_type(),
        };
        let result = self.check_block(&method.body, DeclarationSite::Method);
        self.scopes.pop();
        result
    }

    /// Push a fresh local scope holding the parameters
    fn enter_scope(&mut self, parameters: &[Parameter]) -> Result<(), CompileError> {
        let mut scope = HashMap::new();
        for param in parameters {
            self.check_type_exists(&param.param_type, param.position)?;
            if scope
                .insert(param.name.clone(), param.param_type.clone())
                .is_some()
            {
                return Err(semantic_error(
                    ErrorKind::DuplicateDeclaration,
                    format!("Duplicate argument name: {}", param.name),
                    param.position,
                ));
            }
        }
        self.scopes.push(scope);
        Ok(())
    }

    fn check_block(&mut self, block: &[Statement], site: DeclarationSite) -> Result<(), CompileError> {
        for stmt in block {
            self.check_statement(stmt, site)?;
        }
        Ok(())
    }

    fn check_declaration(
        &mut self,
        decl: &VariableDeclaration,
        site: DeclarationSite,
    ) -> Result<(), CompileError> {
        self.check_type_exists(&decl.var_type, decl.position)?;

        if let Some(init) = &decl.initializer {
            let value_type = self.expression_type(init)?;
            if !self.is_assignable(&decl.var_type, &value_type) {
                return Err(type_mismatch(
                    format!(
                        "Cannot initialize {} of type {} with {}",
                        decl.name, decl.var_type, value_type
                    ),
                    decl.position,
                ));
            }
        }

        if site.is_local() {
            let scope = self.scopes.last_mut().ok_or_else(|| {
                semantic_error(
                    ErrorKind::UnsupportedConstruct,
                    format!("Local declaration {} outside a body", decl.name),
                    decl.position,
                )
            })?;
            if scope.contains_key(&decl.name) {
                return Err(semantic_error(
                    ErrorKind::DuplicateDeclaration,
                    format!("Variable {} is already declared in this scope", decl.name),
                    decl.position,
                ));
            }
            scope.insert(decl.name.clone(), decl.var_type.clone());
        } else {
            self.globals.insert(decl.name.clone(), decl.var_type.clone());
        }
        Ok(())
    }

    fn check_statement(&mut self, stmt: &Statement, site: DeclarationSite) -> Result<(), CompileError> {
        match stmt {
            Statement::Declaration(decl) => self.check_declaration(decl, site),
            Statement::Assignment {
                target,
                value,
                position,
            } => {
                let target_type = self.resolve_identifier(target, *position)?;
                let value_type = self.expression_type(value)?;
                if !self.is_assignable(&target_type, &value_type) {
                    return Err(type_mismatch(
                        format!("Cannot assign {} to {} of type {}", value_type, target, target_type),
                        *position,
                    ));
                }
                Ok(())
            }
            Statement::FieldAssignment {
                receiver,
                field,
                value,
                position,
            } => {
                let field_type = self.field_type(receiver, field, *position)?;
                let value_type = self.expression_type(value)?;
                if !self.is_assignable(&field_type, &value_type) {
                    return Err(type_mismatch(
                        format!("Cannot assign {} to field {} of type {}", value_type, field, field_type),
                        *position,
                    ));
                }
                Ok(())
            }
            Statement::MethodCall(call) => self.call_type(call).map(|_| ()),
            Statement::While {
                condition, body, ..
            } => {
                self.check_condition(condition)?;
                self.check_block(body, site)
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.check_condition(condition)?;
                self.check_block(then_branch, site)?;
                if let Some(else_branch) = else_branch {
                    self.check_block(else_branch, site)?;
                }
                Ok(())
            }
            Statement::Return { value, position } => {
                let value_type = self.expression_type(value)?;
                match &self.returns {
                    ReturnContext::None => Err(type_mismatch(
                        "A constructor cannot return a value",
                        *position,
                    )),
                    ReturnContext::Method { name, result } => {
                        if !self.is_assignable(result, &value_type) {
                            return Err(type_mismatch(
                                format!(
                                    "Method {} must return {}, found {}",
                                    name, result, value_type
                                ),
                                *position,
                            ));
                        }
                        Ok(())
                    }
                }
            }
        }
    }

    fn check_condition(&mut self, condition: &Expression) -> Result<(), CompileError> {
        let ty = self.expression_type(condition)?;
        if ty != Type::Boolean {
            return Err(type_mismatch(
                format!("Condition must be Boolean, found {}", ty),
                condition.position(),
            ));
        }
        Ok(())
    }

    /// Infer the static type of an expression
    pub fn expression_type(&mut self, expr: &Expression) -> Result<Type, CompileError> {
        match expr {
            Expression::Identifier { name, position } => self.resolve_identifier(name, *position),
            Expression::IntegerLiteral { .. } => Ok(Type::Integer),
            Expression::RealLiteral { .. } => Ok(Type::Real),
            Expression::StringLiteral { .. } => Ok(Type::String),
            Expression::BooleanLiteral { .. } => Ok(Type::Boolean),
            Expression::This { position } => self
                .current_class
                .clone()
                .map(Type::Class)
                .ok_or_else(|| undefined_identifier("this", *position)),
            Expression::FieldAccess {
                receiver,
                field,
                position,
            } => self.field_type(receiver, field, *position),
            Expression::ConstructorCall {
                class_type,
                arguments,
                position,
            } => self.constructor_type(class_type, arguments, *position),
            Expression::MethodCall(call) => self.call_type(call),
        }
    }

    /// Local scope, then fields of the current class and its ancestors,
    /// then global symbols
    fn resolve_identifier(&self, name: &str, position: Option<SourcePosition>) -> Result<Type, CompileError> {
        if let Some(ty) = self.scopes.iter().rev().find_map(|scope| scope.get(name)) {
            return Ok(ty.clone());
        }
        if let Some(class) = &self.current_class {
            if let Some((_, ty)) = self.classes.lookup_field(class, name) {
                return Ok(ty);
            }
        }
        self.globals
            .get(name)
            .cloned()
            .ok_or_else(|| undefined_identifier(name, position))
    }

    fn field_type(
        &mut self,
        receiver: &Expression,
        field: &str,
        position: Option<SourcePosition>,
    ) -> Result<Type, CompileError> {
        let receiver_type = self.expression_type(receiver)?;
        receiver_type
            .class_name()
            .and_then(|class| self.classes.lookup_field(class, field))
            .map(|(_, ty)| ty)
            .ok_or_else(|| {
                semantic_error(
                    ErrorKind::UndefinedIdentifier,
                    format!("Type {} has no field {}", receiver_type, field),
                    position,
                )
            })
    }

    fn constructor_type(
        &mut self,
        class_type: &Type,
        arguments: &[Expression],
        position: Option<SourcePosition>,
    ) -> Result<Type, CompileError> {
        match class_type {
            Type::Integer | Type::Real | Type::Boolean | Type::String => {
                if arguments.len() > 1 {
                    return Err(semantic_error(
                        ErrorKind::ArityMismatch,
                        format!(
                            "Constructor {} expects at most 1 argument, found {}",
                            class_type,
                            arguments.len()
                        ),
                        position,
                    ));
                }
                if let Some(arg) = arguments.first() {
                    let arg_type = self.expression_type(arg)?;
                    if &arg_type != class_type {
                        return Err(type_mismatch(
                            format!("Constructor {} expects {}, found {}", class_type, class_type, arg_type),
                            position,
                        ));
                    }
                }
                Ok(class_type.clone())
            }
            Type::Array(element) => {
                if !ARRAY_ELEMENT_TYPES.contains(element.as_ref()) {
                    return Err(type_mismatch(
                        format!(
                            "Array element type must be Integer, String or Boolean, found {}",
                            element
                        ),
                        position,
                    ));
                }
                if arguments.len() != 1 {
                    return Err(semantic_error(
                        ErrorKind::ArityMismatch,
                        format!("Array constructor expects 1 length argument, found {}", arguments.len()),
                        position,
                    ));
                }
                let length_type = self.expression_type(&arguments[0])?;
                if length_type != Type::Integer {
                    return Err(type_mismatch(
                        format!("Array length must be Integer, found {}", length_type),
                        position,
                    ));
                }
                Ok(class_type.clone())
            }
            Type::Class(name) => {
                let expected = match self.classes.get(name) {
                    Some(def) => def.constructor_arg_types.clone(),
                    None => {
                        return Err(semantic_error(
                            ErrorKind::UndefinedClass,
                            format!("Undefined class: {}", name),
                            position,
                        ))
                    }
                };
                self.check_arguments(&format!("Constructor of {}", name), &expected, arguments, position)?;
                Ok(class_type.clone())
            }
            Type::Void | Type::Generic(..) => Err(semantic_error(
                ErrorKind::UndefinedClass,
                format!("Cannot construct {}", class_type),
                position,
            )),
        }
    }

    fn call_type(&mut self, call: &MethodCall) -> Result<Type, CompileError> {
        let receiver = match &call.receiver {
            Some(receiver) => receiver,
            None => return self.bare_call_type(call),
        };
        let receiver_type = self.expression_type(receiver)?;

        match &receiver_type {
            Type::Integer | Type::Real | Type::Boolean | Type::String => {
                if let Some(builtin) = lookup_builtin(&receiver_type.to_string(), &call.name) {
                    self.check_builtin(builtin, &receiver_type, call)?;
                    return Ok(Type::from_name(builtin.return_type));
                }
            }
            Type::Array(element) => match call.name.as_str() {
                "get" => {
                    self.check_arguments("get", &[Type::Integer], &call.arguments, call.position)?;
                    return Ok((**element).clone());
                }
                "set" => {
                    let expected = [Type::Integer, (**element).clone()];
                    self.check_arguments("set", &expected, &call.arguments, call.position)?;
                    return Ok(Type::Void);
                }
                _ => {}
            },
            Type::Class(class) if self.classes.contains(class) => {
                if let Some(signature) = self.classes.lookup_method(class, &call.name) {
                    return self.check_signature(&signature, call);
                }
            }
            _ => {}
        }

        self.fallback_call_type(call, &receiver_type.to_string())
    }

    /// Receiver-less call: `print`, then methods of the current class
    fn bare_call_type(&mut self, call: &MethodCall) -> Result<Type, CompileError> {
        if call.name == "print" {
            if call.arguments.len() != 1 {
                return Err(semantic_error(
                    ErrorKind::ArityMismatch,
                    format!("print expects 1 argument, found {}", call.arguments.len()),
                    call.position,
                ));
            }
            self.expression_type(&call.arguments[0])?;
            return Ok(Type::Void);
        }
        let receiver = self.current_class.clone().unwrap_or_default();
        self.fallback_call_type(call, &receiver)
    }

    /// Methods of the current class and its ancestors, then global symbols
    fn fallback_call_type(&mut self, call: &MethodCall, receiver: &str) -> Result<Type, CompileError> {
        let sibling = self
            .current_class
            .as_deref()
            .and_then(|class| self.classes.lookup_method(class, &call.name));
        if let Some(signature) = sibling {
            return self.check_signature(&signature, call);
        }
        if let Some(ty) = self.globals.get(&call.name) {
            return Ok(ty.clone());
        }
        Err(unknown_method(receiver, &call.name, call.position))
    }

    fn check_signature(&mut self, signature: &MethodSignature, call: &MethodCall) -> Result<Type, CompileError> {
        let label = format!("Method {}.{}", signature.owner, signature.name);
        self.check_arguments(&label, &signature.parameters, &call.arguments, call.position)?;
        Ok(signature.return_type.clone())
    }

    fn check_arguments(
        &mut self,
        label: &str,
        expected: &[Type],
        arguments: &[Expression],
        position: Option<SourcePosition>,
    ) -> Result<(), CompileError> {
        if expected.len() != arguments.len() {
            return Err(semantic_error(
                ErrorKind::ArityMismatch,
                format!(
                    "{} expects {} arguments, found {}",
                    label,
                    expected.len(),
                    arguments.len()
                ),
                position,
            ));
        }
        for (index, (param, arg)) in expected.iter().zip(arguments).enumerate() {
            let arg_type = self.expression_type(arg)?;
            if !self.is_assignable(param, &arg_type) {
                return Err(type_mismatch(
                    format!("{} argument {} must be {}, found {}", label, index + 1, param, arg_type),
                    arg.position().or(position),
                ));
            }
        }
        Ok(())
    }

    /// Built-in arity counts the receiver as an operand
    fn check_builtin(
        &mut self,
        builtin: &BuiltinMethod,
        receiver_type: &Type,
        call: &MethodCall,
    ) -> Result<(), CompileError> {
        let operands = call.arguments.len() + 1;
        let arity_ok = if builtin.variadic {
            !call.arguments.is_empty()
        } else {
            call.arguments.len() == builtin.argument_types.len()
        };
        if !arity_ok {
            let expected = if builtin.variadic {
                "at least 2".to_string()
            } else {
                (builtin.argument_types.len() + 1).to_string()
            };
            return Err(semantic_error(
                ErrorKind::ArityMismatch,
                format!("{} expects {} operands, found {}", call.name, expected, operands),
                call.position,
            ));
        }

        for (index, arg) in call.arguments.iter().enumerate() {
            let expected_name = if builtin.variadic {
                builtin.argument_types[0]
            } else {
                builtin.argument_types[index]
            };
            let expected = Type::from_name(expected_name);
            let arg_type = self.expression_type(arg)?;
            if arg_type != expected {
                let message = if receiver_type.is_numeric() && &expected == receiver_type {
                    format!(
                        "Argument types for {} must match: {} and {}",
                        call.name, receiver_type, arg_type
                    )
                } else {
                    format!(
                        "Argument {} of {} must be {}, found {}",
                        index + 1,
                        call.name,
                        expected,
                        arg_type
                    )
                };
                return Err(type_mismatch(message, arg.position().or(call.position)));
            }
        }
        Ok(())
    }

    fn check_type_exists(&self, ty: &Type, position: Option<SourcePosition>) -> Result<(), CompileError> {
        match ty {
            Type::Integer | Type::Real | Type::Boolean | Type::String | Type::Void => Ok(()),
            Type::Array(element) => self.check_type_exists(element, position),
            Type::Generic(_, element) => self.check_type_exists(element, position),
            Type::Class(name) => {
                if BUILTIN_NAMED_TYPES.contains(&name.as_str()) || self.classes.contains(name) {
                    Ok(())
                } else {
                    Err(semantic_error(
                        ErrorKind::UndefinedClass,
                        format!("Undefined class: {}", name),
                        position,
                    ))
                }
            }
        }
    }

    /// Same type, a subclass of the target, or a value the `AnyRef` /
    /// `AnyValue` top types accept
    fn is_assignable(&self, target: &Type, value: &Type) -> bool {
        if target == value {
            return true;
        }
        match (target, value) {
            (Type::Class(t), Type::Class(v)) if self.classes.is_subclass_of(v, t) => true,
            (Type::Class(t), _) if t == "AnyValue" => {
                matches!(value, Type::Integer | Type::Real | Type::Boolean)
            }
            (Type::Class(t), _) if t == "AnyRef" => matches!(
                value,
                Type::String | Type::Class(_) | Type::Array(_) | Type::Generic(..)
            ),
            _ => false,
        }
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse(source: &str) -> Program {
        let tokens = Lexer::new(source).tokenize().unwrap();
        Parser::new(tokens).parse().unwrap()
    }

    fn check(source: &str) -> Result<ClassTable, CompileError> {
        let mut program = parse(source);
        SemanticAnalyzer::new().with_optimizations(false).analyze(&mut program)
    }

    fn check_kind(source: &str) -> ErrorKind {
        check(source).unwrap_err().kind
    }

    #[test]
    fn test_valid_program_passes() {
        let table = check(
            "class Counter is \
               var count: Integer := 0 \
               method inc(step: Integer) Integer is \
                 count := count.Plus(step) \
                 return count \
               end \
             end",
        )
        .unwrap();
        assert!(table.contains("Counter"));
    }

    #[test]
    fn test_return_type_mismatch() {
        assert_eq!(
            check_kind("class A is method m() Integer is return \"s\" end end"),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_undefined_identifier() {
        let err = check("class A is method m() Integer is return y end end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedIdentifier);
        assert!(err.message.contains("y"));
    }

    #[test]
    fn test_duplicate_argument() {
        assert_eq!(
            check_kind("class A is method m(a: Integer, a: Real) is end end"),
            ErrorKind::DuplicateDeclaration
        );
    }

    #[test]
    fn test_duplicate_local() {
        assert_eq!(
            check_kind("class A is method m(a: Integer) is var a: Integer end end"),
            ErrorKind::DuplicateDeclaration
        );
    }

    #[test]
    fn test_scope_isolation_between_methods() {
        let err = check(
            "class A is \
               method one() is var local: Integer := 1 print(local) end \
               method two() Integer is return local end \
             end",
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedIdentifier);
    }

    #[test]
    fn test_numeric_operand_types_must_match() {
        let err = check("class A is method m(x: Integer) Integer is return x.Rem(\"s\") end end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
        assert!(err.message.contains("Argument types for Rem must match"));
    }

    #[test]
    fn test_numeric_arity_counts_receiver() {
        let err = check("class A is method m(x: Integer) Integer is return x.Plus(1, 2) end end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArityMismatch);
        assert!(err.message.contains("expects 2 operands, found 3"));
    }

    #[test]
    fn test_comparison_returns_boolean() {
        check(
            "class A is method m(x: Real, y: Real) Boolean is \
               if x.Less(y) then return true end \
               return x.GreaterEqual(y) \
             end end",
        )
        .unwrap();
    }

    #[test]
    fn test_string_and_boolean_builtins() {
        check(
            "class A is method m(s: String, b: Boolean) String is \
               var t: String := s.Concat(\"a\", \"b\") \
               var c: Boolean := b.And(b.Not()) \
               return t.Substring(0, 1) \
             end end",
        )
        .unwrap();
        assert_eq!(
            check_kind("class A is method m(s: String) String is return s.Substring(\"a\", 1) end end"),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_array_rules() {
        check(
            "class A is method m() Integer is \
               var a: Array[Integer](3) \
               a.set(0, 5) \
               return a.get(0) \
             end end",
        )
        .unwrap();
        assert_eq!(
            check_kind("class A is var a: Array[Real](3) end"),
            ErrorKind::TypeMismatch
        );
        assert_eq!(
            check_kind("class A is method m() is var a: Array[String](2) a.set(0, 1) end end"),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_user_method_and_constructor_checks() {
        let source_ok = "class P is var x: Integer this(v: Integer) is this.x := v end \
                         method get() Integer is return x end end \
                         class Q is method m() Integer is var p: P(1) return p.get() end end";
        check(source_ok).unwrap();

        assert_eq!(
            check_kind("class P is this(v: Integer) is end end class Q is var p: P(1, 2) end"),
            ErrorKind::ArityMismatch
        );
        assert_eq!(
            check_kind("class Q is var p: Missing() end"),
            ErrorKind::UndefinedClass
        );
        assert_eq!(
            check_kind("class P is method get() Integer is return 1 end end \
                        class Q is method m(p: P) Integer is return p.fetch() end end"),
            ErrorKind::UnknownMethod
        );
    }

    #[test]
    fn test_sibling_and_inherited_calls() {
        check(
            "class A is method base() Integer is return 1 end end \
             class B extends A is \
               method twice() Integer is return base().Plus(later()) end \
               method later() Integer is return 2 end \
             end",
        )
        .unwrap();
    }

    #[test]
    fn test_subclass_assignable_to_parent() {
        check(
            "class A is end class B extends A is end \
             class C is method m(b: B) A is var a: A := b return a end end",
        )
        .unwrap();
        assert_eq!(
            check_kind("class A is end class B extends A is end \
                        class C is method m(a: A) B is return a end end"),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_condition_must_be_boolean() {
        assert_eq!(
            check_kind("class A is method m() is while 1 loop end end end"),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_print_arity() {
        assert_eq!(
            check_kind("class A is method m() is print(1, 2) end end"),
            ErrorKind::ArityMismatch
        );
    }

    #[test]
    fn test_unknown_bare_method() {
        assert_eq!(
            check_kind("class A is method m() is nothing() end end"),
            ErrorKind::UnknownMethod
        );
    }

    #[test]
    fn test_any_value_accepts_primitives() {
        check("class A is method m() AnyValue is return 1 end end").unwrap();
        check("class A is method m(b: Boolean) AnyValue is return b end end").unwrap();
        let err = check("class A is method m() AnyValue is return \"s\" end end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
        assert!(err.message.contains("must return AnyValue, found String"));
    }

    #[test]
    fn test_any_ref_accepts_references() {
        check("class A is method m() AnyRef is return \"s\" end end").unwrap();
        check("class P is end class A is method m(p: P) AnyRef is return p end end").unwrap();
        assert_eq!(
            check_kind("class A is method m() AnyRef is return 1 end end"),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_field_access_on_class_type() {
        check(
            "class P is var x: Integer end \
             class A is method m(p: P) Integer is return p.x end end",
        )
        .unwrap();

        let err = check(
            "class P is var y: Integer end \
             class A is method m(p: P) Integer is return p.x end end",
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedIdentifier);
        assert_eq!(err.message, "Type P has no field x");
    }

    #[test]
    fn test_main_parameters_rejected() {
        let err = check("class A is method main(n: Integer) is print(n) end end").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedConstruct);
        assert!(err.message.contains("parameter n"));
    }

    #[test]
    fn test_invalid_root() {
        let mut node = ASTNode::Expression(Expression::IntegerLiteral {
            value: 1,
            position: None,
        });
        let err = SemanticAnalyzer::new().analyze_node(&mut node).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRoot);
    }

    #[test]
    fn test_optimizations_run_after_check() {
        let mut program = parse("class Test is var x: Integer := 10 end");
        SemanticAnalyzer::new().analyze(&mut program).unwrap();
        assert!(program.classes[0].members.is_empty());
    }
}
