//! Abstract Syntax Tree node definitions
//!
//! Every node category is a closed sum type. Nodes own their children
//! outright; the analyzer passes the enclosing context explicitly instead of
//! following parent links.

use core_types::SourcePosition;
use serde::{Serialize, Serializer};
use std::fmt;

/// Top-level node handed between pipeline stages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ASTNode {
    /// Complete program
    Program(Program),
    /// Single class
    Class(ClassDeclaration),
    /// Single statement
    Statement(Statement),
    /// Single expression
    Expression(Expression),
}

/// Source-level type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boxed 32-bit integer
    Integer,
    /// Double-precision real
    Real,
    /// Boxed boolean
    Boolean,
    /// String
    String,
    /// No value
    Void,
    /// `Array[T]`
    Array(Box<Type>),
    /// User class or other named type (`AnyRef`, `List`, ...)
    Class(String),
    /// Parameterized named type other than `Array`, e.g. `List[Integer]`
    Generic(String, Box<Type>),
}

impl Type {
    /// Parse a printed type name such as `Array[Integer]`
    pub fn from_name(name: &str) -> Type {
        if let Some(open) = name.find('[') {
            if let Some(inner) = name[open + 1..].strip_suffix(']') {
                let base = &name[..open];
                let element = Box::new(Type::from_name(inner));
                return match base {
                    "Array" => Type::Array(element),
                    _ => Type::Generic(base.to_string(), element),
                };
            }
        }
        match name {
            "Integer" => Type::Integer,
            "Real" => Type::Real,
            "Boolean" => Type::Boolean,
            "String" => Type::String,
            "Void" => Type::Void,
            other => Type::Class(other.to_string()),
        }
    }

    /// Check if this is `Integer` or `Real`
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Integer | Type::Real)
    }

    /// Check if values of this type occupy two local slots
    pub fn is_wide(&self) -> bool {
        matches!(self, Type::Real)
    }

    /// Class name for user-class types
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Type::Class(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Integer => f.write_str("Integer"),
            Type::Real => f.write_str("Real"),
            Type::Boolean => f.write_str("Boolean"),
            Type::String => f.write_str("String"),
            Type::Void => f.write_str("Void"),
            Type::Array(element) => write!(f, "Array[{}]", element),
            Type::Class(name) => f.write_str(name),
            Type::Generic(name, element) => write!(f, "{}[{}]", name, element),
        }
    }
}

impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Whole program: the classes in declaration order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Program {
    /// Classes in declaration order
    pub classes: Vec<ClassDeclaration>,
}

/// `class Name [extends Parent] is ... end`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDeclaration {
    /// Class name
    pub name: String,
    /// Parent class name
    pub parent: Option<String>,
    /// Fields, constructors and methods in declaration order
    pub members: Vec<ClassMember>,
    /// Source location
    pub position: Option<SourcePosition>,
}

/// Class body member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ClassMember {
    /// Field declaration
    Field(VariableDeclaration),
    /// `this(...) is ... end`
    Constructor(ConstructorDeclaration),
    /// `method name(...) [Type] is ... end`
    Method(MethodDeclaration),
}

/// Formal parameter of a method or constructor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub param_type: Type,
    /// Source location
    pub position: Option<SourcePosition>,
}

/// `var name: Type [:= expr | (args)]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    /// Variable name
    pub name: String,
    /// Declared type
    pub var_type: Type,
    /// Initializer; a `(args)` suffix becomes a constructor call
    pub initializer: Option<Expression>,
    /// Source location
    pub position: Option<SourcePosition>,
}

/// Constructor declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstructorDeclaration {
    /// Formal parameters
    pub parameters: Vec<Parameter>,
    /// Body statements
    pub body: Vec<Statement>,
    /// Source location
    pub position: Option<SourcePosition>,
}

/// Method declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDeclaration {
    /// Method name
    pub name: String,
    /// Formal parameters
    pub parameters: Vec<Parameter>,
    /// Return type; `None` for a void method
    pub return_type: Option<Type>,
    /// Body statements
    pub body: Vec<Statement>,
    /// Source location
    pub position: Option<SourcePosition>,
}

impl MethodDeclaration {
    /// Declared return type, `Void` when omitted
    pub fn result_type(&self) -> Type {
        self.return_type.clone().unwrap_or(Type::Void)
    }
}

/// Method invocation, with or without an explicit receiver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodCall {
    /// Receiver; `None` for bare calls such as `print(x)`
    pub receiver: Option<Box<Expression>>,
    /// Method name
    pub name: String,
    /// Arguments in order
    pub arguments: Vec<Expression>,
    /// Source location
    pub position: Option<SourcePosition>,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Statement {
    /// Local variable declaration
    Declaration(VariableDeclaration),

    /// `name := value`
    Assignment {
        /// Assigned variable or field
        target: String,
        /// New value
        value: Expression,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// `receiver.field := value`, including `this.field := value`
    FieldAssignment {
        /// Object whose field is written
        receiver: Expression,
        /// Field name
        field: String,
        /// New value
        value: Expression,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// Call evaluated for its effect
    MethodCall(MethodCall),

    /// `while cond loop ... end`
    While {
        /// Loop condition
        condition: Expression,
        /// Loop body
        body: Vec<Statement>,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// `if cond then ... [else ...] end`
    If {
        /// Condition
        condition: Expression,
        /// Then block
        then_branch: Vec<Statement>,
        /// Else block
        else_branch: Option<Vec<Statement>>,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// `return expr`
    Return {
        /// Returned value
        value: Expression,
        /// Source location
        position: Option<SourcePosition>,
    },
}

impl Statement {
    /// Source location of the statement
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            Statement::Declaration(decl) => decl.position,
            Statement::MethodCall(call) => call.position,
            Statement::Assignment { position, .. }
            | Statement::FieldAssignment { position, .. }
            | Statement::While { position, .. }
            | Statement::If { position, .. }
            | Statement::Return { position, .. } => *position,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expression {
    /// Variable or field reference
    Identifier {
        /// Referenced name
        name: String,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// Integer literal
    IntegerLiteral {
        /// Literal value
        value: i64,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// Real literal
    RealLiteral {
        /// Literal value
        value: f64,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// String literal, without the quotes
    StringLiteral {
        /// Literal value
        value: String,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// `true` or `false`
    BooleanLiteral {
        /// Literal value
        value: bool,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// The current object
    This {
        /// Source location
        position: Option<SourcePosition>,
    },

    /// Method invocation
    MethodCall(MethodCall),

    /// `receiver.field`
    FieldAccess {
        /// Object whose field is read
        receiver: Box<Expression>,
        /// Field name
        field: String,
        /// Source location
        position: Option<SourcePosition>,
    },

    /// `Type(args)` in a declaration
    ConstructorCall {
        /// Constructed type
        class_type: Type,
        /// Constructor arguments
        arguments: Vec<Expression>,
        /// Source location
        position: Option<SourcePosition>,
    },
}

impl Expression {
    /// Source location of the expression
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            Expression::MethodCall(call) => call.position,
            Expression::Identifier { position, .. }
            | Expression::IntegerLiteral { position, .. }
            | Expression::RealLiteral { position, .. }
            | Expression::StringLiteral { position, .. }
            | Expression::BooleanLiteral { position, .. }
            | Expression::This { position }
            | Expression::FieldAccess { position, .. }
            | Expression::ConstructorCall { position, .. } => *position,
        }
    }
}

// Tree rendering: one node per line, two spaces per level, `Tag: name (type)`.

fn line(f: &mut fmt::Formatter<'_>, indent: usize, text: impl fmt::Display) -> fmt::Result {
    writeln!(f, "{:width$}{}", "", text, width = indent * 2)
}

impl Program {
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        line(f, indent, "Program")?;
        for class in &self.classes {
            class.write_tree(f, indent + 1)?;
        }
        Ok(())
    }
}

impl ClassDeclaration {
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match &self.parent {
            Some(parent) => line(f, indent, format_args!("class: {} ({})", self.name, parent))?,
            None => line(f, indent, format_args!("class: {}", self.name))?,
        }
        for member in &self.members {
            match member {
                ClassMember::Field(decl) => decl.write_tree(f, indent + 1)?,
                ClassMember::Constructor(ctor) => {
                    line(f, indent + 1, "constructor")?;
                    write_parameters(f, &ctor.parameters, indent + 2)?;
                    write_block(f, &ctor.body, indent + 2)?;
                }
                ClassMember::Method(method) => {
                    match &method.return_type {
                        Some(ty) => line(f, indent + 1, format_args!("method: {} ({})", method.name, ty))?,
                        None => line(f, indent + 1, format_args!("method: {}", method.name))?,
                    }
                    write_parameters(f, &method.parameters, indent + 2)?;
                    write_block(f, &method.body, indent + 2)?;
                }
            }
        }
        Ok(())
    }
}

impl VariableDeclaration {
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        line(f, indent, format_args!("declaration: {} ({})", self.name, self.var_type))?;
        if let Some(init) = &self.initializer {
            init.write_tree(f, indent + 1)?;
        }
        Ok(())
    }
}

fn write_parameters(f: &mut fmt::Formatter<'_>, params: &[Parameter], indent: usize) -> fmt::Result {
    for param in params {
        line(f, indent, format_args!("argument: {} ({})", param.name, param.param_type))?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &[Statement], indent: usize) -> fmt::Result {
    for stmt in block {
        stmt.write_tree(f, indent)?;
    }
    Ok(())
}

impl Statement {
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Statement::Declaration(decl) => decl.write_tree(f, indent),
            Statement::Assignment { target, value, .. } => {
                line(f, indent, format_args!("Assignment: {}", target))?;
                value.write_tree(f, indent + 1)
            }
            Statement::FieldAssignment {
                receiver,
                field,
                value,
                ..
            } => {
                line(f, indent, format_args!("FieldAssignment: {}", field))?;
                receiver.write_tree(f, indent + 1)?;
                value.write_tree(f, indent + 1)
            }
            Statement::MethodCall(call) => call.write_tree(f, indent),
            Statement::While {
                condition, body, ..
            } => {
                line(f, indent, "WhileStatement")?;
                condition.write_tree(f, indent + 1)?;
                line(f, indent + 1, "LoopBody")?;
                write_block(f, body, indent + 2)
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                line(f, indent, "IfStatement")?;
                condition.write_tree(f, indent + 1)?;
                line(f, indent + 1, "ThenBlock")?;
                write_block(f, then_branch, indent + 2)?;
                if let Some(else_branch) = else_branch {
                    line(f, indent + 1, "ElseBlock")?;
                    write_block(f, else_branch, indent + 2)?;
                }
                Ok(())
            }
            Statement::Return { value, .. } => {
                line(f, indent, "ReturnStatement")?;
                value.write_tree(f, indent + 1)
            }
        }
    }
}

impl MethodCall {
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        line(f, indent, format_args!("MethodCall: {}", self.name))?;
        if let Some(receiver) = &self.receiver {
            receiver.write_tree(f, indent + 1)?;
        }
        for arg in &self.arguments {
            arg.write_tree(f, indent + 1)?;
        }
        Ok(())
    }
}

impl Expression {
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        match self {
            Expression::Identifier { name, .. } => line(f, indent, format_args!("Identifier: {}", name)),
            Expression::IntegerLiteral { value, .. } => {
                line(f, indent, format_args!("NumberLiteral: {}", value))
            }
            Expression::RealLiteral { value, .. } => line(f, indent, format_args!("RealLiteral: {}", value)),
            Expression::StringLiteral { value, .. } => {
                line(f, indent, format_args!("StringLiteral: {}", value))
            }
            Expression::BooleanLiteral { value, .. } => {
                line(f, indent, format_args!("BooleanLiteral: {}", value))
            }
            Expression::This { .. } => line(f, indent, "This"),
            Expression::MethodCall(call) => call.write_tree(f, indent),
            Expression::FieldAccess { receiver, field, .. } => {
                line(f, indent, format_args!("FieldAccess: {}", field))?;
                receiver.write_tree(f, indent + 1)
            }
            Expression::ConstructorCall {
                class_type,
                arguments,
                ..
            } => {
                line(f, indent, format_args!("ConstructorCall: {}", class_type))?;
                for arg in arguments {
                    arg.write_tree(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Program(program) => program.write_tree(f, 0),
            ASTNode::Class(class) => class.write_tree(f, 0),
            ASTNode::Statement(stmt) => stmt.write_tree(f, 0),
            ASTNode::Expression(expr) => expr.write_tree(f, 0),
        }
    }
}
