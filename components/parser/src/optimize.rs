//! AST optimization passes run after a successful check
//!
//! Both passes only delete nodes and report how many they removed.

use crate::ast::{ClassMember, Expression, Program, Statement};
use std::collections::HashSet;

/// Remove declarations whose name is never referenced anywhere in the
/// program.
///
/// Liveness is whole-tree: identifier references, assignment targets and
/// field names used in `x.f` or `this.f := ...` all count, regardless of
/// scope. Parameters are never removed.
pub fn eliminate_unused(program: &mut Program) -> usize {
    let referenced = referenced_names(program);
    let mut removed = 0;

    for class in &mut program.classes {
        let before = class.members.len();
        class.members.retain(|member| match member {
            ClassMember::Field(decl) => referenced.contains(&decl.name),
            _ => true,
        });
        removed += before - class.members.len();

        for member in &mut class.members {
            match member {
                ClassMember::Constructor(ctor) => removed += remove_unused_locals(&mut ctor.body, &referenced),
                ClassMember::Method(method) => {
                    removed += remove_unused_locals(&mut method.body, &referenced)
                }
                ClassMember::Field(_) => {}
            }
        }
    }

    removed
}

fn remove_unused_locals(block: &mut Vec<Statement>, referenced: &HashSet<String>) -> usize {
    let before = block.len();
    block.retain(|stmt| match stmt {
        Statement::Declaration(decl) => referenced.contains(&decl.name),
        _ => true,
    });
    let mut removed = before - block.len();

    for stmt in block.iter_mut() {
        match stmt {
            Statement::While { body, .. } => removed += remove_unused_locals(body, referenced),
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => {
                removed += remove_unused_locals(then_branch, referenced);
                if let Some(else_branch) = else_branch {
                    removed += remove_unused_locals(else_branch, referenced);
                }
            }
            _ => {}
        }
    }

    removed
}

/// Every name used as a reference anywhere in the program
pub fn referenced_names(program: &Program) -> HashSet<String> {
    let mut names = HashSet::new();
    for class in &program.classes {
        for member in &class.members {
            match member {
                ClassMember::Field(decl) => {
                    if let Some(init) = &decl.initializer {
                        collect_expression(init, &mut names);
                    }
                }
                ClassMember::Constructor(ctor) => collect_block(&ctor.body, &mut names),
                ClassMember::Method(method) => collect_block(&method.body, &mut names),
            }
        }
    }
    names
}

fn collect_block(block: &[Statement], names: &mut HashSet<String>) {
    for stmt in block {
        collect_statement(stmt, names);
    }
}

fn collect_statement(stmt: &Statement, names: &mut HashSet<String>) {
    match stmt {
        Statement::Declaration(decl) => {
            if let Some(init) = &decl.initializer {
                collect_expression(init, names);
            }
        }
        Statement::Assignment { target, value, .. } => {
            names.insert(target.clone());
            collect_expression(value, names);
        }
        Statement::FieldAssignment {
            receiver,
            field,
            value,
            ..
        } => {
            names.insert(field.clone());
            collect_expression(receiver, names);
            collect_expression(value, names);
        }
        Statement::MethodCall(call) => {
            if let Some(receiver) = &call.receiver {
                collect_expression(receiver, names);
            }
            for arg in &call.arguments {
                collect_expression(arg, names);
            }
        }
        Statement::While {
            condition, body, ..
        } => {
            collect_expression(condition, names);
            collect_block(body, names);
        }
        Statement::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            collect_expression(condition, names);
            collect_block(then_branch, names);
            if let Some(else_branch) = else_branch {
                collect_block(else_branch, names);
            }
        }
        Statement::Return { value, .. } => collect_expression(value, names),
    }
}

fn collect_expression(expr: &Expression, names: &mut HashSet<String>) {
    match expr {
        Expression::Identifier { name, .. } => {
            names.insert(name.clone());
        }
        Expression::FieldAccess {
            receiver, field, ..
        } => {
            names.insert(field.clone());
            collect_expression(receiver, names);
        }
        Expression::MethodCall(call) => {
            if let Some(receiver) = &call.receiver {
                collect_expression(receiver, names);
            }
            for arg in &call.arguments {
                collect_expression(arg, names);
            }
        }
        Expression::ConstructorCall { arguments, .. } => {
            for arg in arguments {
                collect_expression(arg, names);
            }
        }
        Expression::IntegerLiteral { .. }
        | Expression::RealLiteral { .. }
        | Expression::StringLiteral { .. }
        | Expression::BooleanLiteral { .. }
        | Expression::This { .. } => {}
    }
}

/// Drop every statement that follows a `return` in the same block.
///
/// Each block (constructor or method body, then branch, else branch, loop
/// body) is truncated on its own. Running the pass twice changes nothing the
/// second time.
pub fn eliminate_unreachable(program: &mut Program) -> usize {
    let mut removed = 0;
    for class in &mut program.classes {
        for member in &mut class.members {
            match member {
                ClassMember::Constructor(ctor) => removed += truncate_after_return(&mut ctor.body),
                ClassMember::Method(method) => removed += truncate_after_return(&mut method.body),
                ClassMember::Field(_) => {}
            }
        }
    }
    removed
}

fn truncate_after_return(block: &mut Vec<Statement>) -> usize {
    let mut removed = 0;

    if let Some(index) = block
        .iter()
        .position(|stmt| matches!(stmt, Statement::Return { .. }))
    {
        removed += block.len() - (index + 1);
        block.truncate(index + 1);
    }

    for stmt in block.iter_mut() {
        match stmt {
            Statement::While { body, .. } => removed += truncate_after_return(body),
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => {
                removed += truncate_after_return(then_branch);
                if let Some(else_branch) = else_branch {
                    removed += truncate_after_return(else_branch);
                }
            }
            _ => {}
        }
    }

    removed
}
