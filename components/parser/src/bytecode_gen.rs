//! Bytecode generation from AST
//!
//! Lowers a checked [`Program`] to class-file assembly text, one class unit
//! per declared class. Signatures come from a [`ClassTable`] built in a
//! pre-pass, so a method may call siblings declared after it.

use crate::ast::*;
use crate::class_table::{self, ClassTable, MethodSignature};
use crate::error::{semantic_error, type_mismatch, undefined_identifier, unknown_method, unsupported};
use bytecode_system::{
    builtins, descriptor_for, internal_name, lookup_builtin, method_descriptor, slot_width,
    BuiltinMethod, ClassUnit, Constant, FieldRef, LabelGenerator, LocalSlot, MethodChunk, MethodRef, Opcode,
};
use core_types::{CompileError, ErrorKind, SourcePosition};
use std::collections::{HashMap, HashSet};

/// Superclass of classes without an `extends` clause
const ROOT_CLASS: &str = "java/lang/Object";

/// Descriptor of the entry point
const MAIN_DESCRIPTOR: &str = "([Ljava/lang/String;)V";

/// Local variable bound to a slot
#[derive(Debug, Clone)]
struct Local {
    slot: LocalSlot,
    ty: Type,
}

/// Bytecode generator that converts a program to class units
pub struct BytecodeGenerator {
    classes: ClassTable,
    extended: HashSet<String>,
    labels: LabelGenerator,
    chunk: MethodChunk,
    locals: HashMap<String, Local>,
    next_slot: u16,
    current_class: String,
    in_static: bool,
    return_type: Type,
    peephole: bool,
}

impl BytecodeGenerator {
    /// Create a new bytecode generator
    pub fn new() -> Self {
        Self {
            classes: ClassTable::new(),
            extended: HashSet::new(),
            labels: LabelGenerator::new(),
            chunk: MethodChunk::new("", ""),
            locals: HashMap::new(),
            next_slot: 1,
            current_class: String::new(),
            in_static: false,
            return_type: Type::Void,
            peephole: false,
        }
    }

    /// Enable or disable the instruction-level peephole pass
    pub fn with_peephole(mut self, enabled: bool) -> Self {
        self.peephole = enabled;
        self
    }

    /// Generate assembly text for a tree whose root must be a program
    pub fn generate_node(&mut self, node: &ASTNode) -> Result<String, CompileError> {
        match node {
            ASTNode::Program(program) => self.generate(program),
            _ => Err(CompileError::new(
                ErrorKind::InvalidRoot,
                "Code generation expects a Program node as root",
            )),
        }
    }

    /// Generate assembly text for every class, in declaration order
    pub fn generate(&mut self, program: &Program) -> Result<String, CompileError> {
        let units = self.generate_units(program)?;
        Ok(units
            .iter()
            .map(|unit| unit.to_string())
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Generate one class unit per class
    pub fn generate_units(&mut self, program: &Program) -> Result<Vec<ClassUnit>, CompileError> {
        self.classes = class_table::collect(program)?;
        self.extended = program
            .classes
            .iter()
            .filter_map(|class| class.parent.clone())
            .collect();

        let mut units = Vec::with_capacity(program.classes.len());
        for class in &program.classes {
            units.push(self.visit_class(class)?);
        }

        log::debug!(
            "generated {} class units, {} labels",
            units.len(),
            self.labels.issued()
        );
        Ok(units)
    }

    fn visit_class(&mut self, class: &ClassDeclaration) -> Result<ClassUnit, CompileError> {
        let super_class = class.parent.as_deref().unwrap_or(ROOT_CLASS);
        let mut unit = ClassUnit::new(&class.name, super_class);
        self.current_class = class.name.clone();

        let mut initialized = Vec::new();
        for member in &class.members {
            if let ClassMember::Field(decl) = member {
                unit.add_field(&decl.name, descriptor(&decl.var_type));
                if decl.initializer.is_some() {
                    initialized.push(decl);
                }
            }
        }

        let mut has_constructor = false;
        let mut has_default = false;
        for member in &class.members {
            if let ClassMember::Constructor(ctor) = member {
                has_constructor = true;
                has_default |= ctor.parameters.is_empty();
                let chunk = self.visit_constructor(super_class, Some(ctor), &initialized)?;
                unit.add_method(chunk);
            }
        }
        // Subclass constructors chain to `<init>()V`.
        if !has_constructor || (!has_default && self.extended.contains(&class.name)) {
            let chunk = self.visit_constructor(super_class, None, &initialized)?;
            unit.add_method(chunk);
        }

        for member in &class.members {
            if let ClassMember::Method(method) = member {
                let chunk = self.visit_method(method)?;
                unit.add_method(chunk);
            }
        }

        Ok(unit)
    }

    fn visit_constructor(
        &mut self,
        super_class: &str,
        ctor: Option<&ConstructorDeclaration>,
        initialized: &[&VariableDeclaration],
    ) -> Result<MethodChunk, CompileError> {
        let parameters = ctor.map(|c| c.parameters.as_slice()).unwrap_or(&[]);
        let types: Vec<Type> = parameters.iter().map(|p| p.param_type.clone()).collect();
        let desc = signature_descriptor(&types, &Type::Void);

        self.begin_method(MethodChunk::new("<init>", desc), Type::Void);
        for param in parameters {
            self.allocate_slot(&param.name, param.param_type.clone());
        }

        self.emit(Opcode::ALoad(LocalSlot(0)));
        self.emit(Opcode::InvokeSpecial(MethodRef::init(super_class, "")));

        for decl in initialized {
            if let Some(init) = &decl.initializer {
                self.emit(Opcode::ALoad(LocalSlot(0)));
                self.visit_expression(init)?;
                let field = FieldRef::new(&self.current_class, &decl.name, descriptor(&decl.var_type));
                self.emit_at(Opcode::PutField(field), decl.position);
            }
        }

        if let Some(ctor) = ctor {
            self.visit_block(&ctor.body)?;
        }
        if !self.chunk.ends_with_terminator() {
            self.emit(Opcode::Return);
        }

        Ok(self.finish_method())
    }

    fn visit_method(&mut self, method: &MethodDeclaration) -> Result<MethodChunk, CompileError> {
        if method.name == "main" {
            if let Some(param) = method.parameters.first() {
                return Err(unsupported(
                    format!("Entry point main cannot declare parameter {}", param.name),
                    param.position,
                ));
            }
            // Entry point: the argument array sits in slot 0 and is never
            // bound to a name.
            self.begin_method(MethodChunk::new_static("main", MAIN_DESCRIPTOR), Type::Void);
            self.in_static = true;
        } else {
            let types: Vec<Type> = method.parameters.iter().map(|p| p.param_type.clone()).collect();
            let result = method.result_type();
            let desc = signature_descriptor(&types, &result);
            self.begin_method(MethodChunk::new(&method.name, desc), result);
            for param in &method.parameters {
                self.allocate_slot(&param.name, param.param_type.clone());
            }
        }

        self.visit_block(&method.body)?;

        if self.return_type == Type::Void && !self.chunk.ends_with_terminator() {
            self.emit(Opcode::Return);
        }

        Ok(self.finish_method())
    }

    fn begin_method(&mut self, chunk: MethodChunk, return_type: Type) {
        self.chunk = chunk;
        self.locals.clear();
        self.next_slot = 1;
        self.in_static = false;
        self.return_type = return_type;
    }

    fn finish_method(&mut self) -> MethodChunk {
        let mut chunk = std::mem::replace(&mut self.chunk, MethodChunk::new("", ""));
        chunk.locals_limit = self.next_slot;
        if self.peephole {
            chunk.optimize();
        }
        log::trace!(
            "{}.{}: {} instructions, {} locals",
            self.current_class,
            chunk.name,
            chunk.instruction_count(),
            chunk.locals_limit
        );
        chunk
    }

    fn visit_block(&mut self, statements: &[Statement]) -> Result<(), CompileError> {
        for stmt in statements {
            self.visit_statement(stmt)?;
        }
        Ok(())
    }

    fn visit_statement(&mut self, stmt: &Statement) -> Result<(), CompileError> {
        match stmt {
            Statement::Declaration(decl) => {
                if let Some(init) = &decl.initializer {
                    self.visit_expression(init)?;
                    let local = self.allocate_slot(&decl.name, decl.var_type.clone());
                    self.store_local(&local, decl.position);
                } else {
                    self.allocate_slot(&decl.name, decl.var_type.clone());
                }
            }

            Statement::Assignment {
                target,
                value,
                position,
            } => {
                if let Some(local) = self.locals.get(target).cloned() {
                    self.visit_expression(value)?;
                    self.store_local(&local, *position);
                } else if let Some((owner, ty)) = self.classes.lookup_field(&self.current_class, target) {
                    self.require_instance(&format!("Field {}", target), *position)?;
                    self.emit(Opcode::ALoad(LocalSlot(0)));
                    self.visit_expression(value)?;
                    let field = FieldRef::new(owner, target, descriptor(&ty));
                    self.emit_at(Opcode::PutField(field), *position);
                } else {
                    return Err(self.unresolved_name(target, *position));
                }
            }

            Statement::FieldAssignment {
                receiver,
                field,
                value,
                position,
            } => {
                let receiver_type = self.visit_expression(receiver)?;
                let (owner, ty) = self.resolve_field(&receiver_type, field, *position)?;
                self.visit_expression(value)?;
                let field = FieldRef::new(owner, field, descriptor(&ty));
                self.emit_at(Opcode::PutField(field), *position);
            }

            Statement::MethodCall(call) => {
                let result = self.visit_call(call)?;
                match result {
                    Type::Void => {}
                    ty if ty.is_wide() => self.emit(Opcode::Pop2),
                    _ => self.emit(Opcode::Pop),
                }
            }

            Statement::While {
                condition, body, ..
            } => {
                let (start, exit) = self.labels.loop_labels();
                self.emit(Opcode::Label(start.clone()));
                self.visit_condition(condition)?;
                self.emit(Opcode::IfEq(exit.clone()));
                self.visit_block(body)?;
                self.emit(Opcode::Goto(start));
                self.emit(Opcode::Label(exit));
            }

            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                let (else_label, end_label) = self.labels.if_labels();
                self.visit_condition(condition)?;
                self.emit(Opcode::IfEq(else_label.clone()));
                self.visit_block(then_branch)?;
                self.emit(Opcode::Goto(end_label.clone()));
                self.emit(Opcode::Label(else_label));
                if let Some(else_branch) = else_branch {
                    self.visit_block(else_branch)?;
                }
                self.emit(Opcode::Label(end_label));
            }

            Statement::Return { value, position } => {
                if self.return_type == Type::Void {
                    return Err(unsupported(
                        format!("Cannot return a value from void method {}", self.chunk.name),
                        *position,
                    ));
                }
                let ty = self.visit_expression(value)?;
                let opcode = if ty.is_wide() {
                    Opcode::DReturn
                } else {
                    Opcode::AReturn
                };
                self.emit_at(opcode, *position);
            }
        }

        Ok(())
    }

    /// Leave an `int` truth value on the stack for `ifeq`
    fn visit_condition(&mut self, condition: &Expression) -> Result<(), CompileError> {
        let ty = self.visit_expression(condition)?;
        if ty != Type::Boolean {
            return Err(type_mismatch(
                format!("Condition must be Boolean, found {}", ty),
                condition.position(),
            ));
        }
        self.emit(Opcode::InvokeVirtual(builtins::boolean_text()));
        self.emit(Opcode::Ldc(Constant::String("true".to_string())));
        self.emit(Opcode::InvokeVirtual(builtins::string_equals()));
        Ok(())
    }

    /// Emit code leaving the value on the stack; returns its type
    fn visit_expression(&mut self, expr: &Expression) -> Result<Type, CompileError> {
        match expr {
            Expression::Identifier { name, position } => {
                if let Some(local) = self.locals.get(name).cloned() {
                    self.load_local(&local);
                    return Ok(local.ty);
                }
                if let Some((owner, ty)) = self.classes.lookup_field(&self.current_class, name) {
                    self.require_instance(&format!("Field {}", name), *position)?;
                    self.emit(Opcode::ALoad(LocalSlot(0)));
                    self.emit(Opcode::GetField(FieldRef::new(owner, name, descriptor(&ty))));
                    return Ok(ty);
                }
                Err(self.unresolved_name(name, *position))
            }

            Expression::IntegerLiteral { value, position } => {
                let value = int_operand(*value, *position)?;
                self.box_integer(Opcode::Ldc(Constant::Integer(value)));
                Ok(Type::Integer)
            }

            Expression::RealLiteral { value, .. } => {
                self.emit(Opcode::Ldc2W(Constant::Real(*value)));
                Ok(Type::Real)
            }

            Expression::StringLiteral { value, .. } => {
                self.emit(Opcode::Ldc(Constant::String(value.clone())));
                Ok(Type::String)
            }

            Expression::BooleanLiteral { value, .. } => {
                self.box_boolean(*value);
                Ok(Type::Boolean)
            }

            Expression::This { position } => {
                self.require_instance("this", *position)?;
                self.emit(Opcode::ALoad(LocalSlot(0)));
                Ok(Type::Class(self.current_class.clone()))
            }

            Expression::FieldAccess {
                receiver,
                field,
                position,
            } => {
                let receiver_type = self.visit_expression(receiver)?;
                let (owner, ty) = self.resolve_field(&receiver_type, field, *position)?;
                self.emit_at(
                    Opcode::GetField(FieldRef::new(owner, field, descriptor(&ty))),
                    *position,
                );
                Ok(ty)
            }

            Expression::ConstructorCall {
                class_type,
                arguments,
                position,
            } => self.visit_constructor_call(class_type, arguments, *position),

            Expression::MethodCall(call) => self.visit_call(call),
        }
    }

    fn visit_constructor_call(
        &mut self,
        class_type: &Type,
        arguments: &[Expression],
        position: Option<SourcePosition>,
    ) -> Result<Type, CompileError> {
        match class_type {
            Type::Integer | Type::Real | Type::Boolean | Type::String => {
                match arguments {
                    // Value types are already represented by their argument.
                    [argument] => {
                        self.visit_expression(argument)?;
                    }
                    [] => self.emit_default(class_type),
                    _ => {
                        return Err(arity_error(
                            &class_type.to_string(),
                            1,
                            arguments.len(),
                            position,
                        ))
                    }
                }
                Ok(class_type.clone())
            }

            Type::Array(element) => {
                let [length] = arguments else {
                    return Err(arity_error("Array", 1, arguments.len(), position));
                };
                let element_class = element_class(element).ok_or_else(|| {
                    unsupported(format!("Arrays of {} are not supported", element), position)
                })?;
                self.visit_expression(length)?;
                self.emit(Opcode::InvokeVirtual(builtins::integer_value()));
                self.emit_at(Opcode::ANewArray(element_class), position);
                Ok(class_type.clone())
            }

            Type::Class(name) => {
                let parameters = self
                    .classes
                    .get(name)
                    .map(|def| def.constructor_arg_types.clone())
                    .ok_or_else(|| {
                        semantic_error(
                            ErrorKind::UndefinedClass,
                            format!("Class {} is not defined", name),
                            position,
                        )
                    })?;
                if parameters.len() != arguments.len() {
                    return Err(arity_error(name, parameters.len(), arguments.len(), position));
                }

                self.emit(Opcode::New(name.clone()));
                self.emit(Opcode::Dup);
                for argument in arguments {
                    self.visit_expression(argument)?;
                }
                let desc = signature_descriptor(&parameters, &Type::Void);
                self.emit_at(
                    Opcode::InvokeSpecial(MethodRef::new(name, "<init>", desc)),
                    position,
                );
                Ok(class_type.clone())
            }

            other => Err(unsupported(
                format!("Cannot construct a value of type {}", other),
                position,
            )),
        }
    }

    fn visit_call(&mut self, call: &MethodCall) -> Result<Type, CompileError> {
        let Some(receiver) = &call.receiver else {
            return self.visit_bare_call(call);
        };

        let receiver_type = self.visit_expression(receiver)?;
        match &receiver_type {
            Type::Integer | Type::Real | Type::Boolean | Type::String => {
                let receiver_name = receiver_type.to_string();
                let Some(builtin) = lookup_builtin(&receiver_name, &call.name) else {
                    if self.classes.lookup_method(&self.current_class, &call.name).is_some() {
                        return Err(unsupported(
                            format!(
                                "Method {}.{} cannot be invoked on receiver type {}",
                                self.current_class, call.name, receiver_name
                            ),
                            call.position,
                        ));
                    }
                    return Err(unknown_method(&receiver_name, &call.name, call.position));
                };
                self.visit_builtin_call(builtin, call)
            }

            Type::Array(element) => match call.name.as_str() {
                "get" => {
                    let [index] = call.arguments.as_slice() else {
                        return Err(arity_error("get", 1, call.arguments.len(), call.position));
                    };
                    self.visit_index(index)?;
                    self.emit_at(Opcode::AALoad, call.position);
                    Ok((**element).clone())
                }
                "set" => {
                    let [index, value] = call.arguments.as_slice() else {
                        return Err(arity_error("set", 2, call.arguments.len(), call.position));
                    };
                    self.visit_index(index)?;
                    self.visit_expression(value)?;
                    self.emit_at(Opcode::AAStore, call.position);
                    Ok(Type::Void)
                }
                _ => Err(unknown_method(&receiver_type.to_string(), &call.name, call.position)),
            },

            Type::Class(class) => {
                let signature = self
                    .classes
                    .lookup_method(class, &call.name)
                    .ok_or_else(|| unknown_method(class, &call.name, call.position))?;
                self.visit_invoke(&signature, class, call)
            }

            other => Err(unknown_method(&other.to_string(), &call.name, call.position)),
        }
    }

    /// `print(x)` or a call to a method of the current class
    fn visit_bare_call(&mut self, call: &MethodCall) -> Result<Type, CompileError> {
        if call.name == "print" {
            let [argument] = call.arguments.as_slice() else {
                return Err(arity_error("print", 1, call.arguments.len(), call.position));
            };
            self.visit_print(argument, call.position)?;
            return Ok(Type::Void);
        }

        let current = self.current_class.clone();
        let signature = self
            .classes
            .lookup_method(&current, &call.name)
            .ok_or_else(|| unknown_method(&current, &call.name, call.position))?;
        self.require_instance(&format!("Method {}", call.name), call.position)?;
        self.emit(Opcode::ALoad(LocalSlot(0)));
        self.visit_invoke(&signature, &current, call)
    }

    /// Arguments and `invokevirtual` for a user method; the receiver is
    /// already on the stack
    fn visit_invoke(
        &mut self,
        signature: &MethodSignature,
        receiver_class: &str,
        call: &MethodCall,
    ) -> Result<Type, CompileError> {
        if signature.parameters.len() != call.arguments.len() {
            return Err(arity_error(
                &call.name,
                signature.parameters.len(),
                call.arguments.len(),
                call.position,
            ));
        }
        for argument in &call.arguments {
            self.visit_expression(argument)?;
        }
        let desc = signature_descriptor(&signature.parameters, &signature.return_type);
        self.emit_at(
            Opcode::InvokeVirtual(MethodRef::new(receiver_class, &call.name, desc)),
            call.position,
        );
        Ok(signature.return_type.clone())
    }

    fn visit_builtin_call(
        &mut self,
        builtin: &BuiltinMethod,
        call: &MethodCall,
    ) -> Result<Type, CompileError> {
        if builtin.variadic {
            if call.arguments.is_empty() {
                return Err(arity_error(&call.name, 1, 0, call.position));
            }
            for argument in &call.arguments {
                self.visit_expression(argument)?;
                self.emit_at(builtin.call(), call.position);
            }
        } else {
            let expected = builtin.argument_types.len();
            if call.arguments.len() != expected {
                return Err(arity_error(&call.name, expected, call.arguments.len(), call.position));
            }
            for argument in &call.arguments {
                self.visit_expression(argument)?;
                if builtin.unbox_arguments {
                    self.emit(Opcode::InvokeVirtual(builtins::integer_value()));
                }
            }
            self.emit_at(builtin.call(), call.position);
        }
        Ok(Type::from_name(builtin.return_type))
    }

    fn visit_print(
        &mut self,
        argument: &Expression,
        position: Option<SourcePosition>,
    ) -> Result<(), CompileError> {
        self.emit(Opcode::GetStatic(builtins::system_out()));

        // Integer literals are printed as raw ints without boxing.
        if let Expression::IntegerLiteral { value, position } = argument {
            let value = int_operand(*value, *position)?;
            self.emit(Opcode::Ldc(Constant::Integer(value)));
            self.emit_at(Opcode::InvokeVirtual(builtins::println("I")), *position);
            return Ok(());
        }

        let operand = match self.visit_expression(argument)? {
            Type::Integer => {
                self.emit(Opcode::InvokeVirtual(builtins::integer_value()));
                "I"
            }
            Type::Boolean => {
                self.emit(Opcode::InvokeVirtual(builtins::boolean_text()));
                "Ljava/lang/String;"
            }
            Type::Real => "D",
            Type::String => "Ljava/lang/String;",
            Type::Void => {
                return Err(unsupported("Cannot print the result of a void call", position))
            }
            _ => "Ljava/lang/Object;",
        };
        self.emit_at(Opcode::InvokeVirtual(builtins::println(operand)), position);
        Ok(())
    }

    /// Array index: a boxed `Integer` unboxed to `int`
    fn visit_index(&mut self, index: &Expression) -> Result<(), CompileError> {
        self.visit_expression(index)?;
        self.emit(Opcode::InvokeVirtual(builtins::integer_value()));
        Ok(())
    }

    fn emit_default(&mut self, ty: &Type) {
        match ty {
            Type::Integer => self.box_integer(Opcode::IConst(0)),
            Type::Boolean => self.box_boolean(false),
            Type::Real => self.emit(Opcode::Ldc2W(Constant::Real(0.0))),
            _ => self.emit(Opcode::Ldc(Constant::String(String::new()))),
        }
    }

    /// `new Integer; dup; <push int>; invokespecial Integer/<init>(I)V`
    fn box_integer(&mut self, push: Opcode) {
        self.emit(Opcode::New("Integer".to_string()));
        self.emit(Opcode::Dup);
        self.emit(push);
        self.emit(Opcode::InvokeSpecial(MethodRef::init("Integer", "I")));
    }

    fn box_boolean(&mut self, value: bool) {
        self.emit(Opcode::New("Boolean".to_string()));
        self.emit(Opcode::Dup);
        self.emit(Opcode::IConst(i8::from(value)));
        self.emit(Opcode::InvokeSpecial(MethodRef::init("Boolean", "Z")));
    }

    fn resolve_field(
        &self,
        receiver_type: &Type,
        field: &str,
        position: Option<SourcePosition>,
    ) -> Result<(String, Type), CompileError> {
        receiver_type
            .class_name()
            .and_then(|class| self.classes.lookup_field(class, field))
            .ok_or_else(|| undefined_identifier(&format!("{}.{}", receiver_type, field), position))
    }

    /// Neither a local nor a field of the current class
    fn unresolved_name(&self, name: &str, position: Option<SourcePosition>) -> CompileError {
        let owner = self
            .classes
            .iter()
            .find(|def| def.field_types.contains_key(name))
            .map(|def| def.name.clone());
        match owner {
            Some(owner) => unsupported(
                format!("Field {} of class {} needs a receiver in {}", name, owner, self.current_class),
                position,
            ),
            None => undefined_identifier(name, position),
        }
    }

    fn require_instance(&self, what: &str, position: Option<SourcePosition>) -> Result<(), CompileError> {
        if self.in_static {
            return Err(unsupported(
                format!("{} is not available in static method main", what),
                position,
            ));
        }
        Ok(())
    }

    fn allocate_slot(&mut self, name: &str, ty: Type) -> Local {
        let slot = LocalSlot(self.next_slot);
        self.next_slot += slot_width(&descriptor(&ty)).max(1);
        let local = Local { slot, ty };
        self.locals.insert(name.to_string(), local.clone());
        local
    }

    fn load_local(&mut self, local: &Local) {
        if local.ty.is_wide() {
            self.emit(Opcode::DLoad(local.slot));
        } else {
            self.emit(Opcode::ALoad(local.slot));
        }
    }

    fn store_local(&mut self, local: &Local, position: Option<SourcePosition>) {
        let opcode = if local.ty.is_wide() {
            Opcode::DStore(local.slot)
        } else {
            Opcode::AStore(local.slot)
        };
        self.emit_at(opcode, position);
    }

    fn emit(&mut self, opcode: Opcode) {
        self.chunk.emit(opcode);
    }

    fn emit_at(&mut self, opcode: Opcode, position: Option<SourcePosition>) {
        self.chunk.emit_with_position(opcode, position);
    }
}

impl Default for BytecodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Field and operand descriptor of a source type
fn descriptor(ty: &Type) -> String {
    descriptor_for(&ty.to_string())
}

fn signature_descriptor(parameters: &[Type], return_type: &Type) -> String {
    let names: Vec<String> = parameters.iter().map(Type::to_string).collect();
    match return_type {
        Type::Void => method_descriptor(names.as_slice(), None),
        ty => method_descriptor(names.as_slice(), Some(ty.to_string().as_str())),
    }
}

/// Internal class name used by `anewarray` for an element type
fn element_class(element: &Type) -> Option<String> {
    let desc = descriptor(element);
    if let Some(name) = internal_name(&desc) {
        return Some(name.to_string());
    }
    // Nested arrays name the component array type by its descriptor.
    desc.starts_with('[').then_some(desc)
}

fn int_operand(value: i64, position: Option<SourcePosition>) -> Result<i32, CompileError> {
    i32::try_from(value).map_err(|_| {
        unsupported(
            format!("Integer literal {} does not fit in 32 bits", value),
            position,
        )
    })
}

fn arity_error(
    name: &str,
    expected: usize,
    found: usize,
    position: Option<SourcePosition>,
) -> CompileError {
    semantic_error(
        ErrorKind::ArityMismatch,
        format!("{} expects {} arguments, found {}", name, expected, found),
        position,
    )
}
