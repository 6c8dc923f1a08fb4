//! O parser - recursive descent over the token sequence
//!
//! One token of lookahead. The first violated expectation aborts the parse.

use crate::ast::{
    ClassDeclaration, ClassMember, ConstructorDeclaration, Expression, MethodCall,
    MethodDeclaration, Parameter, Program, Statement, Type, VariableDeclaration,
};
use crate::error::{syntax_error, unexpected_token};
use crate::lexer::{Token, TokenKind};
use core_types::{CompileError, SourcePosition};

/// O parser
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// Create a new parser over a token sequence
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse the whole token sequence into a program
    pub fn parse(&mut self) -> Result<Program, CompileError> {
        let mut classes = Vec::new();

        while !self.is_at_end() {
            if !self.check(TokenKind::Class) {
                return Err(unexpected_token("'class'", self.peek()));
            }
            classes.push(self.parse_class()?);
        }

        log::debug!("parsed {} classes", classes.len());
        Ok(Program { classes })
    }

    fn parse_class(&mut self) -> Result<ClassDeclaration, CompileError> {
        let position = self.expect(TokenKind::Class)?.position();
        let (name, _) = self.expect_identifier()?;

        let parent = if self.check(TokenKind::Extends) {
            self.advance();
            Some(self.expect_identifier()?.0)
        } else {
            None
        };

        self.expect(TokenKind::Is)?;

        let mut members = Vec::new();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Var) => members.push(ClassMember::Field(self.parse_declaration()?)),
                Some(TokenKind::This) => {
                    members.push(ClassMember::Constructor(self.parse_constructor()?))
                }
                Some(TokenKind::Method) => members.push(ClassMember::Method(self.parse_method()?)),
                Some(TokenKind::End) => break,
                _ => return Err(unexpected_token("'var', 'this', 'method' or 'end'", self.peek())),
            }
        }

        self.expect(TokenKind::End)?;

        Ok(ClassDeclaration {
            name,
            parent,
            members,
            position,
        })
    }

    fn parse_declaration(&mut self) -> Result<VariableDeclaration, CompileError> {
        let position = self.expect(TokenKind::Var)?.position();
        let (name, _) = self.expect_identifier()?;
        self.expect(TokenKind::Colon)?;
        let var_type = self.parse_type()?;

        let initializer = if self.check(TokenKind::LeftParen) {
            let call_position = self.peek().map(Token::position);
            let arguments = self.parse_arguments()?;
            Some(Expression::ConstructorCall {
                class_type: var_type.clone(),
                arguments,
                position: call_position.flatten(),
            })
        } else if self.check(TokenKind::Assign) {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(VariableDeclaration {
            name,
            var_type,
            initializer,
            position,
        })
    }

    fn parse_constructor(&mut self) -> Result<ConstructorDeclaration, CompileError> {
        let position = self.expect(TokenKind::This)?.position();
        let parameters = self.parse_parameters()?;
        self.expect(TokenKind::Is)?;
        let body = self.parse_block(&[TokenKind::End])?;
        self.expect(TokenKind::End)?;

        Ok(ConstructorDeclaration {
            parameters,
            body,
            position,
        })
    }

    fn parse_method(&mut self) -> Result<MethodDeclaration, CompileError> {
        let position = self.expect(TokenKind::Method)?.position();
        let (name, _) = self.expect_identifier()?;
        let parameters = self.parse_parameters()?;

        // A type before `is` is the return type.
        let return_type = if self.check(TokenKind::Is) {
            None
        } else {
            Some(self.parse_type()?)
        };

        self.expect(TokenKind::Is)?;
        let body = self.parse_block(&[TokenKind::End])?;
        self.expect(TokenKind::End)?;

        Ok(MethodDeclaration {
            name,
            parameters,
            return_type,
            body,
            position,
        })
    }

    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, CompileError> {
        self.expect(TokenKind::LeftParen)?;
        let mut parameters = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                let (name, position) = self.expect_identifier()?;
                self.expect(TokenKind::Colon)?;
                let param_type = self.parse_type()?;
                parameters.push(Parameter {
                    name,
                    param_type,
                    position,
                });

                if !self.check(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }

        self.expect(TokenKind::RightParen)?;
        Ok(parameters)
    }

    /// Parse statements until one of `terminators` is next; the terminator is
    /// left in place.
    fn parse_block(&mut self, terminators: &[TokenKind]) -> Result<Vec<Statement>, CompileError> {
        let mut statements = Vec::new();
        while !terminators.iter().any(|kind| self.check(*kind)) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement, CompileError> {
        match self.peek_kind() {
            Some(TokenKind::Var) => Ok(Statement::Declaration(self.parse_declaration()?)),
            Some(TokenKind::Identifier) => self.parse_assignment_or_call(),
            Some(TokenKind::While) => self.parse_while_statement(),
            Some(TokenKind::If) => self.parse_if_statement(),
            Some(TokenKind::Return) => self.parse_return_statement(),
            Some(TokenKind::This) => self.parse_this_field_assignment(),
            _ => Err(unexpected_token("statement", self.peek())),
        }
    }

    fn parse_assignment_or_call(&mut self) -> Result<Statement, CompileError> {
        let (first, position) = self.expect_identifier()?;
        let mut chain = vec![(first, position)];

        while self.check(TokenKind::Dot) {
            self.advance();
            chain.push(self.expect_identifier()?);
        }

        // The last name is the target; everything before it is the receiver.
        let (name, name_position) = chain.pop().ok_or_else(|| syntax_error("Empty name chain", position))?;
        let receiver = build_chain(chain);

        if self.check(TokenKind::Assign) {
            self.advance();
            let value = self.parse_expression()?;
            Ok(match receiver {
                None => Statement::Assignment {
                    target: name,
                    value,
                    position,
                },
                Some(receiver) => Statement::FieldAssignment {
                    receiver,
                    field: name,
                    value,
                    position,
                },
            })
        } else if self.check(TokenKind::LeftParen) {
            let arguments = self.parse_arguments()?;
            Ok(Statement::MethodCall(MethodCall {
                receiver: receiver.map(Box::new),
                name,
                arguments,
                position: name_position,
            }))
        } else {
            Err(unexpected_token("':=' or '('", self.peek()))
        }
    }

    fn parse_this_field_assignment(&mut self) -> Result<Statement, CompileError> {
        let position = self.expect(TokenKind::This)?.position();
        self.expect(TokenKind::Dot)?;
        let (field, _) = self.expect_identifier()?;

        let value = if self.check(TokenKind::Assign) {
            self.advance();
            self.parse_expression()?
        } else if self.check(TokenKind::LeftParen) {
            self.advance();
            let value = self.parse_expression()?;
            self.expect(TokenKind::RightParen)?;
            value
        } else {
            return Err(unexpected_token("':=' or '('", self.peek()));
        };

        Ok(Statement::FieldAssignment {
            receiver: Expression::This { position },
            field,
            value,
            position,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Statement, CompileError> {
        let position = self.expect(TokenKind::While)?.position();
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Loop)?;
        let body = self.parse_block(&[TokenKind::End])?;
        self.expect(TokenKind::End)?;

        Ok(Statement::While {
            condition,
            body,
            position,
        })
    }

    fn parse_if_statement(&mut self) -> Result<Statement, CompileError> {
        let position = self.expect(TokenKind::If)?.position();
        let condition = self.parse_expression()?;
        self.expect(TokenKind::Then)?;
        let then_branch = self.parse_block(&[TokenKind::Else, TokenKind::End])?;

        let else_branch = if self.check(TokenKind::Else) {
            self.advance();
            Some(self.parse_block(&[TokenKind::End])?)
        } else {
            None
        };

        self.expect(TokenKind::End)?;

        Ok(Statement::If {
            condition,
            then_branch,
            else_branch,
            position,
        })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, CompileError> {
        let position = self.expect(TokenKind::Return)?.position();
        let value = self.parse_expression()?;
        Ok(Statement::Return { value, position })
    }

    fn parse_expression(&mut self) -> Result<Expression, CompileError> {
        let mut expr = self.parse_primary()?;

        while self.check(TokenKind::Dot) {
            self.advance();
            let (member, position) = self.expect_identifier()?;

            expr = if self.check(TokenKind::LeftParen) {
                let arguments = self.parse_arguments()?;
                Expression::MethodCall(MethodCall {
                    receiver: Some(Box::new(expr)),
                    name: member,
                    arguments,
                    position,
                })
            } else {
                Expression::FieldAccess {
                    receiver: Box::new(expr),
                    field: member,
                    position,
                }
            };
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expression, CompileError> {
        let kind = match self.peek_kind() {
            Some(kind) => kind,
            None => return Err(unexpected_token("expression", None)),
        };

        match kind {
            TokenKind::Identifier => {
                let (name, position) = self.expect_identifier()?;
                if self.check(TokenKind::LeftParen) {
                    let arguments = self.parse_arguments()?;
                    Ok(Expression::MethodCall(MethodCall {
                        receiver: None,
                        name,
                        arguments,
                        position,
                    }))
                } else {
                    Ok(Expression::Identifier { name, position })
                }
            }
            TokenKind::IntegerLiteral => {
                let token = self.expect(TokenKind::IntegerLiteral)?;
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    syntax_error(
                        format!("Integer literal out of range: {}", token.lexeme),
                        token.position(),
                    )
                })?;
                Ok(Expression::IntegerLiteral {
                    value,
                    position: token.position(),
                })
            }
            TokenKind::RealLiteral => {
                let token = self.expect(TokenKind::RealLiteral)?;
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    syntax_error(format!("Invalid real literal: {}", token.lexeme), token.position())
                })?;
                Ok(Expression::RealLiteral {
                    value,
                    position: token.position(),
                })
            }
            TokenKind::StringLiteral => {
                let token = self.expect(TokenKind::StringLiteral)?;
                let value = token.lexeme.trim_matches('"').to_string();
                Ok(Expression::StringLiteral {
                    value,
                    position: token.position(),
                })
            }
            TokenKind::BooleanLiteral => {
                let token = self.expect(TokenKind::BooleanLiteral)?;
                Ok(Expression::BooleanLiteral {
                    value: token.lexeme == "true",
                    position: token.position(),
                })
            }
            TokenKind::This => {
                let position = self.expect(TokenKind::This)?.position();
                Ok(Expression::This { position })
            }
            // `Integer(5)`, `Array[Integer](10)`
            TokenKind::Integer | TokenKind::Real | TokenKind::Boolean | TokenKind::Array => {
                let position = self.peek().and_then(Token::position);
                let class_type = self.parse_type()?;
                let arguments = self.parse_arguments()?;
                Ok(Expression::ConstructorCall {
                    class_type,
                    arguments,
                    position,
                })
            }
            _ => Err(unexpected_token("expression", self.peek())),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>, CompileError> {
        self.expect(TokenKind::LeftParen)?;
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.check(TokenKind::Comma) {
                    break;
                }
                self.advance();
            }
        }

        self.expect(TokenKind::RightParen)?;
        Ok(arguments)
    }

    fn parse_type(&mut self) -> Result<Type, CompileError> {
        let token = match self.peek() {
            Some(token) if token.kind.is_type_name() => token.clone(),
            other => return Err(unexpected_token("type", other)),
        };
        self.advance();

        if self.check(TokenKind::LeftBracket) {
            self.advance();
            let element = Box::new(self.parse_type()?);
            self.expect(TokenKind::RightBracket)?;
            return Ok(match token.kind {
                TokenKind::Array => Type::Array(element),
                _ => Type::Generic(token.lexeme, element),
            });
        }

        Ok(Type::from_name(&token.lexeme))
    }

    // Helper methods

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.current);
        if token.is_some() {
            self.current += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, CompileError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.current += 1;
                Ok(token)
            }
            other => Err(unexpected_token(&kind.to_string(), other)),
        }
    }

    fn expect_identifier(&mut self) -> Result<(String, Option<SourcePosition>), CompileError> {
        let token = self.expect(TokenKind::Identifier)?;
        let position = token.position();
        Ok((token.lexeme, position))
    }
}

/// `a.b.c` as nested field accesses; `None` for an empty chain
fn build_chain(chain: Vec<(String, Option<SourcePosition>)>) -> Option<Expression> {
    let mut names = chain.into_iter();
    let (first, position) = names.next()?;
    let mut expr = Expression::Identifier {
        name: first,
        position,
    };
    for (field, position) in names {
        expr = Expression::FieldAccess {
            receiver: Box::new(expr),
            field,
            position,
        };
    }
    Some(expr)
}
