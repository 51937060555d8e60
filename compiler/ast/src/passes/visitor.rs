// Copyright (C) 2023-2026 The Vesper Team.
// This file is part of the Vesper library.

// The Vesper library is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// The Vesper library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with the Vesper library. If not, see <https://www.gnu.org/licenses/>.

//! This module contains Visitor trait implementations for the AST.
//! It implements default methods for each node to be made
//! given the type of node its visiting.

use crate::*;

/// A Visitor trait for expressions in the AST.
pub trait ExpressionVisitor<'a> {
    type AdditionalInput: Default;
    type Output: Default;

    fn visit_expression(&mut self, input: &'a Expression, additional: &Self::AdditionalInput) -> Self::Output {
        match input {
            Expression::Access(access) => self.visit_access(access, additional),
            Expression::Array(array) => self.visit_array(array, additional),
            Expression::Assign(assign) => self.visit_assign(assign, additional),
            Expression::Binary(binary) => self.visit_binary(binary, additional),
            Expression::Block(block) => self.visit_block_expression(block, additional),
            Expression::Call(call) => self.visit_call(call, additional),
            Expression::Cast(cast) => self.visit_cast(cast, additional),
            Expression::Closure(closure) => self.visit_closure(closure, additional),
            Expression::Err(err) => self.visit_err(err, additional),
            Expression::Identifier(identifier) => self.visit_identifier(identifier, additional),
            Expression::If(if_) => self.visit_if(if_, additional),
            Expression::Literal(literal) => self.visit_literal(literal, additional),
            Expression::Map(map) => self.visit_map(map, additional),
            Expression::Match(match_) => self.visit_match(match_, additional),
            Expression::Range(range) => self.visit_range(range, additional),
            Expression::Record(record) => self.visit_record(record, additional),
            Expression::Send(send) => self.visit_send(send, additional),
            Expression::Struct(struct_) => self.visit_struct_init(struct_, additional),
            Expression::Tuple(tuple) => self.visit_tuple(tuple, additional),
            Expression::Unary(unary) => self.visit_unary(unary, additional),
            Expression::Unsafe(unsafe_) => self.visit_unsafe(unsafe_, additional),
        }
    }

    fn visit_access(&mut self, input: &'a AccessExpression, additional: &Self::AdditionalInput) -> Self::Output {
        match input {
            AccessExpression::Member(member) => {
                self.visit_expression(&member.inner, additional);
            }
            AccessExpression::Index(index) => {
                self.visit_expression(&index.inner, additional);
                index.indices.iter().for_each(|index| {
                    self.visit_expression(index, &Default::default());
                });
            }
            AccessExpression::Static(static_) => {
                self.visit_expression(&static_.inner, additional);
            }
        }
        Default::default()
    }

    fn visit_array(&mut self, input: &'a ArrayExpression, additional: &Self::AdditionalInput) -> Self::Output {
        match &input.kind {
            ArrayLiteralKind::List(elements) => elements.iter().for_each(|element| {
                self.visit_expression(element, additional);
            }),
            ArrayLiteralKind::Repeat { value, count } => {
                self.visit_expression(value, additional);
                self.visit_expression(count, &Default::default());
            }
        }
        Default::default()
    }

    fn visit_assign(&mut self, input: &'a AssignExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        self.visit_expression(&input.place, &Default::default());
        self.visit_expression(&input.value, &Default::default());
        Default::default()
    }

    fn visit_binary(&mut self, input: &'a BinaryExpression, additional: &Self::AdditionalInput) -> Self::Output {
        self.visit_expression(&input.left, additional);
        self.visit_expression(&input.right, additional);
        Default::default()
    }

    fn visit_block_expression(&mut self, _input: &'a Block, _additional: &Self::AdditionalInput) -> Self::Output {
        Default::default()
    }

    fn visit_call(&mut self, input: &'a CallExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        self.visit_expression(&input.function, &Default::default());
        input.arguments.iter().for_each(|argument| {
            self.visit_expression(argument, &Default::default());
        });
        Default::default()
    }

    fn visit_cast(&mut self, input: &'a CastExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        self.visit_expression(&input.expression, &Default::default());
        Default::default()
    }

    fn visit_closure(&mut self, _input: &'a FunctionLiteral, _additional: &Self::AdditionalInput) -> Self::Output {
        Default::default()
    }

    fn visit_err(&mut self, _input: &'a ErrExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        Default::default()
    }

    fn visit_identifier(&mut self, _input: &'a Identifier, _additional: &Self::AdditionalInput) -> Self::Output {
        Default::default()
    }

    fn visit_if(&mut self, input: &'a IfExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        self.visit_expression(&input.condition, &Default::default());
        if let Some(otherwise) = input.otherwise.as_ref() {
            self.visit_expression(otherwise, &Default::default());
        }
        Default::default()
    }

    fn visit_literal(&mut self, _input: &'a Literal, _additional: &Self::AdditionalInput) -> Self::Output {
        Default::default()
    }

    fn visit_map(&mut self, input: &'a MapExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        input.entries.iter().for_each(|entry| {
            self.visit_expression(&entry.key, &Default::default());
            self.visit_expression(&entry.value, &Default::default());
        });
        Default::default()
    }

    fn visit_match(&mut self, input: &'a MatchExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        self.visit_expression(&input.scrutinee, &Default::default());
        input.arms.iter().for_each(|arm| {
            self.visit_expression(&arm.body, &Default::default());
        });
        Default::default()
    }

    fn visit_range(&mut self, input: &'a RangeExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        if let Some(start) = input.start.as_ref() {
            self.visit_expression(start, &Default::default());
        }
        if let Some(stop) = input.stop.as_ref() {
            self.visit_expression(stop, &Default::default());
        }
        Default::default()
    }

    fn visit_record(&mut self, input: &'a RecordExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        input.members.iter().for_each(|member| {
            self.visit_expression(&member.expression, &Default::default());
        });
        Default::default()
    }

    fn visit_send(&mut self, input: &'a SendExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        self.visit_expression(&input.channel, &Default::default());
        self.visit_expression(&input.value, &Default::default());
        Default::default()
    }

    fn visit_struct_init(&mut self, input: &'a StructExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        input.members.iter().for_each(|member| {
            if let Some(expression) = member.expression.as_ref() {
                self.visit_expression(expression, &Default::default());
            }
        });
        Default::default()
    }

    fn visit_tuple(&mut self, input: &'a TupleExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        input.elements.iter().for_each(|element| {
            self.visit_expression(element, &Default::default());
        });
        Default::default()
    }

    fn visit_unary(&mut self, input: &'a UnaryExpression, additional: &Self::AdditionalInput) -> Self::Output {
        self.visit_expression(&input.receiver, additional);
        Default::default()
    }

    fn visit_unsafe(&mut self, _input: &'a UnsafeExpression, _additional: &Self::AdditionalInput) -> Self::Output {
        Default::default()
    }
}

/// A Visitor trait for statements in the AST.
pub trait StatementVisitor<'a>: ExpressionVisitor<'a> {
    fn visit_statement(&mut self, input: &'a Statement) {
        match input {
            Statement::Block(stmt) => self.visit_block(stmt),
            Statement::Break(stmt) => self.visit_break(stmt),
            Statement::Conditional(stmt) => self.visit_conditional(stmt),
            Statement::Continue(stmt) => self.visit_continue(stmt),
            Statement::Expression(stmt) => self.visit_expression_statement(stmt),
            Statement::Iteration(stmt) => self.visit_iteration(stmt),
            Statement::Let(stmt) => self.visit_let(stmt),
            Statement::Return(stmt) => self.visit_return(stmt),
            Statement::Select(stmt) => self.visit_select(stmt),
            Statement::Spawn(stmt) => self.visit_spawn(stmt),
            Statement::While(stmt) => self.visit_while(stmt),
        }
    }

    fn visit_block(&mut self, input: &'a Block) {
        input.statements.iter().for_each(|statement| self.visit_statement(statement));
        if let Some(tail) = input.tail.as_ref() {
            self.visit_expression(tail, &Default::default());
        }
    }

    fn visit_break(&mut self, _input: &'a BreakStatement) {}

    fn visit_conditional(&mut self, input: &'a ConditionalStatement) {
        self.visit_expression(&input.condition, &Default::default());
        self.visit_block(&input.then);
        if let Some(otherwise) = input.otherwise.as_ref() {
            self.visit_statement(otherwise);
        }
    }

    fn visit_continue(&mut self, _input: &'a ContinueStatement) {}

    fn visit_expression_statement(&mut self, input: &'a ExpressionStatement) {
        self.visit_expression(&input.expression, &Default::default());
    }

    fn visit_iteration(&mut self, input: &'a IterationStatement) {
        self.visit_expression(&input.iterable, &Default::default());
        self.visit_block(&input.block);
    }

    fn visit_let(&mut self, input: &'a LetStatement) {
        self.visit_expression(&input.value, &Default::default());
    }

    fn visit_return(&mut self, input: &'a ReturnStatement) {
        if let Some(expression) = input.expression.as_ref() {
            self.visit_expression(expression, &Default::default());
        }
    }

    fn visit_select(&mut self, input: &'a SelectStatement) {
        input.cases.iter().for_each(|case| {
            match &case.kind {
                SelectCaseKind::Recv { channel, .. } => {
                    self.visit_expression(channel, &Default::default());
                }
                SelectCaseKind::Send(send) => {
                    self.visit_send(send, &Default::default());
                }
            }
            self.visit_block(&case.block);
        });
    }

    fn visit_spawn(&mut self, input: &'a SpawnStatement) {
        match &input.body {
            SpawnBody::Call(call) => {
                self.visit_call(call, &Default::default());
            }
            SpawnBody::Block(block) => self.visit_block(block),
            SpawnBody::Closure { function, arguments } => {
                self.visit_closure(function, &Default::default());
                arguments.iter().for_each(|argument| {
                    self.visit_expression(argument, &Default::default());
                });
            }
        }
    }

    fn visit_while(&mut self, input: &'a WhileStatement) {
        self.visit_expression(&input.condition, &Default::default());
        self.visit_block(&input.block);
    }
}

/// A Visitor trait for a whole file.
pub trait ProgramVisitor<'a>: StatementVisitor<'a> {
    fn visit_file(&mut self, input: &'a File) {
        input.declarations.iter().for_each(|declaration| self.visit_declaration(declaration));
    }

    fn visit_declaration(&mut self, input: &'a Declaration) {
        match input {
            Declaration::Const(decl) => self.visit_const(decl),
            Declaration::Enum(decl) => self.visit_enum(decl),
            Declaration::Function(decl) => self.visit_function(decl),
            Declaration::Impl(decl) => self.visit_impl(decl),
            Declaration::Struct(decl) => self.visit_struct(decl),
            Declaration::Trait(decl) => self.visit_trait(decl),
            Declaration::TypeAlias(decl) => self.visit_type_alias(decl),
        }
    }

    fn visit_const(&mut self, input: &'a ConstDecl) {
        self.visit_expression(&input.value, &Default::default());
    }

    fn visit_enum(&mut self, _input: &'a EnumDecl) {}

    fn visit_function(&mut self, input: &'a Function) {
        self.visit_block(&input.block);
    }

    fn visit_impl(&mut self, input: &'a ImplDecl) {
        input.methods.iter().for_each(|method| self.visit_function(method));
    }

    fn visit_struct(&mut self, _input: &'a StructDecl) {}

    fn visit_trait(&mut self, _input: &'a TraitDecl) {}

    fn visit_type_alias(&mut self, _input: &'a TypeAliasDecl) {}
}
