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

use crate::type_model::Type;
use crate::type_checker::checker::TypeChecker;
use crate::VariableSymbol;

use vesper_ast::*;
use vesper_errors::TypeCheckerError;

impl<'a> StatementVisitor<'a> for TypeChecker<'a> {
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

    /// A block in statement position; its value, if any, is discarded.
    fn visit_block(&mut self, input: &'a Block) {
        self.check_block(input, &None);
    }

    fn visit_break(&mut self, _input: &'a BreakStatement) {}

    fn visit_conditional(&mut self, input: &'a ConditionalStatement) {
        let bool_ = self.arena.bool_();
        self.visit_expression(&input.condition, &Some(bool_));
        self.check_block(&input.then, &None);
        if let Some(otherwise) = input.otherwise.as_ref() {
            self.visit_statement(otherwise);
        }
    }

    fn visit_continue(&mut self, _input: &'a ContinueStatement) {}

    fn visit_expression_statement(&mut self, input: &'a ExpressionStatement) {
        self.visit_expression(&input.expression, &None);
    }

    /// `for x in iterable { ... }` binds `x` to the iterable's element.
    fn visit_iteration(&mut self, input: &'a IterationStatement) {
        let iterable = self
            .visit_expression(&input.iterable, &None)
            .unwrap_or_else(|| self.error_type());

        let element = match self.arena.get(self.unifier.zonk(self.arena, iterable)) {
            Type::Array { element, .. } | Type::Slice { element } | Type::Range { element } => element,
            Type::Channel { element, direction } => {
                if direction == ChannelDirection::Send {
                    self.emit_err(TypeCheckerError::invalid_operation(
                        "iterating over a send-only channel",
                        self.display(iterable),
                        input.iterable.span(),
                    ));
                }
                element
            }
            Type::Map { key, .. } => key,
            Type::Error => self.error_type(),
            _ => {
                self.emit_err(TypeCheckerError::invalid_operation(
                    "iterating over",
                    self.display(iterable),
                    input.iterable.span(),
                ));
                self.error_type()
            }
        };

        self.scopes.enter_scope();
        let symbol = VariableSymbol { type_: element, mutable: false, span: input.variable.span };
        let _ = self.scopes.insert(input.variable.name, symbol);
        self.check_block(&input.block, &None);
        self.scopes.exit_scope();
        self.release_borrows();
    }

    fn visit_let(&mut self, input: &'a LetStatement) {
        let annotated = input.type_.as_ref().map(|type_| self.lower_type(type_));
        let inferred = self
            .visit_expression(&input.value, &annotated)
            .unwrap_or_else(|| self.error_type());
        let type_ = annotated.unwrap_or(inferred);

        let symbol = VariableSymbol { type_, mutable: input.mutable, span: input.identifier.span };
        if let Err(original) = self.scopes.insert(input.identifier.name, symbol) {
            self.emit_err(
                TypeCheckerError::duplicate_definition(input.identifier.name, input.identifier.span)
                    .with_secondary_label(original, "first defined here")
                    .with_proof_step(
                        format!("`{}` was first defined in this scope here", input.identifier.name),
                        Some(original),
                    ),
            );
        }
    }

    fn visit_return(&mut self, input: &'a ReturnStatement) {
        let expected = self.return_type;
        match &input.expression {
            Some(expression) => {
                self.visit_expression(expression, &expected);
            }
            None => {
                // A bare `return;` only fits a void function.
                if let Some(expected) = expected {
                    let void = self.arena.void();
                    if self.unifier.unify(self.arena, void, expected).is_err() {
                        self.emit_err(TypeCheckerError::type_mismatch(self.display(expected), "void", input.span));
                    }
                }
            }
        }
    }

    /// Each select case is a receive (optionally binding) or a send;
    /// the arm body is entered when that communication completes.
    fn visit_select(&mut self, input: &'a SelectStatement) {
        for case in &input.cases {
            self.scopes.enter_scope();
            match &case.kind {
                SelectCaseKind::Recv { pattern, channel } => {
                    let channel_type = self
                        .visit_expression(channel, &None)
                        .unwrap_or_else(|| self.error_type());
                    let element = match self.arena.get(self.unifier.zonk(self.arena, channel_type)) {
                        Type::Channel { element, direction } => {
                            if direction == ChannelDirection::Send {
                                self.emit_err(TypeCheckerError::invalid_operation(
                                    "receiving from a send-only channel",
                                    self.display(channel_type),
                                    channel.span(),
                                ));
                            }
                            element
                        }
                        Type::Error => self.error_type(),
                        _ => {
                            self.emit_err(TypeCheckerError::invalid_operation(
                                "receiving from",
                                self.display(channel_type),
                                channel.span(),
                            ));
                            self.error_type()
                        }
                    };
                    if let Some(pattern) = pattern {
                        self.check_pattern(pattern, element);
                    }
                }
                SelectCaseKind::Send(send) => {
                    self.check_send(send, &None);
                }
            }
            self.check_block(&case.block, &None);
            self.scopes.exit_scope();
            self.release_borrows();
        }
    }

    /// A spawn introduces a new logical task; its body is checked in
    /// the parent's environment.
    fn visit_spawn(&mut self, input: &'a SpawnStatement) {
        match &input.body {
            SpawnBody::Call(call) => {
                self.check_spawned_call(call);
            }
            SpawnBody::Block(block) => {
                self.check_block(block, &None);
            }
            SpawnBody::Closure { function, arguments } => {
                let closure_type = self
                    .visit_expression_for_closure(function)
                    .unwrap_or_else(|| self.error_type());
                match self.arena.get(self.unifier.zonk(self.arena, closure_type)) {
                    Type::Function { parameters, .. } => {
                        if arguments.len() != parameters.len() {
                            self.emit_err(TypeCheckerError::wrong_argument_count(
                                parameters.len(),
                                arguments.len(),
                                input.span,
                            ));
                        }
                        for (argument, parameter) in arguments.iter().zip(parameters.iter()) {
                            self.visit_expression(argument, &Some(*parameter));
                        }
                        for argument in arguments.iter().skip(parameters.len()) {
                            self.visit_expression(argument, &None);
                        }
                    }
                    _ => {
                        for argument in arguments {
                            self.visit_expression(argument, &None);
                        }
                    }
                }
            }
        }
    }

    fn visit_while(&mut self, input: &'a WhileStatement) {
        let bool_ = self.arena.bool_();
        self.visit_expression(&input.condition, &Some(bool_));
        self.check_block(&input.block, &None);
    }
}

impl<'a> TypeChecker<'a> {
    /// Checks the call payload of a spawn statement; the spawned
    /// call's value is discarded.
    fn check_spawned_call(&mut self, call: &'a CallExpression) {
        let callee = self
            .visit_expression(&call.function, &None)
            .unwrap_or_else(|| self.error_type());
        match self.arena.get(self.unifier.zonk(self.arena, callee)) {
            Type::Function { parameters, .. } => {
                if call.arguments.len() != parameters.len() {
                    self.emit_err(TypeCheckerError::wrong_argument_count(
                        parameters.len(),
                        call.arguments.len(),
                        call.span,
                    ));
                }
                for (argument, parameter) in call.arguments.iter().zip(parameters.iter()) {
                    self.visit_expression(argument, &Some(*parameter));
                }
                for argument in call.arguments.iter().skip(parameters.len()) {
                    self.visit_expression(argument, &None);
                }
            }
            Type::Error => {
                for argument in &call.arguments {
                    self.visit_expression(argument, &None);
                }
            }
            _ => {
                self.emit_err(TypeCheckerError::not_callable(self.display(callee), call.span));
                for argument in &call.arguments {
                    self.visit_expression(argument, &None);
                }
            }
        }
        self.type_table.insert(call.id, self.arena.void());
    }

    /// Checks a spawn's function-literal payload.
    fn visit_expression_for_closure(&mut self, function: &'a FunctionLiteral) -> Option<crate::type_model::TypeId> {
        let parameters: Vec<crate::type_model::TypeId> =
            function.parameters.iter().map(|parameter| self.lower_type(&parameter.type_)).collect();
        let output = match &function.output {
            Some(output) => self.lower_type(output),
            None => self.arena.void(),
        };

        let saved_return = self.return_type.replace(output);
        self.scopes.enter_scope();
        for (parameter, type_) in function.parameters.iter().zip(parameters.iter()) {
            let symbol = VariableSymbol { type_: *type_, mutable: false, span: parameter.identifier.span };
            let _ = self.scopes.insert(parameter.identifier.name, symbol);
        }
        for statement in &function.body.statements {
            self.visit_statement(statement);
        }
        if let Some(tail) = &function.body.tail {
            self.visit_expression(tail, &Some(output));
        }
        self.scopes.exit_scope();
        self.release_borrows();
        self.return_type = saved_return;

        let type_ = self.arena.intern(Type::Function {
            parameters,
            output,
            effects: crate::type_model::Row::empty(),
        });
        self.type_table.insert(function.id, type_);
        Some(type_)
    }
}
