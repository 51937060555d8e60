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

use vesper_ast::*;
use vesper_compiler::Compiler;
use vesper_errors::{emitter::Handler, Diagnostic, DiagnosticCode, Severity};
use vesper_span::FileName;

use indexmap::IndexMap;

/// The outcome of running the front-end over one source string.
pub struct Checked {
    pub file: File,
    pub diagnostics: Vec<Diagnostic>,
    /// The expression-to-type table, rendered to strings.
    pub types: IndexMap<NodeID, String>,
}

impl Checked {
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error).collect()
    }

    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning).collect()
    }

    pub fn errors_with(&self, code: DiagnosticCode) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code == code).collect()
    }

    pub fn assert_clean(&self) {
        assert!(self.errors().is_empty(), "unexpected diagnostics: {:?}", self.diagnostics);
    }

    /// The rendered type of the initializer of `let <name> = ...;`,
    /// searched across all function bodies.
    pub fn binding_type(&self, name: &str) -> Option<&String> {
        let target = find_let(&self.file, name)?;
        self.types.get(&target.value.id())
    }
}

/// Runs the whole front-end over `source`.
pub fn check(source: &str) -> Checked {
    let handler = Handler::new();
    let mut compiler = Compiler::new(&handler, "main.vsp".into(), ".".into(), None);

    // Parsing and checking accumulate into the handler; a returned
    // error only short-circuits later stages.
    if compiler.parse_program_from_string(source, FileName::Custom("main.vsp".into())).is_ok() {
        let _ = compiler.compiler_stages();
    }

    let types = compiler
        .type_table()
        .entries()
        .into_iter()
        .map(|(id, type_)| (id, compiler.arena().display(type_)))
        .collect();

    Checked { file: compiler.as_file().clone(), diagnostics: handler.diagnostics(), types }
}

/// Collects the node IDs of every value-position expression in the file.
pub fn all_expression_ids(file: &File) -> Vec<NodeID> {
    let mut ids = Vec::new();
    for declaration in &file.declarations {
        match declaration {
            Declaration::Function(function) => walk_block(&function.block, &mut ids),
            Declaration::Const(const_) => walk_expression(&const_.value, &mut ids),
            Declaration::Impl(impl_) => {
                for method in &impl_.methods {
                    walk_block(&method.block, &mut ids);
                }
            }
            Declaration::Trait(trait_) => {
                for method in &trait_.methods {
                    if let Some(body) = &method.body {
                        walk_block(body, &mut ids);
                    }
                }
            }
            _ => {}
        }
    }
    ids
}

/// Finds the `let` statement binding `name`, anywhere in the file.
pub fn find_let<'a>(file: &'a File, name: &str) -> Option<&'a LetStatement> {
    fn in_block<'a>(block: &'a Block, name: &str) -> Option<&'a LetStatement> {
        for statement in &block.statements {
            if let Some(found) = in_statement(statement, name) {
                return Some(found);
            }
        }
        None
    }

    fn in_statement<'a>(statement: &'a Statement, name: &str) -> Option<&'a LetStatement> {
        match statement {
            Statement::Let(let_) if let_.identifier.name.as_str() == name => Some(let_),
            Statement::Block(block) => in_block(block, name),
            Statement::Conditional(conditional) => in_block(&conditional.then, name)
                .or_else(|| conditional.otherwise.as_ref().and_then(|otherwise| in_statement(otherwise, name))),
            Statement::While(while_) => in_block(&while_.block, name),
            Statement::Iteration(iteration) => in_block(&iteration.block, name),
            Statement::Select(select) => select.cases.iter().find_map(|case| in_block(&case.block, name)),
            Statement::Spawn(spawn) => match &spawn.body {
                SpawnBody::Block(block) => in_block(block, name),
                SpawnBody::Closure { function, .. } => in_block(&function.body, name),
                SpawnBody::Call(_) => None,
            },
            _ => None,
        }
    }

    for declaration in &file.declarations {
        if let Declaration::Function(function) = declaration {
            if let Some(found) = in_block(&function.block, name) {
                return Some(found);
            }
        }
    }
    None
}

/// Finds the first string literal with the given decoded value.
pub fn find_string_literal<'a>(file: &'a File, value: &str) -> Option<&'a Literal> {
    let mut found_id = None;
    for declaration in &file.declarations {
        if let Declaration::Function(function) = declaration {
            let mut ids = Vec::new();
            walk_block_with(&function.block, &mut ids, &mut |expression| {
                if let Expression::Literal(literal) = expression {
                    if matches!(&literal.variant, LiteralVariant::String(s) if s == value) && found_id.is_none() {
                        found_id = Some(literal.id);
                    }
                }
            });
        }
    }
    find_literal_by_id(file, found_id?)
}

fn find_literal_by_id(file: &File, id: NodeID) -> Option<&Literal> {
    fn in_expression(expression: &Expression, id: NodeID) -> Option<&Literal> {
        if let Expression::Literal(literal) = expression {
            if literal.id == id {
                return Some(literal);
            }
        }
        let mut result = None;
        match expression {
            Expression::Access(AccessExpression::Member(member)) => result = in_expression(&member.inner, id),
            Expression::Access(AccessExpression::Index(index)) => {
                result = in_expression(&index.inner, id)
                    .or_else(|| index.indices.iter().find_map(|e| in_expression(e, id)));
            }
            Expression::Access(AccessExpression::Static(static_)) => result = in_expression(&static_.inner, id),
            Expression::Array(array) => match &array.kind {
                ArrayLiteralKind::List(elements) => result = elements.iter().find_map(|e| in_expression(e, id)),
                ArrayLiteralKind::Repeat { value, count } => {
                    result = in_expression(value, id).or_else(|| in_expression(count, id))
                }
            },
            Expression::Assign(assign) => {
                result = in_expression(&assign.place, id).or_else(|| in_expression(&assign.value, id))
            }
            Expression::Binary(binary) => {
                result = in_expression(&binary.left, id).or_else(|| in_expression(&binary.right, id))
            }
            Expression::Block(block) => result = in_block(block, id),
            Expression::Call(call) => {
                result = in_expression(&call.function, id)
                    .or_else(|| call.arguments.iter().find_map(|e| in_expression(e, id)));
            }
            Expression::Cast(cast) => result = in_expression(&cast.expression, id),
            Expression::Closure(closure) => result = in_block(&closure.body, id),
            Expression::If(if_) => {
                result = in_expression(&if_.condition, id)
                    .or_else(|| in_block(&if_.then, id))
                    .or_else(|| if_.otherwise.as_ref().and_then(|e| in_expression(e, id)));
            }
            Expression::Map(map) => {
                result = map
                    .entries
                    .iter()
                    .find_map(|entry| in_expression(&entry.key, id).or_else(|| in_expression(&entry.value, id)));
            }
            Expression::Match(match_) => {
                result = in_expression(&match_.scrutinee, id)
                    .or_else(|| match_.arms.iter().find_map(|arm| in_expression(&arm.body, id)));
            }
            Expression::Range(range) => {
                result = range
                    .start
                    .as_ref()
                    .and_then(|e| in_expression(e, id))
                    .or_else(|| range.stop.as_ref().and_then(|e| in_expression(e, id)));
            }
            Expression::Record(record) => {
                result = record.members.iter().find_map(|member| in_expression(&member.expression, id));
            }
            Expression::Send(send) => {
                result = in_expression(&send.channel, id).or_else(|| in_expression(&send.value, id))
            }
            Expression::Struct(struct_) => {
                result = struct_
                    .members
                    .iter()
                    .find_map(|member| member.expression.as_ref().and_then(|e| in_expression(e, id)));
            }
            Expression::Tuple(tuple) => result = tuple.elements.iter().find_map(|e| in_expression(e, id)),
            Expression::Unary(unary) => result = in_expression(&unary.receiver, id),
            Expression::Unsafe(unsafe_) => result = in_block(&unsafe_.block, id),
            Expression::Err(_) | Expression::Identifier(_) | Expression::Literal(_) => {}
        }
        result
    }

    fn in_block(block: &Block, id: NodeID) -> Option<&Literal> {
        for statement in &block.statements {
            if let Some(found) = in_statement(statement, id) {
                return Some(found);
            }
        }
        block.tail.as_ref().and_then(|tail| in_expression(tail, id))
    }

    fn in_statement(statement: &Statement, id: NodeID) -> Option<&Literal> {
        match statement {
            Statement::Block(block) => in_block(block, id),
            Statement::Break(_) | Statement::Continue(_) => None,
            Statement::Conditional(conditional) => in_expression(&conditional.condition, id)
                .or_else(|| in_block(&conditional.then, id))
                .or_else(|| conditional.otherwise.as_ref().and_then(|s| in_statement(s, id))),
            Statement::Expression(expression) => in_expression(&expression.expression, id),
            Statement::Iteration(iteration) => {
                in_expression(&iteration.iterable, id).or_else(|| in_block(&iteration.block, id))
            }
            Statement::Let(let_) => in_expression(&let_.value, id),
            Statement::Return(return_) => return_.expression.as_ref().and_then(|e| in_expression(e, id)),
            Statement::Select(select) => select.cases.iter().find_map(|case| {
                let from_kind = match &case.kind {
                    SelectCaseKind::Recv { channel, .. } => in_expression(channel, id),
                    SelectCaseKind::Send(send) => {
                        in_expression(&send.channel, id).or_else(|| in_expression(&send.value, id))
                    }
                };
                from_kind.or_else(|| in_block(&case.block, id))
            }),
            Statement::Spawn(spawn) => match &spawn.body {
                SpawnBody::Call(call) => in_expression(&call.function, id)
                    .or_else(|| call.arguments.iter().find_map(|e| in_expression(e, id))),
                SpawnBody::Block(block) => in_block(block, id),
                SpawnBody::Closure { function, arguments } => in_block(&function.body, id)
                    .or_else(|| arguments.iter().find_map(|e| in_expression(e, id))),
            },
            Statement::While(while_) => {
                in_expression(&while_.condition, id).or_else(|| in_block(&while_.block, id))
            }
        }
    }

    for declaration in &file.declarations {
        let found = match declaration {
            Declaration::Function(function) => in_block(&function.block, id),
            Declaration::Const(const_) => in_expression(&const_.value, id),
            Declaration::Impl(impl_) => impl_.methods.iter().find_map(|method| in_block(&method.block, id)),
            _ => None,
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

fn walk_block(block: &Block, ids: &mut Vec<NodeID>) {
    walk_block_with(block, ids, &mut |_| {});
}

fn walk_block_with(block: &Block, ids: &mut Vec<NodeID>, visit: &mut dyn FnMut(&Expression)) {
    for statement in &block.statements {
        walk_statement(statement, ids, visit);
    }
    if let Some(tail) = &block.tail {
        walk_expression_with(tail, ids, visit);
    }
}

fn walk_statement(statement: &Statement, ids: &mut Vec<NodeID>, visit: &mut dyn FnMut(&Expression)) {
    match statement {
        Statement::Block(block) => walk_block_with(block, ids, visit),
        Statement::Break(_) | Statement::Continue(_) => {}
        Statement::Conditional(conditional) => {
            walk_expression_with(&conditional.condition, ids, visit);
            walk_block_with(&conditional.then, ids, visit);
            if let Some(otherwise) = &conditional.otherwise {
                walk_statement(otherwise, ids, visit);
            }
        }
        Statement::Expression(expression) => walk_expression_with(&expression.expression, ids, visit),
        Statement::Iteration(iteration) => {
            walk_expression_with(&iteration.iterable, ids, visit);
            walk_block_with(&iteration.block, ids, visit);
        }
        Statement::Let(let_) => walk_expression_with(&let_.value, ids, visit),
        Statement::Return(return_) => {
            if let Some(expression) = &return_.expression {
                walk_expression_with(expression, ids, visit);
            }
        }
        Statement::Select(select) => {
            for case in &select.cases {
                match &case.kind {
                    SelectCaseKind::Recv { channel, .. } => walk_expression_with(channel, ids, visit),
                    SelectCaseKind::Send(send) => {
                        walk_expression_with(&send.channel, ids, visit);
                        walk_expression_with(&send.value, ids, visit);
                    }
                }
                walk_block_with(&case.block, ids, visit);
            }
        }
        Statement::Spawn(spawn) => match &spawn.body {
            SpawnBody::Call(call) => {
                ids.push(call.id);
                walk_expression_with(&call.function, ids, visit);
                for argument in &call.arguments {
                    walk_expression_with(argument, ids, visit);
                }
            }
            SpawnBody::Block(block) => walk_block_with(block, ids, visit),
            SpawnBody::Closure { function, arguments } => {
                walk_block_with(&function.body, ids, visit);
                for argument in arguments {
                    walk_expression_with(argument, ids, visit);
                }
            }
        },
        Statement::While(while_) => {
            walk_expression_with(&while_.condition, ids, visit);
            walk_block_with(&while_.block, ids, visit);
        }
    }
}

fn walk_expression(expression: &Expression, ids: &mut Vec<NodeID>) {
    walk_expression_with(expression, ids, &mut |_| {});
}

fn walk_expression_with(expression: &Expression, ids: &mut Vec<NodeID>, visit: &mut dyn FnMut(&Expression)) {
    ids.push(expression.id());
    visit(expression);

    match expression {
        Expression::Access(access) => match access {
            AccessExpression::Member(member) => walk_expression_with(&member.inner, ids, visit),
            AccessExpression::Index(index) => {
                walk_expression_with(&index.inner, ids, visit);
                for index_expression in &index.indices {
                    walk_expression_with(index_expression, ids, visit);
                }
            }
            AccessExpression::Static(static_) => walk_expression_with(&static_.inner, ids, visit),
        },
        Expression::Array(array) => match &array.kind {
            ArrayLiteralKind::List(elements) => {
                for element in elements {
                    walk_expression_with(element, ids, visit);
                }
            }
            ArrayLiteralKind::Repeat { value, count } => {
                walk_expression_with(value, ids, visit);
                walk_expression_with(count, ids, visit);
            }
        },
        Expression::Assign(assign) => {
            walk_expression_with(&assign.place, ids, visit);
            walk_expression_with(&assign.value, ids, visit);
        }
        Expression::Binary(binary) => {
            walk_expression_with(&binary.left, ids, visit);
            walk_expression_with(&binary.right, ids, visit);
        }
        Expression::Block(block) => walk_block_with(block, ids, visit),
        Expression::Call(call) => {
            walk_expression_with(&call.function, ids, visit);
            for argument in &call.arguments {
                walk_expression_with(argument, ids, visit);
            }
        }
        Expression::Cast(cast) => walk_expression_with(&cast.expression, ids, visit),
        Expression::Closure(closure) => walk_block_with(&closure.body, ids, visit),
        Expression::Err(_) | Expression::Identifier(_) | Expression::Literal(_) => {}
        Expression::If(if_) => {
            walk_expression_with(&if_.condition, ids, visit);
            walk_block_with(&if_.then, ids, visit);
            if let Some(otherwise) = &if_.otherwise {
                walk_expression_with(otherwise, ids, visit);
            }
        }
        Expression::Map(map) => {
            for entry in &map.entries {
                walk_expression_with(&entry.key, ids, visit);
                walk_expression_with(&entry.value, ids, visit);
            }
        }
        Expression::Match(match_) => {
            walk_expression_with(&match_.scrutinee, ids, visit);
            for arm in &match_.arms {
                walk_expression_with(&arm.body, ids, visit);
            }
        }
        Expression::Range(range) => {
            if let Some(start) = &range.start {
                walk_expression_with(start, ids, visit);
            }
            if let Some(stop) = &range.stop {
                walk_expression_with(stop, ids, visit);
            }
        }
        Expression::Record(record) => {
            for member in &record.members {
                walk_expression_with(&member.expression, ids, visit);
            }
        }
        Expression::Send(send) => {
            walk_expression_with(&send.channel, ids, visit);
            walk_expression_with(&send.value, ids, visit);
        }
        Expression::Struct(struct_) => {
            for member in &struct_.members {
                if let Some(value) = &member.expression {
                    walk_expression_with(value, ids, visit);
                }
            }
        }
        Expression::Tuple(tuple) => {
            for element in &tuple.elements {
                walk_expression_with(element, ids, visit);
            }
        }
        Expression::Unary(unary) => walk_expression_with(&unary.receiver, ids, visit),
        Expression::Unsafe(unsafe_) => walk_block_with(&unsafe_.block, ids, visit),
    }
}
