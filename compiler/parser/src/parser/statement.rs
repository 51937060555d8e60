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

use super::*;

use vesper_ast::*;
use vesper_errors::{ParserError, Result};

/// What a statement-position parse produced: a statement, or the
/// block's tail expression.
pub(super) enum StatementOrTail {
    Statement(Statement),
    Tail(Expression),
}

impl ParserContext<'_> {
    /// Returns a [`Block`] AST node if the next tokens represent a block
    /// `{ ... }`. The final expression without a terminating semicolon,
    /// if any, becomes the block's tail.
    pub(crate) fn parse_block(&mut self) -> Result<Block> {
        let start = self.expect(&Token::LeftCurly)?;
        let mut statements = Vec::new();
        let mut tail = None;

        while !self.check(&Token::RightCurly) {
            if !self.has_next() {
                return Err(ParserError::unexpected_eof(self.token.span));
            }
            match self.parse_statement_or_tail() {
                Ok(StatementOrTail::Statement(statement)) => statements.push(statement),
                Ok(StatementOrTail::Tail(expression)) => {
                    tail = Some(Box::new(expression));
                    break;
                }
                Err(err) => {
                    // Record the diagnostic and resume at the next
                    // statement boundary; the block structure survives.
                    self.emit_err(err);
                    self.synchronize_statement();
                }
            }
        }

        let end = self.expect(&Token::RightCurly)?;
        Ok(Block { statements, tail, span: start + end, id: self.next_id() })
    }

    /// Parses one statement, or the tail expression if the block ends
    /// without a terminating semicolon.
    pub(super) fn parse_statement_or_tail(&mut self) -> Result<StatementOrTail> {
        match &self.token.token {
            Token::Return => Ok(StatementOrTail::Statement(Statement::Return(self.parse_return_statement()?))),
            Token::Let => Ok(StatementOrTail::Statement(Statement::Let(self.parse_let_statement()?))),
            Token::While => Ok(StatementOrTail::Statement(Statement::While(Box::new(self.parse_while_statement()?)))),
            Token::For => Ok(StatementOrTail::Statement(Statement::Iteration(Box::new(self.parse_for_statement()?)))),
            Token::Break => {
                let span = self.expect(&Token::Break)?;
                let span = span + self.expect(&Token::Semicolon)?;
                Ok(StatementOrTail::Statement(Statement::Break(BreakStatement { span, id: self.next_id() })))
            }
            Token::Continue => {
                let span = self.expect(&Token::Continue)?;
                let span = span + self.expect(&Token::Semicolon)?;
                Ok(StatementOrTail::Statement(Statement::Continue(ContinueStatement { span, id: self.next_id() })))
            }
            Token::Spawn => Ok(StatementOrTail::Statement(Statement::Spawn(self.parse_spawn_statement()?))),
            Token::Select => Ok(StatementOrTail::Statement(Statement::Select(self.parse_select_statement()?))),
            _ => self.parse_expression_led_statement(),
        }
    }

    /// Parses a statement that begins with an expression: assignments,
    /// sends, expression statements, trailing-block statements, and the
    /// block tail.
    fn parse_expression_led_statement(&mut self) -> Result<StatementOrTail> {
        let expression = self.parse_expression()?;

        // A channel send `ch <- v` is a statement.
        if self.eat(&Token::LeftArrow) {
            let value = self.parse_expression()?;
            let send = SendExpression {
                span: expression.span() + value.span(),
                id: self.next_id(),
                channel: Box::new(expression),
                value: Box::new(value),
            };
            let end = self.expect(&Token::Semicolon)?;
            return Ok(StatementOrTail::Statement(Statement::Expression(ExpressionStatement {
                span: send.span + end,
                id: self.next_id(),
                expression: Expression::Send(send),
            })));
        }

        if self.eat(&Token::Semicolon) {
            let span = expression.span() + self.prev_token.span;
            return Ok(StatementOrTail::Statement(Statement::Expression(ExpressionStatement {
                span,
                id: self.next_id(),
                expression,
            })));
        }

        // No semicolon: the final expression is the block's value.
        if self.check(&Token::RightCurly) {
            return Ok(StatementOrTail::Tail(expression));
        }

        // Trailing-block expressions stand as statements on their own.
        match expression {
            Expression::If(if_) => {
                let conditional = self.conditional_statement_from(if_);
                Ok(StatementOrTail::Statement(Statement::Conditional(conditional)))
            }
            Expression::Block(block) => Ok(StatementOrTail::Statement(Statement::Block(block))),
            expression @ (Expression::Match(_) | Expression::Unsafe(_)) => {
                Ok(StatementOrTail::Statement(Statement::Expression(ExpressionStatement {
                    span: expression.span(),
                    id: self.next_id(),
                    expression,
                })))
            }
            _ => Err(ParserError::missing_terminator(&self.token.token, self.token.span)),
        }
    }

    /// Rewrites an `if` expression in statement position into a
    /// conditional statement, recursively along the `else` chain.
    fn conditional_statement_from(&self, if_: IfExpression) -> ConditionalStatement {
        let otherwise = if_.otherwise.map(|otherwise| {
            Box::new(match *otherwise {
                Expression::If(nested) => Statement::Conditional(self.conditional_statement_from(nested)),
                Expression::Block(block) => Statement::Block(block),
                other => Statement::Expression(ExpressionStatement {
                    span: other.span(),
                    id: self.next_id(),
                    expression: other,
                }),
            })
        });

        ConditionalStatement {
            span: if_.span,
            id: if_.id,
            condition: *if_.condition,
            then: if_.then,
            otherwise,
        }
    }

    /// Returns a [`ReturnStatement`] AST node if the next tokens represent a return statement.
    fn parse_return_statement(&mut self) -> Result<ReturnStatement> {
        let start = self.expect(&Token::Return)?;
        let expression = match self.token.token {
            Token::Semicolon => None,
            _ => Some(self.parse_expression()?),
        };
        let end = self.expect(&Token::Semicolon)?;
        Ok(ReturnStatement { span: start + end, id: self.next_id(), expression })
    }

    /// Returns a [`LetStatement`] AST node if the next tokens represent a binding.
    fn parse_let_statement(&mut self) -> Result<LetStatement> {
        let start = self.expect(&Token::Let)?;
        let mutable = self.eat(&Token::Mut);
        let identifier = self.expect_identifier()?;

        let type_ = if self.eat(&Token::Colon) { Some(self.parse_type()?) } else { None };

        self.expect(&Token::Assign)?;
        let value = self.parse_expression()?;
        let end = self.expect(&Token::Semicolon)?;

        Ok(LetStatement {
            span: start + end,
            id: self.next_id(),
            mutable,
            identifier,
            type_,
            value,
        })
    }

    /// Returns a [`WhileStatement`] AST node if the next tokens represent a while loop.
    fn parse_while_statement(&mut self) -> Result<WhileStatement> {
        let start = self.expect(&Token::While)?;
        let condition = self.parse_scrutinee_expression()?;
        let block = self.parse_block()?;
        Ok(WhileStatement { span: start + block.span, id: self.next_id(), condition, block })
    }

    /// Returns an [`IterationStatement`] AST node if the next tokens represent a for-in loop.
    fn parse_for_statement(&mut self) -> Result<IterationStatement> {
        let start = self.expect(&Token::For)?;
        let variable = self.expect_identifier()?;
        self.expect(&Token::In)?;
        let iterable = self.parse_scrutinee_expression()?;
        let block = self.parse_block()?;
        Ok(IterationStatement {
            span: start + block.span,
            id: self.next_id(),
            variable,
            iterable,
            block,
        })
    }

    /// Returns a [`SpawnStatement`] AST node. The payload is a call, a
    /// block, or a function literal applied to arguments.
    fn parse_spawn_statement(&mut self) -> Result<SpawnStatement> {
        let start = self.expect(&Token::Spawn)?;

        let body = match &self.token.token {
            Token::LeftCurly => SpawnBody::Block(self.parse_block()?),
            Token::Fn => {
                let function = self.parse_function_literal()?;
                let (arguments, _, _) = self.parse_paren_comma_list(|p| p.parse_expression().map(Some))?;
                SpawnBody::Closure { function, arguments }
            }
            _ => {
                let expression = self.parse_expression()?;
                match expression {
                    Expression::Call(call) => SpawnBody::Call(call),
                    other => {
                        return Err(ParserError::unexpected(other, "a call to spawn", self.token.span));
                    }
                }
            }
        };

        let end = self.expect(&Token::Semicolon)?;
        Ok(SpawnStatement { span: start + end, id: self.next_id(), body })
    }

    /// Returns a [`SelectStatement`] AST node if the next tokens represent
    /// a select statement `select { case ... }`.
    fn parse_select_statement(&mut self) -> Result<SelectStatement> {
        let start = self.expect(&Token::Select)?;
        self.expect(&Token::LeftCurly)?;

        let mut cases = Vec::new();
        while !self.check(&Token::RightCurly) {
            if !self.has_next() {
                return Err(ParserError::unexpected_eof(self.token.span));
            }
            cases.push(self.parse_select_case()?);
        }

        let end = self.expect(&Token::RightCurly)?;
        Ok(SelectStatement { span: start + end, id: self.next_id(), cases })
    }

    /// One select case: `case <-ch { }`, `case p = <-ch { }`, or
    /// `case ch <- v { }`.
    fn parse_select_case(&mut self) -> Result<SelectCase> {
        let start = self.expect(&Token::Case)?;

        let kind = if self.eat(&Token::LeftArrow) {
            // A receive without a binding.
            let channel = self.parse_scrutinee_expression()?;
            SelectCaseKind::Recv { pattern: None, channel }
        } else if self.peek_is_binding_case() {
            let pattern = self.parse_pattern()?;
            self.expect(&Token::Assign)?;
            self.expect(&Token::LeftArrow)?;
            let channel = self.parse_scrutinee_expression()?;
            SelectCaseKind::Recv { pattern: Some(pattern), channel }
        } else {
            let channel = self.parse_scrutinee_expression()?;
            self.expect(&Token::LeftArrow)?;
            let value = self.parse_scrutinee_expression()?;
            SelectCaseKind::Send(SendExpression {
                span: channel.span() + value.span(),
                id: self.next_id(),
                channel: Box::new(channel),
                value: Box::new(value),
            })
        };

        let block = self.parse_block()?;
        Ok(SelectCase { span: start + block.span, id: self.next_id(), kind, block })
    }

    /// Does the select case at the cursor start with a binding pattern?
    fn peek_is_binding_case(&self) -> bool {
        match &self.token.token {
            Token::Mut | Token::Underscore => true,
            Token::Ident(_) => self.look_ahead(1, |t| matches!(t.token, Token::Assign)),
            _ => false,
        }
    }
}
