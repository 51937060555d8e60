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
use vesper_span::Span;

impl ParserContext<'_> {
    /// Returns an [`Expression`] AST node if the next tokens represent an
    /// expression. Includes struct literals.
    pub(crate) fn parse_expression(&mut self) -> Result<Expression> {
        // Store current parser state.
        let prior_fuzzy_state = self.disallow_struct_construction;

        // Allow struct literals.
        self.disallow_struct_construction = false;

        let result = self.parse_assignment_expression();

        // Restore prior parser state.
        self.disallow_struct_construction = prior_fuzzy_state;

        result
    }

    /// Parses an expression in scrutinee position (`if`, `while`, `for`,
    /// `match` headers), where a struct literal is not legal so that the
    /// `{` of the body is not consumed.
    pub(crate) fn parse_scrutinee_expression(&mut self) -> Result<Expression> {
        let prior_fuzzy_state = self.disallow_struct_construction;
        self.disallow_struct_construction = true;
        let result = self.parse_assignment_expression();
        self.disallow_struct_construction = prior_fuzzy_state;
        result
    }

    /// Returns an [`Expression`] AST node if the next tokens represent an
    /// assignment `place = value`. Assignment is right-associative.
    ///
    /// Otherwise, tries to parse the next tokens using [`parse_boolean_or_expression`].
    fn parse_assignment_expression(&mut self) -> Result<Expression> {
        let expr = self.parse_boolean_or_expression()?;

        if self.eat(&Token::Assign) {
            let value = self.parse_assignment_expression()?;
            return Ok(Expression::Assign(AssignExpression {
                span: expr.span() + value.span(),
                id: self.next_id(),
                place: Box::new(expr),
                value: Box::new(value),
            }));
        }

        Ok(expr)
    }

    /// Constructs a binary expression `left op right`.
    fn bin_expr(&self, left: Expression, right: Expression, op: BinaryOperation) -> Expression {
        Expression::Binary(BinaryExpression {
            span: left.span() + right.span(),
            id: self.next_id(),
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Parses a left-associative binary expression `<left> token <right>` using `f` for left/right.
    /// The `token` is translated to `op` in the AST.
    fn parse_bin_expr(
        &mut self,
        tokens: &[Token],
        mut f: impl FnMut(&mut Self) -> Result<Expression>,
    ) -> Result<Expression> {
        let mut expr = f(self)?;
        while let Some(op) = self.eat_bin_op(tokens) {
            let right = f(self)?;
            expr = self.bin_expr(expr, right, op);
        }
        Ok(expr)
    }

    /// Eats one of binary operators matching any in `tokens`.
    fn eat_bin_op(&mut self, tokens: &[Token]) -> Option<BinaryOperation> {
        self.eat_any(tokens).then(|| match &self.prev_token.token {
            Token::Eq => BinaryOperation::Eq,
            Token::NotEq => BinaryOperation::Neq,
            Token::Lt => BinaryOperation::Lt,
            Token::LtEq => BinaryOperation::Le,
            Token::Gt => BinaryOperation::Gt,
            Token::GtEq => BinaryOperation::Ge,
            Token::Add => BinaryOperation::Add,
            Token::Minus => BinaryOperation::Sub,
            Token::Mul => BinaryOperation::Mul,
            Token::Div => BinaryOperation::Div,
            Token::Rem => BinaryOperation::Rem,
            Token::Or => BinaryOperation::Or,
            Token::And => BinaryOperation::And,
            _ => unreachable!("`eat_bin_op` shouldn't produce this"),
        })
    }

    /// Returns an [`Expression`] AST node if the next tokens represent
    /// a binary OR expression.
    fn parse_boolean_or_expression(&mut self) -> Result<Expression> {
        self.parse_bin_expr(&[Token::Or], Self::parse_boolean_and_expression)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// binary AND expression.
    fn parse_boolean_and_expression(&mut self) -> Result<Expression> {
        self.parse_bin_expr(&[Token::And], Self::parse_equality_expression)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// binary equals or not equals expression.
    fn parse_equality_expression(&mut self) -> Result<Expression> {
        let mut expr = self.parse_ordering_expression()?;
        if let Some(op) = self.eat_bin_op(&[Token::Eq, Token::NotEq]) {
            let right = self.parse_ordering_expression()?;
            expr = self.bin_expr(expr, right, op);
        }
        Ok(expr)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// binary relational expression.
    fn parse_ordering_expression(&mut self) -> Result<Expression> {
        let mut expr = self.parse_range_expression()?;
        if let Some(op) = self.eat_bin_op(&[Token::Lt, Token::LtEq, Token::Gt, Token::GtEq]) {
            let right = self.parse_range_expression()?;
            expr = self.bin_expr(expr, right, op);
        }
        Ok(expr)
    }

    /// Can a range endpoint start at the current token?
    fn peek_is_range_endpoint(&self) -> bool {
        !matches!(
            self.token.token,
            Token::Semicolon
                | Token::Comma
                | Token::RightParen
                | Token::RightSquare
                | Token::RightCurly
                | Token::LeftCurly
                | Token::Colon
                | Token::Eof
        )
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// range expression `a..b`, `a..=b`, `..b`, or `a..`.
    fn parse_range_expression(&mut self) -> Result<Expression> {
        // An open-start range.
        if self.check(&Token::DotDot) || self.check(&Token::DotDotEq) {
            let inclusive = self.check(&Token::DotDotEq);
            let start_span = self.token.span;
            self.bump();
            let stop = if self.peek_is_range_endpoint() {
                Some(Box::new(self.parse_additive_expression()?))
            } else {
                None
            };
            let span = start_span + stop.as_ref().map(|e| e.span()).unwrap_or(start_span);
            return Ok(Expression::Range(RangeExpression {
                start: None,
                stop,
                inclusive,
                span,
                id: self.next_id(),
            }));
        }

        let expr = self.parse_additive_expression()?;
        if self.check(&Token::DotDot) || self.check(&Token::DotDotEq) {
            let inclusive = self.check(&Token::DotDotEq);
            self.bump();
            let stop = if self.peek_is_range_endpoint() {
                Some(Box::new(self.parse_additive_expression()?))
            } else {
                None
            };
            let span = expr.span() + stop.as_ref().map(|e| e.span()).unwrap_or(self.prev_token.span);
            return Ok(Expression::Range(RangeExpression {
                start: Some(Box::new(expr)),
                stop,
                inclusive,
                span,
                id: self.next_id(),
            }));
        }
        Ok(expr)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// binary addition or subtraction expression.
    fn parse_additive_expression(&mut self) -> Result<Expression> {
        self.parse_bin_expr(&[Token::Add, Token::Minus], Self::parse_multiplicative_expression)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// binary multiplication, division, or remainder expression.
    fn parse_multiplicative_expression(&mut self) -> Result<Expression> {
        self.parse_bin_expr(&[Token::Mul, Token::Div, Token::Rem], Self::parse_cast_expression)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// cast expression `e as T`.
    fn parse_cast_expression(&mut self) -> Result<Expression> {
        let mut expr = self.parse_unary_expression()?;
        while self.eat(&Token::As) {
            let type_ = self.parse_type()?;
            expr = Expression::Cast(CastExpression {
                span: expr.span() + type_.span(),
                id: self.next_id(),
                expression: Box::new(expr),
                type_,
            });
        }
        Ok(expr)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// unary expression: negation, logical not, dereference, borrow, or
    /// channel receive.
    pub(super) fn parse_unary_expression(&mut self) -> Result<Expression> {
        let mut ops = Vec::new();
        loop {
            let op = match self.token.token {
                Token::Not => UnaryOperation::Not,
                Token::Minus => UnaryOperation::Negate,
                Token::Mul => UnaryOperation::Deref,
                Token::LeftArrow => UnaryOperation::Recv,
                Token::Amp => {
                    let amp_span = self.token.span;
                    self.bump();
                    let op = if self.eat(&Token::Mut) { UnaryOperation::RefMut } else { UnaryOperation::Ref };
                    ops.push((op, amp_span + self.prev_token.span));
                    continue;
                }
                _ => break,
            };
            self.bump();
            ops.push((op, self.prev_token.span));
        }

        let mut inner = self.parse_postfix_expression()?;
        for (op, op_span) in ops.into_iter().rev() {
            inner = Expression::Unary(UnaryExpression {
                span: op_span + inner.span(),
                id: self.next_id(),
                op,
                receiver: Box::new(inner),
            });
        }
        Ok(inner)
    }

    /// Returns an [`Expression`] AST node if the next tokens represent a
    /// field access, index access, path access, call, or `?` postfix.
    ///
    /// Otherwise, tries to parse the next token using [`parse_primary_expression`].
    fn parse_postfix_expression(&mut self) -> Result<Expression> {
        let mut expr = self.parse_primary_expression()?;
        loop {
            if self.eat(&Token::Dot) {
                let name = self.expect_member_name()?;
                expr = Expression::Access(AccessExpression::Member(MemberAccess {
                    span: expr.span() + name.span,
                    id: self.next_id(),
                    inner: Box::new(expr),
                    name,
                }));
            } else if self.eat(&Token::DoubleColon) {
                let name = self.expect_identifier()?;
                expr = Expression::Access(AccessExpression::Static(StaticAccess {
                    span: expr.span() + name.span,
                    id: self.next_id(),
                    inner: Box::new(expr),
                    name,
                }));
            } else if self.check(&Token::LeftParen) {
                let (arguments, _, span) = self.parse_paren_comma_list(|p| p.parse_expression().map(Some))?;
                expr = Expression::Call(CallExpression {
                    span: expr.span() + span,
                    id: self.next_id(),
                    function: Box::new(expr),
                    arguments,
                });
            } else if self.check(&Token::LeftSquare) {
                let (indices, _, span) = self.parse_bracket_comma_list(|p| p.parse_expression().map(Some))?;
                expr = Expression::Access(AccessExpression::Index(IndexAccess {
                    span: expr.span() + span,
                    id: self.next_id(),
                    inner: Box::new(expr),
                    indices,
                }));
            } else if self.eat(&Token::Question) {
                expr = Expression::Unary(UnaryExpression {
                    span: expr.span() + self.prev_token.span,
                    id: self.next_id(),
                    op: UnaryOperation::Try,
                    receiver: Box::new(expr),
                });
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// A member name after `.`: an identifier, or an integer for tuple access.
    fn expect_member_name(&mut self) -> Result<Identifier> {
        if let Token::Int(index) = &self.token.token {
            let name = vesper_span::Symbol::intern(index);
            self.bump();
            return Ok(Identifier { name, span: self.prev_token.span, id: self.next_id() });
        }
        self.expect_identifier()
    }

    /// Parses a parenthesized expression: a group, the unit value `()`,
    /// or a tuple literal.
    fn parse_tuple_expression(&mut self) -> Result<Expression> {
        let (mut elements, trailing, span) = self.parse_paren_comma_list(|p| p.parse_expression().map(Some))?;

        if !trailing && elements.len() == 1 {
            Ok(elements.swap_remove(0))
        } else {
            Ok(Expression::Tuple(TupleExpression { elements, span, id: self.next_id() }))
        }
    }

    /// Parses an array literal `[a, b, c]` or a repeat form `[v; n]`.
    fn parse_array_expression(&mut self) -> Result<Expression> {
        let open = self.expect(&Token::LeftSquare)?;

        if self.check(&Token::RightSquare) {
            let close = self.expect(&Token::RightSquare)?;
            return Ok(Expression::Array(ArrayExpression {
                kind: ArrayLiteralKind::List(Vec::new()),
                element_type: None,
                span: open + close,
                id: self.next_id(),
            }));
        }

        let first = self.parse_expression()?;

        if self.eat(&Token::Semicolon) {
            let count = self.parse_expression()?;
            let close = self.expect(&Token::RightSquare)?;
            return Ok(Expression::Array(ArrayExpression {
                kind: ArrayLiteralKind::Repeat { value: Box::new(first), count: Box::new(count) },
                element_type: None,
                span: open + close,
                id: self.next_id(),
            }));
        }

        let mut elements = vec![first];
        while self.eat(&Token::Comma) {
            if self.check(&Token::RightSquare) {
                break;
            }
            elements.push(self.parse_expression()?);
        }
        let close = self.expect(&Token::RightSquare)?;
        Ok(Expression::Array(ArrayExpression {
            kind: ArrayLiteralKind::List(elements),
            element_type: None,
            span: open + close,
            id: self.next_id(),
        }))
    }

    /// Parses a brace-opened expression: an anonymous record literal, a
    /// map literal, or a block expression, disambiguated by lookahead.
    fn parse_brace_expression(&mut self) -> Result<Expression> {
        let is_record = self.look_ahead(1, |t| matches!(t.token, Token::Ident(_)))
            && self.look_ahead(2, |t| matches!(t.token, Token::Colon));
        let is_map = self
            .look_ahead(1, |t| {
                matches!(
                    t.token,
                    Token::Ident(_) | Token::Int(_) | Token::StringLit(_) | Token::True | Token::False
                )
            })
            && self.look_ahead(2, |t| matches!(t.token, Token::FatArrow));

        if is_record {
            let (members, _, span) = self.parse_brace_comma_list(|p| {
                let identifier = p.expect_identifier()?;
                p.expect(&Token::Colon)?;
                let expression = p.parse_expression()?;
                Ok(Some(RecordMember {
                    span: identifier.span + expression.span(),
                    id: p.next_id(),
                    identifier,
                    expression,
                }))
            })?;
            return Ok(Expression::Record(RecordExpression { members, span, id: self.next_id() }));
        }

        if is_map {
            let (entries, _, span) = self.parse_brace_comma_list(|p| {
                let key = p.parse_expression()?;
                p.expect(&Token::FatArrow)?;
                let value = p.parse_expression()?;
                Ok(Some(MapEntry { span: key.span() + value.span(), id: p.next_id(), key, value }))
            })?;
            return Ok(Expression::Map(MapExpression { entries, span, id: self.next_id() }));
        }

        Ok(Expression::Block(self.parse_block()?))
    }

    /// Parses the members of a struct literal, after the name and any
    /// explicit generic arguments.
    pub(super) fn parse_struct_expression(
        &mut self,
        name: Identifier,
        type_arguments: Vec<TypeArgument>,
    ) -> Result<Expression> {
        let (members, _, end) = self.parse_brace_comma_list(|p| {
            let identifier = p.expect_identifier()?;
            let expression = if p.eat(&Token::Colon) { Some(p.parse_expression()?) } else { None };
            Ok(Some(StructMember {
                span: identifier.span + expression.as_ref().map(|e| e.span()).unwrap_or(identifier.span),
                id: p.next_id(),
                identifier,
                expression,
            }))
        })?;

        Ok(Expression::Struct(StructExpression {
            span: name.span + end,
            id: self.next_id(),
            name,
            type_arguments,
            members,
        }))
    }

    /// After an identifier, is the bracket group at the cursor a generic
    /// argument list followed by `{`? Distinguishes a struct literal
    /// `Name[int] { ... }` from an index access `name[i]`.
    fn peek_is_generic_struct_literal(&self) -> bool {
        debug_assert!(self.check(&Token::LeftSquare));
        let mut depth = 0usize;
        let mut dist = 0usize;
        loop {
            let next = self.look_ahead(dist, |t| t.token.clone());
            match next {
                Token::LeftSquare => depth += 1,
                Token::RightSquare => {
                    depth -= 1;
                    if depth == 0 {
                        return self.look_ahead(dist + 1, |t| matches!(t.token, Token::LeftCurly));
                    }
                }
                Token::Eof => return false,
                _ => {}
            }
            dist += 1;
        }
    }

    /// Parses an `if` expression `if cond { ... } else ...`.
    pub(super) fn parse_if_expression(&mut self) -> Result<IfExpression> {
        let start = self.expect(&Token::If)?;
        let condition = self.parse_scrutinee_expression()?;
        let then = self.parse_block()?;

        let otherwise = if self.eat(&Token::Else) {
            Some(Box::new(if self.check(&Token::If) {
                Expression::If(self.parse_if_expression()?)
            } else {
                Expression::Block(self.parse_block()?)
            }))
        } else {
            None
        };

        let end = otherwise.as_ref().map(|e| e.span()).unwrap_or(then.span);
        Ok(IfExpression {
            span: start + end,
            id: self.next_id(),
            condition: Box::new(condition),
            then,
            otherwise,
        })
    }

    /// Parses a match expression `match scrutinee { pat => body, ... }`.
    pub(super) fn parse_match_expression(&mut self) -> Result<MatchExpression> {
        let start = self.expect(&Token::Match)?;
        let scrutinee = self.parse_scrutinee_expression()?;

        let (arms, _, end) = self.parse_brace_comma_list(|p| {
            let pattern = p.parse_pattern()?;
            p.expect(&Token::FatArrow)?;
            let body = p.parse_expression()?;
            Ok(Some(MatchArm {
                span: pattern.span() + body.span(),
                id: p.next_id(),
                pattern,
                body: Box::new(body),
            }))
        })?;

        Ok(MatchExpression {
            span: start + end,
            id: self.next_id(),
            scrutinee: Box::new(scrutinee),
            arms,
        })
    }

    /// Parses a function literal `fn(params) -> T { ... }`.
    pub(super) fn parse_function_literal(&mut self) -> Result<FunctionLiteral> {
        let start = self.expect(&Token::Fn)?;
        let (parameters, _, _) = self.parse_paren_comma_list(|p| p.parse_param().map(Some))?;
        let output = if self.eat(&Token::Arrow) { Some(self.parse_type()?) } else { None };
        let body = self.parse_block()?;

        Ok(FunctionLiteral {
            span: start + body.span,
            id: self.next_id(),
            parameters,
            output,
            body,
        })
    }

    /// Returns an [`Expression`] AST node if the next token is a primary
    /// expression: a literal, an identifier or struct literal, a grouped
    /// or collection literal, or a trailing-block expression.
    fn parse_primary_expression(&mut self) -> Result<Expression> {
        match &self.token.token {
            Token::LeftParen => return self.parse_tuple_expression(),
            Token::LeftSquare => return self.parse_array_expression(),
            Token::LeftCurly => return self.parse_brace_expression(),
            Token::If => return Ok(Expression::If(self.parse_if_expression()?)),
            Token::Match => return Ok(Expression::Match(self.parse_match_expression()?)),
            Token::Fn => return Ok(Expression::Closure(self.parse_function_literal()?)),
            Token::Unsafe => {
                let start = self.expect(&Token::Unsafe)?;
                let block = self.parse_block()?;
                return Ok(Expression::Unsafe(UnsafeExpression {
                    span: start + block.span,
                    id: self.next_id(),
                    block,
                }));
            }
            _ => {}
        }

        let SpannedToken { token, span } = self.token.clone();
        self.bump();

        Ok(match token {
            Token::Int(raw) => self.mk_literal(LiteralVariant::Integer(raw.replace('_', "")), span),
            Token::Float(raw) => self.mk_literal(LiteralVariant::Float(raw.replace('_', "")), span),
            Token::StringLit(value) => self.mk_literal(LiteralVariant::String(value), span),
            Token::True => self.mk_literal(LiteralVariant::Boolean(true), span),
            Token::False => self.mk_literal(LiteralVariant::Boolean(false), span),
            Token::Null => self.mk_literal(LiteralVariant::Null, span),
            Token::Ident(name) => {
                let ident = Identifier { name, span, id: self.next_id() };
                if !self.disallow_struct_construction && self.check(&Token::LeftCurly) {
                    self.parse_struct_expression(ident, Vec::new())?
                } else if !self.disallow_struct_construction
                    && self.check(&Token::LeftSquare)
                    && self.peek_is_generic_struct_literal()
                {
                    let (type_arguments, _, _) =
                        self.parse_bracket_comma_list(|p| p.parse_type_argument().map(Some))?;
                    self.parse_struct_expression(ident, type_arguments)?
                } else {
                    Expression::Identifier(ident)
                }
            }
            token => {
                return Err(ParserError::unexpected(token, "an expression", span));
            }
        })
    }

    fn mk_literal(&self, variant: LiteralVariant, span: Span) -> Expression {
        Expression::Literal(Literal { variant, span, id: self.next_id() })
    }
}
