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

impl ParserContext<'_> {
    /// Returns a [`TypeExpression`] AST node if the next tokens represent a type.
    pub(crate) fn parse_type(&mut self) -> Result<TypeExpression> {
        let mut type_ = self.parse_prefix_type()?;

        // Postfix forms: `T?` and `T::Assoc`.
        loop {
            if self.eat(&Token::Question) {
                type_ = TypeExpression::Optional(OptionalType {
                    span: type_.span() + self.prev_token.span,
                    id: self.next_id(),
                    element: Box::new(type_),
                });
            } else if self.eat(&Token::DoubleColon) {
                let associated = self.expect_identifier()?;
                type_ = TypeExpression::Projection(ProjectionType {
                    span: type_.span() + associated.span,
                    id: self.next_id(),
                    base: Box::new(type_),
                    associated,
                });
            } else {
                return Ok(type_);
            }
        }
    }

    fn parse_prefix_type(&mut self) -> Result<TypeExpression> {
        match &self.token.token {
            Token::Amp => {
                let start = self.expect(&Token::Amp)?;
                let mutable = self.eat(&Token::Mut);
                let element = self.parse_prefix_type()?;
                Ok(TypeExpression::Reference(ReferenceType {
                    span: start + element.span(),
                    id: self.next_id(),
                    mutable,
                    element: Box::new(element),
                }))
            }
            Token::Mul => {
                let start = self.expect(&Token::Mul)?;
                let element = self.parse_prefix_type()?;
                Ok(TypeExpression::Pointer(PointerType {
                    span: start + element.span(),
                    id: self.next_id(),
                    element: Box::new(element),
                }))
            }
            Token::LeftArrow => {
                // `<-chan T`, a receive-only channel.
                let start = self.expect(&Token::LeftArrow)?;
                self.expect(&Token::Chan)?;
                let element = self.parse_prefix_type()?;
                Ok(TypeExpression::Channel(ChannelType {
                    span: start + element.span(),
                    id: self.next_id(),
                    direction: ChannelDirection::Recv,
                    element: Box::new(element),
                }))
            }
            Token::Chan => {
                let start = self.expect(&Token::Chan)?;
                let direction = if self.eat(&Token::LeftArrow) { ChannelDirection::Send } else { ChannelDirection::Both };
                let element = self.parse_prefix_type()?;
                Ok(TypeExpression::Channel(ChannelType {
                    span: start + element.span(),
                    id: self.next_id(),
                    direction,
                    element: Box::new(element),
                }))
            }
            Token::LeftSquare => {
                let start = self.expect(&Token::LeftSquare)?;
                let element = self.parse_type()?;
                if self.eat(&Token::Semicolon) {
                    let size = self.parse_expression()?;
                    let end = self.expect(&Token::RightSquare)?;
                    Ok(TypeExpression::Array(ArrayType {
                        span: start + end,
                        id: self.next_id(),
                        element: Box::new(element),
                        size: Box::new(size),
                    }))
                } else {
                    let end = self.expect(&Token::RightSquare)?;
                    Ok(TypeExpression::Slice(SliceType {
                        span: start + end,
                        id: self.next_id(),
                        element: Box::new(element),
                    }))
                }
            }
            Token::LeftParen => {
                let (mut elements, trailing, span) = self.parse_paren_comma_list(|p| p.parse_type().map(Some))?;
                if !trailing && elements.len() == 1 {
                    Ok(elements.swap_remove(0))
                } else {
                    Ok(TypeExpression::Tuple(TupleType { elements, span, id: self.next_id() }))
                }
            }
            Token::LeftCurly => self.parse_record_type(),
            Token::Fn => self.parse_function_type(),
            Token::Forall => {
                let start = self.expect(&Token::Forall)?;
                let params = self.parse_generic_params()?;
                let body = self.parse_type()?;
                Ok(TypeExpression::Forall(ForallType {
                    span: start + body.span(),
                    id: self.next_id(),
                    params,
                    body: Box::new(body),
                }))
            }
            Token::Exists => {
                let start = self.expect(&Token::Exists)?;
                let param = self.expect_identifier()?;
                self.expect(&Token::Colon)?;
                let bounds = self.parse_trait_bounds()?;
                self.expect(&Token::Dot)?;
                let body = self.parse_type()?;
                Ok(TypeExpression::Existential(ExistentialType {
                    span: start + body.span(),
                    id: self.next_id(),
                    param,
                    bounds,
                    body: Box::new(body),
                    sugared: false,
                }))
            }
            Token::Dyn => {
                // `dyn Tr` is sugar for `exists T: Tr. T`; the sugared
                // form is recorded so consumers can tell them apart.
                let start = self.expect(&Token::Dyn)?;
                let bound = self.parse_trait_bound()?;
                let span = start + bound.span;
                let param = Identifier {
                    name: vesper_span::Symbol::intern("T"),
                    span: bound.span,
                    id: self.next_id(),
                };
                let body = TypeExpression::Named(NamedType { name: param, span: bound.span, id: self.next_id() });
                Ok(TypeExpression::Existential(ExistentialType {
                    span,
                    id: self.next_id(),
                    param,
                    bounds: vec![bound],
                    body: Box::new(body),
                    sugared: true,
                }))
            }
            Token::Ident(_) => {
                let name = self.expect_identifier()?;
                if self.check(&Token::LeftSquare) {
                    let (arguments, _, end) =
                        self.parse_bracket_comma_list(|p| p.parse_type_argument().map(Some))?;
                    Ok(TypeExpression::Generic(GenericType {
                        span: name.span + end,
                        id: self.next_id(),
                        base: name,
                        arguments,
                    }))
                } else {
                    Ok(TypeExpression::Named(NamedType { span: name.span, id: self.next_id(), name }))
                }
            }
            token => Err(ParserError::malformed_type(token, self.token.span)),
        }
    }

    /// Parses a record type `{f: T, g: U | R}`.
    fn parse_record_type(&mut self) -> Result<TypeExpression> {
        let start = self.expect(&Token::LeftCurly)?;
        let mut fields = Vec::new();
        let mut rest = None;

        while !self.check(&Token::RightCurly) {
            if self.eat(&Token::Pipe) {
                rest = Some(self.expect_identifier()?);
                break;
            }
            let identifier = self.expect_identifier()?;
            self.expect(&Token::Colon)?;
            let type_ = self.parse_type()?;
            fields.push(RecordTypeField {
                span: identifier.span + type_.span(),
                id: self.next_id(),
                identifier,
                type_,
            });
            if !self.eat(&Token::Comma) {
                if self.eat(&Token::Pipe) {
                    rest = Some(self.expect_identifier()?);
                }
                break;
            }
        }

        let end = self.expect(&Token::RightCurly)?;
        Ok(TypeExpression::Record(RecordType {
            span: start + end,
            id: self.next_id(),
            fields,
            rest,
        }))
    }

    /// Parses a function type `fn[Gp](T...) -> U / E`.
    fn parse_function_type(&mut self) -> Result<TypeExpression> {
        let start = self.expect(&Token::Fn)?;
        let generics = if self.check(&Token::LeftSquare) { self.parse_generic_params()? } else { Vec::new() };
        let (parameters, _, mut end) = self.parse_paren_comma_list(|p| p.parse_type().map(Some))?;

        let output = if self.eat(&Token::Arrow) {
            let type_ = self.parse_type()?;
            end = type_.span();
            Some(Box::new(type_))
        } else {
            None
        };

        let effects = if self.eat(&Token::Div) {
            let row = self.parse_effect_row()?;
            end = row.span;
            Some(row)
        } else {
            None
        };

        Ok(TypeExpression::Function(FunctionType {
            span: start + end,
            id: self.next_id(),
            generics,
            parameters,
            output,
            effects,
        }))
    }

    /// Parses an effect row `{E1, E2 | R}`.
    pub(super) fn parse_effect_row(&mut self) -> Result<EffectRow> {
        let start = self.expect(&Token::LeftCurly)?;
        let mut effects = Vec::new();
        let mut rest = None;

        while !self.check(&Token::RightCurly) {
            if self.eat(&Token::Pipe) {
                rest = Some(self.expect_identifier()?);
                break;
            }
            effects.push(self.expect_identifier()?);
            if !self.eat(&Token::Comma) {
                if self.eat(&Token::Pipe) {
                    rest = Some(self.expect_identifier()?);
                }
                break;
            }
        }

        let end = self.expect(&Token::RightCurly)?;
        Ok(EffectRow { effects, rest, span: start + end, id: self.next_id() })
    }

    /// Parses one generic argument: a type, or a const expression for
    /// parameters declared `const`.
    pub(super) fn parse_type_argument(&mut self) -> Result<TypeArgument> {
        match &self.token.token {
            Token::Int(_) | Token::Float(_) | Token::StringLit(_) | Token::True | Token::False | Token::Minus => {
                Ok(TypeArgument::Const(self.parse_expression()?))
            }
            _ => Ok(TypeArgument::Type(self.parse_type()?)),
        }
    }

    /// Parses a single trait bound `Tr` or `Tr[Args]`.
    pub(super) fn parse_trait_bound(&mut self) -> Result<TraitBound> {
        let name = self.expect_identifier()?;
        let (arguments, end) = if self.check(&Token::LeftSquare) {
            let (arguments, _, end) = self.parse_bracket_comma_list(|p| p.parse_type_argument().map(Some))?;
            (arguments, end)
        } else {
            (Vec::new(), name.span)
        };
        Ok(TraitBound { span: name.span + end, id: self.next_id(), name, arguments })
    }

    /// Parses `B1 + B2 + ...` trait bounds.
    pub(super) fn parse_trait_bounds(&mut self) -> Result<Vec<TraitBound>> {
        let mut bounds = vec![self.parse_trait_bound()?];
        while self.eat(&Token::Add) {
            bounds.push(self.parse_trait_bound()?);
        }
        Ok(bounds)
    }

    /// Parses a bracketed generic parameter list `[T: B, const N: int]`.
    pub(super) fn parse_generic_params(&mut self) -> Result<Vec<GenericParam>> {
        let (params, _, _) = self.parse_bracket_comma_list(|p| {
            if p.eat(&Token::Const) {
                let const_span = p.prev_token.span;
                let identifier = p.expect_identifier()?;
                p.expect(&Token::Colon)?;
                let type_ = p.parse_type()?;
                return Ok(Some(GenericParam {
                    span: const_span + type_.span(),
                    id: p.next_id(),
                    identifier,
                    kind: GenericParamKind::Const { type_ },
                }));
            }

            let identifier = p.expect_identifier()?;
            let bounds = if p.eat(&Token::Colon) { p.parse_trait_bounds()? } else { Vec::new() };
            let span = identifier.span + bounds.last().map(|b| b.span).unwrap_or(identifier.span);
            Ok(Some(GenericParam {
                span,
                id: p.next_id(),
                identifier,
                kind: GenericParamKind::Type { bounds },
            }))
        })?;
        Ok(params)
    }
}
