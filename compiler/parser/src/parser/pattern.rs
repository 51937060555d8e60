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
    /// Returns a [`Pattern`] AST node if the next tokens represent a
    /// pattern. Or-patterns bind loosest: `a | b | c`.
    pub(crate) fn parse_pattern(&mut self) -> Result<Pattern> {
        let first = self.parse_pattern_primary()?;

        if !self.check(&Token::Pipe) {
            return Ok(first);
        }

        let mut alternatives = vec![first];
        while self.eat(&Token::Pipe) {
            alternatives.push(self.parse_pattern_primary()?);
        }
        let span = alternatives.first().unwrap().span() + alternatives.last().unwrap().span();
        Ok(Pattern::Or(OrPattern { alternatives, span, id: self.next_id() }))
    }

    fn parse_pattern_primary(&mut self) -> Result<Pattern> {
        match &self.token.token {
            Token::Underscore => {
                let span = self.expect(&Token::Underscore)?;
                Ok(Pattern::Wildcard(WildcardPattern { span, id: self.next_id() }))
            }
            Token::DotDot => {
                let span = self.expect(&Token::DotDot)?;
                Ok(Pattern::Rest(RestPattern { span, id: self.next_id() }))
            }
            Token::Mut => {
                self.expect(&Token::Mut)?;
                let mut_span = self.prev_token.span;
                let identifier = self.expect_identifier()?;
                Ok(Pattern::Identifier(IdentifierPattern {
                    span: mut_span + identifier.span,
                    id: self.next_id(),
                    mutable: true,
                    identifier,
                }))
            }
            Token::Amp => {
                let start = self.expect(&Token::Amp)?;
                let mutable = self.eat(&Token::Mut);
                let inner = self.parse_pattern_primary()?;
                Ok(Pattern::Reference(ReferencePattern {
                    span: start + inner.span(),
                    id: self.next_id(),
                    mutable,
                    inner: Box::new(inner),
                }))
            }
            Token::LeftParen => {
                let (mut elements, trailing, span) =
                    self.parse_paren_comma_list(|p| p.parse_pattern().map(Some))?;
                self.check_single_rest(&elements);
                if !trailing && elements.len() == 1 && !matches!(elements[0], Pattern::Rest(_)) {
                    let inner = elements.swap_remove(0);
                    Ok(Pattern::Paren(ParenPattern { span, id: self.next_id(), inner: Box::new(inner) }))
                } else {
                    Ok(Pattern::Tuple(TuplePattern { elements, span, id: self.next_id() }))
                }
            }
            Token::LeftSquare => {
                let (elements, _, span) = self.parse_bracket_comma_list(|p| p.parse_pattern().map(Some))?;
                self.check_single_rest(&elements);
                Ok(Pattern::Slice(SlicePattern { elements, span, id: self.next_id() }))
            }
            Token::Minus | Token::Int(_) | Token::Float(_) | Token::StringLit(_) | Token::True | Token::False
            | Token::Null => {
                let start = self.parse_literal_for_pattern()?;
                if self.check(&Token::DotDot) || self.check(&Token::DotDotEq) {
                    let inclusive = self.check(&Token::DotDotEq);
                    self.bump();
                    let stop = self.parse_literal_for_pattern()?;
                    return Ok(Pattern::Range(RangePattern {
                        span: start.span + stop.span,
                        id: self.next_id(),
                        start,
                        stop,
                        inclusive,
                    }));
                }
                Ok(Pattern::Literal(LiteralPattern { span: start.span, id: self.next_id(), literal: start }))
            }
            Token::Ident(_) => {
                let name = self.expect_identifier()?;

                if self.eat(&Token::DoubleColon) {
                    let variant = self.expect_identifier()?;
                    let (elements, end) = if self.check(&Token::LeftParen) {
                        let (elements, _, end) = self.parse_paren_comma_list(|p| p.parse_pattern().map(Some))?;
                        (Some(elements), end)
                    } else {
                        (None, variant.span)
                    };
                    return Ok(Pattern::Variant(VariantPattern {
                        span: name.span + end,
                        id: self.next_id(),
                        enum_: name,
                        variant,
                        elements,
                    }));
                }

                if self.check(&Token::LeftParen) {
                    let (elements, _, end) = self.parse_paren_comma_list(|p| p.parse_pattern().map(Some))?;
                    self.check_single_rest(&elements);
                    return Ok(Pattern::TupleStruct(TupleStructPattern {
                        span: name.span + end,
                        id: self.next_id(),
                        name,
                        elements,
                    }));
                }

                if self.check(&Token::LeftCurly) {
                    return self.parse_struct_pattern(name);
                }

                Ok(Pattern::Identifier(IdentifierPattern {
                    span: name.span,
                    id: self.next_id(),
                    mutable: false,
                    identifier: name,
                }))
            }
            token => Err(ParserError::malformed_pattern(token, self.token.span)),
        }
    }

    /// Parses a struct pattern body `{ f1, f2: p, .. }` after the name.
    fn parse_struct_pattern(&mut self, name: Identifier) -> Result<Pattern> {
        let start = self.expect(&Token::LeftCurly)?;
        let mut fields = Vec::new();
        let mut rest = false;

        while !self.check(&Token::RightCurly) {
            if self.eat(&Token::DotDot) {
                if rest {
                    self.emit_err(ParserError::rest_pattern_repeated(self.prev_token.span));
                }
                rest = true;
                // `..` must be last; a stray comma after it is tolerated.
                self.eat(&Token::Comma);
                continue;
            }
            let identifier = self.expect_identifier()?;
            let pattern = if self.eat(&Token::Colon) { Some(self.parse_pattern()?) } else { None };
            fields.push(FieldPattern {
                span: identifier.span + pattern.as_ref().map(|p| p.span()).unwrap_or(identifier.span),
                id: self.next_id(),
                identifier,
                pattern,
            });
            if !self.eat(&Token::Comma) {
                break;
            }
        }

        let end = self.expect(&Token::RightCurly)?;
        Ok(Pattern::Struct(StructPattern {
            span: name.span + start + end,
            id: self.next_id(),
            name,
            fields,
            rest,
        }))
    }

    /// A literal in pattern position, with an optional leading `-`.
    fn parse_literal_for_pattern(&mut self) -> Result<Literal> {
        let negative = self.eat(&Token::Minus);
        let minus_span = self.prev_token.span;

        let SpannedToken { token, span } = self.token.clone();
        let variant = match token {
            Token::Int(raw) => LiteralVariant::Integer(format!("{}{}", if negative { "-" } else { "" }, raw.replace('_', ""))),
            Token::Float(raw) => LiteralVariant::Float(format!("{}{}", if negative { "-" } else { "" }, raw.replace('_', ""))),
            Token::StringLit(value) if !negative => LiteralVariant::String(value),
            Token::True if !negative => LiteralVariant::Boolean(true),
            Token::False if !negative => LiteralVariant::Boolean(false),
            Token::Null if !negative => LiteralVariant::Null,
            token => return Err(ParserError::malformed_pattern(token, span)),
        };
        self.bump();

        let span = if negative { minus_span + span } else { span };
        Ok(Literal { variant, span, id: self.next_id() })
    }

    /// A `..` rest marker is legal at most once per sequence pattern.
    fn check_single_rest(&self, elements: &[Pattern]) {
        let mut seen = false;
        for element in elements {
            if let Pattern::Rest(rest) = element {
                if seen {
                    self.emit_err(ParserError::rest_pattern_repeated(rest.span));
                }
                seen = true;
            }
        }
    }
}
