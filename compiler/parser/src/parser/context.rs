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

use crate::tokenizer::{SpannedToken, Token};

use vesper_ast::{Identifier, NodeBuilder, NodeID};
use vesper_errors::{emitter::Handler, Diagnostic, ParserError, Result};
use vesper_span::{Span, Symbol};

use std::fmt::Display;
use std::mem;

/// Stores a program in tokenized format plus additional context.
/// May be converted into a [`File`](vesper_ast::File) AST by parsing all tokens.
pub struct ParserContext<'a> {
    /// Handler used to side-channel emit errors from the parser.
    pub(crate) handler: &'a Handler,
    /// Counter handing out node IDs as nodes are constructed.
    pub(crate) node_builder: &'a NodeBuilder,
    /// All un-bumped tokens, in reverse order so `.pop()` is cheap.
    tokens: Vec<SpannedToken>,
    /// The current token.
    pub(crate) token: SpannedToken,
    /// The previous token.
    pub(crate) prev_token: SpannedToken,
    /// True when parsing the scrutinee of `if`, `while`, `for`, or
    /// `match` -- struct literals are not legal there, so that the
    /// opening `{` of the body is not consumed as a literal.
    pub(crate) disallow_struct_construction: bool,
}

impl<'a> ParserContext<'a> {
    /// Returns a new [`ParserContext`] type given a vector of tokens.
    pub fn new(handler: &'a Handler, node_builder: &'a NodeBuilder, mut tokens: Vec<SpannedToken>) -> Self {
        // Strip out any trivia the tokenizer may have kept.
        tokens.retain(|x| !x.token.is_trivia());
        // For performance we reverse so that we get cheap `.pop()`s.
        tokens.reverse();

        let token = SpannedToken::dummy();
        let mut p = Self {
            handler,
            node_builder,
            disallow_struct_construction: false,
            prev_token: token.clone(),
            token,
            tokens,
        };
        p.bump();
        p
    }

    /// Returns a fresh node ID.
    pub(crate) fn next_id(&self) -> NodeID {
        self.node_builder.next_id()
    }

    /// Advances the parser cursor by one token.
    pub fn bump(&mut self) {
        // Probably a bug (infinite loop), as the previous token was already EOF.
        if let Token::Eof = self.prev_token.token {
            panic!("attempted to bump the parser past EOF (may be stuck in a loop)");
        }

        // Extract next token, or `Eof` if there was none.
        let next_token = self.tokens.pop().unwrap_or_else(|| SpannedToken {
            token: Token::Eof,
            span: self.token.span,
        });

        // Set the new token.
        self.prev_token = mem::replace(&mut self.token, next_token);
    }

    /// Checks whether the current token is `tok`.
    pub fn check(&self, tok: &Token) -> bool {
        &self.token.token == tok
    }

    /// Removes the next token if it equals `token` and returns `true`.
    pub fn eat(&mut self, token: &Token) -> bool {
        self.check(token).then(|| self.bump()).is_some()
    }

    /// Look-ahead `dist` tokens of `self.token` and get access to that token there.
    /// When `dist == 0` then the current token is looked at.
    pub fn look_ahead<R>(&self, dist: usize, looker: impl FnOnce(&SpannedToken) -> R) -> R {
        if dist == 0 {
            return looker(&self.token);
        }

        let eof = SpannedToken { token: Token::Eof, span: Span::dummy() };

        let idx = match self.tokens.len().checked_sub(dist) {
            None => return looker(&eof),
            Some(idx) => idx,
        };

        looker(self.tokens.get(idx).unwrap_or(&eof))
    }

    /// Emit the error `err`.
    pub(crate) fn emit_err(&self, err: Diagnostic) {
        self.handler.emit_err(err);
    }

    /// Returns true if the next token exists.
    pub fn has_next(&self) -> bool {
        !matches!(self.token.token, Token::Eof)
    }

    /// At the previous token, return and make an identifier with `name`.
    fn mk_ident_prev(&self, name: Symbol) -> Identifier {
        Identifier { name, span: self.prev_token.span, id: self.next_id() }
    }

    /// Eats the next token if it is an identifier and returns it.
    pub fn eat_identifier(&mut self) -> Option<Identifier> {
        if let Token::Ident(name) = self.token.token {
            self.bump();
            return Some(self.mk_ident_prev(name));
        }
        None
    }

    /// Expects an [`Identifier`], or errors.
    pub fn expect_identifier(&mut self) -> Result<Identifier> {
        self.eat_identifier()
            .ok_or_else(|| ParserError::unexpected(&self.token.token, "an identifier", self.token.span))
    }

    /// Eats any of the given `tokens`, returning `true` if anything was eaten.
    pub fn eat_any(&mut self, tokens: &[Token]) -> bool {
        tokens.iter().any(|x| self.check(x)).then(|| self.bump()).is_some()
    }

    /// Returns an unexpected error at the current token.
    pub(crate) fn unexpected<T>(&self, expected: impl Display) -> Result<T> {
        Err(ParserError::unexpected(&self.token.token, expected, self.token.span))
    }

    /// Eats the expected `token`, or errors.
    pub fn expect(&mut self, token: &Token) -> Result<Span> {
        if self.eat(token) {
            Ok(self.prev_token.span)
        } else {
            self.unexpected(format!("'{token}'"))
        }
    }

    /// Eats one of the expected `tokens`, or errors.
    pub fn expect_any(&mut self, tokens: &[Token]) -> Result<Span> {
        if self.eat_any(tokens) {
            Ok(self.prev_token.span)
        } else {
            self.unexpected(tokens.iter().map(|x| format!("'{x}'")).collect::<Vec<_>>().join(", "))
        }
    }

    /// Parses a list of `T`s using `inner`.
    /// The opening and closing delimiters are `open` and `close`,
    /// and elements in the list are separated by `sep`.
    /// When `(list, true, _)` is returned, `sep` was a terminator.
    pub(crate) fn parse_list<T>(
        &mut self,
        open: Token,
        close: Token,
        sep: Token,
        mut inner: impl FnMut(&mut Self) -> Result<Option<T>>,
    ) -> Result<(Vec<T>, bool, Span)> {
        let mut list = Vec::new();
        let mut trailing = false;

        let open_span = self.expect(&open)?;

        while !self.check(&close) {
            if !self.has_next() {
                return Err(ParserError::unexpected_eof(self.token.span));
            }
            // Parse the element. We allow inner parser recovery through the `Option`.
            if let Some(elem) = inner(self)? {
                list.push(elem);
            }
            // Parse the separator.
            if !self.eat(&sep) {
                trailing = false;
                break;
            }

            trailing = true;
        }

        let span = open_span + self.expect(&close)?;

        Ok((list, trailing, span))
    }

    /// Parse a list separated by `,` and delimited by parens.
    pub(crate) fn parse_paren_comma_list<T>(
        &mut self,
        f: impl FnMut(&mut Self) -> Result<Option<T>>,
    ) -> Result<(Vec<T>, bool, Span)> {
        self.parse_list(Token::LeftParen, Token::RightParen, Token::Comma, f)
    }

    /// Parse a list separated by `,` and delimited by brackets.
    pub(crate) fn parse_bracket_comma_list<T>(
        &mut self,
        f: impl FnMut(&mut Self) -> Result<Option<T>>,
    ) -> Result<(Vec<T>, bool, Span)> {
        self.parse_list(Token::LeftSquare, Token::RightSquare, Token::Comma, f)
    }

    /// Parse a list separated by `,` and delimited by braces.
    pub(crate) fn parse_brace_comma_list<T>(
        &mut self,
        f: impl FnMut(&mut Self) -> Result<Option<T>>,
    ) -> Result<(Vec<T>, bool, Span)> {
        self.parse_list(Token::LeftCurly, Token::RightCurly, Token::Comma, f)
    }

    /// Advances past a syntax error inside a block: skips to the next
    /// statement boundary (`;`, consumed) or stops before `}` or EOF.
    pub(crate) fn synchronize_statement(&mut self) {
        loop {
            match &self.token.token {
                Token::Semicolon => {
                    self.bump();
                    return;
                }
                Token::RightCurly | Token::Eof => return,
                _ => self.bump(),
            }
        }
    }

    /// Advances past a syntax error at the top level: skips to the next
    /// declaration keyword or EOF, eating stray terminators on the way.
    pub(crate) fn synchronize_declaration(&mut self) {
        loop {
            match &self.token.token {
                Token::Eof => return,
                Token::Fn
                | Token::Struct
                | Token::Enum
                | Token::Trait
                | Token::Impl
                | Token::Type
                | Token::Const
                | Token::Use
                | Token::Mod
                | Token::Package
                | Token::Pub
                | Token::Unsafe => return,
                _ => self.bump(),
            }
        }
    }
}
