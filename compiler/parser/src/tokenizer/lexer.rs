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

use crate::tokenizer::Token;
use vesper_errors::{emitter::Handler, LexerError};
use vesper_span::{Span, Symbol};

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

lazy_static! {
    /// The reserved-word table, matched by exact string equality.
    static ref KEYWORDS: HashMap<&'static str, Token> = {
        let mut map = HashMap::new();
        map.insert("let", Token::Let);
        map.insert("mut", Token::Mut);
        map.insert("const", Token::Const);
        map.insert("fn", Token::Fn);
        map.insert("struct", Token::Struct);
        map.insert("enum", Token::Enum);
        map.insert("trait", Token::Trait);
        map.insert("impl", Token::Impl);
        map.insert("type", Token::Type);
        map.insert("package", Token::Package);
        map.insert("use", Token::Use);
        map.insert("as", Token::As);
        map.insert("if", Token::If);
        map.insert("else", Token::Else);
        map.insert("match", Token::Match);
        map.insert("while", Token::While);
        map.insert("for", Token::For);
        map.insert("in", Token::In);
        map.insert("break", Token::Break);
        map.insert("continue", Token::Continue);
        map.insert("return", Token::Return);
        map.insert("true", Token::True);
        map.insert("false", Token::False);
        map.insert("null", Token::Null);
        map.insert("spawn", Token::Spawn);
        map.insert("chan", Token::Chan);
        map.insert("select", Token::Select);
        map.insert("case", Token::Case);
        map.insert("where", Token::Where);
        map.insert("unsafe", Token::Unsafe);
        map.insert("pub", Token::Pub);
        map.insert("mod", Token::Mod);
        map.insert("dyn", Token::Dyn);
        map.insert("forall", Token::Forall);
        map.insert("exists", Token::Exists);
        map
    };
}

/// A token paired with the source span it was scanned from.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl SpannedToken {
    /// Returns a dummy token at a dummy span.
    pub const fn dummy() -> Self {
        Self { token: Token::Question, span: Span::dummy() }
    }
}

impl fmt::Display for SpannedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' @ {}", self.token, self.span)
    }
}

impl fmt::Debug for SpannedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        <SpannedToken as fmt::Display>::fmt(self, f)
    }
}

/// A saved lexer position, marking the start of a token.
#[derive(Copy, Clone)]
struct Cursor {
    line: u32,
    col: u32,
    pos: usize,
}

/// The positional lexer. Scans one token at a time, tracking the
/// line and column (in runes) and the byte offset of the cursor.
pub(crate) struct Lexer<'a> {
    src: &'a str,
    handler: &'a Handler,
    /// Byte offset of the next rune.
    pos: usize,
    /// 1-based line of the next rune.
    line: u32,
    /// 1-based column of the next rune, counted in runes.
    col: u32,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(handler: &'a Handler, src: &'a str) -> Self {
        Self { src, handler, pos: 0, line: 1, col: 1 }
    }

    /// The rune at the cursor, unconsumed.
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// The `n`th rune after the cursor, 0-based.
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    /// Consumes one rune. Crossing an LF moves to the next line and
    /// resets the column; any other rune advances the column.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Consumes the next rune if it equals `expected`.
    fn bump_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn mark(&self) -> Cursor {
        Cursor { line: self.line, col: self.col, pos: self.pos }
    }

    fn span_from(&self, start: Cursor) -> Span {
        Span::new(start.line, start.col, start.pos as u32, self.pos as u32)
    }

    fn raw_from(&self, start: Cursor) -> String {
        self.src[start.pos..self.pos].to_string()
    }

    /// The zero-width span at the end of input, carried by `Eof`.
    pub(crate) fn eof_span(&self) -> Span {
        Span::new(self.line, self.col, self.pos as u32, self.pos as u32)
    }

    /// Scans the next token, or returns [`None`] at the end of input.
    /// Lexical errors are reported to the handler; scanning always
    /// continues until the input is exhausted.
    pub(crate) fn next_token(&mut self) -> Option<SpannedToken> {
        let start = self.mark();
        let c = self.peek()?;

        let token = match c {
            '\n' => {
                self.bump();
                Token::Newline("\n".into())
            }
            '\r' => {
                self.bump();
                // CRLF is one newline.
                self.bump_if('\n');
                Token::Newline(self.raw_from(start))
            }
            c if c.is_whitespace() => {
                while let Some(c) = self.peek() {
                    if !c.is_whitespace() || c == '\n' || c == '\r' {
                        break;
                    }
                    self.bump();
                }
                Token::Whitespace(self.raw_from(start))
            }
            '/' => {
                self.bump();
                if self.bump_if('/') {
                    self.eat_line_comment(start)
                } else if self.bump_if('*') {
                    self.eat_block_comment(start)
                } else {
                    Token::Div
                }
            }
            '"' => self.eat_string(start),
            c if c.is_ascii_digit() => self.eat_number(),
            c if c.is_alphabetic() || c == '_' => self.eat_identifier(start),

            '=' => self.two_cases('=', Token::Eq, '>', Token::FatArrow, Token::Assign),
            '-' => self.one_case('>', Token::Arrow, Token::Minus),
            '<' => self.two_cases('=', Token::LtEq, '-', Token::LeftArrow, Token::Lt),
            '>' => self.one_case('=', Token::GtEq, Token::Gt),
            '!' => self.one_case('=', Token::NotEq, Token::Not),
            '&' => self.one_case('&', Token::And, Token::Amp),
            '|' => self.one_case('|', Token::Or, Token::Pipe),
            ':' => self.one_case(':', Token::DoubleColon, Token::Colon),
            '.' => {
                self.bump();
                if self.bump_if('.') {
                    if self.bump_if('=') {
                        Token::DotDotEq
                    } else {
                        Token::DotDot
                    }
                } else {
                    Token::Dot
                }
            }
            '+' => self.single(Token::Add),
            '*' => self.single(Token::Mul),
            '%' => self.single(Token::Rem),
            '?' => self.single(Token::Question),
            ',' => self.single(Token::Comma),
            ';' => self.single(Token::Semicolon),
            '(' => self.single(Token::LeftParen),
            ')' => self.single(Token::RightParen),
            '[' => self.single(Token::LeftSquare),
            ']' => self.single(Token::RightSquare),
            '{' => self.single(Token::LeftCurly),
            '}' => self.single(Token::RightCurly),
            c => {
                self.bump();
                self.handler.emit_err(LexerError::illegal_rune(c, self.span_from(start)));
                Token::Illegal(c.to_string())
            }
        };

        Some(SpannedToken { token, span: self.span_from(start) })
    }

    /// Consumes a single-rune token.
    fn single(&mut self, token: Token) -> Token {
        self.bump();
        token
    }

    /// Consumes a rune followed by `on` with `then` if found, or `els` otherwise.
    fn one_case(&mut self, on: char, then: Token, els: Token) -> Token {
        self.bump();
        if self.bump_if(on) { then } else { els }
    }

    /// Consumes a rune followed by `on_1` or `on_2`, or neither.
    fn two_cases(&mut self, on_1: char, case_1: Token, on_2: char, case_2: Token, els: Token) -> Token {
        self.bump();
        if self.bump_if(on_1) {
            case_1
        } else if self.bump_if(on_2) {
            case_2
        } else {
            els
        }
    }

    /// Eats a `//` comment up to, and excluding, the end of the line.
    fn eat_line_comment(&mut self, start: Cursor) -> Token {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.bump();
        }
        Token::CommentLine(self.raw_from(start))
    }

    /// Eats a `/* ... */` comment. Block comments nest; the scan is
    /// iterative so arbitrarily many comments never grow the stack.
    fn eat_block_comment(&mut self, start: Cursor) -> Token {
        let mut depth = 1usize;
        loop {
            match self.bump() {
                None => {
                    self.handler.emit_err(LexerError::unterminated_block_comment(self.span_from(start)));
                    break;
                }
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Some('/') if self.peek() == Some('*') => {
                    self.bump();
                    depth += 1;
                }
                Some(_) => {}
            }
        }
        Token::CommentBlock(self.raw_from(start))
    }

    /// Eats a string literal, decoding escapes. A newline before the
    /// closing quote, or the end of input, is a recoverable error that
    /// produces an `Illegal` token ending at the offending position.
    fn eat_string(&mut self, start: Cursor) -> Token {
        self.bump(); // The opening quote.
        let mut value = String::new();

        loop {
            match self.peek() {
                None => {
                    self.handler.emit_err(LexerError::unterminated_string(self.span_from(start)));
                    return Token::Illegal(self.raw_from(start));
                }
                Some('\n') | Some('\r') => {
                    self.handler.emit_err(LexerError::string_newline(self.span_from(start)));
                    return Token::Illegal(self.raw_from(start));
                }
                Some('"') => {
                    self.bump();
                    return Token::StringLit(value);
                }
                Some('\\') => {
                    self.bump();
                    match self.peek() {
                        Some('n') => {
                            self.bump();
                            value.push('\n');
                        }
                        Some('t') => {
                            self.bump();
                            value.push('\t');
                        }
                        Some('r') => {
                            self.bump();
                            value.push('\r');
                        }
                        Some('\\') => {
                            self.bump();
                            value.push('\\');
                        }
                        Some('"') => {
                            self.bump();
                            value.push('"');
                        }
                        // An unknown escape is preserved verbatim.
                        Some(other) => {
                            self.bump();
                            value.push('\\');
                            value.push(other);
                        }
                        None => {}
                    }
                }
                Some(c) => {
                    self.bump();
                    value.push(c);
                }
            }
        }
    }

    /// Eats an integer or float literal. The raw text, digit separators
    /// included, is kept as the token payload.
    fn eat_number(&mut self) -> Token {
        let start = self.mark();

        if self.peek() == Some('0') && matches!(self.peek_nth(1), Some('x') | Some('X')) {
            self.bump();
            self.bump();
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit() || c == '_') {
                self.bump();
            }
            return Token::Int(self.raw_from(start));
        }

        if self.peek() == Some('0') && matches!(self.peek_nth(1), Some('b') | Some('B')) {
            self.bump();
            self.bump();
            while matches!(self.peek(), Some('0') | Some('1') | Some('_')) {
                self.bump();
            }
            return Token::Int(self.raw_from(start));
        }

        let mut is_float = false;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
            self.bump();
        }

        // A fraction only when a digit follows the dot; a lone `.` is
        // the dot token, not part of this literal.
        if self.peek() == Some('.') && matches!(self.peek_nth(1), Some(c) if c.is_ascii_digit()) {
            is_float = true;
            self.bump();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '_') {
                self.bump();
            }
        }

        // An exponent `[eE][+-]?digits`.
        if matches!(self.peek(), Some('e') | Some('E')) {
            let exponent_digit = match self.peek_nth(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+') | Some('-') => matches!(self.peek_nth(2), Some(c) if c.is_ascii_digit()),
                _ => false,
            };
            if exponent_digit {
                is_float = true;
                self.bump();
                if matches!(self.peek(), Some('+') | Some('-')) {
                    self.bump();
                }
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.bump();
                }
            }
        }

        let raw = self.raw_from(start);
        if is_float { Token::Float(raw) } else { Token::Int(raw) }
    }

    /// Eats an identifier or keyword: a Unicode letter or `_` followed
    /// by letters, ASCII digits, and underscores.
    fn eat_identifier(&mut self, start: Cursor) -> Token {
        while matches!(self.peek(), Some(c) if c.is_alphabetic() || c.is_ascii_digit() || c == '_') {
            self.bump();
        }

        let text = &self.src[start.pos..self.pos];
        if text == "_" {
            return Token::Underscore;
        }
        match KEYWORDS.get(text) {
            Some(token) => token.clone(),
            None => Token::Ident(Symbol::intern(text)),
        }
    }
}
