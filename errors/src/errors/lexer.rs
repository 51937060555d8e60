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

use crate::{Severity, Stage};

use std::fmt::Display;

create_messages!(
    /// Constructors for lexical diagnostics.
    LexerError,
    stage: Stage::Lexer,
    severity: Severity::Error,

    /// For when the lexer encountered a rune it has no rule for.
    illegal_rune {
        args: (rune: impl Display),
        code: LexerIllegalRune,
        msg: format!("illegal rune `{rune}` in source"),
        help: None,
    }

    /// For when a string literal reaches the end of the file unterminated.
    unterminated_string {
        args: (),
        code: LexerUnterminatedString,
        msg: "string literal is never terminated".to_string(),
        help: Some("add a closing `\"`".to_string()),
    }

    /// For when a newline appears inside a string literal.
    string_newline {
        args: (),
        code: LexerStringNewline,
        msg: "string literal contains an unescaped newline".to_string(),
        help: Some("close the string before the end of the line, or use `\\n`".to_string()),
    }

    /// For when a block comment reaches the end of the file unterminated.
    unterminated_block_comment {
        args: (),
        code: LexerUnterminatedBlockComment,
        msg: "block comment is never terminated".to_string(),
        help: Some("add a closing `*/`".to_string()),
    }
);
