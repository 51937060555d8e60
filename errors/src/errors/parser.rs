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
    /// Constructors for syntactic diagnostics.
    ParserError,
    stage: Stage::Parser,
    severity: Severity::Error,

    /// For when the parser encountered an unexpected token.
    unexpected {
        args: (found: impl Display, expected: impl Display),
        code: ParseUnexpectedToken,
        msg: format!("expected {expected} -- found `{found}`"),
        help: None,
    }

    /// For when the parser encountered the end of the file mid-construct.
    unexpected_eof {
        args: (),
        code: ParseUnexpectedToken,
        msg: "unexpected end of file".to_string(),
        help: None,
    }

    /// For when a statement is missing its terminating semicolon.
    missing_terminator {
        args: (found: impl Display),
        code: ParseMissingTerminator,
        msg: format!("expected `;` after statement -- found `{found}`"),
        help: None,
    }

    /// For when a pattern is malformed beyond a simple unexpected token.
    malformed_pattern {
        args: (found: impl Display),
        code: ParseMalformedPattern,
        msg: format!("expected a pattern -- found `{found}`"),
        help: None,
    }

    /// For when `..` appears more than once in one pattern.
    rest_pattern_repeated {
        args: (),
        code: ParseMalformedPattern,
        msg: "`..` can appear at most once per pattern".to_string(),
        help: None,
    }

    /// For when a type expression is malformed beyond a simple unexpected token.
    malformed_type {
        args: (found: impl Display),
        code: ParseMalformedType,
        msg: format!("expected a type -- found `{found}`"),
        help: None,
    }
);
