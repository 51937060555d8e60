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

use vesper_span::Span;

use backtrace::Backtrace;
use derivative::Derivative;
use std::fmt;
use std::sync::Arc;

/// The front-end stage a diagnostic originated from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Lexer,
    Parser,
    TypeChecker,
    Compiler,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexer => write!(f, "lexer"),
            Self::Parser => write!(f, "parser"),
            Self::TypeChecker => write!(f, "type checker"),
            Self::Compiler => write!(f, "compiler"),
        }
    }
}

/// How severe a diagnostic is.
/// A `Warning` never masks a successful compile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Stable identifiers for every diagnostic the front-end can produce.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    LexerIllegalRune,
    LexerUnterminatedString,
    LexerStringNewline,
    LexerUnterminatedBlockComment,
    ParseUnexpectedToken,
    ParseMissingTerminator,
    ParseMalformedPattern,
    ParseMalformedType,
    TypeUndefinedIdentifier,
    TypeMismatch,
    TypeCannotAssign,
    TypeInvalidOperation,
    TypeMissingField,
    TypeUnknownField,
    TypeInvalidGenericArgs,
    TypeConstraintNotSatisfied,
    TypeMissingAssociatedType,
    TypeUnknownAssociatedType,
    TypeBorrowConflict,
    TypeUnsafeRequired,
    TypeInvalidPattern,
    TypeNonExhaustiveMatch,
    UnreachableCode,
    CompilerFileRead,
}

impl DiagnosticCode {
    /// The stable textual identifier of this code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LexerIllegalRune => "LEXER_ILLEGAL_RUNE",
            Self::LexerUnterminatedString => "LEXER_UNTERMINATED_STRING",
            Self::LexerStringNewline => "LEXER_STRING_NEWLINE",
            Self::LexerUnterminatedBlockComment => "LEXER_UNTERMINATED_BLOCK_COMMENT",
            Self::ParseUnexpectedToken => "PARSE_UNEXPECTED_TOKEN",
            Self::ParseMissingTerminator => "PARSE_MISSING_TERMINATOR",
            Self::ParseMalformedPattern => "PARSE_MALFORMED_PATTERN",
            Self::ParseMalformedType => "PARSE_MALFORMED_TYPE",
            Self::TypeUndefinedIdentifier => "TYPE_UNDEFINED_IDENTIFIER",
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::TypeCannotAssign => "TYPE_CANNOT_ASSIGN",
            Self::TypeInvalidOperation => "TYPE_INVALID_OPERATION",
            Self::TypeMissingField => "TYPE_MISSING_FIELD",
            Self::TypeUnknownField => "TYPE_UNKNOWN_FIELD",
            Self::TypeInvalidGenericArgs => "TYPE_INVALID_GENERIC_ARGS",
            Self::TypeConstraintNotSatisfied => "TYPE_CONSTRAINT_NOT_SATISFIED",
            Self::TypeMissingAssociatedType => "TYPE_MISSING_ASSOCIATED_TYPE",
            Self::TypeUnknownAssociatedType => "TYPE_UNKNOWN_ASSOCIATED_TYPE",
            Self::TypeBorrowConflict => "TYPE_BORROW_CONFLICT",
            Self::TypeUnsafeRequired => "TYPE_UNSAFE_REQUIRED",
            Self::TypeInvalidPattern => "TYPE_INVALID_PATTERN",
            Self::TypeNonExhaustiveMatch => "TYPE_NON_EXHAUSTIVE_MATCH",
            Self::UnreachableCode => "UNREACHABLE_CODE",
            Self::CompilerFileRead => "COMPILER_FILE_READ",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The underline style of a labeled span.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LabelStyle {
    /// Underlined with `^`, label rendered inline.
    Primary,
    /// Underlined with `~`, label rendered at the end of the line.
    Secondary,
}

/// A span with an attached message and underline style.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub style: LabelStyle,
}

/// One link in the reasoning chain that led to a diagnostic,
/// e.g. "because `T` must satisfy `Display`".
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProofStep {
    pub message: String,
    pub span: Option<Span>,
}

/// A single front-end diagnostic.
///
/// Diagnostics are values, never exceptions: they are constructed by the
/// per-stage constructor types and accumulated in the handler.
#[derive(Derivative)]
#[derivative(Clone, Debug, PartialEq, Hash)]
pub struct Diagnostic {
    /// The stage that discovered the problem.
    pub stage: Stage,
    /// Error or warning.
    pub severity: Severity,
    /// The stable code identifying the diagnostic kind.
    pub code: DiagnosticCode,
    /// The headline message.
    pub message: String,
    /// The primary span the diagnostic points at.
    pub span: Span,
    /// Additional labeled spans, primary or secondary.
    pub labels: Vec<Label>,
    /// Free-form notes rendered after the source block.
    pub notes: Vec<String>,
    /// At most one `help:` line.
    pub help: Option<String>,
    /// The reasoning chain, rendered as `because ...` lines.
    pub proof: Vec<ProofStep>,
    /// Related spans without labels.
    pub related: Vec<Span>,
    /// Captured at construction; rendered only on request.
    #[derivative(Debug = "ignore", PartialEq = "ignore", Hash = "ignore")]
    pub backtrace: Arc<Backtrace>,
}

impl Eq for Diagnostic {}

impl Diagnostic {
    pub fn new(stage: Stage, severity: Severity, code: DiagnosticCode, message: String, span: Span) -> Self {
        Self {
            stage,
            severity,
            code,
            message,
            span,
            labels: Vec::new(),
            notes: Vec::new(),
            help: None,
            proof: Vec::new(),
            related: Vec::new(),
            backtrace: Arc::new(Backtrace::new()),
        }
    }

    /// Attaches an inline label to the primary span.
    pub fn with_primary_label(mut self, message: impl Into<String>) -> Self {
        self.labels.push(Label { span: self.span, message: message.into(), style: LabelStyle::Primary });
        self
    }

    /// Attaches a secondary labeled span.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label { span, message: message.into(), style: LabelStyle::Secondary });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub(crate) fn with_help_option(mut self, help: Option<String>) -> Self {
        self.help = help;
        self
    }

    pub fn with_proof_step(mut self, message: impl Into<String>, span: Option<Span>) -> Self {
        self.proof.push(ProofStep { message: message.into(), span });
        self
    }

    pub fn with_related(mut self, span: Span) -> Self {
        self.related.push(span);
        self
    }

    /// True iff this diagnostic fails a compile.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

impl std::error::Error for Diagnostic {}
