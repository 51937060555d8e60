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

//! Diagnostics for the Vesper front-end.
//!
//! All front-end failures are *accumulated* as [`Diagnostic`] values through
//! the [`emitter::Handler`]; nothing in the front-end panics on user input.
//! Each stage constructs its diagnostics through the constructor types
//! generated by [`create_messages!`]: [`LexerError`], [`ParserError`],
//! [`TypeCheckerError`], [`TypeCheckerWarning`], and [`CompilerError`].

#[macro_use]
mod macros;

pub mod diagnostic;
pub use diagnostic::*;

pub mod emitter;

pub mod formatter;
pub use formatter::render_diagnostic;

pub mod errors;
pub use errors::*;

pub use vesper_span::Span;

use thiserror::Error;

/// The top-level error type of the front-end.
#[derive(Debug, Error)]
pub enum VesperError {
    /// A diagnostic produced against some source text.
    #[error("{0}")]
    Diagnostic(#[from] Diagnostic),
    /// A source file could not be read at entry.
    #[error("failed to read file '{path}': {error}")]
    FileRead {
        path: std::path::PathBuf,
        error: std::io::Error,
    },
}

/// A `Result` alias where the `Err` case is a front-end [`Diagnostic`].
pub type Result<T, E = Diagnostic> = core::result::Result<T, E>;
