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

//! The parser to convert Vesper source text into a [`File`] AST.
//!
//! This module contains the [`parse()`] method which calls the underlying
//! [`tokenize()`](crate::tokenize) method to create a new file AST.

use crate::tokenizer::*;

use vesper_ast::{File, NodeBuilder};
use vesper_errors::{emitter::Handler, Result};

mod context;
pub use context::*;

pub mod expression;
pub mod file;
pub mod pattern;
pub mod statement;
pub mod type_;

/// Creates a new file AST from the given source code text.
///
/// The parser is total: it returns a `File` for every input, possibly
/// with diagnostics recorded in the handler.
pub fn parse(handler: &Handler, node_builder: &NodeBuilder, source: &str) -> Result<File> {
    tracing::debug!("parsing {} bytes of source", source.len());

    let tokens = crate::tokenize(handler, source, false);
    let mut context = ParserContext::new(handler, node_builder, tokens);

    context.parse_file()
}
