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

//! The tokenizer and parser of the Vesper programming language.
//!
//! The [`tokenize()`] method turns source text into spanned tokens,
//! optionally preserving trivia; the [`parse()`] method consumes the
//! token stream and builds a [`File`](vesper_ast::File) AST, recovering
//! from syntax errors at statement and declaration boundaries.

#![forbid(unsafe_code)]

pub mod tokenizer;
pub use tokenizer::*;

pub mod parser;
pub use parser::*;

#[cfg(test)]
mod test;
