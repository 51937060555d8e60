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

//! The abstract syntax tree (AST) for the Vesper programming language.
//!
//! The AST is a closed family of tagged variants: declarations,
//! statements, expressions, type expressions, and patterns. Every node
//! carries a [`Span`](vesper_span::Span) covering all of its descendants
//! and a [`NodeID`] identifying the node occurrence.

pub mod ast;
pub use ast::*;

pub mod common;
pub use common::*;

pub mod declaration;
pub use declaration::*;

pub mod expression;
pub use expression::*;

pub mod passes;
pub use passes::*;

pub mod pattern;
pub use pattern::*;

pub mod program;
pub use program::*;

pub mod statement;
pub use statement::*;

pub mod types;
pub use types::*;
