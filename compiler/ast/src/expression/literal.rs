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

use crate::{simple_node_impl, Node, NodeID};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The payload of a literal expression.
///
/// Numeric literals keep their decoded source text (digit separators
/// stripped); converting them to machine values is the emitter's concern.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralVariant {
    /// An integer literal, e.g. `42`, `0xff`, or `0b1010`.
    Integer(String),
    /// A float literal, e.g. `1.5` or `2e10`.
    Float(String),
    /// A boolean literal.
    Boolean(bool),
    /// A string literal, escape-processed.
    String(String),
    /// The `null` literal.
    Null,
}

/// A literal expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    pub variant: LiteralVariant,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(Literal);

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.variant {
            LiteralVariant::Integer(value) => write!(f, "{value}"),
            LiteralVariant::Float(value) => write!(f, "{value}"),
            LiteralVariant::Boolean(value) => write!(f, "{value}"),
            LiteralVariant::String(value) => write!(f, "\"{value}\""),
            LiteralVariant::Null => write!(f, "null"),
        }
    }
}
