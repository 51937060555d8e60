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

/// An expression of type "error".
/// The parser emits these where it recovered; they type as the error
/// sentinel, which unifies with anything to suppress cascades.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrExpression {
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ErrExpression);

impl fmt::Display for ErrExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<err>")
    }
}
