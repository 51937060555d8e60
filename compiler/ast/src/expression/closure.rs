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

use crate::{simple_node_impl, Block, Node, NodeID, Param, TypeExpression};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A function literal `fn(x: int) -> int { x + 1 }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionLiteral {
    pub parameters: Vec<Param>,
    pub output: Option<TypeExpression>,
    pub body: Block,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(FunctionLiteral);

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{parameter}")?;
        }
        write!(f, ")")?;
        if let Some(output) = &self.output {
            write!(f, " -> {output}")?;
        }
        write!(f, " {}", self.body)
    }
}
