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

use crate::{simple_node_impl, Block, CallExpression, Expression, FunctionLiteral, Node, NodeID};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The payload of a spawn statement; exactly one form is present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnBody {
    /// `spawn f(args);`
    Call(CallExpression),
    /// `spawn { ... };`
    Block(Block),
    /// `spawn fn(params) { ... }(args);`
    Closure {
        function: FunctionLiteral,
        arguments: Vec<Expression>,
    },
}

/// A spawn statement, introducing a new logical task whose body is
/// type-checked in the parent's environment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnStatement {
    pub body: SpawnBody,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(SpawnStatement);

impl fmt::Display for SpawnStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.body {
            SpawnBody::Call(call) => write!(f, "spawn {call};"),
            SpawnBody::Block(block) => write!(f, "spawn {block};"),
            SpawnBody::Closure { function, arguments } => {
                write!(f, "spawn {function}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ");")
            }
        }
    }
}
