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

use crate::{simple_node_impl, GenericParam, Identifier, Node, NodeID, TraitBound, TypeExpression};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A universally quantified type `forall[T: B] U`.
/// The body may reference only the declared parameters plus outer scope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForallType {
    pub params: Vec<GenericParam>,
    pub body: Box<TypeExpression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ForallType);

impl fmt::Display for ForallType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "forall[")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, "] {}", self.body)
    }
}

/// An existentially quantified type `exists T: B. U`.
///
/// `dyn Tr` is sugar for `exists T: Tr. T`; the parser records the sugared
/// form in `sugared` so downstream consumers can still distinguish them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistentialType {
    pub param: Identifier,
    pub bounds: Vec<TraitBound>,
    pub body: Box<TypeExpression>,
    /// True iff the source wrote `dyn Tr`.
    pub sugared: bool,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ExistentialType);

impl fmt::Display for ExistentialType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sugared {
            if let Some(bound) = self.bounds.first() {
                return write!(f, "dyn {bound}");
            }
        }
        write!(f, "exists {}", self.param)?;
        for (i, bound) in self.bounds.iter().enumerate() {
            write!(f, "{}{bound}", if i == 0 { ": " } else { " + " })?;
        }
        write!(f, ". {}", self.body)
    }
}
