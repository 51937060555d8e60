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

use crate::{simple_node_impl, Expression, Identifier, Node, NodeID, TypeExpression};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A binding statement `let x = e;`, `let mut x: T = e;`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetStatement {
    /// Whether the binding may be reassigned and mutably borrowed.
    pub mutable: bool,
    pub identifier: Identifier,
    /// The declared type, if annotated.
    pub type_: Option<TypeExpression>,
    pub value: Expression,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(LetStatement);

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "let {}{}", if self.mutable { "mut " } else { "" }, self.identifier)?;
        if let Some(type_) = &self.type_ {
            write!(f, ": {type_}")?;
        }
        write!(f, " = {};", self.value)
    }
}
