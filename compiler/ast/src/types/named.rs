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

use crate::{simple_node_impl, Identifier, Node, NodeID, TypeArgument, TypeExpression};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A plain named type, primitive or user-declared: `int`, `Color`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: Identifier,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(NamedType);

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A generic application `Base[Args...]`, e.g. `Pair[int]` or `Buf[T; N]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericType {
    pub base: Identifier,
    pub arguments: Vec<TypeArgument>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(GenericType);

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[", self.base)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{argument}")?;
        }
        write!(f, "]")
    }
}

/// An associated-type projection `T::Assoc`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionType {
    /// The type being projected out of.
    pub base: Box<TypeExpression>,
    /// The associated type's name.
    pub associated: Identifier,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ProjectionType);

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::{}", self.base, self.associated)
    }
}
