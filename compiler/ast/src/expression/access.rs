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

use crate::{simple_node_impl, Expression, Identifier, Node, NodeID};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A field access `inner.name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAccess {
    pub inner: Box<Expression>,
    pub name: Identifier,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(MemberAccess);

impl fmt::Display for MemberAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.inner, self.name)
    }
}

/// An index access `inner[i1, i2, ...]`.
///
/// Indexing is also how generic arguments appear in expression position
/// (`Pair[int]`); the checker disambiguates by the type of `inner`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAccess {
    pub inner: Box<Expression>,
    pub indices: Vec<Expression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(IndexAccess);

impl fmt::Display for IndexAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[", self.inner)?;
        for (i, index) in self.indices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{index}")?;
        }
        write!(f, "]")
    }
}

/// A path access `inner::name`, e.g. `Color::Red` or `Channel::new`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticAccess {
    pub inner: Box<Expression>,
    pub name: Identifier,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(StaticAccess);

impl fmt::Display for StaticAccess {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::{}", self.inner, self.name)
    }
}

/// An access expression: field, index, or path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessExpression {
    /// A field access, e.g. `p.first`.
    Member(MemberAccess),
    /// An index access, e.g. `xs[0]`.
    Index(IndexAccess),
    /// A path access, e.g. `Color::Red`.
    Static(StaticAccess),
}

impl Node for AccessExpression {
    fn span(&self) -> Span {
        match self {
            Self::Member(n) => n.span(),
            Self::Index(n) => n.span(),
            Self::Static(n) => n.span(),
        }
    }

    fn set_span(&mut self, span: Span) {
        match self {
            Self::Member(n) => n.set_span(span),
            Self::Index(n) => n.set_span(span),
            Self::Static(n) => n.set_span(span),
        }
    }

    fn id(&self) -> NodeID {
        match self {
            Self::Member(n) => n.id(),
            Self::Index(n) => n.id(),
            Self::Static(n) => n.id(),
        }
    }

    fn set_id(&mut self, id: NodeID) {
        match self {
            Self::Member(n) => n.set_id(id),
            Self::Index(n) => n.set_id(id),
            Self::Static(n) => n.set_id(id),
        }
    }
}

impl fmt::Display for AccessExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Member(n) => n.fmt(f),
            Self::Index(n) => n.fmt(f),
            Self::Static(n) => n.fmt(f),
        }
    }
}
