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

use crate::{simple_node_impl, Expression, Node, NodeID, TypeExpression};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-size array type `[T; N]`, where `N` is a const expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayType {
    pub element: Box<TypeExpression>,
    pub size: Box<Expression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ArrayType);

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}; {}]", self.element, self.size)
    }
}

/// A slice type `[T]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceType {
    pub element: Box<TypeExpression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(SliceType);

impl fmt::Display for SliceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.element)
    }
}

/// A tuple type `(T1, T2, ...)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleType {
    pub elements: Vec<TypeExpression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(TupleType);

impl fmt::Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, ")")
    }
}

/// A raw pointer type `*T`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerType {
    pub element: Box<TypeExpression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(PointerType);

impl fmt::Display for PointerType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "*{}", self.element)
    }
}

/// A reference type `&T` or `&mut T`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceType {
    pub mutable: bool,
    pub element: Box<TypeExpression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ReferenceType);

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "&{}{}", if self.mutable { "mut " } else { "" }, self.element)
    }
}

/// An optional type `T?`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalType {
    pub element: Box<TypeExpression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(OptionalType);

impl fmt::Display for OptionalType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}?", self.element)
    }
}

/// The communication direction a channel type permits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelDirection {
    /// `chan T` -- both send and receive.
    Both,
    /// `chan<- T` -- send only.
    Send,
    /// `<-chan T` -- receive only.
    Recv,
}

/// A channel type `chan T`, `chan<- T`, or `<-chan T`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelType {
    pub direction: ChannelDirection,
    pub element: Box<TypeExpression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ChannelType);

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.direction {
            ChannelDirection::Both => write!(f, "chan {}", self.element),
            ChannelDirection::Send => write!(f, "chan<- {}", self.element),
            ChannelDirection::Recv => write!(f, "<-chan {}", self.element),
        }
    }
}
