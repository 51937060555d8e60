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

/// The payload of an array literal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrayLiteralKind {
    /// An element list `[a, b, c]`.
    List(Vec<Expression>),
    /// A repeat form `[value; count]`.
    Repeat { value: Box<Expression>, count: Box<Expression> },
}

/// An array literal, optionally annotated with its element type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayExpression {
    pub kind: ArrayLiteralKind,
    /// An explicit element type, when the literal is typed.
    pub element_type: Option<TypeExpression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ArrayExpression);

impl fmt::Display for ArrayExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ArrayLiteralKind::List(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            }
            ArrayLiteralKind::Repeat { value, count } => write!(f, "[{value}; {count}]"),
        }
    }
}

/// A tuple literal `(a, b)`. The empty tuple `()` is the unit value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleExpression {
    pub elements: Vec<Expression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(TupleExpression);

impl fmt::Display for TupleExpression {
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

/// One entry `key => value` of a map literal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: Expression,
    pub value: Expression,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(MapEntry);

impl fmt::Display for MapEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} => {}", self.key, self.value)
    }
}

/// A map literal `{ k1 => v1, k2 => v2 }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapExpression {
    pub entries: Vec<MapEntry>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(MapExpression);

impl fmt::Display for MapExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, " }}")
    }
}

/// One field `name: value` of an anonymous record literal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMember {
    pub identifier: Identifier,
    pub expression: Expression,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(RecordMember);

impl fmt::Display for RecordMember {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.identifier, self.expression)
    }
}

/// An anonymous record literal `{ x: 1, y: 2 }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordExpression {
    pub members: Vec<RecordMember>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(RecordExpression);

impl fmt::Display for RecordExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{member}")?;
        }
        write!(f, " }}")
    }
}
