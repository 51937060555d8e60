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

use crate::{Expression, Node, NodeID};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod bound;
pub use bound::*;

pub mod container;
pub use container::*;

pub mod function;
pub use function::*;

pub mod named;
pub use named::*;

pub mod quantified;
pub use quantified::*;

pub mod record;
pub use record::*;

/// A type expression as written in source.
/// The checker lowers these into the internal type model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeExpression {
    /// A plain named type, e.g. `int` or `Color`.
    Named(NamedType),
    /// A generic application, e.g. `Pair[int]`.
    Generic(GenericType),
    /// A function type, e.g. `fn(int) -> bool`.
    Function(FunctionType),
    /// A channel type, e.g. `chan int`.
    Channel(ChannelType),
    /// A raw pointer type, e.g. `*int`.
    Pointer(PointerType),
    /// A reference type, e.g. `&mut int`.
    Reference(ReferenceType),
    /// An optional type, e.g. `int?`.
    Optional(OptionalType),
    /// A fixed-size array type, e.g. `[int; 4]`.
    Array(ArrayType),
    /// A slice type, e.g. `[int]`.
    Slice(SliceType),
    /// A tuple type, e.g. `(int, bool)`.
    Tuple(TupleType),
    /// A structural record type, e.g. `{x: int | R}`.
    Record(RecordType),
    /// A universally quantified type.
    Forall(ForallType),
    /// An existentially quantified type, possibly written as `dyn Tr`.
    Existential(ExistentialType),
    /// An associated-type projection, e.g. `T::Item`.
    Projection(ProjectionType),
}

impl Node for TypeExpression {
    fn span(&self) -> Span {
        use TypeExpression::*;
        match self {
            Named(n) => n.span(),
            Generic(n) => n.span(),
            Function(n) => n.span(),
            Channel(n) => n.span(),
            Pointer(n) => n.span(),
            Reference(n) => n.span(),
            Optional(n) => n.span(),
            Array(n) => n.span(),
            Slice(n) => n.span(),
            Tuple(n) => n.span(),
            Record(n) => n.span(),
            Forall(n) => n.span(),
            Existential(n) => n.span(),
            Projection(n) => n.span(),
        }
    }

    fn set_span(&mut self, span: Span) {
        use TypeExpression::*;
        match self {
            Named(n) => n.set_span(span),
            Generic(n) => n.set_span(span),
            Function(n) => n.set_span(span),
            Channel(n) => n.set_span(span),
            Pointer(n) => n.set_span(span),
            Reference(n) => n.set_span(span),
            Optional(n) => n.set_span(span),
            Array(n) => n.set_span(span),
            Slice(n) => n.set_span(span),
            Tuple(n) => n.set_span(span),
            Record(n) => n.set_span(span),
            Forall(n) => n.set_span(span),
            Existential(n) => n.set_span(span),
            Projection(n) => n.set_span(span),
        }
    }

    fn id(&self) -> NodeID {
        use TypeExpression::*;
        match self {
            Named(n) => n.id(),
            Generic(n) => n.id(),
            Function(n) => n.id(),
            Channel(n) => n.id(),
            Pointer(n) => n.id(),
            Reference(n) => n.id(),
            Optional(n) => n.id(),
            Array(n) => n.id(),
            Slice(n) => n.id(),
            Tuple(n) => n.id(),
            Record(n) => n.id(),
            Forall(n) => n.id(),
            Existential(n) => n.id(),
            Projection(n) => n.id(),
        }
    }

    fn set_id(&mut self, id: NodeID) {
        use TypeExpression::*;
        match self {
            Named(n) => n.set_id(id),
            Generic(n) => n.set_id(id),
            Function(n) => n.set_id(id),
            Channel(n) => n.set_id(id),
            Pointer(n) => n.set_id(id),
            Reference(n) => n.set_id(id),
            Optional(n) => n.set_id(id),
            Array(n) => n.set_id(id),
            Slice(n) => n.set_id(id),
            Tuple(n) => n.set_id(id),
            Record(n) => n.set_id(id),
            Forall(n) => n.set_id(id),
            Existential(n) => n.set_id(id),
            Projection(n) => n.set_id(id),
        }
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use TypeExpression::*;
        match self {
            Named(n) => n.fmt(f),
            Generic(n) => n.fmt(f),
            Function(n) => n.fmt(f),
            Channel(n) => n.fmt(f),
            Pointer(n) => n.fmt(f),
            Reference(n) => n.fmt(f),
            Optional(n) => n.fmt(f),
            Array(n) => n.fmt(f),
            Slice(n) => n.fmt(f),
            Tuple(n) => n.fmt(f),
            Record(n) => n.fmt(f),
            Forall(n) => n.fmt(f),
            Existential(n) => n.fmt(f),
            Projection(n) => n.fmt(f),
        }
    }
}

/// One argument in a generic application: a type, or a const expression
/// for parameters declared `const`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeArgument {
    Type(TypeExpression),
    Const(Expression),
}

impl TypeArgument {
    pub fn span(&self) -> Span {
        match self {
            Self::Type(type_) => type_.span(),
            Self::Const(expression) => expression.span(),
        }
    }
}

impl fmt::Display for TypeArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Type(type_) => type_.fmt(f),
            Self::Const(expression) => expression.fmt(f),
        }
    }
}
