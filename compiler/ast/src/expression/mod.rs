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

use crate::{Block, Identifier, Node, NodeID};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

mod access;
pub use access::*;

mod assign;
pub use assign::*;

mod binary;
pub use binary::*;

mod call;
pub use call::*;

mod cast;
pub use cast::*;

mod closure;
pub use closure::*;

mod collections;
pub use collections::*;

mod conditional;
pub use conditional::*;

mod err;
pub use err::*;

mod literal;
pub use literal::*;

mod match_;
pub use match_::*;

mod range;
pub use range::*;

mod send;
pub use send::*;

mod struct_init;
pub use struct_init::*;

mod unary;
pub use unary::*;

mod unsafe_;
pub use unsafe_::*;

/// Expression that evaluates to a value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// An access expression: field, index, or path.
    Access(AccessExpression),
    /// An array literal, e.g. `[1, 2, 3]`.
    Array(ArrayExpression),
    /// An assignment, e.g. `x = 1`.
    Assign(AssignExpression),
    /// A binary expression, e.g. `42 + 24`.
    Binary(BinaryExpression),
    /// A block in expression position; its tail expression is its value.
    Block(Block),
    /// A call expression, e.g. `my_fn(args)`.
    Call(CallExpression),
    /// A cast, e.g. `x as int64`.
    Cast(CastExpression),
    /// A function literal.
    Closure(FunctionLiteral),
    /// An expression of type "error".
    /// Will result in a compile error eventually.
    Err(ErrExpression),
    /// An identifier expression.
    Identifier(Identifier),
    /// An `if` in expression position.
    If(IfExpression),
    /// A literal expression.
    Literal(Literal),
    /// A map literal, e.g. `{ "a" => 1 }`.
    Map(MapExpression),
    /// A match expression.
    Match(MatchExpression),
    /// A range, e.g. `0..n`.
    Range(RangeExpression),
    /// An anonymous record literal, e.g. `{ x: 1 }`.
    Record(RecordExpression),
    /// A channel send, e.g. `ch <- v`.
    Send(SendExpression),
    /// A struct literal, e.g. `Foo { bar: 42 }`.
    Struct(StructExpression),
    /// A tuple literal, e.g. `(a, b)`.
    Tuple(TupleExpression),
    /// A unary expression.
    Unary(UnaryExpression),
    /// An `unsafe { ... }` block.
    Unsafe(UnsafeExpression),
}

impl Node for Expression {
    fn span(&self) -> Span {
        use Expression::*;
        match self {
            Access(n) => n.span(),
            Array(n) => n.span(),
            Assign(n) => n.span(),
            Binary(n) => n.span(),
            Block(n) => n.span(),
            Call(n) => n.span(),
            Cast(n) => n.span(),
            Closure(n) => n.span(),
            Err(n) => n.span(),
            Identifier(n) => n.span(),
            If(n) => n.span(),
            Literal(n) => n.span(),
            Map(n) => n.span(),
            Match(n) => n.span(),
            Range(n) => n.span(),
            Record(n) => n.span(),
            Send(n) => n.span(),
            Struct(n) => n.span(),
            Tuple(n) => n.span(),
            Unary(n) => n.span(),
            Unsafe(n) => n.span(),
        }
    }

    fn set_span(&mut self, span: Span) {
        use Expression::*;
        match self {
            Access(n) => n.set_span(span),
            Array(n) => n.set_span(span),
            Assign(n) => n.set_span(span),
            Binary(n) => n.set_span(span),
            Block(n) => n.set_span(span),
            Call(n) => n.set_span(span),
            Cast(n) => n.set_span(span),
            Closure(n) => n.set_span(span),
            Err(n) => n.set_span(span),
            Identifier(n) => n.set_span(span),
            If(n) => n.set_span(span),
            Literal(n) => n.set_span(span),
            Map(n) => n.set_span(span),
            Match(n) => n.set_span(span),
            Range(n) => n.set_span(span),
            Record(n) => n.set_span(span),
            Send(n) => n.set_span(span),
            Struct(n) => n.set_span(span),
            Tuple(n) => n.set_span(span),
            Unary(n) => n.set_span(span),
            Unsafe(n) => n.set_span(span),
        }
    }

    fn id(&self) -> NodeID {
        use Expression::*;
        match self {
            Access(n) => n.id(),
            Array(n) => n.id(),
            Assign(n) => n.id(),
            Binary(n) => n.id(),
            Block(n) => n.id(),
            Call(n) => n.id(),
            Cast(n) => n.id(),
            Closure(n) => n.id(),
            Err(n) => n.id(),
            Identifier(n) => n.id(),
            If(n) => n.id(),
            Literal(n) => n.id(),
            Map(n) => n.id(),
            Match(n) => n.id(),
            Range(n) => n.id(),
            Record(n) => n.id(),
            Send(n) => n.id(),
            Struct(n) => n.id(),
            Tuple(n) => n.id(),
            Unary(n) => n.id(),
            Unsafe(n) => n.id(),
        }
    }

    fn set_id(&mut self, id: NodeID) {
        use Expression::*;
        match self {
            Access(n) => n.set_id(id),
            Array(n) => n.set_id(id),
            Assign(n) => n.set_id(id),
            Binary(n) => n.set_id(id),
            Block(n) => n.set_id(id),
            Call(n) => n.set_id(id),
            Cast(n) => n.set_id(id),
            Closure(n) => n.set_id(id),
            Err(n) => n.set_id(id),
            Identifier(n) => n.set_id(id),
            If(n) => n.set_id(id),
            Literal(n) => n.set_id(id),
            Map(n) => n.set_id(id),
            Match(n) => n.set_id(id),
            Range(n) => n.set_id(id),
            Record(n) => n.set_id(id),
            Send(n) => n.set_id(id),
            Struct(n) => n.set_id(id),
            Tuple(n) => n.set_id(id),
            Unary(n) => n.set_id(id),
            Unsafe(n) => n.set_id(id),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Expression::*;
        match self {
            Access(n) => n.fmt(f),
            Array(n) => n.fmt(f),
            Assign(n) => n.fmt(f),
            Binary(n) => n.fmt(f),
            Block(n) => n.fmt(f),
            Call(n) => n.fmt(f),
            Cast(n) => n.fmt(f),
            Closure(n) => n.fmt(f),
            Err(n) => n.fmt(f),
            Identifier(n) => n.fmt(f),
            If(n) => n.fmt(f),
            Literal(n) => n.fmt(f),
            Map(n) => n.fmt(f),
            Match(n) => n.fmt(f),
            Range(n) => n.fmt(f),
            Record(n) => n.fmt(f),
            Send(n) => n.fmt(f),
            Struct(n) => n.fmt(f),
            Tuple(n) => n.fmt(f),
            Unary(n) => n.fmt(f),
            Unsafe(n) => n.fmt(f),
        }
    }
}
