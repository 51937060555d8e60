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

use crate::{Node, NodeID};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

mod block;
pub use block::*;

mod conditional;
pub use conditional::*;

mod definition;
pub use definition::*;

mod expression;
pub use expression::*;

mod iteration;
pub use iteration::*;

mod jump;
pub use jump::*;

mod return_;
pub use return_::*;

mod select;
pub use select::*;

mod spawn;
pub use spawn::*;

/// Program statement that defines some action to be carried out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// A block statement.
    Block(Block),
    /// A `break;` statement.
    Break(BreakStatement),
    /// An `if` statement.
    Conditional(ConditionalStatement),
    /// A `continue;` statement.
    Continue(ContinueStatement),
    /// An expression statement.
    Expression(ExpressionStatement),
    /// A for-in loop.
    Iteration(Box<IterationStatement>),
    /// A binding statement.
    Let(LetStatement),
    /// A return statement.
    Return(ReturnStatement),
    /// A select statement.
    Select(SelectStatement),
    /// A spawn statement.
    Spawn(SpawnStatement),
    /// A while loop.
    While(Box<WhileStatement>),
}

impl Node for Statement {
    fn span(&self) -> Span {
        use Statement::*;
        match self {
            Block(n) => n.span(),
            Break(n) => n.span(),
            Conditional(n) => n.span(),
            Continue(n) => n.span(),
            Expression(n) => n.span(),
            Iteration(n) => n.span(),
            Let(n) => n.span(),
            Return(n) => n.span(),
            Select(n) => n.span(),
            Spawn(n) => n.span(),
            While(n) => n.span(),
        }
    }

    fn set_span(&mut self, span: Span) {
        use Statement::*;
        match self {
            Block(n) => n.set_span(span),
            Break(n) => n.set_span(span),
            Conditional(n) => n.set_span(span),
            Continue(n) => n.set_span(span),
            Expression(n) => n.set_span(span),
            Iteration(n) => n.set_span(span),
            Let(n) => n.set_span(span),
            Return(n) => n.set_span(span),
            Select(n) => n.set_span(span),
            Spawn(n) => n.set_span(span),
            While(n) => n.set_span(span),
        }
    }

    fn id(&self) -> NodeID {
        use Statement::*;
        match self {
            Block(n) => n.id(),
            Break(n) => n.id(),
            Conditional(n) => n.id(),
            Continue(n) => n.id(),
            Expression(n) => n.id(),
            Iteration(n) => n.id(),
            Let(n) => n.id(),
            Return(n) => n.id(),
            Select(n) => n.id(),
            Spawn(n) => n.id(),
            While(n) => n.id(),
        }
    }

    fn set_id(&mut self, id: NodeID) {
        use Statement::*;
        match self {
            Block(n) => n.set_id(id),
            Break(n) => n.set_id(id),
            Conditional(n) => n.set_id(id),
            Continue(n) => n.set_id(id),
            Expression(n) => n.set_id(id),
            Iteration(n) => n.set_id(id),
            Let(n) => n.set_id(id),
            Return(n) => n.set_id(id),
            Select(n) => n.set_id(id),
            Spawn(n) => n.set_id(id),
            While(n) => n.set_id(id),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Statement::*;
        match self {
            Block(n) => n.fmt(f),
            Break(n) => n.fmt(f),
            Conditional(n) => n.fmt(f),
            Continue(n) => n.fmt(f),
            Expression(n) => n.fmt(f),
            Iteration(n) => n.fmt(f),
            Let(n) => n.fmt(f),
            Return(n) => n.fmt(f),
            Select(n) => n.fmt(f),
            Spawn(n) => n.fmt(f),
            While(n) => n.fmt(f),
        }
    }
}
