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

use crate::{simple_node_impl, Expression, Node, NodeID};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperation {
    /// Arithmetic negation, i.e. `-x`.
    Negate,
    /// Logical negation, i.e. `!x`.
    Not,
    /// Dereference, i.e. `*x`.
    Deref,
    /// Shared borrow, i.e. `&x`.
    Ref,
    /// Mutable borrow, i.e. `&mut x`.
    RefMut,
    /// Channel receive, i.e. `<-ch`.
    Recv,
    /// Optional unwrap, i.e. the postfix `x?`.
    Try,
}

impl UnaryOperation {
    /// Is the operator written after its operand?
    pub fn is_postfix(self) -> bool {
        matches!(self, Self::Try)
    }
}

impl fmt::Display for UnaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use UnaryOperation::*;
        write!(f, "{}", match self {
            Negate => "-",
            Not => "!",
            Deref => "*",
            Ref => "&",
            RefMut => "&mut ",
            Recv => "<-",
            Try => "?",
        })
    }
}

/// A unary expression applying `op` to `receiver`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnaryExpression {
    pub receiver: Box<Expression>,
    pub op: UnaryOperation,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(UnaryExpression);

impl fmt::Display for UnaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.op.is_postfix() {
            write!(f, "{}{}", self.receiver, self.op)
        } else {
            write!(f, "{}{}", self.op, self.receiver)
        }
    }
}
