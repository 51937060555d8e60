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

/// A binary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperation {
    /// Addition, i.e. `+`.
    Add,
    /// Subtraction, i.e. `-`.
    Sub,
    /// Multiplication, i.e. `*`.
    Mul,
    /// Division, i.e. `/`.
    Div,
    /// Remainder, i.e. `%`.
    Rem,
    /// Equality, i.e. `==`.
    Eq,
    /// Non-equality, i.e. `!=`.
    Neq,
    /// Less than, i.e. `<`.
    Lt,
    /// Less than or equal, i.e. `<=`.
    Le,
    /// Greater than, i.e. `>`.
    Gt,
    /// Greater than or equal, i.e. `>=`.
    Ge,
    /// Logical and, i.e. `&&`.
    And,
    /// Logical or, i.e. `||`.
    Or,
}

impl BinaryOperation {
    /// Is this a comparison or equality operator?
    pub fn is_comparison(self) -> bool {
        use BinaryOperation::*;
        matches!(self, Eq | Neq | Lt | Le | Gt | Ge)
    }

    /// Is this an arithmetic operator?
    pub fn is_arithmetic(self) -> bool {
        use BinaryOperation::*;
        matches!(self, Add | Sub | Mul | Div | Rem)
    }

    /// Is this a logical operator?
    pub fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

impl fmt::Display for BinaryOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use BinaryOperation::*;
        write!(f, "{}", match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Rem => "%",
            Eq => "==",
            Neq => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            And => "&&",
            Or => "||",
        })
    }
}

/// A binary expression `left op right`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub op: BinaryOperation,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(BinaryExpression);

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}
