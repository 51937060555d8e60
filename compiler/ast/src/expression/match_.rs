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

use crate::{simple_node_impl, Expression, Node, NodeID, Pattern};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One arm `pattern => body` of a match expression.
/// Bindings introduced by the pattern are in scope for the body only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub body: Box<Expression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(MatchArm);

impl fmt::Display for MatchArm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} => {}", self.pattern, self.body)
    }
}

/// A match expression `match scrutinee { arms... }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchExpression {
    pub scrutinee: Box<Expression>,
    pub arms: Vec<MatchArm>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(MatchExpression);

impl fmt::Display for MatchExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "match {} {{ ", self.scrutinee)?;
        for arm in &self.arms {
            write!(f, "{arm}, ")?;
        }
        write!(f, "}}")
    }
}
