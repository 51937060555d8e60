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

use crate::{simple_node_impl, Block, Expression, Node, NodeID, Pattern, SendExpression};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The communication a select case waits on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectCaseKind {
    /// `case p = <-ch:` -- a receive, optionally binding the received value.
    Recv {
        pattern: Option<Pattern>,
        channel: Expression,
    },
    /// `case ch <- v:` -- a send.
    Send(SendExpression),
}

/// One case of a select statement. The body is entered when the case's
/// communication completes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectCase {
    pub kind: SelectCaseKind,
    pub block: Block,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(SelectCase);

impl fmt::Display for SelectCase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            SelectCaseKind::Recv { pattern: Some(pattern), channel } => {
                write!(f, "case {pattern} = <-{channel}: {}", self.block)
            }
            SelectCaseKind::Recv { pattern: None, channel } => write!(f, "case <-{channel}: {}", self.block),
            SelectCaseKind::Send(send) => write!(f, "case {send}: {}", self.block),
        }
    }
}

/// A select statement; exactly one ready case is chosen and entered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectStatement {
    pub cases: Vec<SelectCase>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(SelectStatement);

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "select {{ ")?;
        for case in &self.cases {
            write!(f, "{case} ")?;
        }
        write!(f, "}}")
    }
}
