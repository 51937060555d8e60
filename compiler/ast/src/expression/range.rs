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

/// A range expression `start..stop` or `start..=stop`, with both
/// endpoints optional.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeExpression {
    pub start: Option<Box<Expression>>,
    pub stop: Option<Box<Expression>>,
    pub inclusive: bool,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(RangeExpression);

impl fmt::Display for RangeExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(start) = &self.start {
            write!(f, "{start}")?;
        }
        write!(f, "{}", if self.inclusive { "..=" } else { ".." })?;
        if let Some(stop) = &self.stop {
            write!(f, "{stop}")?;
        }
        Ok(())
    }
}
