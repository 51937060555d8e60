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

use crate::{simple_node_impl, Expression, Identifier, Node, NodeID, TypeArgument};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One member `name: value` (or the shorthand `name`) of a struct literal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructMember {
    pub identifier: Identifier,
    /// `None` means the shorthand form, where a binding of the same
    /// name provides the value.
    pub expression: Option<Expression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(StructMember);

impl fmt::Display for StructMember {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.expression {
            Some(expression) => write!(f, "{}: {expression}", self.identifier),
            None => write!(f, "{}", self.identifier),
        }
    }
}

/// A struct literal `Name { first: 1, second: 2 }`, optionally with
/// explicit generic arguments `Name[int] { ... }`. When the argument list
/// is empty the checker infers the generic parameters from the fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructExpression {
    pub name: Identifier,
    pub type_arguments: Vec<TypeArgument>,
    pub members: Vec<StructMember>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(StructExpression);

impl fmt::Display for StructExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.type_arguments.is_empty() {
            write!(f, "[")?;
            for (i, argument) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{argument}")?;
            }
            write!(f, "]")?;
        }
        write!(f, " {{ ")?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{member}")?;
        }
        write!(f, " }}")
    }
}
