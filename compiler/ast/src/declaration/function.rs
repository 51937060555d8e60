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

use crate::{
    simple_node_impl, Block, EffectRow, GenericParam, Identifier, Node, NodeID, TypeExpression, WherePredicate,
};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value parameter `name: T`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub identifier: Identifier,
    pub type_: TypeExpression,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(Param);

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.identifier, self.type_)
    }
}

/// A function declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Whether the function is visible outside its file.
    /// Parsed and stored; enforcement belongs to the module loader.
    pub is_pub: bool,
    /// Whether the function body is an unsafe scope.
    pub is_unsafe: bool,
    pub identifier: Identifier,
    pub generics: Vec<GenericParam>,
    pub parameters: Vec<Param>,
    /// The declared return type; `None` means `void`.
    pub output: Option<TypeExpression>,
    /// The declared effect row, if any.
    pub effects: Option<EffectRow>,
    pub where_clause: Vec<WherePredicate>,
    pub block: Block,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(Function);

impl Function {
    /// Returns the function name.
    pub fn name(&self) -> vesper_span::Symbol {
        self.identifier.name
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_pub {
            write!(f, "pub ")?;
        }
        if self.is_unsafe {
            write!(f, "unsafe ")?;
        }
        write!(f, "fn {}", self.identifier)?;
        if !self.generics.is_empty() {
            write!(f, "[")?;
            for (i, generic) in self.generics.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{generic}")?;
            }
            write!(f, "]")?;
        }
        write!(f, "(")?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{parameter}")?;
        }
        write!(f, ")")?;
        if let Some(output) = &self.output {
            write!(f, " -> {output}")?;
        }
        if let Some(effects) = &self.effects {
            write!(f, " / {effects}")?;
        }
        if !self.where_clause.is_empty() {
            write!(f, " where ")?;
            for (i, predicate) in self.where_clause.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{predicate}")?;
            }
        }
        write!(f, " {}", self.block)
    }
}
