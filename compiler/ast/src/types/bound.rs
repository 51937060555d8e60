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

use crate::{simple_node_impl, Identifier, Node, NodeID, TypeArgument, TypeExpression};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A trait bound `Tr` or `Tr[Args]`, as it appears after `:` in generic
/// parameter lists and `where` clauses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitBound {
    /// The trait name.
    pub name: Identifier,
    /// Generic arguments applied to the trait, if any.
    pub arguments: Vec<TypeArgument>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(TraitBound);

impl fmt::Display for TraitBound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.arguments.is_empty() {
            write!(f, "[")?;
            for (i, argument) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{argument}")?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// What a generic parameter abstracts over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenericParamKind {
    /// A type parameter with zero or more trait bounds, e.g. `T: Display`.
    Type { bounds: Vec<TraitBound> },
    /// A compile-time constant parameter, e.g. `const N: int`.
    Const { type_: TypeExpression },
}

/// One parameter in a generic parameter list `[T: B, const N: int]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericParam {
    pub identifier: Identifier,
    pub kind: GenericParamKind,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(GenericParam);

impl fmt::Display for GenericParam {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            GenericParamKind::Type { bounds } => {
                write!(f, "{}", self.identifier)?;
                for (i, bound) in bounds.iter().enumerate() {
                    write!(f, "{}{bound}", if i == 0 { ": " } else { " + " })?;
                }
                Ok(())
            }
            GenericParamKind::Const { type_ } => write!(f, "const {}: {type_}", self.identifier),
        }
    }
}

/// A single `where` predicate `T: Tr`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WherePredicate {
    /// The constrained type.
    pub type_: TypeExpression,
    /// The bounds it must satisfy.
    pub bounds: Vec<TraitBound>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(WherePredicate);

impl fmt::Display for WherePredicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.type_)?;
        for (i, bound) in self.bounds.iter().enumerate() {
            write!(f, "{}{bound}", if i == 0 { ": " } else { " + " })?;
        }
        Ok(())
    }
}

/// An effect row `{E1, E2 | R}` attached to a function signature or type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRow {
    /// The named effects.
    pub effects: Vec<Identifier>,
    /// The trailing row variable, if any.
    pub rest: Option<Identifier>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(EffectRow);

impl fmt::Display for EffectRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, effect) in self.effects.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{effect}")?;
        }
        if let Some(rest) = &self.rest {
            write!(f, " | {rest}")?;
        }
        write!(f, "}}")
    }
}
