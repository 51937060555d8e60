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
    simple_node_impl, Block, EffectRow, GenericParam, Identifier, Node, NodeID, Param, TraitBound, TypeExpression,
    WherePredicate,
};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A method signature inside a trait, with an optional default body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitMethod {
    pub identifier: Identifier,
    pub generics: Vec<GenericParam>,
    pub parameters: Vec<Param>,
    pub output: Option<TypeExpression>,
    pub effects: Option<EffectRow>,
    pub where_clause: Vec<WherePredicate>,
    /// A default body, if the trait provides one.
    pub body: Option<Block>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(TraitMethod);

impl fmt::Display for TraitMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "fn {}(", self.identifier)?;
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
        match &self.body {
            Some(body) => write!(f, " {body}"),
            None => write!(f, ";"),
        }
    }
}

/// An associated-type declaration `type Assoc: Bounds;` inside a trait.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedTypeDecl {
    pub identifier: Identifier,
    pub bounds: Vec<TraitBound>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(AssociatedTypeDecl);

impl fmt::Display for AssociatedTypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "type {}", self.identifier)?;
        for (i, bound) in self.bounds.iter().enumerate() {
            write!(f, "{}{bound}", if i == 0 { ": " } else { " + " })?;
        }
        write!(f, ";")
    }
}

/// A trait declaration `trait Name[Gp] { methods... types... }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitDecl {
    pub is_pub: bool,
    pub identifier: Identifier,
    pub generics: Vec<GenericParam>,
    pub methods: Vec<TraitMethod>,
    pub associated_types: Vec<AssociatedTypeDecl>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(TraitDecl);

impl fmt::Display for TraitDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "trait {} {{ ", self.identifier)?;
        for associated in &self.associated_types {
            write!(f, "{associated} ")?;
        }
        for method in &self.methods {
            write!(f, "{method} ")?;
        }
        write!(f, "}}")
    }
}
