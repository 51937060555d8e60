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
    simple_node_impl, Function, GenericParam, Identifier, Node, NodeID, TraitBound, TypeExpression, WherePredicate,
};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// An associated-type assignment `type Assoc = T;` inside an impl.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedTypeBinding {
    pub identifier: Identifier,
    pub type_: TypeExpression,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(AssociatedTypeBinding);

impl fmt::Display for AssociatedTypeBinding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "type {} = {};", self.identifier, self.type_)
    }
}

/// An impl block, either inherent (`impl T { ... }`) or a trait impl
/// (`impl Tr for T { ... }`). `trait_` is `None` iff the impl is inherent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplDecl {
    /// The implemented trait, or `None` for an inherent impl.
    pub trait_: Option<TraitBound>,
    /// The implementing type.
    pub target: TypeExpression,
    pub generics: Vec<GenericParam>,
    pub where_clause: Vec<WherePredicate>,
    pub methods: Vec<Function>,
    pub associated_types: Vec<AssociatedTypeBinding>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ImplDecl);

impl ImplDecl {
    /// Is this an inherent impl?
    pub fn is_inherent(&self) -> bool {
        self.trait_.is_none()
    }
}

impl fmt::Display for ImplDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "impl ")?;
        if let Some(trait_) = &self.trait_ {
            write!(f, "{trait_} for ")?;
        }
        write!(f, "{} {{ ", self.target)?;
        for associated in &self.associated_types {
            write!(f, "{associated} ")?;
        }
        for method in &self.methods {
            write!(f, "{} ", method.identifier)?;
        }
        write!(f, "}}")
    }
}
