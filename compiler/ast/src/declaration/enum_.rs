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

use crate::{simple_node_impl, GenericParam, Identifier, Node, NodeID, TypeExpression};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One variant of an enum declaration, with an optional payload tuple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVariant {
    pub identifier: Identifier,
    /// The payload types; empty for a unit variant.
    pub payload: Vec<TypeExpression>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(EnumVariant);

impl fmt::Display for EnumVariant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.identifier)?;
        if !self.payload.is_empty() {
            write!(f, "(")?;
            for (i, type_) in self.payload.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{type_}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// An enum declaration `enum Name[Gp] { variants... }`.
/// A well-formed enum has at least one variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub is_pub: bool,
    pub identifier: Identifier,
    pub generics: Vec<GenericParam>,
    pub variants: Vec<EnumVariant>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(EnumDecl);

impl fmt::Display for EnumDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "enum {} {{ ", self.identifier)?;
        for (i, variant) in self.variants.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{variant}")?;
        }
        write!(f, " }}")
    }
}
