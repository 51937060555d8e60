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

use crate::{simple_node_impl, Identifier, Node, NodeID};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

mod const_;
pub use const_::*;

mod enum_;
pub use enum_::*;

mod function;
pub use function::*;

mod impl_;
pub use impl_::*;

mod struct_;
pub use struct_::*;

mod trait_;
pub use trait_::*;

mod type_alias;
pub use type_alias::*;

/// The `package name;` declaration opening a file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDecl {
    pub identifier: Identifier,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(PackageDecl);

impl fmt::Display for PackageDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "package {};", self.identifier)
    }
}

/// A `mod name;` declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDecl {
    pub identifier: Identifier,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ModuleDecl);

impl fmt::Display for ModuleDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "mod {};", self.identifier)
    }
}

/// A `use path as alias;` declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseDecl {
    /// The `::`-separated path segments.
    pub path: Vec<Identifier>,
    pub alias: Option<Identifier>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(UseDecl);

impl fmt::Display for UseDecl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "use ")?;
        for (i, segment) in self.path.iter().enumerate() {
            if i > 0 {
                write!(f, "::")?;
            }
            write!(f, "{segment}")?;
        }
        if let Some(alias) = &self.alias {
            write!(f, " as {alias}")?;
        }
        write!(f, ";")
    }
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Declaration {
    /// A constant declaration.
    Const(ConstDecl),
    /// An enum declaration.
    Enum(EnumDecl),
    /// A function declaration.
    Function(Function),
    /// An impl block.
    Impl(ImplDecl),
    /// A struct declaration.
    Struct(StructDecl),
    /// A trait declaration.
    Trait(TraitDecl),
    /// A type alias.
    TypeAlias(TypeAliasDecl),
}

impl Node for Declaration {
    fn span(&self) -> Span {
        use Declaration::*;
        match self {
            Const(n) => n.span(),
            Enum(n) => n.span(),
            Function(n) => n.span(),
            Impl(n) => n.span(),
            Struct(n) => n.span(),
            Trait(n) => n.span(),
            TypeAlias(n) => n.span(),
        }
    }

    fn set_span(&mut self, span: Span) {
        use Declaration::*;
        match self {
            Const(n) => n.set_span(span),
            Enum(n) => n.set_span(span),
            Function(n) => n.set_span(span),
            Impl(n) => n.set_span(span),
            Struct(n) => n.set_span(span),
            Trait(n) => n.set_span(span),
            TypeAlias(n) => n.set_span(span),
        }
    }

    fn id(&self) -> NodeID {
        use Declaration::*;
        match self {
            Const(n) => n.id(),
            Enum(n) => n.id(),
            Function(n) => n.id(),
            Impl(n) => n.id(),
            Struct(n) => n.id(),
            Trait(n) => n.id(),
            TypeAlias(n) => n.id(),
        }
    }

    fn set_id(&mut self, id: NodeID) {
        use Declaration::*;
        match self {
            Const(n) => n.set_id(id),
            Enum(n) => n.set_id(id),
            Function(n) => n.set_id(id),
            Impl(n) => n.set_id(id),
            Struct(n) => n.set_id(id),
            Trait(n) => n.set_id(id),
            TypeAlias(n) => n.set_id(id),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Declaration::*;
        match self {
            Const(n) => n.fmt(f),
            Enum(n) => n.fmt(f),
            Function(n) => n.fmt(f),
            Impl(n) => n.fmt(f),
            Struct(n) => n.fmt(f),
            Trait(n) => n.fmt(f),
            TypeAlias(n) => n.fmt(f),
        }
    }
}
