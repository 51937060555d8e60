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

use crate::{simple_node_impl, Declaration, ModuleDecl, Node, NodeID, PackageDecl, UseDecl};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single parsed source file: the root of the AST.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// The `package` declaration, if the file has one.
    pub package: Option<PackageDecl>,
    /// The `mod` declarations.
    pub modules: Vec<ModuleDecl>,
    /// The `use` declarations.
    pub uses: Vec<UseDecl>,
    /// The remaining top-level declarations, in source order.
    pub declarations: Vec<Declaration>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(File);

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(package) = &self.package {
            writeln!(f, "{package}")?;
        }
        for module in &self.modules {
            writeln!(f, "{module}")?;
        }
        for use_ in &self.uses {
            writeln!(f, "{use_}")?;
        }
        for declaration in &self.declarations {
            writeln!(f, "{declaration}")?;
        }
        Ok(())
    }
}
