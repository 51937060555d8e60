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

use crate::File;
use vesper_errors::{CompilerError, Result};
use vesper_span::Span;

use serde::{Deserialize, Serialize};

/// The abstract syntax tree resulting from parsing one source file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ast {
    ast: File,
}

impl Ast {
    /// Creates a new AST from a given file tree.
    pub fn new(file: File) -> Self {
        Self { ast: file }
    }

    /// Returns a reference to the inner file tree.
    pub fn as_repr(&self) -> &File {
        &self.ast
    }

    /// Consumes the AST and returns the inner file tree.
    pub fn into_repr(self) -> File {
        self.ast
    }

    /// Serializes the ast into a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.ast).map_err(|e| CompilerError::ast_json_error(e, Span::dummy()))
    }

    /// Serializes the ast into a JSON file.
    pub fn to_json_file(&self, mut path: std::path::PathBuf, file_name: &str) -> Result<()> {
        path.push(file_name);
        let json = self.to_json_string()?;
        std::fs::write(&path, json).map_err(|e| CompilerError::file_write_error(path.display(), e, Span::dummy()))
    }
}
