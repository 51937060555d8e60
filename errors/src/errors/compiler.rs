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

use crate::{Severity, Stage};

use std::fmt::Display;

create_messages!(
    /// Constructors for diagnostics of the compiler driver itself.
    CompilerError,
    stage: Stage::Compiler,
    severity: Severity::Error,

    /// For when the main source file could not be read.
    file_read_error {
        args: (path: impl Display, error: impl Display),
        code: CompilerFileRead,
        msg: format!("failed to read file '{path}': {error}"),
        help: None,
    }

    /// For when an output artifact (e.g. an AST snapshot) could not be written.
    file_write_error {
        args: (path: impl Display, error: impl Display),
        code: CompilerFileRead,
        msg: format!("failed to write file '{path}': {error}"),
        help: None,
    }

    /// For when the AST could not be serialized to JSON.
    ast_json_error {
        args: (error: impl Display),
        code: CompilerFileRead,
        msg: format!("failed to serialize the ast: {error}"),
        help: None,
    }
);
