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

//! The type checker.
//!
//! Runs in ordered passes over the whole file: symbol collection is a
//! separate pass; header elaboration, trait/impl registration, and body
//! checking live here. All diagnostics are accumulated; a failed node
//! checks as the error sentinel, which unifies with anything.

pub mod checker;
pub use checker::*;

pub mod check_expressions;
pub use check_expressions::*;

pub mod check_patterns;

pub mod check_program;

pub mod check_statements;

use crate::type_model::TypeArena;
use crate::{ModuleTable, Pass, TypeTable};

use vesper_ast::File;
use vesper_errors::emitter::Handler;

impl<'a> Pass<'a> for TypeChecker<'a> {
    type Input = (&'a File, &'a Handler, &'a TypeArena, &'a TypeTable, ModuleTable);
    type Output = ();

    fn do_pass((file, handler, arena, type_table, module_table): Self::Input) -> Self::Output {
        let mut checker = TypeChecker::new(handler, arena, type_table, module_table);
        checker.check_file(file);
    }
}
