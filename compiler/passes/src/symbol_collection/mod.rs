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

pub mod collector;
pub use collector::*;

use crate::{ModuleTable, Pass};

use vesper_ast::{File, ProgramVisitor};
use vesper_errors::emitter::Handler;

impl<'a> Pass<'a> for SymbolCollector<'a> {
    type Input = (&'a File, &'a Handler);
    type Output = ModuleTable;

    fn do_pass((file, handler): Self::Input) -> Self::Output {
        let mut collector = SymbolCollector::new(handler);
        collector.visit_file(file);
        collector.table
    }
}
