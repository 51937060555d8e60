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

use crate::{ModuleEntry, ModuleSymbolKind, ModuleTable};

use vesper_ast::*;
use vesper_errors::{emitter::Handler, TypeCheckerError};

/// The symbol-collection pass: walks the top-level declarations and
/// registers every name in the module symbol table. Bodies are not
/// entered; this pass sees headers only.
pub struct SymbolCollector<'a> {
    handler: &'a Handler,
    pub(crate) table: ModuleTable,
}

impl<'a> SymbolCollector<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self { handler, table: ModuleTable::default() }
    }

    fn register(&mut self, identifier: &Identifier, kind: ModuleSymbolKind, arity: usize) {
        let entry = ModuleEntry { kind, span: identifier.span, arity };
        if let Err(original) = self.table.insert(identifier.name, entry) {
            self.handler.emit_err(
                TypeCheckerError::duplicate_definition(identifier.name, identifier.span)
                    .with_secondary_label(original, "first defined here")
                    .with_proof_step(format!("`{}` was first defined here", identifier.name), Some(original)),
            );
        }
    }
}

impl<'a> ExpressionVisitor<'a> for SymbolCollector<'a> {
    type AdditionalInput = ();
    type Output = ();
}

impl<'a> StatementVisitor<'a> for SymbolCollector<'a> {}

impl<'a> ProgramVisitor<'a> for SymbolCollector<'a> {
    fn visit_const(&mut self, input: &'a ConstDecl) {
        self.register(&input.identifier, ModuleSymbolKind::Const, 0);
    }

    fn visit_enum(&mut self, input: &'a EnumDecl) {
        self.register(&input.identifier, ModuleSymbolKind::Enum, input.generics.len());
    }

    // Registers the name only; the body belongs to a later pass.
    fn visit_function(&mut self, input: &'a Function) {
        self.register(&input.identifier, ModuleSymbolKind::Function, input.generics.len());
    }

    fn visit_impl(&mut self, _input: &'a ImplDecl) {
        // Impl blocks are nameless; they are registered by the
        // trait/impl registration pass.
    }

    fn visit_struct(&mut self, input: &'a StructDecl) {
        self.register(&input.identifier, ModuleSymbolKind::Struct, input.generics.len());
    }

    fn visit_trait(&mut self, input: &'a TraitDecl) {
        self.register(&input.identifier, ModuleSymbolKind::Trait, input.generics.len());
    }

    fn visit_type_alias(&mut self, input: &'a TypeAliasDecl) {
        self.register(&input.identifier, ModuleSymbolKind::TypeAlias, input.generics.len());
    }
}
