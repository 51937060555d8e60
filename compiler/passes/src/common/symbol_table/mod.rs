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

use crate::type_model::TypeId;

use vesper_span::{Span, Symbol};

use indexmap::IndexMap;

/// What kind of item a module-level name refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModuleSymbolKind {
    Function,
    Struct,
    Enum,
    Trait,
    TypeAlias,
    Const,
}

/// One module-level entry collected by the symbol-collection pass.
#[derive(Clone, Debug)]
pub struct ModuleEntry {
    pub kind: ModuleSymbolKind,
    /// The span of the declaring identifier.
    pub span: Span,
    /// The number of generic parameters the item declares.
    pub arity: usize,
}

/// The module-level symbol table: every top-level name, its kind, and
/// its generic arity. Insertion order is source order.
#[derive(Debug, Default)]
pub struct ModuleTable {
    entries: IndexMap<Symbol, ModuleEntry>,
}

impl ModuleTable {
    /// Registers `name`; a duplicate at this scope level returns the
    /// original declaration's span.
    pub fn insert(&mut self, name: Symbol, entry: ModuleEntry) -> Result<(), Span> {
        if let Some(existing) = self.entries.get(&name) {
            return Err(existing.span);
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn get(&self, name: &Symbol) -> Option<&ModuleEntry> {
        self.entries.get(name)
    }

    pub fn kind(&self, name: &Symbol) -> Option<ModuleSymbolKind> {
        self.entries.get(name).map(|entry| entry.kind)
    }
}

/// A local binding: its checked type, mutability, and declaration site.
#[derive(Copy, Clone, Debug)]
pub struct VariableSymbol {
    pub type_: TypeId,
    pub mutable: bool,
    pub span: Span,
}

/// The nested scope chain used while checking a function body.
/// Shadowing across scopes is allowed; duplicates within one scope
/// are reported by the checker.
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<IndexMap<Symbol, VariableSymbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { scopes: vec![IndexMap::new()] }
    }

    /// Enters a child scope.
    pub fn enter_scope(&mut self) {
        self.scopes.push(IndexMap::new());
    }

    /// Exits the current scope, dropping its bindings.
    pub fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    /// The current nesting depth.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declares `name` in the current scope. A duplicate at the same
    /// scope level returns the original declaration's span.
    pub fn insert(&mut self, name: Symbol, symbol: VariableSymbol) -> Result<(), Span> {
        let scope = self.scopes.last_mut().expect("the scope chain is never empty");
        if let Some(existing) = scope.get(&name) {
            return Err(existing.span);
        }
        scope.insert(name, symbol);
        Ok(())
    }

    /// Looks `name` up through the scope chain, innermost first.
    pub fn lookup(&self, name: &Symbol) -> Option<&VariableSymbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_span::create_session_if_not_set_then;

    #[test]
    fn test_shadowing_across_scopes() {
        create_session_if_not_set_then(|_| {
            let mut table = SymbolTable::new();
            let name = Symbol::intern("x");
            let symbol = VariableSymbol { type_: TypeId(0), mutable: false, span: Span::dummy() };

            table.insert(name, symbol).unwrap();
            // A duplicate in the same scope is rejected...
            assert!(table.insert(name, symbol).is_err());

            // ...but shadowing in a child scope is fine.
            table.enter_scope();
            assert!(table.insert(name, symbol).is_ok());
            table.exit_scope();

            assert!(table.lookup(&name).is_some());
        });
    }
}
