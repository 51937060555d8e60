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

use crate::type_model::{TypeArena, TypeId, Unifier};

use vesper_ast::NodeID;

use indexmap::IndexMap;
use std::cell::RefCell;

/// A mapping between expression node IDs and their checked types.
///
/// Keyed by node identity, not structure: equal expressions at
/// different positions keep independent entries. Downstream consumers
/// answer "what is the type of this expression" from here without
/// re-resolving.
#[derive(Debug, Default)]
pub struct TypeTable {
    /// The inner table.
    /// `RefCell` is used here to avoid `&mut` all over the checker.
    inner: RefCell<IndexMap<NodeID, TypeId>>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets an entry from the table.
    pub fn get(&self, index: &NodeID) -> Option<TypeId> {
        self.inner.borrow().get(index).copied()
    }

    /// Inserts an entry into the table.
    pub fn insert(&self, index: NodeID, value: TypeId) {
        self.inner.borrow_mut().insert(index, value);
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Resolves every entry through the unifier's bindings. Run once
    /// after body checking so consumers never see loose variables.
    pub fn zonk_all(&self, arena: &TypeArena, unifier: &Unifier) {
        let mut inner = self.inner.borrow_mut();
        for (_, value) in inner.iter_mut() {
            *value = unifier.zonk(arena, *value);
        }
    }

    /// A snapshot of the table, in insertion order.
    pub fn entries(&self) -> Vec<(NodeID, TypeId)> {
        self.inner.borrow().iter().map(|(k, v)| (*k, *v)).collect()
    }
}
