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

//! Semantic analysis passes of the Vesper front-end.
//!
//! The passes run in order over the whole file: symbol collection,
//! header elaboration, trait/impl registration, and body checking. The
//! result is an expression-to-type table over the AST plus the
//! accumulated diagnostics.

#![forbid(unsafe_code)]

pub mod common;
pub use common::*;

pub mod pass;
pub use pass::*;

pub mod symbol_collection;
pub use symbol_collection::*;

pub mod type_checker;
pub use type_checker::*;

pub mod type_model;
pub use type_model::{Primitive, Row, TraitRef, Type, TypeArena, TypeId, Unifier};
