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

use crate::type_model::{Row, TraitRef, Type, TypeArena, TypeId};

use indexmap::IndexMap;
use vesper_span::{Span, Symbol};

/// Where an inference variable received its binding; drives the
/// secondary labels of conflicting-inference diagnostics.
#[derive(Clone, Debug)]
pub struct VarOrigin {
    /// The generic parameter the variable stands for, if any.
    pub param: Option<Symbol>,
    /// A short description of the constraint site, e.g. a field name.
    pub site: String,
    pub span: Span,
}

/// The failure of a unification: the two types that would not meet.
pub type UnifyError = (TypeId, TypeId);

/// Binds inference variables and row variables. All bindings are local
/// to one checker run.
#[derive(Debug, Default)]
pub struct Unifier {
    bindings: IndexMap<u32, TypeId>,
    row_bindings: IndexMap<u32, Row>,
    next_var: u32,
    next_row_var: u32,
    /// Binding provenance for inference variables, recorded by the
    /// checker as constraints land.
    pub origins: IndexMap<u32, VarOrigin>,
}

impl Unifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh inference variable.
    pub fn fresh_var(&mut self, arena: &TypeArena) -> TypeId {
        let index = self.next_var;
        self.next_var += 1;
        arena.intern(Type::Var(index))
    }

    /// Allocates a fresh row variable.
    pub fn fresh_row_var(&mut self) -> u32 {
        let index = self.next_row_var;
        self.next_row_var += 1;
        index
    }

    /// Records where the variable `var` is about to be constrained.
    pub fn record_origin(&mut self, var: TypeId, arena: &TypeArena, origin: VarOrigin) {
        if let Type::Var(index) = arena.get(var) {
            self.origins.entry(index).or_insert(origin);
        }
    }

    /// Follows variable bindings at the top level only.
    pub fn shallow_resolve(&self, arena: &TypeArena, mut id: TypeId) -> TypeId {
        while let Type::Var(index) = arena.get(id) {
            match self.bindings.get(&index) {
                Some(bound) => id = *bound,
                None => break,
            }
        }
        id
    }

    /// Substitutes all bound variables throughout `id`.
    pub fn zonk(&self, arena: &TypeArena, id: TypeId) -> TypeId {
        let id = self.shallow_resolve(arena, id);
        let zonk_all = |ids: &[TypeId]| ids.iter().map(|id| self.zonk(arena, *id)).collect::<Vec<_>>();

        match arena.get(id) {
            Type::Error | Type::Primitive(_) | Type::Param(_) | Type::Var(_) | Type::ConstInt(_) => id,
            Type::Struct { name, arguments } => arena.intern(Type::Struct { name, arguments: zonk_all(&arguments) }),
            Type::Enum { name, arguments } => arena.intern(Type::Enum { name, arguments: zonk_all(&arguments) }),
            Type::Array { element, size } => arena.intern(Type::Array {
                element: self.zonk(arena, element),
                size: self.zonk(arena, size),
            }),
            Type::Slice { element } => arena.intern(Type::Slice { element: self.zonk(arena, element) }),
            Type::Pointer { element } => arena.intern(Type::Pointer { element: self.zonk(arena, element) }),
            Type::Reference { element, mutable } => {
                arena.intern(Type::Reference { element: self.zonk(arena, element), mutable })
            }
            Type::Optional { element } => arena.intern(Type::Optional { element: self.zonk(arena, element) }),
            Type::Channel { element, direction } => {
                arena.intern(Type::Channel { element: self.zonk(arena, element), direction })
            }
            Type::Tuple { elements } => arena.intern(Type::Tuple { elements: zonk_all(&elements) }),
            Type::Record { fields, rest } => arena.intern(Type::Record {
                fields: fields.iter().map(|(name, type_)| (*name, self.zonk(arena, *type_))).collect(),
                rest,
            }),
            Type::Map { key, value } => arena.intern(Type::Map {
                key: self.zonk(arena, key),
                value: self.zonk(arena, value),
            }),
            Type::Range { element } => arena.intern(Type::Range { element: self.zonk(arena, element) }),
            Type::Function { parameters, output, effects } => arena.intern(Type::Function {
                parameters: zonk_all(&parameters),
                output: self.zonk(arena, output),
                effects: self.resolve_row(&effects),
            }),
            Type::TraitObject(trait_ref) => arena.intern(Type::TraitObject(TraitRef {
                name: trait_ref.name,
                arguments: zonk_all(&trait_ref.arguments),
            })),
            Type::Projection { base, associated } => {
                arena.intern(Type::Projection { base: self.zonk(arena, base), associated })
            }
        }
    }

    /// Does `var` occur anywhere inside `id`? Guards against infinite types.
    fn occurs(&self, arena: &TypeArena, var: u32, id: TypeId) -> bool {
        let id = self.shallow_resolve(arena, id);
        let any = |ids: &[TypeId]| ids.iter().any(|id| self.occurs(arena, var, *id));

        match arena.get(id) {
            Type::Var(index) => index == var,
            Type::Error | Type::Primitive(_) | Type::Param(_) | Type::ConstInt(_) => false,
            Type::Struct { arguments, .. } | Type::Enum { arguments, .. } => any(&arguments),
            Type::Array { element, size } => self.occurs(arena, var, element) || self.occurs(arena, var, size),
            Type::Slice { element }
            | Type::Pointer { element }
            | Type::Reference { element, .. }
            | Type::Optional { element }
            | Type::Channel { element, .. }
            | Type::Range { element } => self.occurs(arena, var, element),
            Type::Tuple { elements } => any(&elements),
            Type::Record { fields, .. } => fields.iter().any(|(_, type_)| self.occurs(arena, var, *type_)),
            Type::Map { key, value } => self.occurs(arena, var, key) || self.occurs(arena, var, value),
            Type::Function { parameters, output, .. } => any(&parameters) || self.occurs(arena, var, output),
            Type::TraitObject(trait_ref) => any(&trait_ref.arguments),
            Type::Projection { base, .. } => self.occurs(arena, var, base),
        }
    }

    /// Unifies `a` with `b`. The error sentinel unifies with anything.
    /// Reference types unify on element and mutability only; lifetime
    /// identities never participate.
    pub fn unify(&mut self, arena: &TypeArena, a: TypeId, b: TypeId) -> Result<(), UnifyError> {
        let a = self.shallow_resolve(arena, a);
        let b = self.shallow_resolve(arena, b);
        if a == b {
            return Ok(());
        }

        let unify_all = |unifier: &mut Self, left: &[TypeId], right: &[TypeId]| -> Result<(), UnifyError> {
            if left.len() != right.len() {
                return Err((a, b));
            }
            for (left, right) in left.iter().zip(right.iter()) {
                unifier.unify(arena, *left, *right)?;
            }
            Ok(())
        };

        match (arena.get(a), arena.get(b)) {
            (Type::Error, _) | (_, Type::Error) => Ok(()),
            (Type::Var(index), _) => {
                if self.occurs(arena, index, b) {
                    return Err((a, b));
                }
                self.bindings.insert(index, b);
                Ok(())
            }
            (_, Type::Var(index)) => {
                if self.occurs(arena, index, a) {
                    return Err((a, b));
                }
                self.bindings.insert(index, a);
                Ok(())
            }
            (Type::Primitive(left), Type::Primitive(right)) if left == right => Ok(()),
            (Type::Param(left), Type::Param(right)) if left == right => Ok(()),
            (Type::ConstInt(left), Type::ConstInt(right)) if left == right => Ok(()),
            (Type::Struct { name: ln, arguments: la }, Type::Struct { name: rn, arguments: ra }) if ln == rn => {
                unify_all(self, &la, &ra)
            }
            (Type::Enum { name: ln, arguments: la }, Type::Enum { name: rn, arguments: ra }) if ln == rn => {
                unify_all(self, &la, &ra)
            }
            (Type::Array { element: le, size: ls }, Type::Array { element: re, size: rs }) => {
                self.unify(arena, le, re)?;
                self.unify(arena, ls, rs)
            }
            (Type::Slice { element: le }, Type::Slice { element: re })
            | (Type::Pointer { element: le }, Type::Pointer { element: re })
            | (Type::Optional { element: le }, Type::Optional { element: re })
            | (Type::Range { element: le }, Type::Range { element: re }) => self.unify(arena, le, re),
            (
                Type::Reference { element: le, mutable: lm },
                Type::Reference { element: re, mutable: rm },
            ) if lm == rm => self.unify(arena, le, re),
            (
                Type::Channel { element: le, direction: ld },
                Type::Channel { element: re, direction: rd },
            ) if ld == rd => self.unify(arena, le, re),
            (Type::Tuple { elements: le }, Type::Tuple { elements: re }) => unify_all(self, &le, &re),
            (Type::Record { fields: lf, rest: lr }, Type::Record { fields: rf, rest: rr }) => {
                if lr.is_none() && rr.is_none() && lf.len() != rf.len() {
                    return Err((a, b));
                }
                // Fields are sorted by name, so shared prefixes align.
                for (left, right) in lf.iter().zip(rf.iter()) {
                    if left.0 != right.0 {
                        return Err((a, b));
                    }
                    self.unify(arena, left.1, right.1)?;
                }
                Ok(())
            }
            (Type::Map { key: lk, value: lv }, Type::Map { key: rk, value: rv }) => {
                self.unify(arena, lk, rk)?;
                self.unify(arena, lv, rv)
            }
            (
                Type::Function { parameters: lp, output: lo, effects: le },
                Type::Function { parameters: rp, output: ro, effects: re },
            ) => {
                unify_all(self, &lp, &rp)?;
                self.unify(arena, lo, ro)?;
                self.unify_rows(&le, &re).map_err(|_| (a, b))
            }
            (Type::TraitObject(left), Type::TraitObject(right)) if left.name == right.name => {
                unify_all(self, &left.arguments, &right.arguments)
            }
            (
                Type::Projection { base: lb, associated: la },
                Type::Projection { base: rb, associated: ra },
            ) if la == ra => self.unify(arena, lb, rb),
            _ => Err((a, b)),
        }
    }

    /// Resolves a row through its row-variable bindings.
    pub fn resolve_row(&self, row: &Row) -> Row {
        let mut effects = row.effects.clone();
        let mut rest = row.rest;
        while let Some(var) = rest {
            match self.row_bindings.get(&var) {
                Some(bound) => {
                    effects.extend(bound.effects.iter().copied());
                    rest = bound.rest;
                }
                None => break,
            }
        }
        Row::new(effects, rest)
    }

    /// Unifies two effect rows. Missing effects are pushed into the
    /// other side's row variable when it has one; two closed rows must
    /// carry the same effect set.
    pub fn unify_rows(&mut self, a: &Row, b: &Row) -> Result<(), ()> {
        let a = self.resolve_row(a);
        let b = self.resolve_row(b);

        let missing_in_a: Vec<Symbol> = b.effects.iter().copied().filter(|e| !a.contains(*e)).collect();
        let missing_in_b: Vec<Symbol> = a.effects.iter().copied().filter(|e| !b.contains(*e)).collect();

        if missing_in_a.is_empty() && missing_in_b.is_empty() {
            return match (a.rest, b.rest) {
                (Some(left), Some(right)) if left != right => {
                    self.row_bindings.insert(left, Row::new(Vec::new(), Some(right)));
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        match (a.rest, b.rest) {
            (Some(left), Some(right)) => {
                let shared = self.fresh_row_var();
                self.row_bindings.insert(left, Row::new(missing_in_a, Some(shared)));
                self.row_bindings.insert(right, Row::new(missing_in_b, Some(shared)));
                Ok(())
            }
            (Some(left), None) if missing_in_b.is_empty() => {
                self.row_bindings.insert(left, Row::new(missing_in_a, None));
                Ok(())
            }
            (None, Some(right)) if missing_in_a.is_empty() => {
                self.row_bindings.insert(right, Row::new(missing_in_b, None));
                Ok(())
            }
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_span::create_session_if_not_set_then;

    #[test]
    fn test_unify_binds_vars() {
        let arena = TypeArena::new();
        let mut unifier = Unifier::new();

        let var = unifier.fresh_var(&arena);
        let int = arena.int();
        assert!(unifier.unify(&arena, var, int).is_ok());
        assert_eq!(unifier.shallow_resolve(&arena, var), int);

        // A second, conflicting constraint fails.
        assert!(unifier.unify(&arena, var, arena.bool_()).is_err());
    }

    #[test]
    fn test_error_unifies_with_anything() {
        let arena = TypeArena::new();
        let mut unifier = Unifier::new();
        assert!(unifier.unify(&arena, arena.error(), arena.int()).is_ok());
        assert!(unifier.unify(&arena, arena.bool_(), arena.error()).is_ok());
    }

    #[test]
    fn test_occurs_check() {
        let arena = TypeArena::new();
        let mut unifier = Unifier::new();
        let var = unifier.fresh_var(&arena);
        let wrapped = arena.intern(Type::Optional { element: var });
        assert!(unifier.unify(&arena, var, wrapped).is_err());
    }

    #[test]
    fn test_row_unification() {
        create_session_if_not_set_then(|_| {
            let mut unifier = Unifier::new();
            let io = Symbol::intern("io");
            let net = Symbol::intern("net");

            // {io} against {io} closes fine.
            assert!(unifier.unify_rows(&Row::new(vec![io], None), &Row::new(vec![io], None)).is_ok());
            // {io} against closed {net} cannot.
            assert!(unifier.unify_rows(&Row::new(vec![io], None), &Row::new(vec![net], None)).is_err());

            // An open row absorbs missing effects.
            let rest = unifier.fresh_row_var();
            let open = Row::new(vec![io], Some(rest));
            assert!(unifier.unify_rows(&open, &Row::new(vec![io, net], None)).is_ok());
            let resolved = unifier.resolve_row(&open);
            assert!(resolved.contains(net));
        });
    }
}
