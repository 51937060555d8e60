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

use crate::type_model::{Primitive, Type, TypeId};

use indexmap::IndexSet;
use itertools::Itertools;
use vesper_span::Symbol;

use std::cell::RefCell;

/// The interning arena for type nodes, keyed by structural hash.
///
/// `RefCell` is used here to avoid `&mut` all over the checker; the
/// arena only ever grows, so ids stay valid for its lifetime.
#[derive(Debug, Default)]
pub struct TypeArena {
    inner: RefCell<IndexSet<Type>>,
}

impl TypeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `type_`, returning its id. Structurally equal types
    /// always receive the same id.
    pub fn intern(&self, type_: Type) -> TypeId {
        let (index, _) = self.inner.borrow_mut().insert_full(type_);
        TypeId(index as u32)
    }

    /// Returns the node behind `id`.
    pub fn get(&self, id: TypeId) -> Type {
        self.inner
            .borrow()
            .get_index(id.0 as usize)
            .cloned()
            .expect("TypeId not issued by this arena")
    }

    pub fn error(&self) -> TypeId {
        self.intern(Type::Error)
    }

    pub fn primitive(&self, primitive: Primitive) -> TypeId {
        self.intern(Type::Primitive(primitive))
    }

    pub fn void(&self) -> TypeId {
        self.primitive(Primitive::Void)
    }

    pub fn bool_(&self) -> TypeId {
        self.primitive(Primitive::Bool)
    }

    pub fn int(&self) -> TypeId {
        self.primitive(Primitive::Int)
    }

    /// Is the node behind `id` the error sentinel?
    pub fn is_error(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Error)
    }

    /// Renders `id` for diagnostics.
    pub fn display(&self, id: TypeId) -> String {
        match self.get(id) {
            Type::Error => "<error>".into(),
            Type::Primitive(primitive) => primitive.as_str().into(),
            Type::Param(name) => name.to_string(),
            Type::Var(index) => format!("_{index}"),
            Type::ConstInt(value) => value.to_string(),
            Type::Struct { name, arguments } | Type::Enum { name, arguments } => {
                if arguments.is_empty() {
                    name.to_string()
                } else {
                    format!("{name}[{}]", self.display_list(&arguments))
                }
            }
            Type::Array { element, size } => format!("[{}; {}]", self.display(element), self.display(size)),
            Type::Slice { element } => format!("[{}]", self.display(element)),
            Type::Pointer { element } => format!("*{}", self.display(element)),
            Type::Reference { element, mutable } => {
                format!("&{}{}", if mutable { "mut " } else { "" }, self.display(element))
            }
            Type::Optional { element } => format!("{}?", self.display(element)),
            Type::Channel { element, direction } => match direction {
                vesper_ast::ChannelDirection::Both => format!("chan {}", self.display(element)),
                vesper_ast::ChannelDirection::Send => format!("chan<- {}", self.display(element)),
                vesper_ast::ChannelDirection::Recv => format!("<-chan {}", self.display(element)),
            },
            Type::Tuple { elements } => format!("({})", self.display_list(&elements)),
            Type::Record { fields, rest } => {
                let mut rendered: Vec<String> =
                    fields.iter().map(|(name, type_)| format!("{name}: {}", self.display(*type_))).collect();
                if rest.is_some() {
                    rendered.push("| _".into());
                }
                format!("{{{}}}", rendered.join(", "))
            }
            Type::Map { key, value } => format!("map[{}]{}", self.display(key), self.display(value)),
            Type::Range { element } => format!("range of {}", self.display(element)),
            Type::Function { parameters, output, effects } => {
                let mut rendered = format!("fn({}) -> {}", self.display_list(&parameters), self.display(output));
                if !effects.effects.is_empty() || effects.rest.is_some() {
                    let mut row: Vec<String> = effects.effects.iter().map(|e| e.to_string()).collect();
                    if effects.rest.is_some() {
                        row.push("| _".into());
                    }
                    rendered.push_str(&format!(" / {{{}}}", row.join(", ")));
                }
                rendered
            }
            Type::TraitObject(trait_ref) => {
                if trait_ref.arguments.is_empty() {
                    format!("dyn {}", trait_ref.name)
                } else {
                    format!("dyn {}[{}]", trait_ref.name, self.display_list(&trait_ref.arguments))
                }
            }
            Type::Projection { base, associated } => format!("{}::{associated}", self.display(base)),
        }
    }

    fn display_list(&self, ids: &[TypeId]) -> String {
        ids.iter().map(|id| self.display(*id)).join(", ")
    }

    /// Replaces every `Param` occurrence per `map`, producing interned
    /// nodes. Since the model has no binders, plain structural
    /// recursion is capture-avoiding.
    pub fn substitute(&self, id: TypeId, map: &indexmap::IndexMap<Symbol, TypeId>) -> TypeId {
        let subst_all = |ids: &[TypeId]| ids.iter().map(|id| self.substitute(*id, map)).collect::<Vec<_>>();

        match self.get(id) {
            Type::Param(name) => map.get(&name).copied().unwrap_or(id),
            Type::Error | Type::Primitive(_) | Type::Var(_) | Type::ConstInt(_) => id,
            Type::Struct { name, arguments } => self.intern(Type::Struct { name, arguments: subst_all(&arguments) }),
            Type::Enum { name, arguments } => self.intern(Type::Enum { name, arguments: subst_all(&arguments) }),
            Type::Array { element, size } => self.intern(Type::Array {
                element: self.substitute(element, map),
                size: self.substitute(size, map),
            }),
            Type::Slice { element } => self.intern(Type::Slice { element: self.substitute(element, map) }),
            Type::Pointer { element } => self.intern(Type::Pointer { element: self.substitute(element, map) }),
            Type::Reference { element, mutable } => {
                self.intern(Type::Reference { element: self.substitute(element, map), mutable })
            }
            Type::Optional { element } => self.intern(Type::Optional { element: self.substitute(element, map) }),
            Type::Channel { element, direction } => {
                self.intern(Type::Channel { element: self.substitute(element, map), direction })
            }
            Type::Tuple { elements } => self.intern(Type::Tuple { elements: subst_all(&elements) }),
            Type::Record { fields, rest } => self.intern(Type::Record {
                fields: fields.iter().map(|(name, type_)| (*name, self.substitute(*type_, map))).collect(),
                rest,
            }),
            Type::Map { key, value } => self.intern(Type::Map {
                key: self.substitute(key, map),
                value: self.substitute(value, map),
            }),
            Type::Range { element } => self.intern(Type::Range { element: self.substitute(element, map) }),
            Type::Function { parameters, output, effects } => self.intern(Type::Function {
                parameters: subst_all(&parameters),
                output: self.substitute(output, map),
                effects,
            }),
            Type::TraitObject(trait_ref) => self.intern(Type::TraitObject(crate::type_model::TraitRef {
                name: trait_ref.name,
                arguments: subst_all(&trait_ref.arguments),
            })),
            Type::Projection { base, associated } => {
                self.intern(Type::Projection { base: self.substitute(base, map), associated })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_is_structural() {
        let arena = TypeArena::new();
        let left = arena.intern(Type::Slice { element: arena.int() });
        let right = arena.intern(Type::Slice { element: arena.int() });
        assert_eq!(left, right);

        let other = arena.intern(Type::Slice { element: arena.bool_() });
        assert_ne!(left, other);
    }

    #[test]
    fn test_substitute_produces_interned_nodes() {
        vesper_span::create_session_if_not_set_then(|_| {
            let arena = TypeArena::new();
            let param = Symbol::intern("T");
            let generic = arena.intern(Type::Optional { element: arena.intern(Type::Param(param)) });

            let mut map = indexmap::IndexMap::new();
            map.insert(param, arena.int());

            let concrete = arena.substitute(generic, &map);
            assert_eq!(concrete, arena.intern(Type::Optional { element: arena.int() }));
        });
    }
}
