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
use crate::type_checker::checker::TypeChecker;
use crate::VariableSymbol;

use vesper_ast::*;
use vesper_errors::{TypeCheckerError, TypeCheckerWarning};
use vesper_span::Symbol;

use indexmap::{IndexMap, IndexSet};

impl<'a> TypeChecker<'a> {
    /// Types `pattern` against the scrutinee type, declaring its
    /// bindings in the current scope.
    pub(crate) fn check_pattern(&mut self, pattern: &'a Pattern, scrutinee: TypeId) {
        let scrutinee = self.unifier.zonk(self.arena, scrutinee);

        match pattern {
            Pattern::Wildcard(_) | Pattern::Rest(_) => {}
            Pattern::Paren(paren) => self.check_pattern(&paren.inner, scrutinee),
            Pattern::Identifier(identifier) => {
                // A bare name that matches a unit variant of the
                // scrutinee's enum is a constructor pattern, not a binding.
                if let Type::Enum { name, .. } = self.arena.get(scrutinee) {
                    let is_variant = self
                        .definitions
                        .enums
                        .get(&name)
                        .map(|def| def.variants.contains_key(&identifier.identifier.name))
                        .unwrap_or(false);
                    if is_variant {
                        return;
                    }
                }
                let symbol = VariableSymbol {
                    type_: scrutinee,
                    mutable: identifier.mutable,
                    span: identifier.span,
                };
                let _ = self.scopes.insert(identifier.identifier.name, symbol);
            }
            Pattern::Literal(literal) => {
                let literal_type = self.literal_pattern_type(&literal.literal);
                if self.unifier.unify(self.arena, literal_type, scrutinee).is_err() {
                    self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), literal.span));
                }
            }
            Pattern::Range(range) => {
                let start = self.literal_pattern_type(&range.start);
                let stop = self.literal_pattern_type(&range.stop);
                if self.unifier.unify(self.arena, start, scrutinee).is_err()
                    || self.unifier.unify(self.arena, stop, scrutinee).is_err()
                {
                    self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), range.span));
                }
            }
            Pattern::Tuple(tuple) => match self.arena.get(scrutinee) {
                Type::Tuple { elements } => {
                    self.check_sequence_patterns(&tuple.elements, &elements, pattern, scrutinee);
                }
                Type::Error => self.bind_all(pattern),
                _ => {
                    self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), tuple.span));
                    self.bind_all(pattern);
                }
            },
            Pattern::Slice(slice) => match self.arena.get(scrutinee) {
                Type::Slice { element } | Type::Array { element, .. } => {
                    for sub in &slice.elements {
                        if !matches!(sub, Pattern::Rest(_)) {
                            self.check_pattern(sub, element);
                        }
                    }
                }
                Type::Error => self.bind_all(pattern),
                _ => {
                    self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), slice.span));
                    self.bind_all(pattern);
                }
            },
            Pattern::Reference(reference) => match self.arena.get(scrutinee) {
                Type::Reference { element, mutable } => {
                    if reference.mutable && !mutable {
                        self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), reference.span));
                    }
                    self.check_pattern(&reference.inner, element);
                }
                Type::Error => self.bind_all(pattern),
                _ => {
                    self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), reference.span));
                    self.bind_all(pattern);
                }
            },
            Pattern::TupleStruct(tuple_struct) => {
                // A bare constructor: resolved as a variant of the
                // scrutinee's enum.
                self.check_variant_pattern(
                    pattern,
                    scrutinee,
                    None,
                    tuple_struct.name.name,
                    Some(&tuple_struct.elements),
                );
            }
            Pattern::Variant(variant) => {
                self.check_variant_pattern(
                    pattern,
                    scrutinee,
                    Some(variant.enum_.name),
                    variant.variant.name,
                    variant.elements.as_deref(),
                );
            }
            Pattern::Struct(struct_) => match self.arena.get(scrutinee) {
                Type::Struct { name, arguments } if name == struct_.name.name => {
                    let def = self.definitions.structs.get(&name).cloned();
                    let Some(def) = def else { return self.bind_all(pattern) };
                    let map: IndexMap<Symbol, TypeId> =
                        def.generics.iter().copied().zip(arguments.iter().copied()).collect();

                    for field in &struct_.fields {
                        match def.fields.get(&field.identifier.name) {
                            Some(declared) => {
                                let field_type = self.arena.substitute(*declared, &map);
                                match &field.pattern {
                                    Some(sub) => self.check_pattern(sub, field_type),
                                    None => {
                                        let symbol = VariableSymbol {
                                            type_: field_type,
                                            mutable: false,
                                            span: field.identifier.span,
                                        };
                                        let _ = self.scopes.insert(field.identifier.name, symbol);
                                    }
                                }
                            }
                            None => {
                                self.emit_err(TypeCheckerError::unknown_field(
                                    field.identifier.name,
                                    name,
                                    field.identifier.span,
                                ));
                            }
                        }
                    }

                    // Without `..`, every field must be mentioned.
                    if !struct_.rest {
                        for (field, _) in &def.fields {
                            if !struct_.fields.iter().any(|f| f.identifier.name == *field) {
                                self.emit_err(TypeCheckerError::missing_field(field, name, struct_.span));
                            }
                        }
                    }
                }
                Type::Error => self.bind_all(pattern),
                _ => {
                    self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), struct_.span));
                    self.bind_all(pattern);
                }
            },
            Pattern::Or(or) => {
                // Every alternative must bind the same names.
                let mut name_sets: Vec<IndexSet<Symbol>> = Vec::new();
                for alternative in &or.alternatives {
                    self.check_pattern(alternative, scrutinee);
                    name_sets.push(pattern_bindings(alternative));
                }
                if let Some(first) = name_sets.first() {
                    if name_sets.iter().any(|set| set != first) {
                        self.emit_err(
                            TypeCheckerError::invalid_pattern(self.display(scrutinee), or.span)
                                .with_note("all or-pattern alternatives must bind the same names"),
                        );
                    }
                }
            }
        }
    }

    /// Checks a constructor pattern against an enum scrutinee.
    fn check_variant_pattern(
        &mut self,
        pattern: &'a Pattern,
        scrutinee: TypeId,
        enum_name: Option<Symbol>,
        variant: Symbol,
        elements: Option<&'a [Pattern]>,
    ) {
        let span = pattern.span();
        let (name, arguments) = match self.arena.get(scrutinee) {
            Type::Enum { name, arguments } => (name, arguments),
            Type::Error => return self.bind_all(pattern),
            _ => {
                self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), span));
                return self.bind_all(pattern);
            }
        };

        if let Some(enum_name) = enum_name {
            if enum_name != name {
                self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), span));
                return self.bind_all(pattern);
            }
        }

        let def = self.definitions.enums.get(&name).cloned();
        let Some(def) = def else { return self.bind_all(pattern) };
        let Some(payload) = def.variants.get(&variant).cloned() else {
            self.emit_err(
                TypeCheckerError::invalid_pattern(self.display(scrutinee), span)
                    .with_note(format!("`{name}` has no variant `{variant}`")),
            );
            return self.bind_all(pattern);
        };

        let map: IndexMap<Symbol, TypeId> = def.generics.iter().copied().zip(arguments.iter().copied()).collect();
        let payload: Vec<TypeId> = payload.iter().map(|type_| self.arena.substitute(*type_, &map)).collect();

        let elements = elements.unwrap_or(&[]);
        let has_rest = elements.iter().any(|element| matches!(element, Pattern::Rest(_)));
        if !has_rest && elements.len() != payload.len() {
            self.emit_err(
                TypeCheckerError::invalid_pattern(self.display(scrutinee), span).with_note(format!(
                    "variant `{variant}` has {} field(s), but the pattern has {}",
                    payload.len(),
                    elements.len()
                )),
            );
        }
        for (element, payload_type) in elements.iter().filter(|e| !matches!(e, Pattern::Rest(_))).zip(payload.iter())
        {
            self.check_pattern(element, *payload_type);
        }
    }

    /// Aligns the subpatterns of a tuple pattern, skipping over one
    /// `..` rest marker.
    fn check_sequence_patterns(
        &mut self,
        subpatterns: &'a [Pattern],
        elements: &[TypeId],
        pattern: &'a Pattern,
        scrutinee: TypeId,
    ) {
        let rest_position = subpatterns.iter().position(|sub| matches!(sub, Pattern::Rest(_)));

        match rest_position {
            None => {
                if subpatterns.len() != elements.len() {
                    self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), pattern.span()));
                    return self.bind_all(pattern);
                }
                for (sub, element) in subpatterns.iter().zip(elements.iter()) {
                    self.check_pattern(sub, *element);
                }
            }
            Some(position) => {
                let before = &subpatterns[..position];
                let after = &subpatterns[position + 1..];
                if before.len() + after.len() > elements.len() {
                    self.emit_err(TypeCheckerError::invalid_pattern(self.display(scrutinee), pattern.span()));
                    return self.bind_all(pattern);
                }
                for (sub, element) in before.iter().zip(elements.iter()) {
                    self.check_pattern(sub, *element);
                }
                for (sub, element) in after.iter().rev().zip(elements.iter().rev()) {
                    self.check_pattern(sub, *element);
                }
            }
        }
    }

    /// Declares every binding in `pattern` at the error type, keeping
    /// arm bodies checkable after a pattern error.
    fn bind_all(&mut self, pattern: &'a Pattern) {
        let error = self.error_type();
        for name in pattern_bindings(pattern) {
            let symbol = VariableSymbol { type_: error, mutable: false, span: pattern.span() };
            let _ = self.scopes.insert(name, symbol);
        }
    }

    fn literal_pattern_type(&mut self, literal: &Literal) -> TypeId {
        match &literal.variant {
            LiteralVariant::Integer(_) => self.arena.int(),
            LiteralVariant::Float(_) => self.arena.primitive(Primitive::Float),
            LiteralVariant::Boolean(_) => self.arena.bool_(),
            LiteralVariant::String(_) => self.arena.primitive(Primitive::String),
            LiteralVariant::Null => self.arena.primitive(Primitive::Nil),
        }
    }

    /// A match is exhaustive iff every inhabitant of the scrutinee type
    /// is covered. Reports one uncovered witness.
    pub(crate) fn check_exhaustiveness(&mut self, scrutinee: TypeId, arms: &[MatchArm], span: vesper_span::Span) {
        let scrutinee = self.unifier.zonk(self.arena, scrutinee);
        if self.arena.is_error(scrutinee) {
            return;
        }

        // Any irrefutable arm covers everything.
        let enum_variants = self.enum_variants_of(scrutinee);
        if arms.iter().any(|arm| self.pattern_is_irrefutable(&arm.pattern, scrutinee)) {
            return;
        }

        let witness: Option<String> = match self.arena.get(scrutinee) {
            Type::Enum { name, .. } => {
                let Some(variants) = enum_variants else { return };
                let mut covered: IndexSet<Symbol> = IndexSet::new();
                for arm in arms {
                    self.collect_covered_variants(&arm.pattern, &name, &variants, &mut covered);
                }
                variants
                    .iter()
                    .find(|(variant, _)| !covered.contains(*variant))
                    .map(|(variant, _)| variant.to_string())
            }
            Type::Primitive(Primitive::Bool) => {
                let mut covered_true = false;
                let mut covered_false = false;
                for arm in arms {
                    collect_covered_booleans(&arm.pattern, &mut covered_true, &mut covered_false);
                }
                match (covered_true, covered_false) {
                    (true, true) => None,
                    (_, false) => Some("false".into()),
                    (false, _) => Some("true".into()),
                }
            }
            // Integers, strings, and everything else require a wildcard
            // or binding arm to cover the rest.
            _ => Some("_".into()),
        };

        if let Some(witness) = witness {
            self.emit_err(
                TypeCheckerError::non_exhaustive_match(self.display(scrutinee), span)
                    .with_note(format!("pattern `{witness}` not covered")),
            );
        }
    }

    /// Emits a warning for every arm dominated by the arms before it.
    pub(crate) fn check_reachability(&mut self, scrutinee: TypeId, arms: &[MatchArm]) {
        let scrutinee = self.unifier.zonk(self.arena, scrutinee);
        let variants = self.enum_variants_of(scrutinee);

        let mut saw_irrefutable = false;
        let mut covered: IndexSet<Symbol> = IndexSet::new();

        for arm in arms {
            if saw_irrefutable {
                self.emit_warning(TypeCheckerWarning::unreachable_arm(arm.span));
                continue;
            }

            // A unit-variant arm whose constructor was already covered
            // can never be reached.
            if let (Type::Enum { name, .. }, Some(variants)) = (self.arena.get(scrutinee), variants.as_ref()) {
                let mut this_arm: IndexSet<Symbol> = IndexSet::new();
                self.collect_covered_variants(&arm.pattern, &name, variants, &mut this_arm);
                if !this_arm.is_empty() && this_arm.iter().all(|variant| covered.contains(variant)) {
                    self.emit_warning(TypeCheckerWarning::unreachable_arm(arm.span));
                }
                covered.extend(this_arm);
            }

            if self.pattern_is_irrefutable(&arm.pattern, scrutinee) {
                saw_irrefutable = true;
            }
        }
    }

    fn enum_variants_of(&self, scrutinee: TypeId) -> Option<IndexMap<Symbol, usize>> {
        if let Type::Enum { name, .. } = self.arena.get(scrutinee) {
            let def = self.definitions.enums.get(&name)?;
            return Some(def.variants.iter().map(|(variant, payload)| (*variant, payload.len())).collect());
        }
        None
    }

    /// Is `pattern` irrefutable against this scrutinee? Extends the
    /// syntactic check with enum knowledge: a bare identifier naming a
    /// variant is a constructor, not a catch-all binding.
    fn pattern_is_irrefutable(&self, pattern: &Pattern, scrutinee: TypeId) -> bool {
        match pattern {
            Pattern::Wildcard(_) => true,
            Pattern::Identifier(identifier) => {
                if let Type::Enum { name, .. } = self.arena.get(scrutinee) {
                    let is_variant = self
                        .definitions
                        .enums
                        .get(&name)
                        .map(|def| def.variants.contains_key(&identifier.identifier.name))
                        .unwrap_or(false);
                    return !is_variant;
                }
                true
            }
            Pattern::Paren(paren) => self.pattern_is_irrefutable(&paren.inner, scrutinee),
            Pattern::Or(or) => or.alternatives.iter().any(|alt| self.pattern_is_irrefutable(alt, scrutinee)),
            Pattern::Tuple(tuple) => match self.arena.get(scrutinee) {
                Type::Tuple { elements } => tuple
                    .elements
                    .iter()
                    .filter(|sub| !matches!(sub, Pattern::Rest(_)))
                    .zip(elements.iter())
                    .all(|(sub, element)| self.pattern_is_irrefutable(sub, *element)),
                _ => pattern.is_irrefutable(),
            },
            _ => false,
        }
    }

    /// Collects the variants the pattern covers completely (payloads
    /// matched irrefutably).
    fn collect_covered_variants(
        &self,
        pattern: &Pattern,
        enum_name: &Symbol,
        variants: &IndexMap<Symbol, usize>,
        covered: &mut IndexSet<Symbol>,
    ) {
        match pattern {
            Pattern::Identifier(identifier) => {
                // A bare name matching a unit variant covers it.
                if variants.get(&identifier.identifier.name) == Some(&0) {
                    covered.insert(identifier.identifier.name);
                }
            }
            Pattern::Variant(variant) => {
                if variant.enum_.name != *enum_name {
                    return;
                }
                let irrefutable_payload = variant
                    .elements
                    .as_ref()
                    .map(|elements| elements.iter().all(Pattern::is_irrefutable))
                    .unwrap_or(true);
                if irrefutable_payload && variants.contains_key(&variant.variant.name) {
                    covered.insert(variant.variant.name);
                }
            }
            Pattern::TupleStruct(tuple_struct) => {
                if variants.contains_key(&tuple_struct.name.name)
                    && tuple_struct.elements.iter().all(Pattern::is_irrefutable)
                {
                    covered.insert(tuple_struct.name.name);
                }
            }
            Pattern::Paren(paren) => self.collect_covered_variants(&paren.inner, enum_name, variants, covered),
            Pattern::Or(or) => {
                for alternative in &or.alternatives {
                    self.collect_covered_variants(alternative, enum_name, variants, covered);
                }
            }
            _ => {}
        }
    }
}

/// The names bound by a pattern, in source order.
fn pattern_bindings(pattern: &Pattern) -> IndexSet<Symbol> {
    fn walk(pattern: &Pattern, names: &mut IndexSet<Symbol>) {
        match pattern {
            Pattern::Identifier(identifier) => {
                names.insert(identifier.identifier.name);
            }
            Pattern::Paren(paren) => walk(&paren.inner, names),
            Pattern::Reference(reference) => walk(&reference.inner, names),
            Pattern::Tuple(tuple) => tuple.elements.iter().for_each(|sub| walk(sub, names)),
            Pattern::TupleStruct(tuple_struct) => tuple_struct.elements.iter().for_each(|sub| walk(sub, names)),
            Pattern::Slice(slice) => slice.elements.iter().for_each(|sub| walk(sub, names)),
            Pattern::Variant(variant) => {
                if let Some(elements) = &variant.elements {
                    elements.iter().for_each(|sub| walk(sub, names));
                }
            }
            Pattern::Struct(struct_) => {
                for field in &struct_.fields {
                    match &field.pattern {
                        Some(sub) => walk(sub, names),
                        None => {
                            names.insert(field.identifier.name);
                        }
                    }
                }
            }
            Pattern::Or(or) => or.alternatives.iter().for_each(|sub| walk(sub, names)),
            _ => {}
        }
    }

    let mut names = IndexSet::new();
    walk(pattern, &mut names);
    names
}
