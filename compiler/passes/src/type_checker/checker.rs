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

use crate::type_model::{Primitive, Row, TraitRef, Type, TypeArena, TypeId, Unifier};
use crate::{ModuleSymbolKind, ModuleTable, SymbolTable, TypeTable};

use vesper_ast::*;
use vesper_errors::{emitter::Handler, Diagnostic, TypeCheckerError};
use vesper_span::{sym, Span, Symbol};

use indexmap::{IndexMap, IndexSet};

/// How deep the recursive `where`-clause resolution may go before the
/// checker gives up on a bound.
pub(crate) const MAX_BOUND_DEPTH: usize = 8;

/// A lowered function signature, shared by free functions, impl
/// methods, and trait methods.
#[derive(Clone, Debug)]
pub struct FunctionSig {
    /// Type parameter names, in declaration order.
    pub generics: Vec<Symbol>,
    /// Const generic parameter names.
    pub const_generics: Vec<Symbol>,
    /// Bounds declared on the type parameters, `(param, trait)`.
    pub bounds: Vec<(Symbol, TraitRef)>,
    /// Bounds declared in the `where` clause, `(type, trait)`.
    pub where_bounds: Vec<(TypeId, TraitRef)>,
    pub parameters: Vec<TypeId>,
    pub output: TypeId,
    /// The declared effect row; `None` means the signature makes no claim.
    pub effects: Option<Row>,
    pub is_unsafe: bool,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct StructDef {
    pub generics: Vec<Symbol>,
    pub fields: IndexMap<Symbol, TypeId>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct EnumDef {
    pub generics: Vec<Symbol>,
    pub variants: IndexMap<Symbol, Vec<TypeId>>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct TraitDef {
    pub generics: Vec<Symbol>,
    pub methods: IndexMap<Symbol, FunctionSig>,
    /// Declared associated types and their bounds.
    pub associated_types: IndexMap<Symbol, Vec<TraitRef>>,
    pub span: Span,
}

/// One registered impl. Inherent impls have `trait_ == None` and are
/// looked up under a pseudo-trait key of their own.
#[derive(Clone, Debug)]
pub struct ImplDef {
    pub trait_: Option<TraitRef>,
    pub target: TypeId,
    pub generics: Vec<Symbol>,
    pub where_bounds: Vec<(TypeId, TraitRef)>,
    pub methods: IndexMap<Symbol, FunctionSig>,
    pub associated_types: IndexMap<Symbol, TypeId>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct ConstDef {
    pub type_: TypeId,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct AliasDef {
    pub generics: Vec<Symbol>,
    pub aliased: TypeId,
    pub span: Span,
}

/// Everything the header-elaboration and impl-registration passes
/// produce: the lowered view of all top-level declarations.
#[derive(Debug, Default)]
pub struct Definitions {
    pub structs: IndexMap<Symbol, StructDef>,
    pub enums: IndexMap<Symbol, EnumDef>,
    pub traits: IndexMap<Symbol, TraitDef>,
    pub functions: IndexMap<Symbol, FunctionSig>,
    pub consts: IndexMap<Symbol, ConstDef>,
    pub aliases: IndexMap<Symbol, AliasDef>,
    pub impls: Vec<ImplDef>,
}

/// One recorded borrow of a binding.
#[derive(Copy, Clone, Debug)]
pub struct BorrowRecord {
    pub span: Span,
    pub mutable: bool,
    /// The scope depth the borrow was taken at; borrows die with their scope.
    pub depth: usize,
    /// The opaque lifetime identity of this borrow site.
    pub lifetime: u32,
}

/// The type checker: performs name resolution, inference, bound
/// checking, reference and mutability checking, and pattern analysis.
pub struct TypeChecker<'a> {
    pub(crate) handler: &'a Handler,
    pub(crate) arena: &'a TypeArena,
    pub(crate) type_table: &'a TypeTable,
    pub(crate) module_table: ModuleTable,
    pub(crate) definitions: Definitions,
    pub(crate) unifier: Unifier,
    /// The scope chain of the function body being checked.
    pub(crate) scopes: SymbolTable,

    // Per-item context.
    pub(crate) return_type: Option<TypeId>,
    pub(crate) declared_effects: Option<Row>,
    pub(crate) unsafe_depth: usize,
    pub(crate) generics_in_scope: IndexSet<Symbol>,
    pub(crate) const_generics_in_scope: IndexSet<Symbol>,
    pub(crate) bounds_in_scope: Vec<(Symbol, TraitRef)>,
    /// Associated-type names treated as rigid while checking trait
    /// default bodies.
    pub(crate) assoc_in_scope: IndexSet<Symbol>,
    /// Row variables named in the current signature.
    pub(crate) row_var_scope: IndexMap<Symbol, u32>,
    /// Outstanding borrows per binding.
    pub(crate) borrows: IndexMap<Symbol, Vec<BorrowRecord>>,
    pub(crate) next_lifetime: u32,
    /// Alias declarations, for on-demand lowering with a cycle guard.
    pub(crate) alias_decls: IndexMap<Symbol, &'a TypeAliasDecl>,
    pub(crate) aliases_in_progress: IndexSet<Symbol>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(
        handler: &'a Handler,
        arena: &'a TypeArena,
        type_table: &'a TypeTable,
        module_table: ModuleTable,
    ) -> Self {
        Self {
            handler,
            arena,
            type_table,
            module_table,
            definitions: Definitions::default(),
            unifier: Unifier::new(),
            scopes: SymbolTable::new(),
            return_type: None,
            declared_effects: None,
            unsafe_depth: 0,
            generics_in_scope: IndexSet::new(),
            const_generics_in_scope: IndexSet::new(),
            bounds_in_scope: Vec::new(),
            assoc_in_scope: IndexSet::new(),
            row_var_scope: IndexMap::new(),
            borrows: IndexMap::new(),
            next_lifetime: 0,
            alias_decls: IndexMap::new(),
            aliases_in_progress: IndexSet::new(),
        }
    }

    /// Emits a type checker error.
    pub(crate) fn emit_err(&self, err: Diagnostic) {
        self.handler.emit_err(err);
    }

    /// Emits a type checker warning.
    pub(crate) fn emit_warning(&self, warning: Diagnostic) {
        self.handler.emit_warning(warning);
    }

    /// Renders a type for a diagnostic, with variables resolved.
    pub(crate) fn display(&self, id: TypeId) -> String {
        self.arena.display(self.unifier.zonk(self.arena, id))
    }

    pub(crate) fn error_type(&self) -> TypeId {
        self.arena.error()
    }

    /// Unifies `actual` against the expected type, if any. On a
    /// mismatch a diagnostic is emitted and the error sentinel comes
    /// back, so cascades stay quiet.
    pub(crate) fn assert_expected(&mut self, actual: TypeId, expected: &Option<TypeId>, span: Span) -> TypeId {
        if let Some(expected) = expected {
            if self.unifier.unify(self.arena, actual, *expected).is_err() {
                self.emit_err(TypeCheckerError::type_mismatch(
                    self.display(*expected),
                    self.display(actual),
                    span,
                ));
                return self.error_type();
            }
        }
        actual
    }

    /// Runs `f` with the given generic parameters (and their bounds)
    /// pushed into scope.
    pub(crate) fn scoped_generics<R>(&mut self, params: &[GenericParam], f: impl FnOnce(&mut Self) -> R) -> R {
        let mut added_types = Vec::new();
        let mut added_consts = Vec::new();
        let mut added_bounds = 0usize;

        // All names enter scope before any bound lowers, so bounds may
        // reference parameters declared later in the same list.
        for param in params {
            match &param.kind {
                GenericParamKind::Type { .. } => {
                    if self.generics_in_scope.insert(param.identifier.name) {
                        added_types.push(param.identifier.name);
                    }
                }
                GenericParamKind::Const { .. } => {
                    if self.const_generics_in_scope.insert(param.identifier.name) {
                        added_consts.push(param.identifier.name);
                    }
                }
            }
        }
        for param in params {
            if let GenericParamKind::Type { bounds } = &param.kind {
                for bound in bounds {
                    let trait_ref = self.lower_trait_bound(bound);
                    self.bounds_in_scope.push((param.identifier.name, trait_ref));
                    added_bounds += 1;
                }
            }
        }

        let result = f(self);

        for name in added_types {
            self.generics_in_scope.shift_remove(&name);
        }
        for name in added_consts {
            self.const_generics_in_scope.shift_remove(&name);
        }
        for _ in 0..added_bounds {
            self.bounds_in_scope.pop();
        }

        result
    }

    /// Maps a primitive type name to its model type.
    pub(crate) fn primitive_from_symbol(name: Symbol) -> Option<Primitive> {
        Some(match name {
            _ if name == sym::int => Primitive::Int,
            _ if name == sym::int8 => Primitive::Int8,
            _ if name == sym::int32 => Primitive::Int32,
            _ if name == sym::int64 => Primitive::Int64,
            _ if name == sym::float => Primitive::Float,
            _ if name == sym::bool => Primitive::Bool,
            _ if name == sym::string => Primitive::String,
            _ if name == sym::void => Primitive::Void,
            _ => return None,
        })
    }

    /// Lowers a source type expression into the type model.
    /// Unknown names produce a diagnostic and the error sentinel.
    pub(crate) fn lower_type(&mut self, type_: &TypeExpression) -> TypeId {
        match type_ {
            TypeExpression::Named(named) => self.lower_named_type(&named.name, &[], named.span),
            TypeExpression::Generic(generic) => {
                let arguments = generic.arguments.clone();
                self.lower_named_type(&generic.base, &arguments, generic.span)
            }
            TypeExpression::Pointer(pointer) => {
                let element = self.lower_type(&pointer.element);
                self.arena.intern(Type::Pointer { element })
            }
            TypeExpression::Reference(reference) => {
                let element = self.lower_type(&reference.element);
                self.arena.intern(Type::Reference { element, mutable: reference.mutable })
            }
            TypeExpression::Optional(optional) => {
                let element = self.lower_type(&optional.element);
                self.arena.intern(Type::Optional { element })
            }
            TypeExpression::Array(array) => {
                let element = self.lower_type(&array.element);
                let size = self.eval_const_expression(&array.size);
                self.arena.intern(Type::Array { element, size })
            }
            TypeExpression::Slice(slice) => {
                let element = self.lower_type(&slice.element);
                self.arena.intern(Type::Slice { element })
            }
            TypeExpression::Tuple(tuple) => {
                if tuple.elements.is_empty() {
                    return self.arena.void();
                }
                let elements = tuple.elements.iter().map(|element| self.lower_type(element)).collect();
                self.arena.intern(Type::Tuple { elements })
            }
            TypeExpression::Record(record) => {
                let mut fields: Vec<(Symbol, TypeId)> = record
                    .fields
                    .iter()
                    .map(|field| (field.identifier.name, self.lower_type(&field.type_)))
                    .collect();
                fields.sort_by_key(|(name, _)| name.as_str());
                let rest = record.rest.as_ref().map(|rest| self.row_var_for(rest.name));
                self.arena.intern(Type::Record { fields, rest })
            }
            TypeExpression::Channel(channel) => {
                let element = self.lower_type(&channel.element);
                self.arena.intern(Type::Channel { element, direction: channel.direction })
            }
            TypeExpression::Function(function) => {
                let lowered = self.scoped_generics(&function.generics.clone(), |this| {
                    let parameters: Vec<TypeId> =
                        function.parameters.iter().map(|parameter| this.lower_type(parameter)).collect();
                    let output = match &function.output {
                        Some(output) => this.lower_type(output),
                        None => this.arena.void(),
                    };
                    let effects = match &function.effects {
                        Some(row) => this.lower_effect_row(row),
                        None => Row::empty(),
                    };
                    Type::Function { parameters, output, effects }
                });
                self.arena.intern(lowered)
            }
            TypeExpression::Forall(forall) => {
                // The model has no binder; the parameters become rigid
                // inside the body.
                self.scoped_generics(&forall.params.clone(), |this| this.lower_type(&forall.body))
            }
            TypeExpression::Existential(existential) => match existential.bounds.first() {
                Some(bound) => {
                    let trait_ref = self.lower_trait_bound(bound);
                    self.arena.intern(Type::TraitObject(trait_ref))
                }
                None => {
                    self.emit_err(TypeCheckerError::not_a_type(&existential.param, existential.span));
                    self.error_type()
                }
            },
            TypeExpression::Projection(projection) => {
                let base = self.lower_type(&projection.base);
                self.lower_projection(base, projection.associated.name, projection.span)
            }
        }
    }

    /// Resolves `Base::Assoc` as far as the base type allows: concrete
    /// bases go through the selected impl, rigid parameters stay as
    /// projection nodes.
    pub(crate) fn lower_projection(&mut self, base: TypeId, associated: Symbol, span: Span) -> TypeId {
        if self.arena.is_error(base) {
            return self.error_type();
        }

        match self.arena.get(base) {
            Type::Param(_) | Type::TraitObject(_) | Type::Var(_) => {
                self.arena.intern(Type::Projection { base, associated })
            }
            _ => match self.find_associated_type(base, associated) {
                Some(resolved) => resolved,
                None => {
                    self.emit_err(TypeCheckerError::unknown_associated_type(
                        associated,
                        self.display(base),
                        span,
                    ));
                    self.error_type()
                }
            },
        }
    }

    fn lower_named_type(&mut self, name: &Identifier, arguments: &[TypeArgument], span: Span) -> TypeId {
        if arguments.is_empty() {
            if let Some(primitive) = Self::primitive_from_symbol(name.name) {
                return self.arena.primitive(primitive);
            }
            if self.generics_in_scope.contains(&name.name) || self.assoc_in_scope.contains(&name.name) {
                return self.arena.intern(Type::Param(name.name));
            }
        }

        let lowered_arguments: Vec<TypeId> = arguments.iter().map(|argument| self.lower_type_argument(argument)).collect();

        let Some(entry) = self.module_table.get(&name.name).cloned() else {
            self.emit_err(TypeCheckerError::undefined_identifier(name.name, span));
            return self.error_type();
        };

        if entry.arity != lowered_arguments.len()
            && !matches!(entry.kind, ModuleSymbolKind::Trait | ModuleSymbolKind::Function | ModuleSymbolKind::Const)
        {
            self.emit_err(TypeCheckerError::invalid_generic_args(
                name.name,
                entry.arity,
                lowered_arguments.len(),
                span,
            ));
            return self.error_type();
        }

        match entry.kind {
            ModuleSymbolKind::Struct => self.arena.intern(Type::Struct { name: name.name, arguments: lowered_arguments }),
            ModuleSymbolKind::Enum => self.arena.intern(Type::Enum { name: name.name, arguments: lowered_arguments }),
            ModuleSymbolKind::Trait => self
                .arena
                .intern(Type::TraitObject(TraitRef { name: name.name, arguments: lowered_arguments })),
            ModuleSymbolKind::TypeAlias => self.lower_alias(name.name, &lowered_arguments, span),
            ModuleSymbolKind::Function | ModuleSymbolKind::Const => {
                self.emit_err(TypeCheckerError::not_a_type(name.name, span));
                self.error_type()
            }
        }
    }

    /// Expands a type alias at the given arguments, lowering its target
    /// on demand. Cycles are broken with an error sentinel.
    pub(crate) fn lower_alias(&mut self, name: Symbol, arguments: &[TypeId], span: Span) -> TypeId {
        if !self.definitions.aliases.contains_key(&name) {
            if !self.aliases_in_progress.insert(name) {
                self.emit_err(TypeCheckerError::not_a_type(name, span));
                return self.error_type();
            }
            let Some(decl) = self.alias_decls.get(&name).copied() else {
                self.aliases_in_progress.shift_remove(&name);
                self.emit_err(TypeCheckerError::undefined_identifier(name, span));
                return self.error_type();
            };
            let generics: Vec<Symbol> = decl.generics.iter().map(|param| param.identifier.name).collect();
            let aliased = self.scoped_generics(&decl.generics.clone(), |this| this.lower_type(&decl.type_));
            self.definitions.aliases.insert(name, AliasDef { generics, aliased, span: decl.span });
            self.aliases_in_progress.shift_remove(&name);
        }

        let def = self.definitions.aliases.get(&name).cloned().expect("alias lowered above");
        let map: IndexMap<Symbol, TypeId> = def.generics.iter().copied().zip(arguments.iter().copied()).collect();
        self.arena.substitute(def.aliased, &map)
    }

    pub(crate) fn lower_type_argument(&mut self, argument: &TypeArgument) -> TypeId {
        match argument {
            TypeArgument::Type(type_) => self.lower_type(type_),
            TypeArgument::Const(expression) => self.eval_const_expression(expression),
        }
    }

    /// Evaluates a const expression appearing in type position: integer
    /// literals and const generic parameters. Anything else lowers to
    /// the error sentinel.
    pub(crate) fn eval_const_expression(&mut self, expression: &Expression) -> TypeId {
        match expression {
            Expression::Literal(Literal { variant: LiteralVariant::Integer(raw), .. }) => {
                match parse_int_literal(raw) {
                    Some(value) => self.arena.intern(Type::ConstInt(value)),
                    None => self.error_type(),
                }
            }
            Expression::Unary(unary) if unary.op == UnaryOperation::Negate => {
                match self.arena.get(self.eval_const_expression(&unary.receiver)) {
                    Type::ConstInt(value) => self.arena.intern(Type::ConstInt(-value)),
                    _ => self.error_type(),
                }
            }
            Expression::Identifier(identifier) if self.const_generics_in_scope.contains(&identifier.name) => {
                self.arena.intern(Type::Param(identifier.name))
            }
            _ => self.error_type(),
        }
    }

    pub(crate) fn lower_trait_bound(&mut self, bound: &TraitBound) -> TraitRef {
        let arguments = bound.arguments.iter().map(|argument| self.lower_type_argument(argument)).collect();
        TraitRef { name: bound.name.name, arguments }
    }

    /// Maps a named row variable to its session id, allocating on first use.
    pub(crate) fn row_var_for(&mut self, name: Symbol) -> u32 {
        if let Some(var) = self.row_var_scope.get(&name) {
            return *var;
        }
        let var = self.unifier.fresh_row_var();
        self.row_var_scope.insert(name, var);
        var
    }

    pub(crate) fn lower_effect_row(&mut self, row: &EffectRow) -> Row {
        let effects = row.effects.iter().map(|effect| effect.name).collect();
        let rest = row.rest.as_ref().map(|rest| self.row_var_for(rest.name));
        Row::new(effects, rest)
    }

    /// Instantiates a signature at fresh inference variables, returning
    /// the substitution used.
    pub(crate) fn instantiate_sig(&mut self, sig: &FunctionSig) -> (Vec<TypeId>, TypeId, IndexMap<Symbol, TypeId>) {
        let mut map = IndexMap::new();
        for generic in sig.generics.iter().chain(sig.const_generics.iter()) {
            let var = self.unifier.fresh_var(self.arena);
            map.insert(*generic, var);
        }

        let parameters = sig.parameters.iter().map(|parameter| self.arena.substitute(*parameter, &map)).collect();
        let output = self.arena.substitute(sig.output, &map);
        (parameters, output, map)
    }

    /// Discharges the bound `target: trait_ref`. Returns false (after
    /// emitting nothing) when no impl matches; the caller reports.
    pub(crate) fn bound_holds(&self, target: TypeId, trait_ref: &TraitRef, depth: usize) -> bool {
        if depth > MAX_BOUND_DEPTH {
            return false;
        }

        let target = self.unifier.zonk(self.arena, target);
        match self.arena.get(target) {
            // Errors and unconstrained inference variables satisfy
            // everything; real failures were reported elsewhere.
            Type::Error | Type::Var(_) => return true,
            // A rigid parameter satisfies the bounds it declares.
            Type::Param(name) => {
                return self
                    .bounds_in_scope
                    .iter()
                    .any(|(param, bound)| *param == name && bound.name == trait_ref.name);
            }
            // A trait object satisfies its own trait.
            Type::TraitObject(object) => {
                if object.name == trait_ref.name {
                    return true;
                }
            }
            _ => {}
        }

        self.definitions.impls.iter().any(|impl_| {
            let Some(impl_trait) = &impl_.trait_ else { return false };
            if impl_trait.name != trait_ref.name {
                return false;
            }

            let mut bindings = IndexMap::new();
            if !self.match_scheme(impl_.target, target, &impl_.generics, &mut bindings) {
                return false;
            }

            // The impl applies if its where-predicates recursively resolve.
            impl_.where_bounds.iter().all(|(predicate_target, predicate_bound)| {
                let substituted = self.arena.substitute(*predicate_target, &bindings);
                let bound = TraitRef {
                    name: predicate_bound.name,
                    arguments: predicate_bound
                        .arguments
                        .iter()
                        .map(|argument| self.arena.substitute(*argument, &bindings))
                        .collect(),
                };
                self.bound_holds(substituted, &bound, depth + 1)
            })
        })
    }

    /// Matches the impl scheme `scheme` against the concrete `target`,
    /// binding the impl's generic parameters. Purely structural; the
    /// main unifier is left untouched.
    pub(crate) fn match_scheme(
        &self,
        scheme: TypeId,
        target: TypeId,
        generics: &[Symbol],
        bindings: &mut IndexMap<Symbol, TypeId>,
    ) -> bool {
        let target = self.unifier.zonk(self.arena, target);
        if scheme == target {
            return true;
        }

        let match_all = |this: &Self, left: &[TypeId], right: &[TypeId], bindings: &mut IndexMap<Symbol, TypeId>| {
            left.len() == right.len()
                && left.iter().zip(right.iter()).all(|(l, r)| this.match_scheme(*l, *r, generics, bindings))
        };

        match (self.arena.get(scheme), self.arena.get(target)) {
            (Type::Param(name), _) if generics.contains(&name) => match bindings.get(&name) {
                Some(bound) => *bound == target,
                None => {
                    bindings.insert(name, target);
                    true
                }
            },
            (_, Type::Error) | (Type::Error, _) => true,
            (Type::Struct { name: ln, arguments: la }, Type::Struct { name: rn, arguments: ra }) if ln == rn => {
                match_all(self, &la, &ra, bindings)
            }
            (Type::Enum { name: ln, arguments: la }, Type::Enum { name: rn, arguments: ra }) if ln == rn => {
                match_all(self, &la, &ra, bindings)
            }
            (Type::Slice { element: le }, Type::Slice { element: re })
            | (Type::Pointer { element: le }, Type::Pointer { element: re })
            | (Type::Optional { element: le }, Type::Optional { element: re }) => {
                self.match_scheme(le, re, generics, bindings)
            }
            (Type::Reference { element: le, mutable: lm }, Type::Reference { element: re, mutable: rm })
                if lm == rm =>
            {
                self.match_scheme(le, re, generics, bindings)
            }
            (Type::Array { element: le, size: ls }, Type::Array { element: re, size: rs }) => {
                self.match_scheme(le, re, generics, bindings) && self.match_scheme(ls, rs, generics, bindings)
            }
            (Type::Tuple { elements: le }, Type::Tuple { elements: re }) => match_all(self, &le, &re, bindings),
            _ => false,
        }
    }

    /// Looks up the associated type `associated` on the impl selected
    /// for `target`.
    pub(crate) fn find_associated_type(&self, target: TypeId, associated: Symbol) -> Option<TypeId> {
        for impl_ in &self.definitions.impls {
            let mut bindings = IndexMap::new();
            if !self.match_scheme(impl_.target, target, &impl_.generics, &mut bindings) {
                continue;
            }
            if let Some(assigned) = impl_.associated_types.get(&associated) {
                return Some(self.arena.substitute(*assigned, &bindings));
            }
        }
        None
    }

    /// Finds a method named `method` on an impl whose target matches
    /// `target`, inherent impls first. Returns the signature with the
    /// impl's generic parameters already substituted.
    pub(crate) fn find_method(&self, target: TypeId, method: Symbol) -> Option<FunctionSig> {
        let mut fallback = None;
        for impl_ in &self.definitions.impls {
            let mut bindings = IndexMap::new();
            if !self.match_scheme(impl_.target, target, &impl_.generics, &mut bindings) {
                continue;
            }
            if let Some(sig) = impl_.methods.get(&method) {
                let substituted = self.substitute_sig(sig, &bindings);
                if impl_.trait_.is_none() {
                    return Some(substituted);
                }
                fallback.get_or_insert(substituted);
            }
        }
        fallback
    }

    pub(crate) fn substitute_sig(&self, sig: &FunctionSig, map: &IndexMap<Symbol, TypeId>) -> FunctionSig {
        FunctionSig {
            generics: sig.generics.clone(),
            const_generics: sig.const_generics.clone(),
            bounds: sig.bounds.clone(),
            where_bounds: sig
                .where_bounds
                .iter()
                .map(|(target, bound)| (self.arena.substitute(*target, map), bound.clone()))
                .collect(),
            parameters: sig.parameters.iter().map(|parameter| self.arena.substitute(*parameter, map)).collect(),
            output: self.arena.substitute(sig.output, map),
            effects: sig.effects.clone(),
            is_unsafe: sig.is_unsafe,
            span: sig.span,
        }
    }

    /// Records a borrow of `name` and reports a conflict when a mutable
    /// borrow overlaps any other outstanding borrow of the same binding.
    pub(crate) fn record_borrow(&mut self, name: Symbol, mutable: bool, span: Span) {
        let depth = self.scopes.depth();
        let lifetime = self.next_lifetime;
        self.next_lifetime += 1;

        if let Some(existing) = self
            .borrows
            .get(&name)
            .and_then(|records| records.iter().find(|record| record.mutable || mutable))
        {
            self.emit_err(
                TypeCheckerError::borrow_conflict(name, span)
                    .with_primary_label(if mutable { "mutable borrow here" } else { "borrow here" })
                    .with_secondary_label(
                        existing.span,
                        if existing.mutable { "conflicting mutable borrow here" } else { "conflicting borrow here" },
                    )
                    .with_proof_step(
                        format!("`{name}` was already borrowed in this scope"),
                        Some(existing.span),
                    ),
            );
        }

        self.borrows.entry(name).or_default().push(BorrowRecord { span, mutable, depth, lifetime });
    }

    /// Drops the borrows taken in scopes deeper than the current one.
    pub(crate) fn release_borrows(&mut self) {
        let depth = self.scopes.depth();
        for (_, records) in self.borrows.iter_mut() {
            records.retain(|record| record.depth <= depth);
        }
    }
}

/// Parses a decoded integer literal, honoring `0x`/`0b` prefixes.
pub(crate) fn parse_int_literal(raw: &str) -> Option<i64> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let value = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(binary) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        i64::from_str_radix(binary, 2).ok()?
    } else {
        digits.parse::<i64>().ok()?
    };
    Some(if negative { -value } else { value })
}
