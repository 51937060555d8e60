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

use crate::type_model::{Row, TraitRef, TypeId};
use crate::type_checker::checker::{ConstDef, EnumDef, FunctionSig, ImplDef, StructDef, TraitDef, TypeChecker};
use crate::{SymbolTable, VariableSymbol};

use vesper_ast::*;
use vesper_errors::TypeCheckerError;
use vesper_span::{Span, Symbol};

use indexmap::IndexMap;

impl<'a> TypeChecker<'a> {
    /// Runs the remaining checker passes over the file: header
    /// elaboration, trait/impl registration, and body checking.
    pub fn check_file(&mut self, file: &'a File) {
        self.elaborate_headers(file);
        self.register_impls(file);
        self.check_bodies(file);
        // Downstream consumers never see loose inference variables.
        self.type_table.zonk_all(self.arena, &self.unifier);
    }

    /// Header elaboration: lowers every declaration's signature into
    /// the type model. Bodies stay untouched.
    fn elaborate_headers(&mut self, file: &'a File) {
        // Aliases lower on demand, so collect their declarations first.
        for declaration in &file.declarations {
            if let Declaration::TypeAlias(alias) = declaration {
                self.alias_decls.insert(alias.identifier.name, alias);
            }
        }

        for declaration in &file.declarations {
            match declaration {
                Declaration::Struct(struct_) => self.elaborate_struct(struct_),
                Declaration::Enum(enum_) => self.elaborate_enum(enum_),
                Declaration::Trait(trait_) => self.elaborate_trait(trait_),
                Declaration::Function(function) => {
                    let sig = self.lower_function_header(
                        &function.generics,
                        &function.parameters,
                        &function.output,
                        &function.effects,
                        &function.where_clause,
                        function.is_unsafe,
                        function.span,
                    );
                    self.definitions.functions.insert(function.identifier.name, sig);
                }
                Declaration::Const(const_) => {
                    let type_ = self.lower_type(&const_.type_);
                    self.definitions
                        .consts
                        .insert(const_.identifier.name, ConstDef { type_, span: const_.span });
                }
                Declaration::TypeAlias(alias) => {
                    // Force the lowering so unknown names surface even
                    // for unused aliases.
                    let arguments: Vec<TypeId> = (0..alias.generics.len()).map(|_| self.error_type()).collect();
                    let _ = self.lower_alias(alias.identifier.name, &arguments, alias.identifier.span);
                }
                Declaration::Impl(_) => {}
            }
        }
    }

    fn elaborate_struct(&mut self, struct_: &StructDecl) {
        let generics: Vec<Symbol> = struct_.generics.iter().map(|param| param.identifier.name).collect();
        let fields = self.scoped_generics(&struct_.generics.clone(), |this| {
            let mut fields = IndexMap::new();
            for field in &struct_.fields {
                let type_ = this.lower_type(&field.type_);
                if fields.insert(field.identifier.name, type_).is_some() {
                    this.emit_err(
                        TypeCheckerError::duplicate_definition(field.identifier.name, field.identifier.span)
                            .with_note(format!("field of `{}`", struct_.identifier.name)),
                    );
                }
            }
            fields
        });

        self.definitions
            .structs
            .insert(struct_.identifier.name, StructDef { generics, fields, span: struct_.span });
    }

    fn elaborate_enum(&mut self, enum_: &EnumDecl) {
        let generics: Vec<Symbol> = enum_.generics.iter().map(|param| param.identifier.name).collect();
        let variants = self.scoped_generics(&enum_.generics.clone(), |this| {
            let mut variants = IndexMap::new();
            for variant in &enum_.variants {
                let payload: Vec<TypeId> = variant.payload.iter().map(|type_| this.lower_type(type_)).collect();
                if variants.insert(variant.identifier.name, payload).is_some() {
                    this.emit_err(
                        TypeCheckerError::duplicate_definition(variant.identifier.name, variant.identifier.span)
                            .with_note(format!("variant of `{}`", enum_.identifier.name)),
                    );
                }
            }
            variants
        });

        self.definitions
            .enums
            .insert(enum_.identifier.name, EnumDef { generics, variants, span: enum_.span });
    }

    fn elaborate_trait(&mut self, trait_: &'a TraitDecl) {
        let generics: Vec<Symbol> = trait_.generics.iter().map(|param| param.identifier.name).collect();

        // Associated-type names are rigid inside the trait's own
        // signatures and default bodies.
        for associated in &trait_.associated_types {
            self.assoc_in_scope.insert(associated.identifier.name);
        }

        let def = self.scoped_generics(&trait_.generics.clone(), |this| {
            let mut methods = IndexMap::new();
            for method in &trait_.methods {
                let sig = this.lower_function_header(
                    &method.generics,
                    &method.parameters,
                    &method.output,
                    &method.effects,
                    &method.where_clause,
                    false,
                    method.span,
                );
                methods.insert(method.identifier.name, sig);
            }

            let mut associated_types = IndexMap::new();
            for associated in &trait_.associated_types {
                let bounds: Vec<TraitRef> =
                    associated.bounds.iter().map(|bound| this.lower_trait_bound(bound)).collect();
                associated_types.insert(associated.identifier.name, bounds);
            }

            TraitDef { generics, methods, associated_types, span: trait_.span }
        });

        for associated in &trait_.associated_types {
            self.assoc_in_scope.shift_remove(&associated.identifier.name);
        }

        self.definitions.traits.insert(trait_.identifier.name, def);
    }

    #[allow(clippy::too_many_arguments)]
    fn lower_function_header(
        &mut self,
        generics: &[GenericParam],
        parameters: &[Param],
        output: &Option<TypeExpression>,
        effects: &Option<EffectRow>,
        where_clause: &[WherePredicate],
        is_unsafe: bool,
        span: Span,
    ) -> FunctionSig {
        self.row_var_scope.clear();

        self.scoped_generics(&generics.to_vec(), |this| {
            let mut type_generics = Vec::new();
            let mut const_generics = Vec::new();
            let mut bounds = Vec::new();
            for param in generics {
                match &param.kind {
                    GenericParamKind::Type { bounds: param_bounds } => {
                        type_generics.push(param.identifier.name);
                        for bound in param_bounds {
                            let trait_ref = this.lower_trait_bound(bound);
                            bounds.push((param.identifier.name, trait_ref));
                        }
                    }
                    GenericParamKind::Const { .. } => const_generics.push(param.identifier.name),
                }
            }

            let lowered_parameters: Vec<TypeId> =
                parameters.iter().map(|parameter| this.lower_type(&parameter.type_)).collect();
            let lowered_output = match output {
                Some(output) => this.lower_type(output),
                None => this.arena.void(),
            };
            let lowered_effects = effects.as_ref().map(|row| this.lower_effect_row(row));

            let mut where_bounds = Vec::new();
            for predicate in where_clause {
                let target = this.lower_type(&predicate.type_);
                for bound in &predicate.bounds {
                    let trait_ref = this.lower_trait_bound(bound);
                    where_bounds.push((target, trait_ref));
                }
            }

            FunctionSig {
                generics: type_generics,
                const_generics,
                bounds,
                where_bounds,
                parameters: lowered_parameters,
                output: lowered_output,
                effects: lowered_effects,
                is_unsafe,
                span,
            }
        })
    }

    /// Trait/impl registration: records each impl entry and checks its
    /// associated-type assignments against the implemented trait.
    fn register_impls(&mut self, file: &'a File) {
        for declaration in &file.declarations {
            let Declaration::Impl(impl_) = declaration else { continue };

            let generics: Vec<Symbol> = impl_.generics.iter().map(|param| param.identifier.name).collect();
            let def = self.scoped_generics(&impl_.generics.clone(), |this| {
                let trait_ = impl_.trait_.as_ref().map(|bound| this.lower_trait_bound(bound));
                let target = this.lower_type(&impl_.target);

                let mut where_bounds = Vec::new();
                for predicate in &impl_.where_clause {
                    let predicate_target = this.lower_type(&predicate.type_);
                    for bound in &predicate.bounds {
                        let trait_ref = this.lower_trait_bound(bound);
                        where_bounds.push((predicate_target, trait_ref));
                    }
                }

                let mut methods = IndexMap::new();
                for method in &impl_.methods {
                    let sig = this.lower_function_header(
                        &method.generics,
                        &method.parameters,
                        &method.output,
                        &method.effects,
                        &method.where_clause,
                        method.is_unsafe,
                        method.span,
                    );
                    methods.insert(method.identifier.name, sig);
                }

                let mut associated_types = IndexMap::new();
                for binding in &impl_.associated_types {
                    let type_ = this.lower_type(&binding.type_);
                    associated_types.insert(binding.identifier.name, type_);
                }

                ImplDef { trait_, target, generics, where_bounds, methods, associated_types, span: impl_.span }
            });

            self.check_associated_types(impl_, &def);
            self.definitions.impls.push(def);
        }
    }

    /// Associated-type assignments are required iff the trait declared them.
    fn check_associated_types(&mut self, impl_: &ImplDecl, def: &ImplDef) {
        let Some(trait_ref) = &def.trait_ else {
            // Inherent impls may not assign associated types.
            for binding in &impl_.associated_types {
                self.emit_err(TypeCheckerError::unknown_associated_type(
                    binding.identifier.name,
                    self.display(def.target),
                    binding.span,
                ));
            }
            return;
        };

        let Some(trait_def) = self.definitions.traits.get(&trait_ref.name).cloned() else {
            let span = impl_.trait_.as_ref().map(|bound| bound.span).unwrap_or(impl_.span);
            self.emit_err(TypeCheckerError::undefined_identifier(trait_ref.name, span));
            return;
        };

        for declared in trait_def.associated_types.keys() {
            if !def.associated_types.contains_key(declared) {
                self.emit_err(
                    TypeCheckerError::missing_associated_type(declared, trait_ref.name, impl_.span)
                        .with_proof_step(
                            format!("`{}` declares the associated type `{declared}`", trait_ref.name),
                            Some(trait_def.span),
                        ),
                );
            }
        }

        for binding in &impl_.associated_types {
            if !trait_def.associated_types.contains_key(&binding.identifier.name) {
                self.emit_err(TypeCheckerError::unknown_associated_type(
                    binding.identifier.name,
                    trait_ref.name,
                    binding.span,
                ));
            }
        }
    }

    /// Body checking: builds a scope chain per function and checks
    /// statements and expressions.
    fn check_bodies(&mut self, file: &'a File) {
        for declaration in &file.declarations {
            match declaration {
                Declaration::Function(function) => {
                    let sig = self.definitions.functions.get(&function.identifier.name).cloned();
                    if let Some(sig) = sig {
                        self.check_function_body(function, &sig, &[]);
                    }
                }
                Declaration::Impl(impl_) => {
                    let impl_def = self
                        .definitions
                        .impls
                        .iter()
                        .find(|def| def.span == impl_.span)
                        .cloned();
                    let Some(impl_def) = impl_def else { continue };
                    for method in &impl_.methods {
                        if let Some(sig) = impl_def.methods.get(&method.identifier.name).cloned() {
                            self.check_function_body(method, &sig, &impl_def.generics);
                        }
                    }
                }
                Declaration::Const(const_) => {
                    let expected = self.definitions.consts.get(&const_.identifier.name).map(|def| def.type_);
                    self.visit_expression(&const_.value, &expected);
                }
                Declaration::Trait(trait_) => {
                    let trait_def = self.definitions.traits.get(&trait_.identifier.name).cloned();
                    let Some(trait_def) = trait_def else { continue };
                    for associated in &trait_.associated_types {
                        self.assoc_in_scope.insert(associated.identifier.name);
                    }
                    for method in &trait_.methods {
                        let (Some(body), Some(sig)) = (&method.body, trait_def.methods.get(&method.identifier.name))
                        else {
                            continue;
                        };
                        let sig = sig.clone();
                        self.scoped_generics(&trait_.generics.clone(), |this| {
                            this.check_body_with_sig(&method.parameters, body, &sig);
                        });
                    }
                    for associated in &trait_.associated_types {
                        self.assoc_in_scope.shift_remove(&associated.identifier.name);
                    }
                }
                Declaration::Struct(_) | Declaration::Enum(_) | Declaration::TypeAlias(_) => {}
            }
        }
    }

    fn check_function_body(&mut self, function: &'a Function, sig: &FunctionSig, outer_generics: &[Symbol]) {
        for name in outer_generics {
            self.generics_in_scope.insert(*name);
        }
        self.check_body_with_sig(&function.parameters, &function.block, sig);
        for name in outer_generics {
            self.generics_in_scope.shift_remove(name);
        }
    }

    /// The common body-checking driver for functions, methods, and
    /// trait default bodies.
    pub(crate) fn check_body_with_sig(&mut self, parameters: &'a [Param], block: &'a Block, sig: &FunctionSig) {
        // Fresh per-body state.
        self.scopes = SymbolTable::new();
        self.borrows.clear();
        self.return_type = Some(sig.output);
        self.declared_effects = sig.effects.clone();
        self.unsafe_depth = usize::from(sig.is_unsafe);
        let saved_bounds = self.bounds_in_scope.len();
        self.bounds_in_scope.extend(sig.bounds.iter().cloned());

        // The signature's generic parameters are rigid in the body.
        let mut added_types = Vec::new();
        for generic in &sig.generics {
            if self.generics_in_scope.insert(*generic) {
                added_types.push(*generic);
            }
        }
        let mut added_consts = Vec::new();
        for generic in &sig.const_generics {
            if self.const_generics_in_scope.insert(*generic) {
                added_consts.push(*generic);
            }
        }

        // Bind the value parameters.
        for (parameter, type_) in parameters.iter().zip(sig.parameters.iter()) {
            let symbol = VariableSymbol { type_: *type_, mutable: false, span: parameter.identifier.span };
            if let Err(original) = self.scopes.insert(parameter.identifier.name, symbol) {
                self.emit_err(
                    TypeCheckerError::duplicate_definition(parameter.identifier.name, parameter.identifier.span)
                        .with_proof_step("the parameter was first declared here", Some(original)),
                );
            }
        }

        // The body's tail expression is the function's value.
        for statement in &block.statements {
            self.visit_statement(statement);
        }
        match &block.tail {
            Some(tail) => {
                self.visit_expression(tail, &Some(sig.output));
            }
            None => {}
        }

        for generic in added_types {
            self.generics_in_scope.shift_remove(&generic);
        }
        for generic in added_consts {
            self.const_generics_in_scope.shift_remove(&generic);
        }
        self.bounds_in_scope.truncate(saved_bounds);
        self.return_type = None;
        self.declared_effects = None;
        self.unsafe_depth = 0;
    }

    /// Checks that the callee's effects fit the enclosing declared row.
    pub(crate) fn propagate_effects(&mut self, callee_effects: &Option<Row>, span: Span) {
        let Some(callee_row) = callee_effects else { return };
        let Some(declared) = self.declared_effects.clone() else { return };

        let declared = self.unifier.resolve_row(&declared);
        let callee_row = self.unifier.resolve_row(callee_row);
        for effect in &callee_row.effects {
            if !declared.contains(*effect) && declared.rest.is_none() {
                self.emit_err(
                    TypeCheckerError::effect_not_declared(effect, span).with_proof_step(
                        format!("the callee's effect row mentions `{effect}`"),
                        None,
                    ),
                );
            }
        }
    }
}
