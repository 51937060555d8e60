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

use crate::type_model::{Primitive, Row, Type, TypeId};
use crate::type_checker::checker::{FunctionSig, TypeChecker};
use crate::{ModuleSymbolKind, VariableSymbol};

use vesper_ast::*;
use vesper_errors::TypeCheckerError;
use vesper_span::{sym, Span, Symbol};

use indexmap::IndexMap;

/// What a `::` path callee resolved to.
pub(crate) enum PathCallee {
    /// `Enum::Variant` or `Enum[Args]::Variant`.
    EnumVariant {
        enum_: Symbol,
        arguments: Option<Vec<TypeId>>,
        variant: Symbol,
    },
    /// The channel constructor `Channel::new[T]`.
    ChannelNew { element: Option<TypeId> },
    /// A method on an impl target, `Type::method`.
    TypeMethod { target: TypeId, method: Symbol },
}

impl<'a> ExpressionVisitor<'a> for TypeChecker<'a> {
    type AdditionalInput = Option<TypeId>;
    type Output = Option<TypeId>;

    /// Checks one expression against the expected type, if any, and
    /// records the result in the expression-to-type table.
    fn visit_expression(&mut self, input: &'a Expression, expected: &Self::AdditionalInput) -> Self::Output {
        let type_ = match input {
            Expression::Access(access) => self.check_access(access, expected),
            Expression::Array(array) => self.check_array(array, expected),
            Expression::Assign(assign) => self.check_assign(assign, expected),
            Expression::Binary(binary) => self.check_binary(binary, expected),
            Expression::Block(block) => self.check_block(block, expected),
            Expression::Call(call) => self.check_call(call, expected),
            Expression::Cast(cast) => self.check_cast(cast, expected),
            Expression::Closure(closure) => self.check_closure(closure, expected),
            Expression::Err(_) => self.error_type(),
            Expression::Identifier(identifier) => self.check_identifier(identifier, expected),
            Expression::If(if_) => self.check_if(if_, expected),
            Expression::Literal(literal) => self.check_literal(literal, expected),
            Expression::Map(map) => self.check_map(map, expected),
            Expression::Match(match_) => self.check_match(match_, expected),
            Expression::Range(range) => self.check_range(range, expected),
            Expression::Record(record) => self.check_record(record, expected),
            Expression::Send(send) => self.check_send(send, expected),
            Expression::Struct(struct_) => self.check_struct_literal(struct_, expected),
            Expression::Tuple(tuple) => self.check_tuple(tuple, expected),
            Expression::Unary(unary) => self.check_unary(unary, expected),
            Expression::Unsafe(unsafe_) => self.check_unsafe(unsafe_, expected),
        };

        self.type_table.insert(input.id(), type_);
        Some(type_)
    }
}

impl<'a> TypeChecker<'a> {
    fn expect_subexpression(&mut self, input: &'a Expression, expected: &Option<TypeId>) -> TypeId {
        self.visit_expression(input, expected).unwrap_or_else(|| self.error_type())
    }

    fn check_literal(&mut self, literal: &Literal, expected: &Option<TypeId>) -> TypeId {
        let actual = match &literal.variant {
            LiteralVariant::Integer(_) => {
                // Integer literals adopt an expected integer kind.
                if let Some(expected) = expected {
                    if let Type::Primitive(primitive) = self.arena.get(self.unifier.zonk(self.arena, *expected)) {
                        if primitive.is_integer() {
                            return self.arena.primitive(primitive);
                        }
                    }
                }
                self.arena.int()
            }
            LiteralVariant::Float(_) => self.arena.primitive(Primitive::Float),
            LiteralVariant::Boolean(_) => self.arena.bool_(),
            LiteralVariant::String(_) => self.arena.primitive(Primitive::String),
            LiteralVariant::Null => {
                // `null` inhabits every optional type.
                if let Some(expected) = expected {
                    if let Type::Optional { .. } = self.arena.get(self.unifier.zonk(self.arena, *expected)) {
                        return *expected;
                    }
                }
                self.arena.primitive(Primitive::Nil)
            }
        };
        self.assert_expected(actual, expected, literal.span)
    }

    fn check_identifier(&mut self, identifier: &Identifier, expected: &Option<TypeId>) -> TypeId {
        if let Some(symbol) = self.scopes.lookup(&identifier.name).copied() {
            return self.assert_expected(symbol.type_, expected, identifier.span);
        }

        match self.module_table.kind(&identifier.name) {
            Some(ModuleSymbolKind::Function) => {
                let sig = self.definitions.functions.get(&identifier.name).cloned();
                let Some(sig) = sig else { return self.error_type() };
                let (parameters, output, _) = self.instantiate_sig(&sig);
                let effects = sig.effects.clone().unwrap_or_default();
                let type_ = self.arena.intern(Type::Function { parameters, output, effects });
                self.assert_expected(type_, expected, identifier.span)
            }
            Some(ModuleSymbolKind::Const) => {
                let type_ = self
                    .definitions
                    .consts
                    .get(&identifier.name)
                    .map(|def| def.type_)
                    .unwrap_or_else(|| self.error_type());
                self.assert_expected(type_, expected, identifier.span)
            }
            Some(ModuleSymbolKind::Struct) | Some(ModuleSymbolKind::Enum) | Some(ModuleSymbolKind::Trait)
            | Some(ModuleSymbolKind::TypeAlias) => {
                self.emit_err(TypeCheckerError::not_a_value(identifier.name, identifier.span));
                self.error_type()
            }
            None => {
                self.emit_err(TypeCheckerError::undefined_identifier(identifier.name, identifier.span));
                self.error_type()
            }
        }
    }

    fn check_unary(&mut self, unary: &'a UnaryExpression, expected: &Option<TypeId>) -> TypeId {
        let span = unary.span;
        let actual = match unary.op {
            UnaryOperation::Negate => {
                let operand = self.expect_subexpression(&unary.receiver, expected);
                self.assert_numeric(operand, "negation", span)
            }
            UnaryOperation::Not => {
                let bool_ = self.arena.bool_();
                self.expect_subexpression(&unary.receiver, &Some(bool_));
                bool_
            }
            UnaryOperation::Deref => {
                let operand = self.expect_subexpression(&unary.receiver, &None);
                self.check_deref(operand, span)
            }
            UnaryOperation::Ref | UnaryOperation::RefMut => {
                let mutable = unary.op == UnaryOperation::RefMut;
                return self.check_borrow(unary, mutable, expected);
            }
            UnaryOperation::Recv => {
                let operand = self.expect_subexpression(&unary.receiver, &None);
                self.check_receive(operand, span)
            }
            UnaryOperation::Try => {
                let operand = self.expect_subexpression(&unary.receiver, &None);
                match self.arena.get(self.unifier.zonk(self.arena, operand)) {
                    Type::Optional { element } => element,
                    Type::Error => self.error_type(),
                    _ => {
                        self.emit_err(TypeCheckerError::invalid_operation("`?`", self.display(operand), span));
                        self.error_type()
                    }
                }
            }
        };
        self.assert_expected(actual, expected, span)
    }

    fn check_deref(&mut self, operand: TypeId, span: Span) -> TypeId {
        match self.arena.get(self.unifier.zonk(self.arena, operand)) {
            Type::Reference { element, .. } => element,
            Type::Pointer { element } => {
                // Raw-pointer dereference demands an unsafe scope.
                if self.unsafe_depth == 0 {
                    self.emit_err(TypeCheckerError::unsafe_required("dereferencing a raw pointer", span));
                }
                element
            }
            Type::Error => self.error_type(),
            _ => {
                self.emit_err(TypeCheckerError::invalid_operation("dereference", self.display(operand), span));
                self.error_type()
            }
        }
    }

    fn check_receive(&mut self, operand: TypeId, span: Span) -> TypeId {
        match self.arena.get(self.unifier.zonk(self.arena, operand)) {
            Type::Channel { element, direction } => {
                if direction == ChannelDirection::Send {
                    self.emit_err(TypeCheckerError::invalid_operation(
                        "receiving from a send-only channel",
                        self.display(operand),
                        span,
                    ));
                }
                element
            }
            Type::Error => self.error_type(),
            _ => {
                self.emit_err(TypeCheckerError::invalid_operation("`<-`", self.display(operand), span));
                self.error_type()
            }
        }
    }

    /// `&x` produces `&T`; `&mut x` produces `&mut T` and requires a
    /// mutable binding. Borrows of bindings are recorded for the
    /// conflict check.
    fn check_borrow(&mut self, unary: &'a UnaryExpression, mutable: bool, expected: &Option<TypeId>) -> TypeId {
        let element = self.expect_subexpression(&unary.receiver, &None);

        if let Expression::Identifier(identifier) = &*unary.receiver {
            if let Some(symbol) = self.scopes.lookup(&identifier.name).copied() {
                if mutable && !symbol.mutable {
                    self.emit_err(
                        TypeCheckerError::cannot_assign_immutable(identifier.name, unary.span)
                            .with_proof_step("a mutable borrow requires a mutable binding", Some(symbol.span)),
                    );
                }
                self.record_borrow(identifier.name, mutable, unary.span);
            }
        }

        let actual = self.arena.intern(Type::Reference { element, mutable });
        self.assert_expected(actual, expected, unary.span)
    }

    fn assert_numeric(&mut self, operand: TypeId, operation: &str, span: Span) -> TypeId {
        match self.arena.get(self.unifier.zonk(self.arena, operand)) {
            Type::Primitive(primitive) if primitive.is_numeric() => operand,
            Type::Error | Type::Var(_) | Type::Param(_) => operand,
            _ => {
                self.emit_err(TypeCheckerError::invalid_operation(operation, self.display(operand), span));
                self.error_type()
            }
        }
    }

    fn check_binary(&mut self, binary: &'a BinaryExpression, expected: &Option<TypeId>) -> TypeId {
        let span = binary.span;
        let actual = if binary.op.is_logical() {
            let bool_ = self.arena.bool_();
            self.expect_subexpression(&binary.left, &Some(bool_));
            self.expect_subexpression(&binary.right, &Some(bool_));
            bool_
        } else if binary.op.is_comparison() {
            let left = self.expect_subexpression(&binary.left, &None);
            self.expect_subexpression(&binary.right, &Some(left));
            if !matches!(binary.op, BinaryOperation::Eq | BinaryOperation::Neq) {
                // Ordering comparisons want numbers or strings.
                match self.arena.get(self.unifier.zonk(self.arena, left)) {
                    Type::Primitive(primitive) if primitive.is_numeric() || primitive == Primitive::String => {}
                    Type::Error | Type::Var(_) | Type::Param(_) => {}
                    _ => {
                        self.emit_err(TypeCheckerError::invalid_operation(
                            format!("`{}`", binary.op),
                            self.display(left),
                            span,
                        ));
                    }
                }
            }
            self.arena.bool_()
        } else {
            // Arithmetic.
            let operand_expected = expected.filter(|expected| {
                matches!(
                    self.arena.get(self.unifier.zonk(self.arena, *expected)),
                    Type::Primitive(primitive) if primitive.is_numeric()
                )
            });
            let left = self.expect_subexpression(&binary.left, &operand_expected);
            self.expect_subexpression(&binary.right, &Some(left));
            self.assert_numeric(left, &format!("`{}`", binary.op), span)
        };
        self.assert_expected(actual, expected, span)
    }

    fn check_assign(&mut self, assign: &'a AssignExpression, expected: &Option<TypeId>) -> TypeId {
        let place_type = self.check_place(&assign.place);
        self.expect_subexpression(&assign.value, &Some(place_type));
        self.assert_expected(self.arena.void(), expected, assign.span)
    }

    /// Checks the target of an assignment and returns the type a value
    /// must have to be stored there.
    fn check_place(&mut self, place: &'a Expression) -> TypeId {
        match place {
            Expression::Identifier(identifier) => {
                let symbol = self.scopes.lookup(&identifier.name).copied();
                match symbol {
                    Some(symbol) => {
                        if !symbol.mutable {
                            self.emit_err(
                                TypeCheckerError::cannot_assign_immutable(identifier.name, identifier.span)
                                    .with_secondary_label(symbol.span, "declared here"),
                            );
                        }
                        // Record the place's type for the table as well.
                        self.type_table.insert(identifier.id, symbol.type_);
                        symbol.type_
                    }
                    None => {
                        self.emit_err(TypeCheckerError::undefined_identifier(identifier.name, identifier.span));
                        self.error_type()
                    }
                }
            }
            Expression::Access(AccessExpression::Member(_)) | Expression::Access(AccessExpression::Index(_)) => {
                self.expect_subexpression(place, &None)
            }
            Expression::Unary(unary) if unary.op == UnaryOperation::Deref => {
                let receiver = self.expect_subexpression(&unary.receiver, &None);
                let element = match self.arena.get(self.unifier.zonk(self.arena, receiver)) {
                    Type::Reference { element, mutable: true } => element,
                    Type::Reference { element, mutable: false } => {
                        self.emit_err(
                            TypeCheckerError::invalid_assign_target(unary.span)
                                .with_note("assignment through `&` requires `&mut`"),
                        );
                        element
                    }
                    Type::Pointer { element } => {
                        if self.unsafe_depth == 0 {
                            self.emit_err(TypeCheckerError::unsafe_required(
                                "assignment through a raw pointer",
                                unary.span,
                            ));
                        }
                        element
                    }
                    Type::Error => self.error_type(),
                    _ => {
                        self.emit_err(TypeCheckerError::invalid_assign_target(unary.span));
                        self.error_type()
                    }
                };
                self.type_table.insert(unary.id, element);
                element
            }
            other => {
                self.emit_err(TypeCheckerError::invalid_assign_target(other.span()));
                self.expect_subexpression(other, &None);
                self.error_type()
            }
        }
    }

    fn check_access(&mut self, access: &'a AccessExpression, expected: &Option<TypeId>) -> TypeId {
        match access {
            AccessExpression::Member(member) => self.check_member_access(member, expected),
            AccessExpression::Index(index) => self.check_index_access(index, expected),
            AccessExpression::Static(static_) => self.check_static_access(static_, expected),
        }
    }

    fn check_member_access(&mut self, member: &'a MemberAccess, expected: &Option<TypeId>) -> TypeId {
        let inner = self.expect_subexpression(&member.inner, &None);
        let mut current = self.unifier.zonk(self.arena, inner);

        // References auto-deref for field access.
        while let Type::Reference { element, .. } = self.arena.get(current) {
            current = element;
        }

        let actual = match self.arena.get(current) {
            Type::Struct { name, arguments } => {
                let def = self.definitions.structs.get(&name).cloned();
                match def {
                    Some(def) => match def.fields.get(&member.name.name) {
                        Some(field) => {
                            let map: IndexMap<Symbol, TypeId> =
                                def.generics.iter().copied().zip(arguments.iter().copied()).collect();
                            self.arena.substitute(*field, &map)
                        }
                        None => {
                            self.emit_err(TypeCheckerError::unknown_field(
                                member.name.name,
                                self.display(current),
                                member.name.span,
                            ));
                            self.error_type()
                        }
                    },
                    None => self.error_type(),
                }
            }
            Type::Record { fields, .. } => match fields.iter().find(|(name, _)| *name == member.name.name) {
                Some((_, type_)) => *type_,
                None => {
                    self.emit_err(TypeCheckerError::unknown_field(
                        member.name.name,
                        self.display(current),
                        member.name.span,
                    ));
                    self.error_type()
                }
            },
            Type::Tuple { elements } => match member.name.name.as_str().parse::<usize>().ok() {
                Some(index) if index < elements.len() => elements[index],
                _ => {
                    self.emit_err(TypeCheckerError::unknown_field(
                        member.name.name,
                        self.display(current),
                        member.name.span,
                    ));
                    self.error_type()
                }
            },
            Type::Error => self.error_type(),
            _ => {
                self.emit_err(TypeCheckerError::unknown_field(
                    member.name.name,
                    self.display(current),
                    member.name.span,
                ));
                self.error_type()
            }
        };
        self.assert_expected(actual, expected, member.span)
    }

    fn check_index_access(&mut self, index: &'a IndexAccess, expected: &Option<TypeId>) -> TypeId {
        // `Name[Args]` in expression position is a generic type
        // reference, not an index; it only makes sense under `::` or a
        // struct literal, both handled elsewhere.
        if let Expression::Identifier(identifier) = &*index.inner {
            if self.scopes.lookup(&identifier.name).is_none()
                && matches!(
                    self.module_table.kind(&identifier.name),
                    Some(ModuleSymbolKind::Struct) | Some(ModuleSymbolKind::Enum)
                )
            {
                self.emit_err(TypeCheckerError::not_a_value(identifier.name, index.span));
                return self.error_type();
            }
        }

        let inner = self.expect_subexpression(&index.inner, &None);
        let int = self.arena.int();

        let actual = match self.arena.get(self.unifier.zonk(self.arena, inner)) {
            Type::Array { element, .. } | Type::Slice { element } => {
                let mut sliced = false;
                for index_expression in &index.indices {
                    if matches!(index_expression, Expression::Range(_)) {
                        self.expect_subexpression(index_expression, &None);
                        sliced = true;
                    } else {
                        self.expect_subexpression(index_expression, &Some(int));
                    }
                }
                if sliced { self.arena.intern(Type::Slice { element }) } else { element }
            }
            Type::Map { key, value } => {
                for index_expression in &index.indices {
                    self.expect_subexpression(index_expression, &Some(key));
                }
                value
            }
            Type::Error => {
                for index_expression in &index.indices {
                    self.expect_subexpression(index_expression, &None);
                }
                self.error_type()
            }
            _ => {
                for index_expression in &index.indices {
                    self.expect_subexpression(index_expression, &None);
                }
                self.emit_err(TypeCheckerError::invalid_operation("indexing", self.display(inner), index.span));
                self.error_type()
            }
        };
        self.assert_expected(actual, expected, index.span)
    }

    /// Interprets the indices of an index access as generic arguments,
    /// when every index names a type or is a const literal.
    pub(crate) fn as_type_arguments(&mut self, indices: &[Expression]) -> Option<Vec<TypeId>> {
        let mut arguments = Vec::with_capacity(indices.len());
        for index in indices {
            match index {
                Expression::Identifier(identifier) if self.scopes.lookup(&identifier.name).is_none() => {
                    if Self::primitive_from_symbol(identifier.name).is_some()
                        || self.generics_in_scope.contains(&identifier.name)
                        || matches!(
                            self.module_table.kind(&identifier.name),
                            Some(ModuleSymbolKind::Struct)
                                | Some(ModuleSymbolKind::Enum)
                                | Some(ModuleSymbolKind::TypeAlias)
                        )
                    {
                        let named = TypeExpression::Named(NamedType {
                            name: *identifier,
                            span: identifier.span,
                            id: identifier.id,
                        });
                        let lowered = self.lower_type(&named);
                        self.type_table.insert(identifier.id, lowered);
                        arguments.push(lowered);
                        continue;
                    }
                    return None;
                }
                Expression::Literal(literal @ Literal { variant: LiteralVariant::Integer(_), .. }) => {
                    let lowered = self.eval_const_expression(index);
                    self.type_table.insert(literal.id, lowered);
                    arguments.push(lowered);
                }
                _ => return None,
            }
        }
        Some(arguments)
    }

    /// Resolves a `::` path rooted at a type name, if the expression is
    /// one. Returns `None` for ordinary value-level accesses.
    pub(crate) fn resolve_path(&mut self, expression: &Expression) -> Option<PathCallee> {
        let Expression::Access(AccessExpression::Static(static_)) = expression else { return None };
        self.resolve_static(static_)
    }

    /// Resolves the `Base::name` form itself.
    pub(crate) fn resolve_static(&mut self, static_: &StaticAccess) -> Option<PathCallee> {
        // The base: a bare type name, or a generic application.
        let (base_name, arguments) = match &*static_.inner {
            Expression::Identifier(identifier) => (identifier, None),
            Expression::Access(AccessExpression::Index(index)) => {
                let Expression::Identifier(identifier) = &*index.inner else { return None };
                let arguments = self.as_type_arguments(&index.indices)?;
                (identifier, Some(arguments))
            }
            _ => return None,
        };

        // Local bindings shadow type names.
        if self.scopes.lookup(&base_name.name).is_some() {
            return None;
        }

        if base_name.name == sym::Channel && static_.name.name == sym::new {
            let element = arguments.and_then(|arguments| arguments.first().copied());
            return Some(PathCallee::ChannelNew { element });
        }

        match self.module_table.kind(&base_name.name)? {
            ModuleSymbolKind::Enum => {
                // A name that is not a variant resolves as a method on
                // the enum's impls.
                let is_variant = self
                    .definitions
                    .enums
                    .get(&base_name.name)
                    .map(|def| def.variants.contains_key(&static_.name.name))
                    .unwrap_or(true);
                if is_variant {
                    return Some(PathCallee::EnumVariant {
                        enum_: base_name.name,
                        arguments,
                        variant: static_.name.name,
                    });
                }
                let def = self.definitions.enums.get(&base_name.name).cloned()?;
                let arguments = match arguments {
                    Some(arguments) => arguments,
                    None => def.generics.iter().map(|_| self.unifier.fresh_var(self.arena)).collect(),
                };
                let target = self.arena.intern(Type::Enum { name: base_name.name, arguments });
                Some(PathCallee::TypeMethod { target, method: static_.name.name })
            }
            ModuleSymbolKind::Struct => {
                let def = self.definitions.structs.get(&base_name.name).cloned()?;
                let arguments = match arguments {
                    Some(arguments) => arguments,
                    None => def.generics.iter().map(|_| self.unifier.fresh_var(self.arena)).collect(),
                };
                let target = self.arena.intern(Type::Struct { name: base_name.name, arguments });
                Some(PathCallee::TypeMethod { target, method: static_.name.name })
            }
            _ => None,
        }
    }

    /// Instantiates an enum variant reference: the enum's type at the
    /// given (or fresh) arguments plus the variant's payload types.
    fn instantiate_variant(
        &mut self,
        enum_: Symbol,
        arguments: Option<Vec<TypeId>>,
        variant: Symbol,
        span: Span,
    ) -> Option<(TypeId, Vec<TypeId>)> {
        let def = self.definitions.enums.get(&enum_).cloned()?;

        let arguments = match arguments {
            Some(arguments) => {
                if arguments.len() != def.generics.len() {
                    self.emit_err(TypeCheckerError::invalid_generic_args(
                        enum_,
                        def.generics.len(),
                        arguments.len(),
                        span,
                    ));
                    return None;
                }
                arguments
            }
            None => def.generics.iter().map(|_| self.unifier.fresh_var(self.arena)).collect(),
        };

        let Some(payload) = def.variants.get(&variant) else {
            self.emit_err(
                TypeCheckerError::undefined_identifier(format!("{enum_}::{variant}"), span)
                    .with_note(format!("`{enum_}` has no variant `{variant}`")),
            );
            return None;
        };

        let map: IndexMap<Symbol, TypeId> = def.generics.iter().copied().zip(arguments.iter().copied()).collect();
        let payload = payload.iter().map(|type_| self.arena.substitute(*type_, &map)).collect();
        let enum_type = self.arena.intern(Type::Enum { name: enum_, arguments });
        Some((enum_type, payload))
    }

    fn check_static_access(&mut self, static_: &'a StaticAccess, expected: &Option<TypeId>) -> TypeId {
        let path = self.resolve_static(static_);
        let Some(path) = path else {
            // Not a type path: `::` on a value has no meaning.
            let inner = self.expect_subexpression(&static_.inner, &None);
            if !self.arena.is_error(inner) {
                self.emit_err(TypeCheckerError::invalid_operation("`::`", self.display(inner), static_.span));
            }
            return self.error_type();
        };

        let actual = match path {
            PathCallee::EnumVariant { enum_, arguments, variant } => {
                match self.instantiate_variant(enum_, arguments, variant, static_.span) {
                    Some((enum_type, payload)) if payload.is_empty() => enum_type,
                    Some((enum_type, payload)) => self.arena.intern(Type::Function {
                        parameters: payload,
                        output: enum_type,
                        effects: Row::empty(),
                    }),
                    None => self.error_type(),
                }
            }
            PathCallee::ChannelNew { .. } => {
                self.emit_err(TypeCheckerError::not_a_value("Channel::new", static_.span));
                self.error_type()
            }
            PathCallee::TypeMethod { target, method } => match self.find_method(target, method) {
                Some(sig) => {
                    let (parameters, output, _) = self.instantiate_sig(&sig);
                    let effects = sig.effects.clone().unwrap_or_default();
                    self.arena.intern(Type::Function { parameters, output, effects })
                }
                None => {
                    self.emit_err(TypeCheckerError::unknown_field(method, self.display(target), static_.span));
                    self.error_type()
                }
            },
        };
        self.record_path_types(&static_.inner, actual);
        self.assert_expected(actual, expected, static_.span)
    }

    /// Assigns `type_` to every node along a type path, so the
    /// expression-to-type table stays total over the AST.
    fn record_path_types(&mut self, expression: &Expression, type_: TypeId) {
        self.type_table.insert(expression.id(), type_);
        match expression {
            Expression::Access(AccessExpression::Static(static_)) => {
                self.record_path_types(&static_.inner, type_);
            }
            Expression::Access(AccessExpression::Index(index)) => {
                self.record_path_types(&index.inner, type_);
            }
            _ => {}
        }
    }

    fn check_call(&mut self, call: &'a CallExpression, expected: &Option<TypeId>) -> TypeId {
        let span = call.span;

        // `Channel::new[T](capacity?)`, with the generic argument list
        // parsed as an index on the path.
        let channel_callee = match &*call.function {
            Expression::Access(AccessExpression::Index(index)) => match self.resolve_path(&index.inner) {
                Some(PathCallee::ChannelNew { .. }) => {
                    let element = self.as_type_arguments(&index.indices).and_then(|args| args.first().copied());
                    Some(element)
                }
                _ => None,
            },
            expression => match self.resolve_path(expression) {
                Some(PathCallee::ChannelNew { element }) => Some(element),
                _ => None,
            },
        };
        if let Some(element) = channel_callee {
            let result = self.check_channel_new(call, element, expected);
            self.record_path_types(&call.function, result);
            return result;
        }

        // A direct call of a module-level function resolves its generics
        // at this call site and discharges the declared bounds.
        if let Expression::Identifier(identifier) = &*call.function {
            if self.scopes.lookup(&identifier.name).is_none()
                && self.module_table.kind(&identifier.name) == Some(ModuleSymbolKind::Function)
            {
                let sig = self.definitions.functions.get(&identifier.name).cloned();
                if let Some(sig) = sig {
                    let result = self.check_sig_call(call, &sig, span, expected);
                    // The callee node gets its instantiated type too.
                    let effects = sig.effects.clone().unwrap_or_default();
                    let callee_type = self.arena.intern(Type::Function {
                        parameters: sig.parameters.clone(),
                        output: sig.output,
                        effects,
                    });
                    self.type_table.insert(call.function.id(), callee_type);
                    return result;
                }
            }
        }

        // Calls through a `::` path: enum constructors and methods.
        if let Some(path) = self.resolve_path(&call.function) {
            let result = match path {
                PathCallee::EnumVariant { enum_, arguments, variant } => {
                    match self.instantiate_variant(enum_, arguments, variant, span) {
                        Some((enum_type, payload)) => {
                            self.check_argument_list(call, &payload, span);
                            self.assert_expected(enum_type, expected, span)
                        }
                        None => self.error_type(),
                    }
                }
                PathCallee::ChannelNew { element } => return self.check_channel_new(call, element, expected),
                PathCallee::TypeMethod { target, method } => match self.find_method(target, method) {
                    Some(sig) => self.check_sig_call(call, &sig, span, expected),
                    None => {
                        self.emit_err(TypeCheckerError::unknown_field(method, self.display(target), span));
                        self.error_type()
                    }
                },
            };
            self.record_path_types(&call.function, result);
            return result;
        }

        // Everything else: the callee is a first-class function value.
        let callee = self.expect_subexpression(&call.function, &None);
        match self.arena.get(self.unifier.zonk(self.arena, callee)) {
            Type::Function { parameters, output, effects } => {
                self.check_argument_list(call, &parameters, span);
                self.propagate_effects(&Some(effects), span);
                self.assert_expected(output, expected, span)
            }
            Type::Error => {
                for argument in &call.arguments {
                    self.expect_subexpression(argument, &None);
                }
                self.error_type()
            }
            _ => {
                self.emit_err(TypeCheckerError::not_callable(self.display(callee), span));
                for argument in &call.arguments {
                    self.expect_subexpression(argument, &None);
                }
                self.error_type()
            }
        }
    }

    /// Checks a call against an instantiated signature, discharging the
    /// signature's trait bounds at the solved instantiation.
    fn check_sig_call(
        &mut self,
        call: &'a CallExpression,
        sig: &FunctionSig,
        span: Span,
        expected: &Option<TypeId>,
    ) -> TypeId {
        let (parameters, output, map) = self.instantiate_sig(sig);
        self.check_argument_list(call, &parameters, span);

        // An unsafe callee demands an unsafe scope.
        if sig.is_unsafe && self.unsafe_depth == 0 {
            self.emit_err(TypeCheckerError::unsafe_required("calling an `unsafe` function", span));
        }

        // Discharge `T: Tr` for the instantiation chosen above.
        for (param, bound) in &sig.bounds {
            let Some(instantiated) = map.get(param).copied() else { continue };
            let target = self.unifier.zonk(self.arena, instantiated);
            if !self.bound_holds(target, bound, 0) {
                self.emit_err(
                    TypeCheckerError::constraint_not_satisfied(self.display(target), bound.name, span)
                        .with_proof_step(format!("because `{param}` must satisfy `{}`", bound.name), Some(sig.span))
                        .with_proof_step(
                            format!("and `{param}` was instantiated to `{}` here", self.display(target)),
                            Some(span),
                        ),
                );
            }
        }
        for (target, bound) in &sig.where_bounds {
            let target = self.arena.substitute(*target, &map);
            let target = self.unifier.zonk(self.arena, target);
            if !self.bound_holds(target, bound, 0) {
                self.emit_err(
                    TypeCheckerError::constraint_not_satisfied(self.display(target), bound.name, span)
                        .with_proof_step("required by this `where` clause", Some(sig.span)),
                );
            }
        }

        self.propagate_effects(&sig.effects, span);
        self.assert_expected(output, expected, span)
    }

    fn check_argument_list(&mut self, call: &'a CallExpression, parameters: &[TypeId], span: Span) {
        if call.arguments.len() != parameters.len() {
            self.emit_err(TypeCheckerError::wrong_argument_count(parameters.len(), call.arguments.len(), span));
        }
        for (argument, parameter) in call.arguments.iter().zip(parameters.iter()) {
            self.expect_subexpression(argument, &Some(*parameter));
        }
        for argument in call.arguments.iter().skip(parameters.len()) {
            self.expect_subexpression(argument, &None);
        }
    }

    /// `Channel::new[T](capacity?)` yields a bidirectional channel of `T`.
    fn check_channel_new(
        &mut self,
        call: &'a CallExpression,
        element: Option<TypeId>,
        expected: &Option<TypeId>,
    ) -> TypeId {
        let element = element.unwrap_or_else(|| {
            // Infer the element from the expected channel type, if any.
            if let Some(expected) = expected {
                if let Type::Channel { element, .. } = self.arena.get(self.unifier.zonk(self.arena, *expected)) {
                    return element;
                }
            }
            self.unifier.fresh_var(self.arena)
        });

        if call.arguments.len() > 1 {
            self.emit_err(TypeCheckerError::wrong_argument_count(1, call.arguments.len(), call.span));
        }
        let int = self.arena.int();
        for argument in &call.arguments {
            self.expect_subexpression(argument, &Some(int));
        }

        let actual = self.arena.intern(Type::Channel { element, direction: ChannelDirection::Both });
        self.assert_expected(actual, expected, call.span)
    }

    /// Struct literals may omit explicit generic arguments; fields
    /// drive the inference, and conflicting or undetermined parameters
    /// are reported against the offending field.
    fn check_struct_literal(&mut self, struct_: &'a StructExpression, expected: &Option<TypeId>) -> TypeId {
        let Some(def) = self.definitions.structs.get(&struct_.name.name).cloned() else {
            self.emit_err(TypeCheckerError::undefined_identifier(struct_.name.name, struct_.name.span));
            for member in &struct_.members {
                if let Some(expression) = &member.expression {
                    self.expect_subexpression(expression, &None);
                }
            }
            return self.error_type();
        };

        // Explicit arguments pin the parameters; otherwise every
        // parameter starts as a fresh inference variable.
        let explicit: Option<Vec<TypeId>> = if struct_.type_arguments.is_empty() {
            None
        } else {
            let lowered: Vec<TypeId> =
                struct_.type_arguments.iter().map(|argument| self.lower_type_argument(argument)).collect();
            if lowered.len() != def.generics.len() {
                self.emit_err(TypeCheckerError::invalid_generic_args(
                    struct_.name.name,
                    def.generics.len(),
                    lowered.len(),
                    struct_.span,
                ));
                return self.error_type();
            }
            Some(lowered)
        };

        let arguments: Vec<TypeId> = match &explicit {
            Some(arguments) => arguments.clone(),
            None => def.generics.iter().map(|_| self.unifier.fresh_var(self.arena)).collect(),
        };
        let map: IndexMap<Symbol, TypeId> = def.generics.iter().copied().zip(arguments.iter().copied()).collect();

        // Tracks, per parameter, the first field that bound it.
        let mut bound_at: IndexMap<Symbol, (Symbol, Span, String)> = IndexMap::new();

        let mut seen = IndexMap::new();
        for member in &struct_.members {
            let Some(declared) = def.fields.get(&member.identifier.name).copied() else {
                self.emit_err(TypeCheckerError::unknown_field(
                    member.identifier.name,
                    struct_.name.name,
                    member.identifier.span,
                ));
                if let Some(expression) = &member.expression {
                    self.expect_subexpression(expression, &None);
                }
                continue;
            };
            if seen.insert(member.identifier.name, member.span).is_some() {
                self.emit_err(TypeCheckerError::duplicate_definition(member.identifier.name, member.identifier.span));
                continue;
            }

            let field_expected = self.arena.substitute(declared, &map);
            let (actual, value_span) = match &member.expression {
                Some(expression) => (self.expect_subexpression(expression, &None), expression.span()),
                // Shorthand `name` pulls a binding of the same name.
                None => {
                    let identifier = Identifier {
                        name: member.identifier.name,
                        span: member.identifier.span,
                        id: member.id,
                    };
                    (self.check_identifier(&identifier, &None), member.identifier.span)
                }
            };

            if self.unifier.unify(self.arena, field_expected, actual).is_err() {
                let mut diagnostic = TypeCheckerError::type_mismatch(
                    self.display(field_expected),
                    self.display(actual),
                    value_span,
                )
                .with_proof_step(
                    format!(
                        "field `{}` requires `{}`, but the initializer has type `{}`",
                        member.identifier.name,
                        self.display(field_expected),
                        self.display(actual),
                    ),
                    Some(value_span),
                );
                // Point at the inference that pinned the parameter.
                for (param, (first_field, first_span, first_type)) in &bound_at {
                    diagnostic = diagnostic
                        .with_secondary_label(*first_span, format!("first inferred `{param} = {first_type}` here"))
                        .with_proof_step(
                            format!("because field `{first_field}` inferred `{param} = {first_type}` here"),
                            Some(*first_span),
                        );
                }
                self.emit_err(diagnostic);
                continue;
            }

            // Remember which parameters this field just determined.
            for (param, argument) in def.generics.iter().zip(arguments.iter()) {
                if bound_at.contains_key(param) {
                    continue;
                }
                let resolved = self.unifier.zonk(self.arena, *argument);
                if !matches!(self.arena.get(resolved), Type::Var(_)) {
                    bound_at.insert(
                        *param,
                        (member.identifier.name, value_span, self.arena.display(resolved)),
                    );
                }
            }
        }

        // Every declared field must be initialized.
        for (field, _) in &def.fields {
            if !seen.contains_key(field) {
                self.emit_err(TypeCheckerError::missing_field(field, struct_.name.name, struct_.span));
            }
        }

        // A parameter no field determined cannot be inferred.
        if explicit.is_none() {
            for (param, argument) in def.generics.iter().zip(arguments.iter()) {
                let resolved = self.unifier.zonk(self.arena, *argument);
                if matches!(self.arena.get(resolved), Type::Var(_)) {
                    self.emit_err(
                        TypeCheckerError::type_mismatch(
                            format!("{}[..]", struct_.name.name),
                            "_",
                            struct_.span,
                        )
                        .with_note(format!("cannot infer type parameter {param}")),
                    );
                }
            }
        }

        let arguments = arguments.iter().map(|argument| self.unifier.zonk(self.arena, *argument)).collect();
        let actual = self.arena.intern(Type::Struct { name: struct_.name.name, arguments });
        self.assert_expected(actual, expected, struct_.span)
    }

    fn check_array(&mut self, array: &'a ArrayExpression, expected: &Option<TypeId>) -> TypeId {
        // The element type: an explicit annotation, the expected
        // element, or a fresh variable.
        let element = array
            .element_type
            .as_ref()
            .map(|type_| self.lower_type(type_))
            .or_else(|| match expected {
                Some(expected) => match self.arena.get(self.unifier.zonk(self.arena, *expected)) {
                    Type::Array { element, .. } | Type::Slice { element } => Some(element),
                    _ => None,
                },
                None => None,
            })
            .unwrap_or_else(|| self.unifier.fresh_var(self.arena));

        let actual = match &array.kind {
            ArrayLiteralKind::List(elements) => {
                for value in elements {
                    self.expect_subexpression(value, &Some(element));
                }
                let size = self.arena.intern(Type::ConstInt(elements.len() as i64));
                self.arena.intern(Type::Array { element, size })
            }
            ArrayLiteralKind::Repeat { value, count } => {
                self.expect_subexpression(value, &Some(element));
                let int = self.arena.int();
                self.expect_subexpression(count, &Some(int));
                let size = self.eval_const_expression(count);
                self.arena.intern(Type::Array { element, size })
            }
        };
        self.assert_expected(actual, expected, array.span)
    }

    fn check_tuple(&mut self, tuple: &'a TupleExpression, expected: &Option<TypeId>) -> TypeId {
        if tuple.elements.is_empty() {
            return self.assert_expected(self.arena.void(), expected, tuple.span);
        }

        // Decompose the expected tuple, if any, to drive the elements.
        let expected_elements: Option<Vec<TypeId>> = match expected {
            Some(expected) => match self.arena.get(self.unifier.zonk(self.arena, *expected)) {
                Type::Tuple { elements } if elements.len() == tuple.elements.len() => Some(elements),
                _ => None,
            },
            None => None,
        };

        let elements: Vec<TypeId> = tuple
            .elements
            .iter()
            .enumerate()
            .map(|(index, element)| {
                let element_expected = expected_elements.as_ref().map(|elements| elements[index]);
                self.expect_subexpression(element, &element_expected)
            })
            .collect();

        let actual = self.arena.intern(Type::Tuple { elements });
        self.assert_expected(actual, expected, tuple.span)
    }

    fn check_map(&mut self, map: &'a MapExpression, expected: &Option<TypeId>) -> TypeId {
        let (key, value) = match expected {
            Some(expected) => match self.arena.get(self.unifier.zonk(self.arena, *expected)) {
                Type::Map { key, value } => (key, value),
                _ => (self.unifier.fresh_var(self.arena), self.unifier.fresh_var(self.arena)),
            },
            None => (self.unifier.fresh_var(self.arena), self.unifier.fresh_var(self.arena)),
        };

        for entry in &map.entries {
            self.expect_subexpression(&entry.key, &Some(key));
            self.expect_subexpression(&entry.value, &Some(value));
        }

        let actual = self.arena.intern(Type::Map { key, value });
        self.assert_expected(actual, expected, map.span)
    }

    fn check_record(&mut self, record: &'a RecordExpression, expected: &Option<TypeId>) -> TypeId {
        let mut fields: Vec<(Symbol, TypeId)> = record
            .members
            .iter()
            .map(|member| (member.identifier.name, self.expect_subexpression(&member.expression, &None)))
            .collect();
        fields.sort_by_key(|(name, _)| name.as_str());

        let actual = self.arena.intern(Type::Record { fields, rest: None });
        self.assert_expected(actual, expected, record.span)
    }

    /// Checks a block in expression position; the tail expression is
    /// the block's value, and a tailless block is unit-valued.
    pub(crate) fn check_block(&mut self, block: &'a Block, expected: &Option<TypeId>) -> TypeId {
        self.scopes.enter_scope();
        for statement in &block.statements {
            self.visit_statement(statement);
        }
        let value = match &block.tail {
            Some(tail) => self.expect_subexpression(tail, expected),
            None => {
                let void = self.arena.void();
                self.assert_expected(void, expected, block.span)
            }
        };
        self.scopes.exit_scope();
        self.release_borrows();
        value
    }

    fn check_if(&mut self, if_: &'a IfExpression, expected: &Option<TypeId>) -> TypeId {
        let bool_ = self.arena.bool_();
        self.expect_subexpression(&if_.condition, &Some(bool_));

        let then = self.check_block(&if_.then, expected);
        match &if_.otherwise {
            Some(otherwise) => {
                self.expect_subexpression(otherwise, &Some(then));
                then
            }
            None => {
                // Without an `else` the expression cannot produce a value.
                let void = self.arena.void();
                if self.unifier.unify(self.arena, then, void).is_err() {
                    self.emit_err(
                        TypeCheckerError::type_mismatch("void", self.display(then), if_.then.span)
                            .with_note("an `if` without `else` is unit-valued"),
                    );
                }
                void
            }
        }
    }

    fn check_match(&mut self, match_: &'a MatchExpression, expected: &Option<TypeId>) -> TypeId {
        let scrutinee = self.expect_subexpression(&match_.scrutinee, &None);
        let scrutinee = self.unifier.zonk(self.arena, scrutinee);

        let mut arm_type: Option<TypeId> = *expected;
        for arm in &match_.arms {
            self.scopes.enter_scope();
            self.check_pattern(&arm.pattern, scrutinee);
            let body = self.expect_subexpression(&arm.body, &arm_type);
            if arm_type.is_none() {
                arm_type = Some(body);
            }
            self.scopes.exit_scope();
            self.release_borrows();
        }

        self.check_exhaustiveness(scrutinee, &match_.arms, match_.span);
        self.check_reachability(scrutinee, &match_.arms);

        arm_type.unwrap_or_else(|| self.arena.void())
    }

    fn check_closure(&mut self, closure: &'a FunctionLiteral, expected: &Option<TypeId>) -> TypeId {
        let parameters: Vec<TypeId> =
            closure.parameters.iter().map(|parameter| self.lower_type(&parameter.type_)).collect();
        let output = match &closure.output {
            Some(output) => self.lower_type(output),
            None => self.arena.void(),
        };

        // The closure body checks like a small function body, in the
        // enclosing environment.
        let saved_return = self.return_type.replace(output);
        self.scopes.enter_scope();
        for (parameter, type_) in closure.parameters.iter().zip(parameters.iter()) {
            let symbol = VariableSymbol { type_: *type_, mutable: false, span: parameter.identifier.span };
            if let Err(original) = self.scopes.insert(parameter.identifier.name, symbol) {
                self.emit_err(
                    TypeCheckerError::duplicate_definition(parameter.identifier.name, parameter.identifier.span)
                        .with_proof_step("the parameter was first declared here", Some(original)),
                );
            }
        }
        for statement in &closure.body.statements {
            self.visit_statement(statement);
        }
        if let Some(tail) = &closure.body.tail {
            self.expect_subexpression(tail, &Some(output));
        }
        self.scopes.exit_scope();
        self.release_borrows();
        self.return_type = saved_return;

        let actual = self.arena.intern(Type::Function { parameters, output, effects: Row::empty() });
        self.assert_expected(actual, expected, closure.span)
    }

    fn check_cast(&mut self, cast: &'a CastExpression, expected: &Option<TypeId>) -> TypeId {
        let source = self.expect_subexpression(&cast.expression, &None);
        let target = self.lower_type(&cast.type_);

        let source_resolved = self.unifier.zonk(self.arena, source);
        let permitted = match (self.arena.get(source_resolved), self.arena.get(target)) {
            (Type::Error, _) | (_, Type::Error) => true,
            (Type::Primitive(from), Type::Primitive(to)) => from.is_numeric() && to.is_numeric(),
            (from, to) => from == to,
        };
        if !permitted {
            self.emit_err(TypeCheckerError::invalid_operation(
                format!("casting `{}` to", self.display(source)),
                self.display(target),
                cast.span,
            ));
        }

        self.assert_expected(target, expected, cast.span)
    }

    fn check_range(&mut self, range: &'a RangeExpression, expected: &Option<TypeId>) -> TypeId {
        let element = self.arena.int();
        if let Some(start) = &range.start {
            self.expect_subexpression(start, &Some(element));
        }
        if let Some(stop) = &range.stop {
            self.expect_subexpression(stop, &Some(element));
        }
        let actual = self.arena.intern(Type::Range { element });
        self.assert_expected(actual, expected, range.span)
    }

    /// `ch <- v` requires a send-capable channel; the send is unit-valued.
    pub(crate) fn check_send(&mut self, send: &'a SendExpression, expected: &Option<TypeId>) -> TypeId {
        let channel = self.expect_subexpression(&send.channel, &None);
        match self.arena.get(self.unifier.zonk(self.arena, channel)) {
            Type::Channel { element, direction } => {
                if direction == ChannelDirection::Recv {
                    self.emit_err(TypeCheckerError::invalid_operation(
                        "sending on a receive-only channel",
                        self.display(channel),
                        send.span,
                    ));
                }
                self.expect_subexpression(&send.value, &Some(element));
            }
            Type::Error => {
                self.expect_subexpression(&send.value, &None);
            }
            _ => {
                self.emit_err(TypeCheckerError::invalid_operation("`<-`", self.display(channel), send.span));
                self.expect_subexpression(&send.value, &None);
            }
        }
        self.assert_expected(self.arena.void(), expected, send.span)
    }

    fn check_unsafe(&mut self, unsafe_: &'a UnsafeExpression, expected: &Option<TypeId>) -> TypeId {
        self.unsafe_depth += 1;
        let value = self.check_block(&unsafe_.block, expected);
        self.unsafe_depth -= 1;
        value
    }
}
