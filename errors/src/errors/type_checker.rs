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

use crate::{Severity, Stage};

use std::fmt::Display;

create_messages!(
    /// Constructors for semantic diagnostics.
    TypeCheckerError,
    stage: Stage::TypeChecker,
    severity: Severity::Error,

    /// For when a name could not be resolved in the current scope chain.
    undefined_identifier {
        args: (name: impl Display),
        code: TypeUndefinedIdentifier,
        msg: format!("cannot find `{name}` in this scope"),
        help: None,
    }

    /// For when a type name appears in value position.
    not_a_value {
        args: (name: impl Display),
        code: TypeInvalidOperation,
        msg: format!("`{name}` is a type, not a value"),
        help: None,
    }

    /// For when a value name appears in type position.
    not_a_type {
        args: (name: impl Display),
        code: TypeUndefinedIdentifier,
        msg: format!("`{name}` is not a type"),
        help: None,
    }

    /// For when a call introduces an effect the enclosing row does not cover.
    effect_not_declared {
        args: (effect: impl Display),
        code: TypeConstraintNotSatisfied,
        msg: format!("effect `{effect}` is not covered by the enclosing effect row"),
        help: None,
    }

    /// For when two types failed to unify.
    type_mismatch {
        args: (expected: impl Display, found: impl Display),
        code: TypeMismatch,
        msg: format!("mismatched types: expected `{expected}`, found `{found}`"),
        help: None,
    }

    /// For when a generic parameter is not determined by any field or argument.
    cannot_infer_type_param {
        args: (param: impl Display),
        code: TypeMismatch,
        msg: format!("type annotations needed for `{param}`"),
        help: None,
    }

    /// For when a name is declared twice at the same scope level.
    duplicate_definition {
        args: (name: impl Display),
        code: TypeCannotAssign,
        msg: format!("`{name}` is defined multiple times in this scope"),
        help: None,
    }

    /// For when the target of an assignment is not a mutable binding.
    cannot_assign_immutable {
        args: (name: impl Display),
        code: TypeCannotAssign,
        msg: format!("cannot assign to `{name}`, a binding declared without `mut`"),
        help: Some(format!("declare the binding as `let mut {name}`")),
    }

    /// For when the target of an assignment is not a place expression.
    invalid_assign_target {
        args: (),
        code: TypeCannotAssign,
        msg: "invalid assignment target".to_string(),
        help: None,
    }

    /// For when an operator is applied to a type that does not support it.
    invalid_operation {
        args: (operation: impl Display, type_: impl Display),
        code: TypeInvalidOperation,
        msg: format!("cannot apply {operation} to `{type_}`"),
        help: None,
    }

    /// For when a call's callee is not a function.
    not_callable {
        args: (type_: impl Display),
        code: TypeInvalidOperation,
        msg: format!("expected a function, found `{type_}`"),
        help: None,
    }

    /// For when a call has the wrong number of arguments.
    wrong_argument_count {
        args: (expected: usize, found: usize),
        code: TypeInvalidOperation,
        msg: format!("this call takes {expected} argument(s) but {found} were supplied"),
        help: None,
    }

    /// For when a struct literal omits a declared field.
    missing_field {
        args: (field: impl Display, struct_: impl Display),
        code: TypeMissingField,
        msg: format!("missing field `{field}` in literal of `{struct_}`"),
        help: None,
    }

    /// For when a struct literal or field access names an undeclared field.
    unknown_field {
        args: (field: impl Display, type_: impl Display),
        code: TypeUnknownField,
        msg: format!("no field `{field}` on `{type_}`"),
        help: None,
    }

    /// For when a generic application has the wrong arity.
    invalid_generic_args {
        args: (name: impl Display, expected: usize, found: usize),
        code: TypeInvalidGenericArgs,
        msg: format!("`{name}` expects {expected} generic argument(s), found {found}"),
        help: None,
    }

    /// For when a declared trait bound cannot be discharged.
    constraint_not_satisfied {
        args: (type_: impl Display, bound: impl Display),
        code: TypeConstraintNotSatisfied,
        msg: format!("the trait bound `{type_}: {bound}` is not satisfied"),
        help: None,
    }

    /// For when an impl omits an associated type its trait declares.
    missing_associated_type {
        args: (name: impl Display, trait_: impl Display),
        code: TypeMissingAssociatedType,
        msg: format!("impl is missing associated type `{name}` declared by `{trait_}`"),
        help: None,
    }

    /// For when an impl assigns an associated type its trait never declared.
    unknown_associated_type {
        args: (name: impl Display, trait_: impl Display),
        code: TypeUnknownAssociatedType,
        msg: format!("associated type `{name}` is not a member of `{trait_}`"),
        help: None,
    }

    /// For when a mutable borrow overlaps another borrow of the same binding.
    borrow_conflict {
        args: (name: impl Display),
        code: TypeBorrowConflict,
        msg: format!("conflicting borrows of `{name}`"),
        help: None,
    }

    /// For when an unsafe operation appears outside an `unsafe` scope.
    unsafe_required {
        args: (operation: impl Display),
        code: TypeUnsafeRequired,
        msg: format!("{operation} requires an `unsafe` scope"),
        help: Some("wrap the expression in `unsafe { ... }` or mark the enclosing function `unsafe`".to_string()),
    }

    /// For when a pattern cannot be typed against the scrutinee.
    invalid_pattern {
        args: (scrutinee: impl Display),
        code: TypeInvalidPattern,
        msg: format!("pattern cannot be typed against `{scrutinee}`"),
        help: None,
    }

    /// For when a match does not cover every inhabitant of the scrutinee type.
    non_exhaustive_match {
        args: (scrutinee: impl Display),
        code: TypeNonExhaustiveMatch,
        msg: format!("match on `{scrutinee}` is not exhaustive"),
        help: None,
    }
);

create_messages!(
    /// Constructors for semantic warnings.
    TypeCheckerWarning,
    stage: Stage::TypeChecker,
    severity: Severity::Warning,

    /// For when a match arm is dominated by the arms before it.
    unreachable_arm {
        args: (),
        code: UnreachableCode,
        msg: "unreachable match arm".to_string(),
        help: None,
    }
);
