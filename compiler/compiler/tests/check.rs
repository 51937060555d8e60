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

mod utilities;
use utilities::*;

use vesper_errors::{DiagnosticCode, LabelStyle};
use vesper_span::create_session_if_not_set_then;

#[test]
fn test_generic_struct_literal_inference() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "struct Pair[T] { first: T, second: T }\n\
             fn main() { let p = Pair { first: 1, second: 2 }; }",
        );
        checked.assert_clean();
        assert_eq!(checked.binding_type("p").expect("`p` must be typed"), "Pair[int]");
    });
}

#[test]
fn test_struct_literal_inference_conflict() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "struct Pair[T] { first: T, second: T }\n\
             fn main() { let p = Pair { first: 1, second: \"x\" }; }",
        );

        let errors = checked.errors_with(DiagnosticCode::TypeMismatch);
        assert_eq!(errors.len(), 1, "expected exactly one mismatch: {:?}", checked.diagnostics);
        let error = errors[0];

        // The primary span points at the `"x"` literal.
        let x_literal = find_string_literal(&checked.file, "x").expect("the literal is in the tree");
        assert_eq!(error.span, x_literal.span);

        // A secondary span explains where `T = int` was pinned.
        assert!(
            error
                .labels
                .iter()
                .any(|label| label.style == LabelStyle::Secondary && label.message.contains("first inferred")),
            "missing the secondary inference label: {error:?}"
        );

        // The proof chain references both fields.
        let proof = error.proof.iter().map(|step| step.message.as_str()).collect::<Vec<_>>().join("\n");
        assert!(proof.contains("first"), "proof chain should mention the first field: {proof}");
        assert!(proof.contains("second"), "proof chain should mention the second field: {proof}");
    });
}

#[test]
fn test_struct_literal_underdetermined_parameter() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "struct Tag[T] { label: string }\n\
             fn main() { let t = Tag { label: \"a\" }; }",
        );
        let errors = checked.errors_with(DiagnosticCode::TypeMismatch);
        assert_eq!(errors.len(), 1);
        assert!(
            errors[0].notes.iter().any(|note| note.contains("cannot infer type parameter T")),
            "missing the inference note: {:?}",
            errors[0]
        );
    });
}

#[test]
fn test_non_exhaustive_match() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "enum Color { Red, Green, Blue }\n\
             fn f(c: Color) -> int { match c { Red => 1, Green => 2 } }",
        );
        let errors = checked.errors_with(DiagnosticCode::TypeNonExhaustiveMatch);
        assert_eq!(errors.len(), 1, "diagnostics: {:?}", checked.diagnostics);
        assert!(errors[0].notes.iter().any(|note| note.contains("pattern `Blue` not covered")));
    });
}

#[test]
fn test_exhaustive_match_is_clean_and_minimal() {
    create_session_if_not_set_then(|_| {
        // Exhaustive: covers every constructor.
        let checked = check(
            "enum Color { Red, Green, Blue }\n\
             fn f(c: Color) -> int { match c { Red => 1, Green => 2, Blue => 3 } }",
        );
        checked.assert_clean();

        // Removing any arm introduces an uncovered witness.
        for missing in ["Red", "Green", "Blue"] {
            let arms: Vec<String> = ["Red", "Green", "Blue"]
                .iter()
                .filter(|variant| **variant != missing)
                .map(|variant| format!("{variant} => 1"))
                .collect();
            let source = format!(
                "enum Color {{ Red, Green, Blue }}\nfn f(c: Color) -> int {{ match c {{ {} }} }}",
                arms.join(", ")
            );
            let partial = check(&source);
            let errors = partial.errors_with(DiagnosticCode::TypeNonExhaustiveMatch);
            assert_eq!(errors.len(), 1, "removing {missing} must be caught");
            assert!(errors[0].notes.iter().any(|note| note.contains(missing)));
        }
    });
}

#[test]
fn test_wildcard_covers_integers() {
    create_session_if_not_set_then(|_| {
        let checked = check("fn f(x: int) -> int { match x { 0 => 0, _ => 1 } }");
        checked.assert_clean();

        let partial = check("fn f(x: int) -> int { match x { 0 => 0, 1 => 1 } }");
        let errors = partial.errors_with(DiagnosticCode::TypeNonExhaustiveMatch);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].notes.iter().any(|note| note.contains("pattern `_` not covered")));
    });
}

#[test]
fn test_unreachable_arm_warning() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "enum Color { Red, Green }\n\
             fn f(c: Color) -> int { match c { _ => 0, Red => 1 } }",
        );
        assert!(checked.errors().is_empty(), "warnings must not fail the compile: {:?}", checked.diagnostics);
        let warnings = checked.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, DiagnosticCode::UnreachableCode);
    });
}

#[test]
fn test_unsafe_required_for_raw_pointer_deref() {
    create_session_if_not_set_then(|_| {
        let checked = check("fn g(p: *int) -> int { *p }");
        let errors = checked.errors_with(DiagnosticCode::TypeUnsafeRequired);
        assert_eq!(errors.len(), 1, "diagnostics: {:?}", checked.diagnostics);

        // Wrapping the body in `unsafe { ... }` clears it.
        let wrapped = check("fn g(p: *int) -> int { unsafe { *p } }");
        wrapped.assert_clean();

        // Marking the function `unsafe` clears it too.
        let marked = check("unsafe fn g(p: *int) -> int { *p }");
        marked.assert_clean();
    });
}

#[test]
fn test_borrow_conflict() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "fn f() {\n\
             let mut x = 1;\n\
             let a = &x;\n\
             let b = &mut x;\n\
             }",
        );
        let errors = checked.errors_with(DiagnosticCode::TypeBorrowConflict);
        assert_eq!(errors.len(), 1, "diagnostics: {:?}", checked.diagnostics);
        // Both borrow sites are labeled.
        let error = errors[0];
        assert!(error.labels.iter().any(|label| label.style == LabelStyle::Primary));
        assert!(error.labels.iter().any(|label| label.style == LabelStyle::Secondary));

        // Two shared borrows coexist fine.
        let shared = check("fn f() { let x = 1; let a = &x; let b = &x; }");
        shared.assert_clean();

        // Scoped borrows do not conflict after their scope ends.
        let scoped = check("fn f() { let mut x = 1; { let a = &x; } let b = &mut x; }");
        scoped.assert_clean();
    });
}

#[test]
fn test_mutability_checking() {
    create_session_if_not_set_then(|_| {
        let checked = check("fn f() { let x = 1; x = 2; }");
        let errors = checked.errors_with(DiagnosticCode::TypeCannotAssign);
        assert_eq!(errors.len(), 1);

        let mutable = check("fn f() { let mut x = 1; x = 2; }");
        mutable.assert_clean();

        // `&mut` of an immutable binding is rejected.
        let borrowed = check("fn f() { let x = 1; let r = &mut x; }");
        assert!(!borrowed.errors_with(DiagnosticCode::TypeCannotAssign).is_empty());
    });
}

#[test]
fn test_assignment_through_references() {
    create_session_if_not_set_then(|_| {
        let through_mut = check("fn f(p: &mut int) { *p = 3; }");
        through_mut.assert_clean();

        let through_shared = check("fn f(p: &int) { *p = 3; }");
        assert!(!through_shared.errors().is_empty());

        // A raw pointer store demands an unsafe scope.
        let raw = check("fn f(p: *int) { *p = 3; }");
        assert_eq!(raw.errors_with(DiagnosticCode::TypeUnsafeRequired).len(), 1);
        let raw_unsafe = check("fn f(p: *int) { unsafe { *p = 3; } }");
        raw_unsafe.assert_clean();
    });
}

#[test]
fn test_channels() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "fn f() {\n\
             let ch = Channel::new[int](4);\n\
             ch <- 1;\n\
             let v = <-ch;\n\
             let s = v + 1;\n\
             }",
        );
        checked.assert_clean();
        assert_eq!(checked.binding_type("ch").unwrap(), "chan int");
        assert_eq!(checked.binding_type("v").unwrap(), "int");

        // Sending a mistyped value is caught.
        let bad = check("fn f() { let ch = Channel::new[int](); ch <- \"nope\"; }");
        assert!(!bad.errors_with(DiagnosticCode::TypeMismatch).is_empty());

        // Receive-only channels reject sends.
        let recv_only = check("fn f(ch: <-chan int) { ch <- 1; }");
        assert!(!recv_only.errors().is_empty());
    });
}

#[test]
fn test_select_statement() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "fn f(a: chan int, b: chan string) {\n\
             select {\n\
             case v = <-a { let w = v + 1; }\n\
             case b <- \"hi\" { }\n\
             }\n\
             }",
        );
        checked.assert_clean();
        assert_eq!(checked.binding_type("w").unwrap(), "int");
    });
}

#[test]
fn test_spawn_forms() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "fn worker(n: int) { }\n\
             fn f(ch: chan int) {\n\
             spawn worker(1);\n\
             spawn { ch <- 1; };\n\
             spawn fn(n: int) { ch <- n; }(2);\n\
             }",
        );
        checked.assert_clean();

        let bad = check("fn worker(n: int) { }\nfn f() { spawn worker(\"no\"); }");
        assert!(!bad.errors_with(DiagnosticCode::TypeMismatch).is_empty());
    });
}

#[test]
fn test_generic_function_call_and_bounds() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "trait Printable { fn print() -> void; }\n\
             struct Point { x: int }\n\
             impl Printable for Point {\n\
             fn print() -> void { }\n\
             }\n\
             fn show[T: Printable](value: T) { }\n\
             fn main() { show(Point { x: 1 }); }",
        );
        checked.assert_clean();

        // An instantiation without a matching impl is rejected.
        let unsatisfied = check(
            "trait Printable { fn print() -> void; }\n\
             fn show[T: Printable](value: T) { }\n\
             fn main() { show(1); }",
        );
        let errors = unsatisfied.errors_with(DiagnosticCode::TypeConstraintNotSatisfied);
        assert_eq!(errors.len(), 1, "diagnostics: {:?}", unsatisfied.diagnostics);
        assert!(!errors[0].proof.is_empty(), "bound failures carry a proof chain");
    });
}

#[test]
fn test_associated_types() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "trait Container { type Item; fn get(i: int) -> void; }\n\
             struct Buffer { len: int }\n\
             impl Container for Buffer {\n\
             type Item = int;\n\
             fn get(i: int) -> void { }\n\
             }\n\
             fn f(x: Buffer::Item) -> int { x }",
        );
        checked.assert_clean();

        let missing = check(
            "trait Container { type Item; }\n\
             struct Buffer { len: int }\n\
             impl Container for Buffer { }",
        );
        assert_eq!(missing.errors_with(DiagnosticCode::TypeMissingAssociatedType).len(), 1);

        let unknown = check(
            "trait Container { }\n\
             struct Buffer { len: int }\n\
             impl Container for Buffer { type Junk = int; }",
        );
        assert_eq!(unknown.errors_with(DiagnosticCode::TypeUnknownAssociatedType).len(), 1);
    });
}

#[test]
fn test_enum_constructors_and_paths() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "enum Option_[T] { Some(T), None_ }\n\
             fn main() {\n\
             let a = Option_[int]::Some(1);\n\
             let b = Option_::Some(\"s\");\n\
             let c = Option_[int]::None_;\n\
             }",
        );
        checked.assert_clean();
        assert_eq!(checked.binding_type("a").unwrap(), "Option_[int]");
        assert_eq!(checked.binding_type("b").unwrap(), "Option_[string]");
        assert_eq!(checked.binding_type("c").unwrap(), "Option_[int]");

        let mismatched = check(
            "enum Option_[T] { Some(T), None_ }\n\
             fn main() { let a = Option_[int]::Some(\"s\"); }",
        );
        assert!(!mismatched.errors_with(DiagnosticCode::TypeMismatch).is_empty());
    });
}

#[test]
fn test_duplicate_declarations() {
    create_session_if_not_set_then(|_| {
        let checked = check("fn f() { }\nstruct f { x: int }");
        let errors = checked.errors_with(DiagnosticCode::TypeCannotAssign);
        assert_eq!(errors.len(), 1);
        // The proof chain points back at the original declaration.
        assert!(!errors[0].proof.is_empty());
        assert!(errors[0].proof[0].span.is_some());

        let locals = check("fn f() { let x = 1; let x = 2; }");
        assert_eq!(locals.errors_with(DiagnosticCode::TypeCannotAssign).len(), 1);

        // Shadowing in a nested scope stays legal.
        let shadowed = check("fn f() { let x = 1; { let x = \"s\"; } }");
        shadowed.assert_clean();
    });
}

#[test]
fn test_undefined_identifier() {
    create_session_if_not_set_then(|_| {
        let checked = check("fn main() { let a = missing; }");
        assert_eq!(checked.errors_with(DiagnosticCode::TypeUndefinedIdentifier).len(), 1);
    });
}

#[test]
fn test_effect_rows() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "fn read_file() -> int / {io} { 1 }\n\
             fn main_loop() -> int / {io, net} { read_file() }",
        );
        checked.assert_clean();

        // A call whose effects the enclosing closed row omits is caught.
        let undeclared = check(
            "fn read_file() -> int / {io} { 1 }\n\
             fn pure_code() -> int / {net} { read_file() }",
        );
        assert_eq!(undeclared.errors_with(DiagnosticCode::TypeConstraintNotSatisfied).len(), 1);

        // A row variable absorbs any effects.
        let open_row = check(
            "fn read_file() -> int / {io} { 1 }\n\
             fn wrapper() -> int / {net | R} { read_file() }",
        );
        open_row.assert_clean();
    });
}

#[test]
fn test_check_is_idempotent() {
    create_session_if_not_set_then(|_| {
        let source = "struct Pair[T] { first: T, second: T }\n\
                      enum Color { Red, Green, Blue }\n\
                      fn f(c: Color) -> int { match c { Red => 1, _ => 2 } }\n\
                      fn main() { let p = Pair { first: 1, second: 2 }; let q = f(Color::Red); }";

        let first = check(source);
        let second = check(source);

        assert_eq!(first.diagnostics, second.diagnostics);
        let first_types: Vec<&String> = first.types.values().collect();
        let second_types: Vec<&String> = second.types.values().collect();
        assert_eq!(first_types, second_types);
    });
}

#[test]
fn test_type_map_is_total_on_clean_files() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "struct Pair[T] { first: T, second: T }\n\
             enum Color { Red, Green }\n\
             fn helper(n: int) -> int { n * 2 }\n\
             fn main() {\n\
             let p = Pair { first: 1, second: 2 };\n\
             let x = helper(p.first) + 3;\n\
             let c = Color::Red;\n\
             let d = match c { Red => x, Green => 0 };\n\
             let t = (x, d);\n\
             let arr = [1, 2, 3];\n\
             let slice_sum = arr[0] + arr[2];\n\
             if x > 0 { let y = x; } else { let z = 1; }\n\
             }",
        );
        checked.assert_clean();

        for id in all_expression_ids(&checked.file) {
            assert!(
                checked.types.contains_key(&id),
                "expression node {id} is missing from the type map"
            );
        }
    });
}

#[test]
fn test_block_tail_is_the_value() {
    create_session_if_not_set_then(|_| {
        let checked = check("fn f() -> int { let x = { let y = 2; y + 1 }; x }");
        checked.assert_clean();
        assert_eq!(checked.binding_type("x").unwrap(), "int");

        // A mismatching tail is caught against the return type.
        let bad = check("fn f() -> int { \"nope\" }");
        assert!(!bad.errors_with(DiagnosticCode::TypeMismatch).is_empty());
    });
}

#[test]
fn test_optionals_and_try() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "fn f(v: int?) -> int { v? }\n\
             fn g() -> int? { null }",
        );
        checked.assert_clean();

        let bad = check("fn f(v: int) -> int { v? }");
        assert!(!bad.errors_with(DiagnosticCode::TypeInvalidOperation).is_empty());
    });
}

#[test]
fn test_error_type_suppresses_cascades() {
    create_session_if_not_set_then(|_| {
        // `missing` is undefined; everything downstream of it must not
        // produce follow-on mismatches.
        let checked = check("fn f() -> int { let a = missing; let b = a + 1; b }");
        assert_eq!(checked.errors().len(), 1, "only the root cause is reported: {:?}", checked.diagnostics);
        assert_eq!(checked.errors()[0].code, DiagnosticCode::TypeUndefinedIdentifier);
    });
}
