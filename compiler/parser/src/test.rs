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

use crate::parse;

use vesper_ast::*;
use vesper_errors::{emitter::Handler, Diagnostic};
use vesper_span::{create_session_if_not_set_then, Span};

fn parse_source(source: &str) -> (File, Vec<Diagnostic>) {
    let handler = Handler::new();
    let node_builder = NodeBuilder::default();
    let file = parse(&handler, &node_builder, source).expect("the parser is total");
    (file, handler.take_diagnostics())
}

fn parse_clean(source: &str) -> File {
    let (file, diagnostics) = parse_source(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    file
}

/// Checks that a node's span covers the spans of all the given children.
fn assert_covers(parent: Span, children: &[Span]) {
    for child in children {
        assert!(
            parent.lo <= child.lo && child.hi <= parent.hi,
            "span {parent:?} does not cover child {child:?}"
        );
    }
}

#[test]
fn test_parse_function_declaration() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean("pub fn add(a: int, b: int) -> int { a + b }");
        assert_eq!(file.declarations.len(), 1);

        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        assert!(function.is_pub);
        assert!(!function.is_unsafe);
        assert_eq!(function.parameters.len(), 2);
        assert!(function.block.tail.is_some(), "the body's value is `a + b`");
        assert_covers(function.span, &[function.identifier.span, function.block.span]);
    });
}

#[test]
fn test_parse_is_deterministic() {
    create_session_if_not_set_then(|_| {
        let source = "struct Pair[T] { first: T, second: T }\nfn main() { let p = Pair { first: 1, second: 2 }; }";
        let (first, _) = parse_source(source);
        let (second, _) = parse_source(source);
        // Node IDs differ between runs with separate builders, but the
        // shapes and spans must be identical.
        assert_eq!(first.declarations.len(), second.declarations.len());
        assert_eq!(first.span, second.span);
        assert_eq!(format!("{first}"), format!("{second}"));
    });
}

#[test]
fn test_parent_spans_cover_children() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean("fn f(x: int) -> int { let y = x * 2 + 1; return y; }");
        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        assert_covers(file.span, &[function.span]);

        let Statement::Let(let_) = &function.block.statements[0] else {
            panic!("expected a let statement");
        };
        assert_covers(let_.span, &[let_.identifier.span, let_.value.span()]);

        let Expression::Binary(add) = &let_.value else { panic!("expected a binary expression") };
        assert_covers(add.span, &[add.left.span(), add.right.span()]);
    });
}

#[test]
fn test_precedence_and_associativity() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean("fn f() { let x = 1 + 2 * 3 == 7 && true; }");
        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        let Statement::Let(let_) = &function.block.statements[0] else {
            panic!("expected a let statement");
        };
        // `&&` binds loosest.
        let Expression::Binary(and) = &let_.value else { panic!("expected `&&` at the top") };
        assert_eq!(and.op, BinaryOperation::And);
        // Its left operand is the equality.
        let Expression::Binary(eq) = &*and.left else { panic!("expected `==`") };
        assert_eq!(eq.op, BinaryOperation::Eq);
        // Whose left operand is `1 + (2 * 3)`.
        let Expression::Binary(add) = &*eq.left else { panic!("expected `+`") };
        assert_eq!(add.op, BinaryOperation::Add);
        let Expression::Binary(mul) = &*add.right else { panic!("expected `*`") };
        assert_eq!(mul.op, BinaryOperation::Mul);
    });
}

#[test]
fn test_path_and_index_nesting() {
    create_session_if_not_set_then(|_| {
        // `Enum[T]::Variant` parses as a path off the generic application.
        let file = parse_clean("fn f() { let x = Option[int]::Some(1); }");
        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        let Statement::Let(let_) = &function.block.statements[0] else {
            panic!("expected a let statement");
        };
        let Expression::Call(call) = &let_.value else { panic!("expected a call") };
        let Expression::Access(AccessExpression::Static(static_)) = &*call.function else {
            panic!("expected a static access");
        };
        assert_eq!(static_.name.name.as_str(), "Some");
        let Expression::Access(AccessExpression::Index(index)) = &*static_.inner else {
            panic!("expected an index access carrying the generic arguments");
        };
        let Expression::Identifier(base) = &*index.inner else { panic!("expected an identifier") };
        assert_eq!(base.name.as_str(), "Option");
    });
}

#[test]
fn test_struct_literal_with_explicit_generics() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean("fn f() { let p = Pair[int] { first: 1, second: 2 }; }");
        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        let Statement::Let(let_) = &function.block.statements[0] else {
            panic!("expected a let statement");
        };
        let Expression::Struct(struct_) = &let_.value else { panic!("expected a struct literal") };
        assert_eq!(struct_.type_arguments.len(), 1);
        assert_eq!(struct_.members.len(), 2);
    });
}

#[test]
fn test_scrutinee_is_not_a_struct_literal() {
    create_session_if_not_set_then(|_| {
        // `c` alone is the scrutinee; `{` opens the match body.
        let file = parse_clean("fn f(c: Color) -> int { match c { _ => 1 } }");
        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        let Some(tail) = &function.block.tail else { panic!("expected a tail expression") };
        let Expression::Match(match_) = &**tail else { panic!("expected a match") };
        assert!(matches!(&*match_.scrutinee, Expression::Identifier(_)));
        assert_eq!(match_.arms.len(), 1);
    });
}

#[test]
fn test_parse_types() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean(
            "fn f(a: &mut int, b: *int, c: int?, d: [int; 4], e: [int], f: (int, bool), \
             g: chan int, h: <-chan int, i: fn(int) -> bool, j: dyn Display, k: Iterator::Item) { }",
        );
        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        let types: Vec<&TypeExpression> = function.parameters.iter().map(|p| &p.type_).collect();
        assert!(matches!(types[0], TypeExpression::Reference(r) if r.mutable));
        assert!(matches!(types[1], TypeExpression::Pointer(_)));
        assert!(matches!(types[2], TypeExpression::Optional(_)));
        assert!(matches!(types[3], TypeExpression::Array(_)));
        assert!(matches!(types[4], TypeExpression::Slice(_)));
        assert!(matches!(types[5], TypeExpression::Tuple(t) if t.elements.len() == 2));
        assert!(matches!(types[6], TypeExpression::Channel(c) if c.direction == ChannelDirection::Both));
        assert!(matches!(types[7], TypeExpression::Channel(c) if c.direction == ChannelDirection::Recv));
        assert!(matches!(types[8], TypeExpression::Function(_)));
        assert!(matches!(types[9], TypeExpression::Existential(e) if e.sugared));
        assert!(matches!(types[10], TypeExpression::Projection(_)));
    });
}

#[test]
fn test_parse_forall_and_exists_types() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean("type Id = forall[T] fn(T) -> T;\ntype Boxed = exists T: Display. T;");
        assert_eq!(file.declarations.len(), 2);
        let Declaration::TypeAlias(forall) = &file.declarations[0] else { panic!("expected an alias") };
        assert!(matches!(&forall.type_, TypeExpression::Forall(_)));
        let Declaration::TypeAlias(exists) = &file.declarations[1] else { panic!("expected an alias") };
        assert!(matches!(&exists.type_, TypeExpression::Existential(e) if !e.sugared));
    });
}

#[test]
fn test_parse_patterns() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean(
            "fn f(x: Shape) -> int {\n\
             match x {\n\
               Shape::Circle(r) => r,\n\
               Shape::Rect(w, h) | Shape::Square(w, h) => w + h,\n\
               Point { x: px, .. } => px,\n\
               (a, .., b) => a + b,\n\
               [first, .., last] => first + last,\n\
               &mut inner => inner,\n\
               1..=9 => 1,\n\
               _ => 0,\n\
             }\n\
             }",
        );
        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        let Some(tail) = &function.block.tail else { panic!("expected a tail expression") };
        let Expression::Match(match_) = &**tail else { panic!("expected a match") };

        let patterns: Vec<&Pattern> = match_.arms.iter().map(|arm| &arm.pattern).collect();
        assert!(matches!(patterns[0], Pattern::Variant(v) if v.elements.as_ref().unwrap().len() == 1));
        assert!(matches!(patterns[1], Pattern::Or(o) if o.alternatives.len() == 2));
        assert!(matches!(patterns[2], Pattern::Struct(s) if s.rest));
        assert!(matches!(patterns[3], Pattern::Tuple(t) if t.elements.len() == 3));
        assert!(matches!(patterns[4], Pattern::Slice(s) if s.elements.len() == 3));
        assert!(matches!(patterns[5], Pattern::Reference(r) if r.mutable));
        assert!(matches!(patterns[6], Pattern::Range(r) if r.inclusive));
        assert!(matches!(patterns[7], Pattern::Wildcard(_)));
    });
}

#[test]
fn test_parse_concurrency_statements() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean(
            "fn f(ch: chan int) {\n\
             spawn worker(ch);\n\
             spawn { ch <- 1; };\n\
             ch <- 2;\n\
             let v = <-ch;\n\
             select {\n\
               case x = <-ch { x; }\n\
               case ch <- 3 { }\n\
             }\n\
             }",
        );
        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        let statements = &function.block.statements;
        assert!(matches!(&statements[0], Statement::Spawn(s) if matches!(s.body, SpawnBody::Call(_))));
        assert!(matches!(&statements[1], Statement::Spawn(s) if matches!(s.body, SpawnBody::Block(_))));
        assert!(
            matches!(&statements[2], Statement::Expression(e) if matches!(e.expression, Expression::Send(_)))
        );
        assert!(matches!(&statements[3], Statement::Let(l) if matches!(&l.value, Expression::Unary(u) if u.op == UnaryOperation::Recv)));
        let Statement::Select(select) = &statements[4] else { panic!("expected a select") };
        assert_eq!(select.cases.len(), 2);
        assert!(matches!(&select.cases[0].kind, SelectCaseKind::Recv { pattern: Some(_), .. }));
        assert!(matches!(&select.cases[1].kind, SelectCaseKind::Send(_)));
    });
}

#[test]
fn test_parse_trait_and_impl() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean(
            "trait Container {\n\
               type Item: Display;\n\
               fn get(i: int) -> Container::Item;\n\
             }\n\
             impl Container for Buffer {\n\
               type Item = int;\n\
               fn get(i: int) -> int { i }\n\
             }\n\
             impl Buffer {\n\
               fn len() -> int { 0 }\n\
             }",
        );
        let Declaration::Trait(trait_) = &file.declarations[0] else { panic!("expected a trait") };
        assert_eq!(trait_.associated_types.len(), 1);
        assert_eq!(trait_.methods.len(), 1);
        assert!(trait_.methods[0].body.is_none());

        let Declaration::Impl(trait_impl) = &file.declarations[1] else { panic!("expected an impl") };
        assert!(!trait_impl.is_inherent());
        assert_eq!(trait_impl.associated_types.len(), 1);

        let Declaration::Impl(inherent) = &file.declarations[2] else { panic!("expected an impl") };
        assert!(inherent.is_inherent());
    });
}

#[test]
fn test_recovery_preserves_surrounding_structure() {
    create_session_if_not_set_then(|_| {
        let (file, diagnostics) = parse_source(
            "fn good() { }\n\
             fn bad() { let = ; }\n\
             fn also_good() { }",
        );
        assert!(!diagnostics.is_empty(), "expected a syntax error");
        // All three functions survive; the bad statement is dropped.
        assert_eq!(file.declarations.len(), 3);
    });
}

#[test]
fn test_recovery_at_declaration_level() {
    create_session_if_not_set_then(|_| {
        let (file, diagnostics) = parse_source("struct Ok { x: int }\n???\nfn still_here() { }");
        assert!(!diagnostics.is_empty());
        assert_eq!(file.declarations.len(), 2);
    });
}

#[test]
fn test_file_header_forms() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean("package demo;\nmod helpers;\nuse std::collections as coll;\nfn main() { }");
        assert!(file.package.is_some());
        assert_eq!(file.modules.len(), 1);
        assert_eq!(file.uses.len(), 1);
        assert_eq!(file.uses[0].path.len(), 2);
        assert!(file.uses[0].alias.is_some());
    });
}

#[test]
fn test_effect_rows_on_functions() {
    create_session_if_not_set_then(|_| {
        let file = parse_clean("fn f() -> int / {io, net | R} { 0 }");
        let Declaration::Function(function) = &file.declarations[0] else {
            panic!("expected a function");
        };
        let effects = function.effects.as_ref().expect("expected an effect row");
        assert_eq!(effects.effects.len(), 2);
        assert!(effects.rest.is_some());
    });
}
