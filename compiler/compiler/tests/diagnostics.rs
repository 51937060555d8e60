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
use utilities::check;

use vesper_compiler::Compiler;
use vesper_errors::emitter::Handler;
use vesper_span::{create_session_if_not_set_then, FileName};

fn run_compiler(source: &str) -> (String, i32) {
    let handler = Handler::new();
    let mut compiler = Compiler::new(&handler, "main.vsp".into(), ".".into(), None);
    if compiler.parse_program_from_string(source, FileName::Custom("main.vsp".into())).is_ok() {
        let _ = compiler.compiler_stages();
    }
    (compiler.render_diagnostics(false), compiler.exit_code())
}

#[test]
fn test_exit_codes() {
    create_session_if_not_set_then(|_| {
        let (_, clean) = run_compiler("fn main() { }");
        assert_eq!(clean, 0);

        let (_, broken) = run_compiler("fn main() { let a = missing; }");
        assert_eq!(broken, 1);

        // A warning alone does not fail the compile.
        let (_, warned) = run_compiler(
            "enum Color { Red }\nfn f(c: Color) -> int { match c { _ => 0, Red => 1 } }",
        );
        assert_eq!(warned, 0);
    });
}

#[test]
fn test_rendered_block_shape() {
    create_session_if_not_set_then(|_| {
        let (rendered, code) = run_compiler("fn main() {\n    let a = missing;\n}");
        assert_eq!(code, 1);

        assert!(rendered.contains("error[TYPE_UNDEFINED_IDENTIFIER]"), "header missing: {rendered}");
        assert!(rendered.contains("--> main.vsp:2:13"), "location missing: {rendered}");
        // The offending line appears with its number and an underline.
        assert!(rendered.contains(" 2 |     let a = missing;"), "source context missing: {rendered}");
        assert!(rendered.contains("^^^^^^^"), "underline missing: {rendered}");
    });
}

#[test]
fn test_rendered_secondary_labels_and_proof() {
    create_session_if_not_set_then(|_| {
        let (rendered, _) = run_compiler(
            "struct Pair[T] { first: T, second: T }\n\
             fn main() { let p = Pair { first: 1, second: \"x\" }; }",
        );

        assert!(rendered.contains("error[TYPE_MISMATCH]"), "header missing: {rendered}");
        // The secondary label is underlined with tildes.
        assert!(rendered.contains("~"), "secondary underline missing: {rendered}");
        assert!(rendered.contains("first inferred"), "secondary label missing: {rendered}");
        // Proof-chain lines render as `because ...`.
        assert!(rendered.contains(" = because "), "proof chain missing: {rendered}");
    });
}

#[test]
fn test_diagnostics_are_in_source_order() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "fn first() { let a = missing_one; }\n\
             fn second() { let b = missing_two; }",
        );
        let errors = checked.errors();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].span.line < errors[1].span.line, "diagnostics must keep source order");
    });
}

#[test]
fn test_lexer_errors_flow_through() {
    create_session_if_not_set_then(|_| {
        let (rendered, code) = run_compiler("fn main() { let s = \"unterminated; }");
        assert_eq!(code, 1);
        assert!(rendered.contains("LEXER_"), "lexical diagnostics surface: {rendered}");
    });
}

#[test]
fn test_parser_recovery_reports_every_error() {
    create_session_if_not_set_then(|_| {
        let checked = check(
            "fn one() { let = 1; }\n\
             fn two() { let = 2; }",
        );
        // Both bodies report their own syntax error.
        assert!(checked.errors().len() >= 2, "diagnostics: {:?}", checked.diagnostics);
    });
}
