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

//! Renders diagnostics as text blocks:
//!
//! ```text
//! error[TYPE_MISMATCH]: mismatched types: expected `int`, found `string`
//!   --> main.vsp:3:18
//!    |
//!  1 | struct Pair[T] { first: T, second: T }
//!  2 | fn main() {
//!  3 |     let p = Pair { first: 1, second: "x" };
//!    |                  ^^^ expected `int`
//!  4 | }
//!    |
//!    = note: conflicting inference
//!    = help: annotate the binding
//!    = because `T = int` was inferred here (at 3:24)
//! ```

use crate::{Diagnostic, Label, LabelStyle, Severity};

use colored::Colorize;
use vesper_span::SourceFile;

/// How many source lines of context are shown around each labeled line.
const CONTEXT_LINES: u32 = 2;

/// Renders `diagnostic` against `file` as a human-readable block.
/// With `color` disabled the output is plain text, for tests and pipes.
pub fn render_diagnostic(diagnostic: &Diagnostic, file: &SourceFile, color: bool) -> String {
    let mut out = String::new();

    // Header: `error[CODE]: message`.
    let severity = diagnostic.severity.to_string();
    let header = format!("{severity}[{}]", diagnostic.code);
    if color {
        let painted = match diagnostic.severity {
            Severity::Error => header.as_str().red().bold().to_string(),
            Severity::Warning => header.as_str().yellow().bold().to_string(),
        };
        out.push_str(&painted);
    } else {
        out.push_str(&header);
    }
    out.push_str(": ");
    out.push_str(&diagnostic.message);
    out.push('\n');

    // Location of the primary span.
    let span = diagnostic.span;
    let gutter = gutter_width(diagnostic, file);
    let pad = " ".repeat(gutter);
    out.push_str(&format!("{pad}--> {}:{}:{}\n", file.name, span.line, span.col));

    // One source block per label, primary span first.
    let mut labels = diagnostic.labels.clone();
    if !labels.iter().any(|l| l.style == LabelStyle::Primary && l.span == span) {
        labels.insert(0, Label { span, message: String::new(), style: LabelStyle::Primary });
    }
    labels.sort_by_key(|l| l.style == LabelStyle::Secondary);

    for label in &labels {
        render_label(&mut out, label, file, gutter);
    }

    // Trailing notes, help, and the proof chain.
    for note in &diagnostic.notes {
        out.push_str(&format!("{pad} = note: {note}\n"));
    }
    if let Some(help) = &diagnostic.help {
        out.push_str(&format!("{pad} = help: {help}\n"));
    }
    for step in &diagnostic.proof {
        match step.span {
            Some(span) => out.push_str(&format!("{pad} = because {} (at {span})\n", step.message)),
            None => out.push_str(&format!("{pad} = because {}\n", step.message)),
        }
    }

    out
}

/// The gutter must fit the largest line number any block will show.
fn gutter_width(diagnostic: &Diagnostic, file: &SourceFile) -> usize {
    let max_line = diagnostic
        .labels
        .iter()
        .map(|l| l.span.line)
        .chain([diagnostic.span.line])
        .max()
        .unwrap_or(1)
        .saturating_add(CONTEXT_LINES)
        .min(file.line_count().max(1));
    (max_line.max(1) as usize).to_string().len().max(2) + 1
}

fn render_label(out: &mut String, label: &Label, file: &SourceFile, gutter: usize) {
    let span = label.span;
    if span.is_dummy() || file.line_text(span.line).is_none() {
        return;
    }
    let line = span.line;
    let pad = " ".repeat(gutter);

    out.push_str(&format!("{pad}|\n"));

    let first = line.saturating_sub(CONTEXT_LINES).max(1);
    let last = (line + CONTEXT_LINES).min(file.line_count().max(1));
    for current in first..=last {
        let Some(text) = file.line_text(current) else { break };
        out.push_str(&format!("{current:>width$} | {text}\n", width = gutter - 1));

        if current == line {
            // The underline row, beneath the labeled line.
            let col = span.col.max(1) as usize;
            let underline_len = underline_width(file, span).max(1);
            let marker = match label.style {
                LabelStyle::Primary => "^",
                LabelStyle::Secondary => "~",
            };
            let mut row = format!("{pad}| {}{}", " ".repeat(col - 1), marker.repeat(underline_len));
            if !label.message.is_empty() {
                row.push(' ');
                row.push_str(&label.message);
            }
            row.push('\n');
            out.push_str(&row);
        }
    }
    out.push_str(&format!("{pad}|\n"));
}

/// The number of runes the underline covers on the labeled line.
/// A span reaching past its first line is underlined to the end of that line.
fn underline_width(file: &SourceFile, span: vesper_span::Span) -> usize {
    let spanned = file.contents_of_span(span);
    match spanned.find('\n') {
        Some(first_line_end) => spanned[..first_line_end].trim_end_matches('\r').chars().count(),
        None => spanned.chars().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeCheckerError;
    use vesper_span::{FileName, SourceFile, Span};

    #[test]
    fn test_render_block() {
        let file = SourceFile::new(FileName::Custom("file.vsp".into()), "fn main() {\n    let a = x;\n}\n");
        // `x` sits at line 2, column 13, bytes 24..25.
        let diagnostic = TypeCheckerError::undefined_identifier("x", Span::new(2, 13, 24, 25))
            .with_primary_label("not found in this scope");

        let rendered = render_diagnostic(&diagnostic, &file, false);
        assert_eq!(
            rendered,
            vec![
                "error[TYPE_UNDEFINED_IDENTIFIER]: cannot find `x` in this scope",
                "   --> file.vsp:2:13",
                "   |",
                " 1 | fn main() {",
                " 2 |     let a = x;",
                "   |             ^ not found in this scope",
                " 3 | }",
                "   |",
                "",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_render_notes_and_proof() {
        let file = SourceFile::new(FileName::Custom("file.vsp".into()), "let a = 1;\n");
        let diagnostic = TypeCheckerError::type_mismatch("int", "string", Span::new(1, 9, 8, 9))
            .with_note("widen the type")
            .with_help("annotate the binding")
            .with_proof_step("`T = int` was inferred here", Some(Span::new(1, 9, 8, 9)));

        let rendered = render_diagnostic(&diagnostic, &file, false);
        assert!(rendered.contains(" = note: widen the type"));
        assert!(rendered.contains(" = help: annotate the binding"));
        assert!(rendered.contains(" = because `T = int` was inferred here (at 1:9)"));
    }
}
