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

//! The front-end driver for Vesper programs.
//!
//! The [`Compiler`] type sequences the front-end passes: tokenize and
//! parse, collect symbols, then type-check. The result is a checked
//! AST, an expression-to-type table, and the accumulated diagnostics.

use crate::OutputOptions;

use vesper_ast::{Ast, File, NodeBuilder};
use vesper_errors::{emitter::Handler, render_diagnostic, CompilerError, Result};
use vesper_passes::{ModuleTable, Pass, SymbolCollector, TypeArena, TypeChecker, TypeTable};
use vesper_span::{FileName, SourceFile, Span};

use std::fs;
use std::path::PathBuf;

/// The primary entry point of the Vesper front-end.
pub struct Compiler<'a> {
    /// The handler is used for error and warning emissions.
    handler: &'a Handler,
    /// The path to the main source file.
    main_file_path: PathBuf,
    /// The path to where the compiler outputs all generated files.
    output_directory: PathBuf,
    /// The AST for the program.
    pub ast: Ast,
    /// The source file, as registered at parse time.
    pub source_file: Option<SourceFile>,
    /// Hands out node IDs during parsing.
    node_builder: NodeBuilder,
    /// The interning arena behind every checked type.
    arena: TypeArena,
    /// The expression-to-type table filled in by the checker.
    type_table: TypeTable,
    /// Compiler options on some optional output files.
    output_options: OutputOptions,
}

impl<'a> Compiler<'a> {
    /// Returns a new Vesper front-end driver.
    pub fn new(
        handler: &'a Handler,
        main_file_path: PathBuf,
        output_directory: PathBuf,
        output_options: Option<OutputOptions>,
    ) -> Self {
        Self {
            handler,
            main_file_path,
            output_directory,
            ast: Ast::default(),
            source_file: None,
            node_builder: NodeBuilder::default(),
            arena: TypeArena::new(),
            type_table: TypeTable::new(),
            output_options: output_options.unwrap_or_default(),
        }
    }

    /// Parses and stores a program from a string, constructing the AST.
    pub fn parse_program_from_string(&mut self, source: &str, name: FileName) -> Result<()> {
        self.source_file = Some(SourceFile::new(name, source));

        let file = vesper_parser::parse(self.handler, &self.node_builder, source)?;
        let ast = Ast::new(file);

        if self.output_options.ast_initial {
            // Write the AST snapshot post parsing.
            ast.to_json_file(self.output_directory.clone(), "initial_ast.json")?;
        }

        self.ast = ast;
        Ok(())
    }

    /// Parses and stores the main program file.
    pub fn parse_program(&mut self) -> Result<()> {
        let source = fs::read_to_string(&self.main_file_path)
            .map_err(|e| CompilerError::file_read_error(self.main_file_path.display(), e, Span::dummy()))?;

        let name = FileName::Real(self.main_file_path.clone());
        self.parse_program_from_string(&source, name)
    }

    /// Runs the symbol-collection pass.
    pub fn symbol_table_pass(&self) -> ModuleTable {
        SymbolCollector::do_pass((self.ast.as_repr(), self.handler))
    }

    /// Runs the type checker pass.
    pub fn type_checker_pass(&self, module_table: ModuleTable) {
        TypeChecker::do_pass((self.ast.as_repr(), self.handler, &self.arena, &self.type_table, module_table));
    }

    /// Runs the front-end stages over the parsed AST.
    pub fn compiler_stages(&mut self) -> Result<()> {
        tracing::debug!("running front-end stages on {}", self.main_file_path.display());

        let module_table = self.symbol_table_pass();
        self.type_checker_pass(module_table);
        self.handler.last_err()?;
        Ok(())
    }

    /// Parses and checks the main program file.
    pub fn compile(&mut self) -> Result<()> {
        self.parse_program()?;
        self.compiler_stages()
    }

    /// The checked file tree.
    pub fn as_file(&self) -> &File {
        self.ast.as_repr()
    }

    /// The expression-to-type table produced by the checker.
    pub fn type_table(&self) -> &TypeTable {
        &self.type_table
    }

    /// The interning arena behind the table's type ids.
    pub fn arena(&self) -> &TypeArena {
        &self.arena
    }

    /// Renders every collected diagnostic against the stored source.
    pub fn render_diagnostics(&self, color: bool) -> String {
        let Some(source_file) = &self.source_file else { return String::new() };
        self.handler
            .diagnostics()
            .iter()
            .map(|diagnostic| render_diagnostic(diagnostic, source_file, color))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The driver's exit code: 0 on an empty error list, 1 on any
    /// diagnostic of severity error. Warnings never fail a compile.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.handler.had_errors())
    }
}
