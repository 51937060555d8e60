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

use super::*;

use vesper_ast::*;
use vesper_errors::{ParserError, Result};

impl ParserContext<'_> {
    /// Returns a [`File`] AST if all tokens can be consumed.
    ///
    /// The parser never gives up on a recoverable failure: an erroneous
    /// declaration is dropped, its diagnostic recorded, and parsing
    /// resumes at the next declaration keyword.
    pub fn parse_file(&mut self) -> Result<File> {
        let start = self.token.span;

        let package = if self.check(&Token::Package) {
            match self.parse_package_decl() {
                Ok(package) => Some(package),
                Err(err) => {
                    self.emit_err(err);
                    self.synchronize_declaration();
                    None
                }
            }
        } else {
            None
        };

        let mut modules = Vec::new();
        let mut uses = Vec::new();
        while self.check(&Token::Mod) || self.check(&Token::Use) {
            let result = if self.check(&Token::Mod) {
                self.parse_module_decl().map(|module| modules.push(module))
            } else {
                self.parse_use_decl().map(|use_| uses.push(use_))
            };
            if let Err(err) = result {
                self.emit_err(err);
                self.synchronize_declaration();
            }
        }

        let mut declarations = Vec::new();
        while self.has_next() {
            let before = self.token.span;
            match self.parse_declaration() {
                Ok(declaration) => declarations.push(declaration),
                Err(err) => {
                    self.emit_err(err);
                    self.synchronize_declaration();
                    // The synchronizing token may be the one that failed;
                    // force progress so dispatch cannot loop.
                    if self.has_next() && self.token.span == before {
                        self.bump();
                        self.synchronize_declaration();
                    }
                }
            }
        }

        let span = if start.is_dummy() { start } else { start + self.prev_token.span };
        Ok(File {
            package,
            modules,
            uses,
            declarations,
            span,
            id: self.next_id(),
        })
    }

    fn parse_package_decl(&mut self) -> Result<PackageDecl> {
        let start = self.expect(&Token::Package)?;
        let identifier = self.expect_identifier()?;
        let end = self.expect(&Token::Semicolon)?;
        Ok(PackageDecl { span: start + end, id: self.next_id(), identifier })
    }

    fn parse_module_decl(&mut self) -> Result<ModuleDecl> {
        let start = self.expect(&Token::Mod)?;
        let identifier = self.expect_identifier()?;
        let end = self.expect(&Token::Semicolon)?;
        Ok(ModuleDecl { span: start + end, id: self.next_id(), identifier })
    }

    fn parse_use_decl(&mut self) -> Result<UseDecl> {
        let start = self.expect(&Token::Use)?;
        let mut path = vec![self.expect_identifier()?];
        while self.eat(&Token::DoubleColon) {
            path.push(self.expect_identifier()?);
        }
        let alias = if self.eat(&Token::As) { Some(self.expect_identifier()?) } else { None };
        let end = self.expect(&Token::Semicolon)?;
        Ok(UseDecl { span: start + end, id: self.next_id(), path, alias })
    }

    /// Parses one top-level declaration, dispatching on its keyword.
    pub(super) fn parse_declaration(&mut self) -> Result<Declaration> {
        let is_pub = self.eat(&Token::Pub);
        let is_unsafe =
            self.check(&Token::Unsafe) && self.look_ahead(1, |t| matches!(t.token, Token::Fn)) && {
                self.bump();
                true
            };

        match &self.token.token {
            Token::Fn => Ok(Declaration::Function(self.parse_function_declaration(is_pub, is_unsafe)?)),
            Token::Struct => Ok(Declaration::Struct(self.parse_struct_declaration(is_pub)?)),
            Token::Enum => Ok(Declaration::Enum(self.parse_enum_declaration(is_pub)?)),
            Token::Trait => Ok(Declaration::Trait(self.parse_trait_declaration(is_pub)?)),
            Token::Impl => Ok(Declaration::Impl(self.parse_impl_declaration()?)),
            Token::Type => Ok(Declaration::TypeAlias(self.parse_type_alias_declaration(is_pub)?)),
            Token::Const => Ok(Declaration::Const(self.parse_const_declaration(is_pub)?)),
            _ => self.unexpected("a declaration"),
        }
    }

    /// Parses a value parameter `name: T`.
    pub(super) fn parse_param(&mut self) -> Result<Param> {
        let identifier = self.expect_identifier()?;
        self.expect(&Token::Colon)?;
        let type_ = self.parse_type()?;
        Ok(Param {
            span: identifier.span + type_.span(),
            id: self.next_id(),
            identifier,
            type_,
        })
    }

    /// Parses a `where` clause: `where T: Tr, U: Other`.
    fn parse_where_clause(&mut self) -> Result<Vec<WherePredicate>> {
        if !self.eat(&Token::Where) {
            return Ok(Vec::new());
        }

        let mut predicates = Vec::new();
        loop {
            let type_ = self.parse_type()?;
            self.expect(&Token::Colon)?;
            let bounds = self.parse_trait_bounds()?;
            let span = type_.span() + bounds.last().map(|b| b.span).unwrap_or_else(|| type_.span());
            predicates.push(WherePredicate { span, id: self.next_id(), type_, bounds });
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        Ok(predicates)
    }

    /// Returns a [`Function`] AST node if the next tokens represent a
    /// function declaration.
    pub(super) fn parse_function_declaration(&mut self, is_pub: bool, is_unsafe: bool) -> Result<Function> {
        let start = self.expect(&Token::Fn)?;
        let identifier = self.expect_identifier()?;

        let generics = if self.check(&Token::LeftSquare) { self.parse_generic_params()? } else { Vec::new() };
        let (parameters, ..) = self.parse_paren_comma_list(|p| p.parse_param().map(Some))?;

        let output = if self.eat(&Token::Arrow) { Some(self.parse_type()?) } else { None };
        let effects = if self.eat(&Token::Div) { Some(self.parse_effect_row()?) } else { None };
        let where_clause = self.parse_where_clause()?;

        let block = self.parse_block()?;

        Ok(Function {
            span: start + block.span,
            id: self.next_id(),
            is_pub,
            is_unsafe,
            identifier,
            generics,
            parameters,
            output,
            effects,
            where_clause,
            block,
        })
    }

    fn parse_struct_declaration(&mut self, is_pub: bool) -> Result<StructDecl> {
        let start = self.expect(&Token::Struct)?;
        let identifier = self.expect_identifier()?;
        let generics = if self.check(&Token::LeftSquare) { self.parse_generic_params()? } else { Vec::new() };

        let (fields, _, end) = self.parse_brace_comma_list(|p| {
            let identifier = p.expect_identifier()?;
            p.expect(&Token::Colon)?;
            let type_ = p.parse_type()?;
            Ok(Some(StructField {
                span: identifier.span + type_.span(),
                id: p.next_id(),
                identifier,
                type_,
            }))
        })?;

        Ok(StructDecl {
            span: start + end,
            id: self.next_id(),
            is_pub,
            identifier,
            generics,
            fields,
        })
    }

    fn parse_enum_declaration(&mut self, is_pub: bool) -> Result<EnumDecl> {
        let start = self.expect(&Token::Enum)?;
        let identifier = self.expect_identifier()?;
        let generics = if self.check(&Token::LeftSquare) { self.parse_generic_params()? } else { Vec::new() };

        let (variants, _, end) = self.parse_brace_comma_list(|p| {
            let identifier = p.expect_identifier()?;
            let (payload, span) = if p.check(&Token::LeftParen) {
                let (payload, _, end) = p.parse_paren_comma_list(|p| p.parse_type().map(Some))?;
                (payload, identifier.span + end)
            } else {
                (Vec::new(), identifier.span)
            };
            Ok(Some(EnumVariant { span, id: p.next_id(), identifier, payload }))
        })?;

        // A well-formed enum declares at least one variant.
        if variants.is_empty() {
            self.emit_err(ParserError::unexpected("}", "at least one enum variant", end));
        }

        Ok(EnumDecl {
            span: start + end,
            id: self.next_id(),
            is_pub,
            identifier,
            generics,
            variants,
        })
    }

    fn parse_trait_declaration(&mut self, is_pub: bool) -> Result<TraitDecl> {
        let start = self.expect(&Token::Trait)?;
        let identifier = self.expect_identifier()?;
        let generics = if self.check(&Token::LeftSquare) { self.parse_generic_params()? } else { Vec::new() };

        self.expect(&Token::LeftCurly)?;
        let mut methods = Vec::new();
        let mut associated_types = Vec::new();

        while !self.check(&Token::RightCurly) {
            match &self.token.token {
                Token::Type => {
                    let type_start = self.expect(&Token::Type)?;
                    let identifier = self.expect_identifier()?;
                    let bounds = if self.eat(&Token::Colon) { self.parse_trait_bounds()? } else { Vec::new() };
                    let type_end = self.expect(&Token::Semicolon)?;
                    associated_types.push(AssociatedTypeDecl {
                        span: type_start + type_end,
                        id: self.next_id(),
                        identifier,
                        bounds,
                    });
                }
                Token::Fn => methods.push(self.parse_trait_method()?),
                _ => return self.unexpected("'type' or 'fn'"),
            }
        }

        let end = self.expect(&Token::RightCurly)?;
        Ok(TraitDecl {
            span: start + end,
            id: self.next_id(),
            is_pub,
            identifier,
            generics,
            methods,
            associated_types,
        })
    }

    /// A trait method: a signature, followed by `;` or a default body.
    fn parse_trait_method(&mut self) -> Result<TraitMethod> {
        let start = self.expect(&Token::Fn)?;
        let identifier = self.expect_identifier()?;
        let generics = if self.check(&Token::LeftSquare) { self.parse_generic_params()? } else { Vec::new() };
        let (parameters, ..) = self.parse_paren_comma_list(|p| p.parse_param().map(Some))?;
        let output = if self.eat(&Token::Arrow) { Some(self.parse_type()?) } else { None };
        let effects = if self.eat(&Token::Div) { Some(self.parse_effect_row()?) } else { None };
        let where_clause = self.parse_where_clause()?;

        let (body, end) = if self.check(&Token::LeftCurly) {
            let block = self.parse_block()?;
            let span = block.span;
            (Some(block), span)
        } else {
            (None, self.expect(&Token::Semicolon)?)
        };

        Ok(TraitMethod {
            span: start + end,
            id: self.next_id(),
            identifier,
            generics,
            parameters,
            output,
            effects,
            where_clause,
            body,
        })
    }

    fn parse_impl_declaration(&mut self) -> Result<ImplDecl> {
        let start = self.expect(&Token::Impl)?;
        let generics = if self.check(&Token::LeftSquare) { self.parse_generic_params()? } else { Vec::new() };

        let first = self.parse_type()?;
        let (trait_, target) = if self.eat(&Token::For) {
            let trait_ = self.trait_bound_from_type(first)?;
            (Some(trait_), self.parse_type()?)
        } else {
            (None, first)
        };

        let where_clause = self.parse_where_clause()?;

        self.expect(&Token::LeftCurly)?;
        let mut methods = Vec::new();
        let mut associated_types = Vec::new();

        while !self.check(&Token::RightCurly) {
            match &self.token.token {
                Token::Type => {
                    let type_start = self.expect(&Token::Type)?;
                    let identifier = self.expect_identifier()?;
                    self.expect(&Token::Assign)?;
                    let type_ = self.parse_type()?;
                    let type_end = self.expect(&Token::Semicolon)?;
                    associated_types.push(AssociatedTypeBinding {
                        span: type_start + type_end,
                        id: self.next_id(),
                        identifier,
                        type_,
                    });
                }
                Token::Pub | Token::Unsafe | Token::Fn => {
                    let is_pub = self.eat(&Token::Pub);
                    let is_unsafe = self.check(&Token::Unsafe) && {
                        self.bump();
                        true
                    };
                    methods.push(self.parse_function_declaration(is_pub, is_unsafe)?);
                }
                _ => return self.unexpected("'type' or 'fn'"),
            }
        }

        let end = self.expect(&Token::RightCurly)?;
        Ok(ImplDecl {
            span: start + end,
            id: self.next_id(),
            trait_,
            target,
            generics,
            where_clause,
            methods,
            associated_types,
        })
    }

    /// Reinterprets a parsed type as the trait of an `impl Tr for T`.
    fn trait_bound_from_type(&self, type_: TypeExpression) -> Result<TraitBound> {
        match type_ {
            TypeExpression::Named(named) => Ok(TraitBound {
                span: named.span,
                id: self.next_id(),
                name: named.name,
                arguments: Vec::new(),
            }),
            TypeExpression::Generic(generic) => Ok(TraitBound {
                span: generic.span,
                id: self.next_id(),
                name: generic.base,
                arguments: generic.arguments,
            }),
            other => Err(ParserError::malformed_type(&other, other.span())),
        }
    }

    fn parse_type_alias_declaration(&mut self, is_pub: bool) -> Result<TypeAliasDecl> {
        let start = self.expect(&Token::Type)?;
        let identifier = self.expect_identifier()?;
        let generics = if self.check(&Token::LeftSquare) { self.parse_generic_params()? } else { Vec::new() };
        self.expect(&Token::Assign)?;
        let type_ = self.parse_type()?;
        let end = self.expect(&Token::Semicolon)?;

        Ok(TypeAliasDecl {
            span: start + end,
            id: self.next_id(),
            is_pub,
            identifier,
            generics,
            type_,
        })
    }

    fn parse_const_declaration(&mut self, is_pub: bool) -> Result<ConstDecl> {
        let start = self.expect(&Token::Const)?;
        let identifier = self.expect_identifier()?;
        self.expect(&Token::Colon)?;
        let type_ = self.parse_type()?;
        self.expect(&Token::Assign)?;
        let value = self.parse_expression()?;
        let end = self.expect(&Token::Semicolon)?;

        Ok(ConstDecl {
            span: start + end,
            id: self.next_id(),
            is_pub,
            identifier,
            type_,
            value,
        })
    }
}
