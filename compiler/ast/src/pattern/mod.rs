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

use crate::{simple_node_impl, Identifier, Literal, Node, NodeID};
use vesper_span::Span;

use serde::{Deserialize, Serialize};
use std::fmt;

/// The wildcard pattern `_`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildcardPattern {
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(WildcardPattern);

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "_")
    }
}

/// An identifier pattern, binding the matched value to a fresh name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierPattern {
    /// Whether the binding is mutable, i.e. `mut x`.
    pub mutable: bool,
    pub identifier: Identifier,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(IdentifierPattern);

impl fmt::Display for IdentifierPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", if self.mutable { "mut " } else { "" }, self.identifier)
    }
}

/// A literal pattern, e.g. `1`, `"x"`, or `true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralPattern {
    pub literal: Literal,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(LiteralPattern);

impl fmt::Display for LiteralPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}

/// A range pattern `1..5` or `1..=5`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePattern {
    pub start: Literal,
    pub stop: Literal,
    pub inclusive: bool,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(RangePattern);

impl fmt::Display for RangePattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.start, if self.inclusive { "..=" } else { ".." }, self.stop)
    }
}

/// A tuple pattern `(p1, p2)`, possibly containing one `..` rest marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuplePattern {
    pub elements: Vec<Pattern>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(TuplePattern);

impl fmt::Display for TuplePattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, ")")
    }
}

/// A tuple-struct pattern `Name(p1, p2)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleStructPattern {
    pub name: Identifier,
    pub elements: Vec<Pattern>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(TupleStructPattern);

impl fmt::Display for TupleStructPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, ")")
    }
}

/// One field of a struct pattern: `name` or `name: pattern`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPattern {
    pub identifier: Identifier,
    /// `None` is the shorthand, binding the field to a name of its own.
    pub pattern: Option<Pattern>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(FieldPattern);

impl fmt::Display for FieldPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.pattern {
            Some(pattern) => write!(f, "{}: {pattern}", self.identifier),
            None => write!(f, "{}", self.identifier),
        }
    }
}

/// A struct pattern `Name { f1, f2: p, .. }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructPattern {
    pub name: Identifier,
    pub fields: Vec<FieldPattern>,
    /// Whether the pattern ends with a `..` rest marker.
    pub rest: bool,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(StructPattern);

impl fmt::Display for StructPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {{ ", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        if self.rest {
            write!(f, "{}..", if self.fields.is_empty() { "" } else { ", " })?;
        }
        write!(f, " }}")
    }
}

/// An enum variant pattern `Enum::Variant` or `Enum::Variant(p...)`.
/// A bare `Variant` (without the enum path) parses as an identifier or
/// tuple-struct pattern and is resolved against the scrutinee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPattern {
    pub enum_: Identifier,
    pub variant: Identifier,
    /// The payload patterns; `None` for a unit variant pattern.
    pub elements: Option<Vec<Pattern>>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(VariantPattern);

impl fmt::Display for VariantPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}::{}", self.enum_, self.variant)?;
        if let Some(elements) = &self.elements {
            write!(f, "(")?;
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{element}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// A reference pattern `&p` or `&mut p`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePattern {
    pub mutable: bool,
    pub inner: Box<Pattern>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ReferencePattern);

impl fmt::Display for ReferencePattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "&{}{}", if self.mutable { "mut " } else { "" }, self.inner)
    }
}

/// A slice pattern `[p1, .., pn]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlicePattern {
    pub elements: Vec<Pattern>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(SlicePattern);

impl fmt::Display for SlicePattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{element}")?;
        }
        write!(f, "]")
    }
}

/// An or-pattern `p1 | p2 | p3`. Matches when any alternative matches;
/// all alternatives must bind the same names at the same types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrPattern {
    pub alternatives: Vec<Pattern>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(OrPattern);

impl fmt::Display for OrPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, alternative) in self.alternatives.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{alternative}")?;
        }
        Ok(())
    }
}

/// A parenthesized pattern `(p)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParenPattern {
    pub inner: Box<Pattern>,
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(ParenPattern);

impl fmt::Display for ParenPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.inner)
    }
}

/// The `..` rest marker, legal once per tuple, struct, or slice pattern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestPattern {
    pub span: Span,
    pub id: NodeID,
}

simple_node_impl!(RestPattern);

impl fmt::Display for RestPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "..")
    }
}

/// A pattern, as found in match arms, select cases, and their subpatterns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// The `_` pattern.
    Wildcard(WildcardPattern),
    /// A binding pattern.
    Identifier(IdentifierPattern),
    /// A literal pattern.
    Literal(LiteralPattern),
    /// A range pattern.
    Range(RangePattern),
    /// A tuple pattern.
    Tuple(TuplePattern),
    /// A tuple-struct pattern.
    TupleStruct(TupleStructPattern),
    /// A struct pattern.
    Struct(StructPattern),
    /// An enum variant pattern.
    Variant(VariantPattern),
    /// A reference pattern.
    Reference(ReferencePattern),
    /// A slice pattern.
    Slice(SlicePattern),
    /// An or-pattern.
    Or(OrPattern),
    /// A parenthesized pattern.
    Paren(ParenPattern),
    /// The `..` rest marker.
    Rest(RestPattern),
}

impl Pattern {
    /// Is this pattern irrefutable, i.e. does it match every value of its
    /// type regardless of the value's shape?
    ///
    /// Constructor patterns are conservatively treated as refutable; the
    /// checker refines this against the scrutinee type.
    pub fn is_irrefutable(&self) -> bool {
        match self {
            Self::Wildcard(_) | Self::Identifier(_) | Self::Rest(_) => true,
            Self::Paren(pattern) => pattern.inner.is_irrefutable(),
            Self::Reference(pattern) => pattern.inner.is_irrefutable(),
            Self::Tuple(pattern) => pattern.elements.iter().all(Self::is_irrefutable),
            Self::Or(pattern) => pattern.alternatives.iter().any(Self::is_irrefutable),
            _ => false,
        }
    }
}

impl Node for Pattern {
    fn span(&self) -> Span {
        use Pattern::*;
        match self {
            Wildcard(n) => n.span(),
            Identifier(n) => n.span(),
            Literal(n) => n.span(),
            Range(n) => n.span(),
            Tuple(n) => n.span(),
            TupleStruct(n) => n.span(),
            Struct(n) => n.span(),
            Variant(n) => n.span(),
            Reference(n) => n.span(),
            Slice(n) => n.span(),
            Or(n) => n.span(),
            Paren(n) => n.span(),
            Rest(n) => n.span(),
        }
    }

    fn set_span(&mut self, span: Span) {
        use Pattern::*;
        match self {
            Wildcard(n) => n.set_span(span),
            Identifier(n) => n.set_span(span),
            Literal(n) => n.set_span(span),
            Range(n) => n.set_span(span),
            Tuple(n) => n.set_span(span),
            TupleStruct(n) => n.set_span(span),
            Struct(n) => n.set_span(span),
            Variant(n) => n.set_span(span),
            Reference(n) => n.set_span(span),
            Slice(n) => n.set_span(span),
            Or(n) => n.set_span(span),
            Paren(n) => n.set_span(span),
            Rest(n) => n.set_span(span),
        }
    }

    fn id(&self) -> NodeID {
        use Pattern::*;
        match self {
            Wildcard(n) => n.id(),
            Identifier(n) => n.id(),
            Literal(n) => n.id(),
            Range(n) => n.id(),
            Tuple(n) => n.id(),
            TupleStruct(n) => n.id(),
            Struct(n) => n.id(),
            Variant(n) => n.id(),
            Reference(n) => n.id(),
            Slice(n) => n.id(),
            Or(n) => n.id(),
            Paren(n) => n.id(),
            Rest(n) => n.id(),
        }
    }

    fn set_id(&mut self, id: NodeID) {
        use Pattern::*;
        match self {
            Wildcard(n) => n.set_id(id),
            Identifier(n) => n.set_id(id),
            Literal(n) => n.set_id(id),
            Range(n) => n.set_id(id),
            Tuple(n) => n.set_id(id),
            TupleStruct(n) => n.set_id(id),
            Struct(n) => n.set_id(id),
            Variant(n) => n.set_id(id),
            Reference(n) => n.set_id(id),
            Slice(n) => n.set_id(id),
            Or(n) => n.set_id(id),
            Paren(n) => n.set_id(id),
            Rest(n) => n.set_id(id),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Pattern::*;
        match self {
            Wildcard(n) => n.fmt(f),
            Identifier(n) => n.fmt(f),
            Literal(n) => n.fmt(f),
            Range(n) => n.fmt(f),
            Tuple(n) => n.fmt(f),
            TupleStruct(n) => n.fmt(f),
            Struct(n) => n.fmt(f),
            Variant(n) => n.fmt(f),
            Reference(n) => n.fmt(f),
            Slice(n) => n.fmt(f),
            Or(n) => n.fmt(f),
            Paren(n) => n.fmt(f),
            Rest(n) => n.fmt(f),
        }
    }
}
