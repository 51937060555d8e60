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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A contiguous range in some source text.
///
/// `line` and `col` locate the first rune of the range, both 1-based and
/// counted in runes (Unicode scalar values). `lo` and `hi` are byte offsets
/// into the source, so that `&source[lo..hi]` is exactly the spanned text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    /// The 1-based line of the first rune.
    pub line: u32,
    /// The 1-based column of the first rune, counted in runes.
    pub col: u32,
    /// The starting byte offset, inclusive.
    pub lo: u32,
    /// The ending byte offset, exclusive.
    pub hi: u32,
}

impl Span {
    /// Generate a new span from its constituent positions.
    pub fn new(line: u32, col: u32, lo: u32, hi: u32) -> Self {
        Self { line, col, lo, hi }
    }

    /// Generates a dummy span with all defaults.
    /// Should only be used in temporary situations.
    pub const fn dummy() -> Self {
        Self { line: 0, col: 0, lo: 0, hi: 0 }
    }

    /// Is the span a dummy?
    pub fn is_dummy(&self) -> bool {
        self == &Self::dummy()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Add for &Span {
    type Output = Span;

    fn add(self, other: &Span) -> Span {
        *self + *other
    }
}

impl Add for Span {
    type Output = Self;

    /// The union of two spans: it covers both inputs and everything between.
    fn add(self, other: Self) -> Self {
        if self.is_dummy() {
            return other;
        }
        if other.is_dummy() {
            return self;
        }

        let (first, last) = if self.lo <= other.lo { (self, other) } else { (other, self) };
        Span {
            line: first.line,
            col: first.col,
            lo: first.lo,
            hi: first.hi.max(last.hi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_union_covers_both() {
        let left = Span::new(1, 5, 4, 9);
        let right = Span::new(3, 1, 20, 26);

        let union = left + right;
        assert_eq!(union, Span::new(1, 5, 4, 26));
        // Union is symmetric.
        assert_eq!(right + left, union);
    }

    #[test]
    fn test_dummy_is_identity() {
        let span = Span::new(2, 3, 10, 12);
        assert_eq!(span + Span::dummy(), span);
        assert_eq!(Span::dummy() + span, span);
    }
}
