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

use crate::Span;

use std::fmt;
use std::path::PathBuf;

/// The name of a source file handed to the front-end.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FileName {
    /// A file on disk.
    Real(PathBuf),
    /// Any sort of virtual file, e.g., for tests.
    Custom(String),
}

impl FileName {
    /// A nameless virtual file.
    pub fn anonymous() -> Self {
        Self::Custom("<input>".into())
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(path) => path.display().fmt(f),
            Self::Custom(name) => name.fmt(f),
        }
    }
}

/// A single source file together with its name, as read at entry.
/// Diagnostics are rendered against this.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// The name of the file.
    pub name: FileName,
    /// The complete source text.
    pub src: String,
}

impl SourceFile {
    pub fn new(name: FileName, src: impl Into<String>) -> Self {
        Self { name, src: src.into() }
    }

    /// Returns the text of the 1-based line `line`, without its terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.src.lines().nth(line as usize - 1)
    }

    /// Returns the exact source slice covered by `span`.
    pub fn contents_of_span(&self, span: Span) -> &str {
        &self.src[span.lo as usize..span.hi as usize]
    }

    /// Number of lines in the file.
    pub fn line_count(&self) -> u32 {
        self.src.lines().count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text() {
        let file = SourceFile::new(FileName::Custom("test.vsp".into()), "let a = 1;\nlet b = 2;\r\nlet c = 3;");
        assert_eq!(file.line_text(1), Some("let a = 1;"));
        assert_eq!(file.line_text(2), Some("let b = 2;"));
        assert_eq!(file.line_text(3), Some("let c = 3;"));
        assert_eq!(file.line_text(4), None);
        assert_eq!(file.line_text(0), None);
    }

    #[test]
    fn test_contents_of_span() {
        let file = SourceFile::new(FileName::anonymous(), "let a = 1;");
        assert_eq!(file.contents_of_span(Span::new(1, 5, 4, 5)), "a");
    }
}
