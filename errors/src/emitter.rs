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

use crate::{Diagnostic, Result, Severity};

use std::cell::RefCell;

/// Contains the actual data for `Handler`.
/// Modeled this way to afford an API using interior mutability.
#[derive(Debug, Default)]
struct HandlerInner {
    /// Number of error-severity diagnostics emitted so far.
    err_count: usize,
    /// Number of warning-severity diagnostics emitted so far.
    warn_count: usize,
    /// All diagnostics, in emission order.
    collected: Vec<Diagnostic>,
}

impl HandlerInner {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.err_count += 1,
            Severity::Warning => self.warn_count += 1,
        }
        self.collected.push(diagnostic);
    }

    fn last_err(&self) -> Option<Diagnostic> {
        self.collected.iter().rev().find(|d| d.is_error()).cloned()
    }
}

/// A handler deals with diagnostics emitted during the whole front-end run.
///
/// Diagnostics are accumulated, never thrown; each pass emits as it goes and
/// the driver decides what to do with the collected list.
#[derive(Debug, Default)]
pub struct Handler {
    inner: RefCell<HandlerInner>,
}

impl Handler {
    /// Construct a fresh `Handler`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit the error `diagnostic`.
    pub fn emit_err(&self, diagnostic: Diagnostic) {
        debug_assert!(diagnostic.is_error());
        self.inner.borrow_mut().emit(diagnostic);
    }

    /// Emit the warning `diagnostic`.
    pub fn emit_warning(&self, diagnostic: Diagnostic) {
        debug_assert!(!diagnostic.is_error());
        self.inner.borrow_mut().emit(diagnostic);
    }

    /// The number of errors emitted so far.
    pub fn err_count(&self) -> usize {
        self.inner.borrow().err_count
    }

    /// The number of warnings emitted so far.
    pub fn warn_count(&self) -> usize {
        self.inner.borrow().warn_count
    }

    /// Did we have any errors so far?
    pub fn had_errors(&self) -> bool {
        self.err_count() > 0
    }

    /// Gets the last emitted error, if any, as a `Result`
    /// so that a pass can short-circuit its caller.
    pub fn last_err(&self) -> Result<()> {
        match self.inner.borrow().last_err() {
            Some(diagnostic) => Err(diagnostic),
            None => Ok(()),
        }
    }

    /// Returns a snapshot of every diagnostic emitted so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.inner.borrow().collected.clone()
    }

    /// Extracts all diagnostics, leaving the handler empty but keeping counts.
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.inner.borrow_mut().collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LexerError, TypeCheckerWarning};
    use vesper_span::Span;

    #[test]
    fn test_counts_and_order() {
        let handler = Handler::new();
        assert!(!handler.had_errors());
        assert!(handler.last_err().is_ok());

        handler.emit_warning(TypeCheckerWarning::unreachable_arm(Span::dummy()));
        handler.emit_err(LexerError::unterminated_string(Span::new(1, 1, 0, 4)));

        assert_eq!(handler.err_count(), 1);
        assert_eq!(handler.warn_count(), 1);
        assert!(handler.had_errors());
        assert!(handler.last_err().is_err());

        let collected = handler.take_diagnostics();
        assert_eq!(collected.len(), 2);
        // Emission order is preserved.
        assert!(!collected[0].is_error());
        assert!(collected[1].is_error());
    }
}
