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

use fxhash::FxHashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;

/// Defines the `sym::*` constants and the list of strings the interner is
/// seeded with. Constant indices follow the declaration order, so `sym::$name`
/// always resolves to `$text`.
macro_rules! symbols {
    ($($name:ident: $text:literal),* $(,)?) => {
        /// Pre-interned symbols for keywords and common names.
        #[allow(non_upper_case_globals)]
        pub mod sym {
            use super::Symbol;
            symbols!(@consts 0u32; $($name: $text),*);
        }

        const PRE_INTERNED: &[&str] = &[$($text),*];
    };
    (@consts $index:expr; $name:ident: $text:literal $(, $rest:ident: $rest_text:literal)*) => {
        pub const $name: Symbol = Symbol::new($index);
        symbols!(@consts $index + 1u32; $($rest: $rest_text),*);
    };
    (@consts $index:expr;) => {};
}

symbols! {
    // Reserved words.
    Let: "let",
    Mut: "mut",
    Const: "const",
    Fn: "fn",
    Struct: "struct",
    Enum: "enum",
    Trait: "trait",
    Impl: "impl",
    Type: "type",
    Package: "package",
    Use: "use",
    As: "as",
    If: "if",
    Else: "else",
    Match: "match",
    While: "while",
    For: "for",
    In: "in",
    Break: "break",
    Continue: "continue",
    Return: "return",
    True: "true",
    False: "false",
    Null: "null",
    Spawn: "spawn",
    Chan: "chan",
    Select: "select",
    Case: "case",
    Where: "where",
    Unsafe: "unsafe",
    Pub: "pub",
    Mod: "mod",
    Dyn: "dyn",
    Forall: "forall",
    Exists: "exists",
    // Primitive type names.
    int: "int",
    int8: "int8",
    int32: "int32",
    int64: "int64",
    float: "float",
    bool: "bool",
    string: "string",
    void: "void",
    // Common names.
    main: "main",
    Channel: "Channel",
    new: "new",
    Underscore: "_",
}

/// An interned string.
///
/// Two symbols are equal iff their interned strings are equal, so comparison
/// is a single integer compare. The payload is an index into the session
/// interner.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Constructs a symbol from a raw interner index.
    /// Outside the `symbols!` macro, prefer [`Symbol::intern`].
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Maps a string to its interned representation.
    pub fn intern(string: &str) -> Self {
        with_session_globals(|session_globals| session_globals.symbol_interner.intern(string))
    }

    /// Converts this symbol to the string it was interned from.
    pub fn as_str(self) -> &'static str {
        with_session_globals(|session_globals| session_globals.symbol_interner.get(self))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        Ok(Symbol::intern(&string))
    }
}

/// The inner state of [`Interner`], modeled this way to afford an API
/// using interior mutability.
#[derive(Default)]
struct InnerInterner {
    /// Mapping from strings to their interned symbol.
    map: FxHashMap<&'static str, Symbol>,
    /// Mapping from symbol indices back to strings.
    strings: Vec<&'static str>,
}

/// A symbol interner, owning the backing storage of every interned string
/// for the duration of a session.
#[derive(Default)]
pub struct Interner {
    inner: RefCell<InnerInterner>,
}

impl Interner {
    /// Returns an interner seeded with every `sym::*` string, in order.
    fn prefilled() -> Self {
        let interner = Self::default();
        for string in PRE_INTERNED {
            interner.intern(string);
        }
        interner
    }

    /// Interns `string`, returning its symbol.
    fn intern(&self, string: &str) -> Symbol {
        let mut inner = self.inner.borrow_mut();
        if let Some(&symbol) = inner.map.get(string) {
            return symbol;
        }

        // The interner lives for the whole session, so leaking here simply
        // hands ownership of the backing storage to the session.
        let string: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let symbol = Symbol::new(inner.strings.len() as u32);
        inner.strings.push(string);
        inner.map.insert(string, symbol);
        symbol
    }

    /// Returns the string `symbol` was interned from.
    fn get(&self, symbol: Symbol) -> &'static str {
        self.inner.borrow().strings[symbol.0 as usize]
    }
}

/// Per-session global state, accessed through [`with_session_globals`].
pub struct SessionGlobals {
    /// The interner for symbols.
    pub symbol_interner: Interner,
}

impl Default for SessionGlobals {
    fn default() -> Self {
        Self { symbol_interner: Interner::prefilled() }
    }
}

scoped_tls::scoped_thread_local!(pub static SESSION_GLOBALS: SessionGlobals);

/// Creates the session globals if they do not exist already and then runs `f`.
pub fn create_session_if_not_set_then<R>(f: impl FnOnce(&SessionGlobals) -> R) -> R {
    if !SESSION_GLOBALS.is_set() {
        let session_globals = SessionGlobals::default();
        SESSION_GLOBALS.set(&session_globals, || SESSION_GLOBALS.with(f))
    } else {
        SESSION_GLOBALS.with(f)
    }
}

/// Accesses the session globals. Panics if none are set.
pub fn with_session_globals<R>(f: impl FnOnce(&SessionGlobals) -> R) -> R {
    SESSION_GLOBALS.with(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        create_session_if_not_set_then(|_| {
            let first = Symbol::intern("verdant");
            let second = Symbol::intern("verdant");
            assert_eq!(first, second);
            assert_eq!(first.as_str(), "verdant");
        });
    }

    #[test]
    fn test_pre_interned_keywords() {
        create_session_if_not_set_then(|_| {
            assert_eq!(sym::Let, Symbol::intern("let"));
            assert_eq!(sym::Unsafe, Symbol::intern("unsafe"));
            assert_eq!(sym::int, Symbol::intern("int"));
            assert_eq!(sym::Underscore.as_str(), "_");
        });
    }
}
