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

/// Generates a constructor type for one family of diagnostics.
///
/// Every message becomes an associated function taking the declared
/// arguments plus a trailing `span`, and returning a [`crate::Diagnostic`]
/// with the given stage, severity, and stable code. Additional labels,
/// notes, and proof steps are attached at the call site through the
/// builder methods on `Diagnostic`.
#[macro_export]
macro_rules! create_messages {
    (
        $(#[$struct_doc:meta])*
        $type_:ident,
        stage: $stage:expr,
        severity: $severity:expr,
        $(
            $(#[$fn_doc:meta])*
            $name:ident {
                args: ($($arg:ident: $arg_ty:ty),* $(,)?),
                code: $code:ident,
                msg: $msg:expr,
                help: $help:expr,
            }
        )*
    ) => {
        $(#[$struct_doc])*
        #[derive(Copy, Clone, Debug)]
        pub struct $type_;

        impl $type_ {
            $(
                $(#[$fn_doc])*
                pub fn $name($($arg: $arg_ty,)* span: $crate::Span) -> $crate::Diagnostic {
                    $crate::Diagnostic::new(
                        $stage,
                        $severity,
                        $crate::DiagnosticCode::$code,
                        $msg.to_string(),
                        span,
                    )
                    .with_help_option($help)
                }
            )*
        }
    };
}
