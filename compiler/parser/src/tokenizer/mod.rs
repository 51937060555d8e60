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

//! The tokenizer to convert Vesper source text into tokens.
//!
//! This module contains the [`tokenize()`] method which breaks down source
//! text into spanned tokens, optionally preserving trivia.

pub(crate) mod token;
pub use self::token::*;

pub(crate) mod lexer;
pub use self::lexer::*;

use vesper_errors::emitter::Handler;

/// Creates a new vector of spanned tokens from the given source text.
///
/// The sequence always terminates with an `Eof` token whose span sits at
/// the end of input. With `emit_trivia` disabled, whitespace and comment
/// tokens are absorbed; the spans of the remaining tokens are identical
/// to a trivia-preserving run. Lexical errors go to the handler; the
/// lexer never fails.
pub fn tokenize(handler: &Handler, source: &str, emit_trivia: bool) -> Vec<SpannedToken> {
    let mut lexer = Lexer::new(handler, source);
    let mut tokens = Vec::new();

    while let Some(spanned) = lexer.next_token() {
        if !emit_trivia && spanned.token.is_trivia() {
            continue;
        }
        tokens.push(spanned);
    }

    tokens.push(SpannedToken { token: Token::Eof, span: lexer.eof_span() });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesper_span::create_session_if_not_set_then;

    fn tokenize_clean(source: &str, emit_trivia: bool) -> Vec<SpannedToken> {
        let handler = Handler::new();
        let tokens = tokenize(&handler, source, emit_trivia);
        assert_eq!(handler.err_count(), 0, "unexpected lexer errors: {:?}", handler.diagnostics());
        tokens
    }

    #[test]
    fn test_string_escapes() {
        create_session_if_not_set_then(|_| {
            let source = r#""hello\nworld""#;
            let tokens = tokenize_clean(source, false);

            assert_eq!(tokens.len(), 2); // The string itself plus Eof.
            let spanned = &tokens[0];
            assert_eq!(spanned.token, Token::StringLit("hello\nworld".into()));
            // The raw text is the exact source slice.
            assert_eq!(&source[spanned.span.lo as usize..spanned.span.hi as usize], source);
            // The span covers exactly the 14 input runes.
            assert_eq!((spanned.span.line, spanned.span.col), (1, 1));
            assert_eq!((spanned.span.lo, spanned.span.hi), (0, 14));
        });
    }

    #[test]
    fn test_nested_block_comments() {
        create_session_if_not_set_then(|_| {
            let source = "let x = 10; /* outer /* inner */ still outer */ let y = 20;";
            let tokens = tokenize_clean(source, false);

            let kinds: Vec<String> = tokens.iter().map(|t| t.token.to_string()).collect();
            assert_eq!(kinds, vec!["let", "x", "=", "10", ";", "let", "y", "=", "20", ";", "<eof>"]);
        });
    }

    #[test]
    fn test_unterminated_block_comment_recovers_at_eof() {
        create_session_if_not_set_then(|_| {
            let handler = Handler::new();
            let tokens = tokenize(&handler, "let /* never closed", false);
            assert_eq!(handler.err_count(), 1);
            // Lexing still reaches Eof.
            assert_eq!(tokens.last().unwrap().token, Token::Eof);
        });
    }

    #[test]
    fn test_trivia_mode_preserves_spans() {
        create_session_if_not_set_then(|_| {
            let source = "fn main() { // comment\r\n    let x_y = 0xff_00; }\n";
            let with_trivia = tokenize_clean(source, true);
            let without_trivia = tokenize_clean(source, false);

            let filtered: Vec<&SpannedToken> = with_trivia.iter().filter(|t| !t.token.is_trivia()).collect();
            assert_eq!(filtered.len(), without_trivia.len());
            for (filtered_token, plain_token) in filtered.iter().zip(without_trivia.iter()) {
                assert_eq!(filtered_token.token, plain_token.token);
                assert_eq!(filtered_token.span, plain_token.span);
            }
        });
    }

    #[test]
    fn test_raw_text_matches_span() {
        create_session_if_not_set_then(|_| {
            let source = "let mut total = first_value + 2_000 * other(3, arr[1..4]);";
            let tokens = tokenize_clean(source, false);
            for spanned in &tokens {
                if spanned.token == Token::Eof {
                    continue;
                }
                let slice = &source[spanned.span.lo as usize..spanned.span.hi as usize];
                assert_eq!(slice, spanned.token.to_string(), "span of {:?} does not match", spanned);
            }
        });
    }

    #[test]
    fn test_digit_separators_decoded() {
        create_session_if_not_set_then(|_| {
            let tokens = tokenize_clean("2_000_000 1_0.5_0", false);
            assert_eq!(tokens[0].token, Token::Int("2_000_000".into()));
            assert_eq!(tokens[0].token.decoded_value().unwrap(), "2000000");
            assert_eq!(tokens[1].token, Token::Float("1_0.5_0".into()));
            assert_eq!(tokens[1].token.decoded_value().unwrap(), "10.50");
        });
    }

    #[test]
    fn test_spans_count_runes() {
        create_session_if_not_set_then(|_| {
            // `é` is two bytes but one rune; columns count runes.
            let source = "lét x = 1;\nx";
            let tokens = tokenize_clean(source, false);
            assert_eq!(tokens[0].token, Token::Ident(vesper_span::Symbol::intern("lét")));
            assert_eq!((tokens[1].span.line, tokens[1].span.col), (1, 5));
            // The token on line 2 starts at column 1.
            let last_ident = &tokens[tokens.len() - 2];
            assert_eq!((last_ident.span.line, last_ident.span.col), (2, 1));
        });
    }

    #[test]
    fn test_illegal_rune_continues() {
        create_session_if_not_set_then(|_| {
            let handler = Handler::new();
            let tokens = tokenize(&handler, "let @ x", false);
            assert_eq!(handler.err_count(), 1);
            let kinds: Vec<String> = tokens.iter().map(|t| t.token.to_string()).collect();
            assert_eq!(kinds, vec!["let", "@", "x", "<eof>"]);
        });
    }

    #[test]
    fn test_maximal_munch_operators() {
        create_session_if_not_set_then(|_| {
            let tokens = tokenize_clean("== => = -> - <= <- < >= > != ! && & || | :: : ..= .. .", false);
            let kinds: Vec<String> = tokens.iter().map(|t| t.token.to_string()).collect();
            assert_eq!(kinds, vec![
                "==", "=>", "=", "->", "-", "<=", "<-", "<", ">=", ">", "!=", "!", "&&", "&", "||", "|", "::", ":",
                "..=", "..", ".", "<eof>"
            ]);
        });
    }
}
