//! Common lexer types

use crate::parol::token::{LexErrorKind, Token};
use std::ops::Range;
use thiserror::Error;

/// Tokens paired with the byte range they cover
pub type TokenStream = Vec<(Token, Range<usize>)>;

/// The lexer could not produce a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} `{lexeme}` at bytes {}..{}", .range.start, .range.end)]
pub struct LexError {
    pub reason: LexErrorKind,
    /// Byte range of the offending input. For unterminated literals this runs from the
    /// opening delimiter to the end of the source.
    pub range: Range<usize>,
    pub lexeme: String,
}

impl LexError {
    pub fn new(reason: LexErrorKind, range: Range<usize>, source: &str) -> Self {
        let lexeme = source.get(range.clone()).unwrap_or_default();
        // Unterminated literals can swallow the rest of the file; keep the message short.
        let lexeme: String = match lexeme.char_indices().nth(24) {
            Some((cut, _)) => format!("{}...", &lexeme[..cut]),
            None => lexeme.to_string(),
        };
        Self {
            reason,
            range,
            lexeme,
        }
    }
}
