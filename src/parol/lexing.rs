//! Lexer
//!
//! This module turns `.par` source text into token streams.
//!
//! Structure:
//!     The tokenization is done through the logos lexer library, with the token rules
//!     declared on [Token](crate::parol::token::Token). Two entry points sit on top of it:
//!
//!     - [tokenize] returns the raw stream, trivia included. Every byte of the source is
//!       covered by exactly one token, so [detokenize](crate::parol::token::detokenize)
//!       reproduces the input.
//!     - [lex] returns the stream the parser consumes: the same tokens with whitespace and
//!       comments filtered out.
//!
//!     Both stop at the first lexical error.

pub mod base_tokenization;
pub mod common;

pub use base_tokenization::tokenize;
pub use common::{LexError, TokenStream};

use tracing::debug;

/// Tokenize `source` and drop trivia
pub fn lex(source: &str) -> Result<TokenStream, LexError> {
    let tokens = tokenize(source)?;
    let total = tokens.len();
    let core: TokenStream = tokens
        .into_iter()
        .filter(|(token, _)| !token.is_trivia())
        .collect();
    debug!(tokens = core.len(), trivia = total - core.len(), "lexed source");
    Ok(core)
}
