//! Core token types and helpers shared across the lexer, parser, and tooling.
//!
//!     This module provides the token types used throughout the lexing and parsing pipeline.
//!
//! Token Layers
//!
//!     Trivia Tokens:
//!         Whitespace, LineComment, BlockComment. The logos lexer emits them like any other
//!         token so that the raw stream covers every byte of the source. This is what makes
//!         detokenizing exact. The parser never sees them: [lex](crate::parol::lexing::lex)
//!         filters them out.
//!
//!     Core Tokens:
//!         Identifiers, the three literal kinds (string, raw string, regex), directive keywords
//!         and punctuation. See [core](core) for the complete list.
//!
//!     Token Kinds:
//!         [TokenKind] is the payload-free twin of [Token]. The parser's first-token
//!         classification and the `expected` sets of parse errors are expressed in kinds.

pub mod core;
pub mod formatting;

pub use core::{LexErrorKind, Token, TokenKind};
pub use formatting::{detokenize, ToParString};
