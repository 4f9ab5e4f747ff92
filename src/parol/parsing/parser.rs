//! Parser state and shared helpers

use crate::parol::ast::{ParolGrammar, ParseError, Range, SourceLocation};
use crate::parol::lexing::TokenStream;
use crate::parol::token::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// Deepest group/optional/repeat nesting accepted. Every level costs a few stack frames,
/// so this bounds stack use on hostile input.
pub const MAX_NESTING: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Resynchronize after an error and keep looking for more
    pub recover: bool,
    /// Stop after this many errors; 0 means no limit
    pub max_errors: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            recover: true,
            max_errors: 100,
        }
    }
}

impl ParserOptions {
    pub fn fail_fast() -> Self {
        Self {
            recover: false,
            max_errors: 1,
        }
    }
}

/// Recursive descent parser for one grammar file
pub struct Parser {
    pub(super) tokens: TokenStream,
    pub(super) position: usize,
    locations: SourceLocation,
    source_len: usize,
    options: ParserOptions,
    /// Kinds tried at the current position since the last consumed token
    expected: Vec<TokenKind>,
    errors: Vec<ParseError>,
    /// Brackets currently open around the parse position
    pub(super) depth: usize,
    /// Set once reporting more errors is pointless; every loop bails out
    pub(super) halted: bool,
}

impl Parser {
    pub fn new(source: &str, tokens: TokenStream, options: ParserOptions) -> Self {
        Self {
            tokens,
            position: 0,
            locations: SourceLocation::new(source),
            source_len: source.len(),
            options,
            expected: Vec::new(),
            errors: Vec::new(),
            depth: 0,
            halted: false,
        }
    }

    /// Parse the whole token stream (rule `parol`)
    pub fn parse(mut self) -> Result<ParolGrammar, Vec<ParseError>> {
        let prolog = self.parse_prolog();
        let grammar_definition = if self.halted {
            None
        } else {
            self.parse_grammar_definition()
        };

        if !self.errors.is_empty() {
            debug!(errors = self.errors.len(), "parse failed");
            return Err(self.errors);
        }
        match (prolog, grammar_definition) {
            (Some(prolog), Some(grammar_definition)) => {
                let location = prolog.location.to(&grammar_definition.location);
                Ok(ParolGrammar {
                    prolog,
                    grammar_definition,
                    location,
                })
            }
            _ => unreachable!("a missing part of the tree is always reported as an error"),
        }
    }

    // ===== Cursor =====

    pub(super) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek_kind_at(0)
    }

    pub(super) fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens
            .get(self.position + offset)
            .map(|(token, _)| token.kind())
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Test the next token without consuming it. A miss is remembered for error messages.
    pub(super) fn check(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            true
        } else {
            self.expected.push(kind);
            false
        }
    }

    pub(super) fn check_any(&mut self, kinds: &[TokenKind]) -> bool {
        let hit = matches!(self.peek_kind(), Some(kind) if kinds.contains(&kind));
        if !hit {
            self.expected.extend_from_slice(kinds);
        }
        hit
    }

    /// Consume the next token if it has the given kind
    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the next token unconditionally
    pub(super) fn bump(&mut self) -> (Token, Range) {
        let (token, span) = self.tokens[self.position].clone();
        self.position += 1;
        self.expected.clear();
        (token, self.locations.byte_range_to_ast_range(&span))
    }

    pub(super) fn expect(&mut self, kind: TokenKind) -> ParseResult<(Token, Range)> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected())
        }
    }

    // ===== Locations =====

    /// Range of the next token, or an empty range at the end of the source
    pub(super) fn current_range(&self) -> Range {
        match self.tokens.get(self.position) {
            Some((_, span)) => self.locations.byte_range_to_ast_range(span),
            None => self
                .locations
                .byte_range_to_ast_range(&(self.source_len..self.source_len)),
        }
    }

    pub(super) fn previous_range(&self) -> Range {
        match self.position.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some((_, span)) => self.locations.byte_range_to_ast_range(span),
            None => Range::default(),
        }
    }

    /// Range from the token at `start` through the last consumed token
    pub(super) fn range_from(&self, start: usize) -> Range {
        if self.position <= start {
            let here = self.current_range();
            return Range::new(here.span.start..here.span.start, here.start, here.start);
        }
        let first_span = &self.tokens[start].1;
        let last_span = &self.tokens[self.position - 1].1;
        self.locations
            .byte_range_to_ast_range(&(first_span.start..last_span.end))
    }

    // ===== Errors and recovery =====

    /// Build an error for the next token from everything tried at this position
    pub(super) fn unexpected(&mut self) -> ParseError {
        let found = self.tokens.get(self.position).map(|(token, _)| token.clone());
        ParseError::new(std::mem::take(&mut self.expected), found, self.current_range())
    }

    pub(super) fn too_deep(&self) -> ParseError {
        let found = self.tokens.get(self.position).map(|(token, _)| token.clone());
        ParseError::too_deep(MAX_NESTING, found, self.current_range())
    }

    pub(super) fn report(&mut self, error: ParseError) {
        trace!(error = %error, range = %error.range, "recording parse error");
        self.errors.push(error);
        let capped = self.options.max_errors > 0 && self.errors.len() >= self.options.max_errors;
        if !self.options.recover || capped {
            self.halted = true;
        }
    }

    /// Skip tokens until `is_sync` holds or input ends. Always moves past the token an
    /// attempt started at, so a rule that failed on its first token cannot loop.
    pub(super) fn synchronize(&mut self, failed_at: usize, is_sync: impl Fn(&Self) -> bool) {
        if self.position == failed_at && !self.is_at_end() {
            self.bump();
        }
        while !self.is_at_end() && !is_sync(self) {
            self.bump();
        }
        self.expected.clear();
        trace!(position = self.position, "resynchronized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parol::lexing::lex;

    fn parser(source: &str) -> Parser {
        Parser::new(source, lex(source).unwrap(), ParserOptions::default())
    }

    #[test]
    fn test_check_accumulates_expected() {
        let mut parser = parser("%%");
        assert!(!parser.check(TokenKind::Semicolon));
        assert!(!parser.check_any(&[TokenKind::Pipe, TokenKind::Colon]));
        let error = parser.unexpected();
        assert_eq!(
            error.expected,
            vec![TokenKind::Colon, TokenKind::Semicolon, TokenKind::Pipe]
        );
        assert_eq!(error.found, Some(Token::PercentPercent));
    }

    #[test]
    fn test_bump_clears_expected() {
        let mut parser = parser("a ;");
        assert!(!parser.check(TokenKind::Colon));
        assert!(parser.eat(TokenKind::Identifier));
        assert!(!parser.check(TokenKind::Pipe));
        assert_eq!(parser.unexpected().expected, vec![TokenKind::Pipe]);
    }

    #[test]
    fn test_range_from_covers_consumed_tokens() {
        let mut parser = parser("ab : cd");
        parser.bump();
        parser.bump();
        let range = parser.range_from(0);
        assert_eq!(range.span, 0..4);
        assert_eq!(parser.range_from(2).span, 5..5);
    }

    #[test]
    fn test_end_of_input_range() {
        let mut parser = parser("ab");
        parser.bump();
        assert!(parser.is_at_end());
        assert_eq!(parser.current_range().span, 2..2);
        let error = parser.unexpected();
        assert_eq!(error.found, None);
    }

    #[test]
    fn test_synchronize_always_moves() {
        let mut parser = parser("; ; a");
        parser.synchronize(0, |p| p.peek_kind() == Some(TokenKind::Semicolon));
        assert_eq!(parser.position, 1);
        assert!(parser.errors.is_empty());
    }
}
