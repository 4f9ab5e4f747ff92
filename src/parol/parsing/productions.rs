//! Grammar definition parsing
//!
//! ```text
//! grammar_definition ::= "%%" production+
//! production         ::= identifier ":" [alternations | "|" alternations] ";"
//! alternations       ::= alternation ("|" alternation)* ["|"]
//! alternation        ::= factor+
//! factor             ::= group | repeat | optional | symbol
//! group              ::= "(" [alternations] ")"
//! optional           ::= "[" [alternations] "]"
//! repeat             ::= "{" [alternations] "}"
//! ```
//!
//! `alternation` can never be empty in the grammar. The one empty alternation in the tree
//! is the explicit final alternative after a trailing `|`, built here and nowhere else.

use super::parser::{ParseResult, Parser, MAX_NESTING};
use crate::parol::ast::{
    Alternation, Alternations, Bracketed, Factor, GrammarDefinition, GroupKind, Production,
};
use crate::parol::token::TokenKind;

/// First tokens of `factor`
pub(super) const FACTOR_STARTS: &[TokenKind] = &[
    TokenKind::LParen,
    TokenKind::LBracket,
    TokenKind::LBrace,
    TokenKind::LessThan,
    TokenKind::String,
    TokenKind::RawString,
    TokenKind::Regex,
    TokenKind::Identifier,
];

impl Parser {
    /// Parse `%%` and the productions. `None` only after an error has been reported.
    pub(super) fn parse_grammar_definition(&mut self) -> Option<GrammarDefinition> {
        let start = self.position;
        if let Err(error) = self.expect(TokenKind::PercentPercent) {
            self.report(error);
            return None;
        }

        let mut productions = Vec::new();
        let mut failed = false;
        // production+: the first one is attempted even at end of input
        loop {
            let attempt = self.position;
            match self.parse_production() {
                Ok(production) => productions.push(production),
                Err(error) => {
                    failed = true;
                    self.report(error);
                    if self.halted {
                        break;
                    }
                    self.synchronize_production(attempt);
                }
            }
            if self.halted || self.is_at_end() {
                break;
            }
        }

        if failed {
            return None;
        }
        Some(GrammarDefinition {
            productions,
            location: self.range_from(start),
        })
    }

    /// Skip past the next `;`, or stop in front of the next `identifier :` pair
    fn synchronize_production(&mut self, failed_at: usize) {
        self.synchronize(failed_at, |parser| {
            parser.peek_kind() == Some(TokenKind::Semicolon)
                || (parser.peek_kind() == Some(TokenKind::Identifier)
                    && parser.peek_kind_at(1) == Some(TokenKind::Colon))
        });
        if self.peek_kind() == Some(TokenKind::Semicolon) {
            self.bump();
        }
    }

    pub(super) fn parse_production(&mut self) -> ParseResult<Production> {
        let start = self.position;
        let name = self.parse_identifier()?;
        self.expect(TokenKind::Colon)?;

        let leading_pipe = self.eat(TokenKind::Pipe);
        let alternations = if leading_pipe || self.at_factor_start() {
            Some(self.parse_alternations()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;

        Ok(Production {
            name,
            leading_pipe,
            alternations,
            location: self.range_from(start),
        })
    }

    pub(super) fn at_factor_start(&mut self) -> bool {
        self.check_any(FACTOR_STARTS)
    }

    pub(super) fn parse_alternations(&mut self) -> ParseResult<Alternations> {
        let start = self.position;
        let mut alternations = vec![self.parse_alternation()?];
        while self.eat(TokenKind::Pipe) {
            if self.at_factor_start() {
                alternations.push(self.parse_alternation()?);
            } else {
                alternations.push(Alternation::empty(self.previous_range().end_point()));
                break;
            }
        }
        Ok(Alternations {
            alternations,
            location: self.range_from(start),
        })
    }

    pub(super) fn parse_alternation(&mut self) -> ParseResult<Alternation> {
        let start = self.position;
        let mut factors = Vec::new();
        while self.at_factor_start() {
            factors.push(self.parse_factor()?);
        }
        if factors.is_empty() {
            return Err(self.unexpected());
        }
        Ok(Alternation {
            factors,
            location: self.range_from(start),
        })
    }

    pub(super) fn parse_factor(&mut self) -> ParseResult<Factor> {
        let kind = match self.peek_kind() {
            Some(TokenKind::LParen) => GroupKind::Group,
            Some(TokenKind::LBracket) => GroupKind::Optional,
            Some(TokenKind::LBrace) => GroupKind::Repeat,
            _ => return Ok(Factor::Symbol(self.parse_symbol()?)),
        };
        if self.depth >= MAX_NESTING {
            return Err(self.too_deep());
        }
        self.depth += 1;
        let body = self.parse_bracketed(kind);
        self.depth -= 1;
        let body = body?;
        Ok(match kind {
            GroupKind::Group => Factor::Group(body),
            GroupKind::Optional => Factor::Optional(body),
            GroupKind::Repeat => Factor::Repeat(body),
        })
    }

    fn parse_bracketed(&mut self, kind: GroupKind) -> ParseResult<Bracketed> {
        let (open, close) = match kind {
            GroupKind::Group => (TokenKind::LParen, TokenKind::RParen),
            GroupKind::Optional => (TokenKind::LBracket, TokenKind::RBracket),
            GroupKind::Repeat => (TokenKind::LBrace, TokenKind::RBrace),
        };
        let start = self.position;
        self.expect(open)?;
        let alternations = if self.at_factor_start() {
            Some(self.parse_alternations()?)
        } else {
            None
        };
        self.expect(close)?;
        Ok(Bracketed {
            alternations,
            location: self.range_from(start),
        })
    }
}
