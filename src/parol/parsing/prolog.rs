//! Prolog parsing
//!
//! ```text
//! prolog                    ::= start_declaration declaration* scanner_state*
//! start_declaration         ::= "%start" identifier
//! declaration               ::= "%title" string | "%comment" string
//!                             | "%user_type" identifier "=" user_type_name
//!                             | "%nt_type" identifier "=" user_type_name
//!                             | "%t_type" user_type_name
//!                             | "%grammar_type" raw_string
//!                             | scanner_directives
//! scanner_directives        ::= "%line_comment" token_literal
//!                             | "%block_comment" token_literal token_literal
//!                             | "%auto_newline_off" | "%auto_ws_off" | "%allow_unmatched"
//!                             | "%on" identifier_list scanner_state_directives
//! scanner_state_directives  ::= "%enter" identifier | "%push" identifier | "%pop"
//! scanner_state             ::= "%scanner" identifier "{" scanner_directives* "}"
//! ```

use super::parser::{ParseResult, Parser};
use crate::parol::ast::{
    Declaration, DeclarationKind, LiteralKind, Prolog, ScannerDirective, ScannerDirectiveKind,
    ScannerState, ScannerStateDirective, ScannerStateDirectiveKind, StartDeclaration,
};
use crate::parol::token::TokenKind;

/// First tokens of `scanner_directives`
pub(super) const SCANNER_DIRECTIVE_STARTS: &[TokenKind] = &[
    TokenKind::LineCommentDirective,
    TokenKind::BlockCommentDirective,
    TokenKind::AutoNewlineOff,
    TokenKind::AutoWsOff,
    TokenKind::On,
    TokenKind::AllowUnmatched,
];

/// First tokens of `declaration` other than the scanner directives
pub(super) const DECLARATION_STARTS: &[TokenKind] = &[
    TokenKind::Title,
    TokenKind::Comment,
    TokenKind::UserType,
    TokenKind::NtType,
    TokenKind::TType,
    TokenKind::GrammarType,
];

fn is_declaration_start(kind: TokenKind) -> bool {
    DECLARATION_STARTS.contains(&kind) || SCANNER_DIRECTIVE_STARTS.contains(&kind)
}

impl Parser {
    /// Parse the prolog. `None` only after an error has been reported.
    pub(super) fn parse_prolog(&mut self) -> Option<Prolog> {
        let first = self.position;
        let start_declaration = match self.parse_start_declaration() {
            Ok(start) => Some(start),
            Err(error) => {
                self.report(error);
                // A missing `%start` should not cost the declaration that follows it.
                if !self.at_prolog_sync() {
                    self.synchronize_prolog(first);
                }
                None
            }
        };

        let mut declarations = Vec::new();
        let mut scanner_states = Vec::new();
        loop {
            if self.halted || self.is_at_end() || self.check(TokenKind::PercentPercent) {
                break;
            }
            let attempt = self.position;
            if self.check(TokenKind::Scanner) {
                match self.parse_scanner_state() {
                    Ok(state) => scanner_states.push(state),
                    Err(error) => {
                        self.report(error);
                        self.synchronize_scanner_state(attempt);
                    }
                }
                continue;
            }
            // Declarations are only allowed before the first scanner state.
            if scanner_states.is_empty() && self.at_declaration_start() {
                match self.parse_declaration() {
                    Ok(declaration) => declarations.push(declaration),
                    Err(error) => {
                        self.report(error);
                        self.synchronize_prolog(attempt);
                    }
                }
                continue;
            }
            let error = self.unexpected();
            self.report(error);
            self.synchronize_prolog(attempt);
        }

        let start_declaration = start_declaration?;
        let location = self.range_from(first);
        Some(Prolog {
            start_declaration,
            declarations,
            scanner_states,
            location,
        })
    }

    fn at_declaration_start(&mut self) -> bool {
        self.check_any(DECLARATION_STARTS) | self.check_any(SCANNER_DIRECTIVE_STARTS)
    }

    fn at_prolog_sync(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(kind) if is_declaration_start(kind)
                || kind == TokenKind::Scanner
                || kind == TokenKind::PercentPercent
        )
    }

    fn synchronize_prolog(&mut self, failed_at: usize) {
        self.synchronize(failed_at, Parser::at_prolog_sync);
    }

    /// Skip past the closing `}` of a broken scanner state, or up to the next state or `%%`
    fn synchronize_scanner_state(&mut self, failed_at: usize) {
        self.synchronize(failed_at, |parser| {
            matches!(
                parser.peek_kind(),
                Some(TokenKind::RBrace | TokenKind::Scanner | TokenKind::PercentPercent)
            )
        });
        if self.peek_kind() == Some(TokenKind::RBrace) {
            self.bump();
        }
    }

    pub(super) fn parse_start_declaration(&mut self) -> ParseResult<StartDeclaration> {
        let start = self.position;
        self.expect(TokenKind::Start)?;
        let identifier = self.parse_identifier()?;
        Ok(StartDeclaration {
            identifier,
            location: self.range_from(start),
        })
    }

    pub(super) fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let start = self.position;
        let kind = match self.peek_kind() {
            Some(TokenKind::Title) => {
                self.bump();
                DeclarationKind::Title(self.parse_literal_of(LiteralKind::String)?)
            }
            Some(TokenKind::Comment) => {
                self.bump();
                DeclarationKind::Comment(self.parse_literal_of(LiteralKind::String)?)
            }
            Some(TokenKind::UserType) => {
                self.bump();
                let alias = self.parse_identifier()?;
                self.expect(TokenKind::Equals)?;
                let type_name = self.parse_user_type_name()?;
                DeclarationKind::UserType { alias, type_name }
            }
            Some(TokenKind::NtType) => {
                self.bump();
                let nt_name = self.parse_identifier()?;
                self.expect(TokenKind::Equals)?;
                let nt_type = self.parse_user_type_name()?;
                DeclarationKind::NtType { nt_name, nt_type }
            }
            Some(TokenKind::TType) => {
                self.bump();
                let t_type = self.parse_user_type_name()?;
                DeclarationKind::TType { t_type }
            }
            Some(TokenKind::GrammarType) => {
                self.bump();
                DeclarationKind::GrammarType(self.parse_literal_of(LiteralKind::RawString)?)
            }
            _ => DeclarationKind::Scanner(self.parse_scanner_directive()?),
        };
        Ok(Declaration {
            kind,
            location: self.range_from(start),
        })
    }

    pub(super) fn parse_scanner_directive(&mut self) -> ParseResult<ScannerDirective> {
        let start = self.position;
        let kind = match self.peek_kind() {
            Some(TokenKind::LineCommentDirective) => {
                self.bump();
                ScannerDirectiveKind::LineComment(self.parse_token_literal()?)
            }
            Some(TokenKind::BlockCommentDirective) => {
                self.bump();
                let open = self.parse_token_literal()?;
                let close = self.parse_token_literal()?;
                ScannerDirectiveKind::BlockComment { open, close }
            }
            Some(TokenKind::AutoNewlineOff) => {
                self.bump();
                ScannerDirectiveKind::AutoNewlineOff
            }
            Some(TokenKind::AutoWsOff) => {
                self.bump();
                ScannerDirectiveKind::AutoWsOff
            }
            Some(TokenKind::AllowUnmatched) => {
                self.bump();
                ScannerDirectiveKind::AllowUnmatched
            }
            Some(TokenKind::On) => {
                self.bump();
                let states = self.parse_identifier_list()?;
                let directive = self.parse_scanner_state_directive()?;
                ScannerDirectiveKind::On { states, directive }
            }
            _ => {
                self.check_any(SCANNER_DIRECTIVE_STARTS);
                return Err(self.unexpected());
            }
        };
        Ok(ScannerDirective {
            kind,
            location: self.range_from(start),
        })
    }

    pub(super) fn parse_scanner_state_directive(&mut self) -> ParseResult<ScannerStateDirective> {
        let start = self.position;
        let kind = if self.eat(TokenKind::Enter) {
            ScannerStateDirectiveKind::Enter(self.parse_identifier()?)
        } else if self.eat(TokenKind::Push) {
            ScannerStateDirectiveKind::Push(self.parse_identifier()?)
        } else if self.eat(TokenKind::Pop) {
            ScannerStateDirectiveKind::Pop
        } else {
            return Err(self.unexpected());
        };
        Ok(ScannerStateDirective {
            kind,
            location: self.range_from(start),
        })
    }

    pub(super) fn parse_scanner_state(&mut self) -> ParseResult<ScannerState> {
        let start = self.position;
        self.expect(TokenKind::Scanner)?;
        let state_name = self.parse_identifier()?;
        self.expect(TokenKind::LBrace)?;
        let mut directives = Vec::new();
        while self.check_any(SCANNER_DIRECTIVE_STARTS) {
            directives.push(self.parse_scanner_directive()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(ScannerState {
            state_name,
            directives,
            location: self.range_from(start),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parol::lexing::lex;
    use crate::parol::parsing::ParserOptions;

    fn parser(source: &str) -> Parser {
        Parser::new(source, lex(source).unwrap(), ParserOptions::default())
    }

    #[test]
    fn test_user_type_declaration() {
        let declaration = parser("%user_type Num = crate::calc::Number")
            .parse_declaration()
            .unwrap();
        match declaration.kind {
            DeclarationKind::UserType { alias, type_name } => {
                assert_eq!(alias.as_str(), "Num");
                assert_eq!(type_name.to_string(), "crate::calc::Number");
                assert_eq!(type_name.segments.len(), 3);
            }
            other => panic!("expected %user_type, got {:?}", other),
        }
        assert_eq!(declaration.location.span, 0..36);
    }

    #[test]
    fn test_on_directive_with_push() {
        let directive = parser("%on INITIAL, CMT %push STR")
            .parse_scanner_directive()
            .unwrap();
        assert_eq!(directive.to_string(), "%on INITIAL, CMT %push STR");
    }

    #[test]
    fn test_pop_takes_no_operand() {
        let mut parser = parser("%on A %pop %auto_ws_off");
        let directive = parser.parse_scanner_directive().unwrap();
        assert_eq!(directive.to_string(), "%on A %pop");
        assert_eq!(parser.peek_kind(), Some(TokenKind::AutoWsOff));
    }

    #[test]
    fn test_title_requires_string() {
        let error = parser("%title 'raw'").parse_declaration().unwrap_err();
        assert_eq!(error.expected, vec![TokenKind::String]);
    }

    #[test]
    fn test_empty_scanner_state() {
        let state = parser("%scanner Empty {}").parse_scanner_state().unwrap();
        assert_eq!(state.state_name.as_str(), "Empty");
        assert!(state.directives.is_empty());
    }

    #[test]
    fn test_scanner_state_rejects_declarations() {
        let error = parser("%scanner S { %title \"x\" }")
            .parse_scanner_state()
            .unwrap_err();
        assert!(error.expects(TokenKind::RBrace));
        assert!(error.expects(TokenKind::On));
        assert!(!error.expects(TokenKind::Title));
    }
}
