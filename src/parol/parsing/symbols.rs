//! Symbol parsing
//!
//! ```text
//! symbol                ::= non_terminal | simple_token | token_with_states
//! non_terminal          ::= identifier [ast_control]
//! simple_token          ::= token_expression [ast_control]
//! token_with_states     ::= "<" identifier_list ">" token_expression [ast_control]
//! token_expression      ::= token_literal [look_ahead]
//! look_ahead            ::= ("?=" | "?!") token_literal
//! ast_control           ::= "^" | member_name [user_type_declaration] | user_type_declaration
//! member_name           ::= "@" identifier
//! user_type_declaration ::= ":" user_type_name
//! user_type_name        ::= identifier ("::" identifier)*
//! identifier_list       ::= identifier ("," identifier)*
//! ```
//!
//! `symbol` is classified on its first token: `<` starts a token_with_states, a literal
//! starts a simple_token and an identifier starts a non_terminal.

use super::parser::{ParseResult, Parser};
use crate::parol::ast::{
    AstControl, AstControlKind, Identifier, IdentifierList, LiteralKind, LookAhead,
    LookAheadKind, MemberName, NonTerminal, SimpleToken, Symbol, TokenExpression, TokenLiteral,
    TokenWithStates, UserTypeDeclaration, UserTypeName,
};
use crate::parol::token::{Token, TokenKind};

const LITERAL_STARTS: &[TokenKind] = &[TokenKind::String, TokenKind::RawString, TokenKind::Regex];

fn literal_token_kind(kind: LiteralKind) -> TokenKind {
    match kind {
        LiteralKind::String => TokenKind::String,
        LiteralKind::RawString => TokenKind::RawString,
        LiteralKind::Regex => TokenKind::Regex,
    }
}

impl Parser {
    pub(super) fn parse_symbol(&mut self) -> ParseResult<Symbol> {
        match self.peek_kind() {
            Some(TokenKind::LessThan) => Ok(Symbol::TokenWithStates(self.parse_token_with_states()?)),
            Some(TokenKind::String | TokenKind::RawString | TokenKind::Regex) => {
                Ok(Symbol::SimpleToken(self.parse_simple_token()?))
            }
            Some(TokenKind::Identifier) => Ok(Symbol::NonTerminal(self.parse_non_terminal()?)),
            _ => {
                self.check(TokenKind::LessThan);
                self.check_any(LITERAL_STARTS);
                self.check(TokenKind::Identifier);
                Err(self.unexpected())
            }
        }
    }

    fn parse_non_terminal(&mut self) -> ParseResult<NonTerminal> {
        let start = self.position;
        let identifier = self.parse_identifier()?;
        let ast_control = self.parse_ast_control()?;
        Ok(NonTerminal {
            identifier,
            ast_control,
            location: self.range_from(start),
        })
    }

    fn parse_simple_token(&mut self) -> ParseResult<SimpleToken> {
        let start = self.position;
        let expression = self.parse_token_expression()?;
        let ast_control = self.parse_ast_control()?;
        Ok(SimpleToken {
            expression,
            ast_control,
            location: self.range_from(start),
        })
    }

    fn parse_token_with_states(&mut self) -> ParseResult<TokenWithStates> {
        let start = self.position;
        self.expect(TokenKind::LessThan)?;
        let states = self.parse_identifier_list()?;
        self.expect(TokenKind::GreaterThan)?;
        let expression = self.parse_token_expression()?;
        let ast_control = self.parse_ast_control()?;
        Ok(TokenWithStates {
            states,
            expression,
            ast_control,
            location: self.range_from(start),
        })
    }

    fn parse_token_expression(&mut self) -> ParseResult<TokenExpression> {
        let start = self.position;
        let literal = self.parse_token_literal()?;
        let look_ahead = self.parse_look_ahead()?;
        Ok(TokenExpression {
            literal,
            look_ahead,
            location: self.range_from(start),
        })
    }

    fn parse_look_ahead(&mut self) -> ParseResult<Option<LookAhead>> {
        let start = self.position;
        let kind = if self.eat(TokenKind::PositiveLookahead) {
            LookAheadKind::Positive
        } else if self.eat(TokenKind::NegativeLookahead) {
            LookAheadKind::Negative
        } else {
            return Ok(None);
        };
        let literal = self.parse_token_literal()?;
        Ok(Some(LookAhead {
            kind,
            literal,
            location: self.range_from(start),
        }))
    }

    /// Any of the three literal kinds
    pub(super) fn parse_token_literal(&mut self) -> ParseResult<TokenLiteral> {
        if !self.check_any(LITERAL_STARTS) {
            return Err(self.unexpected());
        }
        let (token, location) = self.bump();
        let (kind, text) = match token {
            Token::String(text) => (LiteralKind::String, text),
            Token::RawString(text) => (LiteralKind::RawString, text),
            Token::Regex(text) => (LiteralKind::Regex, text),
            other => unreachable!("check_any admitted a non-literal token {:?}", other),
        };
        Ok(TokenLiteral {
            kind,
            text,
            location,
        })
    }

    /// A literal of one specific kind, as `%title` and `%grammar_type` require
    pub(super) fn parse_literal_of(&mut self, kind: LiteralKind) -> ParseResult<TokenLiteral> {
        if !self.check(literal_token_kind(kind)) {
            return Err(self.unexpected());
        }
        self.parse_token_literal()
    }

    fn parse_ast_control(&mut self) -> ParseResult<Option<AstControl>> {
        let start = self.position;
        let kind = if self.eat(TokenKind::Caret) {
            AstControlKind::Cut
        } else if self.check(TokenKind::At) {
            let member = self.parse_member_name()?;
            let user_type = if self.check(TokenKind::Colon) {
                Some(self.parse_user_type_declaration()?)
            } else {
                None
            };
            AstControlKind::Member { member, user_type }
        } else if self.check(TokenKind::Colon) {
            AstControlKind::UserType(self.parse_user_type_declaration()?)
        } else {
            return Ok(None);
        };
        Ok(Some(AstControl {
            kind,
            location: self.range_from(start),
        }))
    }

    fn parse_member_name(&mut self) -> ParseResult<MemberName> {
        let start = self.position;
        self.expect(TokenKind::At)?;
        let identifier = self.parse_identifier()?;
        Ok(MemberName {
            identifier,
            location: self.range_from(start),
        })
    }

    fn parse_user_type_declaration(&mut self) -> ParseResult<UserTypeDeclaration> {
        let start = self.position;
        self.expect(TokenKind::Colon)?;
        let type_name = self.parse_user_type_name()?;
        Ok(UserTypeDeclaration {
            type_name,
            location: self.range_from(start),
        })
    }

    pub(super) fn parse_user_type_name(&mut self) -> ParseResult<UserTypeName> {
        let start = self.position;
        let mut segments = vec![self.parse_identifier()?];
        while self.eat(TokenKind::DoubleColon) {
            segments.push(self.parse_identifier()?);
        }
        Ok(UserTypeName {
            segments,
            location: self.range_from(start),
        })
    }

    pub(super) fn parse_identifier_list(&mut self) -> ParseResult<IdentifierList> {
        let start = self.position;
        let mut identifiers = vec![self.parse_identifier()?];
        while self.eat(TokenKind::Comma) {
            identifiers.push(self.parse_identifier()?);
        }
        Ok(IdentifierList {
            identifiers,
            location: self.range_from(start),
        })
    }

    pub(super) fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        match self.expect(TokenKind::Identifier)? {
            (Token::Identifier(name), location) => Ok(Identifier::new(name, location)),
            (other, _) => unreachable!("expect admitted a non-identifier token {:?}", other),
        }
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
    fn test_member_with_user_type() {
        let symbol = parser("<STATE1,STATE2>\"tok\"@member:My::Type")
            .parse_symbol()
            .unwrap();
        let Symbol::TokenWithStates(token) = &symbol else {
            panic!("expected token_with_states, got {:?}", symbol);
        };
        assert_eq!(token.states.len(), 2);
        let control = token.ast_control.as_ref().unwrap();
        assert_eq!(control.member_name(), Some("member"));
        assert_eq!(control.user_type().unwrap().to_string(), "My::Type");
    }

    #[test]
    fn test_non_terminal_with_bare_user_type() {
        let symbol = parser("Expr: ast::Expr").parse_symbol().unwrap();
        assert_eq!(symbol.to_string(), "Expr: ast::Expr");
        assert!(matches!(
            symbol.ast_control().map(|c| &c.kind),
            Some(AstControlKind::UserType(_))
        ));
    }

    #[test]
    fn test_cut_operator() {
        let symbol = parser("'+'^").parse_symbol().unwrap();
        assert!(symbol.ast_control().unwrap().is_cut());
    }

    #[test]
    fn test_look_ahead() {
        let symbol = parser("/[0-9]+/ ?! \".\"").parse_symbol().unwrap();
        let expression = symbol.token_expression().unwrap();
        let look_ahead = expression.look_ahead.as_ref().unwrap();
        assert_eq!(look_ahead.kind, LookAheadKind::Negative);
        assert_eq!(look_ahead.literal.kind, LiteralKind::String);
        assert_eq!(expression.location.span, 0..15);
    }

    #[test]
    fn test_look_ahead_requires_literal() {
        let error = parser("\"a\" ?= b").parse_symbol().unwrap_err();
        assert_eq!(
            error.expected,
            vec![TokenKind::String, TokenKind::RawString, TokenKind::Regex]
        );
    }

    #[test]
    fn test_token_with_states_requires_a_state() {
        let error = parser("<>\"a\"").parse_symbol().unwrap_err();
        assert_eq!(error.expected, vec![TokenKind::Identifier]);
    }

    #[test]
    fn test_user_type_name_rejects_trailing_separator() {
        let error = parser("a::").parse_user_type_name().unwrap_err();
        assert_eq!(error.found, None);
    }
}
