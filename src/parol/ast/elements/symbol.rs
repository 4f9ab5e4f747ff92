//! Symbol elements
//!
//!     The leaves of a production body: non-terminals, the two token forms, and the pieces
//!     they are built from (token literals, look-ahead, ast_control and names).
//!
//!     Symbol disambiguation happens on the first token only:
//!         `<`                         token_with_states
//!         string, raw string, regex   simple_token
//!         identifier                  non_terminal

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use std::fmt;

/// An identifier with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub location: Range,
}

impl Identifier {
    pub fn new(name: impl Into<String>, location: Range) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// `identifier (, identifier)*`, used to name scanner states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierList {
    pub identifiers: Vec<Identifier>,
    pub location: Range,
}

impl IdentifierList {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(Identifier::as_str)
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

impl fmt::Display for IdentifierList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names().collect();
        f.write_str(&names.join(", "))
    }
}

/// `identifier (:: identifier)*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTypeName {
    pub segments: Vec<Identifier>,
    pub location: Range,
}

impl UserTypeName {
    /// The last path segment, e.g. `Type` for `my::mod::Type`
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(Identifier::as_str)
    }
}

impl fmt::Display for UserTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments: Vec<&str> = self.segments.iter().map(Identifier::as_str).collect();
        f.write_str(&segments.join("::"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    RawString,
    Regex,
}

impl LiteralKind {
    pub fn name(&self) -> &'static str {
        match self {
            LiteralKind::String => "string",
            LiteralKind::RawString => "raw_string",
            LiteralKind::Regex => "regex",
        }
    }
}

/// A string, raw string or regex terminal. `text` is the lexeme including its delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLiteral {
    pub kind: LiteralKind,
    pub text: String,
    pub location: Range,
}

impl TokenLiteral {
    /// The literal without its delimiters. Escapes are kept as written.
    pub fn content(&self) -> &str {
        let len = self.text.len();
        if len >= 2 {
            &self.text[1..len - 1]
        } else {
            ""
        }
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_token_literal(self);
    }
}

impl fmt::Display for TokenLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookAheadKind {
    Positive,
    Negative,
}

/// `(?= | ?!) token_literal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookAhead {
    pub kind: LookAheadKind,
    pub literal: TokenLiteral,
    pub location: Range,
}

impl fmt::Display for LookAhead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self.kind {
            LookAheadKind::Positive => "?=",
            LookAheadKind::Negative => "?!",
        };
        write!(f, "{} {}", operator, self.literal)
    }
}

/// `token_literal [look_ahead]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenExpression {
    pub literal: TokenLiteral,
    pub look_ahead: Option<LookAhead>,
    pub location: Range,
}

impl TokenExpression {
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        self.literal.accept(visitor);
        if let Some(look_ahead) = &self.look_ahead {
            look_ahead.literal.accept(visitor);
        }
    }
}

impl fmt::Display for TokenExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal)?;
        if let Some(look_ahead) = &self.look_ahead {
            write!(f, " {}", look_ahead)?;
        }
        Ok(())
    }
}

/// `@ identifier`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberName {
    pub identifier: Identifier,
    pub location: Range,
}

/// `: user_type_name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTypeDeclaration {
    pub type_name: UserTypeName,
    pub location: Range,
}

/// The three mutually exclusive shapes of ast_control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstControlKind {
    /// `^`
    Cut,
    /// `@name` optionally followed by `: Type`
    Member {
        member: MemberName,
        user_type: Option<UserTypeDeclaration>,
    },
    /// `: Type`
    UserType(UserTypeDeclaration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstControl {
    pub kind: AstControlKind,
    pub location: Range,
}

impl AstControl {
    pub fn is_cut(&self) -> bool {
        matches!(self.kind, AstControlKind::Cut)
    }

    pub fn member_name(&self) -> Option<&str> {
        match &self.kind {
            AstControlKind::Member { member, .. } => Some(member.identifier.as_str()),
            _ => None,
        }
    }

    pub fn user_type(&self) -> Option<&UserTypeName> {
        match &self.kind {
            AstControlKind::Member {
                user_type: Some(declaration),
                ..
            }
            | AstControlKind::UserType(declaration) => Some(&declaration.type_name),
            _ => None,
        }
    }
}

impl fmt::Display for AstControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AstControlKind::Cut => f.write_str("^"),
            AstControlKind::Member { member, user_type } => {
                write!(f, "@{}", member.identifier)?;
                if let Some(declaration) = user_type {
                    write!(f, ": {}", declaration.type_name)?;
                }
                Ok(())
            }
            AstControlKind::UserType(declaration) => write!(f, ": {}", declaration.type_name),
        }
    }
}

/// `identifier [ast_control]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonTerminal {
    pub identifier: Identifier,
    pub ast_control: Option<AstControl>,
    pub location: Range,
}

impl NonTerminal {
    pub fn name(&self) -> &str {
        self.identifier.as_str()
    }
}

/// `token_expression [ast_control]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleToken {
    pub expression: TokenExpression,
    pub ast_control: Option<AstControl>,
    pub location: Range,
}

/// `< identifier_list > token_expression [ast_control]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithStates {
    pub states: IdentifierList,
    pub expression: TokenExpression,
    pub ast_control: Option<AstControl>,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    NonTerminal(NonTerminal),
    SimpleToken(SimpleToken),
    TokenWithStates(TokenWithStates),
}

impl Symbol {
    pub fn ast_control(&self) -> Option<&AstControl> {
        match self {
            Symbol::NonTerminal(nt) => nt.ast_control.as_ref(),
            Symbol::SimpleToken(token) => token.ast_control.as_ref(),
            Symbol::TokenWithStates(token) => token.ast_control.as_ref(),
        }
    }

    pub fn token_expression(&self) -> Option<&TokenExpression> {
        match self {
            Symbol::NonTerminal(_) => None,
            Symbol::SimpleToken(token) => Some(&token.expression),
            Symbol::TokenWithStates(token) => Some(&token.expression),
        }
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        match self {
            Symbol::NonTerminal(nt) => visitor.visit_non_terminal(nt),
            Symbol::SimpleToken(token) => {
                visitor.visit_simple_token(token);
                token.expression.accept(visitor);
            }
            Symbol::TokenWithStates(token) => {
                visitor.visit_token_with_states(token);
                token.expression.accept(visitor);
            }
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::NonTerminal(nt) => write!(f, "{}", nt.identifier)?,
            Symbol::SimpleToken(token) => write!(f, "{}", token.expression)?,
            Symbol::TokenWithStates(token) => {
                write!(f, "<{}>{}", token.states, token.expression)?
            }
        }
        if let Some(control) = self.ast_control() {
            write!(f, "{}", control)?;
        }
        Ok(())
    }
}

impl AstNode for Symbol {
    fn node_type(&self) -> &'static str {
        match self {
            Symbol::NonTerminal(_) => "non_terminal",
            Symbol::SimpleToken(_) => "simple_token",
            Symbol::TokenWithStates(_) => "token_with_states",
        }
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn range(&self) -> &Range {
        match self {
            Symbol::NonTerminal(nt) => &nt.location,
            Symbol::SimpleToken(token) => &token.location,
            Symbol::TokenWithStates(token) => &token.location,
        }
    }
}

impl AstNode for TokenLiteral {
    fn node_type(&self) -> &'static str {
        self.kind.name()
    }

    fn display_label(&self) -> String {
        self.text.clone()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl AstNode for AstControl {
    fn node_type(&self) -> &'static str {
        "ast_control"
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}
