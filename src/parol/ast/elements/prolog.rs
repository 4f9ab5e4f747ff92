//! Prolog elements
//!
//!     Everything before `%%`: the mandatory start declaration, then any number of
//!     declarations, then any number of scanner states, in that order.

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::symbol::{Identifier, IdentifierList, TokenLiteral, UserTypeName};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prolog {
    pub start_declaration: StartDeclaration,
    pub declarations: Vec<Declaration>,
    pub scanner_states: Vec<ScannerState>,
    pub location: Range,
}

impl Prolog {
    pub fn start_symbol(&self) -> &str {
        self.start_declaration.identifier.as_str()
    }

    pub fn scanner_state(&self, name: &str) -> Option<&ScannerState> {
        self.scanner_states
            .iter()
            .find(|state| state.state_name.as_str() == name)
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        for declaration in &self.declarations {
            declaration.accept(visitor);
        }
        for state in &self.scanner_states {
            state.accept(visitor);
        }
    }
}

/// `%start identifier`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartDeclaration {
    pub identifier: Identifier,
    pub location: Range,
}

impl fmt::Display for StartDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%start {}", self.identifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `%title string`
    Title(TokenLiteral),
    /// `%comment string`
    Comment(TokenLiteral),
    /// `%user_type identifier = user_type_name`
    UserType {
        alias: Identifier,
        type_name: UserTypeName,
    },
    /// `%nt_type nt_name = nt_type`
    NtType {
        nt_name: Identifier,
        nt_type: UserTypeName,
    },
    /// `%t_type t_type`
    TType { t_type: UserTypeName },
    /// `%grammar_type raw_string`
    GrammarType(TokenLiteral),
    Scanner(ScannerDirective),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub location: Range,
}

impl Declaration {
    pub fn keyword(&self) -> &'static str {
        match &self.kind {
            DeclarationKind::Title(_) => "%title",
            DeclarationKind::Comment(_) => "%comment",
            DeclarationKind::UserType { .. } => "%user_type",
            DeclarationKind::NtType { .. } => "%nt_type",
            DeclarationKind::TType { .. } => "%t_type",
            DeclarationKind::GrammarType(_) => "%grammar_type",
            DeclarationKind::Scanner(directive) => directive.keyword(),
        }
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_declaration(self);
        if let DeclarationKind::Scanner(directive) = &self.kind {
            visitor.visit_scanner_directive(directive);
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DeclarationKind::Title(text) => write!(f, "%title {}", text),
            DeclarationKind::Comment(text) => write!(f, "%comment {}", text),
            DeclarationKind::UserType { alias, type_name } => {
                write!(f, "%user_type {} = {}", alias, type_name)
            }
            DeclarationKind::NtType { nt_name, nt_type } => {
                write!(f, "%nt_type {} = {}", nt_name, nt_type)
            }
            DeclarationKind::TType { t_type } => write!(f, "%t_type {}", t_type),
            DeclarationKind::GrammarType(raw) => write!(f, "%grammar_type {}", raw),
            DeclarationKind::Scanner(directive) => write!(f, "{}", directive),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerDirectiveKind {
    /// `%line_comment token_literal`
    LineComment(TokenLiteral),
    /// `%block_comment token_literal token_literal`
    BlockComment {
        open: TokenLiteral,
        close: TokenLiteral,
    },
    AutoNewlineOff,
    AutoWsOff,
    /// `%on identifier_list scanner_state_directives`
    On {
        states: IdentifierList,
        directive: ScannerStateDirective,
    },
    AllowUnmatched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerDirective {
    pub kind: ScannerDirectiveKind,
    pub location: Range,
}

impl ScannerDirective {
    pub fn keyword(&self) -> &'static str {
        match &self.kind {
            ScannerDirectiveKind::LineComment(_) => "%line_comment",
            ScannerDirectiveKind::BlockComment { .. } => "%block_comment",
            ScannerDirectiveKind::AutoNewlineOff => "%auto_newline_off",
            ScannerDirectiveKind::AutoWsOff => "%auto_ws_off",
            ScannerDirectiveKind::On { .. } => "%on",
            ScannerDirectiveKind::AllowUnmatched => "%allow_unmatched",
        }
    }

    /// Token literals carried by comment directives
    pub fn literals(&self) -> Vec<&TokenLiteral> {
        match &self.kind {
            ScannerDirectiveKind::LineComment(literal) => vec![literal],
            ScannerDirectiveKind::BlockComment { open, close } => vec![open, close],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ScannerDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ScannerDirectiveKind::LineComment(literal) => write!(f, "%line_comment {}", literal),
            ScannerDirectiveKind::BlockComment { open, close } => {
                write!(f, "%block_comment {} {}", open, close)
            }
            ScannerDirectiveKind::On { states, directive } => {
                write!(f, "%on {} {}", states, directive)
            }
            _ => f.write_str(self.keyword()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScannerStateDirectiveKind {
    Enter(Identifier),
    Push(Identifier),
    /// `%pop` takes no operand
    Pop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerStateDirective {
    pub kind: ScannerStateDirectiveKind,
    pub location: Range,
}

impl ScannerStateDirective {
    /// The state switched to, if any
    pub fn target(&self) -> Option<&Identifier> {
        match &self.kind {
            ScannerStateDirectiveKind::Enter(target) | ScannerStateDirectiveKind::Push(target) => {
                Some(target)
            }
            ScannerStateDirectiveKind::Pop => None,
        }
    }
}

impl fmt::Display for ScannerStateDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ScannerStateDirectiveKind::Enter(target) => write!(f, "%enter {}", target),
            ScannerStateDirectiveKind::Push(target) => write!(f, "%push {}", target),
            ScannerStateDirectiveKind::Pop => f.write_str("%pop"),
        }
    }
}

/// `%scanner state_name { scanner_directives* }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerState {
    pub state_name: Identifier,
    pub directives: Vec<ScannerDirective>,
    pub location: Range,
}

impl ScannerState {
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_scanner_state(self);
        for directive in &self.directives {
            visitor.visit_scanner_directive(directive);
        }
        visitor.leave_scanner_state(self);
    }
}

impl fmt::Display for ScannerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%scanner {} {{", self.state_name)?;
        for directive in &self.directives {
            write!(f, " {}", directive)?;
        }
        f.write_str(" }")
    }
}

impl AstNode for Prolog {
    fn node_type(&self) -> &'static str {
        "prolog"
    }

    fn display_label(&self) -> String {
        format!("%start {}", self.start_symbol())
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl AstNode for StartDeclaration {
    fn node_type(&self) -> &'static str {
        "start_declaration"
    }

    fn display_label(&self) -> String {
        self.identifier.to_string()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl AstNode for Declaration {
    fn node_type(&self) -> &'static str {
        "declaration"
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl AstNode for ScannerDirective {
    fn node_type(&self) -> &'static str {
        "scanner_directives"
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl AstNode for ScannerState {
    fn node_type(&self) -> &'static str {
        "scanner_state"
    }

    fn display_label(&self) -> String {
        self.state_name.to_string()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier::new(name, Range::default())
    }

    #[test]
    fn test_on_directive_display() {
        let directive = ScannerDirective {
            kind: ScannerDirectiveKind::On {
                states: IdentifierList {
                    identifiers: vec![ident("INITIAL"), ident("STRING")],
                    location: Range::default(),
                },
                directive: ScannerStateDirective {
                    kind: ScannerStateDirectiveKind::Pop,
                    location: Range::default(),
                },
            },
            location: Range::default(),
        };
        assert_eq!(directive.to_string(), "%on INITIAL, STRING %pop");
        assert_eq!(directive.keyword(), "%on");
        assert!(directive.literals().is_empty());
    }

    #[test]
    fn test_scanner_state_display() {
        let state = ScannerState {
            state_name: ident("STRING"),
            directives: vec![ScannerDirective {
                kind: ScannerDirectiveKind::AutoWsOff,
                location: Range::default(),
            }],
            location: Range::default(),
        };
        assert_eq!(state.to_string(), "%scanner STRING { %auto_ws_off }");
    }

    #[test]
    fn test_state_directive_target() {
        let push = ScannerStateDirective {
            kind: ScannerStateDirectiveKind::Push(ident("CMT")),
            location: Range::default(),
        };
        assert_eq!(push.target().map(Identifier::as_str), Some("CMT"));
        let pop = ScannerStateDirective {
            kind: ScannerStateDirectiveKind::Pop,
            location: Range::default(),
        };
        assert!(pop.target().is_none());
    }
}
