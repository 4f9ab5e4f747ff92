//! AST traits - Common interfaces for uniform node access
//!
//! This module defines the common traits that provide uniform access
//! to syntax tree information across all node types.

use super::elements::{
    Alternation, Bracketed, Declaration, GroupKind, NonTerminal, ParolGrammar, Production,
    ScannerDirective, ScannerState, SimpleToken, TokenLiteral, TokenWithStates,
};
use super::range::Range;

/// Common interface for all syntax tree nodes
pub trait AstNode {
    /// Name of the grammar rule this node was built from (e.g. "production")
    fn node_type(&self) -> &'static str;

    /// Short, single line description of the node used by tree renderers
    fn display_label(&self) -> String;

    fn range(&self) -> &Range;
}

/// Visitor trait for traversing the syntax tree
///
/// Implement this trait to walk the tree. Each visit method corresponds to a node type.
/// Default implementations are empty, so you only need to override the methods you care about.
///
/// # Example
///
/// ```ignore
/// struct NonTerminalCounter(usize);
///
/// impl Visitor for NonTerminalCounter {
///     fn visit_non_terminal(&mut self, _nt: &NonTerminal) {
///         self.0 += 1;
///     }
/// }
///
/// let mut counter = NonTerminalCounter(0);
/// grammar.accept(&mut counter);
/// ```
pub trait Visitor {
    fn visit_grammar(&mut self, _grammar: &ParolGrammar) {}
    fn leave_grammar(&mut self, _grammar: &ParolGrammar) {}

    fn visit_declaration(&mut self, _declaration: &Declaration) {}

    fn visit_scanner_directive(&mut self, _directive: &ScannerDirective) {}

    fn visit_scanner_state(&mut self, _state: &ScannerState) {}
    fn leave_scanner_state(&mut self, _state: &ScannerState) {}

    fn visit_production(&mut self, _production: &Production) {}
    fn leave_production(&mut self, _production: &Production) {}

    fn visit_alternation(&mut self, _alternation: &Alternation) {}
    fn leave_alternation(&mut self, _alternation: &Alternation) {}

    fn visit_group(&mut self, _kind: GroupKind, _group: &Bracketed) {}
    fn leave_group(&mut self, _kind: GroupKind, _group: &Bracketed) {}

    fn visit_non_terminal(&mut self, _non_terminal: &NonTerminal) {}

    fn visit_simple_token(&mut self, _token: &SimpleToken) {}

    fn visit_token_with_states(&mut self, _token: &TokenWithStates) {}

    /// Called for every token literal reachable from a production, including the
    /// literals of look-ahead expressions
    fn visit_token_literal(&mut self, _literal: &TokenLiteral) {}
}
