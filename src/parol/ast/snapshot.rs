//! AST Snapshot - a normalized intermediate representation of the syntax tree
//!
//! This module provides a canonical, format-agnostic representation of the tree
//! suitable for serialization to any output format (JSON, YAML, treeviz, tag).
//!
//! The snapshot captures the complete tree structure with node types, labels,
//! attributes, and children - allowing each serializer to focus solely on
//! presentation without reimplementing traversal logic.
//!
//! ## Building Snapshots
//!
//! [snapshot_from_grammar] is the canonical traversal. All serializers consume its output.

use super::elements::{
    Alternation, Alternations, AstControl, AstControlKind, Bracketed, Declaration,
    DeclarationKind, Factor, IdentifierList, ParolGrammar, Production, ScannerDirective,
    ScannerDirectiveKind, ScannerState, Symbol, TokenExpression, TokenLiteral,
};
use super::range::Range;
use super::traits::AstNode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of a syntax tree node in a normalized, serializable form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstSnapshot {
    /// The grammar rule the node was built from (e.g. "production", "simple_token")
    pub node_type: String,

    /// The primary label of the node
    pub label: String,

    /// Additional attributes specific to the node type
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    pub range: Range,

    /// Child nodes in the tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AstSnapshot>,
}

impl AstSnapshot {
    pub fn new(node_type: impl Into<String>, label: impl Into<String>, range: Range) -> Self {
        Self {
            node_type: node_type.into(),
            label: label.into(),
            attributes: BTreeMap::new(),
            range,
            children: Vec::new(),
        }
    }

    /// Snapshot of any node, without children
    pub fn of<T: AstNode>(node: &T) -> Self {
        Self::new(node.node_type(), node.display_label(), node.range().clone())
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: AstSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = AstSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Compare two trees ignoring source ranges
    pub fn same_structure(&self, other: &AstSnapshot) -> bool {
        self.node_type == other.node_type
            && self.label == other.label
            && self.attributes == other.attributes
            && self.children.len() == other.children.len()
            && self
                .children
                .iter()
                .zip(&other.children)
                .all(|(a, b)| a.same_structure(b))
    }

    /// Number of nodes in this subtree, itself included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstSnapshot::node_count).sum::<usize>()
    }
}

// ============================================================================
// Snapshot Building Functions
// ============================================================================

/// Build the snapshot of a whole grammar
pub fn snapshot_from_grammar(grammar: &ParolGrammar) -> AstSnapshot {
    let prolog = &grammar.prolog;
    let prolog_snapshot = AstSnapshot::of(prolog)
        .with_child(AstSnapshot::of(&prolog.start_declaration))
        .with_children(prolog.declarations.iter().map(build_declaration_snapshot))
        .with_children(prolog.scanner_states.iter().map(build_scanner_state_snapshot));

    let definition = &grammar.grammar_definition;
    let definition_snapshot = AstSnapshot::of(definition).with_children(
        definition
            .productions
            .iter()
            .map(build_production_snapshot),
    );

    AstSnapshot::of(grammar)
        .with_attribute("start", grammar.start_symbol())
        .with_child(prolog_snapshot)
        .with_child(definition_snapshot)
}

fn build_declaration_snapshot(declaration: &Declaration) -> AstSnapshot {
    match &declaration.kind {
        DeclarationKind::Scanner(directive) => {
            AstSnapshot::of(declaration)
                .with_attribute("keyword", declaration.keyword())
                .with_child(build_scanner_directive_snapshot(directive))
        }
        _ => AstSnapshot::of(declaration).with_attribute("keyword", declaration.keyword()),
    }
}

fn build_scanner_directive_snapshot(directive: &ScannerDirective) -> AstSnapshot {
    let snapshot = AstSnapshot::of(directive).with_attribute("keyword", directive.keyword());
    match &directive.kind {
        ScannerDirectiveKind::On {
            states,
            directive: switch,
        } => snapshot
            .with_child(build_identifier_list_snapshot(states))
            .with_child(
                AstSnapshot::new(
                    "scanner_state_directives",
                    switch.to_string(),
                    switch.location.clone(),
                )
                .with_attribute(
                    "target",
                    switch.target().map(|t| t.to_string()).unwrap_or_default(),
                ),
            ),
        _ => snapshot.with_children(directive.literals().into_iter().map(AstSnapshot::of)),
    }
}

fn build_scanner_state_snapshot(state: &ScannerState) -> AstSnapshot {
    AstSnapshot::of(state)
        .with_attribute("state_name", state.state_name.as_str())
        .with_children(state.directives.iter().map(build_scanner_directive_snapshot))
}

fn build_production_snapshot(production: &Production) -> AstSnapshot {
    let snapshot = AstSnapshot::of(production);
    let snapshot = if production.leading_pipe {
        snapshot.with_attribute("leading_pipe", "true")
    } else {
        snapshot
    };
    match &production.alternations {
        Some(alternations) => snapshot.with_child(build_alternations_snapshot(alternations)),
        None => snapshot,
    }
}

fn build_alternations_snapshot(alternations: &Alternations) -> AstSnapshot {
    AstSnapshot::of(alternations).with_children(
        alternations
            .alternations
            .iter()
            .map(build_alternation_snapshot),
    )
}

fn build_alternation_snapshot(alternation: &Alternation) -> AstSnapshot {
    AstSnapshot::of(alternation).with_children(alternation.factors.iter().map(build_factor_snapshot))
}

fn build_factor_snapshot(factor: &Factor) -> AstSnapshot {
    match factor {
        Factor::Symbol(symbol) => build_symbol_snapshot(symbol),
        Factor::Group(body) | Factor::Optional(body) | Factor::Repeat(body) => {
            build_bracketed_snapshot(factor, body)
        }
    }
}

fn build_bracketed_snapshot(factor: &Factor, body: &Bracketed) -> AstSnapshot {
    let snapshot = AstSnapshot::of(factor);
    match &body.alternations {
        Some(alternations) => snapshot.with_child(build_alternations_snapshot(alternations)),
        None => snapshot,
    }
}

fn build_symbol_snapshot(symbol: &Symbol) -> AstSnapshot {
    let mut snapshot = AstSnapshot::of(symbol);
    match symbol {
        Symbol::NonTerminal(nt) => {
            snapshot = snapshot.with_attribute("name", nt.name());
        }
        Symbol::SimpleToken(token) => {
            snapshot = snapshot.with_children(build_expression_snapshots(&token.expression));
        }
        Symbol::TokenWithStates(token) => {
            snapshot = snapshot
                .with_child(build_identifier_list_snapshot(&token.states))
                .with_children(build_expression_snapshots(&token.expression));
        }
    }
    match symbol.ast_control() {
        Some(control) => snapshot.with_child(build_ast_control_snapshot(control)),
        None => snapshot,
    }
}

fn build_expression_snapshots(expression: &TokenExpression) -> Vec<AstSnapshot> {
    let mut children = vec![build_literal_snapshot(&expression.literal)];
    if let Some(look_ahead) = &expression.look_ahead {
        children.push(
            AstSnapshot::new("look_ahead", look_ahead.to_string(), look_ahead.location.clone())
                .with_child(build_literal_snapshot(&look_ahead.literal)),
        );
    }
    children
}

fn build_literal_snapshot(literal: &TokenLiteral) -> AstSnapshot {
    AstSnapshot::of(literal)
}

fn build_identifier_list_snapshot(list: &IdentifierList) -> AstSnapshot {
    AstSnapshot::new("identifier_list", list.to_string(), list.location.clone())
}

fn build_ast_control_snapshot(control: &AstControl) -> AstSnapshot {
    let snapshot = AstSnapshot::of(control);
    let snapshot = match &control.kind {
        AstControlKind::Cut => snapshot.with_attribute("kind", "cut"),
        AstControlKind::Member { .. } => snapshot.with_attribute("kind", "member"),
        AstControlKind::UserType(_) => snapshot.with_attribute("kind", "user_type"),
    };
    let snapshot = match control.member_name() {
        Some(member) => snapshot.with_attribute("member", member),
        None => snapshot,
    };
    match control.user_type() {
        Some(user_type) => snapshot.with_attribute("user_type", user_type.to_string()),
        None => snapshot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_structure_ignores_ranges() {
        let a = AstSnapshot::new("production", "s", Range::default())
            .with_child(AstSnapshot::new("alternations", "1 alternatives", Range::default()));
        let mut b = a.clone();
        b.range = Range::new(3..9, Default::default(), Default::default());
        assert!(a.same_structure(&b));
        assert_ne!(a, b);

        let c = a.clone().with_attribute("leading_pipe", "true");
        assert!(!a.same_structure(&c));
        assert_eq!(c.node_count(), 2);
    }
}
