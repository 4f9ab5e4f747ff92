//! Semantic checks over a parsed grammar
//!
//!     Lints never affect whether parsing succeeded. They run on a complete tree and report
//!     problems a grammar author would want to know about before handing the file to a
//!     parser generator:
//!
//!         undefined-start          error    `%start` names a symbol without a production
//!         undefined-non-terminal   error    a non-terminal without a production
//!         unreachable-production   warning  not reachable from the start symbol
//!         unknown-scanner-state    error    neither INITIAL nor declared with `%scanner`
//!         duplicate-scanner-state  error    the same `%scanner` name declared twice
//!         invalid-regex            error    a `/.../` terminal the regex crate rejects

use super::diagnostics::Diagnostic;
use super::elements::{
    Identifier, LiteralKind, NonTerminal, ParolGrammar, Production, ScannerDirective,
    ScannerDirectiveKind, ScannerState, TokenLiteral, TokenWithStates,
};
use super::traits::Visitor;
use regex::Regex;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Name of the scanner state every grammar has without declaring it
pub const INITIAL_STATE: &str = "INITIAL";

/// Run every lint, returning diagnostics in a stable order (by check, then source order)
pub fn lint(grammar: &ParolGrammar) -> Vec<Diagnostic> {
    let mut index = GrammarIndex::default();
    grammar.accept(&mut index);

    let mut diagnostics = Vec::new();
    check_start_symbol(grammar, &index, &mut diagnostics);
    check_non_terminals(&index, &mut diagnostics);
    check_reachability(grammar, &index, &mut diagnostics);
    check_scanner_states(&index, &mut diagnostics);
    check_regexes(&index, &mut diagnostics);
    diagnostics
}

/// Everything the checks need, gathered in one walk
#[derive(Default)]
struct GrammarIndex {
    /// Production name to its first definition
    productions: BTreeMap<String, Identifier>,
    /// Non-terminal references per production, in source order
    references: BTreeMap<String, Vec<Identifier>>,
    current_production: Option<String>,
    declared_states: Vec<Identifier>,
    /// Every place a scanner state is named
    state_uses: Vec<Identifier>,
    regexes: Vec<TokenLiteral>,
}

impl GrammarIndex {
    fn record_directive(&mut self, directive: &ScannerDirective) {
        // `%on` lists terminals; only the switch target is a state
        if let ScannerDirectiveKind::On {
            directive: switch, ..
        } = &directive.kind
        {
            self.state_uses.extend(switch.target().cloned());
        }
        for literal in directive.literals() {
            self.visit_token_literal(literal);
        }
    }
}

impl Visitor for GrammarIndex {
    fn visit_scanner_directive(&mut self, directive: &ScannerDirective) {
        self.record_directive(directive);
    }

    fn visit_scanner_state(&mut self, state: &ScannerState) {
        self.declared_states.push(state.state_name.clone());
    }

    fn visit_production(&mut self, production: &Production) {
        let name = production.name().to_string();
        self.productions
            .entry(name.clone())
            .or_insert_with(|| production.name.clone());
        self.references.entry(name.clone()).or_default();
        self.current_production = Some(name);
    }

    fn leave_production(&mut self, _production: &Production) {
        self.current_production = None;
    }

    fn visit_non_terminal(&mut self, non_terminal: &NonTerminal) {
        if let Some(current) = &self.current_production {
            self.references
                .entry(current.clone())
                .or_default()
                .push(non_terminal.identifier.clone());
        }
    }

    fn visit_token_with_states(&mut self, token: &TokenWithStates) {
        self.state_uses
            .extend(token.states.identifiers.iter().cloned());
    }

    fn visit_token_literal(&mut self, literal: &TokenLiteral) {
        if literal.kind == LiteralKind::Regex {
            self.regexes.push(literal.clone());
        }
    }
}

fn check_start_symbol(grammar: &ParolGrammar, index: &GrammarIndex, out: &mut Vec<Diagnostic>) {
    let start = &grammar.prolog.start_declaration.identifier;
    if !index.productions.contains_key(start.as_str()) {
        out.push(
            lint_error(
                start,
                format!("start symbol `{}` has no production", start),
            )
            .with_code("undefined-start"),
        );
    }
}

fn check_non_terminals(index: &GrammarIndex, out: &mut Vec<Diagnostic>) {
    let mut undefined: Vec<&Identifier> = index
        .references
        .values()
        .flatten()
        .filter(|reference| !index.productions.contains_key(reference.as_str()))
        .collect();
    undefined.sort_by_key(|reference| reference.location.span.start);
    for reference in undefined {
        out.push(
            lint_error(
                reference,
                format!("non-terminal `{}` has no production", reference),
            )
            .with_code("undefined-non-terminal"),
        );
    }
}

fn check_reachability(grammar: &ParolGrammar, index: &GrammarIndex, out: &mut Vec<Diagnostic>) {
    let start = grammar.start_symbol();
    if !index.productions.contains_key(start) {
        return;
    }

    let mut reached: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([start]);
    while let Some(name) = queue.pop_front() {
        if !reached.insert(name) {
            continue;
        }
        for reference in index.references.get(name).into_iter().flatten() {
            if index.productions.contains_key(reference.as_str()) {
                queue.push_back(reference.as_str());
            }
        }
    }

    let mut unreachable: Vec<&Identifier> = index
        .productions
        .iter()
        .filter(|(name, _)| !reached.contains(name.as_str()))
        .map(|(_, identifier)| identifier)
        .collect();
    unreachable.sort_by_key(|identifier| identifier.location.span.start);
    for identifier in unreachable {
        out.push(
            Diagnostic::warning(
                identifier.location.clone(),
                format!(
                    "production `{}` is unreachable from start symbol `{}`",
                    identifier, start
                ),
            )
            .with_code("unreachable-production")
            .with_source("lint"),
        );
    }
}

fn check_scanner_states(index: &GrammarIndex, out: &mut Vec<Diagnostic>) {
    let mut seen: HashSet<&str> = HashSet::new();
    for state in &index.declared_states {
        if !seen.insert(state.as_str()) {
            out.push(
                lint_error(state, format!("scanner state `{}` is declared twice", state))
                    .with_code("duplicate-scanner-state"),
            );
        }
    }

    for state in &index.state_uses {
        if state.as_str() != INITIAL_STATE && !seen.contains(state.as_str()) {
            out.push(
                lint_error(state, format!("unknown scanner state `{}`", state))
                    .with_code("unknown-scanner-state"),
            );
        }
    }
}

fn check_regexes(index: &GrammarIndex, out: &mut Vec<Diagnostic>) {
    for literal in &index.regexes {
        let pattern = literal.content().replace("\\/", "/");
        if let Err(error) = Regex::new(&pattern) {
            let reason = error.to_string();
            let reason = reason.lines().last().unwrap_or_default().trim().to_string();
            out.push(
                Diagnostic::error(
                    literal.location.clone(),
                    format!("invalid regex {}: {}", literal, reason),
                )
                .with_code("invalid-regex")
                .with_source("lint"),
            );
        }
    }
}

fn lint_error(identifier: &Identifier, message: String) -> Diagnostic {
    Diagnostic::error(identifier.location.clone(), message).with_source("lint")
}
