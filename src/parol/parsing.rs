//! Parser
//!
//! A hand-written recursive-descent parser from the core token stream to [ParolGrammar].
//!
//! # Parser Architecture
//!
//! - `parser`: the [Parser] struct, the token cursor, error reporting and recovery
//! - `prolog`: start declaration, declarations, scanner directives and scanner states
//! - `productions`: grammar definition, productions, alternations and factors
//! - `symbols`: symbols, token expressions, ast_control and names
//!
//! Parser methods are split across these files using `impl Parser` blocks, so each file
//! extends the parser with one layer of the grammar while sharing the cursor state.
//!
//! # Dispatch
//!
//! Every choice point is decided by the kind of the next token alone. No rule needs to
//! look further ahead and nothing backtracks, so parsing is linear in the token count.
//!
//! # Errors
//!
//! Errors are collected. After an error the parser resynchronizes and carries on, so one
//! pass reports every independent mistake in a file:
//!
//! - in the prolog, at the next declaration keyword, `%scanner` or `%%`
//! - inside a scanner state, after its closing `}`
//! - in the grammar definition, after the next `;` or before the next `identifier :` pair
//!
//! Groups, optionals and repeats nest at most [MAX_NESTING] levels deep; the opening
//! bracket past that limit is reported like any other error.
//!
//! If anything was reported, the parse fails with the whole list. A tree is only ever
//! returned for error-free input.

pub mod parser;
pub mod productions;
pub mod prolog;
pub mod symbols;

pub use parser::{Parser, ParserOptions, MAX_NESTING};

use crate::parol::ast::{GrammarError, ParolGrammar};
use crate::parol::lexing::lex;
use tracing::debug;

/// Parse a grammar with the default options (recovery on)
pub fn parse_grammar(source: &str) -> Result<ParolGrammar, GrammarError> {
    parse_grammar_with(source, &ParserOptions::default())
}

pub fn parse_grammar_with(
    source: &str,
    options: &ParserOptions,
) -> Result<ParolGrammar, GrammarError> {
    debug!(bytes = source.len(), ?options, "parsing grammar");
    let tokens = lex(source)?;
    let parser = Parser::new(source, tokens, options.clone());
    let grammar = parser.parse().map_err(GrammarError::Parse)?;
    debug!(
        productions = grammar.productions().len(),
        declarations = grammar.prolog.declarations.len(),
        scanner_states = grammar.prolog.scanner_states.len(),
        "parsed grammar"
    );
    Ok(grammar)
}
