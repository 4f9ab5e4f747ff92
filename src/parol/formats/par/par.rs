//! Canonical `.par` output
//!
//! Re-serializes a tree to grammar source with a fixed layout. Comments and the original
//! whitespace are not part of the tree and are lost; everything else survives, so parsing
//! the output yields a structurally identical tree.
//!
//!     %start s
//!     %title "Example"
//!
//!     %scanner Str {
//!         %auto_ws_off
//!     }
//!
//!     %%
//!
//!     s: a | b;
//!     a: "a";
//!     b: ;

use crate::parol::ast::{ParolGrammar, ScannerState};
use crate::parol::formats::registry::{FormatError, Formatter};
use std::fmt::Write;

const INDENT: &str = "    ";

pub fn unparse(grammar: &ParolGrammar) -> String {
    let mut out = String::new();
    let prolog = &grammar.prolog;

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", prolog.start_declaration);
    for declaration in &prolog.declarations {
        let _ = writeln!(out, "{}", declaration);
    }
    for state in &prolog.scanner_states {
        out.push('\n');
        write_scanner_state(&mut out, state);
    }

    out.push_str("\n%%\n\n");
    for production in grammar.productions() {
        let _ = writeln!(out, "{}", production);
    }
    out
}

fn write_scanner_state(out: &mut String, state: &ScannerState) {
    if state.directives.is_empty() {
        let _ = writeln!(out, "%scanner {} {{}}", state.state_name);
        return;
    }
    let _ = writeln!(out, "%scanner {} {{", state.state_name);
    for directive in &state.directives {
        let _ = writeln!(out, "{}{}", INDENT, directive);
    }
    out.push_str("}\n");
}

pub struct ParFormatter;

impl Formatter for ParFormatter {
    fn name(&self) -> &str {
        "par"
    }

    fn serialize(&self, grammar: &ParolGrammar) -> Result<String, FormatError> {
        Ok(unparse(grammar))
    }

    fn description(&self) -> &str {
        "Canonical grammar source"
    }
}
