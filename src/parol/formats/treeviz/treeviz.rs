//! Treeviz formatter for grammar trees
//!
//! Treeviz is a visual representation of the syntax tree with one line per node, which
//! makes large grammars quick to scan.
//!
//! It encodes the node structure with box-drawing connectors, 2 columns per level.
//!
//! So the format is :
//! <prefix><connector> <icon><space><label> (truncated to 30 characters)
//!
//! Example:
//!
//!   ⧉ 2 productions, start s
//!   ├─ § %start s
//!   │ └─ ▶ s
//!   └─ ☰ 2 productions
//!     ├─ ≔ s
//!     │ └─ ⋮ 1 alternatives
//!     │   └─ • t "x"
//!     │     ├─ ◦ t
//!     │     └─ ❝ "x"
//!     │       └─ ʺ "x"
//!     └─ ≔ t
//!
//! Icons
//!     Structure:
//!         parol: ⧉
//!         prolog: §
//!         grammar_definition: ☰
//!         production: ≔
//!         alternations: ⋮
//!         alternation: •
//!     Prolog:
//!         start_declaration: ▶
//!         declaration: %
//!         scanner_directives: ⚙
//!         scanner_state: Ψ
//!         scanner_state_directives: ➔
//!     Factors:
//!         group: ()
//!         optional: []
//!         repeat: {}
//!     Symbols:
//!         non_terminal: ◦
//!         simple_token: ❝
//!         token_with_states: ⟨⟩
//!         identifier_list: ≡
//!         look_ahead: ?
//!         ast_control: @
//!     Literals:
//!         string: ʺ
//!         raw_string: ʹ
//!         regex: ∕

use crate::parol::ast::{snapshot_from_grammar, AstSnapshot, ParolGrammar};
use crate::parol::formats::registry::{FormatError, Formatter};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node type
fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "parol" => "⧉",
        "prolog" => "§",
        "grammar_definition" => "☰",
        "production" => "≔",
        "alternations" => "⋮",
        "alternation" => "•",
        "start_declaration" => "▶",
        "declaration" => "%",
        "scanner_directives" => "⚙",
        "scanner_state" => "Ψ",
        "scanner_state_directives" => "➔",
        "group" => "()",
        "optional" => "[]",
        "repeat" => "{}",
        "non_terminal" => "◦",
        "simple_token" => "❝",
        "token_with_states" => "⟨⟩",
        "identifier_list" => "≡",
        "look_ahead" => "?",
        "ast_control" => "@",
        "string" => "ʺ",
        "raw_string" => "ʹ",
        "regex" => "∕",
        _ => "○",
    }
}

/// Build treeviz output from an AstSnapshot
fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    show_linum: bool,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(&snapshot.node_type);
    let truncated_label = truncate(&snapshot.label, 30);

    let linum_prefix = if show_linum {
        format!("{:02} ", snapshot.range.start.line + 1)
    } else {
        String::new()
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix, prefix, connector, icon, truncated_label
    ));

    if !snapshot.children.is_empty() {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let child_count = snapshot.children.len();

        for (i, child) in snapshot.children.iter().enumerate() {
            output.push_str(&format_snapshot(
                child,
                &child_prefix,
                i,
                child_count,
                show_linum,
            ));
        }
    }

    output
}

fn format_root_snapshot(snapshot: &AstSnapshot, show_linum: bool) -> String {
    let icon = get_icon(&snapshot.node_type);
    let truncated_label = truncate(&snapshot.label, 30);
    let mut output = format!("{} {}\n", icon, truncated_label);

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count, show_linum));
    }

    output
}

pub fn to_treeviz_str(grammar: &ParolGrammar) -> String {
    to_treeviz_str_with_options(grammar, false)
}

/// Render with an optional `NN ` source line prefix on every child line
pub fn to_treeviz_str_with_options(grammar: &ParolGrammar, show_linum: bool) -> String {
    format_root_snapshot(&snapshot_from_grammar(grammar), show_linum)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormatter {
    pub show_line_numbers: bool,
}

impl TreevizFormatter {
    pub fn with_line_numbers(show_line_numbers: bool) -> Self {
        Self { show_line_numbers }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, grammar: &ParolGrammar) -> Result<String, FormatError> {
        Ok(to_treeviz_str_with_options(grammar, self.show_line_numbers))
    }

    fn description(&self) -> &str {
        "Visual tree representation with indentation and Unicode icons"
    }
}
