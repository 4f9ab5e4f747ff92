//! XML-like tag serialization
//!
//! Serializes tree snapshots to an XML-like format that directly reflects the tree.
//!
//! ## Format
//!
//! - Node type → tag name (snake_case becomes kebab-case)
//! - Label → text content
//! - Children → nested tags (no wrapper)
//!
//! ## Example
//!
//! ```text
//! <parol>1 productions, start s
//!   <prolog>%start s
//!     <start-declaration>s</start-declaration>
//!   </prolog>
//!   <grammar-definition>1 productions
//!     <production>s</production>
//!   </grammar-definition>
//! </parol>
//! ```

use crate::parol::ast::{snapshot_from_grammar, AstSnapshot, ParolGrammar};
use crate::parol::formats::registry::{FormatError, Formatter};

/// Tag serializer that converts AstSnapshot to XML-like format
struct TagSerializer {
    output: String,
    indent_level: usize,
}

impl TagSerializer {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.indent_level)
    }

    fn push_indent(&mut self, s: &str) {
        self.output.push_str(&self.indent());
        self.output.push_str(s);
    }

    fn serialize_snapshot(&mut self, snapshot: &AstSnapshot) {
        let tag = to_tag_name(&snapshot.node_type);

        self.push_indent(&format!("<{}>", tag));
        self.output.push_str(&escape_xml(&snapshot.label));

        if snapshot.children.is_empty() {
            self.output.push_str(&format!("</{}>", tag));
            self.output.push('\n');
        } else {
            self.output.push('\n');
            self.indent_level += 1;
            for child in &snapshot.children {
                self.serialize_snapshot(child);
            }
            self.indent_level -= 1;
            self.push_indent(&format!("</{}>", tag));
            self.output.push('\n');
        }
    }
}

fn to_tag_name(node_type: &str) -> String {
    node_type.replace('_', "-")
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Serialize a grammar to tag format
pub fn serialize_grammar(grammar: &ParolGrammar) -> String {
    let mut serializer = TagSerializer::new();
    serializer.serialize_snapshot(&snapshot_from_grammar(grammar));
    serializer.output
}

pub struct TagFormatter;

impl Formatter for TagFormatter {
    fn name(&self) -> &str {
        "tag"
    }

    fn serialize(&self, grammar: &ParolGrammar) -> Result<String, FormatError> {
        Ok(serialize_grammar(grammar))
    }

    fn description(&self) -> &str {
        "XML-like tags mirroring the syntax tree"
    }
}
