//! Root elements: the whole grammar file and its `%%` section

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::production::Production;
use super::prolog::Prolog;

/// The root node (rule `parol`): exactly one prolog followed by one grammar definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParolGrammar {
    pub prolog: Prolog,
    pub grammar_definition: GrammarDefinition,
    pub location: Range,
}

impl ParolGrammar {
    pub fn start_symbol(&self) -> &str {
        self.prolog.start_symbol()
    }

    pub fn productions(&self) -> &[Production] {
        &self.grammar_definition.productions
    }

    /// All productions with the given left-hand side, in source order
    pub fn productions_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Production> {
        self.productions().iter().filter(move |p| p.name() == name)
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_grammar(self);
        self.prolog.accept(visitor);
        for production in &self.grammar_definition.productions {
            production.accept(visitor);
        }
        visitor.leave_grammar(self);
    }
}

/// `%% production+`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarDefinition {
    pub productions: Vec<Production>,
    pub location: Range,
}

impl AstNode for ParolGrammar {
    fn node_type(&self) -> &'static str {
        "parol"
    }

    fn display_label(&self) -> String {
        format!(
            "{} productions, start {}",
            self.productions().len(),
            self.start_symbol()
        )
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl AstNode for GrammarDefinition {
    fn node_type(&self) -> &'static str {
        "grammar_definition"
    }

    fn display_label(&self) -> String {
        format!("{} productions", self.productions.len())
    }

    fn range(&self) -> &Range {
        &self.location
    }
}
