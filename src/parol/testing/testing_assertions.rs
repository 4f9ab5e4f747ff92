//! Fluent assertion API for parsed grammars

use crate::parol::ast::{
    Alternation, Alternations, Bracketed, Factor, GroupKind, LiteralKind, LookAheadKind,
    ParolGrammar, Production, ScannerState, Symbol,
};

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a grammar
pub fn assert_grammar(grammar: &ParolGrammar) -> GrammarAssertion<'_> {
    GrammarAssertion { grammar }
}

// ============================================================================
// Grammar Assertions
// ============================================================================

pub struct GrammarAssertion<'a> {
    grammar: &'a ParolGrammar,
}

impl<'a> GrammarAssertion<'a> {
    pub fn start_symbol(self, expected: &str) -> Self {
        assert_eq!(
            self.grammar.start_symbol(),
            expected,
            "Expected start symbol '{}', found '{}'",
            expected,
            self.grammar.start_symbol()
        );
        self
    }

    pub fn declaration_count(self, expected: usize) -> Self {
        let actual = &self.grammar.prolog.declarations;
        assert_eq!(
            actual.len(),
            expected,
            "Expected {} declarations, found {}: [{}]",
            expected,
            actual.len(),
            actual
                .iter()
                .map(|d| d.keyword())
                .collect::<Vec<_>>()
                .join(", ")
        );
        self
    }

    /// Assert the keywords of all declarations, in order
    pub fn declaration_keywords(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .grammar
            .prolog
            .declarations
            .iter()
            .map(|d| d.keyword())
            .collect();
        assert_eq!(actual, expected, "Declaration keywords differ");
        self
    }

    pub fn scanner_state_count(self, expected: usize) -> Self {
        let actual = self.grammar.prolog.scanner_states.len();
        assert_eq!(
            actual, expected,
            "Expected {} scanner states, found {}",
            expected, actual
        );
        self
    }

    pub fn scanner_state<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ScannerStateAssertion<'a>),
    {
        let states = &self.grammar.prolog.scanner_states;
        assert!(
            index < states.len(),
            "Scanner state index {} out of bounds (grammar has {} states)",
            index,
            states.len()
        );
        assertion(ScannerStateAssertion {
            state: &states[index],
            context: format!("scanner_states[{}]", index),
        });
        self
    }

    pub fn production_count(self, expected: usize) -> Self {
        let actual = self.grammar.productions();
        assert_eq!(
            actual.len(),
            expected,
            "Expected {} productions, found {}: [{}]",
            expected,
            actual.len(),
            summarize_productions(actual)
        );
        self
    }

    /// Assert the left-hand sides of all productions, in order
    pub fn production_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.grammar.productions().iter().map(|p| p.name()).collect();
        assert_eq!(actual, expected, "Production names differ");
        self
    }

    pub fn production<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ProductionAssertion<'a>),
    {
        let productions = self.grammar.productions();
        assert!(
            index < productions.len(),
            "Production index {} out of bounds (grammar has {} productions)",
            index,
            productions.len()
        );
        assertion(ProductionAssertion {
            production: &productions[index],
            context: format!("productions[{}]", index),
        });
        self
    }
}

fn summarize_productions(productions: &[Production]) -> String {
    productions
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Scanner State Assertions
// ============================================================================

pub struct ScannerStateAssertion<'a> {
    state: &'a ScannerState,
    context: String,
}

impl<'a> ScannerStateAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.state.state_name.as_str(),
            expected,
            "{}: Expected state name '{}', found '{}'",
            self.context,
            expected,
            self.state.state_name
        );
        self
    }

    /// Assert the keywords of all directives, in order
    pub fn directive_keywords(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.state.directives.iter().map(|d| d.keyword()).collect();
        assert_eq!(
            actual, expected,
            "{}: Directive keywords differ",
            self.context
        );
        self
    }

    /// Assert the directives as written back, in order
    pub fn directives(self, expected: &[&str]) -> Self {
        let actual: Vec<String> = self.state.directives.iter().map(|d| d.to_string()).collect();
        assert_eq!(actual, expected, "{}: Directives differ", self.context);
        self
    }
}

// ============================================================================
// Production Assertions
// ============================================================================

pub struct ProductionAssertion<'a> {
    production: &'a Production,
    context: String,
}

impl<'a> ProductionAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.production.name(),
            expected,
            "{}: Expected production name '{}', found '{}'",
            self.context,
            expected,
            self.production.name()
        );
        self
    }

    pub fn leading_pipe(self, expected: bool) -> Self {
        assert_eq!(
            self.production.leading_pipe, expected,
            "{}: Expected leading_pipe {}, found {}",
            self.context, expected, self.production.leading_pipe
        );
        self
    }

    /// Assert the body is empty (`name: ;`)
    pub fn empty_body(self) -> Self {
        assert!(
            self.production.alternations.is_none(),
            "{}: Expected an empty body, found '{}'",
            self.context,
            self.production
        );
        self
    }

    /// Assert the production as written back
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.production.to_string(),
            expected,
            "{}: Production text differs",
            self.context
        );
        self
    }

    pub fn alternative_count(self, expected: usize) -> Self {
        assert_alternative_count(self.production.alternatives(), expected, &self.context);
        self
    }

    pub fn alternative<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(AlternationAssertion<'a>),
    {
        check_alternative(
            self.production.alternatives(),
            index,
            &self.context,
            assertion,
        );
        self
    }
}

fn assert_alternative_count(alternatives: &[Alternation], expected: usize, context: &str) {
    assert_eq!(
        alternatives.len(),
        expected,
        "{}: Expected {} alternatives, found {}: [{}]",
        context,
        expected,
        alternatives.len(),
        alternatives
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" | ")
    );
}

fn check_alternative<'a, F>(alternatives: &'a [Alternation], index: usize, context: &str, f: F)
where
    F: FnOnce(AlternationAssertion<'a>),
{
    assert!(
        index < alternatives.len(),
        "{}: Alternative index {} out of bounds ({} alternatives)",
        context,
        index,
        alternatives.len()
    );
    f(AlternationAssertion {
        alternation: &alternatives[index],
        context: format!("{}.alternatives[{}]", context, index),
    });
}

// ============================================================================
// Alternation Assertions
// ============================================================================

pub struct AlternationAssertion<'a> {
    alternation: &'a Alternation,
    context: String,
}

impl<'a> AlternationAssertion<'a> {
    pub fn factor_count(self, expected: usize) -> Self {
        assert_eq!(
            self.alternation.factors.len(),
            expected,
            "{}: Expected {} factors, found {}: '{}'",
            self.context,
            expected,
            self.alternation.factors.len(),
            self.alternation
        );
        self
    }

    /// Assert this is the empty alternative produced by a trailing `|`
    pub fn is_empty(self) -> Self {
        assert!(
            self.alternation.is_empty(),
            "{}: Expected an empty alternative, found '{}'",
            self.context,
            self.alternation
        );
        self
    }

    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.alternation.to_string(),
            expected,
            "{}: Alternative text differs",
            self.context
        );
        self
    }

    pub fn factor<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(FactorAssertion<'a>),
    {
        let factors = &self.alternation.factors;
        assert!(
            index < factors.len(),
            "{}: Factor index {} out of bounds ({} factors)",
            self.context,
            index,
            factors.len()
        );
        assertion(FactorAssertion {
            factor: &factors[index],
            context: format!("{}.factors[{}]", self.context, index),
        });
        self
    }
}

// ============================================================================
// Factor Assertions
// ============================================================================

pub struct FactorAssertion<'a> {
    factor: &'a Factor,
    context: String,
}

impl<'a> FactorAssertion<'a> {
    fn symbol(&self) -> &'a Symbol {
        match self.factor.as_symbol() {
            Some(symbol) => symbol,
            None => panic!(
                "{}: Expected a symbol, found {} '{}'",
                self.context,
                describe_factor(self.factor),
                self.factor
            ),
        }
    }

    fn bracketed(self, kind: GroupKind) -> BracketedAssertion<'a> {
        match self.factor.as_group() {
            Some((actual, body)) if actual == kind => BracketedAssertion {
                body,
                context: format!("{}.{}", self.context, kind.name()),
            },
            _ => panic!(
                "{}: Expected {}, found {} '{}'",
                self.context,
                kind.name(),
                describe_factor(self.factor),
                self.factor
            ),
        }
    }

    pub fn non_terminal(self, expected: &str) -> Self {
        match self.symbol() {
            Symbol::NonTerminal(nt) => assert_eq!(
                nt.name(),
                expected,
                "{}: Expected non-terminal '{}', found '{}'",
                self.context,
                expected,
                nt.name()
            ),
            other => panic!(
                "{}: Expected non-terminal '{}', found '{}'",
                self.context, expected, other
            ),
        }
        self
    }

    /// Assert a terminal (with or without scanner states) with the given literal
    pub fn literal(self, kind: LiteralKind, text: &str) -> Self {
        let expression = match self.symbol().token_expression() {
            Some(expression) => expression,
            None => panic!(
                "{}: Expected a token literal, found '{}'",
                self.context, self.factor
            ),
        };
        assert_eq!(
            (expression.literal.kind, expression.literal.text.as_str()),
            (kind, text),
            "{}: Token literal differs",
            self.context
        );
        self
    }

    pub fn look_ahead(self, kind: LookAheadKind, text: &str) -> Self {
        let look_ahead = self
            .symbol()
            .token_expression()
            .and_then(|expression| expression.look_ahead.as_ref());
        match look_ahead {
            Some(look_ahead) => assert_eq!(
                (look_ahead.kind, look_ahead.literal.text.as_str()),
                (kind, text),
                "{}: Look-ahead differs",
                self.context
            ),
            None => panic!(
                "{}: Expected a look-ahead, found '{}'",
                self.context, self.factor
            ),
        }
        self
    }

    /// Assert the scanner states of a `<A, B>"tok"` terminal
    pub fn states(self, expected: &[&str]) -> Self {
        match self.symbol() {
            Symbol::TokenWithStates(token) => {
                let actual: Vec<&str> = token.states.names().collect();
                assert_eq!(actual, expected, "{}: Scanner states differ", self.context);
            }
            other => panic!(
                "{}: Expected a token with states, found '{}'",
                self.context, other
            ),
        }
        self
    }

    pub fn cut(self) -> Self {
        let cut = self.symbol().ast_control().map(|c| c.is_cut());
        assert_eq!(
            cut,
            Some(true),
            "{}: Expected a cut, found '{}'",
            self.context,
            self.factor
        );
        self
    }

    pub fn member(self, expected: &str) -> Self {
        let member = self.symbol().ast_control().and_then(|c| c.member_name());
        assert_eq!(
            member,
            Some(expected),
            "{}: Member name differs in '{}'",
            self.context,
            self.factor
        );
        self
    }

    pub fn user_type(self, expected: &str) -> Self {
        let user_type = self
            .symbol()
            .ast_control()
            .and_then(|c| c.user_type())
            .map(|t| t.to_string());
        assert_eq!(
            user_type.as_deref(),
            Some(expected),
            "{}: User type differs in '{}'",
            self.context,
            self.factor
        );
        self
    }

    /// Assert the symbol carries no ast_control
    pub fn no_ast_control(self) -> Self {
        assert!(
            self.symbol().ast_control().is_none(),
            "{}: Expected no ast_control in '{}'",
            self.context,
            self.factor
        );
        self
    }

    pub fn group<F>(self, assertion: F)
    where
        F: FnOnce(BracketedAssertion<'a>) -> BracketedAssertion<'a>,
    {
        assertion(self.bracketed(GroupKind::Group));
    }

    pub fn optional<F>(self, assertion: F)
    where
        F: FnOnce(BracketedAssertion<'a>) -> BracketedAssertion<'a>,
    {
        assertion(self.bracketed(GroupKind::Optional));
    }

    pub fn repeat<F>(self, assertion: F)
    where
        F: FnOnce(BracketedAssertion<'a>) -> BracketedAssertion<'a>,
    {
        assertion(self.bracketed(GroupKind::Repeat));
    }
}

fn describe_factor(factor: &Factor) -> &'static str {
    match factor {
        Factor::Group(_) => "group",
        Factor::Optional(_) => "optional",
        Factor::Repeat(_) => "repeat",
        Factor::Symbol(Symbol::NonTerminal(_)) => "non-terminal",
        Factor::Symbol(Symbol::SimpleToken(_)) => "terminal",
        Factor::Symbol(Symbol::TokenWithStates(_)) => "terminal with states",
    }
}

// ============================================================================
// Bracketed Assertions
// ============================================================================

pub struct BracketedAssertion<'a> {
    body: &'a Bracketed,
    context: String,
}

impl<'a> BracketedAssertion<'a> {
    fn alternatives(&self) -> &'a [Alternation] {
        self.body
            .alternations
            .as_ref()
            .map(|a: &'a Alternations| a.alternations.as_slice())
            .unwrap_or(&[])
    }

    /// Assert the brackets enclose nothing
    pub fn empty_body(self) -> Self {
        assert!(
            self.body.alternations.is_none(),
            "{}: Expected an empty body",
            self.context
        );
        self
    }

    pub fn alternative_count(self, expected: usize) -> Self {
        assert_alternative_count(self.alternatives(), expected, &self.context);
        self
    }

    pub fn alternative<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(AlternationAssertion<'a>),
    {
        check_alternative(self.alternatives(), index, &self.context, assertion);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parol::parsing::parse_grammar;

    #[test]
    fn test_walks_nested_factors() {
        let grammar =
            parse_grammar("%start s %% s: a^ { <S>\"x\" ?= 'y' @x: T | } [b];").unwrap();
        assert_grammar(&grammar)
            .start_symbol("s")
            .production_count(1)
            .production(0, |p| {
                p.name("s")
                    .leading_pipe(false)
                    .alternative_count(1)
                    .alternative(0, |a| {
                        a.factor_count(3)
                            .factor(0, |f| {
                                f.non_terminal("a").cut();
                            })
                            .factor(1, |f| {
                                f.repeat(|body| {
                                    body.alternative_count(2)
                                        .alternative(0, |a| {
                                            a.factor(0, |f| {
                                                f.states(&["S"])
                                                    .literal(LiteralKind::String, "\"x\"")
                                                    .look_ahead(LookAheadKind::Positive, "'y'")
                                                    .member("x")
                                                    .user_type("T");
                                            });
                                        })
                                        .alternative(1, |a| {
                                            a.is_empty();
                                        })
                                });
                            })
                            .factor(2, |f| {
                                f.optional(|body| body.alternative_count(1));
                            });
                    });
            });
    }

    #[test]
    #[should_panic(expected = "productions[0].alternatives[0].factors[0]: Expected group")]
    fn test_failure_reports_path() {
        let grammar = parse_grammar("%start s %% s: a;").unwrap();
        assert_grammar(&grammar).production(0, |p| {
            p.alternative(0, |a| {
                a.factor(0, |f| f.group(|body| body));
            });
        });
    }
}
