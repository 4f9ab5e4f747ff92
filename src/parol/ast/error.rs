//! Error types for parsing grammars

use super::diagnostics::Diagnostic;
use super::range::{Range, SourceLocation};
use crate::parol::lexing::LexError;
use crate::parol::token::{Token, TokenKind};
use thiserror::Error;

#[cfg(test)]
use super::range::Position;

/// The parser met a token no rule accepts at this point, or brackets nested too deep
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", describe_failure(.expected, .found, .nesting_limit))]
pub struct ParseError {
    /// Token kinds that would have been accepted, deduplicated and sorted
    pub expected: Vec<TokenKind>,
    /// `None` at end of input
    pub found: Option<Token>,
    pub range: Range,
    /// Set when the opening bracket at `range` goes past this many nested groups
    pub nesting_limit: Option<usize>,
}

impl ParseError {
    pub fn new(mut expected: Vec<TokenKind>, found: Option<Token>, range: Range) -> Self {
        expected.sort();
        expected.dedup();
        Self {
            expected,
            found,
            range,
            nesting_limit: None,
        }
    }

    pub fn too_deep(limit: usize, found: Option<Token>, range: Range) -> Self {
        Self {
            expected: Vec::new(),
            found,
            range,
            nesting_limit: Some(limit),
        }
    }

    pub fn expects(&self, kind: TokenKind) -> bool {
        self.expected.contains(&kind)
    }

    pub fn message(&self) -> String {
        describe_failure(&self.expected, &self.found, &self.nesting_limit)
    }
}

fn describe_failure(
    expected: &[TokenKind],
    found: &Option<Token>,
    nesting_limit: &Option<usize>,
) -> String {
    if let Some(limit) = nesting_limit {
        return format!("groups nested deeper than {} levels", limit);
    }
    let expected = match expected {
        [] => "nothing".to_string(),
        [single] => single.describe().to_string(),
        many => {
            let names: Vec<&str> = many.iter().map(TokenKind::describe).collect();
            format!("one of {}", names.join(", "))
        }
    };
    let found = match found {
        None => "end of input".to_string(),
        Some(token) if token.kind().is_literal() || token.kind() == TokenKind::Identifier => {
            format!("{} `{}`", token.kind().describe(), token)
        }
        Some(token) => token.kind().describe().to_string(),
    };
    format!("expected {}, found {}", expected, found)
}

/// Why a grammar failed to parse
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("lexing failed: {0}")]
    Lex(#[from] LexError),
    /// Every error found in one pass, in source order
    #[error("{} parse error(s), first: {}", .0.len(), first_message(.0))]
    Parse(Vec<ParseError>),
}

fn first_message(errors: &[ParseError]) -> String {
    errors
        .first()
        .map(ParseError::message)
        .unwrap_or_default()
}

impl GrammarError {
    pub fn parse_errors(&self) -> &[ParseError] {
        match self {
            GrammarError::Parse(errors) => errors,
            GrammarError::Lex(_) => &[],
        }
    }

    /// Convert into diagnostics; `source` is needed to place lexer byte ranges
    pub fn diagnostics(&self, source: &str) -> Vec<Diagnostic> {
        match self {
            GrammarError::Lex(error) => {
                let location = SourceLocation::new(source);
                vec![Diagnostic::from_lex_error(error, &location)]
            }
            GrammarError::Parse(errors) => errors.iter().map(Diagnostic::from).collect(),
        }
    }
}

/// Format source code context around an error location
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// All lines are numbered for easy reference.
pub fn format_source_context(source: &str, range: &Range) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = range.start.line;

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source_context() {
        let source = "line 1\nline 2\nline 3\nerror line\nline 5\nline 6\nline 7";
        let range = Range::new(20..30, Position::new(3, 0), Position::new(3, 10));

        let context = format_source_context(source, &range);

        assert!(context.contains("line 2"));
        assert!(context.contains(">>   4 | error line"));
        assert!(context.contains("line 6"));
        assert!(!context.contains("line 7"));
        assert!(!context.contains("line 1"));
    }

    #[test]
    fn test_parse_error_message() {
        let error = ParseError::new(
            vec![TokenKind::Semicolon, TokenKind::Pipe, TokenKind::Semicolon],
            None,
            Range::default(),
        );
        assert_eq!(error.expected, vec![TokenKind::Semicolon, TokenKind::Pipe]);
        assert_eq!(error.to_string(), "expected one of `;`, `|`, found end of input");

        let error = ParseError::new(
            vec![TokenKind::Colon],
            Some(Token::Identifier("b".to_string())),
            Range::default(),
        );
        assert_eq!(error.to_string(), "expected `:`, found identifier `b`");
        assert!(error.expects(TokenKind::Colon));
    }

    #[test]
    fn test_nesting_error_message() {
        let error = ParseError::too_deep(64, Some(Token::LParen), Range::default());
        assert_eq!(error.to_string(), "groups nested deeper than 64 levels");
        assert!(error.expected.is_empty());
    }
}
