//! Diagnostics
//!
//! A uniform shape for everything that can be wrong with a grammar file: lexer errors,
//! parse errors and lint findings. Renderers and the `par` binary only deal with this type.

use super::error::ParseError;
use super::range::{Range, SourceLocation};
use crate::parol::lexing::LexError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lint findings are errors or warnings; lexer and parser failures are always errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub code: Option<String>,
    /// The stage that produced it: "lexer", "parser" or "lint"
    pub source: String,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            range,
            severity,
            message: message.into(),
            code: None,
            source: "parser".to_string(),
        }
    }

    pub fn error(range: Range, message: impl Into<String>) -> Self {
        Self::new(range, DiagnosticSeverity::Error, message)
    }

    pub fn warning(range: Range, message: impl Into<String>) -> Self {
        Self::new(range, DiagnosticSeverity::Warning, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    pub fn from_lex_error(error: &LexError, location: &SourceLocation) -> Self {
        Diagnostic::error(
            location.byte_range_to_ast_range(&error.range),
            error.to_string(),
        )
        .with_code("lex-error")
        .with_source("lexer")
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(error: &ParseError) -> Self {
        Diagnostic::error(error.range.clone(), error.message()).with_code("parse-error")
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity, self.source)?;
        if let Some(code) = &self.code {
            write!(f, " ({})", code)?;
        }
        write!(f, ": {} at {}", self.message, self.range.start)
    }
}

/// True if any diagnostic is an error
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}
