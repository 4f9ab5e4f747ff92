//! File processing API for `.par` grammars
//!
//! This module runs a grammar file through one stage of the pipeline (tokens or syntax
//! tree) and renders the result in a chosen format. A processing spec names both halves,
//! e.g. `token-simple` or `ast-treeviz`.
//!
//! ```rust,ignore
//! use parol_grammar::parol::processor::{process_file, ProcessingOptions, ProcessingSpec};
//!
//! let spec = ProcessingSpec::from_string("ast-treeviz")?;
//! let output = process_file("samples/calc.par", &spec, &ProcessingOptions::default())?;
//! ```

use crate::parol::ast::{GrammarError, ParolGrammar};
use crate::parol::formats::{FormatError, FormatRegistry};
use crate::parol::lexing::{lex, tokenize, TokenStream};
use crate::parol::parsing::{parse_grammar_with, ParserOptions};
use crate::parol::token::ToParString;
use once_cell::sync::Lazy;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

static REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);
static NUMBERED_REGISTRY: Lazy<FormatRegistry> =
    Lazy::new(|| FormatRegistry::with_line_numbers(true));

fn registry(options: &ProcessingOptions) -> &'static FormatRegistry {
    if options.show_line_numbers {
        &NUMBERED_REGISTRY
    } else {
        &REGISTRY
    }
}

/// Represents the output format for the token stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenFormat {
    Simple,
    Json,
    /// Trivia included
    RawSimple,
    RawJson,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingSpec {
    Token(TokenFormat),
    /// A formatter name from the registry
    Ast(String),
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "ast-json"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let parts: Vec<&str> = format_str.split('-').collect();
        if parts.len() < 2 {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        }

        let format = parts[1..].join("-");
        match parts[0] {
            "token" => {
                let format = match format.as_str() {
                    "simple" => TokenFormat::Simple,
                    "json" => TokenFormat::Json,
                    "raw-simple" => TokenFormat::RawSimple,
                    "raw-json" => TokenFormat::RawJson,
                    _ => return Err(ProcessingError::InvalidFormatType(format)),
                };
                Ok(ProcessingSpec::Token(format))
            }
            "ast" => {
                if !REGISTRY.has(&format) {
                    return Err(ProcessingError::InvalidFormatType(format));
                }
                Ok(ProcessingSpec::Ast(format))
            }
            stage => Err(ProcessingError::InvalidStage(stage.to_string())),
        }
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        let mut specs = vec![
            ProcessingSpec::Token(TokenFormat::Simple),
            ProcessingSpec::Token(TokenFormat::Json),
            ProcessingSpec::Token(TokenFormat::RawSimple),
            ProcessingSpec::Token(TokenFormat::RawJson),
        ];
        specs.extend(REGISTRY.list_formats().into_iter().map(ProcessingSpec::Ast));
        specs
    }

    /// One-line description for listings
    pub fn description(&self) -> &str {
        match self {
            ProcessingSpec::Token(TokenFormat::Simple) => "Tokens, one per line",
            ProcessingSpec::Token(TokenFormat::Json) => "Tokens as JSON",
            ProcessingSpec::Token(TokenFormat::RawSimple) => {
                "Tokens including whitespace and comments, one per line"
            }
            ProcessingSpec::Token(TokenFormat::RawJson) => {
                "Tokens including whitespace and comments as JSON"
            }
            ProcessingSpec::Ast(name) => REGISTRY
                .get(name)
                .map(|formatter| formatter.description())
                .unwrap_or_default(),
        }
    }
}

impl fmt::Display for ProcessingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingSpec::Token(TokenFormat::Simple) => f.write_str("token-simple"),
            ProcessingSpec::Token(TokenFormat::Json) => f.write_str("token-json"),
            ProcessingSpec::Token(TokenFormat::RawSimple) => f.write_str("token-raw-simple"),
            ProcessingSpec::Token(TokenFormat::RawJson) => f.write_str("token-raw-json"),
            ProcessingSpec::Ast(name) => write!(f, "ast-{}", name),
        }
    }
}

/// Settings that shape the output but not its kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub parser: ParserOptions,
    /// Prefix treeviz lines with their source line number
    pub show_line_numbers: bool,
}

/// Errors that can occur during processing
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid stage: {0}")]
    InvalidStage(String),
    #[error("Invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Process grammar source text according to the given specification
pub fn process_source(
    source: &str,
    spec: &ProcessingSpec,
    options: &ProcessingOptions,
) -> Result<String, ProcessingError> {
    debug!(%spec, "processing source");
    match spec {
        ProcessingSpec::Token(format) => {
            let tokens = match format {
                TokenFormat::Simple | TokenFormat::Json => lex(source),
                TokenFormat::RawSimple | TokenFormat::RawJson => tokenize(source),
            }
            .map_err(GrammarError::from)?;
            format_tokens(&tokens, *format)
        }
        ProcessingSpec::Ast(name) => {
            let grammar = parse_grammar_with(source, &options.parser)?;
            render_grammar(&grammar, name, options)
        }
    }
}

/// Render an already parsed grammar with a registered formatter
pub fn render_grammar(
    grammar: &ParolGrammar,
    format: &str,
    options: &ProcessingOptions,
) -> Result<String, ProcessingError> {
    Ok(registry(options).serialize(grammar, format)?)
}

/// Process a grammar file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
    options: &ProcessingOptions,
) -> Result<String, ProcessingError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(ProcessingError::FileNotFound(
            file_path.display().to_string(),
        ));
    }
    let content = fs::read_to_string(file_path)?;
    process_source(&content, spec, options)
}

fn format_tokens(tokens: &TokenStream, format: TokenFormat) -> Result<String, ProcessingError> {
    match format {
        TokenFormat::Simple | TokenFormat::RawSimple => {
            let lines: Vec<String> = tokens
                .iter()
                .map(|(token, range)| {
                    format!(
                        "{:?} {}..{} {:?}",
                        token.kind(),
                        range.start,
                        range.end,
                        token.to_par_string()
                    )
                })
                .collect();
            Ok(lines.join("\n"))
        }
        TokenFormat::Json | TokenFormat::RawJson => serde_json::to_string_pretty(tokens)
            .map_err(|e| FormatError::SerializationError(e.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_from_string() {
        assert_eq!(
            ProcessingSpec::from_string("token-simple").unwrap(),
            ProcessingSpec::Token(TokenFormat::Simple)
        );
        assert_eq!(
            ProcessingSpec::from_string("token-raw-json").unwrap(),
            ProcessingSpec::Token(TokenFormat::RawJson)
        );
        assert_eq!(
            ProcessingSpec::from_string("ast-treeviz").unwrap(),
            ProcessingSpec::Ast("treeviz".to_string())
        );
    }

    #[test]
    fn test_spec_errors() {
        assert!(matches!(
            ProcessingSpec::from_string("token"),
            Err(ProcessingError::InvalidFormat(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("tree-simple"),
            Err(ProcessingError::InvalidStage(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("ast-simple"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("token-treeviz"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
    }

    #[test]
    fn test_available_specs_display_round_trip() {
        let specs = ProcessingSpec::available_specs();
        assert!(specs.len() >= 9);
        for spec in specs {
            assert_eq!(ProcessingSpec::from_string(&spec.to_string()).unwrap(), spec);
            assert!(!spec.description().is_empty());
        }
    }

    #[test]
    fn test_token_simple_output() {
        let spec = ProcessingSpec::Token(TokenFormat::Simple);
        let output =
            process_source("%start s %% s: ;", &spec, &ProcessingOptions::default()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "Start 0..6 \"%start\"");
        assert_eq!(lines[1], "Identifier 7..8 \"s\"");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_raw_tokens_include_trivia() {
        let spec = ProcessingSpec::Token(TokenFormat::RawSimple);
        let output = process_source("%start s", &spec, &ProcessingOptions::default()).unwrap();
        assert_eq!(output.lines().nth(1), Some("Whitespace 6..7 \" \""));
    }

    #[test]
    fn test_token_json_output() {
        let spec = ProcessingSpec::Token(TokenFormat::Json);
        let output = process_source("%%", &spec, &ProcessingOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_ast_output_and_errors() {
        let spec = ProcessingSpec::Ast("par".to_string());
        let output = process_source(
            "%start s %% s: \"a\";",
            &spec,
            &ProcessingOptions::default(),
        )
        .unwrap();
        assert!(output.contains("s: \"a\";"));

        let error = process_source("%start s %% s: \"a\"", &spec, &ProcessingOptions::default())
            .unwrap_err();
        assert!(matches!(error, ProcessingError::Grammar(GrammarError::Parse(_))));
    }

    #[test]
    fn test_line_numbers_reach_the_treeviz_formatter() {
        let source = "%start s\n%%\ns: ;\n";
        let spec = ProcessingSpec::Ast("treeviz".to_string());
        let options = ProcessingOptions {
            show_line_numbers: true,
            ..ProcessingOptions::default()
        };
        let numbered = process_source(source, &spec, &options).unwrap();
        assert_eq!(numbered.lines().nth(1), Some("01 ├─ § %start s"));

        let grammar = parse_grammar_with(source, &options.parser).unwrap();
        assert_eq!(render_grammar(&grammar, "treeviz", &options).unwrap(), numbered);
        let plain = render_grammar(&grammar, "treeviz", &ProcessingOptions::default()).unwrap();
        assert_eq!(plain.lines().nth(1), Some("├─ § %start s"));
    }

    #[test]
    fn test_render_unknown_format() {
        let grammar = parse_grammar_with("%start s %% s: ;", &ParserOptions::default()).unwrap();
        let error = render_grammar(&grammar, "html", &ProcessingOptions::default()).unwrap_err();
        assert!(matches!(
            error,
            ProcessingError::Format(FormatError::FormatNotFound(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let spec = ProcessingSpec::Ast("treeviz".to_string());
        let error =
            process_file("/no/such/grammar.par", &spec, &ProcessingOptions::default()).unwrap_err();
        assert!(matches!(error, ProcessingError::FileNotFound(_)));
    }
}
