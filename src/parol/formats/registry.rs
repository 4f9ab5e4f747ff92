//! Format registry for grammar serialization
//!
//! This module provides a pluggable registry system for output formats.
//! Each format implements the `Formatter` trait and can be registered with `FormatRegistry`.

use crate::parol::ast::ParolGrammar;
use std::collections::HashMap;
use thiserror::Error;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for grammar formatters
///
/// Implementors provide a way to serialize a parsed grammar to a string representation.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "tag")
    fn name(&self) -> &str;

    fn serialize(&self, grammar: &ParolGrammar) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of grammar formatters
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a grammar using the specified format
    pub fn serialize(&self, grammar: &ParolGrammar, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(grammar)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with default formatters
    pub fn with_defaults() -> Self {
        Self::with_line_numbers(false)
    }

    /// Default formatters, with treeviz prefixing each line with its source line number
    pub fn with_line_numbers(show_line_numbers: bool) -> Self {
        let mut registry = Self::new();

        registry.register(super::TreevizFormatter::with_line_numbers(show_line_numbers));
        registry.register(super::TagFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry.register(super::ParFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parol::parsing::parse_grammar;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _grammar: &ParolGrammar) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatRegistry::new();
        assert_eq!(registry.formatters.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
        assert_eq!(registry.get("test").unwrap().description(), "Test formatter");
    }

    #[test]
    fn test_registry_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);
        let grammar = parse_grammar("%start s %% s: ;").unwrap();

        assert_eq!(registry.serialize(&grammar, "test").unwrap(), "test output");
        match registry.serialize(&grammar, "nonexistent").unwrap_err() {
            FormatError::FormatNotFound(name) => assert_eq!(name, "nonexistent"),
            other => panic!("Expected FormatNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_registry_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["json", "par", "tag", "treeviz", "yaml"]
        );
    }

    #[test]
    fn test_registry_with_line_numbers() {
        let grammar = parse_grammar("%start s\n%%\ns: ;").unwrap();
        let numbered = FormatRegistry::with_line_numbers(true)
            .serialize(&grammar, "treeviz")
            .unwrap();
        assert!(numbered.lines().skip(1).all(|line| line.starts_with("0")));
        let plain = FormatRegistry::with_defaults()
            .serialize(&grammar, "treeviz")
            .unwrap();
        assert_ne!(numbered, plain);
    }
}
