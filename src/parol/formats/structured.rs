//! JSON and YAML renderings of the tree snapshot

use super::registry::{FormatError, Formatter};
use crate::parol::ast::{snapshot_from_grammar, ParolGrammar};

/// Pretty-printed JSON of the [AstSnapshot](crate::parol::ast::AstSnapshot), ranges included
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, grammar: &ParolGrammar) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&snapshot_from_grammar(grammar))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Syntax tree snapshot as JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, grammar: &ParolGrammar) -> Result<String, FormatError> {
        serde_yaml::to_string(&snapshot_from_grammar(grammar))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Syntax tree snapshot as YAML"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parol::ast::AstSnapshot;
    use crate::parol::parsing::parse_grammar;

    #[test]
    fn test_json_reads_back() {
        let grammar = parse_grammar("%start s %% s: \"a\" | b;").unwrap();
        let json = JsonFormatter.serialize(&grammar).unwrap();
        let snapshot: AstSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, snapshot_from_grammar(&grammar));
        assert_eq!(snapshot.attributes.get("start").map(String::as_str), Some("s"));
    }

    #[test]
    fn test_yaml_reads_back() {
        let grammar = parse_grammar("%start s %scanner A { %auto_ws_off } %% s: <A>'x';").unwrap();
        let yaml = YamlFormatter.serialize(&grammar).unwrap();
        assert!(yaml.contains("node_type: token_with_states"));
        let snapshot: AstSnapshot = serde_yaml::from_str(&yaml).unwrap();
        assert!(snapshot.same_structure(&snapshot_from_grammar(&grammar)));
    }
}
