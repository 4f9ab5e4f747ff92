//! Access to the sample grammars shipped under `samples/`

use crate::parol::ast::ParolGrammar;
use crate::parol::parsing::parse_grammar;
use std::fs;
use std::path::PathBuf;

/// Absolute path of a file relative to the crate root
pub fn workspace_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

pub fn sample_path(name: &str) -> PathBuf {
    workspace_path("samples").join(name)
}

/// Names of all `.par` samples, sorted
pub fn sample_names() -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(workspace_path("samples"))
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter_map(|entry| entry.file_name().into_string().ok())
                .filter(|name| name.ends_with(".par"))
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Read a sample's source text. Panics if it does not exist.
pub fn load_sample(name: &str) -> String {
    let path = sample_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read sample {}: {}", path.display(), e))
}

/// Load and parse a sample. Panics with rendered diagnostics if it does not parse.
pub fn parse_sample(name: &str) -> ParolGrammar {
    let source = load_sample(name);
    match parse_grammar(&source) {
        Ok(grammar) => grammar,
        Err(error) => {
            let messages: Vec<String> = error
                .diagnostics(&source)
                .iter()
                .map(ToString::to_string)
                .collect();
            panic!("Sample {} failed to parse:\n{}", name, messages.join("\n"))
        }
    }
}
