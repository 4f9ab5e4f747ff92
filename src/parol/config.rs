//! Configuration loader for the `par` tool.
//!
//! `defaults/par.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. Callers layer user files on top of those defaults via
//! [`Loader`] before deserializing into [`ParConfig`].

use crate::parol::parsing::ParserOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/par.default.toml");

/// Name of the optional per-project configuration file
pub const PROJECT_CONFIG_FILE: &str = "par.toml";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParConfig {
    pub parsing: ParsingConfig,
    pub output: OutputConfig,
    pub lints: LintsConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParsingConfig {
    pub recover: bool,
    pub max_errors: usize,
}

impl From<&ParsingConfig> for ParserOptions {
    fn from(config: &ParsingConfig) -> Self {
        ParserOptions {
            recover: config.recover,
            max_errors: config.max_errors,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputConfig {
    /// A processing spec such as `ast-treeviz`
    pub format: String,
    pub show_line_numbers: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LintsConfig {
    pub enabled: bool,
}

impl ParConfig {
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions::from(&self.parsing)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ParConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ParConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.parsing.recover);
        assert_eq!(config.parsing.max_errors, 100);
        assert_eq!(config.output.format, "ast-treeviz");
        assert!(!config.output.show_line_numbers);
        assert!(config.lints.enabled);
        assert_eq!(config.parser_options(), ParserOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parsing.recover", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(!config.parsing.recover);
    }

    #[test]
    fn layers_files_over_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[output]\nformat = \"ast-par\"").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.output.format, "ast-par");
        assert!(config.parsing.recover);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/par.toml")
            .build()
            .unwrap();
        assert_eq!(config, load_defaults().unwrap());
    }
}
