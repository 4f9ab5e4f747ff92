//! Command-line interface for parol grammars
//! This binary checks `.par` files and renders their tokens or syntax tree in different formats.
//!
//! Usage:
//!   par `<path>` [--format `<format>`]   - Print the file in the given format
//!   par `<path>` --check                 - Only report diagnostics
//!   par --list-formats                   - List all available formats
//!
//! Settings are read from the built-in defaults, then `par.toml` in the working directory,
//! then `--config <file>`, then the remaining flags. Set `PAR_LOG` (e.g. `PAR_LOG=debug`)
//! to see the pipeline logs on stderr.

use clap::{Arg, ArgAction, ArgMatches, Command};
use parol_grammar::parol::ast::diagnostics::has_errors;
use parol_grammar::parol::ast::{format_source_context, lint, Diagnostic};
use parol_grammar::parol::config::{Loader, ParConfig, PROJECT_CONFIG_FILE};
use parol_grammar::parol::parsing::parse_grammar_with;
use parol_grammar::parol::processor::{
    process_source, render_grammar, ProcessingError, ProcessingOptions, ProcessingSpec,
};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();

    let matches = Command::new("par")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for checking and inspecting parol grammar files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the .par file")
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (e.g., 'ast-treeviz', 'ast-json', 'token-simple')"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Only report diagnostics, print nothing on success")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-recover")
                .long("no-recover")
                .help("Stop at the first parse error")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("line-numbers")
                .long("line-numbers")
                .help("Prefix treeviz lines with source line numbers")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(2);
        }
    };
    debug!(?config, "loaded configuration");

    let Some(path) = matches.get_one::<String>("path") else {
        return ExitCode::from(2);
    };
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    if matches.get_flag("check") {
        return handle_check_command(path, &source, &config);
    }

    let format = matches
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| config.output.format.clone());
    handle_execute_command(path, &source, &format, &config)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("PAR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<ParConfig, config::ConfigError> {
    let mut loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    if let Some(file) = matches.get_one::<String>("config") {
        loader = loader.with_file(file);
    }
    if matches.get_flag("no-recover") {
        loader = loader
            .set_override("parsing.recover", false)?
            .set_override("parsing.max_errors", 1i64)?;
    }
    if matches.get_flag("line-numbers") {
        loader = loader.set_override("output.show_line_numbers", true)?;
    }
    loader.build()
}

/// Parse and lint; print diagnostics only
fn handle_check_command(path: &str, source: &str, config: &ParConfig) -> ExitCode {
    match parse_grammar_with(source, &config.parser_options()) {
        Ok(grammar) => {
            let diagnostics = if config.lints.enabled {
                lint(&grammar)
            } else {
                Vec::new()
            };
            report(path, source, &diagnostics);
            if has_errors(&diagnostics) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(error) => {
            report(path, source, &error.diagnostics(source));
            ExitCode::FAILURE
        }
    }
}

fn handle_execute_command(path: &str, source: &str, format: &str, config: &ParConfig) -> ExitCode {
    let spec = match ProcessingSpec::from_string(format) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run `par --list-formats` for the available formats.");
            return ExitCode::from(2);
        }
    };
    let options = ProcessingOptions {
        parser: config.parser_options(),
        show_line_numbers: config.output.show_line_numbers,
    };

    let rendered = match &spec {
        ProcessingSpec::Ast(name) => match parse_grammar_with(source, &options.parser) {
            Ok(grammar) => {
                let output = render_grammar(&grammar, name, &options);
                if output.is_ok() && config.lints.enabled {
                    // Lints never change the exit code when rendering.
                    report(path, source, &lint(&grammar));
                }
                output
            }
            Err(error) => Err(ProcessingError::Grammar(error)),
        },
        ProcessingSpec::Token(_) => process_source(source, &spec, &options),
    };

    match rendered {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(ProcessingError::Grammar(error)) => {
            report(path, source, &error.diagnostics(source));
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Execution error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(path: &str, source: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("{}: {}", path, diagnostic);
        eprint!("{}", format_source_context(source, &diagnostic.range));
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for spec in ProcessingSpec::available_specs() {
        println!("  {}", spec);
        println!("    {}", spec.description());
    }
}
