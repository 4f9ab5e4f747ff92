//! # parol-grammar
//!
//! A standalone lexer and recursive-descent parser for parol grammar definitions (`.par` files).
//!
//! File Layout
//!
//! The crate follows the order in which source flows through it:
//! src/parol
//!   ├── token        Token definitions (logos)
//!   ├── lexing       Source text to token stream
//!   ├── parsing      Token stream to syntax tree
//!   ├── ast          Syntax tree, locations, diagnostics, lints
//!   ├── formats      Renderers (treeviz, tag, json, yaml, par) and the detokenizer
//!   ├── processor    `<stage>-<format>` processing specs used by the CLI
//!   ├── config       Layered configuration
//!   └── testing      Fluent assertions and the sample corpus
//!
//! For testing guidelines, see the [testing module](parol::testing).

pub mod parol;
