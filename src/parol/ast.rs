//! Syntax tree definitions and utilities for parol grammars
//!
//! This module provides the syntax tree, along with utilities for tracking source
//! positions, reporting errors and checking a parsed grammar.
//!
//! ## Modules
//!
//! - `range` - Position and Range types for source code locations
//! - `elements` - One node type per grammar rule
//! - `traits` - AstNode and Visitor
//! - `snapshot` - Normalized, serializable view of the tree used by all renderers
//! - `error` - Parse error types and source excerpts
//! - `diagnostics` - Uniform diagnostics for errors and lints
//! - `lints` - Semantic checks over a parsed grammar

pub mod diagnostics;
pub mod elements;
pub mod error;
pub mod lints;
pub mod range;
pub mod snapshot;
pub mod traits;

pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use elements::*;
pub use error::{format_source_context, GrammarError, ParseError};
pub use lints::lint;
pub use range::{Position, Range, SourceLocation};
pub use snapshot::{snapshot_from_grammar, AstSnapshot};
pub use traits::{AstNode, Visitor};
