//! Output format implementations for syntax tree and token serialization
//!
//! This module contains different format implementations for serializing:
//! - Grammars to various output formats (treeviz, tag, json, yaml)
//! - Grammars back to canonical `.par` source (par)
//! - Token streams back to the exact source text (detokenize)

pub mod par;
pub mod registry;
pub mod structured;
pub mod tag;
pub mod treeviz;

pub use crate::parol::token::{detokenize, ToParString};
pub use par::{unparse, ParFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use tag::{serialize_grammar as serialize_ast_tag, TagFormatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_options, TreevizFormatter};
