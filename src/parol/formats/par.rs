//! Par (canonical source) format module declaration

#[allow(clippy::module_inception)]
pub mod par;

pub use par::{unparse, ParFormatter};
