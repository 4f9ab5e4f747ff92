//! Testing utilities for grammar assertions
//!
//! Two tools are meant to be used together when testing the parser:
//!
//! 1. **[samples]** loads the curated grammars under `samples/`. Prefer them over inline
//!    source for anything bigger than a production or two, so that the test corpus stays
//!    in one place.
//! 2. **[assert_grammar]** walks a parsed grammar with a fluent API and reports the path
//!    of the failing node (e.g. `productions[2].alternatives[0].factors[1]`).
//!
//! ```rust-example
//! use parol_grammar::parol::testing::{assert_grammar, samples};
//!
//! let grammar = samples::parse_sample("calc.par");
//! assert_grammar(&grammar)
//!     .start_symbol("calc")
//!     .production(0, |p| {
//!         p.name("calc").alternative_count(1).alternative(0, |a| {
//!             a.factor_count(1).factor(0, |f| {
//!                 f.repeat(|body| body.alternative_count(1));
//!             });
//!         });
//!     });
//! ```

pub mod samples;
mod testing_assertions;

pub use testing_assertions::{
    assert_grammar, AlternationAssertion, BracketedAssertion, FactorAssertion, GrammarAssertion,
    ProductionAssertion, ScannerStateAssertion,
};
