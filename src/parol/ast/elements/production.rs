//! Production elements
//!
//!     production    identifier `:` [alternations | `|` alternations] `;`
//!     alternations  alternation (`|` alternation)* [`|`]
//!     alternation   factor+
//!     factor        group | repeat | optional | symbol
//!
//!     Empty alternatives: the only place an alternation may hold zero factors is the last
//!     slot of an alternations list that ended in a bare `|`. The parser creates that empty
//!     alternation; nothing else does.

use super::super::range::Range;
use super::super::traits::{AstNode, Visitor};
use super::symbol::{Identifier, Symbol};
use std::fmt;

/// A named rule with its (possibly empty) body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub name: Identifier,
    /// The body was written as `name: | a | b;`. Semantically the same as `name: a | b;`.
    pub leading_pipe: bool,
    /// `None` for an empty body (`name: ;`)
    pub alternations: Option<Alternations>,
    pub location: Range,
}

impl Production {
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Alternatives of the body; empty for an empty body
    pub fn alternatives(&self) -> &[Alternation] {
        self.alternations
            .as_ref()
            .map(|a| a.alternations.as_slice())
            .unwrap_or(&[])
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_production(self);
        if let Some(alternations) = &self.alternations {
            alternations.accept(visitor);
        }
        visitor.leave_production(self);
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        if self.leading_pipe {
            f.write_str(" |")?;
        }
        if let Some(alternations) = &self.alternations {
            write!(f, " {}", alternations)?;
        }
        f.write_str(";")
    }
}

/// A non-empty ordered list of alternatives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternations {
    pub alternations: Vec<Alternation>,
    pub location: Range,
}

impl Alternations {
    pub fn len(&self) -> usize {
        self.alternations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternations.is_empty()
    }

    /// True when the list ended with a bare `|`
    pub fn has_empty_alternative(&self) -> bool {
        self.alternations
            .last()
            .map(Alternation::is_empty)
            .unwrap_or(false)
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        for alternation in &self.alternations {
            alternation.accept(visitor);
        }
    }
}

impl fmt::Display for Alternations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, alternation) in self.alternations.iter().enumerate() {
            if index > 0 {
                f.write_str(" |")?;
                if !alternation.is_empty() {
                    f.write_str(" ")?;
                }
            }
            write!(f, "{}", alternation)?;
        }
        Ok(())
    }
}

/// A sequence of factors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternation {
    pub factors: Vec<Factor>,
    pub location: Range,
}

impl Alternation {
    /// The explicit empty alternative produced by a trailing `|`
    pub fn empty(location: Range) -> Self {
        Self {
            factors: Vec::new(),
            location,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_alternation(self);
        for factor in &self.factors {
            factor.accept(visitor);
        }
        visitor.leave_alternation(self);
    }
}

impl fmt::Display for Alternation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let factors: Vec<String> = self.factors.iter().map(|x| x.to_string()).collect();
        f.write_str(&factors.join(" "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// `( ... )`
    Group,
    /// `[ ... ]`
    Optional,
    /// `{ ... }`
    Repeat,
}

impl GroupKind {
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            GroupKind::Group => ("(", ")"),
            GroupKind::Optional => ("[", "]"),
            GroupKind::Repeat => ("{", "}"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GroupKind::Group => "group",
            GroupKind::Optional => "optional",
            GroupKind::Repeat => "repeat",
        }
    }
}

/// Body of a group, optional or repeat. Each may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bracketed {
    pub alternations: Option<Alternations>,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Factor {
    Group(Bracketed),
    Repeat(Bracketed),
    Optional(Bracketed),
    Symbol(Symbol),
}

impl Factor {
    /// The bracketed body and its kind, for the three grouping factors
    pub fn as_group(&self) -> Option<(GroupKind, &Bracketed)> {
        match self {
            Factor::Group(body) => Some((GroupKind::Group, body)),
            Factor::Optional(body) => Some((GroupKind::Optional, body)),
            Factor::Repeat(body) => Some((GroupKind::Repeat, body)),
            Factor::Symbol(_) => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Factor::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        let (kind, body) = match self {
            Factor::Symbol(symbol) => return symbol.accept(visitor),
            Factor::Group(body) => (GroupKind::Group, body),
            Factor::Optional(body) => (GroupKind::Optional, body),
            Factor::Repeat(body) => (GroupKind::Repeat, body),
        };
        visitor.visit_group(kind, body);
        if let Some(alternations) = &body.alternations {
            alternations.accept(visitor);
        }
        visitor.leave_group(kind, body);
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, body) = match self {
            Factor::Symbol(symbol) => return write!(f, "{}", symbol),
            Factor::Group(body) => (GroupKind::Group, body),
            Factor::Optional(body) => (GroupKind::Optional, body),
            Factor::Repeat(body) => (GroupKind::Repeat, body),
        };
        let (open, close) = kind.delimiters();
        match &body.alternations {
            Some(alternations) => write!(f, "{}{}{}", open, alternations, close),
            None => write!(f, "{}{}", open, close),
        }
    }
}

impl AstNode for Production {
    fn node_type(&self) -> &'static str {
        "production"
    }

    fn display_label(&self) -> String {
        self.name.to_string()
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl AstNode for Alternations {
    fn node_type(&self) -> &'static str {
        "alternations"
    }

    fn display_label(&self) -> String {
        format!("{} alternatives", self.alternations.len())
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl AstNode for Alternation {
    fn node_type(&self) -> &'static str {
        "alternation"
    }

    fn display_label(&self) -> String {
        if self.is_empty() {
            "<empty>".to_string()
        } else {
            self.to_string()
        }
    }

    fn range(&self) -> &Range {
        &self.location
    }
}

impl AstNode for Factor {
    fn node_type(&self) -> &'static str {
        match self {
            Factor::Group(_) => "group",
            Factor::Repeat(_) => "repeat",
            Factor::Optional(_) => "optional",
            Factor::Symbol(symbol) => symbol.node_type(),
        }
    }

    fn display_label(&self) -> String {
        self.to_string()
    }

    fn range(&self) -> &Range {
        match self {
            Factor::Group(body) | Factor::Repeat(body) | Factor::Optional(body) => &body.location,
            Factor::Symbol(symbol) => symbol.range(),
        }
    }
}
