//! Syntax tree element types
//!
//!     One Rust type per named rule of the grammar language. Choice rules (factor, symbol,
//!     declaration, ast_control, ...) are enums; sequence rules are structs. Every node owns
//!     its children and carries a `location` covering them.
//!
//!     Layout:
//!         grammar     parol (the root) and grammar_definition
//!         prolog      start_declaration, declaration, scanner directives, scanner_state
//!         production  production, alternations, alternation, factor, group/optional/repeat
//!         symbol      symbols, token expressions, ast_control, names
//!
//!     `Display` renders each node in canonical `.par` syntax on a single line. The `par`
//!     format builds on this for whole files.

pub mod grammar;
pub mod production;
pub mod prolog;
pub mod symbol;

pub use grammar::{GrammarDefinition, ParolGrammar};
pub use production::{Alternation, Alternations, Bracketed, Factor, GroupKind, Production};
pub use prolog::{
    Declaration, DeclarationKind, Prolog, ScannerDirective, ScannerDirectiveKind, ScannerState,
    ScannerStateDirective, ScannerStateDirectiveKind, StartDeclaration,
};
pub use symbol::{
    AstControl, AstControlKind, Identifier, IdentifierList, LiteralKind, LookAhead,
    LookAheadKind, MemberName, NonTerminal, SimpleToken, Symbol, TokenExpression, TokenLiteral,
    TokenWithStates, UserTypeDeclaration, UserTypeName,
};
