//! Token definitions for the parol grammar language
//!
//! This module defines all the tokens that can be produced by the parol lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//!
//! Delimited tokens (strings, raw strings, regexes and block comments) are scanned by
//! callbacks rather than by a single regex, so that hitting end of input before the
//! closing delimiter is reported as an unterminated literal instead of an unexpected
//! character.

use logos::{Lexer, Logos};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasons the lexer can reject input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum LexErrorKind {
    /// No token rule matches the character at this position
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedRawString,
    UnterminatedRegex,
    UnterminatedBlockComment,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LexErrorKind::UnexpectedCharacter => "unexpected character",
            LexErrorKind::UnterminatedString => "unterminated string literal",
            LexErrorKind::UnterminatedRawString => "unterminated raw string literal",
            LexErrorKind::UnterminatedRegex => "unterminated regex literal",
            LexErrorKind::UnterminatedBlockComment => "unterminated block comment",
        };
        f.write_str(text)
    }
}

/// All possible tokens in the parol grammar language
#[derive(Logos, Debug, PartialEq, Eq, Clone, Hash, Serialize, Deserialize)]
#[logos(error = LexErrorKind)]
pub enum Token {
    // Trivia
    #[regex(r"\s+", |lex| lex.slice().to_string())]
    Whitespace(String),
    #[regex(r"//[^\r\n]*", |lex| lex.slice().to_string())]
    LineComment(String),
    #[token("/*", block_comment)]
    BlockComment(String),

    // Names and literals
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    #[token("\"", |lex| delimited(lex, '"', LexErrorKind::UnterminatedString))]
    String(String),
    #[token("'", |lex| delimited(lex, '\'', LexErrorKind::UnterminatedRawString))]
    RawString(String),
    #[token("/", |lex| delimited(lex, '/', LexErrorKind::UnterminatedRegex))]
    Regex(String),

    // Directives
    #[token("%start")]
    Start,
    #[token("%title")]
    Title,
    #[token("%comment")]
    Comment,
    #[token("%user_type")]
    UserType,
    #[token("%nt_type")]
    NtType,
    #[token("%t_type")]
    TType,
    #[token("%grammar_type")]
    GrammarType,
    #[token("%line_comment")]
    LineCommentDirective,
    #[token("%block_comment")]
    BlockCommentDirective,
    #[token("%auto_newline_off")]
    AutoNewlineOff,
    #[token("%auto_ws_off")]
    AutoWsOff,
    #[token("%on")]
    On,
    #[token("%allow_unmatched")]
    AllowUnmatched,
    #[token("%enter")]
    Enter,
    #[token("%push")]
    Push,
    #[token("%pop")]
    Pop,
    #[token("%scanner")]
    Scanner,
    #[token("%%")]
    PercentPercent,

    // Operators
    #[token("::")]
    DoubleColon,
    #[token("?=")]
    PositiveLookahead,
    #[token("?!")]
    NegativeLookahead,

    // Punctuation
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("|")]
    Pipe,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,
    #[token(",")]
    Comma,
    #[token("=")]
    Equals,
    #[token("@")]
    At,
    #[token("^")]
    Caret,
}

/// Scan up to the closing `*/`. The first `*/` closes the comment, so runs of `*`
/// before the slash are part of the comment body.
fn block_comment(lex: &mut Lexer<Token>) -> Result<String, LexErrorKind> {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(lex.slice().to_string())
        }
        None => {
            lex.bump(remainder.len());
            Err(LexErrorKind::UnterminatedBlockComment)
        }
    }
}

/// Scan a literal opened by `delimiter` up to its unescaped closing twin.
/// A backslash escapes whatever character follows it, including the delimiter.
fn delimited(
    lex: &mut Lexer<Token>,
    delimiter: char,
    unterminated: LexErrorKind,
) -> Result<String, LexErrorKind> {
    let remainder = lex.remainder();
    let mut escaped = false;
    for (offset, ch) in remainder.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == delimiter {
            lex.bump(offset + ch.len_utf8());
            return Ok(lex.slice().to_string());
        }
    }
    lex.bump(remainder.len());
    Err(unterminated)
}

/// Payload-free classification of a [Token]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    Whitespace,
    LineComment,
    BlockComment,
    Identifier,
    String,
    RawString,
    Regex,
    Start,
    Title,
    Comment,
    UserType,
    NtType,
    TType,
    GrammarType,
    LineCommentDirective,
    BlockCommentDirective,
    AutoNewlineOff,
    AutoWsOff,
    On,
    AllowUnmatched,
    Enter,
    Push,
    Pop,
    Scanner,
    PercentPercent,
    DoubleColon,
    PositiveLookahead,
    NegativeLookahead,
    Colon,
    Semicolon,
    Pipe,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    LessThan,
    GreaterThan,
    Comma,
    Equals,
    At,
    Caret,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Whitespace(_) => TokenKind::Whitespace,
            Token::LineComment(_) => TokenKind::LineComment,
            Token::BlockComment(_) => TokenKind::BlockComment,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::String(_) => TokenKind::String,
            Token::RawString(_) => TokenKind::RawString,
            Token::Regex(_) => TokenKind::Regex,
            Token::Start => TokenKind::Start,
            Token::Title => TokenKind::Title,
            Token::Comment => TokenKind::Comment,
            Token::UserType => TokenKind::UserType,
            Token::NtType => TokenKind::NtType,
            Token::TType => TokenKind::TType,
            Token::GrammarType => TokenKind::GrammarType,
            Token::LineCommentDirective => TokenKind::LineCommentDirective,
            Token::BlockCommentDirective => TokenKind::BlockCommentDirective,
            Token::AutoNewlineOff => TokenKind::AutoNewlineOff,
            Token::AutoWsOff => TokenKind::AutoWsOff,
            Token::On => TokenKind::On,
            Token::AllowUnmatched => TokenKind::AllowUnmatched,
            Token::Enter => TokenKind::Enter,
            Token::Push => TokenKind::Push,
            Token::Pop => TokenKind::Pop,
            Token::Scanner => TokenKind::Scanner,
            Token::PercentPercent => TokenKind::PercentPercent,
            Token::DoubleColon => TokenKind::DoubleColon,
            Token::PositiveLookahead => TokenKind::PositiveLookahead,
            Token::NegativeLookahead => TokenKind::NegativeLookahead,
            Token::Colon => TokenKind::Colon,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Pipe => TokenKind::Pipe,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::LBracket => TokenKind::LBracket,
            Token::RBracket => TokenKind::RBracket,
            Token::LBrace => TokenKind::LBrace,
            Token::RBrace => TokenKind::RBrace,
            Token::LessThan => TokenKind::LessThan,
            Token::GreaterThan => TokenKind::GreaterThan,
            Token::Comma => TokenKind::Comma,
            Token::Equals => TokenKind::Equals,
            Token::At => TokenKind::At,
            Token::Caret => TokenKind::Caret,
        }
    }

    /// Check if this token is skipped by the parser
    pub fn is_trivia(&self) -> bool {
        self.kind().is_trivia()
    }
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Check if this kind starts a token literal (string, raw string or regex)
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::String | TokenKind::RawString | TokenKind::Regex
        )
    }

    /// Check if this kind is a `%`-prefixed keyword
    pub fn is_directive(&self) -> bool {
        matches!(
            self,
            TokenKind::Start
                | TokenKind::Title
                | TokenKind::Comment
                | TokenKind::UserType
                | TokenKind::NtType
                | TokenKind::TType
                | TokenKind::GrammarType
                | TokenKind::LineCommentDirective
                | TokenKind::BlockCommentDirective
                | TokenKind::AutoNewlineOff
                | TokenKind::AutoWsOff
                | TokenKind::On
                | TokenKind::AllowUnmatched
                | TokenKind::Enter
                | TokenKind::Push
                | TokenKind::Pop
                | TokenKind::Scanner
                | TokenKind::PercentPercent
        )
    }

    /// Human readable description used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineComment => "line comment",
            TokenKind::BlockComment => "block comment",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string literal",
            TokenKind::RawString => "raw string literal",
            TokenKind::Regex => "regex literal",
            TokenKind::Start => "`%start`",
            TokenKind::Title => "`%title`",
            TokenKind::Comment => "`%comment`",
            TokenKind::UserType => "`%user_type`",
            TokenKind::NtType => "`%nt_type`",
            TokenKind::TType => "`%t_type`",
            TokenKind::GrammarType => "`%grammar_type`",
            TokenKind::LineCommentDirective => "`%line_comment`",
            TokenKind::BlockCommentDirective => "`%block_comment`",
            TokenKind::AutoNewlineOff => "`%auto_newline_off`",
            TokenKind::AutoWsOff => "`%auto_ws_off`",
            TokenKind::On => "`%on`",
            TokenKind::AllowUnmatched => "`%allow_unmatched`",
            TokenKind::Enter => "`%enter`",
            TokenKind::Push => "`%push`",
            TokenKind::Pop => "`%pop`",
            TokenKind::Scanner => "`%scanner`",
            TokenKind::PercentPercent => "`%%`",
            TokenKind::DoubleColon => "`::`",
            TokenKind::PositiveLookahead => "`?=`",
            TokenKind::NegativeLookahead => "`?!`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Pipe => "`|`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LessThan => "`<`",
            TokenKind::GreaterThan => "`>`",
            TokenKind::Comma => "`,`",
            TokenKind::Equals => "`=`",
            TokenKind::At => "`@`",
            TokenKind::Caret => "`^`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Result<TokenKind, LexErrorKind>> {
        Token::lexer(source).map(|r| r.map(|t| t.kind())).collect()
    }

    #[test]
    fn test_double_colon_before_colon() {
        let mut lexer = Token::lexer("A::B:C");
        assert_eq!(lexer.next(), Some(Ok(Token::Identifier("A".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::DoubleColon)));
        assert_eq!(lexer.next(), Some(Ok(Token::Identifier("B".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::Colon)));
        assert_eq!(lexer.next(), Some(Ok(Token::Identifier("C".to_string()))));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_percent_percent_is_not_a_directive() {
        assert_eq!(
            kinds("%% %pop %push"),
            vec![
                Ok(TokenKind::PercentPercent),
                Ok(TokenKind::Whitespace),
                Ok(TokenKind::Pop),
                Ok(TokenKind::Whitespace),
                Ok(TokenKind::Push),
            ]
        );
    }

    #[test]
    fn test_lookahead_operators() {
        assert_eq!(
            kinds("?=?!"),
            vec![
                Ok(TokenKind::PositiveLookahead),
                Ok(TokenKind::NegativeLookahead)
            ]
        );
    }

    #[test]
    fn test_lone_question_mark_is_rejected() {
        assert_eq!(kinds("?"), vec![Err(LexErrorKind::UnexpectedCharacter)]);
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let mut lexer = Token::lexer(r#""a\"b" x"#);
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::String(r#""a\"b""#.to_string())))
        );
        assert_eq!(lexer.span(), 0..6);
    }

    #[test]
    fn test_raw_string_and_regex() {
        let mut lexer = Token::lexer(r"'\d' /[a-z]\/+/");
        assert_eq!(lexer.next(), Some(Ok(Token::RawString(r"'\d'".to_string()))));
        assert_eq!(lexer.next(), Some(Ok(Token::Whitespace(" ".to_string()))));
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::Regex(r"/[a-z]\/+/".to_string())))
        );
    }

    #[test]
    fn test_unterminated_literals() {
        assert_eq!(kinds("\"abc"), vec![Err(LexErrorKind::UnterminatedString)]);
        assert_eq!(kinds("'abc"), vec![Err(LexErrorKind::UnterminatedRawString)]);
        assert_eq!(kinds("/abc"), vec![Err(LexErrorKind::UnterminatedRegex)]);
        assert_eq!(
            kinds("/* abc *"),
            vec![Err(LexErrorKind::UnterminatedBlockComment)]
        );
    }

    #[test]
    fn test_block_comment_with_star_runs() {
        let mut lexer = Token::lexer("/** a * b **/x");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::BlockComment("/** a * b **/".to_string())))
        );
        assert_eq!(lexer.next(), Some(Ok(Token::Identifier("x".to_string()))));
    }

    #[test]
    fn test_block_comment_stops_at_first_close() {
        let mut lexer = Token::lexer("/* a */ b */");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token::BlockComment("/* a */".to_string())))
        );
    }

    #[test]
    fn test_line_comment_runs_to_end_of_line() {
        assert_eq!(
            kinds("// hello\nx"),
            vec![
                Ok(TokenKind::LineComment),
                Ok(TokenKind::Whitespace),
                Ok(TokenKind::Identifier)
            ]
        );
    }

    #[test]
    fn test_kind_predicates() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(!TokenKind::Identifier.is_trivia());
        assert!(TokenKind::Regex.is_literal());
        assert!(!TokenKind::Identifier.is_literal());
        assert!(TokenKind::PercentPercent.is_directive());
        assert!(!TokenKind::Colon.is_directive());
    }
}
