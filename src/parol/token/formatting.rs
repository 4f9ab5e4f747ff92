//! Detokenizer for the parol grammar language
//!
//! This module provides functionality to convert a stream of tokens back into a string.
//!
//! Unlike the formatters in [formats](crate::parol::formats), which work on a parsed
//! grammar, the detokenizer works at the token level. Since trivia tokens carry their
//! text, detokenizing the raw stream of [tokenize](crate::parol::lexing::tokenize)
//! reproduces the source byte for byte. This is useful for:
//!
//! - Round-trip testing (source -> tokens -> source)
//! - Debugging and visualization of token streams

use super::core::Token;

/// Trait for converting a token to its string representation
pub trait ToParString {
    fn to_par_string(&self) -> String;
}

impl ToParString for Token {
    fn to_par_string(&self) -> String {
        match self {
            Token::Whitespace(s)
            | Token::LineComment(s)
            | Token::BlockComment(s)
            | Token::Identifier(s)
            | Token::String(s)
            | Token::RawString(s)
            | Token::Regex(s) => s.clone(),
            Token::Start => "%start".to_string(),
            Token::Title => "%title".to_string(),
            Token::Comment => "%comment".to_string(),
            Token::UserType => "%user_type".to_string(),
            Token::NtType => "%nt_type".to_string(),
            Token::TType => "%t_type".to_string(),
            Token::GrammarType => "%grammar_type".to_string(),
            Token::LineCommentDirective => "%line_comment".to_string(),
            Token::BlockCommentDirective => "%block_comment".to_string(),
            Token::AutoNewlineOff => "%auto_newline_off".to_string(),
            Token::AutoWsOff => "%auto_ws_off".to_string(),
            Token::On => "%on".to_string(),
            Token::AllowUnmatched => "%allow_unmatched".to_string(),
            Token::Enter => "%enter".to_string(),
            Token::Push => "%push".to_string(),
            Token::Pop => "%pop".to_string(),
            Token::Scanner => "%scanner".to_string(),
            Token::PercentPercent => "%%".to_string(),
            Token::DoubleColon => "::".to_string(),
            Token::PositiveLookahead => "?=".to_string(),
            Token::NegativeLookahead => "?!".to_string(),
            Token::Colon => ":".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Pipe => "|".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBracket => "[".to_string(),
            Token::RBracket => "]".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::LessThan => "<".to_string(),
            Token::GreaterThan => ">".to_string(),
            Token::Comma => ",".to_string(),
            Token::Equals => "=".to_string(),
            Token::At => "@".to_string(),
            Token::Caret => "^".to_string(),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_par_string())
    }
}

/// Detokenize a stream of tokens into a string
///
/// Tokens are concatenated as they are. Feeding the trivia-free parser stream loses the
/// original spacing; feeding the raw stream gives back the exact source.
///
/// # Examples
///
/// ```ignore
/// use parol_grammar::parol::lexing::tokenize;
/// use parol_grammar::parol::token::detokenize;
///
/// let source = "%start s %% s: \"a\";";
/// let tokens: Vec<_> = tokenize(source).unwrap().into_iter().map(|(t, _)| t).collect();
/// assert_eq!(detokenize(&tokens), source);
/// ```
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.to_par_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detokenize_keeps_trivia() {
        let tokens = vec![
            Token::Start,
            Token::Whitespace(" ".to_string()),
            Token::Identifier("s".to_string()),
            Token::Whitespace("\n".to_string()),
            Token::LineComment("// done".to_string()),
        ];
        assert_eq!(detokenize(&tokens), "%start s\n// done");
    }

    #[test]
    fn test_display_matches_lexeme() {
        assert_eq!(Token::NegativeLookahead.to_string(), "?!");
        assert_eq!(Token::Regex("/a+/".to_string()).to_string(), "/a+/");
    }
}
