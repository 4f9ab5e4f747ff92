//! Base tokenization
//!
//! Raw tokenization using the logos lexer library. This is where source strings become
//! token streams; everything downstream operates on the stream produced here.

use super::common::{LexError, TokenStream};
use crate::parol::token::Token;
use logos::Logos;
use tracing::debug;

/// Tokenize source code with location information, trivia included
///
/// Stops at the first input logos rejects and reports it with its byte range.
pub fn tokenize(source: &str) -> Result<TokenStream, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(reason) => {
                let error = LexError::new(reason, lexer.span(), source);
                debug!(%error, "tokenization failed");
                return Err(error);
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parol::token::{detokenize, LexErrorKind};

    #[test]
    fn test_tokenizes() {
        let tokens = tokenize("foo: \"a\";").unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], (Token::Identifier("foo".to_string()), 0..3));
        assert_eq!(tokens[1], (Token::Colon, 3..4));
        assert_eq!(tokens[2], (Token::Whitespace(" ".to_string()), 4..5));
        assert_eq!(tokens[3], (Token::String("\"a\"".to_string()), 5..8));
        assert_eq!(tokens[4], (Token::Semicolon, 8..9));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn test_unterminated_regex_is_a_lex_error() {
        let error = tokenize("%start s %% s: /abc").unwrap_err();
        assert_eq!(error.reason, LexErrorKind::UnterminatedRegex);
        assert_eq!(error.range, 15..19);
        assert_eq!(error.lexeme, "/abc");
    }

    #[test]
    fn test_unexpected_character() {
        let error = tokenize("a # b").unwrap_err();
        assert_eq!(error.reason, LexErrorKind::UnexpectedCharacter);
        assert_eq!(error.range, 2..3);
    }

    #[test]
    fn test_spans_cover_source() {
        let source = "%start s\n/* c */\n%%\ns: 'x' | /y\\/z/ ; // end";
        let tokens = tokenize(source).unwrap();
        let mut next = 0;
        for (_, range) in &tokens {
            assert_eq!(range.start, next);
            next = range.end;
        }
        assert_eq!(next, source.len());
        let plain: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
        assert_eq!(detokenize(&plain), source);
    }
}
