//! Lexer tests over the public tokenization API

use parol_grammar::parol::lexing::{lex, tokenize};
use parol_grammar::parol::token::{detokenize, LexErrorKind, Token, TokenKind};
use rstest::rstest;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .expect("source to lex")
        .into_iter()
        .map(|(token, _)| token.kind())
        .collect()
}

#[rstest]
#[case("%start", TokenKind::Start)]
#[case("%title", TokenKind::Title)]
#[case("%comment", TokenKind::Comment)]
#[case("%user_type", TokenKind::UserType)]
#[case("%nt_type", TokenKind::NtType)]
#[case("%t_type", TokenKind::TType)]
#[case("%grammar_type", TokenKind::GrammarType)]
#[case("%line_comment", TokenKind::LineCommentDirective)]
#[case("%block_comment", TokenKind::BlockCommentDirective)]
#[case("%auto_newline_off", TokenKind::AutoNewlineOff)]
#[case("%auto_ws_off", TokenKind::AutoWsOff)]
#[case("%on", TokenKind::On)]
#[case("%allow_unmatched", TokenKind::AllowUnmatched)]
#[case("%enter", TokenKind::Enter)]
#[case("%push", TokenKind::Push)]
#[case("%pop", TokenKind::Pop)]
#[case("%scanner", TokenKind::Scanner)]
#[case("%%", TokenKind::PercentPercent)]
fn test_directive_keywords(#[case] source: &str, #[case] expected: TokenKind) {
    assert_eq!(kinds(source), vec![expected]);
}

#[rstest]
#[case(":", TokenKind::Colon)]
#[case("::", TokenKind::DoubleColon)]
#[case(";", TokenKind::Semicolon)]
#[case("|", TokenKind::Pipe)]
#[case("(", TokenKind::LParen)]
#[case(")", TokenKind::RParen)]
#[case("[", TokenKind::LBracket)]
#[case("]", TokenKind::RBracket)]
#[case("{", TokenKind::LBrace)]
#[case("}", TokenKind::RBrace)]
#[case("<", TokenKind::LessThan)]
#[case(">", TokenKind::GreaterThan)]
#[case(",", TokenKind::Comma)]
#[case("=", TokenKind::Equals)]
#[case("@", TokenKind::At)]
#[case("^", TokenKind::Caret)]
#[case("?=", TokenKind::PositiveLookahead)]
#[case("?!", TokenKind::NegativeLookahead)]
fn test_punctuation(#[case] source: &str, #[case] expected: TokenKind) {
    assert_eq!(kinds(source), vec![expected]);
}

#[rstest]
#[case(r#""a\"b""#, Token::String(r#""a\"b""#.to_string()))]
#[case(r"'it\'s'", Token::RawString(r"'it\'s'".to_string()))]
#[case(r"/a\/b/", Token::Regex(r"/a\/b/".to_string()))]
#[case(r#""""#, Token::String(r#""""#.to_string()))]
fn test_literals_keep_escapes(#[case] source: &str, #[case] expected: Token) {
    let tokens = lex(source).unwrap();
    assert_eq!(tokens, vec![(expected, 0..source.len())]);
}

#[rstest]
#[case("\"abc", LexErrorKind::UnterminatedString)]
#[case("'abc", LexErrorKind::UnterminatedRawString)]
#[case("/abc", LexErrorKind::UnterminatedRegex)]
#[case("/* abc *", LexErrorKind::UnterminatedBlockComment)]
#[case("\"abc\\\"", LexErrorKind::UnterminatedString)]
fn test_unterminated_literals(#[case] source: &str, #[case] reason: LexErrorKind) {
    let error = tokenize(source).unwrap_err();
    assert_eq!(error.reason, reason);
    assert_eq!(error.range, 0..source.len());
}

#[test]
fn test_unexpected_character() {
    let error = lex("%start s $").unwrap_err();
    assert_eq!(error.reason, LexErrorKind::UnexpectedCharacter);
    assert_eq!(error.range, 9..10);
    assert_eq!(error.lexeme, "$");
}

#[test]
fn test_unknown_directive_is_rejected() {
    assert!(lex("%foo").is_err());
}

#[test]
fn test_block_comment_with_star_runs() {
    let source = "a /** x * y **/ b";
    assert_eq!(kinds(source), vec![TokenKind::Identifier, TokenKind::Identifier]);

    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens[2].0, Token::BlockComment("/** x * y **/".to_string()));
}

#[test]
fn test_block_comment_ends_at_first_close() {
    assert_eq!(
        kinds("/* a */ b /* c */"),
        vec![TokenKind::Identifier]
    );
}

#[test]
fn test_line_comment_runs_to_end_of_line() {
    assert_eq!(
        kinds("a // b : ;\nc"),
        vec![TokenKind::Identifier, TokenKind::Identifier]
    );
}

#[test]
fn test_double_colon_is_greedy() {
    assert_eq!(
        kinds("a:::b"),
        vec![
            TokenKind::Identifier,
            TokenKind::DoubleColon,
            TokenKind::Colon,
            TokenKind::Identifier
        ]
    );
}

#[test]
fn test_identifiers_with_underscores_and_digits() {
    let tokens = lex("_a1 B_2").unwrap();
    assert_eq!(
        tokens,
        vec![
            (Token::Identifier("_a1".to_string()), 0..3),
            (Token::Identifier("B_2".to_string()), 4..7),
        ]
    );
}

#[test]
fn test_raw_stream_round_trips() {
    let source = "%start s // entry\n/* note */ %%\ns : \"a\" | 'b' /c/ ;\n";
    let tokens: Vec<Token> = tokenize(source)
        .unwrap()
        .into_iter()
        .map(|(token, _)| token)
        .collect();
    assert_eq!(detokenize(&tokens), source);
}

#[test]
fn test_raw_stream_covers_every_byte() {
    let source = "%start s\n%%\ns: a^ @m : T::U ;";
    let tokens = tokenize(source).unwrap();
    let mut cursor = 0;
    for (_, range) in &tokens {
        assert_eq!(range.start, cursor);
        cursor = range.end;
    }
    assert_eq!(cursor, source.len());
}
