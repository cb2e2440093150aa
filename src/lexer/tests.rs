//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers, doubles and malformed numbers)
//! - String literals with escape sequences
//! - Single-character tokens
//! - Comments and end-of-input behaviour
//! - Re-lexing printed tokens

use proptest::prelude::*;

use super::{
    lexer::{classify_number, tokenize, StrLexer},
    tokens::{Keyword, Token, RESERVED_LOOKUP},
};
use crate::ast::ast::Literal;

fn ident(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

#[test]
fn test_tokenize_keywords() {
    let tokens = tokenize(
        "func return extern var let if then else for break double int string bool",
        None,
    );

    assert_eq!(
        tokens,
        vec![
            Token::Keyword(Keyword::Func),
            Token::Keyword(Keyword::Return),
            Token::Keyword(Keyword::Extern),
            Token::Keyword(Keyword::Var),
            Token::Keyword(Keyword::Let),
            Token::Keyword(Keyword::If),
            Token::Keyword(Keyword::Then),
            Token::Keyword(Keyword::Else),
            Token::Keyword(Keyword::For),
            Token::Keyword(Keyword::Break),
            Token::Keyword(Keyword::Double),
            Token::Keyword(Keyword::Int),
            Token::Keyword(Keyword::String),
            Token::Keyword(Keyword::Bool),
        ]
    );
}

#[test]
fn test_lambda_is_func() {
    let tokens = tokenize("λ id(x) x", None);
    assert_eq!(tokens[0], Token::Keyword(Keyword::Func));
    assert_eq!(tokens[1], ident("id"));
}

#[test]
fn test_tokenize_booleans() {
    let tokens = tokenize("true false truth", None);
    assert_eq!(
        tokens,
        vec![
            Token::Literal(Literal::Boolean(true)),
            Token::Literal(Literal::Boolean(false)),
            ident("truth"),
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar2 CamelCase x", None);
    assert_eq!(
        tokens,
        vec![ident("foo"), ident("bar2"), ident("CamelCase"), ident("x")]
    );
}

#[test]
fn test_underscore_splits_identifiers() {
    let tokens = tokenize("anon_expr", None);
    assert_eq!(tokens, vec![ident("anon"), Token::Char('_'), ident("expr")]);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 .5 7.", None);
    assert_eq!(
        tokens,
        vec![
            Token::Literal(Literal::Integer(42)),
            Token::Literal(Literal::Double(3.14)),
            Token::Literal(Literal::Integer(0)),
            Token::Literal(Literal::Double(0.5)),
            Token::Literal(Literal::Double(7.0)),
        ]
    );
}

#[test]
fn test_malformed_numbers_pass_through() {
    assert_eq!(classify_number("1.2.3"), Literal::Double(1.2));
    assert_eq!(classify_number("."), Literal::Double(0.0));
    assert_eq!(classify_number("..5"), Literal::Double(0.0));
    assert_eq!(
        classify_number("99999999999999999999"),
        Literal::Double(99999999999999999999.0)
    );
}

#[test]
fn test_number_followed_by_identifier() {
    let tokens = tokenize("2x", None);
    assert_eq!(tokens, vec![Token::Literal(Literal::Integer(2)), ident("x")]);
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "two words""#, None);
    assert_eq!(
        tokens,
        vec![
            Token::Literal(Literal::String("hello".to_string())),
            Token::Literal(Literal::String("two words".to_string())),
        ]
    );
}

#[test]
fn test_tokenize_string_escapes() {
    let tokens = tokenize(r#""a\nb" "tab\there" "back\\" "quote\"d" "odd\q""#, None);
    assert_eq!(
        tokens,
        vec![
            Token::Literal(Literal::String("a\nb".to_string())),
            Token::Literal(Literal::String("tab\there".to_string())),
            Token::Literal(Literal::String("back\\".to_string())),
            Token::Literal(Literal::String("quote\"d".to_string())),
            Token::Literal(Literal::String("odd\\q".to_string())),
        ]
    );
}

#[test]
fn test_unterminated_string_runs_to_eof() {
    let tokens = tokenize("\"never closed", None);
    assert_eq!(
        tokens,
        vec![Token::Literal(Literal::String("never closed".to_string()))]
    );
}

#[test]
fn test_tokenize_single_characters() {
    let tokens = tokenize("( ) { } , ; + - * / % < × ÷ @", None);
    let expected: Vec<Token> = "(){},;+-*/%<×÷@".chars().map(Token::Char).collect();

    assert_eq!(tokens, expected);
}

#[test]
fn test_comments_produce_no_tokens() {
    let tokens = tokenize("a # this is ignored ( + \nb", None);
    assert_eq!(tokens, vec![ident("a"), ident("b")]);
}

#[test]
fn test_comment_at_end_of_input() {
    let mut lexer = StrLexer::from_source("1 # trailing", None);

    assert_eq!(lexer.next_token(), Token::Literal(Literal::Integer(1)));
    assert_eq!(lexer.next_token(), Token::EOF);
}

#[test]
fn test_carriage_return_ends_comment() {
    let tokens = tokenize("# comment\r\nx", None);
    assert_eq!(tokens, vec![ident("x")]);
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = StrLexer::from_source("x", None);

    assert_eq!(lexer.next_token(), ident("x"));
    assert_eq!(lexer.next_token(), Token::EOF);
    assert_eq!(lexer.next_token(), Token::EOF);
    assert_eq!(lexer.next_token(), Token::EOF);
}

#[test]
fn test_empty_input() {
    let mut lexer = StrLexer::from_source("  \n\t ", None);
    assert_eq!(lexer.next_token(), Token::EOF);
}

#[test]
fn test_token_positions() {
    let mut lexer = StrLexer::from_source("func f(x)\n  x + 1", Some("pos.meow".to_string()));

    lexer.next_token();
    assert_eq!((lexer.token_start().line, lexer.token_start().column), (1, 1));
    lexer.next_token();
    assert_eq!((lexer.token_start().line, lexer.token_start().column), (1, 6));

    // ( x )
    lexer.next_token();
    lexer.next_token();
    lexer.next_token();

    assert_eq!(lexer.next_token(), ident("x"));
    assert_eq!((lexer.token_start().line, lexer.token_start().column), (2, 3));
    assert_eq!(lexer.token_start().source.as_str(), "pos.meow");
}

#[test]
fn test_display_round_trip_examples() {
    let tokens = vec![
        Token::Keyword(Keyword::Extern),
        Token::Literal(Literal::Double(2.0)),
        Token::Literal(Literal::Integer(2)),
        Token::Literal(Literal::String("line\n\"quoted\"".to_string())),
        Token::Char('('),
    ];

    let text = tokens
        .iter()
        .map(|token| token.to_string())
        .collect::<Vec<String>>()
        .join(" ");

    assert_eq!(tokenize(&text, None), tokens);
}

fn arb_token() -> impl Strategy<Value = Token> {
    prop_oneof![
        prop::sample::select(vec![
            Keyword::Func,
            Keyword::Return,
            Keyword::Extern,
            Keyword::Var,
            Keyword::Let,
            Keyword::If,
            Keyword::Then,
            Keyword::Else,
            Keyword::For,
            Keyword::Break,
            Keyword::Double,
            Keyword::Int,
            Keyword::String,
            Keyword::Bool,
        ])
        .prop_map(Token::Keyword),
        "[a-zA-Z][a-zA-Z0-9]{0,8}"
            .prop_filter("reserved words lex as keywords", |name| {
                !RESERVED_LOOKUP.contains_key(name.as_str())
            })
            .prop_map(Token::Identifier),
        (0..i64::MAX).prop_map(|value| Token::Literal(Literal::Integer(value))),
        (0.0f64..1.0e12).prop_map(|value| Token::Literal(Literal::Double(value))),
        any::<bool>().prop_map(|value| Token::Literal(Literal::Boolean(value))),
        "[ -~\n\t]{0,12}".prop_map(|value| Token::Literal(Literal::String(value))),
        prop::sample::select("(){},;+-*/%<>=!&|^~?:[]@$".chars().collect::<Vec<char>>())
            .prop_map(Token::Char),
    ]
}

proptest! {
    #[test]
    fn relexing_printed_tokens_is_lossless(tokens in prop::collection::vec(arb_token(), 0..16)) {
        let text = tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<String>>()
            .join(" ");

        prop_assert_eq!(tokenize(&text, None), tokens);
    }

    #[test]
    fn comments_never_change_tokens(tokens in prop::collection::vec(arb_token(), 0..8), comment in "[ -~]{0,20}") {
        let text = tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<String>>()
            .join(" ");

        let commented = format!("{} #{}\n{} #{}", text, comment, text, comment);
        let mut expected = tokens.clone();
        expected.extend(tokens);

        prop_assert_eq!(tokenize(&commented, None), expected);
    }
}
