//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Primary expressions and calls
//! - Precedence climbing with default and custom operator tables
//! - Prototypes, definitions and extern declarations
//! - Error positions and lookahead after failures

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{
    decl::{parse_definition, parse_extern, parse_prototype, parse_top_level_expr},
    expr::parse_expr,
    lookups::OperatorTable,
    parser::{Parser, DEFAULT_MAX_NESTING_DEPTH},
};
use crate::{
    ast::ast::{Expr, Literal, Prototype, ANONYMOUS_FUNCTION_NAME},
    errors::errors::ErrorImpl,
    lexer::tokens::Token,
};

fn parse(source: &str) -> Expr {
    let mut parser = Parser::from_source(source, None);
    parse_expr(&mut parser, &OperatorTable::default()).unwrap()
}

fn var(name: &str) -> Expr {
    Expr::variable(name)
}

#[test]
fn test_parse_literals() {
    assert_eq!(parse("42"), Expr::integer(42));
    assert_eq!(parse("4.5"), Expr::double(4.5));
    assert_eq!(parse("true"), Expr::Literal(Literal::Boolean(true)));
    assert_eq!(
        parse("\"meow\""),
        Expr::Literal(Literal::String("meow".to_string()))
    );
}

#[test]
fn test_parse_precedence() {
    assert_eq!(
        parse("1 + 2 * 3"),
        Expr::binary(
            '+',
            Expr::integer(1),
            Expr::binary('*', Expr::integer(2), Expr::integer(3))
        )
    );
}

#[test]
fn test_parse_left_associative() {
    assert_eq!(
        parse("a - b - c"),
        Expr::binary('-', Expr::binary('-', var("a"), var("b")), var("c"))
    );
}

#[test]
fn test_parse_mixed_precedence_chain() {
    // '<' 10, '+' 20, '*' 40, '/' 50
    assert_eq!(
        parse("a < b + c * d / e - f").to_string(),
        "<(a, -(+(b, *(c, /(d, e))), f))"
    );
}

#[test]
fn test_parse_grouping() {
    assert_eq!(
        parse("(1 + 2) * 3"),
        Expr::binary(
            '*',
            Expr::binary('+', Expr::integer(1), Expr::integer(2)),
            Expr::integer(3)
        )
    );
    assert_eq!(parse("{x}"), var("x"));
}

#[test]
fn test_parse_call_arguments() {
    let expected = Expr::call(
        "add",
        vec![Expr::integer(2), Expr::binary('*', var("x"), Expr::integer(3))],
    );

    assert_eq!(parse("add(2, x * 3)"), expected);
    assert_eq!(parse("add(2 x * 3)"), expected);
    assert_eq!(parse("nothing()"), Expr::call("nothing", vec![]));
}

#[test]
fn test_parse_nested_calls() {
    assert_eq!(
        parse("f(g(1), h())").to_string(),
        "f(g(1), h())"
    );
}

#[test]
fn test_parse_conditional() {
    assert_eq!(
        parse("if n < 2 then n else fib(n - 1) + fib(n - 2)").to_string(),
        "if(<(n, 2), n, +(fib(-(n, 1)), fib(-(n, 2))))"
    );
}

#[test]
fn test_expression_stops_at_unknown_operator() {
    let mut parser = Parser::from_source("a ^ b", None);
    let expr = parse_expr(&mut parser, &OperatorTable::default()).unwrap();

    assert_eq!(expr, var("a"));
    assert_eq!(parser.current_token(), &Token::Char('^'));
}

#[test]
fn test_custom_operator() {
    let mut operators = OperatorTable::default();
    operators.set('^', 60);

    let mut parser = Parser::from_source("a * b ^ c", None);
    let expr = parse_expr(&mut parser, &operators).unwrap();

    assert_eq!(expr.to_string(), "*(a, ^(b, c))");
}

#[test]
fn test_non_positive_precedence_is_not_an_operator() {
    let mut operators = OperatorTable::default();
    operators.set('+', 0);
    operators.set('-', -5);

    assert_eq!(operators.get('+'), None);
    assert_eq!(operators.binary_operator(&Token::Char('-')), None);

    let mut parser = Parser::from_source("a + b", None);
    assert_eq!(parse_expr(&mut parser, &operators).unwrap(), var("a"));
}

#[test]
fn test_parse_prototype() {
    let mut parser = Parser::from_source("add(a b)", None);
    let proto = parse_prototype(&mut parser).unwrap();

    assert_eq!(
        proto,
        Prototype::new("add", vec!["a".to_string(), "b".to_string()])
    );
    assert!(parser.at_eof());
}

#[test]
fn test_prototype_rejects_commas() {
    let mut parser = Parser::from_source("add(a, b)", None);
    let error = parse_prototype(&mut parser).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::ExpectedToken {
            expected: "')' in prototype".to_string(),
            token: ",".to_string()
        }
    );
}

#[test]
fn test_parse_definition() {
    let mut parser = Parser::from_source("func add(a b) a + b", None);
    let function = parse_definition(&mut parser, &OperatorTable::default()).unwrap();

    assert_eq!(function.name(), "add");
    assert_eq!(function.prototype.params, vec!["a", "b"]);
    assert_eq!(function.body, Expr::binary('+', var("a"), var("b")));
}

#[test]
fn test_parse_extern() {
    let mut parser = Parser::from_source("extern sin(x); 1", None);
    let proto = parse_extern(&mut parser).unwrap();

    assert_eq!(proto, Prototype::new("sin", vec!["x".to_string()]));
    assert_eq!(parser.current_token(), &Token::Char(';'));
}

#[test]
fn test_parse_top_level_expr() {
    let mut parser = Parser::from_source("1 + 2", None);
    let function = parse_top_level_expr(&mut parser, &OperatorTable::default()).unwrap();

    assert_eq!(function.name(), ANONYMOUS_FUNCTION_NAME);
    assert!(function.prototype.params.is_empty());
}

#[test]
fn test_unterminated_prototype() {
    let mut parser = Parser::from_source("func f(", None);
    let error = parse_definition(&mut parser, &OperatorTable::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "ExpectedToken");
    assert!(parser.at_eof());
}

#[test]
fn test_missing_close_paren() {
    let mut parser = Parser::from_source("(1 + 2", None);
    let error = parse_expr(&mut parser, &OperatorTable::default()).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::ExpectedToken {
            expected: "')'".to_string(),
            token: "EOF".to_string()
        }
    );
}

#[test]
fn test_malformed_argument_list() {
    let mut parser = Parser::from_source("f(1; 2)", None);
    let error = parse_expr(&mut parser, &OperatorTable::default()).unwrap_err();

    assert_eq!(error.get_error_name(), "ExpectedToken");
    assert_eq!(parser.current_token(), &Token::Char(';'));
}

#[test]
fn test_unexpected_token_position() {
    let mut parser = Parser::from_source("1 +\n  )", None);
    let error = parse_expr(&mut parser, &OperatorTable::default()).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnexpectedToken {
            token: ")".to_string()
        }
    );
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 3);
}

#[test]
fn test_if_requires_then() {
    let mut parser = Parser::from_source("if x else y", None);
    let error = parse_expr(&mut parser, &OperatorTable::default()).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::ExpectedToken {
            expected: "'then'".to_string(),
            token: "else".to_string()
        }
    );
}

#[test]
fn test_nesting_limit() {
    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let mut parser = Parser::from_source(&source, None);
    let error = parse_expr(&mut parser, &OperatorTable::default()).unwrap_err();

    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::NestingTooDeep {
            limit: DEFAULT_MAX_NESTING_DEPTH
        }
    );
}

#[test]
fn test_nesting_limit_counts_operator_chains() {
    let mut parser = Parser::from_source("1 + 1 + 1 + 1", None);
    parser.set_max_depth(3);
    let error = parse_expr(&mut parser, &OperatorTable::default()).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");

    let mut parser = Parser::from_source("((1 + 1) + 1)", None);
    parser.set_max_depth(4);
    assert!(parse_expr(&mut parser, &OperatorTable::default()).is_ok());
    assert_eq!(parser.depth(), 0);
}

#[test]
fn test_depth_is_restored_after_failure() {
    let mut parser = Parser::from_source("(((x", None);
    assert!(parse_expr(&mut parser, &OperatorTable::default()).is_err());
    assert_eq!(parser.depth(), 0);
}

proptest! {
    #[test]
    fn precedence_decides_nesting(
        ops in prop::sample::subsequence(vec!['+', '-', '*', '/', '%', '<', '^', '&'], 2),
        p1 in 1i32..100,
        p2 in 1i32..100,
    ) {
        let (op1, op2) = (ops[0], ops[1]);
        let mut operators = OperatorTable::empty();
        operators.set(op1, p1);
        operators.set(op2, p2);

        let source = format!("a {} b {} c", op1, op2);
        let mut parser = Parser::from_source(&source, None);
        let expr = parse_expr(&mut parser, &operators).unwrap();

        let expected = if p1 < p2 {
            Expr::binary(op1, var("a"), Expr::binary(op2, var("b"), var("c")))
        } else {
            Expr::binary(op2, Expr::binary(op1, var("a"), var("b")), var("c"))
        };

        prop_assert_eq!(expr, expected);
        prop_assert!(parser.at_eof());
    }
}
