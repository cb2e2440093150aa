use log::debug;

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Keyword, Token},
};

use super::{lookups::OperatorTable, parser::Parser};

/// expression ::= primary (operator primary)*
///
/// Every nested expression and every binary node counts against the nesting
/// limit of the parser, so the depth of the returned tree stays below it.
pub fn parse_expr<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    operators: &OperatorTable,
) -> Result<Expr, Error> {
    let depth = parser.depth();
    let result = parser.enter().and_then(|_| {
        let lhs = parse_primary_expr(parser, operators)?;
        parse_binary_rhs(parser, operators, 0, lhs)
    });
    parser.restore_depth(depth);

    result
}

/// Precedence climbing over the operators that follow `lhs`.
///
/// Only operators binding at least as tightly as `min_precedence` are taken.
/// When the operator after the right-hand side binds tighter than the current
/// one, that right-hand side is climbed first with a raised threshold; equal
/// precedence associates to the left.
pub fn parse_binary_rhs<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    operators: &OperatorTable,
    min_precedence: i32,
    mut lhs: Expr,
) -> Result<Expr, Error> {
    loop {
        let (operator, precedence) = match operators.binary_operator(parser.current_token()) {
            Some((operator, precedence)) if precedence >= min_precedence => (operator, precedence),
            _ => return Ok(lhs),
        };
        parser.enter()?;
        parser.advance();

        let mut rhs = parse_primary_expr(parser, operators)?;

        if let Some((_, next_precedence)) = operators.binary_operator(parser.current_token()) {
            if precedence < next_precedence {
                rhs = parse_binary_rhs(parser, operators, precedence + 1, rhs)?;
            }
        }

        lhs = Expr::binary(operator, lhs, rhs);
    }
}

/// Whether `token` can begin a primary expression.
pub fn starts_primary(token: &Token) -> bool {
    matches!(
        token,
        Token::Identifier(_)
            | Token::Literal(_)
            | Token::Char('(')
            | Token::Char('{')
            | Token::Keyword(Keyword::If)
    )
}

pub fn parse_primary_expr<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    operators: &OperatorTable,
) -> Result<Expr, Error> {
    match parser.current_token() {
        Token::Identifier(_) => parse_identifier_expr(parser, operators),
        Token::Literal(_) => match parser.advance() {
            Token::Literal(literal) => Ok(Expr::Literal(literal)),
            token => Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: token.describe(),
                },
                parser.get_position(),
            )),
        },
        Token::Char('(') => parse_grouping_expr(parser, operators, ')'),
        Token::Char('{') => parse_grouping_expr(parser, operators, '}'),
        Token::Keyword(Keyword::If) => parse_if_expr(parser, operators),
        token => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.describe(),
            },
            parser.get_position(),
        )),
    }
}

/// identifierexpr ::= identifier | identifier '(' (expression (','? expression)*)? ')'
pub fn parse_identifier_expr<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    operators: &OperatorTable,
) -> Result<Expr, Error> {
    let name = parser.expect_identifier("an identifier")?;

    if !parser.current_token().is_char('(') {
        return Ok(Expr::Variable(name));
    }
    parser.advance();

    let mut arguments = vec![];
    if !parser.current_token().is_char(')') {
        loop {
            arguments.push(parse_expr(parser, operators)?);

            if parser.current_token().is_char(')') {
                break;
            }

            if parser.current_token().is_char(',') {
                parser.advance();
            } else if !starts_primary(parser.current_token()) {
                return Err(parser.expected("')' or ',' in argument list"));
            }
        }
    }
    parser.advance();

    debug!("parsed call to {} with {} arguments", name, arguments.len());
    Ok(Expr::Call {
        callee: name,
        arguments,
    })
}

/// parenexpr ::= '(' expression ')'
/// braceexpr ::= '{' expression '}'
pub fn parse_grouping_expr<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    operators: &OperatorTable,
    close: char,
) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, operators)?;
    parser.expect_char(close)?;

    Ok(expr)
}

/// ifexpr ::= 'if' expression 'then' expression 'else' expression
pub fn parse_if_expr<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    operators: &OperatorTable,
) -> Result<Expr, Error> {
    parser.expect_keyword(Keyword::If)?;
    let condition = parse_expr(parser, operators)?;

    parser.expect_keyword(Keyword::Then)?;
    let then_branch = parse_expr(parser, operators)?;

    parser.expect_keyword(Keyword::Else)?;
    let else_branch = parse_expr(parser, operators)?;

    Ok(Expr::conditional(condition, then_branch, else_branch))
}
