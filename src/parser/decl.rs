use log::debug;

use crate::{
    ast::ast::{Function, Prototype},
    errors::errors::Error,
    lexer::tokens::{Keyword, Token},
};

use super::{expr::parse_expr, lookups::OperatorTable, parser::Parser};

/// prototype ::= identifier '(' identifier* ')'
pub fn parse_prototype<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
) -> Result<Prototype, Error> {
    let name = parser.expect_identifier("function name in prototype")?;

    if !parser.current_token().is_char('(') {
        return Err(parser.expected("'(' in prototype"));
    }
    parser.advance();

    let mut params = vec![];
    while let Token::Identifier(param) = parser.current_token() {
        params.push(param.clone());
        parser.advance();
    }

    if !parser.current_token().is_char(')') {
        return Err(parser.expected("')' in prototype"));
    }
    parser.advance();

    Ok(Prototype { name, params })
}

/// definition ::= 'func' prototype expression
pub fn parse_definition<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    operators: &OperatorTable,
) -> Result<Function, Error> {
    parser.expect_keyword(Keyword::Func)?;
    let prototype = parse_prototype(parser)?;
    let body = parse_expr(parser, operators)?;

    debug!("parsed definition of {}", prototype);
    Ok(Function { prototype, body })
}

/// external ::= 'extern' prototype
pub fn parse_extern<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
) -> Result<Prototype, Error> {
    parser.expect_keyword(Keyword::Extern)?;
    let prototype = parse_prototype(parser)?;

    debug!("parsed extern {}", prototype);
    Ok(prototype)
}

/// toplevelexpr ::= expression
///
/// The expression is wrapped in a zero-parameter anonymous function.
pub fn parse_top_level_expr<I: Iterator<Item = char>>(
    parser: &mut Parser<I>,
    operators: &OperatorTable,
) -> Result<Function, Error> {
    let body = parse_expr(parser, operators)?;

    debug!("parsed top-level expression {}", body);
    Ok(Function::anonymous(body))
}
