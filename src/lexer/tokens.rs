use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::ast::ast::Literal;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Token> = {
        let mut map = HashMap::new();
        map.insert("func", Token::Keyword(Keyword::Func));
        map.insert("return", Token::Keyword(Keyword::Return));
        map.insert("extern", Token::Keyword(Keyword::Extern));
        map.insert("var", Token::Keyword(Keyword::Var));
        map.insert("let", Token::Keyword(Keyword::Let));
        map.insert("if", Token::Keyword(Keyword::If));
        map.insert("then", Token::Keyword(Keyword::Then));
        map.insert("else", Token::Keyword(Keyword::Else));
        map.insert("for", Token::Keyword(Keyword::For));
        map.insert("break", Token::Keyword(Keyword::Break));
        map.insert("double", Token::Keyword(Keyword::Double));
        map.insert("int", Token::Keyword(Keyword::Int));
        map.insert("string", Token::Keyword(Keyword::String));
        map.insert("bool", Token::Keyword(Keyword::Bool));
        map.insert("true", Token::Literal(Literal::Boolean(true)));
        map.insert("false", Token::Literal(Literal::Boolean(false)));
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Keyword {
    // Statements
    Func,
    Return,
    Extern,
    Var,
    Let,

    // Control flow
    If,
    Then,
    Else,
    For,
    Break,

    // Builtin types
    Double,
    Int,
    String,
    Bool,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Func => "func",
            Keyword::Return => "return",
            Keyword::Extern => "extern",
            Keyword::Var => "var",
            Keyword::Let => "let",
            Keyword::If => "if",
            Keyword::Then => "then",
            Keyword::Else => "else",
            Keyword::For => "for",
            Keyword::Break => "break",
            Keyword::Double => "double",
            Keyword::Int => "int",
            Keyword::String => "string",
            Keyword::Bool => "bool",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    EOF,
    Keyword(Keyword),
    Identifier(String),
    Literal(Literal),
    /// Any other character: structural symbols and operators.
    Char(char),
}

impl Token {
    pub fn is_char(&self, c: char) -> bool {
        *self == Token::Char(c)
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        *self == Token::Keyword(keyword)
    }

    /// Short human readable form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::EOF => String::from("EOF"),
            token => token.to_string(),
        }
    }
}

/// Writes the token back in source form; lexing the output yields the same token.
impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::EOF => Ok(()),
            Token::Keyword(keyword) => write!(f, "{}", keyword),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Literal(Literal::Double(value)) => {
                let text = value.to_string();
                if text.contains('.') {
                    write!(f, "{}", text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
            Token::Literal(Literal::Integer(value)) => write!(f, "{}", value),
            Token::Literal(Literal::Boolean(value)) => write!(f, "{}", value),
            Token::Literal(Literal::String(value)) => {
                write!(f, "\"")?;
                for c in value.chars() {
                    match c {
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '\r' => write!(f, "\\r")?,
                        '\\' => write!(f, "\\\\")?,
                        '"' => write!(f, "\\\"")?,
                        '\0' => write!(f, "\\0")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                write!(f, "\"")
            }
            Token::Char(c) => write!(f, "{}", c),
        }
    }
}
