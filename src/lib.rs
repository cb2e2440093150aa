#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod backend;
pub mod compiler;
pub mod driver;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod session;

extern crate regex;

/// A location in the source stream: 1-based line and column plus the name of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub source: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, source: Rc<String>) -> Self {
        Position {
            line,
            column,
            source,
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.source, self.line, self.column)
    }
}

/// Renders an error the way the REPL shows it:
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `)`, expected an expression)
/// -> <stdin>:3:7
/// ```
pub fn format_error(error: &Error) -> String {
    let header = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}", error.get_error_name())
    } else {
        format!("Error: {} ({})", error.get_error_name(), error.get_tip())
    };

    format!("{}\n-> {}", header, error.get_position())
}

pub fn display_error(error: &Error) {
    eprintln!("{}", format_error(error));
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        format_error, Position,
    };

    #[test]
    fn test_position_display() {
        let position = Position::new(4, 12, Rc::new(String::from("test.meow")));
        assert_eq!(position.to_string(), "test.meow:4:12");
    }

    #[test]
    fn test_format_error() {
        let error = Error::new(
            ErrorImpl::UnknownVariable {
                variable: String::from("x"),
            },
            Position::new(1, 5, Rc::new(String::from("<stdin>"))),
        );

        assert_eq!(
            format_error(&error),
            "Error: UnknownVariable (Variable `x` is not a parameter of the enclosing function)\n-> <stdin>:1:5"
        );
    }
}
