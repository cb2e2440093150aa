//! Parser state: the lexer and the single lookahead token.
//!
//! The parser only ever holds one token. Every parse function reads the
//! current token, consumes what it recognises through [`Parser::advance`]
//! and leaves the lookahead on the first token it did not use.

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{Lexer, StrLexer},
        tokens::{Keyword, Token},
    },
    Position,
};

/// Default bound on how deeply one expression may nest.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
pub struct Parser<I: Iterator<Item = char>> {
    /// Source of further tokens
    lexer: Lexer<I>,
    /// The lookahead token
    current: Token,
    /// Where the lookahead token starts
    position: Position,
    /// Nesting of the expression being parsed
    depth: usize,
    max_depth: usize,
}

impl Parser<std::vec::IntoIter<char>> {
    /// Parser over an in-memory string.
    pub fn from_source(source: &str, file: Option<String>) -> Self {
        Parser::new(StrLexer::from_source(source, file))
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Creates a new Parser and reads the first token.
    ///
    /// Priming blocks until the underlying stream produces a token, which for
    /// an interactive stream means until the first line has been entered.
    pub fn new(mut lexer: Lexer<I>) -> Self {
        let current = lexer.next_token();
        let position = lexer.token_start().clone();

        Parser {
            lexer,
            current,
            position,
            depth: 0,
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Goes one level deeper, failing once the nesting limit is reached.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: self.max_depth,
                },
                self.get_position(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Returns to a depth saved with [`Parser::depth`].
    pub fn restore_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        self.position = self.lexer.token_start().clone();
        std::mem::replace(&mut self.current, next)
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.position.clone()
    }

    pub fn at_eof(&self) -> bool {
        self.current == Token::EOF
    }

    /// Builds an error saying `expected` was wanted instead of the current token.
    pub fn expected(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from(expected),
                token: self.current.describe(),
            },
            self.get_position(),
        )
    }

    /// Consumes the structural character `c`, or fails without consuming anything.
    pub fn expect_char(&mut self, c: char) -> Result<(), Error> {
        if self.current.is_char(c) {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", c)))
        }
    }

    /// Consumes `keyword`, or fails without consuming anything.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), Error> {
        if self.current.is_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", keyword)))
        }
    }

    /// Consumes an identifier and returns its name.
    pub fn expect_identifier(&mut self, expected: &str) -> Result<String, Error> {
        if let Token::Identifier(name) = &self.current {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.expected(expected))
        }
    }
}
