use std::{rc::Rc, vec::IntoIter};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{ast::ast::Literal, Position};

use super::tokens::{Keyword, Token, RESERVED_LOOKUP};

lazy_static! {
    static ref INTEGER_RE: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref DOUBLE_PREFIX_RE: Regex = Regex::new(r"^[0-9]*(\.[0-9]*)?").unwrap();
}

/// Lexer over an in-memory string.
pub type StrLexer = Lexer<IntoIter<char>>;

/// Pull-based lexer holding exactly one character of lookahead.
pub struct Lexer<I: Iterator<Item = char>> {
    chars: I,
    /// The lookahead character; `None` once the input is exhausted.
    last_char: Option<char>,
    line: u32,
    column: u32,
    token_start: Position,
    source: Rc<String>,
}

impl StrLexer {
    pub fn from_source(source: &str, file: Option<String>) -> StrLexer {
        Lexer::new(source.chars().collect::<Vec<char>>().into_iter(), file)
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn new(chars: I, file: Option<String>) -> Lexer<I> {
        let source = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<stdin>"))
        };

        Lexer {
            chars,
            // Primed with a blank so the first call reads the first real character.
            last_char: Some(' '),
            line: 1,
            column: 0,
            token_start: Position::new(1, 1, Rc::clone(&source)),
            source,
        }
    }

    /// Position of the first character of the most recently returned token.
    pub fn token_start(&self) -> &Position {
        &self.token_start
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.source))
    }

    fn advance(&mut self) {
        if self.last_char == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.last_char = self.chars.next();
    }

    /// Returns the next token. Once the input is exhausted every call yields `Token::EOF`.
    pub fn next_token(&mut self) -> Token {
        loop {
            while matches!(self.last_char, Some(c) if c.is_whitespace()) {
                self.advance();
            }

            self.token_start = Self::position(self);

            let c = match self.last_char {
                Some(c) => c,
                None => return Token::EOF,
            };

            let token = if c.is_ascii_alphabetic() {
                self.lex_word()
            } else if c == 'λ' {
                self.advance();
                Token::Keyword(Keyword::Func)
            } else if c.is_ascii_digit() || c == '.' {
                self.lex_number()
            } else if c == '"' {
                self.lex_string()
            } else if c == '#' {
                self.skip_comment();
                continue;
            } else {
                self.advance();
                Token::Char(c)
            };

            debug!("lexed {:?} at {}", token, self.token_start);
            return token;
        }
    }

    fn lex_word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(c) = self.last_char.filter(|c| c.is_ascii_alphanumeric()) {
            word.push(c);
            self.advance();
        }

        match RESERVED_LOOKUP.get(word.as_str()) {
            Some(token) => token.clone(),
            None => Token::Identifier(word),
        }
    }

    fn lex_number(&mut self) -> Token {
        let mut text = String::new();
        while let Some(c) = self.last_char.filter(|c| c.is_ascii_digit() || *c == '.') {
            text.push(c);
            self.advance();
        }

        Token::Literal(classify_number(&text))
    }

    fn lex_string(&mut self) -> Token {
        // Opening quote.
        self.advance();

        let mut result = String::new();
        while let Some(c) = self.last_char {
            self.advance();
            match c {
                '"' => break,
                '\\' => match self.last_char {
                    Some(escaped) => {
                        self.advance();
                        match escaped {
                            'n' => result.push('\n'),
                            't' => result.push('\t'),
                            'r' => result.push('\r'),
                            '\\' => result.push('\\'),
                            '"' => result.push('"'),
                            '0' => result.push('\0'),
                            other => {
                                // Keep the backslash
                                result.push('\\');
                                result.push(other);
                            }
                        }
                    }
                    None => result.push('\\'),
                },
                c => result.push(c),
            }
        }

        Token::Literal(Literal::String(result))
    }

    fn skip_comment(&mut self) {
        while !matches!(self.last_char, None | Some('\n') | Some('\r')) {
            self.advance();
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Lexer<I> {
    type Item = Token;

    /// Yields tokens up to, but not including, `Token::EOF`.
    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::EOF => None,
            token => Some(token),
        }
    }
}

/// Turns accumulated digit-or-dot text into a literal.
///
/// Plain digit runs that fit an `i64` are integers. Anything else is read like
/// `strtod` would: the longest `digits[.digits]` prefix, with `0.0` when that
/// prefix holds no digit at all.
pub fn classify_number(text: &str) -> Literal {
    if INTEGER_RE.is_match(text) {
        if let Ok(value) = text.parse::<i64>() {
            return Literal::Integer(value);
        }
    }

    let prefix = DOUBLE_PREFIX_RE
        .find(text)
        .map(|m| m.as_str())
        .unwrap_or_default();

    Literal::Double(prefix.parse::<f64>().unwrap_or(0.0))
}

/// Collects every token of `source`, excluding the final EOF.
pub fn tokenize(source: &str, file: Option<String>) -> Vec<Token> {
    StrLexer::from_source(source, file).collect()
}
