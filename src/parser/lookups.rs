use std::collections::HashMap;

use crate::lexer::tokens::Token;

/// Precedences installed at session start. 1 is the loosest binding.
pub const DEFAULT_PRECEDENCE: [(char, i32); 8] = [
    ('<', 10),
    ('+', 20),
    ('-', 20),
    ('*', 40),
    ('×', 40),
    ('%', 40),
    ('/', 50),
    ('÷', 50),
];

/// Maps single-character operators to their binding precedence.
///
/// A character missing from the table, or mapped to a non-positive value, is
/// not an infix operator.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorTable {
    precedence: HashMap<char, i32>,
}

impl Default for OperatorTable {
    fn default() -> Self {
        let mut table = OperatorTable::empty();
        for (operator, precedence) in DEFAULT_PRECEDENCE {
            table.set(operator, precedence);
        }
        table
    }
}

impl OperatorTable {
    pub fn empty() -> Self {
        OperatorTable {
            precedence: HashMap::new(),
        }
    }

    pub fn set(&mut self, operator: char, precedence: i32) {
        self.precedence.insert(operator, precedence);
    }

    pub fn remove(&mut self, operator: char) -> Option<i32> {
        self.precedence.remove(&operator)
    }

    /// Precedence of `operator` if it is a valid infix operator.
    pub fn get(&self, operator: char) -> Option<i32> {
        self.precedence
            .get(&operator)
            .copied()
            .filter(|precedence| *precedence > 0)
    }

    /// If `token` is a declared binary operator, returns it with its precedence.
    pub fn binary_operator(&self, token: &Token) -> Option<(char, i32)> {
        match token {
            Token::Char(c) => self.get(*c).map(|precedence| (*c, precedence)),
            _ => None,
        }
    }
}
