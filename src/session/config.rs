use thiserror::Error;

use crate::parser::{
    lookups::{OperatorTable, DEFAULT_PRECEDENCE},
    parser::DEFAULT_MAX_NESTING_DEPTH,
};

pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

/// Settings a session is created from.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Name used in error positions
    pub source_name: String,
    /// Operator precedences, applied in order; a non-positive precedence removes the operator
    pub operators: Vec<(char, i32)>,
    /// Deepest call chain the runtime accepts
    pub max_call_depth: usize,
    /// Deepest expression nesting the parser accepts
    pub max_nesting_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            source_name: String::from("<stdin>"),
            operators: DEFAULT_PRECEDENCE.to_vec(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("operator override {0:?} must look like OP=PRECEDENCE")]
    MalformedOperator(String),
    #[error("operator {0:?} must be a single character")]
    OperatorNotSingleChar(String),
    #[error("precedence {0:?} is not an integer")]
    InvalidPrecedence(String),
}

impl SessionConfig {
    pub fn with_source_name(mut self, name: &str) -> Self {
        self.source_name = String::from(name);
        self
    }

    pub fn with_operator(mut self, operator: char, precedence: i32) -> Self {
        self.operators.push((operator, precedence));
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Parses an `OP=PRECEDENCE` override such as `^=60`.
    pub fn parse_operator(spec: &str) -> Result<(char, i32), ConfigError> {
        let (operator, precedence) = spec
            .rsplit_once('=')
            .ok_or_else(|| ConfigError::MalformedOperator(String::from(spec)))?;

        let mut chars = operator.chars();
        let op = match (chars.next(), chars.next()) {
            (Some(op), None) => op,
            _ => return Err(ConfigError::OperatorNotSingleChar(String::from(operator))),
        };

        let precedence = precedence
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidPrecedence(String::from(precedence)))?;

        Ok((op, precedence))
    }

    pub fn operator_table(&self) -> OperatorTable {
        let mut table = OperatorTable::empty();
        for (operator, precedence) in &self.operators {
            if *precedence > 0 {
                table.set(*operator, *precedence);
            } else {
                table.remove(*operator);
            }
        }
        table
    }
}
