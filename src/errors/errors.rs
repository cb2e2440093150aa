use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// Which stage of the pipeline rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Semantic,
    Resource,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn category(&self) -> ErrorCategory {
        self.internal_error.category()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::UnknownVariable { .. } => "UnknownVariable",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::InvalidOperator { .. } => "InvalidOperator",
            ErrorImpl::Redefinition { .. } => "Redefinition",
            ErrorImpl::SignatureMismatch { .. } => "SignatureMismatch",
            ErrorImpl::DuplicateParameter { .. } => "DuplicateParameter",
            ErrorImpl::SymbolNotFound { .. } => "SymbolNotFound",
            ErrorImpl::StaleUnit => "StaleUnit",
            ErrorImpl::UnitFinalized => "UnitFinalized",
            ErrorImpl::MalformedFunction { .. } => "MalformedFunction",
            ErrorImpl::NoActiveFunction => "NoActiveFunction",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::StackOverflow { .. } => "StackOverflow",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected an expression",
                token
            )),
            ErrorImpl::ExpectedToken { expected, token } => {
                ErrorTip::Suggestion(format!("Expected {}, found `{}`", expected, token))
            }
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expressions may nest at most {} levels deep",
                limit
            )),
            ErrorImpl::UnknownVariable { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` is not a parameter of the enclosing function",
                variable
            )),
            ErrorImpl::UnknownFunction { function } => ErrorTip::Suggestion(format!(
                "Function `{}` was never declared, add a `func` or `extern` first",
                function
            )),
            ErrorImpl::ArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` takes {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::InvalidOperator { operator } => {
                ErrorTip::Suggestion(format!("Operator `{}` has no lowering rule", operator))
            }
            ErrorImpl::Redefinition { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already has a body", function))
            }
            ErrorImpl::SignatureMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` was declared with {} parameters, redeclared with {}",
                function, expected, received
            )),
            ErrorImpl::DuplicateParameter {
                function,
                parameter,
            } => ErrorTip::Suggestion(format!(
                "Parameter `{}` appears more than once in `{}`",
                parameter, function
            )),
            ErrorImpl::SymbolNotFound { symbol } => ErrorTip::Suggestion(format!(
                "No body or runtime primitive named `{}`",
                symbol
            )),
            ErrorImpl::StaleUnit => ErrorTip::None,
            ErrorImpl::UnitFinalized => ErrorTip::None,
            ErrorImpl::MalformedFunction { function } => ErrorTip::Suggestion(format!(
                "Compiled code for `{}` ran past its last instruction",
                function
            )),
            ErrorImpl::NoActiveFunction => ErrorTip::None,
            ErrorImpl::TypeMismatch {
                operation,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` cannot be applied to {}",
                operation, received
            )),
            ErrorImpl::StackOverflow { depth } => {
                ErrorTip::Suggestion(format!("Call depth exceeded {}", depth))
            }
            ErrorImpl::Io { message } => ErrorTip::Suggestion(message.clone()),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected {expected}, found {token:?}")]
    ExpectedToken { expected: String, token: String },
    #[error("expression nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("unknown variable {variable:?}")]
    UnknownVariable { variable: String },
    #[error("unknown function {function:?}")]
    UnknownFunction { function: String },
    #[error("wrong number of arguments to {function:?}: expected {expected}, received {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("invalid binary operator {operator:?}")]
    InvalidOperator { operator: char },
    #[error("function {function:?} redefined")]
    Redefinition { function: String },
    #[error("function {function:?} redeclared with {received} parameters, expected {expected}")]
    SignatureMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("duplicate parameter {parameter:?} in {function:?}")]
    DuplicateParameter { function: String, parameter: String },
    #[error("symbol {symbol:?} not found")]
    SymbolNotFound { symbol: String },
    #[error("compilation unit was already released")]
    StaleUnit,
    #[error("compilation unit is already finalized")]
    UnitFinalized,
    #[error("malformed code in function {function:?}")]
    MalformedFunction { function: String },
    #[error("no function is under construction")]
    NoActiveFunction,
    #[error("type mismatch in {operation}: {received}")]
    TypeMismatch { operation: String, received: String },
    #[error("call depth exceeded {depth}")]
    StackOverflow { depth: usize },
    #[error("i/o error: {message}")]
    Io { message: String },
}

impl ErrorImpl {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorCategory::Parse,
            ErrorImpl::UnknownVariable { .. }
            | ErrorImpl::UnknownFunction { .. }
            | ErrorImpl::ArityMismatch { .. }
            | ErrorImpl::InvalidOperator { .. }
            | ErrorImpl::Redefinition { .. }
            | ErrorImpl::SignatureMismatch { .. }
            | ErrorImpl::DuplicateParameter { .. } => ErrorCategory::Semantic,
            ErrorImpl::SymbolNotFound { .. }
            | ErrorImpl::StaleUnit
            | ErrorImpl::UnitFinalized
            | ErrorImpl::MalformedFunction { .. }
            | ErrorImpl::NoActiveFunction
            | ErrorImpl::TypeMismatch { .. }
            | ErrorImpl::StackOverflow { .. }
            | ErrorImpl::Io { .. } => ErrorCategory::Resource,
        }
    }
}

impl From<std::io::Error> for ErrorImpl {
    fn from(error: std::io::Error) -> Self {
        ErrorImpl::Io {
            message: error.to_string(),
        }
    }
}
