use std::fmt::Display;

use crate::{ast::ast::Literal, errors::errors::ErrorImpl};

use super::ir::BinaryOp;

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Double(f64),
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Double(value) => Value::Double(*value),
            Literal::Integer(value) => Value::Integer(*value),
            Literal::Boolean(value) => Value::Boolean(*value),
            Literal::String(value) => Value::String(value.clone()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Double(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{:?}", value),
        }
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Double(_) => "double",
            Value::Integer(_) => "int",
            Value::Boolean(_) => "bool",
            Value::String(_) => "string",
        }
    }

    /// Numeric view of the value; integers widen to doubles.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(value) => Some(*value),
            Value::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Condition test: booleans as is, numbers when non-zero.
    pub fn is_truthy(&self) -> Result<bool, ErrorImpl> {
        match self {
            Value::Boolean(value) => Ok(*value),
            Value::Double(value) => Ok(*value != 0.0),
            Value::Integer(value) => Ok(*value != 0),
            Value::String(_) => Err(ErrorImpl::TypeMismatch {
                operation: String::from("if"),
                received: String::from(self.type_name()),
            }),
        }
    }
}

impl BinaryOp {
    /// Applies the operator.
    ///
    /// Two integers stay integers for `+ - * %`; any other numeric mix is
    /// computed in floating point, and `/` always is. `+` also joins strings.
    /// `<` yields 1.0 or 0.0.
    pub fn apply(&self, lhs: &Value, rhs: &Value) -> Result<Value, ErrorImpl> {
        match (self, lhs, rhs) {
            (BinaryOp::Add, Value::String(a), Value::String(b)) => {
                return Ok(Value::String(format!("{}{}", a, b)))
            }
            (BinaryOp::Add, Value::Integer(a), Value::Integer(b)) => {
                return Ok(Value::Integer(a.wrapping_add(*b)))
            }
            (BinaryOp::Sub, Value::Integer(a), Value::Integer(b)) => {
                return Ok(Value::Integer(a.wrapping_sub(*b)))
            }
            (BinaryOp::Mul, Value::Integer(a), Value::Integer(b)) => {
                return Ok(Value::Integer(a.wrapping_mul(*b)))
            }
            (BinaryOp::Rem, Value::Integer(a), Value::Integer(b)) if *b != 0 => {
                return Ok(Value::Integer(a.wrapping_rem(*b)))
            }
            _ => {}
        }

        let (a, b) = match (lhs.as_f64(), rhs.as_f64()) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(ErrorImpl::TypeMismatch {
                    operation: self.symbol().to_string(),
                    received: format!("{} and {}", lhs.type_name(), rhs.type_name()),
                })
            }
        };

        Ok(Value::Double(match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Rem => a % b,
            BinaryOp::Less => {
                if a < b {
                    1.0
                } else {
                    0.0
                }
            }
        }))
    }
}
