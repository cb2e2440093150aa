use std::{collections::HashSet, fmt::Display};

/// Name given to the function wrapping a bare top-level expression.
///
/// Identifiers are built from ASCII letters and digits only, so no user
/// definition can ever collide with it.
pub const ANONYMOUS_FUNCTION_NAME: &str = "__anon_expr";

/// A literal payload, shared between tokens and expression nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Double(f64),
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Double(value) => write!(f, "{}", value),
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Boolean(value) => write!(f, "{}", value),
            Literal::String(value) => write!(f, "{:?}", value),
        }
    }
}

/// Expression nodes. Every node owns its children; a subtree is never
/// mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Variable(String),
    Binary {
        operator: char,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        callee: String,
        arguments: Vec<Expr>,
    },
    If {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

impl Expr {
    pub fn double(value: f64) -> Self {
        Expr::Literal(Literal::Double(value))
    }

    pub fn integer(value: i64) -> Self {
        Expr::Literal(Literal::Integer(value))
    }

    pub fn variable(name: &str) -> Self {
        Expr::Variable(String::from(name))
    }

    pub fn binary(operator: char, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(callee: &str, arguments: Vec<Expr>) -> Self {
        Expr::Call {
            callee: String::from(callee),
            arguments,
        }
    }

    pub fn conditional(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }
}

/// Prints the tree in prefix form, e.g. `+(1, *(2, 3))`.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Binary {
                operator,
                left,
                right,
            } => write!(f, "{}({}, {})", operator, left, right),
            Expr::Call { callee, arguments } => {
                write!(f, "{}(", callee)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
            Expr::If {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "if({}, {}, {})", condition, then_branch, else_branch),
        }
    }
}

/// A function signature: its name and ordered parameter names.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
}

impl Prototype {
    pub fn new(name: &str, params: Vec<String>) -> Self {
        Prototype {
            name: String::from(name),
            params,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn is_anonymous(&self) -> bool {
        self.name == ANONYMOUS_FUNCTION_NAME
    }

    /// Returns the first parameter name that appears twice, if any.
    pub fn duplicate_parameter(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.params
            .iter()
            .find(|param| !seen.insert(param.as_str()))
            .map(|param| param.as_str())
    }
}

impl Display for Prototype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.params.join(" "))
    }
}

/// A prototype together with the single expression that is its body.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Expr,
}

impl Function {
    /// Wraps a bare expression in a zero-parameter function.
    pub fn anonymous(body: Expr) -> Self {
        Function {
            prototype: Prototype::new(ANONYMOUS_FUNCTION_NAME, vec![]),
            body,
        }
    }

    pub fn name(&self) -> &str {
        &self.prototype.name
    }
}
