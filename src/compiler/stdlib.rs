//! Runtime primitives.
//!
//! These are the functions an `extern` declaration can bind to without a
//! body of its own. All of them take and return doubles; the output
//! primitives write to the sink of the backend and return `0`.

use std::{collections::HashMap, io::Write};

use lazy_static::lazy_static;

use crate::errors::errors::ErrorImpl;

use super::value::Value;

type PrimitiveFn = fn(&[f64], &mut dyn Write) -> Result<f64, ErrorImpl>;

pub struct Primitive {
    pub name: &'static str,
    pub arity: usize,
    function: PrimitiveFn,
}

impl std::fmt::Debug for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Primitive({}/{})", self.name, self.arity)
    }
}

impl Primitive {
    /// Calls the primitive, converting every argument to a double first.
    pub fn call(&self, args: &[Value], sink: &mut dyn Write) -> Result<Value, ErrorImpl> {
        if args.len() != self.arity {
            return Err(ErrorImpl::ArityMismatch {
                function: String::from(self.name),
                expected: self.arity,
                received: args.len(),
            });
        }

        let mut numbers = Vec::with_capacity(args.len());
        for arg in args {
            match arg.as_f64() {
                Some(number) => numbers.push(number),
                None => {
                    return Err(ErrorImpl::TypeMismatch {
                        operation: String::from(self.name),
                        received: String::from(arg.type_name()),
                    })
                }
            }
        }

        Ok(Value::Double((self.function)(&numbers, sink)?))
    }
}

fn putchard(args: &[f64], sink: &mut dyn Write) -> Result<f64, ErrorImpl> {
    sink.write_all(&[args[0] as u8])?;
    sink.flush()?;
    Ok(0.0)
}

fn printd(args: &[f64], sink: &mut dyn Write) -> Result<f64, ErrorImpl> {
    writeln!(sink, "{:.6}", args[0])?;
    Ok(0.0)
}

lazy_static! {
    static ref PRIMITIVES: HashMap<&'static str, Primitive> = {
        let primitives: Vec<Primitive> = vec![
            Primitive { name: "putchard", arity: 1, function: putchard },
            Primitive { name: "printd", arity: 1, function: printd },
            Primitive { name: "returnd", arity: 1, function: |args, _| Ok(args[0]) },
            Primitive { name: "sqrt", arity: 1, function: |args, _| Ok(args[0].sqrt()) },
            Primitive { name: "pow", arity: 2, function: |args, _| Ok(args[0].powf(args[1])) },
            Primitive { name: "sin", arity: 1, function: |args, _| Ok(args[0].sin()) },
            Primitive { name: "cos", arity: 1, function: |args, _| Ok(args[0].cos()) },
            Primitive { name: "tan", arity: 1, function: |args, _| Ok(args[0].tan()) },
        ];

        primitives
            .into_iter()
            .map(|primitive| (primitive.name, primitive))
            .collect()
    };
}

pub fn lookup(name: &str) -> Option<&'static Primitive> {
    PRIMITIVES.get(name)
}

/// Names of every primitive, sorted.
pub fn primitive_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PRIMITIVES.keys().copied().collect();
    names.sort_unstable();
    names
}
