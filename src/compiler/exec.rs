//! The virtual machine running lowered functions.
//!
//! Calls never recurse on the host stack: every call pushes an explicit
//! frame, so the depth limit is the only bound on guest recursion.

use std::{io::Write, mem, rc::Rc};

use log::debug;

use crate::errors::errors::ErrorImpl;

use super::{
    ir::{CompiledFunction, Instr, Reg},
    stdlib::Primitive,
    value::Value,
};

/// What a call instruction resolved to.
#[derive(Debug, Clone)]
pub enum Callee {
    Function(Rc<CompiledFunction>),
    Primitive(&'static Primitive),
}

struct Frame {
    function: Rc<CompiledFunction>,
    registers: Vec<Option<Value>>,
    pc: usize,
    /// Caller register receiving the result
    return_to: Reg,
}

impl Frame {
    fn new(function: Rc<CompiledFunction>, args: Vec<Value>, return_to: Reg) -> Self {
        let mut registers = vec![None; function.registers as usize];
        for (slot, arg) in registers.iter_mut().zip(args) {
            *slot = Some(arg);
        }

        Frame {
            function,
            registers,
            pc: 0,
            return_to,
        }
    }

    fn malformed(&self) -> ErrorImpl {
        ErrorImpl::MalformedFunction {
            function: self.function.name.clone(),
        }
    }

    fn get(&self, reg: Reg) -> Result<&Value, ErrorImpl> {
        match self.registers.get(reg.0 as usize) {
            Some(Some(value)) => Ok(value),
            _ => Err(self.malformed()),
        }
    }

    fn set(&mut self, reg: Reg, value: Value) -> Result<(), ErrorImpl> {
        match self.registers.get_mut(reg.0 as usize) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(self.malformed()),
        }
    }
}

/// Runs `entry` with `args` until it returns.
///
/// `resolve` binds callee names to code; `max_depth` counts frames including
/// the entry frame.
pub fn run<R>(
    entry: Rc<CompiledFunction>,
    args: Vec<Value>,
    resolve: R,
    sink: &mut dyn Write,
    max_depth: usize,
) -> Result<Value, ErrorImpl>
where
    R: Fn(&str) -> Option<Callee>,
{
    if args.len() != entry.arity {
        return Err(ErrorImpl::ArityMismatch {
            function: entry.name.clone(),
            expected: entry.arity,
            received: args.len(),
        });
    }

    debug!("running {}", entry.name);

    let mut stack: Vec<Frame> = vec![];
    let mut frame = Frame::new(entry, args, Reg(0));

    loop {
        let function = Rc::clone(&frame.function);
        let instr = function.code.get(frame.pc).ok_or_else(|| frame.malformed())?;

        match instr {
            Instr::Const { dst, value } => {
                frame.set(*dst, value.clone())?;
                frame.pc += 1;
            }
            Instr::Binary { dst, op, lhs, rhs } => {
                let value = op.apply(frame.get(*lhs)?, frame.get(*rhs)?)?;
                frame.set(*dst, value)?;
                frame.pc += 1;
            }
            Instr::Move { dst, src } => {
                let value = frame.get(*src)?.clone();
                frame.set(*dst, value)?;
                frame.pc += 1;
            }
            Instr::JumpUnless { cond, target } => {
                if frame.get(*cond)?.is_truthy()? {
                    frame.pc += 1;
                } else {
                    frame.pc = *target;
                }
            }
            Instr::Jump { target } => frame.pc = *target,
            Instr::Call { dst, callee, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(frame.get(*arg)?.clone());
                }

                match resolve(callee.as_str()) {
                    Some(Callee::Function(target)) => {
                        if target.arity != values.len() {
                            return Err(ErrorImpl::ArityMismatch {
                                function: callee.clone(),
                                expected: target.arity,
                                received: values.len(),
                            });
                        }
                        if stack.len() + 1 >= max_depth {
                            return Err(ErrorImpl::StackOverflow { depth: max_depth });
                        }

                        frame.pc += 1;
                        let caller = mem::replace(&mut frame, Frame::new(target, values, *dst));
                        stack.push(caller);
                    }
                    Some(Callee::Primitive(primitive)) => {
                        let value = primitive.call(&values, sink)?;
                        frame.set(*dst, value)?;
                        frame.pc += 1;
                    }
                    None => {
                        return Err(ErrorImpl::SymbolNotFound {
                            symbol: callee.clone(),
                        })
                    }
                }
            }
            Instr::Return { src } => {
                let value = frame.get(*src)?.clone();
                match stack.pop() {
                    Some(caller) => {
                        let return_to = frame.return_to;
                        frame = caller;
                        frame.set(return_to, value)?;
                    }
                    None => return Ok(value),
                }
            }
        }
    }
}
