//! Register-based intermediate form produced by the lowering pass.
//!
//! Parameters occupy the first registers of a function; every other
//! register is written exactly once per path before it is read.

use std::fmt::Display;

use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reg(pub u32);

impl Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "%{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Less,
}

impl BinaryOp {
    /// The lowering rule for an operator character, if it has one.
    pub fn from_char(operator: char) -> Option<BinaryOp> {
        match operator {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' | '×' => Some(BinaryOp::Mul),
            '/' | '÷' => Some(BinaryOp::Div),
            '%' => Some(BinaryOp::Rem),
            '<' => Some(BinaryOp::Less),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Rem => '%',
            BinaryOp::Less => '<',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    Const { dst: Reg, value: Value },
    Binary { dst: Reg, op: BinaryOp, lhs: Reg, rhs: Reg },
    /// Calls are bound by name when executed.
    Call { dst: Reg, callee: String, args: Vec<Reg> },
    Move { dst: Reg, src: Reg },
    JumpUnless { cond: Reg, target: usize },
    Jump { target: usize },
    Return { src: Reg },
}

impl Display for Instr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instr::Const { dst, value } => write!(f, "{} = const {}", dst, value),
            Instr::Binary { dst, op, lhs, rhs } => {
                write!(f, "{} = {} {} {}", dst, lhs, op.symbol(), rhs)
            }
            Instr::Call { dst, callee, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{} = call {}({})", dst, callee, args)
            }
            Instr::Move { dst, src } => write!(f, "{} = {}", dst, src),
            Instr::JumpUnless { cond, target } => write!(f, "unless {} jump {}", cond, target),
            Instr::Jump { target } => write!(f, "jump {}", target),
            Instr::Return { src } => write!(f, "return {}", src),
        }
    }
}

/// A fully lowered function body.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    pub name: String,
    pub arity: usize,
    pub registers: u32,
    pub code: Vec<Instr>,
}

impl Display for CompiledFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "func {}/{} ({} registers)", self.name, self.arity, self.registers)?;
        for (i, instr) in self.code.iter().enumerate() {
            writeln!(f, "{:>4}: {}", i, instr)?;
        }
        Ok(())
    }
}

/// Accumulates instructions for one function.
#[derive(Debug)]
pub struct FunctionBuilder {
    name: String,
    arity: usize,
    next_reg: u32,
    code: Vec<Instr>,
}

impl FunctionBuilder {
    pub fn new(name: &str, arity: usize) -> Self {
        FunctionBuilder {
            name: String::from(name),
            arity,
            next_reg: arity as u32,
            code: vec![],
        }
    }

    pub fn param(&self, index: usize) -> Reg {
        Reg(index as u32)
    }

    pub fn new_reg(&mut self) -> Reg {
        let reg = Reg(self.next_reg);
        self.next_reg += 1;
        reg
    }

    /// Appends `instr` and returns its index.
    pub fn push(&mut self, instr: Instr) -> usize {
        self.code.push(instr);
        self.code.len() - 1
    }

    /// Index the next pushed instruction will get.
    pub fn next_index(&self) -> usize {
        self.code.len()
    }

    /// Points the jump at `index` to `target`.
    pub fn patch_jump(&mut self, index: usize, target: usize) {
        match self.code.get_mut(index) {
            Some(Instr::JumpUnless { target: t, .. }) | Some(Instr::Jump { target: t }) => {
                *t = target
            }
            _ => {}
        }
    }

    pub fn finish(self, result: Reg) -> CompiledFunction {
        let mut code = self.code;
        code.push(Instr::Return { src: result });

        CompiledFunction {
            name: self.name,
            arity: self.arity,
            registers: self.next_reg,
            code,
        }
    }
}
