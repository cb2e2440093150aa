use std::collections::HashMap;

use crate::{ast::ast::Expr, errors::errors::ErrorImpl, session::session::SymbolTable};

use super::{
    ir::{BinaryOp, FunctionBuilder, Instr, Reg},
    value::Value,
};

/// Lowers `expression` into `builder` and returns the register holding its value.
///
/// `declarations` maps every function name visible to the unit to its arity.
pub fn gen_expression(
    builder: &mut FunctionBuilder,
    declarations: &HashMap<String, usize>,
    expression: &Expr,
    symbols: &SymbolTable<Reg>,
) -> Result<Reg, ErrorImpl> {
    match expression {
        Expr::Literal(literal) => {
            let dst = builder.new_reg();
            builder.push(Instr::Const {
                dst,
                value: Value::from(literal),
            });
            Ok(dst)
        }
        Expr::Variable(name) => {
            symbols
                .get(name)
                .copied()
                .ok_or_else(|| ErrorImpl::UnknownVariable {
                    variable: name.clone(),
                })
        }
        Expr::Binary {
            operator,
            left,
            right,
        } => {
            let op = BinaryOp::from_char(*operator)
                .ok_or(ErrorImpl::InvalidOperator { operator: *operator })?;

            let lhs = gen_expression(builder, declarations, left, symbols)?;
            let rhs = gen_expression(builder, declarations, right, symbols)?;

            let dst = builder.new_reg();
            builder.push(Instr::Binary { dst, op, lhs, rhs });
            Ok(dst)
        }
        Expr::Call { callee, arguments } => {
            let arity = *declarations
                .get(callee)
                .ok_or_else(|| ErrorImpl::UnknownFunction {
                    function: callee.clone(),
                })?;

            if arity != arguments.len() {
                return Err(ErrorImpl::ArityMismatch {
                    function: callee.clone(),
                    expected: arity,
                    received: arguments.len(),
                });
            }

            let mut args = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(gen_expression(builder, declarations, argument, symbols)?);
            }

            let dst = builder.new_reg();
            builder.push(Instr::Call {
                dst,
                callee: callee.clone(),
                args,
            });
            Ok(dst)
        }
        Expr::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let cond = gen_expression(builder, declarations, condition, symbols)?;
            let result = builder.new_reg();

            let jump_to_else = builder.push(Instr::JumpUnless { cond, target: 0 });
            let then_value = gen_expression(builder, declarations, then_branch, symbols)?;
            builder.push(Instr::Move {
                dst: result,
                src: then_value,
            });
            let jump_to_end = builder.push(Instr::Jump { target: 0 });

            let else_start = builder.next_index();
            builder.patch_jump(jump_to_else, else_start);
            let else_value = gen_expression(builder, declarations, else_branch, symbols)?;
            builder.push(Instr::Move {
                dst: result,
                src: else_value,
            });

            let end = builder.next_index();
            builder.patch_jump(jump_to_end, end);
            Ok(result)
        }
    }
}
