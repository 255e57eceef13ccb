//! Operand resolution.

use llgo_core::CompileError;
use llgo_ir::Expr;
use llgo_ssa::Value;

use super::{Lowerer, Result};
use crate::classify::FuncKind;

impl Lowerer<'_, '_> {
    /// Resolve a source value to a target expression.
    pub fn compile_value(&mut self, value: &Value) -> Result<Expr> {
        match value {
            Value::Instr(id) => self.compile_instr_and_value(*id)?.ok_or_else(|| {
                CompileError::internal(format!(
                    "{}: value {} of an elided call used as an operand",
                    self.ctx.current_name(),
                    self.func.value_text(value)
                ))
            }),
            Value::Param(id) => {
                let param = self
                    .func
                    .param_index(*id)
                    .and_then(|index| self.ctx.pkg().func(self.target).param(index));
                param.ok_or_else(|| {
                    CompileError::internal(format!(
                        "{}: parameter {} not found",
                        self.ctx.current_name(),
                        self.func.value_text(value)
                    ))
                })
            }
            Value::Function(f) => {
                let id = self.ctx.func_of(f)?;
                Ok(self.ctx.pkg().func_expr(id))
            }
            Value::Global(g) => {
                let id = self.ctx.var_of(g)?;
                Ok(self.ctx.pkg().global_expr(id))
            }
            Value::Const(c) => {
                let prog = self.ctx.prog();
                Ok(prog.constant(c.value.as_ref(), prog.type_of(&c.ty)))
            }
            Value::Builtin(_) | Value::FreeVar(_) => Err(CompileError::UnsupportedValue {
                kind: value.kind_name(),
                function: self.ctx.current_name(),
            }),
        }
    }

    /// Resolve the arguments of a call to `callee` of the given kind.
    ///
    /// The last `kind.trailing_args()` arguments are handed to variadic
    /// packing; everything before them is resolved in order.
    pub fn compile_values(&mut self, callee: &Value, args: &[Value], kind: FuncKind) -> Result<Vec<Expr>> {
        let n = args.len().saturating_sub(kind.trailing_args());
        let mut out = Vec::with_capacity(n);
        for arg in &args[..n] {
            out.push(self.compile_value(arg)?);
        }
        for arg in &args[n..] {
            out.extend(self.pack_varargs(callee, arg)?);
        }
        Ok(out)
    }

    /// The extra arguments carried by a variadic call's trailing argument.
    ///
    /// Only the absent case (a value-less constant) is supported.
    fn pack_varargs(&mut self, callee: &Value, arg: &Value) -> Result<Vec<Expr>> {
        match arg {
            Value::Const(c) if c.is_nil() => Ok(Vec::new()),
            _ => Err(CompileError::UnsupportedVarArgs {
                callee: self.func.value_text(callee),
                arg: self.func.value_text(arg),
            }),
        }
    }
}
