//! Instruction lowering.
//!
//! Value-producing instructions are lowered on demand, the first time they
//! are used or reached in block order, and memoized for the rest of the
//! block. Everything else is lowered exactly once, in block order.

use llgo_core::CompileError;
use llgo_ir::Expr;
use llgo_ssa::{InstrId, Instruction};
use log::debug;

use super::{Lowerer, Result};
use crate::classify::{FuncKind, func_kind};

impl<'a> Lowerer<'a, '_> {
    /// Lower the instruction `id` of the current block.
    pub fn compile_instr(&mut self, id: InstrId) -> Result<()> {
        let instr = self.instr(id)?;
        match instr {
            Instruction::Call(_)
            | Instruction::BinOp(_)
            | Instruction::UnOp(_)
            | Instruction::IndexAddr(_)
            | Instruction::Alloc(_)
            | Instruction::Phi(_)
            | Instruction::FieldAddr(_)
            | Instruction::Convert(_) => {
                self.compile_instr_and_value(id)?;
            }
            Instruction::Store(store) => {
                let addr = self.compile_value(&store.addr)?;
                let val = self.compile_value(&store.val)?;
                self.builder.store(addr, val);
            }
            Instruction::Jump => {
                let target = self.successor(0)?;
                self.builder.jump(target);
            }
            Instruction::If(branch) => {
                let cond = self.compile_value(&branch.cond)?;
                let then = self.successor(0)?;
                let els = self.successor(1)?;
                self.builder.cond_br(cond, then, els);
            }
            Instruction::Return(ret) => {
                let results = ret
                    .results
                    .iter()
                    .map(|v| self.compile_value(v))
                    .collect::<Result<Vec<_>>>()?;
                self.builder.ret(results);
            }
            Instruction::Panic(_) => return Err(self.unsupported(id, instr)),
        }
        Ok(())
    }

    /// Lower a value-producing instruction, or return its memoized value.
    ///
    /// Calls to the intrinsics initializer are dropped and yield `None`;
    /// they are not memoized.
    pub fn compile_instr_and_value(&mut self, id: InstrId) -> Result<Option<Expr>> {
        if let Some(value) = self.ctx.cached_value(id) {
            return Ok(Some(value.clone()));
        }
        let instr = self.instr(id)?;
        let value = match instr {
            Instruction::Call(call) => {
                let kind = func_kind(&call.callee);
                if kind == FuncKind::UnsafeInit {
                    return Ok(None);
                }
                if self.ctx.options().trace_ssa() {
                    let args: Vec<String> =
                        call.args.iter().map(|a| self.func.value_text(a)).collect();
                    debug!(">>> Call {} [{}]", self.func.value_text(&call.callee), args.join(", "));
                }
                let callee = self.compile_value(&call.callee)?;
                let args = self.compile_values(&call.callee, &call.args, kind)?;
                self.builder.call(callee, args)
            }
            Instruction::BinOp(bin) => {
                let x = self.compile_value(&bin.x)?;
                let y = self.compile_value(&bin.y)?;
                self.builder.bin_op(bin.op, x, y)
            }
            Instruction::UnOp(un) => {
                let x = self.compile_value(&un.x)?;
                self.builder.un_op(un.op, x)
            }
            Instruction::IndexAddr(index_addr) => {
                let x = self.compile_value(&index_addr.x)?;
                let index = self.compile_value(&index_addr.index)?;
                self.builder.index_addr(x, index)
            }
            Instruction::Alloc(alloc) => {
                let ty = self.ctx.prog().type_of(&alloc.ty);
                self.builder.alloc(ty, alloc.heap)
            }
            Instruction::Phi(_) | Instruction::FieldAddr(_) | Instruction::Convert(_) => {
                return Err(self.unsupported(id, instr));
            }
            Instruction::Store(_)
            | Instruction::Jump
            | Instruction::If(_)
            | Instruction::Return(_)
            | Instruction::Panic(_) => {
                return Err(CompileError::internal(format!(
                    "{}: {} instruction used as a value: {}",
                    self.ctx.current_name(),
                    instr.kind_name(),
                    self.func.instr_text(id)
                )));
            }
        };
        self.ctx.cache_value(id, value.clone());
        Ok(Some(value))
    }

    fn instr(&self, id: InstrId) -> Result<&'a Instruction> {
        let func = self.func;
        func.instr(id).ok_or_else(|| {
            CompileError::internal(format!(
                "{}: no instruction {id:?} in {}",
                self.ctx.current_name(),
                func.full_name()
            ))
        })
    }

    fn unsupported(&self, id: InstrId, instr: &Instruction) -> CompileError {
        CompileError::UnsupportedInstruction {
            kind: instr.kind_name(),
            function: self.ctx.current_name(),
            block: self.block,
            text: self.func.instr_text(id),
        }
    }
}
