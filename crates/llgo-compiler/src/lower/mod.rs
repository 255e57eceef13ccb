//! Lowering of source values and instructions into target IR.
//!
//! A [`Lowerer`] carries the state of one function body build: the source
//! function, the target function and the instruction builder. It is split
//! across two modules:
//!
//! - [`value`]: operand resolution, argument lists and variadic packing
//! - [`instr`]: per-instruction lowering, memoized per block

mod instr;
mod value;

use llgo_core::CompileError;
use llgo_ir::{BlockId, Body, Builder, FuncId};
use llgo_ssa as ssa;

use crate::context::CompilationContext;

type Result<T> = std::result::Result<T, CompileError>;

/// Lowers the instructions of one source function into a target body.
pub struct Lowerer<'a, 'ctx> {
    ctx: &'a mut CompilationContext<'ctx>,
    /// Source function.
    func: &'a ssa::Function,
    /// Target function.
    target: FuncId,
    builder: Builder,
    /// Index of the source block being lowered.
    block: usize,
}

impl<'a, 'ctx> Lowerer<'a, 'ctx> {
    pub fn new(ctx: &'a mut CompilationContext<'ctx>, func: &'a ssa::Function, target: FuncId) -> Self {
        let builder = Builder::new(target, func.blocks().len().max(1));
        Self {
            ctx,
            func,
            target,
            builder,
            block: 0,
        }
    }

    pub fn ctx(&mut self) -> &mut CompilationContext<'ctx> {
        self.ctx
    }

    pub fn func(&self) -> &'a ssa::Function {
        self.func
    }

    pub fn builder(&mut self) -> &mut Builder {
        &mut self.builder
    }

    /// Start lowering source block `index`: empty the value cache and move
    /// the insertion point to the matching target block.
    pub fn begin_block(&mut self, index: usize) -> Result<()> {
        let block = self.target_block(index)?;
        self.block = index;
        self.ctx.begin_block();
        self.builder.set_block(block);
        Ok(())
    }

    /// Finish the body.
    pub fn finish(self) -> Body {
        self.builder.finish()
    }

    fn target_block(&self, index: usize) -> Result<BlockId> {
        self.builder.block(index).ok_or_else(|| {
            CompileError::internal(format!(
                "{}: block {index} out of range ({} blocks)",
                self.ctx.current_name(),
                self.builder.block_count()
            ))
        })
    }

    /// The source block being lowered.
    fn source_block(&self) -> Result<&'a ssa::BasicBlock> {
        self.func.block(self.block).ok_or_else(|| {
            CompileError::internal(format!(
                "{}: no source block {}",
                self.ctx.current_name(),
                self.block
            ))
        })
    }

    /// Target block of successor `n` of the current source block.
    fn successor(&self, n: usize) -> Result<BlockId> {
        let block = self.source_block()?;
        let succ = block.succs.get(n).copied().ok_or_else(|| {
            CompileError::internal(format!(
                "{}: block {} has no successor {n}",
                self.ctx.current_name(),
                block.index
            ))
        })?;
        self.target_block(succ)
    }
}
