//! Function compiler: builds the body of one declared function.
//!
//! [`FunctionCompiler`] drives a [`Lowerer`] over the source blocks in
//! order. Each block starts with an empty value cache; the entry block of
//! the program entry function first calls the package initializer.
//!
//! # Example
//!
//! ```ignore
//! let pending = ctx.take_pending();
//! for body in &pending {
//!     FunctionCompiler::compile(&mut ctx, body)?;
//! }
//! ```

use llgo_core::{CompileError, SymbolKind};
use log::debug;

use crate::context::{CompilationContext, ENTRY_FUNC, INIT_FUNC, PendingBody};
use crate::lower::Lowerer;

type Result<T> = std::result::Result<T, CompileError>;

/// Builds the body of a single function.
pub struct FunctionCompiler<'a, 'ctx> {
    lower: Lowerer<'a, 'ctx>,
    /// Whether this is the program entry function.
    is_entry: bool,
}

impl<'a, 'ctx> FunctionCompiler<'a, 'ctx> {
    /// Build the body of a pending function.
    ///
    /// The context's current function is set for the duration of the build
    /// and cleared afterwards, whether or not the build succeeds. Functions
    /// without blocks stay declarations.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(ctx: &mut CompilationContext<'ctx>, pending: &PendingBody) -> Result<()> {
        ctx.begin_function(pending.id);
        let result = Self::compile_body(ctx, pending);
        ctx.end_function();
        result
    }

    fn compile_body(ctx: &mut CompilationContext<'ctx>, pending: &PendingBody) -> Result<()> {
        let func = pending.func.as_ref();
        let nblocks = func.blocks().len();
        if nblocks == 0 {
            return Ok(());
        }
        if ctx.options().trace_instructions() {
            debug!("==> FuncBody {} ({nblocks} blocks)", pending.name);
        }
        if ctx.options().trace_ssa() {
            debug!("{func}");
        }

        let mut compiler = FunctionCompiler {
            lower: Lowerer::new(ctx, func, pending.id),
            is_entry: pending.name == ENTRY_FUNC,
        };
        for index in 0..nblocks {
            compiler.compile_block(index)?;
        }
        let body = compiler.lower.finish();
        ctx.pkg_mut().set_body(pending.id, body);
        Ok(())
    }

    /// Build source block `index` into the matching target block.
    fn compile_block(&mut self, index: usize) -> Result<()> {
        self.lower.begin_block(index)?;
        if index == 0 && self.is_entry {
            self.call_init()?;
        }
        let Some(block) = self.lower.func().block(index) else {
            return Ok(());
        };
        for &id in &block.instrs {
            self.lower.compile_instr(id)?;
        }
        Ok(())
    }

    /// Call the package initializer.
    fn call_init(&mut self) -> Result<()> {
        let pkg = self.lower.ctx().pkg();
        let init = pkg.func_of(INIT_FUNC).ok_or_else(|| CompileError::Undeclared {
            kind: SymbolKind::Function,
            name: INIT_FUNC.to_string(),
        })?;
        let callee = pkg.func_expr(init);
        self.lower.builder().call(callee, Vec::new());
        Ok(())
    }
}
