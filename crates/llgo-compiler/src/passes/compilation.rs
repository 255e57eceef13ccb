//! Compilation Pass (Pass 2) - build the queued function bodies.
//!
//! Bodies are built in the order the declaration pass queued them, each by a
//! [`FunctionCompiler`]. Under [`ErrorPolicy::Collect`], a body that hits an
//! unsupported construct is left as a declaration and the pass moves on;
//! internal errors always stop the pass.

use llgo_core::CompileError;
use log::warn;

use crate::context::CompilationContext;
use crate::function_compiler::FunctionCompiler;
use crate::options::ErrorPolicy;

type Result<T> = std::result::Result<T, CompileError>;

/// Output of the compilation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompilationOutput {
    /// Number of bodies built.
    pub bodies_built: usize,
    /// Number of functions left without a body (external or failed).
    pub declarations: usize,
}

/// Pass 2: build function bodies.
pub struct CompilationPass<'a, 'ctx> {
    ctx: &'a mut CompilationContext<'ctx>,
}

impl<'a, 'ctx> CompilationPass<'a, 'ctx> {
    pub fn new(ctx: &'a mut CompilationContext<'ctx>) -> Self {
        Self { ctx }
    }

    /// Drain the pending queue.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(self) -> Result<CompilationOutput> {
        let policy = self.ctx.options().error_policy;
        let mut output = CompilationOutput::default();

        for pending in self.ctx.take_pending() {
            match FunctionCompiler::compile(self.ctx, &pending) {
                Ok(()) => {}
                Err(err) if policy == ErrorPolicy::Collect && err.is_unsupported() => {
                    warn!("{}: {err}", pending.name);
                    self.ctx.push_error(err);
                }
                Err(err) => return Err(err),
            }
            if self.ctx.pkg().func(pending.id).is_declaration() {
                output.declarations += 1;
            } else {
                output.bodies_built += 1;
            }
        }

        let errors = self.ctx.take_errors();
        if errors.is_empty() {
            Ok(output)
        } else {
            Err(CompileError::Multiple(errors))
        }
    }
}
