//! Declaration Pass (Pass 1) - declare every member of the package.
//!
//! Members are visited in source-position order so the output does not
//! depend on the hash order of the package's member table. Every function,
//! global and type is declared before any body is built, which lets bodies
//! refer to members declared after them in the source.
//!
//! ## Responsibilities
//!
//! - Declare non-generic functions and queue their bodies
//! - Declare globals with a zero initializer
//! - Declare named types
//!
//! Named constants are inlined at their uses and declare nothing.

use std::rc::Rc;

use llgo_core::CompileError;
use llgo_ssa::{self as ssa, Member, TypeName};
use log::debug;

use crate::context::{CompilationContext, PendingBody, full_name, sorted_members};

type Result<T> = std::result::Result<T, CompileError>;

/// Output of the declaration pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeclarationOutput {
    /// Number of functions declared (and queued).
    pub functions_declared: usize,
    /// Number of generic functions skipped.
    pub generics_skipped: usize,
    /// Number of globals declared.
    pub globals_declared: usize,
    /// Number of types declared.
    pub types_declared: usize,
}

/// Pass 1: declare all members of a package.
pub struct DeclarationPass<'a, 'ctx> {
    ctx: &'a mut CompilationContext<'ctx>,
    output: DeclarationOutput,
}

impl<'a, 'ctx> DeclarationPass<'a, 'ctx> {
    pub fn new(ctx: &'a mut CompilationContext<'ctx>) -> Self {
        Self {
            ctx,
            output: DeclarationOutput::default(),
        }
    }

    /// Run the declaration pass over the context's source package.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(mut self) -> Result<DeclarationOutput> {
        let source = self.ctx.source();
        for member in sorted_members(source) {
            match member {
                Member::Function(f) => self.declare_func(f),
                Member::Global(g) => self.declare_global(g),
                Member::Type(t) => self.declare_type(t),
                Member::Const(_) => {}
            }
        }
        Ok(self.output)
    }

    fn declare_func(&mut self, f: &Rc<ssa::Function>) {
        if f.is_generic() {
            if self.ctx.options().trace_instructions() {
                debug!("skipping generic function {}", f.full_name());
            }
            self.output.generics_skipped += 1;
            return;
        }
        let name = self.ctx.func_name(&f.func_ref());
        if self.ctx.options().trace_instructions() {
            debug!("==> NewFunc {name} {}", f.signature);
        }
        let sig = self.ctx.prog().func_type(&f.signature);
        let id = self.ctx.pkg_mut().new_func(&name, sig);
        self.ctx.push_pending(PendingBody {
            id,
            name,
            func: Rc::clone(f),
        });
        self.output.functions_declared += 1;
    }

    fn declare_global(&mut self, g: &ssa::Global) {
        let name = self.ctx.var_name(g);
        if self.ctx.options().trace_instructions() {
            debug!("==> NewVar {name} {}", g.ty);
        }
        let prog = self.ctx.prog();
        let ty = prog.type_of(&g.ty);
        let pkg = self.ctx.pkg_mut();
        let id = pkg.new_var(&name, ty.clone());
        pkg.init_var(id, prog.null(ty));
        self.output.globals_declared += 1;
    }

    fn declare_type(&mut self, t: &TypeName) {
        let name = full_name(&t.pkg, &t.name);
        if self.ctx.options().trace_instructions() {
            debug!("==> NewType {name} {}", t.ty);
        }
        let ty = self.ctx.prog().type_of(&t.ty);
        self.ctx.pkg_mut().new_type(&name, ty);
        self.output.types_declared += 1;
    }
}
