//! llgo Compiler
//!
//! Lowers one type-checked, optimized SSA package into a target IR package.
//!
//! ## Architecture
//!
//! - **Link names**: scan source files for `//go:linkname` directives
//! - **Pass 1 (Declaration)**: declare every function, global and type, in source-position order
//! - **Pass 2 (Compilation)**: build the queued function bodies
//!
//! ## Modules
//!
//! - [`classify`]: call-site classification of callees
//! - [`context`]: per-translation state, naming and lookup
//! - [`function_compiler`]: block and function body builders
//! - [`link_names`]: link-name directives
//! - [`lower`]: value resolution and instruction lowering
//! - [`options`]: debug tracing and error policy
//! - [`passes`]: the declaration and compilation passes
//!
//! ## Example
//!
//! ```
//! use llgo_compiler::{CompileOptions, translate};
//! use llgo_core::Pos;
//! use llgo_ir::Program;
//! use llgo_ssa::{Function, Instruction, Package, Return, Signature};
//!
//! let mut pkg = Package::new("hello", "hello");
//! let mut f = Function::new("hello", "noop", Signature::default(), Pos::new(1));
//! let entry = f.add_block("entry");
//! f.emit(entry, Instruction::Return(Return { results: vec![] }));
//! pkg.add_function(f);
//!
//! let prog = Program::new();
//! let out = translate(&prog, &pkg, &[], CompileOptions::default()).unwrap();
//! assert!(out.to_string().contains("define void @hello.noop()"));
//! ```

pub mod classify;
pub mod context;
pub mod function_compiler;
pub mod link_names;
pub mod lower;
pub mod options;
pub mod passes;

pub use classify::{FuncKind, UNSAFE_PKG, func_kind};
pub use context::{CompilationContext, ENTRY_FUNC, INIT_FUNC, PendingBody};
pub use function_compiler::FunctionCompiler;
pub use options::{CompileOptions, DebugFlags, ErrorPolicy};
pub use passes::{CompilationOutput, CompilationPass, DeclarationOutput, DeclarationPass};

pub use llgo_core::CompileError;

use llgo_ir::{self as ir, Program};
use llgo_ssa::{self as ssa, ast};
use log::debug;

/// Translate a source package into a new target package.
///
/// Link-name directives in `files` are registered first, then every member
/// is declared, then every body is built. On failure no partial package is
/// returned.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn translate(
    prog: &Program,
    pkg: &ssa::Package,
    files: &[ast::File],
    options: CompileOptions,
) -> Result<ir::Package, CompileError> {
    let mut ctx = CompilationContext::new(prog, pkg, options);
    link_names::init_files(&mut ctx, &pkg.path, files)?;

    let declared = DeclarationPass::new(&mut ctx).run()?;
    let compiled = CompilationPass::new(&mut ctx).run()?;
    if ctx.options().trace_instructions() {
        debug!(
            "translated {}: {} functions ({} bodies), {} globals, {} types",
            pkg.path,
            declared.functions_declared,
            compiled.bodies_built,
            declared.globals_declared,
            declared.types_declared
        );
    }
    Ok(ctx.into_package())
}
